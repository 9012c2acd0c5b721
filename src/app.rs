// ============================================================================
// APP - Aplicación principal
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, release_listeners, set_inner_html};
use crate::services::{ApiClient, GlooTransport};
use crate::state::AppState;
use crate::utils::storage::CookieTokenStore;
use crate::viewmodels::BrowserSessionViewModel;
use crate::views::{render_app, ViewContext};

/// Aplicación principal
pub struct App {
    ctx: ViewContext,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();
        let api = Rc::new(ApiClient::new(GlooTransport::new(), &CONFIG));
        let session = BrowserSessionViewModel::new(api, CookieTokenStore::new(CONFIG.token_cookie.clone()));
        let ctx = ViewContext::new(state, session);

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        ctx.state.subscribe_to_changes(move || {
            // Usar gloo_timers para batchear múltiples updates
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        // Cookie guardada => verificar y cargar página 1
        {
            let ctx = ctx.clone();
            spawn_local(async move {
                if ctx.session.restore_session(&ctx.state).await.is_none() {
                    log::info!("🔐 [APP] Sin sesión válida, mostrando login");
                }
            });
        }

        Ok(Self { ctx, root })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] App::render()");
        set_inner_html(&self.root, "");
        let released = release_listeners();
        log::trace!("🧹 [APP] {} listeners liberados", released);
        let app_view = render_app(&self.ctx)?;
        append_child(&self.root, &app_view)?;
        Ok(())
    }
}
