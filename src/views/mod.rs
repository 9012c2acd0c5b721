// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica de negocio)
// ============================================================================
// Cada vista recibe el contexto y devuelve un Element. Las acciones se
// delegan a los ViewModels con spawn_local; el re-render lo dispara
// `AppState::notify_subscribers`.
// ============================================================================

pub mod app;
pub mod login;
pub mod product_list;
pub mod pagination;
pub mod product_modal;
pub mod delete_modal;

pub use app::render_app;

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::state::AppState;
use crate::viewmodels::{BrowserProductViewModel, BrowserSessionViewModel};

/// Lo que necesita cualquier vista: estado + viewmodels
#[derive(Clone)]
pub struct ViewContext {
    pub state: AppState,
    pub session: BrowserSessionViewModel,
}

impl ViewContext {
    pub fn new(state: AppState, session: BrowserSessionViewModel) -> Self {
        Self { state, session }
    }

    pub fn products(&self) -> BrowserProductViewModel {
        self.session.products().clone()
    }
}

/// Spinner de carga (bootstrap)
pub(crate) fn render_spinner(label: &str) -> Result<Element, JsValue> {
    let spinner = ElementBuilder::new("div")?
        .class("spinner-border spinner-border-sm")
        .attr("role", "status")?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("d-flex align-items-center gap-2 text-secondary")
        .child(spinner)?
        .child(ElementBuilder::new("span")?.text(label).build())?
        .build())
}

/// Botón `type="button"` con clases bootstrap
pub(crate) fn button(label: &str, class: &str, disabled: bool) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .attr("type", "button")?
        .class(class)
        .text(label)
        .flag("disabled", disabled)?
        .build())
}
