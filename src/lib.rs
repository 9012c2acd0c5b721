// ============================================================================
// BOOK RENTAL ADMIN - PANEL DE PRODUCTOS (RUST PURO + MVVM)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Flujos async (login, listado, submit de modales)
// - Services: SOLO comunicación API
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con la API
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod viewmodels;
pub mod state;
pub mod utils;
mod dom;
mod views;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Book Rental Admin - Rust Puro + MVVM ({})", CONFIG.api_path);

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
        }
    });
}

/// Re-render llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
