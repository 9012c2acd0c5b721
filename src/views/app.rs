// ============================================================================
// APP VIEW - Vista raíz: verificación / login / listado + modales
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};
use crate::views::delete_modal::render_delete_modal;
use crate::views::login::render_login;
use crate::views::pagination::render_pagination;
use crate::views::product_list::render_product_list;
use crate::views::product_modal::render_product_modal;
use crate::views::{render_spinner, ViewContext};

/// Renderizar la aplicación completa según el estado actual
pub fn render_app(ctx: &ViewContext) -> Result<Element, JsValue> {
    let root = ElementBuilder::new("div")?
        .class("app-container")
        .build();

    if ctx.state.auth.get_checking() {
        let checking = ElementBuilder::new("div")?
            .class("d-flex justify-content-center mt-5")
            .child(render_spinner("驗證登入狀態...")?)?
            .build();
        append_child(&root, &checking)?;
        return Ok(root);
    }

    if !ctx.state.auth.is_logged_in() {
        append_child(&root, &render_login(ctx)?)?;
        return Ok(root);
    }

    append_child(&root, &render_product_list(ctx)?)?;
    append_child(&root, &render_pagination(ctx)?)?;

    if let Some(modal) = render_product_modal(ctx)? {
        append_child(&root, &modal)?;
    }
    if let Some(modal) = render_delete_modal(ctx)? {
        append_child(&root, &modal)?;
    }

    Ok(root)
}
