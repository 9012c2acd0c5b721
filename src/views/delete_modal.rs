// ============================================================================
// DELETE MODAL VIEW - Confirmación de borrado
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};
use crate::state::ModalState;
use crate::views::product_modal::{render_modal_footer, render_modal_frame};
use crate::views::ViewContext;

pub fn render_delete_modal(ctx: &ViewContext) -> Result<Option<Element>, JsValue> {
    let (title, busy) = {
        let modal = ctx.state.modal.borrow();
        match modal.state() {
            ModalState::ConfirmingDelete { title, .. } => (title.clone(), modal.is_busy()),
            _ => return Ok(None),
        }
    };

    let question = ElementBuilder::new("p")?
        .class("h5")
        .text("確定要刪除")
        .child(ElementBuilder::new("span")?.class("text-danger").text(&format!(" {} ", title)).build())?
        .build();
    append_child(&question, &ElementBuilder::new("span")?.text("嗎?").build())?;

    let footer = render_modal_footer(ctx, "刪除", "btn btn-danger", busy)?;
    let frame = render_modal_frame(ctx, "刪除產品", "modal-header bg-danger text-white", "modal-md", question, footer, busy)?;
    Ok(Some(frame))
}
