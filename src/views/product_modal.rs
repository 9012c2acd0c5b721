// ============================================================================
// PRODUCT MODAL VIEW - Formulario de creación / edición
// ============================================================================
// Los inputs escriben directamente en el borrador del ModalController sin
// re-render, así el foco no se pierde. Solo se re-renderiza cuando cambia el
// número de casillas de imagen.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{alert, append_child, on_click, on_input_value, on_toggle, set_attribute, set_class_name, ElementBuilder};
use crate::state::{AppState, DraftField, ModalMode, ProductDraft};
use crate::views::{button, ViewContext};
use crate::viewmodels::SubmitOutcome;

/// Renderizar modal de producto (solo modos New / Edit)
pub fn render_product_modal(ctx: &ViewContext) -> Result<Option<Element>, JsValue> {
    let (mode, busy, draft) = {
        let modal = ctx.state.modal.borrow();
        (modal.mode(), modal.is_busy(), modal.draft().cloned())
    };
    let Some(draft) = draft else {
        return Ok(None);
    };

    let title = match mode {
        ModalMode::New => "新增產品",
        _ => "編輯產品",
    };

    let body = ElementBuilder::new("div")?
        .class("row")
        .child(render_images_column(&ctx.state, &draft, busy)?)?
        .child(render_fields_column(&ctx.state, &draft, busy)?)?
        .build();

    let footer = render_modal_footer(ctx, "確認", "btn btn-primary", busy)?;
    let frame = render_modal_frame(ctx, title, "modal-header bg-dark text-white", "modal-xl", body, footer, busy)?;
    Ok(Some(frame))
}

// ============================================================================
// MARCO COMÚN DE MODAL (también lo usa el modal de borrado)
// ============================================================================

pub(crate) fn render_modal_frame(
    ctx: &ViewContext,
    title: &str,
    header_class: &str,
    size_class: &str,
    body: Element,
    footer: Element,
    busy: bool,
) -> Result<Element, JsValue> {
    let close_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-close bg-light")
        .attr("aria-label", "Close")?
        .flag("disabled", busy)?
        .build();
    bind_cancel(&ctx.state, &close_btn)?;

    let header = ElementBuilder::new("div")?
        .class(header_class)
        .child(ElementBuilder::new("h5")?.class("modal-title").text(title).build())?
        .child(close_btn)?
        .build();

    let content = ElementBuilder::new("div")?
        .class("modal-content border-0 shadow-lg")
        .child(header)?
        .child(ElementBuilder::new("div")?.class("modal-body").child(body)?.build())?
        .child(footer)?
        .build();

    let dialog = ElementBuilder::new("div")?
        .class(&format!("modal-dialog {}", size_class))
        .child(content)?
        .build();

    let modal = ElementBuilder::new("div")?
        .id("productModal")?
        .class("modal fade show d-block")
        .attr("tabindex", "-1")?
        .attr("role", "dialog")?
        .child(dialog)?
        .build();

    let backdrop = ElementBuilder::new("div")?
        .class("modal-backdrop fade show")
        .build();

    Ok(ElementBuilder::new("div")?
        .child(modal)?
        .child(backdrop)?
        .build())
}

/// Footer con 取消 + botón de confirmación (spinner mientras hay submit en vuelo)
pub(crate) fn render_modal_footer(
    ctx: &ViewContext,
    confirm_label: &str,
    confirm_class: &str,
    busy: bool,
) -> Result<Element, JsValue> {
    let cancel_btn = button("取消", "btn btn-outline-secondary", busy)?;
    bind_cancel(&ctx.state, &cancel_btn)?;

    let confirm_btn = button(if busy { "" } else { confirm_label }, confirm_class, busy)?;
    if busy {
        let spinner = ElementBuilder::new("span")?
            .class("spinner-border spinner-border-sm text-light")
            .attr("role", "status")?
            .attr("aria-hidden", "true")?
            .build();
        append_child(&confirm_btn, &spinner)?;
    }
    {
        let ctx = ctx.clone();
        on_click(&confirm_btn, move |_| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.products().submit(&ctx.state).await {
                    Ok(SubmitOutcome::Completed) => {}
                    Ok(SubmitOutcome::Ignored) => log::debug!("🔁 [MODAL] Submit ignorado"),
                    Err(e) => alert(&format!("操作失敗: {}", e.user_message())),
                }
            });
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("modal-footer")
        .child(cancel_btn)?
        .child(confirm_btn)?
        .build())
}

fn bind_cancel(state: &AppState, element: &Element) -> Result<(), JsValue> {
    let state = state.clone();
    on_click(element, move |_| {
        let closed = state.modal.borrow_mut().cancel();
        if closed {
            log::info!("❎ [MODAL] Modal cerrado");
            state.notify_subscribers();
        }
    })
}

// ============================================================================
// COLUMNA DE IMÁGENES
// ============================================================================

fn render_images_column(state: &AppState, draft: &ProductDraft, busy: bool) -> Result<Element, JsValue> {
    let column = ElementBuilder::new("div")?
        .class("col-md-4")
        .build();

    // Imagen principal
    let main_group = ElementBuilder::new("div")?.class("mb-3").build();
    append_child(&main_group, &field_label(DraftField::ImageUrl, "主圖網址")?)?;
    let main_input = text_input(state, DraftField::ImageUrl, "請輸入主圖連結", &draft.image_url, busy)?;
    let main_preview = preview_image(&draft.image_url, "主圖", "img-fluid mt-3 border")?;
    bind_preview(&main_input, &main_preview, "img-fluid mt-3 border")?;
    append_child(&main_group, &main_input)?;
    append_child(&main_group, &main_preview)?;
    append_child(&column, &main_group)?;

    // Imágenes adicionales
    let images = ElementBuilder::new("div")?.build();
    for (index, url) in draft.images_url.iter().enumerate() {
        append_child(&images, &render_image_slot(state, index, url, busy)?)?;
    }

    let add_btn = button("新增圖片", "btn btn-outline-primary btn-sm", busy || !draft.can_add_image_slot())?;
    {
        let state = state.clone();
        on_click(&add_btn, move |_| {
            let added = state
                .modal
                .borrow_mut()
                .draft_mut()
                .map(|d| d.add_image_slot())
                .unwrap_or(false);
            if added {
                state.notify_subscribers();
            }
        })?;
    }

    let actions = ElementBuilder::new("div")?
        .class("d-flex justify-content-between")
        .child(add_btn)?
        .build();

    if !draft.images_url.is_empty() {
        let remove_btn = button("刪除最後一張圖片", "btn btn-outline-danger btn-sm", busy)?;
        let state = state.clone();
        on_click(&remove_btn, move |_| {
            let removed = state
                .modal
                .borrow_mut()
                .draft_mut()
                .map(|d| d.remove_last_image())
                .unwrap_or(false);
            if removed {
                state.notify_subscribers();
            }
        })?;
        append_child(&actions, &remove_btn)?;
    }

    append_child(&images, &actions)?;
    append_child(&column, &images)?;
    Ok(column)
}

fn render_image_slot(state: &AppState, index: usize, url: &str, busy: bool) -> Result<Element, JsValue> {
    let slot = ElementBuilder::new("div")?.class("mb-2").build();

    let input = ElementBuilder::new("input")?
        .attr("type", "text")?
        .class("form-control mb-2")
        .attr("placeholder", &format!("圖片網址 {}", index + 1))?
        .attr("value", url)?
        .flag("disabled", busy)?
        .build();
    let preview = preview_image(url, &format!("副圖 {}", index + 1), "img-thumbnail mb-2")?;

    {
        let state = state.clone();
        let preview = preview.clone();
        on_input_value(&input, move |text| {
            update_preview(&preview, &text, "img-thumbnail mb-2");
            let slots_changed = state
                .modal
                .borrow_mut()
                .draft_mut()
                .map(|d| d.set_image(index, text))
                .unwrap_or(false);
            if slots_changed {
                state.notify_subscribers();
            }
        })?;
    }

    append_child(&slot, &input)?;
    append_child(&slot, &preview)?;
    Ok(slot)
}

fn preview_image(src: &str, alt: &str, class: &str) -> Result<Element, JsValue> {
    let img = ElementBuilder::new("img")?
        .attr("alt", alt)?
        .build();
    update_preview(&img, src, class);
    Ok(img)
}

/// Vista previa sin re-render: oculta la imagen si la URL está vacía
fn update_preview(img: &Element, src: &str, class: &str) {
    if src.is_empty() {
        set_class_name(img, &format!("{} d-none", class));
    } else {
        set_class_name(img, class);
        if let Err(e) = set_attribute(img, "src", src) {
            log::warn!("⚠️ [MODAL] No se pudo actualizar la vista previa: {:?}", e);
        }
    }
}

fn bind_preview(input: &Element, preview: &Element, class: &'static str) -> Result<(), JsValue> {
    let preview = preview.clone();
    on_input_value(input, move |text| update_preview(&preview, &text, class))
}

// ============================================================================
// COLUMNA DE CAMPOS
// ============================================================================

fn render_fields_column(state: &AppState, draft: &ProductDraft, busy: bool) -> Result<Element, JsValue> {
    let column = ElementBuilder::new("div")?
        .class("col-md-8")
        .build();

    append_child(&column, &field_group(state, draft, DraftField::Title, "標題", "請輸入標題", "mb-3", busy)?)?;

    let category_row = ElementBuilder::new("div")?
        .class("row")
        .child(field_group(state, draft, DraftField::Category, "分類", "請輸入分類", "col-md-6 mb-3", busy)?)?
        .child(field_group(
            state,
            draft,
            DraftField::Tags,
            "標籤",
            "請輸入標籤，用逗號隔開，例如：標籤1, 標籤2",
            "col-md-6 mb-3",
            busy,
        )?)?
        .build();
    append_child(&column, &category_row)?;

    append_child(
        &column,
        &field_group(state, draft, DraftField::Unit, "單位", "請輸入單位（例如：本、件、箱）", "mb-3", busy)?,
    )?;

    let price_row = ElementBuilder::new("div")?
        .class("row")
        .child(field_group(state, draft, DraftField::OriginPrice, "原價", "請輸入原價", "col-md-6 mb-3", busy)?)?
        .child(field_group(state, draft, DraftField::Price, "售價", "請輸入售價", "col-md-6 mb-3", busy)?)?
        .build();
    append_child(&column, &price_row)?;

    append_child(&column, &textarea_group(state, draft, DraftField::Description, "產品描述", "請輸入產品描述", busy)?)?;
    append_child(&column, &textarea_group(state, draft, DraftField::Content, "產品簡介", "請輸入產品簡介", busy)?)?;

    append_child(&column, &enabled_checkbox(state, draft.is_enabled, busy)?)?;
    Ok(column)
}

fn field_label(field: DraftField, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("label")?
        .attr("for", field.input_id())?
        .class("form-label fw-bold")
        .text(text)
        .build())
}

fn text_input(
    state: &AppState,
    field: DraftField,
    placeholder: &str,
    value: &str,
    busy: bool,
) -> Result<Element, JsValue> {
    let input_type = match field {
        DraftField::OriginPrice | DraftField::Price => "number",
        _ => "text",
    };
    let input = ElementBuilder::new("input")?
        .id(field.input_id())?
        .attr("type", input_type)?
        .class("form-control")
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .flag("disabled", busy)?
        .build();
    bind_field(state, &input, field)?;
    Ok(input)
}

fn field_group(
    state: &AppState,
    draft: &ProductDraft,
    field: DraftField,
    label: &str,
    placeholder: &str,
    class: &str,
    busy: bool,
) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(class)
        .child(field_label(field, label)?)?
        .child(text_input(state, field, placeholder, draft.get(field), busy)?)?
        .build())
}

fn textarea_group(
    state: &AppState,
    draft: &ProductDraft,
    field: DraftField,
    label: &str,
    placeholder: &str,
    busy: bool,
) -> Result<Element, JsValue> {
    let area = ElementBuilder::new("textarea")?
        .id(field.input_id())?
        .class("form-control")
        .attr("placeholder", placeholder)?
        .text(draft.get(field))
        .flag("disabled", busy)?
        .build();
    bind_field(state, &area, field)?;

    Ok(ElementBuilder::new("div")?
        .class("mb-3")
        .child(field_label(field, label)?)?
        .child(area)?
        .build())
}

fn bind_field(state: &AppState, element: &Element, field: DraftField) -> Result<(), JsValue> {
    let state = state.clone();
    on_input_value(element, move |text| {
        if let Some(draft) = state.modal.borrow_mut().draft_mut() {
            draft.set(field, text);
        }
    })
}

fn enabled_checkbox(state: &AppState, checked: bool, busy: bool) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id("is_enabled")?
        .class("form-check-input")
        .attr("type", "checkbox")?
        .flag("checked", checked)?
        .flag("disabled", busy)?
        .build();
    {
        let state = state.clone();
        on_toggle(&input, move |checked| {
            if let Some(draft) = state.modal.borrow_mut().draft_mut() {
                draft.set_enabled(checked);
            }
        })?;
    }

    let label = ElementBuilder::new("label")?
        .attr("for", "is_enabled")?
        .class("form-check-label fw-bold")
        .text("是否啟用")
        .build();

    Ok(ElementBuilder::new("div")?
        .class("form-check mb-3")
        .child(input)?
        .child(label)?
        .build())
}
