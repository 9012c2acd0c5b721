// ============================================================================
// PRODUCT LIST VIEW - Tabla de productos + cabecera con logout / crear
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::Product;
use crate::views::{button, render_spinner, ViewContext};

const COLUMNS: [(&str, &str); 6] = [
    ("分類", ""),
    ("產品名稱", ""),
    ("原價", "text-end"),
    ("售價", "text-end"),
    ("狀態", ""),
    ("操作", ""),
];

/// Renderizar listado de productos
pub fn render_product_list(ctx: &ViewContext) -> Result<Element, JsValue> {
    let loading = ctx.state.products.get_loading();
    let logging_out = ctx.state.auth.get_logging_out();

    let container = ElementBuilder::new("div")?
        .class("container mt-4")
        .build();

    append_child(&container, &render_toolbar(ctx, logging_out)?)?;

    let table = ElementBuilder::new("table")?
        .class("table table-bordered table-striped table-hover")
        .attr("style", "min-width: 900px; white-space: nowrap")?
        .build();

    let header_row = create_element_row()?;
    for (label, class) in COLUMNS {
        let th = ElementBuilder::new("th")?
            .attr("scope", "col")?
            .class(class)
            .text(label)
            .build();
        append_child(&header_row, &th)?;
    }
    let thead = ElementBuilder::new("thead")?
        .class("table-dark")
        .child(header_row)?
        .build();

    let tbody = ElementBuilder::new("tbody")?.build();
    if loading {
        let cell = ElementBuilder::new("td")?
            .attr("colspan", "6")?
            .class("text-center")
            .child(render_spinner("Loading...")?)?
            .build();
        append_child(&tbody, &ElementBuilder::new("tr")?.child(cell)?.build())?;
    } else {
        for product in ctx.state.products.products() {
            append_child(&tbody, &render_product_row(ctx, &product)?)?;
        }
    }

    append_child(&table, &thead)?;
    append_child(&table, &tbody)?;

    let responsive = ElementBuilder::new("div")?
        .class("table-responsive")
        .child(table)?
        .build();
    append_child(&container, &responsive)?;

    Ok(container)
}

fn create_element_row() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("tr")?.build())
}

/// Título + botones de logout y de creación
fn render_toolbar(ctx: &ViewContext, logging_out: bool) -> Result<Element, JsValue> {
    let toolbar = ElementBuilder::new("div")?
        .class("d-flex justify-content-between align-items-center mb-3")
        .build();

    let title = ElementBuilder::new("h2")?
        .class("fw-bold")
        .text("產品清單")
        .build();

    let logout_btn = button(if logging_out { "" } else { "登出" }, "btn btn-danger btn-sm", logging_out)?;
    if logging_out {
        append_child(&logout_btn, &render_spinner("")?)?;
    }
    {
        let ctx = ctx.clone();
        on_click(&logout_btn, move |_| {
            log::info!("👋 [LOGOUT] Click en logout");
            let ctx = ctx.clone();
            spawn_local(async move {
                ctx.session.logout(&ctx.state).await;
            });
        })?;
    }

    let create_btn = button("建立新產品", "btn btn-primary btn-sm", logging_out)?;
    {
        let state = ctx.state.clone();
        on_click(&create_btn, move |_| {
            let opened = state.modal.borrow_mut().open_create();
            if opened {
                log::info!("🆕 [MODAL] Abriendo modal de creación");
                state.notify_subscribers();
            }
        })?;
    }

    let actions = ElementBuilder::new("div")?
        .class("d-flex gap-2")
        .child(logout_btn)?
        .child(create_btn)?
        .build();

    append_child(&toolbar, &title)?;
    append_child(&toolbar, &actions)?;
    Ok(toolbar)
}

fn render_product_row(ctx: &ViewContext, product: &Product) -> Result<Element, JsValue> {
    let row = create_element_row()?;

    let cells = [
        (product.category.clone(), ""),
        (product.title.clone(), ""),
        (format!("${}", product.origin_price), "text-end"),
        (format!("${}", product.price), "text-end"),
    ];
    for (text, class) in cells {
        append_child(&row, &ElementBuilder::new("td")?.class(class).text(&text).build())?;
    }

    let badge = if product.is_enabled {
        ElementBuilder::new("span")?.class("badge bg-success").text("啟用")
    } else {
        ElementBuilder::new("span")?.class("badge bg-secondary").text("未啟用")
    };
    append_child(&row, &ElementBuilder::new("td")?.child(badge.build())?.build())?;

    let edit_btn = button("編輯", "btn btn-outline-primary btn-sm", false)?;
    {
        let state = ctx.state.clone();
        let product = product.clone();
        on_click(&edit_btn, move |_| {
            let opened = state.modal.borrow_mut().open_edit(&product);
            if opened {
                log::info!("✏️ [MODAL] Editando producto {}", product.id);
                state.notify_subscribers();
            }
        })?;
    }

    let delete_btn = button("刪除", "btn btn-outline-danger btn-sm", false)?;
    {
        let state = ctx.state.clone();
        let product = product.clone();
        on_click(&delete_btn, move |_| {
            let opened = state.modal.borrow_mut().open_delete(&product);
            if opened {
                log::info!("🗑️ [MODAL] Confirmar eliminación de {}", product.id);
                state.notify_subscribers();
            }
        })?;
    }

    let group = ElementBuilder::new("div")?
        .class("btn-group")
        .child(edit_btn)?
        .child(delete_btn)?
        .build();
    append_child(&row, &ElementBuilder::new("td")?.child(group)?.build())?;

    Ok(row)
}
