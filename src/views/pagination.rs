// ============================================================================
// PAGINATION VIEW - « 1 2 3 »
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::views::ViewContext;

pub fn render_pagination(ctx: &ViewContext) -> Result<Element, JsValue> {
    let pagination = ctx.state.products.pagination();
    // Mientras carga una página los enlaces quedan deshabilitados
    let loading = ctx.state.products.get_loading();
    let enabled = |target: Option<u32>| target.filter(|_| !loading);

    let list = ElementBuilder::new("ul")?
        .class("pagination justify-content-center mt-4")
        .build();

    append_child(&list, &page_item(ctx, "«", enabled(pagination.previous()), false, Some("Previous"))?)?;
    for page in 1..=pagination.total_pages {
        let active = page == pagination.current_page;
        append_child(&list, &page_item(ctx, &page.to_string(), enabled(Some(page)), active, None)?)?;
    }
    append_child(&list, &page_item(ctx, "»", enabled(pagination.next()), false, Some("Next"))?)?;

    Ok(ElementBuilder::new("nav")?
        .attr("aria-label", "Page navigation")?
        .child(list)?
        .build())
}

/// `target == None` => item deshabilitado
fn page_item(
    ctx: &ViewContext,
    label: &str,
    target: Option<u32>,
    active: bool,
    aria_label: Option<&str>,
) -> Result<Element, JsValue> {
    let class = match (target, active) {
        (None, _) => "page-item disabled",
        (Some(_), true) => "page-item active",
        (Some(_), false) => "page-item",
    };

    let mut link = ElementBuilder::new("a")?
        .class("page-link")
        .attr("href", "#")?
        .text(label);
    if let Some(aria) = aria_label {
        link = link.attr("aria-label", aria)?;
    }
    let link = link.build();

    {
        let ctx = ctx.clone();
        on_click(&link, move |e| {
            e.prevent_default();
            let Some(page) = target else {
                return;
            };
            log::info!("📄 [PAGINATION] Ir a página {}", page);
            let ctx = ctx.clone();
            spawn_local(async move {
                if let Err(e) = ctx.products().go_to_page(&ctx.state, page).await {
                    log::error!("❌ [PAGINATION] {}", e);
                }
            });
        })?;
    }

    Ok(ElementBuilder::new("li")?
        .class(class)
        .child(link)?
        .build())
}
