// ============================================================================
// LOGIN VIEW - Formulario de acceso del administrador
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{alert, append_child, on_input_value, on_submit, set_text_content, ElementBuilder};
use crate::state::AppState;
use crate::views::{render_spinner, ViewContext};

/// Renderizar vista de login
pub fn render_login(ctx: &ViewContext) -> Result<Element, JsValue> {
    log::debug!("🎬 [LOGIN] render_login()");

    let logging_in = ctx.state.auth.get_logging_in();
    let credentials = ctx.state.auth.form_credentials();

    let container = ElementBuilder::new("div")?
        .class("container login")
        .build();

    let card = ElementBuilder::new("div")?
        .class("row justify-content-center mt-5")
        .build();

    let title = ElementBuilder::new("h1")?
        .class("h3 mb-3 font-weight-normal text-center")
        .text("請先登入")
        .build();

    let form = ElementBuilder::new("form")?
        .id("form")?
        .class("col-8 form-signin")
        .build();

    let username_group = create_form_group(
        &ctx.state,
        "username",
        "email",
        "Email address",
        "name@example.com",
        &credentials.username,
        logging_in,
    )?;
    let password_group = create_form_group(
        &ctx.state,
        "password",
        "password",
        "Password",
        "Password",
        &credentials.password,
        logging_in,
    )?;

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn btn-lg btn-primary w-100 mt-3")
        .flag("disabled", logging_in)?
        .build();

    if logging_in {
        append_child(&submit_btn, &render_spinner("登入中...")?)?;
    } else {
        set_text_content(&submit_btn, "登入");
    }

    // Submit: login + carga de la primera página
    {
        let ctx = ctx.clone();
        on_submit(&form, move || {
            if ctx.state.auth.get_logging_in() {
                return;
            }
            let credentials = ctx.state.auth.form_credentials();
            let ctx = ctx.clone();

            log::info!("🔐 [LOGIN] Iniciando login...");
            spawn_local(async move {
                if let Err(e) = ctx.session.login(&ctx.state, credentials).await {
                    alert(&format!("登入失敗: {}", e.user_message()));
                }
            });
        })?;
    }

    append_child(&form, &username_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &submit_btn)?;

    append_child(&card, &form)?;
    append_child(&container, &title)?;
    append_child(&container, &card)?;

    let footer = ElementBuilder::new("p")?
        .class("mt-5 mb-3 text-muted text-center")
        .text("© 2024~∞ - 六角學院")
        .build();
    append_child(&container, &footer)?;

    Ok(container)
}

/// Input flotante; escribe directamente en el formulario del estado
fn create_form_group(
    state: &AppState,
    id: &str,
    input_type: &str,
    label_text: &str,
    placeholder: &str,
    value: &str,
    disabled: bool,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-floating mb-3")
        .build();

    let input = ElementBuilder::new("input")?
        .attr("type", input_type)?
        .id(id)?
        .class("form-control")
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .flag("required", true)?
        .flag("autofocus", id == "username")?
        .flag("disabled", disabled)?
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    {
        let form = state.auth.form.clone();
        let is_password = id == "password";
        on_input_value(&input, move |text| {
            let mut credentials = form.borrow_mut();
            if is_password {
                credentials.password = text;
            } else {
                credentials.username = text;
            }
        })?;
    }

    append_child(&group, &input)?;
    append_child(&group, &label)?;
    Ok(group)
}
