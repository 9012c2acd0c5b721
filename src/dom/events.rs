// ============================================================================
// EVENT HANDLING - Helpers de listeners
// ============================================================================
// Las closures de un render quedan en LISTENERS hasta el render siguiente,
// que las suelta con `release_listeners()` después de vaciar el árbol.
// Solo se registran sobre elementos del árbol de la app, nunca sobre
// window/document.
// ============================================================================

use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, HtmlTextAreaElement, MouseEvent};

/// Dueño de las closures registradas durante un render
#[derive(Default)]
pub struct ListenerBag {
    held: RefCell<Vec<Box<dyn Any>>>,
}

impl ListenerBag {
    pub fn hold<T: 'static>(&self, value: T) {
        self.held.borrow_mut().push(Box::new(value));
    }

    pub fn len(&self) -> usize {
        self.held.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.borrow().is_empty()
    }

    /// Soltar todo lo retenido; el drop ocurre fuera del borrow
    pub fn release(&self) -> usize {
        let stale = std::mem::take(&mut *self.held.borrow_mut());
        let released = stale.len();
        drop(stale);
        released
    }
}

thread_local! {
    static LISTENERS: ListenerBag = ListenerBag::default();
}

/// Liberar las closures del render anterior (llamar con el árbol ya vaciado)
pub fn release_listeners() -> usize {
    LISTENERS.with(|bag| bag.release())
}

fn listen<E, F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: 'static,
    dyn FnMut(E): WasmClosure,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|bag| bag.hold(closure));
    Ok(())
}

/// Click
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

/// Submit de formulario (sin recargar la página)
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

/// Input de texto: entrega el valor actual del input/textarea
pub fn on_input_value<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    listen(element, "input", move |e: Event| {
        if let Some(value) = event_value(&e) {
            handler(value);
        }
    })
}

/// Checkbox: entrega `checked`
pub fn on_toggle<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(bool) + 'static,
{
    listen(element, "change", move |e: Event| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            handler(input.checked());
        }
    })
}

fn event_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    target.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_release_drops_held_handlers() {
        let bag = ListenerBag::default();
        let captured = Rc::new(());
        for _ in 0..3 {
            bag.hold(captured.clone());
        }
        assert_eq!(bag.len(), 3);
        assert_eq!(Rc::strong_count(&captured), 4);

        assert_eq!(bag.release(), 3);
        assert!(bag.is_empty());
        assert_eq!(Rc::strong_count(&captured), 1);
    }
}
