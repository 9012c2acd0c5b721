// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::state::{AuthState, ModalController, ProductListState};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub products: ProductListState,
    pub modal: Rc<RefCell<ModalController>>,

    // Reactivity: callbacks para notificar cambios (re-render)
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            auth: AuthState::new(),
            products: ProductListState::new(),
            modal: Rc::new(RefCell::new(ModalController::new())),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify_subscribers(&self) {
        // Sin borrow activo mientras corren los callbacks
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }

    /// Volver al estado sin sesión (logout o token inválido)
    pub fn reset_session(&self) {
        self.auth.logout();
        self.products.clear();
        self.products.set_loading(false);
        self.modal.borrow_mut().reset();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, Session};
    use std::cell::Cell;

    #[test]
    fn test_notify_calls_every_subscriber() {
        let state = AppState::new();
        let calls = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let calls = calls.clone();
            state.subscribe_to_changes(move || calls.set(calls.get() + 1));
        }
        state.notify_subscribers();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_reset_session_clears_everything() {
        let state = AppState::new();
        state.auth.set_session(Some(Session::new("tok", None)));
        state.modal.borrow_mut().open_edit(&Product::default());
        state.reset_session();
        assert!(!state.auth.is_logged_in());
        assert!(!state.modal.borrow().is_open());
        assert!(state.products.products().is_empty());
    }
}
