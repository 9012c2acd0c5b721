// ============================================================================
// AUTH STATE - Estado de autenticación (sesión + flags de login/logout)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Credentials, Session};

#[derive(Clone)]
pub struct AuthState {
    pub session: Rc<RefCell<Option<Session>>>,
    /// Verificando el token de la cookie al arrancar
    pub checking: Rc<RefCell<bool>>,
    pub logging_in: Rc<RefCell<bool>>,
    pub logging_out: Rc<RefCell<bool>>,
    /// Valores del formulario de login (sobreviven al re-render)
    pub form: Rc<RefCell<Credentials>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            session: Rc::new(RefCell::new(None)),
            checking: Rc::new(RefCell::new(false)),
            logging_in: Rc::new(RefCell::new(false)),
            logging_out: Rc::new(RefCell::new(false)),
            form: Rc::new(RefCell::new(Credentials::default())),
        }
    }

    /// Establecer sesión (como mucho una activa)
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.borrow_mut() = session;
    }

    pub fn get_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session
            .borrow()
            .as_ref()
            .map(|s| !s.token.is_empty())
            .unwrap_or(false)
    }

    pub fn set_checking(&self, checking: bool) {
        *self.checking.borrow_mut() = checking;
    }

    pub fn get_checking(&self) -> bool {
        *self.checking.borrow()
    }

    /// Marcar login en curso; `false` si ya había uno
    pub fn begin_login(&self) -> bool {
        let mut flag = self.logging_in.borrow_mut();
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    pub fn end_login(&self) {
        *self.logging_in.borrow_mut() = false;
    }

    pub fn get_logging_in(&self) -> bool {
        *self.logging_in.borrow()
    }

    /// Marcar logout en curso; `false` si ya había uno
    pub fn begin_logout(&self) -> bool {
        let mut flag = self.logging_out.borrow_mut();
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    pub fn end_logout(&self) {
        *self.logging_out.borrow_mut() = false;
    }

    pub fn get_logging_out(&self) -> bool {
        *self.logging_out.borrow()
    }

    pub fn form_credentials(&self) -> Credentials {
        self.form.borrow().clone()
    }

    /// Tras un login correcto la contraseña no queda en memoria
    pub fn clear_password(&self) {
        self.form.borrow_mut().password.clear();
    }

    /// Logout - limpiar todo
    pub fn logout(&self) {
        self.set_session(None);
        self.set_checking(false);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
