// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Login, logout y restauración del token guardado en cookie.
// Tras autenticarse carga automáticamente la página 1 de productos.
// ============================================================================

use std::rc::Rc;
use chrono::Utc;
use crate::error::{ApiError, ApiResult};
use crate::models::{Credentials, Session};
use crate::services::{ApiClient, Transport};
use crate::state::AppState;
use crate::utils::storage::TokenStore;
use crate::viewmodels::ProductViewModel;

pub struct SessionViewModel<T: Transport, S: TokenStore> {
    api: Rc<ApiClient<T>>,
    store: S,
    products: ProductViewModel<T>,
}

impl<T: Transport, S: TokenStore + Clone> Clone for SessionViewModel<T, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            store: self.store.clone(),
            products: self.products.clone(),
        }
    }
}

impl<T: Transport, S: TokenStore> SessionViewModel<T, S> {
    pub fn new(api: Rc<ApiClient<T>>, store: S) -> Self {
        let products = ProductViewModel::new(api.clone());
        Self { api, store, products }
    }

    pub fn products(&self) -> &ProductViewModel<T> {
        &self.products
    }

    /// Login + carga automática de productos
    pub async fn login(&self, state: &AppState, credentials: Credentials) -> ApiResult<Session> {
        if !state.auth.begin_login() {
            return Err(ApiError::Validation("Ya hay un login en curso".to_string()));
        }
        state.notify_subscribers();

        let result = self.sign_in(credentials).await;
        state.auth.end_login();

        let session = match result {
            Ok(session) => session,
            Err(e) => {
                log::error!("❌ [LOGIN] {}", e);
                state.notify_subscribers();
                return Err(e);
            }
        };

        state.auth.set_session(Some(session.clone()));
        state.auth.clear_password();
        state.notify_subscribers();
        log::info!("✅ [LOGIN] Sesión establecida");

        if let Err(e) = self.products.refresh(state, 1).await {
            log::warn!("⚠️ [LOGIN] No se pudo cargar la primera página: {}", e);
        }
        Ok(session)
    }

    async fn sign_in(&self, credentials: Credentials) -> ApiResult<Session> {
        let response = self.api.sign_in(&credentials).await?;
        let session = Session::from_sign_in(&response)
            .ok_or_else(|| ApiError::Auth("登入回應缺少 token".to_string()))?;
        if session.is_expired(Utc::now()) {
            return Err(ApiError::Auth("登入已過期，請重新登入".to_string()));
        }

        // Sin cookie la sesión sigue valiendo hasta recargar la página
        if let Err(e) = self.store.save(&session.token, session.expires_at) {
            log::warn!("⚠️ [LOGIN] Token no persistido: {}", e);
        }
        Ok(session)
    }

    /// Logout best-effort: el estado local se limpia aunque falle la red
    pub async fn logout(&self, state: &AppState) {
        if !state.auth.begin_logout() {
            return;
        }
        state.notify_subscribers();

        if let Some(session) = state.auth.get_session() {
            match self.api.logout(&session).await {
                Ok(()) => log::info!("👋 [LOGOUT] Logout confirmado por el servidor"),
                Err(e) => log::warn!("⚠️ [LOGOUT] Falló el logout remoto: {}", e),
            }
        }

        if let Err(e) = self.store.clear() {
            log::error!("❌ [LOGOUT] Error limpiando la cookie: {}", e);
        }

        state.reset_session();
        state.auth.end_logout();
        state.notify_subscribers();
    }

    /// Al arrancar: validar el token de la cookie. Un token inválido solo deja sin sesión.
    pub async fn restore_session(&self, state: &AppState) -> Option<Session> {
        let token = self.store.load()?;
        let session = Session::new(token, None);

        state.auth.set_checking(true);
        state.notify_subscribers();

        let verified = self.api.check_auth(&session).await;
        state.auth.set_checking(false);

        match verified {
            Ok(()) => {
                log::info!("💾 [APP] Sesión restaurada desde cookie");
                state.auth.set_session(Some(session.clone()));
                state.notify_subscribers();
                if let Err(e) = self.products.refresh(state, 1).await {
                    log::warn!("⚠️ [APP] No se pudo cargar la primera página: {}", e);
                }
                Some(session)
            }
            Err(e) => {
                log::warn!("⚠️ [APP] Token de cookie no válido: {}", e);
                state.notify_subscribers();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::http::mock::MockTransport;
    use crate::services::HttpMethod;
    use crate::utils::storage::MemoryTokenStore;
    use serde_json::json;
    use tokio_test::block_on;

    fn setup(store: MemoryTokenStore) -> (MockTransport, SessionViewModel<MockTransport, MemoryTokenStore>, AppState) {
        let transport = MockTransport::new();
        let config = AppConfig {
            api_base: "https://api.test/v2".to_string(),
            ..AppConfig::default()
        };
        let api = Rc::new(ApiClient::new(transport.clone(), &config));
        (transport, SessionViewModel::new(api, store), AppState::new())
    }

    fn page_one() -> serde_json::Value {
        json!({
            "success": true,
            "products": [{"id": "p1", "title": "A"}],
            "pagination": {"total_pages": 1, "current_page": 1, "has_pre": false, "has_next": false}
        })
    }

    /// `expired` en milisegundos, relativo a ahora
    fn expiry_in(days: i64) -> i64 {
        (Utc::now() + chrono::Duration::days(days)).timestamp_millis()
    }

    fn creds() -> Credentials {
        Credentials {
            username: "admin@test.com".to_string(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_login_establishes_session_and_loads_page_one() {
        let store = MemoryTokenStore::new();
        let (transport, vm, state) = setup(store.clone());
        transport.respond(200, json!({"success": true, "token": "tok", "expired": expiry_in(1)}));
        transport.respond(200, page_one());

        let session = block_on(vm.login(&state, creds())).unwrap();
        assert_eq!(session.token, "tok");
        assert!(state.auth.is_logged_in());
        assert!(!state.auth.get_logging_in());
        assert_eq!(store.load(), Some("tok".to_string()));
        assert!(state.auth.form_credentials().password.is_empty());

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].url.ends_with("/admin/products?page=1"));
        assert_eq!(sent[1].header_value("Authorization"), Some("tok"));
        assert_eq!(state.products.products().len(), 1);
    }

    #[test]
    fn test_login_failure_stays_unauthenticated() {
        let store = MemoryTokenStore::new();
        let (transport, vm, state) = setup(store.clone());
        transport.respond(400, json!({"success": false, "message": "帳號或密碼錯誤"}));

        let result = block_on(vm.login(&state, creds()));
        assert_eq!(result, Err(ApiError::Auth("帳號或密碼錯誤".to_string())));
        assert!(!state.auth.is_logged_in());
        assert!(!state.auth.get_logging_in());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_login_with_past_expiry_is_rejected() {
        let store = MemoryTokenStore::new();
        let (transport, vm, state) = setup(store.clone());
        transport.respond(200, json!({"success": true, "token": "tok", "expired": expiry_in(-1)}));

        let result = block_on(vm.login(&state, creds()));
        assert!(matches!(result, Err(ApiError::Auth(_))));
        assert!(!state.auth.is_logged_in());
        assert!(!state.auth.get_logging_in());
        assert_eq!(store.load(), None);
        assert_eq!(transport.sent().len(), 1);
        assert!(state.products.products().is_empty());
    }

    #[test]
    fn test_login_rejected_while_in_flight() {
        let (transport, vm, state) = setup(MemoryTokenStore::new());
        state.auth.begin_login();
        assert!(matches!(block_on(vm.login(&state, creds())), Err(ApiError::Validation(_))));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_logout_clears_even_when_network_fails() {
        let store = MemoryTokenStore::with_token("tok");
        let (transport, vm, state) = setup(store.clone());
        state.auth.set_session(Some(Session::new("tok", None)));
        state.modal.borrow_mut().open_create();
        transport.fail("offline");

        block_on(vm.logout(&state));
        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.ends_with("/logout"));
        assert!(!state.auth.is_logged_in());
        assert!(!state.auth.get_logging_out());
        assert!(!state.modal.borrow().is_open());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_restore_valid_cookie() {
        let (transport, vm, state) = setup(MemoryTokenStore::with_token("tok"));
        transport.respond(200, json!({"success": true, "uid": "u1"}));
        transport.respond(200, page_one());

        let session = block_on(vm.restore_session(&state));
        assert_eq!(session.map(|s| s.token), Some("tok".to_string()));
        assert!(state.auth.is_logged_in());
        assert!(!state.auth.get_checking());
        assert!(transport.sent()[0].url.ends_with("/api/user/check"));
        assert_eq!(state.products.products().len(), 1);
    }

    #[test]
    fn test_restore_invalid_cookie_is_not_destructive() {
        let store = MemoryTokenStore::with_token("viejo");
        let (transport, vm, state) = setup(store.clone());
        transport.respond(401, json!({"success": false, "message": "驗證錯誤, 請重新登入"}));

        assert_eq!(block_on(vm.restore_session(&state)), None);
        assert!(!state.auth.is_logged_in());
        assert!(!state.auth.get_checking());
        // La cookie no se borra
        assert_eq!(store.load(), Some("viejo".to_string()));
    }

    #[test]
    fn test_restore_without_cookie_sends_nothing() {
        let (transport, vm, state) = setup(MemoryTokenStore::new());
        assert_eq!(block_on(vm.restore_session(&state)), None);
        assert!(transport.sent().is_empty());
    }
}
