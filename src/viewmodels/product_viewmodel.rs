// ============================================================================
// PRODUCT VIEWMODEL - Listado, paginación y submit de los modales
// ============================================================================
// Ningún borrow de RefCell cruza un .await
// ============================================================================

use std::rc::Rc;
use chrono::Utc;
use crate::error::{ApiError, ApiResult};
use crate::models::Session;
use crate::services::{ApiClient, Transport};
use crate::state::{AppState, ProductPage, SubmitAction};

/// Resultado de `submit`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Petición enviada con éxito; modal cerrado y lista refrescada
    Completed,
    /// Modal cerrado o submit ya en vuelo: no se envió nada
    Ignored,
}

pub struct ProductViewModel<T: Transport> {
    api: Rc<ApiClient<T>>,
}

impl<T: Transport> Clone for ProductViewModel<T> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone() }
    }
}

impl<T: Transport> ProductViewModel<T> {
    pub fn new(api: Rc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Cargar una página de productos. En error la lista anterior queda intacta.
    pub async fn refresh(&self, state: &AppState, page: u32) -> ApiResult<()> {
        let session = active_session(state)?;

        state.products.set_loading(true);
        state.notify_subscribers();

        let result = self.api.get_products(&session, page).await;
        state.products.set_loading(false);

        match result {
            Ok(response) => {
                log::info!(
                    "📦 [PRODUCTS] Página {}/{} cargada ({} productos)",
                    response.pagination.current_page,
                    response.pagination.total_pages,
                    response.products.len()
                );
                state.products.replace(ProductPage {
                    products: response.products,
                    pagination: response.pagination,
                });
                state.notify_subscribers();
                Ok(())
            }
            Err(e) => {
                if e.is_auth() {
                    log::warn!("🔒 [PRODUCTS] Token rechazado por el servidor");
                }
                log::error!("❌ [PRODUCTS] Error obteniendo productos: {}", e);
                state.notify_subscribers();
                Err(e)
            }
        }
    }

    /// Ir a la página `page`; fuera de `1..=total_pages` o con una carga en curso
    /// no hace nada y devuelve `false`
    pub async fn go_to_page(&self, state: &AppState, page: u32) -> ApiResult<bool> {
        if state.products.get_loading() {
            log::warn!("⚠️ [PRODUCTS] Carga en curso, se ignora el cambio a página {}", page);
            return Ok(false);
        }
        if !state.products.can_go_to(page) {
            log::warn!("⚠️ [PRODUCTS] Página {} fuera de rango, se ignora", page);
            return Ok(false);
        }
        self.refresh(state, page).await?;
        Ok(true)
    }

    /// Confirmar el modal abierto (crear, editar o eliminar)
    pub async fn submit(&self, state: &AppState) -> ApiResult<SubmitOutcome> {
        let session = active_session(state)?;

        let action = state.modal.borrow_mut().begin_submit();
        let Some(action) = action else {
            return Ok(SubmitOutcome::Ignored);
        };
        state.notify_subscribers();

        let result = match &action {
            SubmitAction::Create(payload) => self.api.create_product(&session, payload).await,
            SubmitAction::Update { id, payload } => {
                self.api.update_product(&session, id, payload).await
            }
            SubmitAction::Delete { id } => self.api.delete_product(&session, id).await,
        };

        match result {
            Ok(()) => {
                log::info!("✅ [MODAL] {}", describe(&action));
                state.modal.borrow_mut().finish_submit(true);
                state.notify_subscribers();

                // El submit ya se hizo: un fallo del refresh solo se loguea
                let page = state.products.current_page();
                if let Err(e) = self.refresh(state, page).await {
                    log::warn!("⚠️ [PRODUCTS] Lista no refrescada tras {}: {}", describe(&action), e);
                }
                Ok(SubmitOutcome::Completed)
            }
            Err(e) => {
                log::error!("❌ [MODAL] Falló {}: {}", describe(&action), e);
                state.modal.borrow_mut().finish_submit(false);
                state.notify_subscribers();
                Err(e)
            }
        }
    }
}

/// Sesión actual, rechazando la que ya pasó su `expired`
fn active_session(state: &AppState) -> ApiResult<Session> {
    let session = state.auth.get_session().ok_or(ApiError::NoSession)?;
    if session.is_expired(Utc::now()) {
        return Err(ApiError::Auth("登入已過期，請重新登入".to_string()));
    }
    Ok(session)
}

fn describe(action: &SubmitAction) -> String {
    match action {
        SubmitAction::Create(payload) => format!("crear producto '{}'", payload.title),
        SubmitAction::Update { id, .. } => format!("actualizar producto {}", id),
        SubmitAction::Delete { id } => format!("eliminar producto {}", id),
    }
}
