// ============================================================================
// MODAL STATE - Máquina de estados del modal (crear / editar / eliminar)
// ============================================================================

use crate::models::{Product, ProductPayload};
use crate::state::draft::ProductDraft;

/// Qué modal está visible
#[derive(Clone, Debug, PartialEq)]
pub enum ModalState {
    Closed,
    Creating(ProductDraft),
    Editing { id: String, draft: ProductDraft },
    ConfirmingDelete { id: String, title: String },
}

/// Modo del modal (para la vista)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalMode {
    None,
    New,
    Edit,
    Delete,
}

/// Acción de red que resulta de confirmar el modal
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitAction {
    Create(ProductPayload),
    Update { id: String, payload: ProductPayload },
    Delete { id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModalController {
    state: ModalState,
    busy: bool,
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            busy: false,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn mode(&self) -> ModalMode {
        match self.state {
            ModalState::Closed => ModalMode::None,
            ModalState::Creating(_) => ModalMode::New,
            ModalState::Editing { .. } => ModalMode::Edit,
            ModalState::ConfirmingDelete { .. } => ModalMode::Delete,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Hay un submit en vuelo (botones deshabilitados)
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn open(&mut self, next: ModalState) -> bool {
        if self.is_open() {
            log::warn!("⚠️ [MODAL] Ya hay un modal abierto ({:?}), se ignora", self.mode());
            return false;
        }
        self.state = next;
        true
    }

    pub fn open_create(&mut self) -> bool {
        self.open(ModalState::Creating(ProductDraft::blank()))
    }

    pub fn open_edit(&mut self, product: &Product) -> bool {
        self.open(ModalState::Editing {
            id: product.id.clone(),
            draft: ProductDraft::from_product(product),
        })
    }

    pub fn open_delete(&mut self, product: &Product) -> bool {
        self.open(ModalState::ConfirmingDelete {
            id: product.id.clone(),
            title: product.title.clone(),
        })
    }

    /// Cerrar sin llamada de red. No se puede cancelar con un submit en vuelo.
    pub fn cancel(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.state = ModalState::Closed;
        true
    }

    pub fn draft(&self) -> Option<&ProductDraft> {
        match &self.state {
            ModalState::Creating(draft) | ModalState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Acceso mutable al borrador; `None` si no hay formulario o hay submit en vuelo
    pub fn draft_mut(&mut self) -> Option<&mut ProductDraft> {
        if self.busy {
            return None;
        }
        match &mut self.state {
            ModalState::Creating(draft) | ModalState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Marcar submit en vuelo y devolver la acción a ejecutar.
    /// `None` si el modal está cerrado o ya hay un submit en vuelo.
    pub fn begin_submit(&mut self) -> Option<SubmitAction> {
        if self.busy {
            log::warn!("⚠️ [MODAL] Submit en vuelo, se ignora el segundo submit");
            return None;
        }
        let action = match &self.state {
            ModalState::Closed => return None,
            ModalState::Creating(draft) => SubmitAction::Create(draft.to_payload()),
            ModalState::Editing { id, draft } => SubmitAction::Update {
                id: id.clone(),
                payload: draft.to_payload(),
            },
            ModalState::ConfirmingDelete { id, .. } => SubmitAction::Delete { id: id.clone() },
        };
        self.busy = true;
        Some(action)
    }

    /// Resultado del submit: éxito cierra el modal; fallo lo deja abierto y rehabilitado
    pub fn finish_submit(&mut self, success: bool) {
        self.busy = false;
        if success {
            self.state = ModalState::Closed;
        }
    }

    /// Cierre forzado (logout)
    pub fn reset(&mut self) {
        self.busy = false;
        self.state = ModalState::Closed;
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}
