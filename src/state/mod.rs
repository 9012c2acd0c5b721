// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod auth_state;
pub mod draft;
pub mod modal_state;
pub mod product_list_state;
pub mod app_state;

pub use auth_state::*;
pub use draft::*;
pub use modal_state::*;
pub use product_list_state::*;
pub use app_state::*;
