pub mod product_viewmodel;
pub mod session_viewmodel;

pub use product_viewmodel::{ProductViewModel, SubmitOutcome};
pub use session_viewmodel::SessionViewModel;

use crate::services::GlooTransport;
use crate::utils::storage::CookieTokenStore;

/// ViewModels concretos del navegador
pub type BrowserSessionViewModel = SessionViewModel<GlooTransport, CookieTokenStore>;
pub type BrowserProductViewModel = ProductViewModel<GlooTransport>;
