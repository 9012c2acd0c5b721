// Utils compartidos

pub mod storage;

pub use storage::{CookieTokenStore, MemoryTokenStore, TokenStore};
