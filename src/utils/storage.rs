// ============================================================================
// TOKEN STORAGE - Persistencia del token de sesión en cookie
// ============================================================================

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};
use crate::error::{ApiError, ApiResult};

const COOKIE_EPOCH: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Almacenamiento del token de sesión
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str, expires_at: Option<DateTime<Utc>>) -> ApiResult<()>;
    fn clear(&self) -> ApiResult<()>;
}

/// Token guardado en `document.cookie`
#[derive(Clone)]
pub struct CookieTokenStore {
    name: String,
}

impl CookieTokenStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn document() -> ApiResult<HtmlDocument> {
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or_else(|| ApiError::Storage("No se pudo acceder a document.cookie".to_string()))
    }

    fn write(&self, cookie: &str) -> ApiResult<()> {
        Self::document()?
            .set_cookie(cookie)
            .map_err(|_| ApiError::Storage("Error escribiendo la cookie".to_string()))
    }
}

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<String> {
        let cookies = Self::document().ok()?.cookie().ok()?;
        read_cookie(&cookies, &self.name)
    }

    fn save(&self, token: &str, expires_at: Option<DateTime<Utc>>) -> ApiResult<()> {
        self.write(&token_cookie(&self.name, token, expires_at))
    }

    fn clear(&self) -> ApiResult<()> {
        self.write(&expired_cookie(&self.name))
    }
}

/// Token en memoria (sin navegador)
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        *store.token.borrow_mut() = Some(token.to_string());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone().filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str, _expires_at: Option<DateTime<Utc>>) -> ApiResult<()> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

/// Buscar `name=value` en un string de cookies (`a=1; hexToken=xyz; b=2`)
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn token_cookie(name: &str, token: &str, expires_at: Option<DateTime<Utc>>) -> String {
    match expires_at {
        Some(exp) => format!(
            "{}={}; expires={}; path=/",
            name,
            token,
            exp.format("%a, %d %b %Y %H:%M:%S GMT")
        ),
        None => format!("{}={}; path=/", name, token),
    }
}

pub fn expired_cookie(name: &str) -> String {
    format!("{}=; expires={}; path=/", name, COOKIE_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_among_others() {
        let cookies = "theme=dark; hexToken=abc.def=; lang=zh";
        assert_eq!(read_cookie(cookies, "hexToken"), Some("abc.def=".to_string()));
        assert_eq!(read_cookie(cookies, "theme"), Some("dark".to_string()));
        assert_eq!(read_cookie(cookies, "missing"), None);
    }

    #[test]
    fn test_read_cookie_empty_value_is_none() {
        assert_eq!(read_cookie("hexToken=; theme=dark", "hexToken"), None);
        assert_eq!(read_cookie("", "hexToken"), None);
        // No confundir prefijos
        assert_eq!(read_cookie("xhexToken=1", "hexToken"), None);
    }

    #[test]
    fn test_token_cookie_format() {
        let exp = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(
            token_cookie("hexToken", "abc", Some(exp)),
            "hexToken=abc; expires=Tue, 14 Nov 2023 22:13:20 GMT; path=/"
        );
        assert_eq!(token_cookie("hexToken", "abc", None), "hexToken=abc; path=/");
        assert_eq!(
            expired_cookie("hexToken"),
            "hexToken=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/"
        );
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);
        store.save("t1", None).unwrap();
        assert_eq!(store.load(), Some("t1".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }
}
