// ============================================================================
// ERRORES - Taxonomía de errores de la API y del almacenamiento
// ============================================================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Credenciales incorrectas o token expirado
    #[error("Auth error: {0}")]
    Auth(String),

    /// La petición no llegó a tener respuesta
    #[error("Network error: {0}")]
    Network(String),

    /// Respuesta no 2xx con mensaje del servidor
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// Error leyendo o escribiendo la cookie del token
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No hay sesión activa")]
    NoSession,
}

impl ApiError {
    /// Mensaje para mostrar al usuario (sin prefijo técnico)
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Auth(msg)
            | ApiError::Network(msg)
            | ApiError::Parse(msg)
            | ApiError::Storage(msg)
            | ApiError::Validation(msg) => msg.clone(),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::NoSession => self.to_string(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_) | ApiError::NoSession)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
