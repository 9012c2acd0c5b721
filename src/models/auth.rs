use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credenciales del formulario de login
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// La contraseña nunca debe llegar a los logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Respuesta de `POST /admin/signin`
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignInResponse {
    pub success: bool,
    pub message: String,
    pub uid: String,
    pub token: String,
    /// Expiración en milisegundos desde epoch
    pub expired: i64,
}

/// Sesión autenticada: se pasa explícitamente a cada llamada de la API
#[derive(Clone, PartialEq, Debug)]
pub struct Session {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Construir desde la respuesta de signin; `None` si no hay token
    pub fn from_sign_in(response: &SignInResponse) -> Option<Self> {
        let token = response.token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self::new(token, DateTime::from_timestamp_millis(response.expired)))
    }

    /// Un token sin fecha conocida (restaurado de cookie) se considera vigente
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }
}
