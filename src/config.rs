// ============================================================================
// CONFIG - Configuración cargada en tiempo de compilación (build.rs + .env)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Máximo de imágenes secundarias por producto (política de la UI)
pub const MAX_IMAGES: usize = 5;

const DEFAULT_API_BASE: &str = "https://ec-course-api.hexschool.io/v2";
const DEFAULT_API_PATH: &str = "book-rental";
const DEFAULT_TOKEN_COOKIE: &str = "hexToken";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base: String,
    pub api_path: String,
    pub token_cookie: String,
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            token_cookie: DEFAULT_TOKEN_COOKIE.to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            api_base: option_env!("API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            api_path: option_env!("API_PATH")
                .unwrap_or(DEFAULT_API_PATH)
                .trim_matches('/')
                .to_string(),
            token_cookie: option_env!("TOKEN_COOKIE")
                .unwrap_or(DEFAULT_TOKEN_COOKIE)
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info").to_string(),
        }
    }

    /// Nivel de log para wasm_logger (solo errores si el logging está deshabilitado)
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            return log::Level::Error;
        }
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
