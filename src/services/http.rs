// ============================================================================
// HTTP TRANSPORT - Abstracción sobre gloo_net para poder testear el ApiClient
// ============================================================================

use gloo_net::http::{Request, RequestBuilder};
use crate::error::{ApiError, ApiResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Petición ya resuelta (URL absoluta, headers y cuerpo JSON serializado)
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn json<T: serde::Serialize>(mut self, body: &T) -> ApiResult<Self> {
        let json = serde_json::to_string(body)
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?;
        self.body = Some(json);
        Ok(self.header("Content-Type", "application/json"))
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Respuesta cruda: status + cuerpo en texto
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envío de peticiones; la UI corre en un único hilo, así que no se exige `Send`
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// Transporte real del navegador (fetch vía gloo_net)
#[derive(Clone, Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let mut builder: RequestBuilder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| network_error("Request build error", e))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| network_error("Request error", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| network_error("Response body error", e))?;
        Ok(ApiResponse { status, body })
    }
}

/// Fallos de fetch (construcción, envío o lectura del cuerpo)
fn network_error(context: &str, error: impl std::fmt::Display) -> ApiError {
    ApiError::Network(format!("{}: {}", context, error))
}
