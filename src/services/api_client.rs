// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio ni estado: la sesión se pasa en cada llamada
// ============================================================================

use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Credentials, ProductEnvelope, ProductPayload, ProductsResponse, Session, SignInResponse,
};
use crate::services::http::{ApiRequest, ApiResponse, HttpMethod, Transport};

const AUTH_HEADER: &str = "Authorization";

/// Cliente API del panel de productos
#[derive(Clone)]
pub struct ApiClient<T: Transport> {
    transport: T,
    base_url: String,
    api_path: String,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &AppConfig) -> Self {
        Self {
            transport,
            base_url: config.api_base.clone(),
            api_path: config.api_path.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/api/{}/admin{}", self.base_url, self.api_path, path)
    }

    /// `/admin/product/{id}` con el id codificado como segmento de path
    fn product_url(&self, id: &str) -> String {
        self.admin_url(&format!("/product/{}", urlencoding::encode(id)))
    }

    fn authorized(request: ApiRequest, session: &Session) -> ApiRequest {
        request.header(AUTH_HEADER, &session.token)
    }

    /// Login: `POST /admin/signin`
    pub async fn sign_in(&self, credentials: &Credentials) -> ApiResult<SignInResponse> {
        let request = ApiRequest::new(HttpMethod::Post, self.url("/admin/signin"))
            .json(credentials)?;

        log::info!("🔐 Iniciando sesión para: {}", credentials.username);

        // Cualquier fallo del login (credenciales, red, formato) es un AuthError
        let response: SignInResponse = self
            .send_json(request)
            .await
            .map_err(|e| ApiError::Auth(e.user_message()))?;

        if !response.success {
            let message = if response.message.is_empty() {
                "登入失敗".to_string()
            } else {
                response.message
            };
            return Err(ApiError::Auth(message));
        }

        Ok(response)
    }

    /// Verificar token: `POST /api/user/check`
    pub async fn check_auth(&self, session: &Session) -> ApiResult<()> {
        let request = Self::authorized(
            ApiRequest::new(HttpMethod::Post, self.url("/api/user/check")),
            session,
        );
        let body: Value = self.send_json(request).await?;
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(ApiError::Auth(message_from_body(&body).unwrap_or_default()));
        }
        Ok(())
    }

    /// Logout: `POST /logout`
    pub async fn logout(&self, session: &Session) -> ApiResult<()> {
        let request = Self::authorized(
            ApiRequest::new(HttpMethod::Post, self.url("/logout")),
            session,
        );
        self.send(request).await.map(|_| ())
    }

    /// Listar productos: `GET /api/{path}/admin/products?page=N`
    pub async fn get_products(&self, session: &Session, page: u32) -> ApiResult<ProductsResponse> {
        let url = format!("{}?page={}", self.admin_url("/products"), page);
        let request = Self::authorized(ApiRequest::new(HttpMethod::Get, url), session);
        self.send_json(request).await
    }

    /// Crear producto: `POST /api/{path}/admin/product`
    pub async fn create_product(&self, session: &Session, product: &ProductPayload) -> ApiResult<()> {
        let request = ApiRequest::new(HttpMethod::Post, self.admin_url("/product"))
            .json(&ProductEnvelope { data: product })?;
        self.send(Self::authorized(request, session)).await.map(|_| ())
    }

    /// Actualizar producto: `PUT /api/{path}/admin/product/{id}`
    pub async fn update_product(
        &self,
        session: &Session,
        id: &str,
        product: &ProductPayload,
    ) -> ApiResult<()> {
        let url = self.product_url(id);
        let request = ApiRequest::new(HttpMethod::Put, url)
            .json(&ProductEnvelope { data: product })?;
        self.send(Self::authorized(request, session)).await.map(|_| ())
    }

    /// Eliminar producto: `DELETE /api/{path}/admin/product/{id}`
    pub async fn delete_product(&self, session: &Session, id: &str) -> ApiResult<()> {
        let url = self.product_url(id);
        let request = Self::authorized(ApiRequest::new(HttpMethod::Delete, url), session);
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let response = self.transport.send(request).await?;
        if response.ok() {
            Ok(response)
        } else {
            Err(error_from_response(&response))
        }
    }

    async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Parse(format!("Parse error: {}", e)))
    }
}

/// El servidor manda `message` como string o como array de strings
fn message_from_body(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

fn error_from_response(response: &ApiResponse) -> ApiError {
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .as_ref()
        .and_then(message_from_body)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error {}", response.status));

    match response.status {
        401 | 403 => ApiError::Auth(message),
        status => ApiError::Http { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::mock::MockTransport;
    use serde_json::json;
    use tokio_test::block_on;

    fn client(transport: &MockTransport) -> ApiClient<MockTransport> {
        let config = AppConfig {
            api_base: "https://api.test/v2".to_string(),
            api_path: "book-rental".to_string(),
            ..AppConfig::default()
        };
        ApiClient::new(transport.clone(), &config)
    }

    fn session() -> Session {
        Session::new("tok-123", None)
    }

    #[test]
    fn test_sign_in_posts_credentials() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"success": true, "token": "abc", "expired": 1700000000000i64}));

        let creds = Credentials {
            username: "admin@test.com".to_string(),
            password: "pw".to_string(),
        };
        let response = block_on(client(&transport).sign_in(&creds)).unwrap();
        assert_eq!(response.token, "abc");

        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "https://api.test/v2/admin/signin");
        assert_eq!(sent.header_value(AUTH_HEADER), None);
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"username": "admin@test.com", "password": "pw"}));
    }

    #[test]
    fn test_sign_in_failures_are_auth_errors() {
        let transport = MockTransport::new();
        transport.respond(400, json!({"success": false, "message": "登入失敗"}));
        transport.fail("offline");

        let api = client(&transport);
        let creds = Credentials::default();
        assert_eq!(block_on(api.sign_in(&creds)), Err(ApiError::Auth("登入失敗".to_string())));
        assert_eq!(block_on(api.sign_in(&creds)), Err(ApiError::Auth("offline".to_string())));
    }

    #[test]
    fn test_get_products_sends_token_and_page() {
        let transport = MockTransport::new();
        transport.respond(200, json!({
            "success": true,
            "products": [{"id": "p1", "title": "A", "price": 10}],
            "pagination": {"total_pages": 2, "current_page": 2, "has_pre": true, "has_next": false}
        }));

        let response = block_on(client(&transport).get_products(&session(), 2)).unwrap();
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.pagination.current_page, 2);

        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url, "https://api.test/v2/api/book-rental/admin/products?page=2");
        assert_eq!(sent.header_value(AUTH_HEADER), Some("tok-123"));
    }

    #[test]
    fn test_update_and_delete_urls() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"success": true}));
        transport.respond(200, json!({"success": true}));

        let api = client(&transport);
        let payload = ProductPayload {
            id: "p9".to_string(),
            image_url: String::new(),
            title: "T".to_string(),
            category: "C".to_string(),
            tags: vec![],
            unit: "本".to_string(),
            origin_price: 1.0,
            price: 1.0,
            description: String::new(),
            content: String::new(),
            is_enabled: 0,
            images_url: vec![],
        };
        block_on(api.update_product(&session(), "p9", &payload)).unwrap();
        block_on(api.delete_product(&session(), "p9")).unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].url, "https://api.test/v2/api/book-rental/admin/product/p9");
        let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["data"]["title"], "T");
        assert_eq!(sent[1].method, HttpMethod::Delete);
        assert_eq!(sent[1].url, "https://api.test/v2/api/book-rental/admin/product/p9");
        assert_eq!(sent[1].body, None);
    }

    #[test]
    fn test_product_id_is_path_encoded() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"success": true}));

        block_on(client(&transport).delete_product(&session(), "a/b c?")).unwrap();
        assert_eq!(
            transport.last().unwrap().url,
            "https://api.test/v2/api/book-rental/admin/product/a%2Fb%20c%3F"
        );
    }

    #[test]
    fn test_error_mapping() {
        let unauthorized = ApiResponse::new(401, json!({"success": false, "message": "驗證錯誤"}).to_string());
        assert_eq!(error_from_response(&unauthorized), ApiError::Auth("驗證錯誤".to_string()));

        let invalid = ApiResponse::new(400, json!({"success": false, "message": ["標題 欄位為必填", "分類 欄位為必填"]}).to_string());
        assert_eq!(
            error_from_response(&invalid),
            ApiError::Http { status: 400, message: "標題 欄位為必填, 分類 欄位為必填".to_string() }
        );

        let html = ApiResponse::new(502, "<html>bad gateway</html>");
        assert_eq!(
            error_from_response(&html),
            ApiError::Http { status: 502, message: "HTTP error 502".to_string() }
        );
    }

    #[test]
    fn test_check_auth_rejects_success_false() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"success": false, "message": "請重新登入"}));
        let result = block_on(client(&transport).check_auth(&session()));
        assert_eq!(result, Err(ApiError::Auth("請重新登入".to_string())));
        assert_eq!(transport.last().unwrap().url, "https://api.test/v2/api/user/check");
    }
}
