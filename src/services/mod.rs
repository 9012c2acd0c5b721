pub mod api_client;
pub mod http;

pub use api_client::ApiClient;
pub use http::{ApiRequest, ApiResponse, GlooTransport, HttpMethod, Transport};
