pub mod auth;
pub mod pagination;
pub mod product;

pub use auth::{Credentials, Session, SignInResponse};
pub use pagination::{Pagination, ProductsResponse};
pub use product::{Product, ProductEnvelope, ProductPayload};
