pub mod error;
pub mod openapi;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod crud;
    pub mod health;
    pub mod scoped;
}

pub use error::{ApiError, ApiResult};
pub use openapi::{api_doc, ApiDoc};
pub use router::create_router;
pub use types::AppState;
