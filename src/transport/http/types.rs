use crate::app::database_service::DatabaseService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub db_service: Arc<DatabaseService>,
}

impl AppState {
    pub fn new(db_service: DatabaseService) -> Self {
        Self {
            db_service: Arc::new(db_service),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Optional sorter pass filter on `/color-sorts/stock/{stock_id}`.
#[derive(Deserialize, Debug, Default)]
pub struct CounterQuery {
    pub counter: Option<i32>,
}
