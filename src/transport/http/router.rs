use crate::domain::model::{
    ColorSort, Entity, GraderMachineOutput, GradingCategory, Humidifier, MachineGrading,
    ManualGrading, ManualGradingSample, PeelingMachine, Piece, SizeVariation, Stock, WeightType,
    Worker,
};
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::{crud, health, scoped};
use crate::transport::http::types::AppState;
use axum::http::Uri;
use axum::routing::get;
use axum::Router;

/// `/{resource}` for an entity.
pub fn collection_path<E: Entity>() -> String {
    format!("/{}", E::RESOURCE)
}

/// List/get/create/update/delete routes for one entity.
pub fn entity_routes<E: Entity>() -> Router<AppState> {
    let collection = collection_path::<E>();
    let item = format!("{}/:id", collection);
    Router::new()
        .route(
            &collection,
            get(crud::list_handler::<E>).post(crud::create_handler::<E>),
        )
        .route(
            &item,
            get(crud::get_handler::<E>)
                .put(crud::update_handler::<E>)
                .delete(crud::delete_handler::<E>),
        )
}

async fn fallback_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .merge(entity_routes::<Stock>())
        .merge(entity_routes::<Humidifier>())
        .merge(entity_routes::<PeelingMachine>())
        .merge(entity_routes::<ColorSort>())
        .merge(entity_routes::<MachineGrading>())
        .merge(entity_routes::<ManualGrading>())
        .merge(entity_routes::<ManualGradingSample>())
        .merge(entity_routes::<Worker>())
        .merge(entity_routes::<WeightType>())
        .merge(entity_routes::<SizeVariation>())
        .merge(entity_routes::<Piece>())
        .merge(entity_routes::<GradingCategory>())
        .merge(entity_routes::<GraderMachineOutput>())
        .route(
            "/humidifiers/stock/:stock_id",
            get(scoped::list_by_stock_handler::<Humidifier>),
        )
        .route(
            "/peeling-machines/stock/:stock_id",
            get(scoped::list_by_stock_handler::<PeelingMachine>),
        )
        .route(
            "/color-sorts/stock/:stock_id",
            get(scoped::color_sorts_by_stock_handler),
        )
        .route(
            "/color-sorts/stock/:stock_id/counter/:counter",
            get(scoped::color_sorts_by_pass_handler),
        )
        .route(
            "/color-sorts/stock/:stock_id/counter/:counter/summary",
            get(scoped::color_sort_summary_handler),
        )
        .route(
            "/machine-gradings/stock/:stock_id",
            get(scoped::list_by_stock_handler::<MachineGrading>),
        )
        .route(
            "/machine-gradings/stock/:stock_id/summary",
            get(scoped::machine_grading_summary_handler),
        )
        .route(
            "/manual-gradings/stock/:stock_id",
            get(scoped::list_by_stock_handler::<ManualGrading>),
        )
        .route(
            "/manual-grading-inputs/stock/:stock_id",
            get(scoped::list_by_stock_handler::<ManualGradingSample>),
        )
        .route("/weight-types/usage", get(scoped::weight_type_usage_handler))
        .fallback(fallback_handler)
        .with_state(app_state)
}
