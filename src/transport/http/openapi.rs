//! OpenAPI document for the service.
//!
//! CRUD operations are assembled from the same `Entity` metadata the router
//! mounts; only `/health` is documented with `#[utoipa::path]`.

use crate::domain::model::{
    ColorSort, ColorSortInput, Entity, GraderMachineOutput, GradingCategory, GradingCategoryInput,
    Humidifier, HumidifierInput, MachineGrading, MachineGradingInput, ManualGrading,
    ManualGradingInput, ManualGradingSample, ManualGradingSampleInput, PeelingMachine,
    PeelingMachineInput, Piece, PieceInput, SizeVariation, SizeVariationInput, Stock, StockInput,
    WeightType, WeightTypeInput, Worker,
};
use crate::domain::summary::{ColorSortSummary, WeightSummary, WeightTypeUsage};
use crate::transport::http::handlers::health;
use crate::transport::http::types::{ErrorResponse, HealthResponse, MessageResponse};
use utoipa::openapi::path::{
    Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItemBuilder,
    PathItemType,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::{Array, Content, Ref, RefOr, Required, Response, ResponseBuilder, Schema};
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(
    info(title = "Cashew production tracker"),
    paths(health::healthcheck_handler),
    components(schemas(
        Stock,
        StockInput,
        Humidifier,
        HumidifierInput,
        PeelingMachine,
        PeelingMachineInput,
        ColorSort,
        ColorSortInput,
        MachineGrading,
        MachineGradingInput,
        ManualGrading,
        ManualGradingInput,
        ManualGradingSample,
        ManualGradingSampleInput,
        Worker,
        WeightType,
        WeightTypeInput,
        SizeVariation,
        SizeVariationInput,
        Piece,
        PieceInput,
        GradingCategory,
        GradingCategoryInput,
        GraderMachineOutput,
        ColorSortSummary,
        WeightSummary,
        WeightTypeUsage,
        ErrorResponse,
        MessageResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

fn schema_ref<T: for<'s> ToSchema<'s>>() -> RefOr<Schema> {
    Ref::from_schema_name(T::schema().0).into()
}

fn array_of<T: for<'s> ToSchema<'s>>() -> RefOr<Schema> {
    RefOr::T(Schema::Array(Array::new(schema_ref::<T>())))
}

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", Content::new(schema))
        .build()
}

fn error_response(description: &str) -> Response {
    json_response(description, schema_ref::<ErrorResponse>())
}

fn path_param(name: &str, description: &str) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(description))
        .build()
}

fn operation(tag: &str, operation_id: String, summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .tag(tag)
        .operation_id(Some(operation_id))
        .summary(Some(summary))
}

fn entity_operations<E: Entity>() -> Vec<(String, PathItemType, Operation)> {
    let collection = format!("/{}", E::RESOURCE);
    let item = format!("{}/{{id}}", collection);
    let tag = E::RESOURCE;
    let key = || path_param("id", E::PRIMARY_KEY);
    let body = || {
        Some(
            RequestBodyBuilder::new()
                .content("application/json", Content::new(schema_ref::<E::Input>()))
                .required(Some(Required::True))
                .build(),
        )
    };
    let not_found = || error_response(&format!("{} not found", E::NAME));

    vec![
        (
            collection.clone(),
            PathItemType::Get,
            operation(tag, format!("list_{}", E::TABLE), format!("List {} records", E::NAME))
                .response("200", json_response("All records", array_of::<E>()))
                .response("500", error_response("Storage failure"))
                .build(),
        ),
        (
            collection,
            PathItemType::Post,
            operation(tag, format!("create_{}", E::TABLE), format!("Create a {} record", E::NAME))
                .request_body(body())
                .response("201", json_response("Created record", schema_ref::<E>()))
                .response("400", error_response("Malformed body"))
                .response("500", error_response("Storage or constraint failure"))
                .build(),
        ),
        (
            item.clone(),
            PathItemType::Get,
            operation(tag, format!("get_{}", E::TABLE), format!("Get a {} record", E::NAME))
                .parameter(key())
                .response("200", json_response("Record", schema_ref::<E>()))
                .response("400", error_response("Malformed id"))
                .response("404", not_found())
                .build(),
        ),
        (
            item.clone(),
            PathItemType::Put,
            operation(tag, format!("update_{}", E::TABLE), format!("Replace a {} record", E::NAME))
                .parameter(key())
                .request_body(body())
                .response("200", json_response("Updated record", schema_ref::<E>()))
                .response("400", error_response("Malformed id or body"))
                .response("404", not_found())
                .response("500", error_response("Storage or constraint failure"))
                .build(),
        ),
        (
            item,
            PathItemType::Delete,
            operation(tag, format!("delete_{}", E::TABLE), format!("Delete a {} record", E::NAME))
                .parameter(key())
                .response("200", json_response("Deleted", schema_ref::<MessageResponse>()))
                .response("400", error_response("Malformed id"))
                .response("404", not_found())
                .build(),
        ),
    ]
}

fn read_operation(
    path: &str,
    tag: &str,
    operation_id: &str,
    summary: &str,
    params: &[(&str, &str)],
    ok: RefOr<Schema>,
) -> (String, PathItemType, Operation) {
    let mut op = operation(tag, operation_id.to_string(), summary.to_string());
    for (name, description) in params {
        op = op.parameter(path_param(name, description));
    }
    let op = op
        .response("200", json_response(summary, ok))
        .response("400", error_response("Malformed path parameter"))
        .response("500", error_response("Storage failure"))
        .build();
    (path.to_string(), PathItemType::Get, op)
}

fn scoped_operations() -> Vec<(String, PathItemType, Operation)> {
    let stock = [("stock_id", "Stock lot id")];
    let pass = [("stock_id", "Stock lot id"), ("counter", "Sorter pass number")];
    vec![
        read_operation(
            "/humidifiers/stock/{stock_id}",
            Humidifier::RESOURCE,
            "list_humidifier_by_stock",
            "Humidifier readings of a stock lot",
            &stock,
            array_of::<Humidifier>(),
        ),
        read_operation(
            "/peeling-machines/stock/{stock_id}",
            PeelingMachine::RESOURCE,
            "list_peeling_machine_by_stock",
            "Peeling output of a stock lot",
            &stock,
            array_of::<PeelingMachine>(),
        ),
        read_operation(
            "/color-sorts/stock/{stock_id}",
            ColorSort::RESOURCE,
            "list_color_sort_by_stock",
            "Color sort records of a stock lot (optional ?counter= filter)",
            &stock,
            array_of::<ColorSort>(),
        ),
        read_operation(
            "/color-sorts/stock/{stock_id}/counter/{counter}",
            ColorSort::RESOURCE,
            "list_color_sort_by_pass",
            "Color sort records of one sorter pass",
            &pass,
            array_of::<ColorSort>(),
        ),
        read_operation(
            "/color-sorts/stock/{stock_id}/counter/{counter}/summary",
            ColorSort::RESOURCE,
            "summarize_color_sort_pass",
            "Accepted weight of one sorter pass",
            &pass,
            schema_ref::<ColorSortSummary>(),
        ),
        read_operation(
            "/machine-gradings/stock/{stock_id}",
            MachineGrading::RESOURCE,
            "list_machine_grading_by_stock",
            "Machine grading records of a stock lot",
            &stock,
            array_of::<MachineGrading>(),
        ),
        read_operation(
            "/machine-gradings/stock/{stock_id}/summary",
            MachineGrading::RESOURCE,
            "summarize_machine_grading",
            "Machine graded weight of a stock lot",
            &stock,
            schema_ref::<WeightSummary>(),
        ),
        read_operation(
            "/manual-gradings/stock/{stock_id}",
            ManualGrading::RESOURCE,
            "list_manual_grading_by_stock",
            "Manual grading records of a stock lot",
            &stock,
            array_of::<ManualGrading>(),
        ),
        read_operation(
            "/manual-grading-inputs/stock/{stock_id}",
            ManualGradingSample::RESOURCE,
            "list_manual_grading_inputs_by_stock",
            "Manual grading inputs of a stock lot",
            &stock,
            array_of::<ManualGradingSample>(),
        ),
        read_operation(
            "/weight-types/usage",
            WeightType::RESOURCE,
            "weight_type_usage",
            "Weight types with their color sort usage count",
            &[],
            array_of::<WeightTypeUsage>(),
        ),
    ]
}

/// The full document served at `/api-docs/openapi.json`.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    let mut operations = Vec::new();
    operations.extend(entity_operations::<Stock>());
    operations.extend(entity_operations::<Humidifier>());
    operations.extend(entity_operations::<PeelingMachine>());
    operations.extend(entity_operations::<ColorSort>());
    operations.extend(entity_operations::<MachineGrading>());
    operations.extend(entity_operations::<ManualGrading>());
    operations.extend(entity_operations::<ManualGradingSample>());
    operations.extend(entity_operations::<Worker>());
    operations.extend(entity_operations::<WeightType>());
    operations.extend(entity_operations::<SizeVariation>());
    operations.extend(entity_operations::<Piece>());
    operations.extend(entity_operations::<GradingCategory>());
    operations.extend(entity_operations::<GraderMachineOutput>());
    operations.extend(scoped_operations());

    for (path, method, op) in operations {
        let item = match doc.paths.paths.remove(&path) {
            Some(mut existing) => {
                existing.operations.insert(method, op);
                existing
            }
            None => PathItemBuilder::new().operation(method, op).build(),
        };
        doc.paths.paths.insert(path, item);
    }
    doc
}
