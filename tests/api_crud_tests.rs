//! End-to-end CRUD flows against a live PostgreSQL.
//!
//! Needs `DATABASE_URL`; each test returns early without it.

use cashew_tracker::transport::http::{create_router, AppState};
use cashew_tracker::{Config, DatabaseService};
use serde_json::{json, Value};
use uuid::Uuid;

const NO_SUCH_STOCK: i64 = 9_000_000_000_000;

/// Starts the API in-process on an ephemeral port and returns its base URL.
async fn spawn_api() -> Option<String> {
    dotenv::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        println!("DATABASE_URL not set, skipping");
        return None;
    }
    let config = Config::from_env().expect("config");
    let db_service = DatabaseService::connect(&config).await.expect("database");
    let router = create_router(AppState::new(db_service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Some(format!("http://127.0.0.1:{}", port))
}

async fn create_stock(client: &reqwest::Client, base_url: &str, seller: &str) -> Value {
    let resp = client
        .post(format!("{}/stocks", base_url))
        .json(&json!({
            "seller_name": seller,
            "origin_country": "Ghana",
            "weight": 1200.5,
            "date": "2024-03-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    resp.json().await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stock_lifecycle() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();

    let created = create_stock(&client, &base_url, "Kofi Mensah").await;
    let stock_id = created["stock_id"].as_i64().expect("generated key");
    assert_eq!(created["seller_name"], "Kofi Mensah");
    assert_eq!(created["date"], "2024-03-01");

    let fetched: Value = client
        .get(format!("{}/stocks/{}", base_url, stock_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let listed: Vec<Value> = client
        .get(format!("{}/stocks", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.iter().any(|s| s["stock_id"] == stock_id));

    let updated = client
        .put(format!("{}/stocks/{}", base_url, stock_id))
        .json(&json!({
            "seller_name": "Kofi Mensah",
            "origin_country": "Ivory Coast",
            "weight": 1100.0,
            "date": "2024-03-02"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["stock_id"], stock_id);
    assert_eq!(updated["origin_country"], "Ivory Coast");
    assert_eq!(updated["weight"], 1100.0);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let deleted = client
        .delete(format!("{}/stocks/{}", base_url, stock_id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);
    let deleted: Value = deleted.json().await.unwrap();
    assert_eq!(deleted["message"], "Stock deleted successfully");

    let gone = client
        .get(format!("{}/stocks/{}", base_url, stock_id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), 404);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_rows_are_not_found_and_untouched() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();

    let before: Vec<Value> = client
        .get(format!("{}/stocks", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let before = before
        .iter()
        .filter(|s| s["stock_id"] == NO_SUCH_STOCK)
        .count();
    assert_eq!(before, 0);

    let update = client
        .put(format!("{}/stocks/{}", base_url, NO_SUCH_STOCK))
        .json(&json!({
            "seller_name": "Nobody",
            "origin_country": "Nowhere",
            "weight": 1.0,
            "date": "2024-01-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), 404);
    let body: Value = update.json().await.unwrap();
    assert_eq!(body["error"], format!("Stock {} not found", NO_SUCH_STOCK));

    let delete = client
        .delete(format!("{}/stocks/{}", base_url, NO_SUCH_STOCK))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), 404);

    let after = client
        .get(format!("{}/stocks/{}", base_url, NO_SUCH_STOCK))
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), 404);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_stock_scopes_and_zero_summaries() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();

    for resource in ["humidifiers", "peeling-machines", "color-sorts", "machine-gradings"] {
        let records: Vec<Value> = client
            .get(format!("{}/{}/stock/{}", base_url, resource, NO_SUCH_STOCK))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(records.is_empty(), "{resource}");
    }

    let pass: Value = client
        .get(format!(
            "{}/color-sorts/stock/{}/counter/2/summary",
            base_url, NO_SUCH_STOCK
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pass["stock_id"], NO_SUCH_STOCK);
    assert_eq!(pass["sort_counter"], 2);
    assert_eq!(pass["total_accepted_weight"], 0.0);
    assert_eq!(pass["record_count"], 0);

    let graded: Value = client
        .get(format!(
            "{}/machine-gradings/stock/{}/summary",
            base_url, NO_SUCH_STOCK
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(graded["total_weight"], 0.0);
    assert_eq!(graded["record_count"], 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn worker_uses_client_supplied_key() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();
    let id = format!("W-{}", Uuid::new_v4().simple());

    let created = client
        .post(format!("{}/workforce", base_url))
        .json(&json!({
            "id": id,
            "name": "Lakshmi",
            "aadhaar": "123412341234",
            "address": "Kollam"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["id"], id.as_str());

    let duplicate = client
        .post(format!("{}/workforce", base_url))
        .json(&created)
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), 500);

    let deleted = client
        .delete(format!("{}/workforce/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn color_sort_pass_is_summed() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();

    let stock = create_stock(&client, &base_url, "Pass Test").await;
    let stock_id = stock["stock_id"].as_i64().unwrap();
    let weight_type: Value = client
        .post(format!("{}/weight-types", base_url))
        .json(&json!({ "type": format!("accepted-{}", Uuid::new_v4().simple()) }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let weight_type_id = weight_type["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for (counter, weight) in [(1, 40.0), (1, 2.5), (2, 9.0)] {
        let created: Value = client
            .post(format!("{}/color-sorts", base_url))
            .json(&json!({
                "stock_id": stock_id,
                "weight_type_id": weight_type_id,
                "accepted_weight": weight,
                "sort_counter": counter
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(Uuid::parse_str(created["id"].as_str().unwrap()).is_ok());
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let summary: Value = client
        .get(format!("{}/color-sorts/stock/{}/counter/1/summary", base_url, stock_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["total_accepted_weight"], 42.5);
    assert_eq!(summary["record_count"], 2);

    let second: Vec<Value> = client
        .get(format!("{}/color-sorts/stock/{}?counter=2", base_url, stock_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second.len(), 1);

    for id in ids {
        let resp = client
            .delete(format!("{}/color-sorts/{}", base_url, id))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
    client
        .delete(format!("{}/weight-types/{}", base_url, weight_type_id))
        .send()
        .await
        .unwrap();
    client
        .delete(format!("{}/stocks/{}", base_url, stock_id))
        .send()
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dangling_reference_is_a_server_error() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/humidifiers", base_url))
        .json(&json!({ "stock_id": NO_SUCH_STOCK, "weight": 10.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

/// POSTs `create`, checks GET returns the same record, then PUTs `update`.
/// Returns the created and the updated record.
async fn create_get_update(
    client: &reqwest::Client,
    base_url: &str,
    resource: &str,
    key: &str,
    create: Value,
    update: Value,
) -> (Value, Value) {
    let resp = client
        .post(format!("{}/{}", base_url, resource))
        .json(&create)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "create {resource}");
    let created: Value = resp.json().await.unwrap();
    for (field, value) in create.as_object().unwrap() {
        assert_eq!(&created[field], value, "{resource}.{field}");
    }
    let id = match &created[key] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let fetched: Value = client
        .get(format!("{}/{}/{}", base_url, resource, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created, "get {resource}");

    let resp = client
        .put(format!("{}/{}/{}", base_url, resource, id))
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "update {resource}");
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated[key], created[key], "{resource} key");
    for (field, value) in update.as_object().unwrap() {
        assert_eq!(&updated[field], value, "{resource}.{field}");
    }
    (created, updated)
}

async fn delete_ok(client: &reqwest::Client, base_url: &str, resource: &str, id: &Value) {
    let id = match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let resp = client
        .delete(format!("{}/{}/{}", base_url, resource, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "delete {resource}/{id}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_entity_round_trips_along_the_line() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();
    let tag = Uuid::new_v4().simple().to_string();

    // Reference data.
    let (weight_type, _) = create_get_update(
        &client,
        &base_url,
        "weight-types",
        "id",
        json!({ "type": format!("net-{tag}") }),
        json!({ "type": format!("gross-{tag}") }),
    )
    .await;
    let (size, _) = create_get_update(
        &client,
        &base_url,
        "size-variations",
        "size_id",
        json!({ "size_value": "W240" }),
        json!({ "size_value": "W320" }),
    )
    .await;
    let (piece, _) = create_get_update(
        &client,
        &base_url,
        "pieces",
        "piece_id",
        json!({ "piece_code": 1, "description": "whole" }),
        json!({ "piece_code": 2, "description": "split" }),
    )
    .await;
    let (category, _) = create_get_update(
        &client,
        &base_url,
        "grading-categories",
        "category_id",
        json!({ "category_code": format!("LWP-{tag}"), "description": null }),
        json!({ "category_code": format!("SWP-{tag}"), "description": "small pieces" }),
    )
    .await;
    let output_id = format!("W180-{tag}");
    let (output, _) = create_get_update(
        &client,
        &base_url,
        "grader-machine-outputs",
        "id",
        json!({ "id": output_id, "type": "whole" }),
        json!({ "id": output_id, "type": "scorched" }),
    )
    .await;
    let worker_id = format!("EMP-{tag}");
    let (worker, _) = create_get_update(
        &client,
        &base_url,
        "workforce",
        "id",
        json!({ "id": worker_id, "name": "Lakshmi", "aadhaar": "123412341234", "address": "Kollam" }),
        json!({ "id": worker_id, "name": "Lakshmi", "aadhaar": "123412341234", "address": "Kundara" }),
    )
    .await;

    // Production chain.
    let stock = create_stock(&client, &base_url, "Chain Test").await;
    let stock_id = stock["stock_id"].as_i64().unwrap();
    let (humidifier, _) = create_get_update(
        &client,
        &base_url,
        "humidifiers",
        "id",
        json!({ "stock_id": stock_id, "weight": 950.0 }),
        json!({ "stock_id": stock_id, "weight": 955.5 }),
    )
    .await;
    let peeling = json!({
        "humidifier_id": humidifier["id"],
        "stock_id": stock_id,
        "wholes": 400.0, "k": 50.0, "lwp": 80.0, "swp": 40.0,
        "bb": 10.0, "bbnp": 5.0, "husk": 300.0
    });
    let mut peeling_update = peeling.clone();
    peeling_update["husk"] = json!(310.0);
    let (peel, _) =
        create_get_update(&client, &base_url, "peeling-machines", "id", peeling, peeling_update)
            .await;
    let (color_sort, _) = create_get_update(
        &client,
        &base_url,
        "color-sorts",
        "id",
        json!({
            "peel_id": peel["id"],
            "stock_id": stock_id,
            "weight_type_id": weight_type["id"],
            "accepted_weight": 380.0,
            "sort_counter": 1
        }),
        json!({
            "peel_id": peel["id"],
            "stock_id": stock_id,
            "weight_type_id": weight_type["id"],
            "accepted_weight": 378.5,
            "sort_counter": 1
        }),
    )
    .await;
    let (machine_grading, _) = create_get_update(
        &client,
        &base_url,
        "machine-gradings",
        "id",
        json!({
            "color_sort_id": color_sort["id"],
            "stock_id": stock_id,
            "size_variations_id": size["size_id"],
            "pieces_id": null,
            "weight": 120.0
        }),
        json!({
            "color_sort_id": color_sort["id"],
            "stock_id": stock_id,
            "size_variations_id": size["size_id"],
            "pieces_id": piece["piece_id"],
            "weight": 118.0
        }),
    )
    .await;
    let (manual_grading, _) = create_get_update(
        &client,
        &base_url,
        "manual-gradings",
        "id",
        json!({
            "grader_machine_outputs_id": output_id,
            "stock_id": stock_id,
            "category_id": category["category_id"],
            "size_id": size["size_id"],
            "piece_id": null,
            "weight": 12.5,
            "worker_id": worker_id
        }),
        json!({
            "grader_machine_outputs_id": output_id,
            "stock_id": stock_id,
            "category_id": category["category_id"],
            "size_id": size["size_id"],
            "piece_id": piece["piece_id"],
            "weight": 13.0,
            "worker_id": worker_id
        }),
    )
    .await;
    let (sample, _) = create_get_update(
        &client,
        &base_url,
        "manual-grading-inputs",
        "id",
        json!({ "stock_id": stock_id, "worker_id": worker_id, "size_variations_id": null, "weight": 25.0 }),
        json!({ "stock_id": stock_id, "worker_id": worker_id, "size_variations_id": size["size_id"], "weight": 24.0 }),
    )
    .await;

    let graded: Value = client
        .get(format!("{}/machine-gradings/stock/{}/summary", base_url, stock_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(graded["total_weight"], 118.0);
    assert_eq!(graded["record_count"], 1);

    delete_ok(&client, &base_url, "manual-grading-inputs", &sample["id"]).await;
    delete_ok(&client, &base_url, "manual-gradings", &manual_grading["id"]).await;
    delete_ok(&client, &base_url, "machine-gradings", &machine_grading["id"]).await;
    delete_ok(&client, &base_url, "color-sorts", &color_sort["id"]).await;
    delete_ok(&client, &base_url, "peeling-machines", &peel["id"]).await;
    delete_ok(&client, &base_url, "humidifiers", &humidifier["id"]).await;
    delete_ok(&client, &base_url, "stocks", &stock["stock_id"]).await;
    delete_ok(&client, &base_url, "workforce", &worker["id"]).await;
    delete_ok(&client, &base_url, "grader-machine-outputs", &output["id"]).await;
    delete_ok(&client, &base_url, "grading-categories", &category["category_id"]).await;
    delete_ok(&client, &base_url, "pieces", &piece["piece_id"]).await;
    delete_ok(&client, &base_url, "size-variations", &size["size_id"]).await;
    delete_ok(&client, &base_url, "weight-types", &weight_type["id"]).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn weight_type_usage_counts_color_sorts_most_used_first() {
    let Some(base_url) = spawn_api().await else { return };
    let client = reqwest::Client::new();
    let tag = Uuid::new_v4().simple().to_string();

    let mut weight_types = Vec::new();
    for kind in ["unused", "used"] {
        let created: Value = client
            .post(format!("{}/weight-types", base_url))
            .json(&json!({ "type": format!("{kind}-{tag}") }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        weight_types.push(created);
    }
    let (unused, used) = (&weight_types[0], &weight_types[1]);

    let stock = create_stock(&client, &base_url, "Usage Test").await;
    let color_sort: Value = client
        .post(format!("{}/color-sorts", base_url))
        .json(&json!({
            "stock_id": stock["stock_id"],
            "weight_type_id": used["id"],
            "accepted_weight": 5.0,
            "sort_counter": 1
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let usage: Vec<Value> = client
        .get(format!("{}/weight-types/usage", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ours: Vec<&Value> = usage
        .iter()
        .filter(|u| u["id"] == used["id"] || u["id"] == unused["id"])
        .collect();
    assert_eq!(
        ours,
        vec![
            &json!({ "id": used["id"], "type": used["type"], "usage_count": 1 }),
            &json!({ "id": unused["id"], "type": unused["type"], "usage_count": 0 }),
        ]
    );

    delete_ok(&client, &base_url, "color-sorts", &color_sort["id"]).await;
    delete_ok(&client, &base_url, "stocks", &stock["stock_id"]).await;
    delete_ok(&client, &base_url, "weight-types", &used["id"]).await;
    delete_ok(&client, &base_url, "weight-types", &unused["id"]).await;
}
