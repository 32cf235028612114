//! Integration tests for the admin CRUD surface.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (sr-cli migrate)
//! - The admin server running (cargo run -p stockroom-admin)
//! - `ADMIN_TEST_SESSION` set to a signed-in session cookie value
//!
//! Run with: cargo test -p stockroom-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use stockroom_integration_tests::{admin_base_url, client};

/// A unique throwaway email per test run.
fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4())
}

// ============================================================================
// Admins
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and ADMIN_TEST_SESSION"]
async fn test_admin_create_duplicate_and_delete() {
    let client = client();
    let base_url = admin_base_url();
    let email = unique_email();

    // Create
    let resp = client
        .post(format!("{base_url}/api/admins"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("Failed to create admin");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("Failed to parse admin");
    let id = created["id"].as_i64().expect("admin id");
    assert_eq!(created["email"], json!(email));

    // Duplicate create is a validation error and leaves the list unchanged
    let before: Vec<Value> = client
        .get(format!("{base_url}/api/admins"))
        .send()
        .await
        .expect("Failed to list admins")
        .json()
        .await
        .expect("Failed to parse admin list");

    let resp = client
        .post(format!("{base_url}/api/admins"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("Failed to re-create admin");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert!(body["message"].as_str().expect("message").contains("already exists"));

    let after: Vec<Value> = client
        .get(format!("{base_url}/api/admins"))
        .send()
        .await
        .expect("Failed to list admins")
        .json()
        .await
        .expect("Failed to parse admin list");
    assert_eq!(before.len(), after.len());

    // Delete (at least the bootstrap admin remains, so this succeeds)
    let resp = client
        .delete(format!("{base_url}/api/admins/{id}"))
        .send()
        .await
        .expect("Failed to delete admin");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let final_list: Vec<Value> = client
        .get(format!("{base_url}/api/admins"))
        .send()
        .await
        .expect("Failed to list admins")
        .json()
        .await
        .expect("Failed to parse admin list");
    assert_eq!(final_list.len(), after.len() - 1);
}

// ============================================================================
// Categories & Products
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and ADMIN_TEST_SESSION"]
async fn test_product_roundtrip_through_category() {
    let client = client();
    let base_url = admin_base_url();

    // Category with one property
    let resp = client
        .post(format!("{base_url}/api/categories"))
        .json(&json!({
            "name": format!("it-cat-{}", Uuid::new_v4()),
            "properties": [{ "name": "color", "values": ["red", "blue"] }],
        }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = resp.json().await.expect("Failed to parse category");
    let category_id = category["id"].as_i64().expect("category id");

    // Product under it
    let payload = json!({
        "title": "Integration Widget",
        "description": "Roundtrip test product",
        "price": "19.99",
        "images": ["https://cdn.test/a.jpg", "https://cdn.test/b.jpg"],
        "category": category_id,
        "properties": { "color": "red" },
    });
    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("Failed to parse product");
    let product_id = product["id"].as_i64().expect("product id");

    // Fetch-by-id returns all submitted fields unchanged
    let fetched: Value = client
        .get(format!("{base_url}/api/products/{product_id}"))
        .send()
        .await
        .expect("Failed to fetch product")
        .json()
        .await
        .expect("Failed to parse product");

    assert_eq!(fetched["title"], payload["title"]);
    assert_eq!(fetched["price"], payload["price"]);
    assert_eq!(fetched["images"], payload["images"]);
    assert_eq!(fetched["category"], json!(category_id));
    assert_eq!(fetched["properties"], payload["properties"]);
    assert_eq!(fetched["editable_properties"], json!(["color"]));

    // Drop the property from the category: the stored value stays,
    // but it is no longer editable
    let resp = client
        .put(format!("{base_url}/api/categories/{category_id}"))
        .json(&json!({ "name": category["name"], "properties": [] }))
        .send()
        .await
        .expect("Failed to update category");
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = client
        .get(format!("{base_url}/api/products/{product_id}"))
        .send()
        .await
        .expect("Failed to re-fetch product")
        .json()
        .await
        .expect("Failed to parse product");
    assert_eq!(fetched["properties"], payload["properties"]);
    assert_eq!(fetched["editable_properties"], json!([]));

    // Cleanup
    let resp = client
        .delete(format!("{base_url}/api/products/{product_id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = client
        .delete(format!("{base_url}/api/categories/{category_id}"))
        .send()
        .await
        .expect("Failed to delete category");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running admin server and ADMIN_TEST_SESSION"]
async fn test_missing_product_is_404() {
    let client = client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/api/products/999999999"))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and ADMIN_TEST_SESSION"]
async fn test_settings_roundtrip_and_absent_reads_null() {
    let client = client();
    let base_url = admin_base_url();
    let name = format!("it-setting-{}", Uuid::new_v4());

    // Absent setting reads as null, not an error
    let resp = client
        .get(format!("{base_url}/api/settings"))
        .query(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to read setting");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse setting");
    assert_eq!(body["value"], Value::Null);

    // Upsert then read back
    let resp = client
        .put(format!("{base_url}/api/settings"))
        .json(&json!({ "name": name, "value": "7" }))
        .send()
        .await
        .expect("Failed to write setting");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{base_url}/api/settings"))
        .query(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to re-read setting")
        .json()
        .await
        .expect("Failed to parse setting");
    assert_eq!(body["value"], json!("7"));
}
