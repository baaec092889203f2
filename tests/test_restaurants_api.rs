//! End-to-end test: boot the server in-process and exercise every endpoint.
//!
//! Runs as a single sequential flow because all scenarios share the one
//! `restaurants` table (wiped at the start).

use serde_json::{json, Value};
use restaurant_api::Server;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_restaurants_api() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Bind to an ephemeral port to avoid conflicts if a server is already running.
    let server = Server::start("127.0.0.1", 0).await?;
    server.store().clear().await?;

    let base_url = format!("http://{}", server.local_addr());
    let client = reqwest::Client::new();

    // --- Health ---
    let resp = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(resp.status(), 200);

    // --- Create validation: each missing required field is a 400, in fixed order ---
    for (payload, missing) in [
        (json!({"borough": "B", "cuisine": "C"}), "name"),
        (json!({"name": "A", "cuisine": "C"}), "borough"),
        (json!({"name": "A", "borough": "B"}), "cuisine"),
        (json!({}), "name"),
    ] {
        let resp = client
            .post(format!("{}/restaurants", base_url))
            .json(&payload)
            .send()
            .await?;
        assert_eq!(resp.status(), 400);
        let text = resp.text().await?;
        assert!(text.contains(missing), "expected '{}' in '{}'", missing, text);
    }

    // Nothing was persisted by the rejected creates.
    let resp = client.get(format!("{}/restaurants", base_url)).send().await?;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 0);

    // Empty strings pass the presence check.
    let resp = client
        .post(format!("{}/restaurants", base_url))
        .json(&json!({"name": "", "borough": "", "cuisine": ""}))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);
    let blank: Value = resp.json().await?;
    client
        .delete(format!("{}/restaurants/{}", base_url, blank["id"].as_str().unwrap()))
        .send()
        .await?;

    // --- Create + get round trip ---
    let resp = client
        .post(format!("{}/restaurants", base_url))
        .json(&json!({"name": "A", "borough": "B", "cuisine": "C"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await?;
    let id = created["id"].as_str().unwrap().to_string();

    let resp = client
        .get(format!("{}/restaurants/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let fetched: Value = resp.json().await?;
    assert_eq!(
        fetched,
        json!({"id": id, "name": "A", "cuisine": "C", "borough": "B", "address": ""})
    );
    // Public representation never exposes grades or the structured address.
    assert!(fetched.get("grades").is_none());
    // Empty grades: no "grade" key at all.
    assert!(fetched.get("grade").is_none());

    // --- Derived fields: address string and most recent grade ---
    let resp = client
        .post(format!("{}/restaurants", base_url))
        .json(&json!({
            "name": "Graded",
            "borough": "Queens",
            "cuisine": "Italian",
            "address": {"building": "123", "street": "Main St", "zipcode": "11375",
                        "coord": ["-73.8", "40.7"]},
            "grades": [
                {"date": "2014-01-01T00:00:00Z", "grade": "B", "score": 10.0},
                {"date": "2016-01-01T00:00:00Z", "grade": "A", "score": 4.0},
                {"date": "2015-01-01T00:00:00Z", "grade": "C", "score": 30.0}
            ]
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);
    let graded: Value = resp.json().await?;
    let graded_id = graded["id"].as_str().unwrap().to_string();
    assert_eq!(graded["address"], "123 Main St");
    // Entry with the maximum date wins.
    assert_eq!(graded["grade"], "A");

    // --- Listing: exact-match filter, unknown params ignored, cap at 10 ---
    for i in 0..12 {
        let resp = client
            .post(format!("{}/restaurants", base_url))
            .json(&json!({"name": format!("R{}", i), "borough": "Bronx", "cuisine": "Italian"}))
            .send()
            .await?;
        assert_eq!(resp.status(), 201);
    }
    let resp = client
        .get(format!("{}/restaurants?cuisine=Italian&ignored=whatever", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    let listed = body["restaurants"].as_array().unwrap();
    assert_eq!(listed.len(), 10);
    for r in listed {
        assert_eq!(r["cuisine"], "Italian");
    }

    let resp = client
        .get(format!("{}/restaurants?cuisine=Italian&borough=Bronx", base_url))
        .send()
        .await?;
    let body: Value = resp.json().await?;
    for r in body["restaurants"].as_array().unwrap() {
        assert_eq!(r["borough"], "Bronx");
    }

    let resp = client
        .get(format!("{}/restaurants?cuisine=NoSuchCuisine", base_url))
        .send()
        .await?;
    let body: Value = resp.json().await?;
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 0);

    // --- Update: id mismatch is a 400 and mutates nothing ---
    let resp = client
        .put(format!("{}/restaurants/{}", base_url, id))
        .json(&json!({"id": "999999", "name": "Hacked"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 400);

    let resp = client
        .put(format!("{}/restaurants/{}", base_url, id))
        .json(&json!({"name": "Hacked"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 400, "missing body id must also be a 400");

    let resp = client
        .get(format!("{}/restaurants/{}", base_url, id))
        .send()
        .await?;
    let unchanged: Value = resp.json().await?;
    assert_eq!(unchanged["name"], "A");

    // --- Update: partial, untouched fields preserved ---
    let resp = client
        .put(format!("{}/restaurants/{}", base_url, id))
        .json(&json!({"id": id, "borough": "Brooklyn"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 202);
    let updated: Value = resp.json().await?;
    assert_eq!(updated["borough"], "Brooklyn");
    assert_eq!(updated["name"], "A");
    assert_eq!(updated["cuisine"], "C");

    // Address is updatable and reflected through the derived string.
    let resp = client
        .put(format!("{}/restaurants/{}", base_url, id))
        .json(&json!({"id": id, "address": {"building": "7", "street": "Elm St"}}))
        .send()
        .await?;
    assert_eq!(resp.status(), 202);
    let updated: Value = resp.json().await?;
    assert_eq!(updated["address"], "7 Elm St");

    // A body carrying only the matching id updates nothing but still succeeds.
    let resp = client
        .put(format!("{}/restaurants/{}", base_url, id))
        .json(&json!({"id": id}))
        .send()
        .await?;
    assert_eq!(resp.status(), 202);
    let resp = client
        .get(format!("{}/restaurants/{}", base_url, id))
        .send()
        .await?;
    let after: Value = resp.json().await?;
    assert_eq!(after["name"], "A");
    assert_eq!(after["cuisine"], "C");
    assert_eq!(after["borough"], "Brooklyn");
    assert_eq!(after["address"], "7 Elm St");

    // The graded record's grades survive updates untouched.
    let resp = client
        .put(format!("{}/restaurants/{}", base_url, graded_id))
        .json(&json!({"id": graded_id, "name": "Still graded"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 202);
    let updated: Value = resp.json().await?;
    assert_eq!(updated["grade"], "A");

    // --- Missing documents: 404, not 500 ---
    let resp = client
        .get(format!("{}/restaurants/999999999", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    let resp = client
        .get(format!("{}/restaurants/not-a-numeric-id", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    let resp = client
        .put(format!("{}/restaurants/999999999", base_url))
        .json(&json!({"id": "999999999", "name": "Ghost"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    // Ids the store could never have assigned behave as absent documents on
    // every verb: 404 on update, 204 on delete.
    let resp = client
        .put(format!("{}/restaurants/not-a-numeric-id", base_url))
        .json(&json!({"id": "not-a-numeric-id", "name": "Ghost"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{}/restaurants/not-a-numeric-id", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 204);

    // --- Delete: idempotent ---
    let resp = client
        .delete(format!("{}/restaurants/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 204);
    assert_eq!(resp.content_length().unwrap_or(0), 0);

    let resp = client
        .delete(format!("{}/restaurants/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 204);

    let resp = client
        .delete(format!("{}/restaurants/999999999", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{}/restaurants/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    // --- Fallback route ---
    let resp = client
        .get(format!("{}/no/such/route", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Not Found");

    server.stop().await?;
    Ok(())
}
