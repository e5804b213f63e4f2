//! API integration tests
//!
//! Run against a live server with an active `admin`/`admin` account:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api/v1";

/// Client holding its own session cookie, logged in as admin
async fn logged_in_client() -> Client {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success(), "login failed: {}", response.status());

    client
}

async fn post(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn get(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn create_book(client: &Client, title: &str) -> i64 {
    let (status, body) = post(client, "/books", json!({ "title": title })).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("No book id")
}

fn ids(list: &Value) -> Vec<i64> {
    list["items"]
        .as_array()
        .expect("No items")
        .iter()
        .filter_map(|item| item["id"].as_i64())
        .collect()
}

async fn delete(client: &Client, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

async fn patch(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .patch(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

/// Ids of `path` rows among `wanted`, looked up with `ids[]`
async fn surviving(client: &Client, path: &str, wanted: &[i64]) -> Vec<i64> {
    let query: Vec<String> = wanted.iter().map(|id| format!("ids[]={}", id)).collect();
    let (status, list) = get(client, &format!("{}?{}", path, query.join("&"))).await;
    assert_eq!(status, StatusCode::OK);
    ids(&list)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let (status, body) = get(&client, "/health").await;
    assert!(status.is_success());
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let (status, _) = post(
        &client,
        "/auth/login",
        json!({ "username": "admin", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_access() {
    let client = Client::new();

    let (status, _) = get(&client, "/chapters").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_created_book_becomes_current() {
    let client = logged_in_client().await;

    let book = create_book(&client, "Harbour Lights").await;

    let (status, current) = get(&client, "/session/current-book").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["id"].as_i64(), Some(book));
    assert_eq!(current["__str__"], "Harbour Lights");
}

#[tokio::test]
#[ignore]
async fn test_chapter_defaults_to_current_book() {
    let client = logged_in_client().await;
    let book = create_book(&client, "Defaults").await;

    let (status, chapter) = post(&client, "/chapters", json!({ "number": 1, "title": "Arrival" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(chapter["book"].as_i64(), Some(book));
}

#[tokio::test]
#[ignore]
async fn test_lists_are_filtered_by_current_book() {
    let client = logged_in_client().await;

    let first = create_book(&client, "First").await;
    let (_, char_a) = post(&client, "/characters", json!({ "name": "Ada" })).await;

    let second = create_book(&client, "Second").await;
    let (_, char_b) = post(&client, "/characters", json!({ "name": "Bo" })).await;
    assert_eq!(char_b["book"].as_i64(), Some(second));

    let (_, list) = get(&client, "/characters?per_page=100").await;
    let listed = ids(&list);
    assert!(listed.contains(&char_b["id"].as_i64().unwrap()));
    assert!(!listed.contains(&char_a["id"].as_i64().unwrap()));

    // viewing the first book switches the scope back
    let (status, _) = get(&client, &format!("/books/{}", first)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = get(&client, "/characters?per_page=100").await;
    let listed = ids(&list);
    assert!(listed.contains(&char_a["id"].as_i64().unwrap()));
    assert!(!listed.contains(&char_b["id"].as_i64().unwrap()));
}

#[tokio::test]
#[ignore]
async fn test_update_is_forced_into_current_book() {
    let client = logged_in_client().await;

    let other = create_book(&client, "Elsewhere").await;
    let current = create_book(&client, "Here").await;
    let (_, place) = post(&client, "/places", json!({ "name": "Lighthouse" })).await;
    let place_id = place["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/places/{}", BASE_URL, place_id))
        .json(&json!({ "book": other, "name": "Old lighthouse" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"].as_i64(), Some(current));
    assert_eq!(body["name"], "Old lighthouse");
}

#[tokio::test]
#[ignore]
async fn test_row_outside_current_book_is_not_found() {
    let client = logged_in_client().await;

    create_book(&client, "Owner").await;
    let (_, prop) = post(&client, "/props", json!({ "name": "Lantern" })).await;
    let prop_id = prop["id"].as_i64().unwrap();

    create_book(&client, "Stranger").await;
    let (status, _) = get(&client, &format!("/props/{}", prop_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_book_delete_cascades() {
    let client = logged_in_client().await;

    let book = create_book(&client, "Doomed").await;
    let (_, chapter) = post(&client, "/chapters", json!({ "number": 1 })).await;
    let (_, place) = post(&client, "/places", json!({ "name": "Quay" })).await;
    let (_, prop) = post(&client, "/props", json!({ "name": "Rope" })).await;
    let (_, character) = post(&client, "/characters", json!({ "name": "Gus" })).await;
    let (_, scene) = post(
        &client,
        "/scenes",
        json!({
            "short_description": "Mooring",
            "chapter": chapter["id"],
            "place": place["id"],
            "characters": [character["id"]]
        }),
    )
    .await;
    let (status, exchange) = post(
        &client,
        "/inventory-exchanges",
        json!({ "scene": scene["id"], "to_char": character["id"], "prop": prop["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(delete(&client, &format!("/books/{}", book)).await, StatusCode::NO_CONTENT);

    // the pointer is stale now and resolves to no book
    let (_, current) = get(&client, "/session/current-book").await;
    assert!(current.is_null());

    for (path, row) in [
        ("/chapters", &chapter),
        ("/places", &place),
        ("/props", &prop),
        ("/characters", &character),
        ("/scenes", &scene),
        ("/inventory-exchanges", &exchange),
    ] {
        let id = row["id"].as_i64().unwrap();
        assert!(surviving(&client, path, &[id]).await.is_empty(), "{} {} survived", path, id);
    }
}

#[tokio::test]
#[ignore]
async fn test_prop_delete_removes_its_exchanges() {
    let client = logged_in_client().await;

    create_book(&client, "Losses").await;
    let (_, prop) = post(&client, "/props", json!({ "name": "Coin" })).await;
    let (_, scene) = post(&client, "/scenes", json!({ "short_description": "Toss" })).await;
    let (_, exchange) = post(
        &client,
        "/inventory-exchanges",
        json!({ "scene": scene["id"], "prop": prop["id"] }),
    )
    .await;

    let prop_id = prop["id"].as_i64().unwrap();
    assert_eq!(delete(&client, &format!("/props/{}", prop_id)).await, StatusCode::NO_CONTENT);

    let exchange_id = exchange["id"].as_i64().unwrap();
    assert!(surviving(&client, "/inventory-exchanges", &[exchange_id]).await.is_empty());
    let scene_id = scene["id"].as_i64().unwrap();
    assert_eq!(surviving(&client, "/scenes", &[scene_id]).await, vec![scene_id]);
}

#[tokio::test]
#[ignore]
async fn test_character_delete_keeps_exchange() {
    let client = logged_in_client().await;

    create_book(&client, "Leftovers").await;
    let (_, giver) = post(&client, "/characters", json!({ "name": "Hal" })).await;
    let (_, taker) = post(&client, "/characters", json!({ "name": "Ivy" })).await;
    let (_, prop) = post(&client, "/props", json!({ "name": "Map" })).await;
    let (_, scene) = post(
        &client,
        "/scenes",
        json!({ "short_description": "Parting", "characters": [giver["id"], taker["id"]] }),
    )
    .await;
    let (_, exchange) = post(
        &client,
        "/inventory-exchanges",
        json!({
            "scene": scene["id"],
            "from_char": giver["id"],
            "to_char": taker["id"],
            "prop": prop["id"]
        }),
    )
    .await;

    let giver_id = giver["id"].as_i64().unwrap();
    assert_eq!(delete(&client, &format!("/characters/{}", giver_id)).await, StatusCode::NO_CONTENT);

    let (status, exchange) = get(
        &client,
        &format!("/inventory-exchanges/{}", exchange["id"].as_i64().unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(exchange["from_char"].is_null());
    assert_eq!(exchange["to_char"], taker["id"]);
    assert_eq!(exchange["__str__"], "Ivy receives Map");

    // the scene survives too, without the deleted participant
    let (_, scene) = get(&client, &format!("/scenes/{}", scene["id"].as_i64().unwrap())).await;
    assert_eq!(scene["characters"], json!([taker["id"]]));
}

#[tokio::test]
#[ignore]
async fn test_referenced_row_cannot_move_to_another_book() {
    let writer = logged_in_client().await;
    let target = create_book(&writer, "Target").await;
    create_book(&writer, "Source").await;
    let (_, place) = post(&writer, "/places", json!({ "name": "Mill" })).await;
    post(
        &writer,
        "/scenes",
        json!({ "short_description": "At the mill", "place": place["id"] }),
    )
    .await;

    // a fresh session has no current book, so the client's book is kept
    let mover = logged_in_client().await;
    let place_id = place["id"].as_i64().unwrap();
    let (status, _) = patch(&mover, &format!("/places/{}", place_id), json!({ "book": target })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_malformed_book_update_still_marks_current() {
    let client = logged_in_client().await;

    let first = create_book(&client, "Kept").await;
    create_book(&client, "Later").await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, first))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, current) = get(&client, "/session/current-book").await;
    assert_eq!(current["id"].as_i64(), Some(first));
}

#[tokio::test]
#[ignore]
async fn test_no_current_book_lists_everything() {
    let writer = logged_in_client().await;
    create_book(&writer, "Visible").await;
    let (_, character) = post(&writer, "/characters", json!({ "name": "Cy" })).await;
    let character_id = character["id"].as_i64().unwrap();

    // a fresh session has no current book
    let reader = logged_in_client().await;
    let (status, current) = get(&reader, "/session/current-book").await;
    assert_eq!(status, StatusCode::OK);
    assert!(current.is_null());

    let (_, list) = get(&reader, &format!("/characters?ids[]={}", character_id)).await;
    assert_eq!(ids(&list), vec![character_id]);
}

#[tokio::test]
#[ignore]
async fn test_sessions_keep_separate_current_books() {
    let first = logged_in_client().await;
    let second = logged_in_client().await;

    let book_a = create_book(&first, "Session A").await;
    let book_b = create_book(&second, "Session B").await;

    let (_, current) = get(&first, "/session/current-book").await;
    assert_eq!(current["id"].as_i64(), Some(book_a));
    let (_, current) = get(&second, "/session/current-book").await;
    assert_eq!(current["id"].as_i64(), Some(book_b));

    let (_, chapter_a) = post(&first, "/chapters", json!({ "number": 1 })).await;
    let (_, chapter_b) = post(&second, "/chapters", json!({ "number": 1 })).await;
    assert_eq!(chapter_a["book"].as_i64(), Some(book_a));
    assert_eq!(chapter_b["book"].as_i64(), Some(book_b));

    // the second session lists its own book's chapters, whatever the first points at
    let (_, list) = get(&second, "/chapters?per_page=100").await;
    let listed = ids(&list);
    assert!(listed.contains(&chapter_b["id"].as_i64().unwrap()));
    assert!(!listed.contains(&chapter_a["id"].as_i64().unwrap()));
    assert!(list["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|chapter| chapter["book"].as_i64() == Some(book_b)));
}

#[tokio::test]
#[ignore]
async fn test_scene_rejects_character_from_other_book() {
    let client = logged_in_client().await;

    create_book(&client, "Cast").await;
    let (_, outsider) = post(&client, "/characters", json!({ "name": "Dee" })).await;

    create_book(&client, "Stage").await;
    let (status, _) = post(
        &client,
        "/scenes",
        json!({
            "short_description": "A meeting",
            "characters": [outsider["id"]]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_inventory_exchange_label() {
    let client = logged_in_client().await;

    create_book(&client, "Trades").await;
    let (_, giver) = post(&client, "/characters", json!({ "name": "Eve" })).await;
    let (_, taker) = post(&client, "/characters", json!({ "name": "Finn" })).await;
    let (_, prop) = post(&client, "/props", json!({ "name": "Key" })).await;
    let (_, scene) = post(&client, "/scenes", json!({ "short_description": "Handover" })).await;

    let (status, exchange) = post(
        &client,
        "/inventory-exchanges",
        json!({
            "scene": scene["id"],
            "from_char": giver["id"],
            "to_char": taker["id"],
            "prop": prop["id"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(exchange["__str__"], "Finn receives Key from Eve");
}
