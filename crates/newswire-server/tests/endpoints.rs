use std::sync::Arc;

use newswire_db_memory::InMemoryStore;
use newswire_server::build_app;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

async fn start_server(
    store: Arc<InMemoryStore>,
) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let app = build_app(store);

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

#[tokio::test]
async fn banner_and_category_listing() {
    let store = Arc::new(InMemoryStore::new());
    store.seed(
        "categories",
        [
            json!({ "categoryId": 5, "name": "Entertainment" }),
            json!({ "categoryId": 1, "name": "World" }),
            json!({ "categoryId": 3, "name": "Sports" }),
        ],
    );
    let (base, shutdown_tx, handle) = start_server(store).await;
    let client = reqwest::Client::new();

    // GET /
    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["service"], "Newswire Server");
    assert_eq!(body["status"], "ok");

    // GET /categories is ordered by ascending categoryId
    let resp = client.get(format!("{base}/categories")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["categoryId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3, 5]);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn category_filter_and_browse_all_fallback() {
    let store = Arc::new(InMemoryStore::new());
    store.seed(
        "news",
        [
            json!({ "categoryId": 1, "date": "2024-01-01", "title": "old world" }),
            json!({ "categoryId": 2, "date": "2024-02-01", "title": "tech" }),
            json!({ "categoryId": 1, "date": "2024-03-01", "title": "new world" }),
        ],
    );
    let (base, shutdown_tx, handle) = start_server(store).await;
    let client = reqwest::Client::new();

    // Valid non-zero id filters by categoryId, newest first
    let body: Value = client
        .get(format!("{base}/categories/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["new world", "old world"]);

    // Non-numeric id means no filter
    let body: Value = client
        .get(format!("{base}/categories/latest"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 3);

    // Zero means no filter too
    let body: Value = client
        .get(format!("{base}/categories/0"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn news_create_read_update_delete() {
    let store = Arc::new(InMemoryStore::new());
    let (base, shutdown_tx, handle) = start_server(store).await;
    let client = reqwest::Client::new();

    // POST /post-news echoes categoryId next to the insert outcome
    let posted = json!({
        "categoryId": 4,
        "userId": "author-1",
        "date": "2024-05-20",
        "title": "Launch day",
        "details": "Full text"
    });
    let resp = client
        .post(format!("{base}/post-news"))
        .json(&posted)
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["acknowledged"], true);
    assert_eq!(body["categoryId"], 4);
    let id = body["insertedId"].as_str().unwrap().to_string();

    // GET /news-details returns the posted fields
    let body: Value = client
        .get(format!("{base}/news-details/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["title"], "Launch day");
    assert_eq!(body["details"], "Full text");
    assert_eq!(body["userId"], "author-1");

    // PATCH /update-news merges the supplied fields and keeps the rest
    let resp = client
        .patch(format!("{base}/update-news/{id}"))
        .json(&json!({ "title": "Launch day (updated)", "categoryId": 4 }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["categoryId"], 4);

    let body: Value = client
        .get(format!("{base}/news-details/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["title"], "Launch day (updated)");
    assert_eq!(body["details"], "Full text");

    // DELETE /delete-news removes it; the details lookup then yields null
    let body: Value = client
        .delete(format!("{base}/delete-news/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["deletedCount"], 1);

    let body: Value = client
        .get(format!("{base}/news-details/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, Value::Null);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn update_news_creates_when_absent() {
    let store = Arc::new(InMemoryStore::new());
    let (base, shutdown_tx, handle) = start_server(store).await;
    let client = reqwest::Client::new();

    let resp = client
        .patch(format!("{base}/update-news/missing-id"))
        .json(&json!({ "title": "appeared out of nowhere" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["matchedCount"], 0);
    assert!(body["upsertedId"].is_string());

    let upserted = body["upsertedId"].as_str().unwrap();
    let body: Value = client
        .get(format!("{base}/news-details/{upserted}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["title"], "appeared out of nowhere");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn news_by_same_author_sorted_newest_first() {
    let store = Arc::new(InMemoryStore::new());
    store.seed(
        "news",
        [
            json!({ "userId": "author-1", "date": "2024-01-10", "title": "first" }),
            json!({ "userId": "author-2", "date": "2024-01-15", "title": "other author" }),
            json!({ "userId": "author-1", "date": "2024-02-10", "title": "second" }),
        ],
    );
    let (base, shutdown_tx, handle) = start_server(store).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{base}/news-by-same-author/author-1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn user_role_write_then_read() {
    let store = Arc::new(InMemoryStore::new());
    let (base, shutdown_tx, handle) = start_server(store).await;
    let client = reqwest::Client::new();

    // Role upsert against an unknown author id creates the user
    let resp = client
        .patch(format!("{base}/user-role/author-9"))
        .json(&json!({ "newRole": "admin" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["matchedCount"], 0);
    assert!(body["upsertedId"].is_string());

    // The role read projects down to the role field alone
    let body: Value = client
        .get(format!("{base}/user-role/author-9"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "role": "admin" }));

    // A second write updates in place
    let resp = client
        .patch(format!("{base}/user-role/author-9"))
        .json(&json!({ "newRole": "editor" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["matchedCount"], 1);

    let body: Value = client
        .get(format!("{base}/user-role/author-9"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "role": "editor" }));

    // The user shows up in the unfiltered user listing
    let body: Value = client.get(format!("{base}/users")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["userId"], "author-9");

    // An unknown author reads as null
    let body: Value = client
        .get(format!("{base}/user-role/nobody"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, Value::Null);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
