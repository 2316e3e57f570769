//! The endpoint handlers.
//!
//! Every handler performs exactly one store operation and forwards the
//! result; there is no validation, aggregation, or cross-collection
//! logic here, and by contract there never will be. The only
//! embellishment the API makes is echoing `categoryId` from the request
//! body into the two news write responses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use newswire_core::{Category, NewsArticle, User, CATEGORIES, NEWS, USERS};
use newswire_storage::{
    DeleteOutcome, Filter, FindOptions, InsertOutcome, Projection, Sort, StoreError, UpdateOutcome,
};

use crate::server::AppState;

/// Store failures surface to the caller as a generic server error; the
/// detail goes to the log, not the response. The API defines no finer
/// error taxonomy.
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "store operation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal server error" })),
        )
            .into_response()
    }
}

/// Decodes raw store documents into a typed model. The model types
/// accept any object shape, so this only fails on non-object documents.
fn decode<T: DeserializeOwned>(docs: Vec<Value>) -> Result<Vec<T>, ApiError> {
    docs.into_iter()
        .map(|doc| serde_json::from_value(doc).map_err(|e| StoreError::serialization(e.to_string())))
        .collect::<Result<Vec<T>, StoreError>>()
        .map_err(ApiError::from)
}

fn decode_one<T: DeserializeOwned>(doc: Option<Value>) -> Result<Option<T>, ApiError> {
    doc.map(|doc| serde_json::from_value(doc).map_err(|e| StoreError::serialization(e.to_string())))
        .transpose()
        .map_err(ApiError::from)
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Newswire Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

// ---- Categories ----

/// GET /categories — all categories, ordered by ascending categoryId.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let docs = state
        .store
        .find(
            CATEGORIES,
            Filter::All,
            FindOptions::sorted(Sort::ascending("categoryId")),
        )
        .await?;
    Ok(Json(decode(docs)?))
}

/// GET /categories/{id} — news in one category, newest first.
///
/// A path id that does not parse to a non-zero number means "no
/// filter": the route then returns the full news listing. That
/// fallback is the documented contract of this route, not an error
/// path.
pub async fn news_by_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<NewsArticle>>, ApiError> {
    let filter = match id.parse::<i64>() {
        Ok(n) if n != 0 => Filter::eq("categoryId", n),
        _ => Filter::All,
    };
    let docs = state
        .store
        .find(NEWS, filter, FindOptions::sorted(Sort::descending("date")))
        .await?;
    Ok(Json(decode(docs)?))
}

// ---- News ----

/// GET /news-details/{id} — one article by store id, or null.
pub async fn news_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<NewsArticle>>, ApiError> {
    let doc = state.store.find_one(NEWS, Filter::id(id), None).await?;
    Ok(Json(decode_one(doc)?))
}

/// GET /news-by-same-author/{id} — articles by author id, newest first.
pub async fn news_by_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<NewsArticle>>, ApiError> {
    let docs = state
        .store
        .find(
            NEWS,
            Filter::eq("userId", id),
            FindOptions::sorted(Sort::descending("date")),
        )
        .await?;
    Ok(Json(decode(docs)?))
}

/// Insert outcome with the echoed `categoryId`.
#[derive(Debug, Serialize)]
pub struct PostNewsResponse {
    #[serde(flatten)]
    pub outcome: InsertOutcome,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

/// POST /post-news — insert a new article as supplied.
pub async fn post_news(
    State(state): State<AppState>,
    Json(article): Json<NewsArticle>,
) -> Result<Json<PostNewsResponse>, ApiError> {
    let category_id = article.category_id;
    let doc = serde_json::to_value(&article)
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    let outcome = state.store.insert_one(NEWS, doc).await?;
    Ok(Json(PostNewsResponse {
        outcome,
        category_id,
    }))
}

/// Update outcome with the echoed `categoryId` from the request body.
#[derive(Debug, Serialize)]
pub struct UpdateNewsResponse {
    #[serde(flatten)]
    pub outcome: UpdateOutcome,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Value>,
}

/// PATCH /update-news/{id} — merge the supplied fields into one
/// article. Creates the article if the id matches nothing (upsert).
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Value>,
) -> Result<Json<UpdateNewsResponse>, ApiError> {
    let category_id = fields.get("categoryId").cloned();
    let outcome = state
        .store
        .update_one(NEWS, Filter::id(id), fields, true)
        .await?;
    Ok(Json(UpdateNewsResponse {
        outcome,
        category_id,
    }))
}

/// DELETE /delete-news/{id} — remove one article by store id.
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let outcome = state.store.delete_one(NEWS, Filter::id(id)).await?;
    Ok(Json(outcome))
}

// ---- Users ----

/// GET /users — all users, unfiltered and unsorted.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let docs = state
        .store
        .find(USERS, Filter::All, FindOptions::default())
        .await?;
    Ok(Json(decode(docs)?))
}

/// GET /user-role/{id} — just the role field of one user, or null.
pub async fn get_user_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Value>>, ApiError> {
    let doc = state
        .store
        .find_one(
            USERS,
            Filter::eq("userId", id),
            Some(Projection::include(["role"]).without_id()),
        )
        .await?;
    Ok(Json(doc))
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    /// Absent means null, which is also what gets written.
    #[serde(rename = "newRole", default)]
    pub new_role: Value,
}

/// PATCH /user-role/{id} — upsert the role of one user by author id.
/// An unknown author id silently creates the user record.
pub async fn set_user_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RoleUpdate>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let outcome = state
        .store
        .update_one(
            USERS,
            Filter::eq("userId", id),
            json!({ "role": body.new_role }),
            true,
        )
        .await?;
    Ok(Json(outcome))
}
