//! HTTP surface for Quote Keeper.
//!
//! This module exposes a compact Axum router over a [`QuoteStore`]:
//!
//! - `GET /api/items` – List every quote in ascending id order.
//! - `POST /api/items` – Create a quote. Requires `name`; `description`, `author`, `source`,
//!   `category` and `completed` are optional. Client-sent `id` and `createdAt` are ignored.
//! - `GET /api/items/search?name=…` – Case-insensitive substring search on names.
//! - `GET /api/items/:id` – Fetch one quote.
//! - `PUT /api/items/:id` – Replace a quote's name, description and completion flag.
//! - `DELETE /api/items/:id` – Remove a quote.
//! - `GET /metrics` – Write counters and the live quote count.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.
//!
//! Every `/api/items` route is also served under `/api/quotes`.
//!
//! Store failures map to `400` (invalid input or malformed body), `404` (unknown id) and `409`
//! (duplicate name), each with an `{ "error": … }` JSON body.

use crate::metrics::MetricsSnapshot;
use crate::quotes::{Quote, QuoteDraft, QuoteStore, StoreError};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Path prefix for the quote collection routes.
pub const ITEMS_PREFIX: &str = "/api/items";
/// Alias prefix serving the same routes.
pub const QUOTES_PREFIX: &str = "/api/quotes";

/// Build the HTTP router exposing the quote API surface.
///
/// The collection routes are mounted under both [`ITEMS_PREFIX`] and [`QUOTES_PREFIX`].
pub fn create_router<S>(store: Arc<S>) -> Router
where
    S: QuoteStore + 'static,
{
    let mut router = Router::new();
    for prefix in [ITEMS_PREFIX, QUOTES_PREFIX] {
        router = router
            .route(prefix, get(list_quotes::<S>).post(create_quote::<S>))
            .route(&format!("{prefix}/search"), get(search_quotes::<S>))
            .route(
                &format!("{prefix}/:id"),
                get(get_quote::<S>)
                    .put(update_quote::<S>)
                    .delete(delete_quote::<S>),
            );
    }
    router
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .with_state(store)
}

/// Request body for `POST /api/items` and `PUT /api/items/:id`.
#[derive(Debug, Default, Deserialize)]
struct QuoteRequest {
    /// Unique quote name.
    #[serde(default)]
    name: Option<String>,
    /// Quote body, stored as the record's content.
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    category: Option<String>,
    /// Completion flag (defaults to `false`).
    #[serde(default)]
    completed: Option<bool>,
}

impl From<QuoteRequest> for QuoteDraft {
    fn from(request: QuoteRequest) -> Self {
        Self {
            name: request.name,
            content: request.description,
            author: request.author,
            source: request.source,
            category: request.category,
            completed: request.completed,
        }
    }
}

/// Public representation of a stored quote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    id: u64,
    name: String,
    description: Option<String>,
    author: Option<String>,
    source: Option<String>,
    category: Option<String>,
    /// RFC 3339 creation timestamp.
    created_at: String,
    completed: bool,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            name: quote.name,
            description: quote.content,
            author: quote.author,
            source: quote.source,
            category: quote.category,
            created_at: format_timestamp(quote.created_at),
            completed: quote.completed,
        }
    }
}

fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

fn to_responses(quotes: Vec<Quote>) -> Vec<QuoteResponse> {
    quotes.into_iter().map(QuoteResponse::from).collect()
}

/// Query string for `GET /api/items/search`.
#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    name: Option<String>,
}

async fn list_quotes<S>(State(store): State<Arc<S>>) -> Json<Vec<QuoteResponse>>
where
    S: QuoteStore,
{
    let quotes = store.list();
    tracing::debug!(count = quotes.len(), "Listed quotes");
    Json(to_responses(quotes))
}

/// Create a quote from the request body.
///
/// Returns `201 Created` with the stored quote, including its server-assigned `id` and
/// `createdAt`.
async fn create_quote<S>(
    State(store): State<Arc<S>>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<QuoteResponse>), AppError>
where
    S: QuoteStore,
{
    let Json(request) = payload?;
    let quote = store.create(request.into())?;
    tracing::info!(id = quote.id, name = %quote.name, "Quote created");
    Ok((StatusCode::CREATED, Json(quote.into())))
}

async fn get_quote<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<u64>,
) -> Result<Json<QuoteResponse>, AppError>
where
    S: QuoteStore,
{
    Ok(Json(store.get(id)?.into()))
}

/// Replace name, description and completion flag of an existing quote.
async fn update_quote<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<u64>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, AppError>
where
    S: QuoteStore,
{
    let Json(request) = payload?;
    let quote = store.update(id, request.into())?;
    tracing::info!(id, name = %quote.name, "Quote updated");
    Ok(Json(quote.into()))
}

async fn delete_quote<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError>
where
    S: QuoteStore,
{
    store.delete(id)?;
    tracing::info!(id, "Quote deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn search_quotes<S>(
    State(store): State<Arc<S>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<QuoteResponse>>, AppError>
where
    S: QuoteStore,
{
    let hits = store.search_by_name(params.name.as_deref())?;
    tracing::debug!(query = ?params.name, hits = hits.len(), "Searched quotes");
    Ok(Json(to_responses(hits)))
}

/// Return a concise metrics snapshot with write counters and the live quote count.
async fn get_metrics<S>(State(store): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: QuoteStore,
{
    Json(store.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery.
async fn get_commands() -> Json<CommandsResponse> {
    let quote_example = json!({
        "name": "On the Shortness of Life",
        "description": "It is not that we have a short time to live, but that we waste a lot of it.",
        "author": "Seneca",
        "source": "De Brevitate Vitae",
        "category": "stoic",
        "completed": false
    });
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "list_quotes",
                method: "GET",
                path: "/api/items",
                description: "Return every quote ordered by ascending id. All /api/items routes are also served under /api/quotes.",
                request_example: None,
            },
            CommandDescriptor {
                name: "create_quote",
                method: "POST",
                path: "/api/items",
                description: "Create a quote. Responds 201 with the stored quote, 400 when name is missing or blank, 409 when the name is taken.",
                request_example: Some(quote_example.clone()),
            },
            CommandDescriptor {
                name: "search_quotes",
                method: "GET",
                path: "/api/items/search?name={query}",
                description: "Case-insensitive substring search on quote names.",
                request_example: None,
            },
            CommandDescriptor {
                name: "get_quote",
                method: "GET",
                path: "/api/items/{id}",
                description: "Fetch a single quote; 404 when the id is unknown.",
                request_example: None,
            },
            CommandDescriptor {
                name: "update_quote",
                method: "PUT",
                path: "/api/items/{id}",
                description: "Replace name, description and completed on an existing quote; id and createdAt never change.",
                request_example: Some(quote_example),
            },
            CommandDescriptor {
                name: "delete_quote",
                method: "DELETE",
                path: "/api/items/{id}",
                description: "Remove a quote. Responds 204, or 404 when the id is unknown.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return write counters and the live quote count.",
                request_example: None,
            },
        ],
    })
}

enum AppError {
    Store(StoreError),
    Body(JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Store(err) => {
                let status = match err {
                    StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                    StoreError::DuplicateName(_) => StatusCode::CONFLICT,
                };
                (status, err.to_string())
            }
            Self::Body(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        };
        tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(inner: StoreError) -> Self {
        Self::Store(inner)
    }
}

impl From<JsonRejection> for AppError {
    fn from(inner: JsonRejection) -> Self {
        Self::Body(inner)
    }
}
