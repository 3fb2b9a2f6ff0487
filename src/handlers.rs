use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::constants::CATEGORY_SUGGESTIONS;
use crate::error::ExpenseError;
use crate::expenses::ExpenseService;
use crate::models::{
    CreateExpensePayload, CreateExpenseResponse, ExpenseId, ExpenseRecord, SummaryQuery,
    SummaryResponse,
};
use crate::store::RecordStore;
use crate::utils::parse_date;

pub type ApiError = (StatusCode, String);

pub fn error_response(e: ExpenseError) -> ApiError {
    let status = match &e {
        ExpenseError::Validation(_) => StatusCode::BAD_REQUEST,
        ExpenseError::Closed => StatusCode::SERVICE_UNAVAILABLE,
        ExpenseError::Connection(_) | ExpenseError::Storage(_) => {
            tracing::error!(error = %e, "expense store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

pub fn router<S: RecordStore>(service: Arc<ExpenseService<S>>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/categories", get(list_categories))
        .route(
            "/expenses",
            get(list_expenses::<S>).post(create_expense::<S>),
        )
        .route("/expenses/summary", get(summarize_expenses::<S>))
        .route("/expenses/{id}", delete(delete_expense::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn root() -> &'static str {
    "Personal Finance Tracker"
}

async fn list_categories() -> Json<Vec<&'static str>> {
    Json(CATEGORY_SUGGESTIONS.to_vec())
}

pub async fn create_expense<S: RecordStore>(
    State(service): State<Arc<ExpenseService<S>>>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<(StatusCode, Json<CreateExpenseResponse>), ApiError> {
    let id = service
        .add_expense(&payload.description, &payload.amount, &payload.category)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(CreateExpenseResponse { id })))
}

pub async fn list_expenses<S: RecordStore>(
    State(service): State<Arc<ExpenseService<S>>>,
) -> Result<Json<Vec<ExpenseRecord>>, ApiError> {
    let records = service.list_all_expenses().await.map_err(error_response)?;
    Ok(Json(records))
}

pub async fn delete_expense<S: RecordStore>(
    State(service): State<Arc<ExpenseService<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let selection = ExpenseId::from_selection(&id);
    service
        .delete_expense(selection.as_ref())
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn summarize_expenses<S: RecordStore>(
    State(service): State<Arc<ExpenseService<S>>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let start = parse_date(&query.start).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let end = parse_date(&query.end).map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let summary = service
        .summarize_range(start, end)
        .await
        .map_err(error_response)?;

    Ok(Json(SummaryResponse::from(summary)))
}
