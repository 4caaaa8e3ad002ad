use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;
use kb_service::{Error, KnowledgeStats, SearchRequest, SearchResponse, schema};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/knowledge/search", post(search))
		.route("/v1/knowledge/stats", get(stats))
		.route("/v1/knowledge/schema", get(tool_schema))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn stats(State(state): State<AppState>) -> Result<Json<KnowledgeStats>, ApiError> {
	let response = state.service.stats()?;

	Ok(Json(response))
}

async fn tool_schema(State(state): State<AppState>) -> Json<Value> {
	Json(schema::tool_schema(&state.service.cfg.search))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidQuery { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_query", message),
			Error::StoreUnavailable { message } => {
				tracing::error!(error = %message, "Knowledge store unavailable.");

				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", message)
			},
			Error::ScoringDegraded { message } => {
				tracing::error!(error = %message, "Scoring failure escaped the search pipeline.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
