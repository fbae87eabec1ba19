use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use common::{
    models::{Account, Candle, Position},
    Error as CommonError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::service::CandleService;

type SharedService = Arc<CandleService>;

// Create a wrapper for our common::Error type
pub struct ApiError(CommonError);

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            CommonError::ParseError(_) => StatusCode::BAD_REQUEST,
            CommonError::HttpError(_)
            | CommonError::ExchangeError(_)
            | CommonError::DecodeError(_)
            | CommonError::FieldParseError { .. } => StatusCode::BAD_GATEWAY,
            CommonError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            CommonError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert our API error wrapper to an Axum response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct CandleQuery {
    pub period: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

// Get candles for a trading pair
pub async fn get_candles(
    State(service): State<SharedService>,
    Path(pair): Path<String>,
    Query(query): Query<CandleQuery>,
) -> Result<Json<Vec<Candle>>, ApiError> {
    let candles = service
        .fetch_candles(&pair, query.period.as_deref(), query.start, query.end, query.limit)
        .await?;

    Ok(Json(candles))
}

pub async fn get_account(State(service): State<SharedService>) -> Result<Json<Account>, ApiError> {
    let account = service.account().await?;
    Ok(Json(account))
}

pub async fn get_position(
    State(service): State<SharedService>,
    Path(pair): Path<String>,
) -> Result<Json<Position>, ApiError> {
    let position = service.position(&pair).await?;
    Ok(Json(position))
}
