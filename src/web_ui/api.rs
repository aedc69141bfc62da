use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use crate::catalog::Catalog;
use crate::client::LoadState;
use crate::entities::Record;
use crate::error::MediaLogError;
use crate::options::FilterOptions;
use crate::report::Report;
use crate::stats::QuickStats;
use crate::web_ui::{AppState, CatalogQuery, ReportQuery};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NoData(String),

    #[error("error in the request: {0}")]
    InvalidRequest(String),

    #[error("an internal server error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoData(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MediaLogError> for ApiError {
    fn from(value: MediaLogError) -> Self {
        match value {
            MediaLogError::InvalidMonth(_) => Self::InvalidRequest(value.to_string()),
            MediaLogError::DataIOError(_) | MediaLogError::DataParseError(_) | MediaLogError::DataNotAnArray => {
                Self::NoData(value.user_message())
            }
            other => Self::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
        }

        if let Self::Internal(ref e) = self {
            error!("internal error: {:?}", e);
        }
        (self.status_code(), Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

async fn ready_catalog(state: &AppState) -> Result<Catalog, ApiError> {
    match state.client.load().await {
        LoadState::Ready(catalog) => Ok(catalog),
        LoadState::Unavailable(message) => Err(ApiError::NoData(message)),
    }
}

pub async fn get_records(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let catalog = ready_catalog(&state).await?;
    let records = catalog.query(&query.to_filter()).into_iter().cloned().collect();
    Ok(Json(records))
}

pub async fn get_options(State(state): State<AppState>) -> Result<Json<FilterOptions>, ApiError> {
    let catalog = ready_catalog(&state).await?;
    Ok(Json(catalog.options().clone()))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<QuickStats>, ApiError> {
    let catalog = ready_catalog(&state).await?;
    Ok(Json(catalog.quick_stats(state.config.done_markers.as_slice())))
}

pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>, ApiError> {
    let catalog = ready_catalog(&state).await?;
    let window = query.to_window(catalog.default_window().year)?;
    Ok(Json(catalog.report(window)))
}

pub async fn get_report_years(State(state): State<AppState>) -> Result<Json<Vec<i32>>, ApiError> {
    let catalog = ready_catalog(&state).await?;
    Ok(Json(catalog.report_years()))
}
