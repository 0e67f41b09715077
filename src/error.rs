use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid static configuration, e.g. a base win rate outside [0, 1].
    #[error("Config error: {0}")]
    ConfigError(String),

    /// A fetched prize record is malformed (inverted window, missing quantity).
    /// Carriers of this error are excluded from the pool record by record;
    /// the spin keeps working with the remaining valid records.
    #[error("Data error: {0}")]
    DataError(String),

    /// The content store failed on fetch or persist. Surfaced as its own
    /// failure, never folded into a "no win" outcome.
    #[error("Store error: {0}")]
    StoreError(#[from] sea_orm::DbErr),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ConfigError(msg) => {
                log::error!("Config error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    msg.clone(),
                )
            }
            AppError::DataError(msg) => {
                log::error!("Data error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATA_ERROR",
                    msg.clone(),
                )
            }
            AppError::StoreError(err) => {
                log::error!("Store error: {err}");
                (
                    actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "Content store unavailable".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                log::error!("Internal error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
