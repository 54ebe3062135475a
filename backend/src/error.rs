//! Error types for the survey server.
//!
//! Storage failures are kept apart from domain failures so the stores can be
//! used (and tested) without pulling in the HTTP layer:
//! - `StoreError`: I/O, CSV and SQLite faults while loading or saving a table
//! - `SurveyError`: everything an operation can report to the user
//! - `ConfigError`: invalid environment configuration at startup

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("link invalid or not found")]
    LinkNotFound,

    #[error("order {0} not found in the catalog")]
    OrderNotFound(String),

    #[error("order {order_id} is not eligible for a survey link (status: {status})")]
    OrderNotEligible { order_id: String, status: String },

    #[error("{0}")]
    InvalidRating(#[from] common::model::response::RatingOutOfRange),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("sheet '{expected}' not found in the workbook (available: {})", .available.join(", "))]
    MissingSheet {
        expected: String,
        available: Vec<String>,
    },

    #[error("unsupported upload '{0}': expected a .xlsx or .csv file")]
    UnsupportedUpload(String),

    #[error("the upload did not contain a file")]
    EmptyUpload,

    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    #[error("could not read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("background task failed: {0}")]
    Task(String),
}

impl ResponseError for SurveyError {
    fn status_code(&self) -> StatusCode {
        match self {
            SurveyError::LinkNotFound | SurveyError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            SurveyError::OrderNotEligible { .. } => StatusCode::CONFLICT,
            SurveyError::InvalidRating(_)
            | SurveyError::MissingColumns(_)
            | SurveyError::MissingSheet { .. }
            | SurveyError::UnsupportedUpload(_)
            | SurveyError::EmptyUpload
            | SurveyError::InvalidUpload(_)
            | SurveyError::Spreadsheet(_) => StatusCode::BAD_REQUEST,
            SurveyError::Storage(_) | SurveyError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
