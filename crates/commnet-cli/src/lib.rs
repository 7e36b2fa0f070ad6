//! CommNet Planner CLI support
//!
//! Loads planner save-state scenarios into the CommNet kernel and turns the
//! computed network into a JSON connectivity report.

use commnet_core::CommnetError;
use thiserror::Error;

pub mod loader;
pub mod report;

pub use loader::Scenario;
pub use report::ConnectivityReport;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid location for {0}")]
    InvalidLocation(String),
    #[error("Invalid antenna count {count} for {antenna} on {owner}")]
    InvalidCount {
        owner: String,
        antenna: String,
        count: i64,
    },
    #[error(transparent)]
    Commnet(#[from] CommnetError),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
