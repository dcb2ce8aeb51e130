// src/error.rs

use thiserror::Error;

/// Crate-wide result type for the IO-facing parts of nview.
pub type Result<T> = std::result::Result<T, NviewError>;

/// Errors surfaced at the boundaries (files, CSV tables, export).
/// The layout engine itself never fails.
#[derive(Debug, Error)]
pub enum NviewError {
  #[error("no nuclide with Z={z}, N={n} in the level table")]
  MissingNuclide { z: u32, n: u32 },
  #[error("level table contains no nuclides")]
  EmptyLevelTable,
  #[error("export failed: {0}")]
  Export(String),
  #[error(transparent)]
  Csv(#[from] csv::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
