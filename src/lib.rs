// src/lib.rs
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod rendering;
pub mod state;
pub mod utils;

pub use error::{NviewError, Result};
