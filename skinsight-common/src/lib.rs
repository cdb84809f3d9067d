//! # Skinsight Common Library
//!
//! Shared code for the skinsight services including:
//! - Error type used across crates
//! - Bootstrap configuration and root folder resolution
//! - The ordered disease label set the classifier is trained on
//! - Credential store contract, SQLite store and password hashing

pub mod config;
pub mod credentials;
pub mod error;
pub mod labels;

pub use error::{Error, Result};
pub use labels::DiseaseLabel;
