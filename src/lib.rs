//! Shortly - a minimalist URL shortener service
//!
//! Maps long URLs to short random aliases and redirects aliases back to
//! their original URLs. Single tenant, one SQLite file, no frills.
//!
//! # Architecture
//! - `utils`: alias generation and URL normalization
//! - `storages`: durable alias -> URL mapping store (SQLite backend)
//! - `services`: core link operations plus the HTTP handlers around them
//! - `config`: environment-driven configuration
//! - `errors`: crate-wide error taxonomy

pub mod config;
pub mod errors;
pub mod services;
pub mod storages;
pub mod utils;
