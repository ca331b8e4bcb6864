//! Lexical resume screening.
//!
//! [`screening`] holds the pure ranking core. [`config`], [`telemetry`] and
//! [`error`] carry the process-level concerns shared by the CLI and the HTTP
//! service.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
