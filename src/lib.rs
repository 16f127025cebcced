//! Keeps a "D-day to next birthday" custom field up to date on Stash performers.
//! Provides an async GraphQL client for the few calls involved, the pure
//! countdown calculation, and the sequential sync loop tying them together.

pub mod client;
pub mod config;
pub mod dday;
pub mod error;
pub mod models;
pub mod queries;
pub mod sync;

pub use client::Client;
pub use config::{Config, Mode};
pub use dday::{Dday, calculate_at, calculate_dday_and_next_age};
pub use error::{ApiError, StashError};
pub use models::{CustomField, GraphQlError, GraphQlOutcome, Performer};
pub use sync::Synchronizer;
