//! # Casa
//!
//! A terminal client for a remote property-listings HTTP API.
//!
//! ## Features
//!
//! - **Three screens**: search-driven browser, listing detail with on-demand
//!   generated summaries, and a creation form
//! - **Stale-response discard**: every fetch is generation-tagged, so late
//!   responses to superseded requests never touch visible state
//! - **Configurable backend**: base URL from `casa.toml` or `CASA_API_URL`

pub mod api;
pub mod config;
pub mod listing;
pub mod ui;

pub use api::ApiClient;
pub use config::Config;
pub use listing::{Listing, ListingDraft, Summary};
