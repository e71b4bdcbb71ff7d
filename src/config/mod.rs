//! Configuration module for adaptive scraping
//!
//! `ScraperConfig` holds the ambient settings shared by every invocation
//! (timeouts, identity headers, viewport, browser location). Per-invocation
//! input lives in [`crate::request::ScrapeRequest`].

pub mod builder;
pub mod getters;
pub mod types;

pub use builder::ScraperConfigBuilder;
pub use types::ScraperConfig;
