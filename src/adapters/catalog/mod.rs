//! Listing API adapter
//!
//! Fetches pages of houses and converts them into domain [`Record`]s.
//!
//! [`Record`]: crate::domain::Record

pub mod client;
pub mod models;

pub use client::{CatalogClient, PageFetcher};
pub use models::{House, HousesPage};
