//! External system integrations for Hearth.
//!
//! - [`transport`] - HTTP capability ([`transport::Transport`]) and its `reqwest` implementation
//! - [`storage`] - Filesystem capability ([`storage::Storage`]) and its `tokio::fs` implementation
//! - [`catalog`] - Listing API client built on the transport
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the pipeline can be
//! tested with in-memory doubles:
//!
//! ```rust,no_run
//! use hearth::adapters::catalog::CatalogClient;
//! use hearth::adapters::storage::LocalStorage;
//! use hearth::adapters::transport::ReqwestTransport;
//! use std::sync::Arc;
//!
//! # fn example() -> hearth::domain::Result<()> {
//! let transport = Arc::new(ReqwestTransport::new(30)?);
//! let catalog = CatalogClient::new(transport.clone(), "https://listings.example.com/api/houses");
//! let storage = LocalStorage::new(false);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod storage;
pub mod transport;
