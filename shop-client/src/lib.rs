//! Shop Client - Admin GraphQL client for the metafield editor
//!
//! Implements the catalog, metafield and file collaborator traits from
//! `shared::source` against a shop's Admin API.

pub mod admin;
pub mod config;
pub mod error;
pub mod http;
pub mod queries;
pub mod wire;

pub use admin::AdminClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
