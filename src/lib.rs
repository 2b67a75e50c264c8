//! HTB Badge Service Library
//!
//! Proxies the Hack The Box profile API and renders the result as a cacheable
//! SVG badge.
//!
//! # Modules
//!
//! - `badge`: SVG layouts and composition.
//! - `config`: Configuration management.
//! - `errors`: Error types and their HTTP mapping.
//! - `handlers`: HTTP router and request handlers.
//! - `htb_client`: HTB profile API client.
//! - `models`: Upstream payload types.
//! - `validation`: Request parameter validation.

pub mod badge;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod htb_client;
pub mod models;
pub mod validation;
