//! # Quorum Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client with retry and timeout support
//! - GitHub issue tracker adapter
//! - HackMD notes host adapter
//! - iCalendar feed source and parser
//! - Filesystem template store
//!
//! ## Architecture
//! - Implements traits defined in `quorum-core`
//! - Depends on `quorum-domain` and `quorum-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod errors;
pub mod github;
pub mod hackmd;
pub mod http;
pub mod ical;
pub mod templates;

pub use errors::InfraError;
pub use github::GithubClient;
pub use hackmd::HackmdClient;
pub use http::HttpClient;
pub use ical::IcalFeedSource;
pub use templates::FileTemplateStore;
