//! GitHub REST v3 adapter implementing the issue tracker port.

pub mod client;

pub use client::GithubClient;
