//! Shared HTTP plumbing for the API adapters.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
