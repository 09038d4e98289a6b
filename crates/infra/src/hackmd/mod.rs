//! HackMD API adapter implementing the notes host port.

pub mod client;

pub use client::HackmdClient;
