//! Filesystem-backed template store.

pub mod store;

pub use store::FileTemplateStore;
