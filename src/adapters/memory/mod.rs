//! In-process adapters.

mod call_store;

pub use call_store::InMemoryCallStore;
