//! Driven adapters implementing the domain's record-store ports.

pub mod memory;

pub use memory::InMemoryStore;
