//! Duel store adapters.

pub mod memory;

pub use memory::MemoryDuelStore;
