pub mod in_memory;
pub mod sieve_trait;

// Re-export the core trait and in-memory impl at top level
pub use in_memory::InMemorySieve;
pub use sieve_trait::Sieve;
