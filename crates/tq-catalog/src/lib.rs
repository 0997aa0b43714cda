//! tq-catalog: compound data model and resolution for thermoquery.
//!
//! Provides:
//! - `Phase` and the immutable `CompoundRecord` value type
//! - `CatalogRow`, the relational row shape delivered by external storage
//! - `CatalogStore` / `StaticCache` traits isolating the storage backends
//! - `CompoundDataLoader`, the staged cache-then-database resolver
//! - `PhaseTransitionDetector` helpers (consensus melting/boiling,
//!   expected phase, transition validity)
//!
//! # Architecture
//!
//! This crate defines a stable API (`CatalogStore` trait) that isolates the
//! rest of thermoquery from the storage layer. SQL construction and
//! connection pooling live outside; the core only consumes ordered row
//! sequences and an in-memory static cache.

pub mod error;
pub mod loader;
pub mod phase;
pub mod record;
pub mod row;
pub mod store;
pub mod transitions;

// Re-exports for ergonomics
pub use error::{CatalogError, CatalogResult};
pub use loader::{CompoundDataLoader, ResolutionStage, ResolvedCompound};
pub use phase::Phase;
pub use record::CompoundRecord;
pub use row::CatalogRow;
pub use store::{CatalogStore, MemoryCache, MemoryCatalog, StaticCache};
pub use transitions::{
    PhaseConsensus, PhaseTransitionPoint, consensus, expected_phase, phase_fraction,
    valid_transition,
};
