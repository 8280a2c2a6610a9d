//! Data structures for StoreZen.
//!
//! In-memory indexes built over a catalog snapshot. They are single-owner:
//! mutation takes `&mut self`, lookups take `&self`, and nothing here locks.

pub mod prefix_index;

pub use prefix_index::PrefixIndex;
