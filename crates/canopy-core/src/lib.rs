#![deny(missing_docs)]

//! Core attribute, identifier, and error types for the canopy
//! canonicalization engine.

use serde::{Deserialize, Serialize};

pub mod attrs;
pub mod errors;
pub mod rng;
mod value;

pub use attrs::AttrSet;
pub use errors::{CanonError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};
pub use value::AttrValue;

/// Identifier for a vertex within a colored graph.
///
/// Identifiers are totally ordered and hashable but need not be contiguous
/// or start at zero; the canonicalization drivers zero-index them through
/// their ascending enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}
