use std::collections::BTreeMap;

use canopy_core::errors::{CanonError, ErrorInfo};
use canopy_core::VertexId;
use serde::{Deserialize, Serialize};

/// A bijection of vertex identifiers stored together with its inverse.
///
/// Canonical maps and automorphism generators are both carried as values of
/// this type. Construction checks bijectivity, so composing the forward and
/// inverse directions is always the identity on the support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<VertexId, VertexId>", into = "BTreeMap<VertexId, VertexId>")]
pub struct VertexBijection {
    forward: BTreeMap<VertexId, VertexId>,
    inverse: BTreeMap<VertexId, VertexId>,
}

impl VertexBijection {
    /// Builds a bijection from its forward direction.
    ///
    /// Fails with an internal error if two keys share a target; the maps the
    /// drivers construct are bijective unless an invariant was violated.
    pub fn from_forward(forward: BTreeMap<VertexId, VertexId>) -> Result<Self, CanonError> {
        let mut inverse = BTreeMap::new();
        for (&key, &value) in &forward {
            if inverse.insert(value, key).is_some() {
                return Err(CanonError::Internal(
                    ErrorInfo::new("not-a-bijection", "vertex map is not injective")
                        .with_context("target", value.as_raw().to_string()),
                ));
            }
        }
        Ok(Self { forward, inverse })
    }

    /// Returns the identity bijection on the given identifiers.
    pub fn identity(ids: impl IntoIterator<Item = VertexId>) -> Self {
        let forward: BTreeMap<VertexId, VertexId> = ids.into_iter().map(|id| (id, id)).collect();
        let inverse = forward.clone();
        Self { forward, inverse }
    }

    /// Applies the forward direction.
    pub fn apply(&self, id: VertexId) -> Option<VertexId> {
        self.forward.get(&id).copied()
    }

    /// Applies the inverse direction.
    pub fn inverse_of(&self, id: VertexId) -> Option<VertexId> {
        self.inverse.get(&id).copied()
    }

    /// Returns the forward map.
    pub fn forward_map(&self) -> &BTreeMap<VertexId, VertexId> {
        &self.forward
    }

    /// Returns the inverse map.
    pub fn inverse_map(&self) -> &BTreeMap<VertexId, VertexId> {
        &self.inverse
    }

    /// Returns the inverse bijection.
    pub fn invert(&self) -> Self {
        Self {
            forward: self.inverse.clone(),
            inverse: self.forward.clone(),
        }
    }

    /// Returns whether every identifier maps to itself.
    pub fn is_identity(&self) -> bool {
        self.forward.iter().all(|(key, value)| key == value)
    }

    /// Returns the number of identifiers in the support.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns whether the support is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl TryFrom<BTreeMap<VertexId, VertexId>> for VertexBijection {
    type Error = CanonError;

    fn try_from(forward: BTreeMap<VertexId, VertexId>) -> Result<Self, Self::Error> {
        Self::from_forward(forward)
    }
}

impl From<VertexBijection> for BTreeMap<VertexId, VertexId> {
    fn from(bijection: VertexBijection) -> Self {
        bijection.forward
    }
}
