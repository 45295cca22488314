//! Color partition construction for the simple-graph canonizer.

use std::collections::BTreeMap;

use canopy_core::{AttrSet, AttrValue};
use serde::{Deserialize, Serialize};

/// A `(key, value)` pair imposing a priority among color cells.
///
/// Cells whose attribute set contains `key` with exactly `value` sort before
/// cells that do not, with earlier conditions taking precedence. The
/// multigraph driver uses a `kind=vertex` condition to force every
/// original-vertex cell ahead of every edge-node cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCondition {
    /// Attribute key to probe.
    pub key: String,
    /// Value the attribute must equal for a cell to match.
    pub value: AttrValue,
}

impl SortCondition {
    /// Creates a new sort condition.
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns whether the attribute set matches the condition.
    pub fn matches(&self, attrs: &AttrSet) -> bool {
        attrs.contains_pair(&self.key, &self.value)
    }
}

/// An ordered color partition in the sparse canonizer's `(lab, ptn)` form.
///
/// `lab` concatenates the cells; `ptn[i]` is `1` except at the last position
/// of each cell, which is `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Vertex indices, cell by cell.
    pub lab: Vec<usize>,
    /// Cell terminator markers aligned with `lab`.
    pub ptn: Vec<u32>,
}

impl Partition {
    /// Splits the `(lab, ptn)` encoding back into explicit cells.
    pub fn cells(&self) -> Vec<Vec<usize>> {
        let mut cells = Vec::new();
        let mut current = Vec::new();
        for (&vertex, &marker) in self.lab.iter().zip(&self.ptn) {
            current.push(vertex);
            if marker == 0 {
                cells.push(std::mem::take(&mut current));
            }
        }
        cells
    }
}

/// Groups zero-indexed vertices into an ordered color partition.
///
/// Vertices share a cell iff their attribute sets are equal. Cells are
/// ordered by the sort-condition match vector (a match sorts first, earlier
/// conditions more significant), ties broken by ascending attribute-set
/// order; members of a cell ascend.
pub fn color_partition(colors: &[AttrSet], conditions: &[SortCondition]) -> Partition {
    let mut cells: BTreeMap<&AttrSet, Vec<usize>> = BTreeMap::new();
    for (index, attrs) in colors.iter().enumerate() {
        cells.entry(attrs).or_default().push(index);
    }

    // BTreeMap iteration gives ascending attribute-set order; the stable
    // sort below reorders only across distinct match vectors.
    let mut ordered: Vec<(Vec<u8>, Vec<usize>)> = cells
        .into_iter()
        .map(|(attrs, members)| {
            let rank: Vec<u8> = conditions
                .iter()
                .map(|condition| u8::from(!condition.matches(attrs)))
                .collect();
            (rank, members)
        })
        .collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));

    let mut lab = Vec::with_capacity(colors.len());
    let mut ptn = Vec::with_capacity(colors.len());
    for (_, members) in ordered {
        let last = members.len() - 1;
        for (offset, vertex) in members.into_iter().enumerate() {
            lab.push(vertex);
            ptn.push(u32::from(offset != last));
        }
    }
    Partition { lab, ptn }
}
