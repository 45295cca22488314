//! Default simple-graph canonizer: equitable refinement plus
//! individualization search.
//!
//! The backend refines the input color partition until it is equitable
//! (every vertex of a cell sees the same number of neighbors in every other
//! cell), then branches on the members of the first non-singleton cell.
//! Discrete partitions are leaves; each leaf is a candidate labeling and the
//! minimal relabeled edge list over all leaves is the canonical one. Both
//! refinement and target selection depend only on the partition structure
//! and the adjacency, so the leaf set is equivariant under isomorphism and
//! the minimum is a canonical choice.
//!
//! Automorphisms fall out of the search: a leaf whose relabeled edge list
//! equals the first leaf's differs from it by an automorphism. Discovered
//! generators feed a union-find orbit partition used to prune sibling
//! branches at ancestors of the first leaf, where that pruning is sound.
//! Elsewhere the search is exhaustive; the graphs this library targets are
//! diagram-sized, so correctness is favored over search-tree engineering.

use std::collections::{BTreeMap, BTreeSet};

use canopy_core::errors::{CanonError, ErrorInfo};

use crate::sparse::{CanonicalLabeling, SimpleCanonizer, SparseGraph};

/// In-tree refinement-and-search canonizer.
///
/// Stateless and reentrant: every call owns its buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefinementCanonizer;

impl SimpleCanonizer for RefinementCanonizer {
    fn canonize(
        &self,
        graph: &SparseGraph,
        lab: &[usize],
        ptn: &[u32],
    ) -> Result<CanonicalLabeling, CanonError> {
        let cells = check_input(graph, lab, ptn)?;
        if graph.nv == 0 {
            return Ok(CanonicalLabeling {
                lab: Vec::new(),
                generators: Vec::new(),
            });
        }

        let adjacency: Vec<Vec<usize>> = (0..graph.nv)
            .map(|i| graph.neighbors(i).to_vec())
            .collect();
        let mut search = Search::new(adjacency);
        search.explore(cells);

        let best = search.best.ok_or_else(|| {
            CanonError::Canonizer(ErrorInfo::new(
                "no-leaf",
                "search terminated without reaching a discrete partition",
            ))
        })?;
        Ok(CanonicalLabeling {
            lab: best.lab,
            generators: search.generators.into_iter().collect(),
        })
    }
}

fn check_input(
    graph: &SparseGraph,
    lab: &[usize],
    ptn: &[u32],
) -> Result<Vec<Vec<usize>>, CanonError> {
    if lab.len() != graph.nv || ptn.len() != graph.nv {
        return Err(CanonError::Canonizer(
            ErrorInfo::new("partition-length", "lab/ptn length does not match vertex count")
                .with_context("nv", graph.nv.to_string())
                .with_context("lab_len", lab.len().to_string()),
        ));
    }
    let mut seen = vec![false; graph.nv];
    for &vertex in lab {
        if vertex >= graph.nv || seen[vertex] {
            return Err(CanonError::Canonizer(
                ErrorInfo::new("partition-labels", "lab is not a permutation of the vertices")
                    .with_context("vertex", vertex.to_string()),
            ));
        }
        seen[vertex] = true;
    }
    if graph.nv > 0 && ptn[graph.nv - 1] != 0 {
        return Err(CanonError::Canonizer(ErrorInfo::new(
            "partition-terminator",
            "ptn must end with a cell terminator",
        )));
    }
    if graph.v.len() != graph.nv || graph.d.len() != graph.nv {
        return Err(CanonError::Canonizer(ErrorInfo::new(
            "adjacency-length",
            "offset/degree arrays do not match vertex count",
        )));
    }
    for i in 0..graph.nv {
        let end = graph.v[i].checked_add(graph.d[i]).filter(|&end| end <= graph.e.len());
        if end.is_none() {
            return Err(CanonError::Canonizer(
                ErrorInfo::new("adjacency-bounds", "neighbor list exceeds edge array")
                    .with_context("vertex", i.to_string()),
            ));
        }
        for &neighbor in graph.neighbors(i) {
            if neighbor >= graph.nv {
                return Err(CanonError::Canonizer(
                    ErrorInfo::new("neighbor-range", "neighbor index out of range")
                        .with_context("vertex", i.to_string())
                        .with_context("neighbor", neighbor.to_string()),
                ));
            }
        }
    }

    let mut cells = Vec::new();
    let mut current = Vec::new();
    for (&vertex, &marker) in lab.iter().zip(ptn) {
        current.push(vertex);
        if marker == 0 {
            cells.push(std::mem::take(&mut current));
        }
    }
    Ok(cells)
}

struct Leaf {
    encoding: Vec<u64>,
    lab: Vec<usize>,
}

struct Search {
    adjacency: Vec<Vec<usize>>,
    n: usize,
    first: Option<Leaf>,
    best: Option<Leaf>,
    generators: BTreeSet<Vec<usize>>,
    orbit_parent: Vec<usize>,
}

impl Search {
    fn new(adjacency: Vec<Vec<usize>>) -> Self {
        let n = adjacency.len();
        Self {
            adjacency,
            n,
            first: None,
            best: None,
            generators: BTreeSet::new(),
            orbit_parent: (0..n).collect(),
        }
    }

    fn explore(&mut self, cells: Vec<Vec<usize>>) {
        let cells = self.refine(cells);
        let target = cells.iter().position(|cell| cell.len() > 1);
        match target {
            None => self.record_leaf(&cells),
            Some(index) => {
                // Orbit pruning is sound only at ancestors of the first
                // leaf; those are exactly the nodes created before it exists.
                let ancestor_of_first = self.first.is_none();
                let members = cells[index].clone();
                let mut tried: Vec<usize> = Vec::new();
                for &branch in &members {
                    if ancestor_of_first
                        && tried.iter().any(|&other| self.same_orbit(other, branch))
                    {
                        continue;
                    }
                    self.explore(individualize(&cells, index, branch));
                    tried.push(branch);
                }
            }
        }
    }

    /// Splits cells by neighbor counts against every cell until stable.
    fn refine(&self, mut cells: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        let mut splitter = 0;
        while splitter < cells.len() {
            let mut counts = vec![0usize; self.n];
            for &member in &cells[splitter] {
                for &neighbor in &self.adjacency[member] {
                    counts[neighbor] += 1;
                }
            }

            let mut next = Vec::with_capacity(cells.len());
            let mut split_any = false;
            for cell in &cells {
                if cell.len() == 1 {
                    next.push(cell.clone());
                    continue;
                }
                let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
                for &member in cell {
                    groups.entry(counts[member]).or_default().push(member);
                }
                if groups.len() == 1 {
                    next.push(cell.clone());
                } else {
                    split_any = true;
                    next.extend(groups.into_values());
                }
            }

            if split_any {
                cells = next;
                splitter = 0;
            } else {
                splitter += 1;
            }
        }
        cells
    }

    fn record_leaf(&mut self, cells: &[Vec<usize>]) {
        let lab: Vec<usize> = cells.iter().map(|cell| cell[0]).collect();
        let encoding = self.leaf_encoding(&lab);

        if self.first.is_none() {
            self.first = Some(Leaf {
                encoding: encoding.clone(),
                lab: lab.clone(),
            });
            self.best = Some(Leaf { encoding, lab });
            return;
        }

        let generator = match &self.first {
            Some(first) if first.encoding == encoding => {
                let mut generator = vec![0usize; self.n];
                for (position, &vertex) in lab.iter().enumerate() {
                    generator[first.lab[position]] = vertex;
                }
                let nontrivial = generator.iter().enumerate().any(|(i, &image)| i != image);
                nontrivial.then_some(generator)
            }
            _ => None,
        };
        if let Some(generator) = generator {
            self.merge_orbits(&generator);
            self.generators.insert(generator);
        }

        if self
            .best
            .as_ref()
            .is_some_and(|best| encoding < best.encoding)
        {
            self.best = Some(Leaf { encoding, lab });
        }
    }

    /// Edge list relabeled through the leaf order, the leaf's sort key.
    fn leaf_encoding(&self, lab: &[usize]) -> Vec<u64> {
        let mut position = vec![0usize; self.n];
        for (index, &vertex) in lab.iter().enumerate() {
            position[vertex] = index;
        }
        let mut encoding = Vec::new();
        for (vertex, neighbors) in self.adjacency.iter().enumerate() {
            for &neighbor in neighbors.iter().filter(|&&neighbor| vertex < neighbor) {
                let a = position[vertex].min(position[neighbor]) as u64;
                let b = position[vertex].max(position[neighbor]) as u64;
                encoding.push((a << 32) | b);
            }
        }
        encoding.sort_unstable();
        encoding
    }

    fn same_orbit(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    fn merge_orbits(&mut self, generator: &[usize]) {
        for (index, &image) in generator.iter().enumerate() {
            self.union(index, image);
        }
    }

    fn find(&mut self, index: usize) -> usize {
        if self.orbit_parent[index] != index {
            let root = self.find(self.orbit_parent[index]);
            self.orbit_parent[index] = root;
        }
        self.orbit_parent[index]
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.orbit_parent[root_b] = root_a;
        }
    }
}

fn individualize(cells: &[Vec<usize>], index: usize, branch: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::with_capacity(cells.len() + 1);
    for (position, cell) in cells.iter().enumerate() {
        if position == index {
            out.push(vec![branch]);
            out.push(cell.iter().copied().filter(|&v| v != branch).collect());
        } else {
            out.push(cell.clone());
        }
    }
    out
}
