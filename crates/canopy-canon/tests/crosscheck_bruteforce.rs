//! Cross-checks the canonizer against exhaustive permutation search on
//! small random multigraphs: isomorphism verdicts must agree, the canonical
//! maps must realize the isomorphism, and the generated automorphism group
//! must have the order the brute force finds.

use std::collections::{BTreeMap, BTreeSet};

use canopy_canon::{canonize_multigraph, CanonizeOpts, VertexBijection};
use canopy_core::VertexId;
use canopy_graph::{
    gen_random_multigraph, random_relabeling, recolor_nth_vertex, standardize_multigraph,
    ColoredMultigraph,
};
use itertools::Itertools;

const PALETTE: [&str; 2] = ["red", "blue"];
const SEEDS: [u64; 8] = [1, 2, 3, 5, 8, 13, 21, 34];

fn brute_force_isomorphism(
    a: &ColoredMultigraph,
    b: &ColoredMultigraph,
) -> Option<BTreeMap<VertexId, VertexId>> {
    if a.order() != b.order() || a.size() != b.size() {
        return None;
    }
    let a_ids: Vec<VertexId> = a.vertex_ids().collect();
    let b_ids: Vec<VertexId> = b.vertex_ids().collect();
    let target = standardize_multigraph(b);
    for image in b_ids.iter().copied().permutations(b_ids.len()) {
        let map: BTreeMap<VertexId, VertexId> =
            a_ids.iter().copied().zip(image.iter().copied()).collect();
        let relabeled = a.relabel(&map).unwrap();
        if standardize_multigraph(&relabeled) == target {
            return Some(map);
        }
    }
    None
}

fn brute_force_automorphism_count(graph: &ColoredMultigraph) -> usize {
    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    let reference = standardize_multigraph(graph);
    ids.iter()
        .copied()
        .permutations(ids.len())
        .filter(|image| {
            let map: BTreeMap<VertexId, VertexId> =
                ids.iter().copied().zip(image.iter().copied()).collect();
            standardize_multigraph(&graph.relabel(&map).unwrap()) == reference
        })
        .count()
}

fn generated_group_order(ids: &[VertexId], generators: &[VertexBijection]) -> usize {
    let index_of: BTreeMap<VertexId, usize> = ids
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index))
        .collect();
    let generator_images: Vec<Vec<VertexId>> = generators
        .iter()
        .map(|generator| ids.iter().map(|&id| generator.apply(id).unwrap()).collect())
        .collect();

    let identity: Vec<VertexId> = ids.to_vec();
    let mut elements = BTreeSet::from([identity.clone()]);
    let mut frontier = vec![identity];
    while let Some(current) = frontier.pop() {
        for images in &generator_images {
            let composed: Vec<VertexId> = current
                .iter()
                .map(|&mid| images[index_of[&mid]])
                .collect();
            if elements.insert(composed.clone()) {
                frontier.push(composed);
            }
        }
    }
    elements.len()
}

#[test]
fn canonizer_and_brute_force_agree_on_isomorphic_pairs() {
    let opts = CanonizeOpts::default();
    for seed in SEEDS {
        let graph = gen_random_multigraph(5, 3, &PALETTE, seed).unwrap();
        let (relabeled, _) = random_relabeling(&graph, seed.wrapping_mul(31)).unwrap();

        let brute = brute_force_isomorphism(&graph, &relabeled);
        assert!(brute.is_some(), "relabeled copy must stay isomorphic");

        let first = canonize_multigraph(&graph, &opts).unwrap();
        let second = canonize_multigraph(&relabeled, &opts).unwrap();
        assert_eq!(first.canonical, second.canonical);

        // Composing the canonical maps yields a concrete isomorphism.
        let mut match_map = BTreeMap::new();
        for (canonical_label, input_label) in first.canonical_map.forward_map() {
            match_map.insert(
                *input_label,
                second.canonical_map.forward_map()[canonical_label],
            );
        }
        let mapped = graph.relabel(&match_map).unwrap();
        assert_eq!(
            standardize_multigraph(&mapped),
            standardize_multigraph(&relabeled)
        );
    }
}

#[test]
fn canonizer_and_brute_force_agree_on_non_isomorphic_pairs() {
    let opts = CanonizeOpts::default();
    for seed in SEEDS {
        let graph = gen_random_multigraph(5, 2, &PALETTE, seed).unwrap();
        let mut recolored = graph.clone();
        recolor_nth_vertex(&mut recolored, 0, "magenta").unwrap();

        assert!(brute_force_isomorphism(&graph, &recolored).is_none());
        let first = canonize_multigraph(&graph, &opts).unwrap();
        let second = canonize_multigraph(&recolored, &opts).unwrap();
        assert_ne!(first.canonical, second.canonical);
    }
}

#[test]
fn generated_group_matches_brute_force_order() {
    let opts = CanonizeOpts::default();
    for seed in SEEDS {
        let graph = gen_random_multigraph(5, 3, &PALETTE, seed).unwrap();
        let result = canonize_multigraph(&graph, &opts).unwrap();
        let ids: Vec<VertexId> = graph.vertex_ids().collect();
        assert_eq!(
            generated_group_order(&ids, &result.generators),
            brute_force_automorphism_count(&graph),
            "seed {seed}"
        );
    }
}
