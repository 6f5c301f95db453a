//! Property tests for renumbering and CSR construction.
//!
//! Edge lists are generated over a small ID space so that parallel edges,
//! self-loops, and repeated IDs show up frequently.

use std::collections::HashSet;

use proptest::prelude::*;

use skein_core::{EdgeRecord, Graph, GraphOptions, VertexId};

fn edge_list() -> impl Strategy<Value = Vec<EdgeRecord>> {
    prop::collection::vec((0i64..12, 0i64..12), 1..40)
        .prop_map(|pairs| pairs.into_iter().map(|(s, d)| EdgeRecord::new(s, d)).collect())
}

fn weighted_edge_list() -> impl Strategy<Value = Vec<EdgeRecord>> {
    prop::collection::vec((0i64..10, 0i64..10, 0.0f64..5.0), 1..30).prop_map(|triples| {
        triples
            .into_iter()
            .map(|(s, d, w)| EdgeRecord::weighted(s, d, w))
            .collect()
    })
}

fn sorted(mut v: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    v.sort_unstable();
    v
}

proptest! {
    #[test]
    fn renumbering_is_a_bijection(list in edge_list()) {
        let g = Graph::build(&list, true).expect("build");
        let index = g.index();

        let distinct: HashSet<&VertexId> = list
            .iter()
            .flat_map(|e| [&e.source, &e.destination])
            .collect();
        prop_assert_eq!(index.len(), distinct.len());

        for id in distinct {
            let i = index.translate_in(id).expect("seen id");
            prop_assert!(i < index.len());
            prop_assert_eq!(index.translate_out(i).expect("in range"), id);
        }
        for i in 0..index.len() {
            let id = index.translate_out(i).expect("in range");
            prop_assert_eq!(index.translate_in(id).expect("known"), i);
        }
    }

    #[test]
    fn offsets_are_monotone_and_complete(list in edge_list(), directed in any::<bool>()) {
        let g = Graph::build(&list, directed).expect("build");
        for csr in [g.out_csr(), g.in_csr()] {
            let offsets = csr.offsets();
            prop_assert_eq!(offsets.len(), g.num_vertices() + 1);
            prop_assert_eq!(offsets[0], 0);
            prop_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(offsets[g.num_vertices()], csr.targets().len());
        }
        let expected = if directed { list.len() } else { 2 * list.len() };
        prop_assert_eq!(g.num_adjacency_entries(), expected);
    }

    #[test]
    fn in_edges_are_the_transpose(list in edge_list()) {
        let g = Graph::build(&list, true).expect("build");
        let n = g.num_vertices();
        let forward: Vec<(usize, usize)> = (0..n)
            .flat_map(|v| g.neighbors(v).map(move |(w, _)| (v, w)))
            .collect();
        let backward: Vec<(usize, usize)> = (0..n)
            .flat_map(|v| g.in_neighbors(v).map(move |(u, _)| (u, v)))
            .collect();
        prop_assert_eq!(sorted(forward), sorted(backward));
    }

    #[test]
    fn degree_sums_match_edge_counts(list in edge_list()) {
        let directed = Graph::build(&list, true).expect("build");
        let out_sum: usize = (0..directed.num_vertices()).map(|v| directed.out_degree(v)).sum();
        prop_assert_eq!(out_sum, list.len());

        let undirected = Graph::build_with(&list, &GraphOptions::undirected()).expect("build");
        let sum: usize = (0..undirected.num_vertices()).map(|v| undirected.degree(v)).sum();
        prop_assert_eq!(sum, 2 * list.len());
    }

    #[test]
    fn weights_follow_their_edges(list in weighted_edge_list()) {
        let g = Graph::build(&list, true).expect("build");
        prop_assert!(g.is_weighted());
        let mut expected: Vec<(usize, usize, u64)> = list
            .iter()
            .map(|e| {
                (
                    g.vertex_index(&e.source).expect("src"),
                    g.vertex_index(&e.destination).expect("dst"),
                    e.weight.expect("weighted").to_bits(),
                )
            })
            .collect();
        let mut stored: Vec<(usize, usize, u64)> = (0..g.num_vertices())
            .flat_map(|v| g.neighbors(v).map(move |(w, wt)| (v, w, wt.to_bits())))
            .collect();
        expected.sort_unstable();
        stored.sort_unstable();
        prop_assert_eq!(expected, stored);
    }
}

#[test]
fn string_ids_keep_first_appearance_order() {
    let list = vec![
        EdgeRecord::new("carol", "alice"),
        EdgeRecord::new("bob", "carol"),
    ];
    let g = Graph::build(&list, false).expect("build");
    assert_eq!(
        g.vertex_ids(),
        &[
            VertexId::from("carol"),
            VertexId::from("alice"),
            VertexId::from("bob")
        ]
    );
}
