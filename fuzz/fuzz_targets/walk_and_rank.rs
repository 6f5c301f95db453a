#![no_main]

use libfuzzer_sys::fuzz_target;
use skein_analytics::{
    BetweennessConfig, PageRankConfig, WalkConfig, betweenness_centrality, pagerank, random_walks,
};
use skein_core::{EdgeRecord, Graph};

// First byte: walk depth and seed; then pairs of vertex bytes.
fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let list: Vec<EdgeRecord> = rest
        .chunks_exact(2)
        .map(|c| EdgeRecord::new(i64::from(c[0] % 16), i64::from(c[1] % 16)))
        .collect();
    let Ok(g) = Graph::build(&list, head & 1 == 0) else {
        return;
    };

    let walk = WalkConfig {
        max_depth: usize::from(head % 8) + 1,
        seed: u64::from(head),
        use_weights: true,
    };
    let seeds = g.vertex_ids().to_vec();
    let walks = random_walks(&g, &seeds, &walk).expect("seeds come from the graph");
    assert_eq!(walks.seed_offsets.len(), seeds.len() + 1);
    assert_eq!(walks.seed_offsets.last().copied(), Some(walks.total_edges()));

    let bc = betweenness_centrality(&g, &BetweennessConfig::default()).expect("betweenness");
    assert!(bc.values().all(|s| s.is_finite() && *s >= 0.0));

    if let Ok(pr) = pagerank(&g, &PageRankConfig::default()) {
        let total: f64 = pr.scores.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
});
