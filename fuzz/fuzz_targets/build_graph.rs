#![no_main]

use libfuzzer_sys::fuzz_target;
use skein_core::{EdgeRecord, Graph, GraphOptions};

// Every 3 bytes: source, destination, weight byte (0xFF means "no weight").
fuzz_target!(|data: &[u8]| {
    let list: Vec<EdgeRecord> = data
        .chunks_exact(3)
        .map(|c| {
            let (src, dst) = (i64::from(c[0] % 32), i64::from(c[1] % 32));
            match c[2] {
                0xFF => EdgeRecord::new(src, dst),
                w => EdgeRecord::weighted(src, dst, f64::from(w) / 16.0),
            }
        })
        .collect();

    for directed in [true, false] {
        let options = GraphOptions {
            directed,
            ..GraphOptions::default()
        };
        let Ok(g) = Graph::build_with(&list, &options) else {
            assert!(list.is_empty());
            continue;
        };

        let n = g.num_vertices();
        assert_eq!(g.out_csr().offsets().len(), n + 1);
        assert_eq!(g.in_csr().num_entries(), g.out_csr().num_entries());
        for v in 0..n {
            let id = g.vertex_id(v).expect("index in range");
            assert_eq!(g.vertex_index(id).expect("id known"), v);
        }
    }
});
