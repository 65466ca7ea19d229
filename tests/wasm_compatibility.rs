#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::collections::BTreeMap;

    use structviz::{Graph, impl_visualize_record};
    use wasm_bindgen_test::*;

    struct Point {
        x: i32,
        y: i32,
    }

    impl_visualize_record!(Point { x, y });

    #[wasm_bindgen_test]
    fn test_record_to_dot() {
        let point = Point { x: 3, y: -4 };

        let dot = structviz::to_dot(&point).expect("Failed to trace record");

        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains("<b>Point</b>"));
        assert!(dot.contains("-4"));
    }

    #[wasm_bindgen_test]
    fn test_map_with_composite_values() {
        let mut scores = BTreeMap::new();
        scores.insert("ada", vec![90, 95]);
        scores.insert("alan", vec![88]);

        let mut graph = Graph::new();
        graph.trace(&scores).expect("Failed to trace map");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edges().len(), 2);
        assert!(graph.to_dot().contains("Length: 2"));
    }

    #[wasm_bindgen_test]
    fn test_empty_vector() {
        let empty: Vec<u8> = Vec::new();

        let dot = structviz::to_dot(&empty).expect("Failed to trace empty vector");

        assert!(dot.contains("Empty"));
        assert!(!dot.contains("->"));
    }
}
