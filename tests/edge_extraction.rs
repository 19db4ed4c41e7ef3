mod common;

use common::sample_corpus;
use graph_retriever::edge::EdgeSpec;
use graph_retriever::extractor::{EdgeFunction, MetadataEdgeFunction};

#[test]
fn extraction_over_the_full_corpus_is_idempotent() {
    let edge_fn = MetadataEdgeFunction::new(vec![
        EdgeSpec::new("topic", "topic").unwrap(),
        EdgeSpec::new("mentions", "$id").unwrap(),
    ])
    .unwrap();

    for content in sample_corpus() {
        let first = edge_fn.extract(&content);
        let second = edge_fn.extract(&content);
        assert_eq!(first.incoming, second.incoming);
        assert_eq!(first.outgoing, second.outgoing);
    }
}

#[test]
fn mentions_edge_is_directional_via_id_sentinel() {
    let edge_fn = MetadataEdgeFunction::new(vec![EdgeSpec::new("mentions", "$id").unwrap()]).unwrap();
    let corpus = sample_corpus();

    let d2 = corpus.iter().find(|c| c.id == "d2").unwrap();
    let edges = edge_fn.extract(d2);
    assert_eq!(edges.outgoing.len(), 1); // d2 mentions d3

    let d3 = corpus.iter().find(|c| c.id == "d3").unwrap();
    let edges = edge_fn.extract(d3);
    assert!(edges.outgoing.is_empty()); // d3 mentions nothing
}
