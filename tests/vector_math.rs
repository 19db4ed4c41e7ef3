use graph_retriever::content::Content;
use graph_retriever::math::{cosine, top_k};
use proptest::prelude::*;

fn small_vec() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, 1..6)
}

proptest! {
    #[test]
    fn cosine_is_symmetric(a in small_vec(), b in small_vec()) {
        let len = a.len().min(b.len());
        let a = &a[..len];
        let b = &b[..len];
        prop_assert!((cosine(a, b) - cosine(b, a)).abs() < 1e-4);
    }

    #[test]
    fn cosine_is_always_in_unit_range_or_zero(a in small_vec(), b in small_vec()) {
        let len = a.len().min(b.len());
        let sim = cosine(&a[..len], &b[..len]);
        prop_assert!(sim.is_finite());
        prop_assert!(sim >= -1.0001 && sim <= 1.0001);
    }

    #[test]
    fn top_k_never_returns_more_than_k(embedding in small_vec(), k in 0usize..5) {
        let contents: Vec<Content> = (0..8)
            .map(|i| Content::new(format!("d{i}"), "text", embedding.clone()))
            .collect();
        let ranked = top_k(contents, &embedding, k);
        prop_assert!(ranked.len() <= k);
    }

    #[test]
    fn top_k_is_idempotent_under_reapplication(embedding in small_vec(), k in 1usize..5) {
        let contents: Vec<Content> = (0..8)
            .map(|i| Content::new(format!("d{i}"), "text", embedding.clone()))
            .collect();
        let once = top_k(contents, &embedding, k);
        let twice = top_k(once.clone(), &embedding, k);
        let once_ids: Vec<&str> = once.iter().map(|c| c.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(once_ids, twice_ids);
    }
}
