use proptest::prelude::*;

use synapse_core::model::{CoactivationEdge, MemoryPair};

// ── Weight curve ─────────────────────────────────────────────────────────

// Ranges keep λ·count below the regime where 1 − exp(−x) rounds to 1.0
// in f64; the mathematical bound is strict but the float one is not.
proptest! {
    #[test]
    fn weight_bounded_below_one(count in 0u64..200, lambda in 0.01f64..0.15) {
        let w = CoactivationEdge::weight_for(count, lambda);
        prop_assert!((0.0..1.0).contains(&w), "weight {} at count {}", w, count);
    }

    #[test]
    fn weight_strictly_increasing(count in 0u64..200, lambda in 0.01f64..0.15) {
        let w0 = CoactivationEdge::weight_for(count, lambda);
        let w1 = CoactivationEdge::weight_for(count + 1, lambda);
        prop_assert!(w1 > w0);
    }
}

// ── Canonical pairs ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn pair_canonicalization_is_symmetric(x in "[a-z]{1,8}", y in "[a-z]{1,8}") {
        prop_assume!(x != y);
        let forward = MemoryPair::new(x.clone(), y.clone()).unwrap();
        let reverse = MemoryPair::new(y, x).unwrap();
        prop_assert_eq!(forward.a(), reverse.a());
        prop_assert_eq!(forward.b(), reverse.b());
        prop_assert!(forward.a() < forward.b());
    }

    #[test]
    fn self_loop_always_rejected(id in "[a-z]{1,8}") {
        prop_assert!(MemoryPair::new(id.clone(), id).is_err());
    }
}
