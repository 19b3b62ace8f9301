use chrono::{Duration, Utc};
use proptest::prelude::*;

use synapse_activation::scorer::{self, affinity, ScorerInput};
use synapse_core::config::{ActivationConfig, ComponentWeights};
use synapse_core::model::{
    ActivationState, Classification, MemoryMetadata, QueryContext, Scope, Score,
};

fn make_state(
    importance: f64,
    confidence: f64,
    contradicted: bool,
    access_count: u64,
    days_old: i64,
    negative_feedback: u32,
) -> ActivationState {
    let now = Utc::now();
    ActivationState {
        memory_id: "m1".to_string(),
        organization_id: "org-1".to_string(),
        base_importance: Score::new(importance),
        confidence: Score::new(confidence),
        contradicted,
        risk_factor: Score::default(),
        access_count,
        last_accessed_at: None,
        created_at: now - Duration::days(days_old),
        positive_feedback: 0,
        negative_feedback,
    }
}

fn make_query(scope: Scope) -> QueryContext {
    QueryContext {
        organization_id: "org-1".to_string(),
        user_id: "u1".to_string(),
        query_text: "q".to_string(),
        scope,
        episode_id: None,
        goal_id: None,
        top_k: 10,
        now: Utc::now(),
    }
}

fn arb_scope() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Private),
        Just(Scope::Project),
        Just(Scope::Team),
        Just(Scope::Organization),
    ]
}

fn arb_classification() -> impl Strategy<Value = Classification> {
    prop_oneof![
        Just(Classification::Public),
        Just(Classification::Internal),
        Just(Classification::Confidential),
        Just(Classification::Restricted),
    ]
}

// ── Bounds ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_component_and_activation_in_unit_range(
        similarity in -2.0f64..3.0,
        importance in 0.0f64..1.0,
        confidence in 0.0f64..1.0,
        contradicted in any::<bool>(),
        access_count in 0u64..100_000,
        days_old in 0i64..3650,
        negative_feedback in 0u32..50,
        evidence_count in 0u32..200,
        neighbor in proptest::option::of(-0.5f64..1.5),
        query_scope in arb_scope(),
        memory_scope in arb_scope(),
        classification in arb_classification(),
    ) {
        let state = make_state(importance, confidence, contradicted, access_count, days_old, negative_feedback);
        let metadata = MemoryMetadata {
            scope: memory_scope,
            episode_id: None,
            goal_id: None,
            classification,
            evidence_count,
        };
        let cfg = ActivationConfig::default();
        let query = make_query(query_scope);

        let components = scorer::compute_components(
            &ScorerInput {
                state: &state,
                metadata: &metadata,
                similarity,
                neighbor_weight: neighbor,
            },
            &query,
            &cfg,
        );

        for (name, value) in [
            ("rel", components.rel),
            ("rec", components.rec),
            ("freq", components.freq),
            ("imp", components.imp),
            ("conf", components.conf),
            ("ctx", components.ctx),
            ("prov", components.prov),
            ("risk", components.risk),
        ] {
            prop_assert!((0.0..=1.0).contains(&value), "{} out of range: {}", name, value);
        }
        if let Some(nbr) = components.nbr {
            prop_assert!((0.0..=1.0).contains(&nbr));
        }

        let activation = scorer::combine(&components, &ComponentWeights::default());
        prop_assert!((0.0..=1.0).contains(&activation));
    }
}

// ── Monotonicity ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn activation_is_monotone_in_importance(
        low in 0.0f64..0.5,
        delta in 0.01f64..0.5,
        similarity in 0.0f64..1.0,
    ) {
        let cfg = ActivationConfig::default();
        let query = make_query(Scope::Team);
        let metadata = MemoryMetadata::default();

        let state_low = make_state(low, 0.8, false, 0, 0, 0);
        let state_high = make_state(low + delta, 0.8, false, 0, 0, 0);

        let score = |state: &ActivationState| {
            let components = scorer::compute_components(
                &ScorerInput { state, metadata: &metadata, similarity, neighbor_weight: None },
                &query,
                &cfg,
            );
            scorer::combine(&components, &ComponentWeights::default())
        };

        prop_assert!(score(&state_high) > score(&state_low));
    }

    #[test]
    fn recency_strictly_decreases_with_age(
        age in 0.0f64..1000.0,
        step in 0.1f64..100.0,
    ) {
        use synapse_activation::scorer::factors;
        let newer = factors::recency(age, 30.0);
        let older = factors::recency(age + step, 30.0);
        prop_assert!(older < newer);
    }
}

// ── Scope affinity constants ─────────────────────────────────────────────

proptest! {
    #[test]
    fn scope_affinity_matches_contract(
        query_scope in arb_scope(),
        memory_scope in arb_scope(),
    ) {
        let affinity = affinity::scope_affinity(query_scope, memory_scope);
        if query_scope == memory_scope {
            prop_assert_eq!(affinity, 1.0);
        } else if query_scope.breadth() > memory_scope.breadth() {
            prop_assert_eq!(affinity, 0.7);
        } else {
            prop_assert!(affinity < 0.5);
        }
    }
}
