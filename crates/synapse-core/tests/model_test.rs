use chrono::{Duration, Utc};

use synapse_core::config::{ComponentWeights, SynapseConfig};
use synapse_core::errors::GraphError;
use synapse_core::model::{ActivationState, CoactivationEdge, MemoryPair, Score};

// ── Score ────────────────────────────────────────────────────────────────

#[test]
fn score_clamps_out_of_range_input() {
    assert_eq!(Score::new(1.7).value(), 1.0);
    assert_eq!(Score::new(-0.3).value(), 0.0);
    assert_eq!(Score::new(0.42).value(), 0.42);
}

// ── MemoryPair ───────────────────────────────────────────────────────────

#[test]
fn pair_is_canonically_ordered() {
    let pair = MemoryPair::new("zulu", "alpha").unwrap();
    assert_eq!(pair.a(), "alpha");
    assert_eq!(pair.b(), "zulu");

    let same = MemoryPair::new("alpha", "zulu").unwrap();
    assert_eq!((same.a(), same.b()), (pair.a(), pair.b()));
}

#[test]
fn self_loop_is_rejected() {
    let err = MemoryPair::new("m1", "m1").unwrap_err();
    assert!(matches!(err, GraphError::SelfLoop { .. }));
}

// ── Edge weight curve ────────────────────────────────────────────────────

#[test]
fn weight_is_near_zero_at_count_zero() {
    assert!(CoactivationEdge::weight_for(0, 0.1).abs() < 1e-9);
}

#[test]
fn weight_at_ten_coactivations_is_0_632() {
    let w = CoactivationEdge::weight_for(10, 0.1);
    assert!((w - 0.632).abs() < 1e-3, "weight was {w}");
}

#[test]
fn weight_is_strictly_increasing_and_below_one() {
    let mut prev = -1.0;
    for count in 0..200 {
        let w = CoactivationEdge::weight_for(count, 0.1);
        assert!(w > prev, "not increasing at count {count}");
        assert!(w < 1.0, "reached 1.0 at count {count}");
        prev = w;
    }
}

// ── ActivationState ──────────────────────────────────────────────────────

#[test]
fn default_state_matches_lazy_creation_contract() {
    let now = Utc::now();
    let state = ActivationState::new_default("org-1", "m1", now);
    assert_eq!(state.base_importance.value(), 0.5);
    assert_eq!(state.confidence.value(), 0.8);
    assert!(!state.contradicted);
    assert_eq!(state.access_count, 0);
    assert!(state.last_accessed_at.is_none());
}

#[test]
fn age_uses_most_recent_of_access_and_creation() {
    let now = Utc::now();
    let mut state = ActivationState::new_default("org-1", "m1", now - Duration::days(30));
    assert!((state.age_days(now) - 30.0).abs() < 0.01);

    state.last_accessed_at = Some(now - Duration::days(2));
    assert!((state.age_days(now) - 2.0).abs() < 0.01);
}

// ── Config ───────────────────────────────────────────────────────────────

#[test]
fn tenant_weight_override_is_isolated() {
    let mut config = SynapseConfig::default();
    let custom = ComponentWeights {
        rel: 1.0,
        ..ComponentWeights::default()
    };
    config
        .activation
        .tenant_weights
        .insert("org-special".to_string(), custom.clone());

    assert_eq!(config.weights_for("org-special"), &custom);
    assert_eq!(config.weights_for("org-other"), &ComponentWeights::default());
}

// ── Property checks ──────────────────────────────────────────────────────

proptest::proptest! {
    #[test]
    fn score_always_lands_in_unit_range(value in -1e6f64..1e6) {
        let s = Score::new(value);
        proptest::prop_assert!((0.0..=1.0).contains(&s.value()));
    }

    // Constrained so λ·count stays well below the regime where
    // 1 − exp(−x) rounds to 1.0 in f64.
    #[test]
    fn weight_monotone_for_any_lambda(count in 0u64..100, lambda in 0.001f64..0.1) {
        let lower = CoactivationEdge::weight_for(count, lambda);
        let upper = CoactivationEdge::weight_for(count + 1, lambda);
        proptest::prop_assert!(upper > lower);
        proptest::prop_assert!(upper < 1.0);
    }
}

#[test]
fn config_parses_from_toml_with_partial_sections() {
    let config = SynapseConfig::from_toml_str(
        r#"
        [graph]
        top_n = 5
        lambda = 0.2

        [activation]
        recency_half_life_days = 14.0
        "#,
    )
    .unwrap();

    assert_eq!(config.graph.top_n, 5);
    assert_eq!(config.graph.lambda, 0.2);
    assert_eq!(config.activation.recency_half_life_days, 14.0);
    // Untouched sections keep defaults.
    assert_eq!(config.graph.dedup_window_hours, 24);
}
