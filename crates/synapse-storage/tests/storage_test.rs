use chrono::{Duration, Utc};

use synapse_core::config::GraphConfig;
use synapse_core::model::{
    ActivationState, ExplanationFilter, FeedbackSignal, MemoryPair, RetrievalExplanation, Score,
};
use synapse_core::traits::{IEdgeStorage, IExplanationStorage, IStateStorage, ITenantDirectory};
use synapse_storage::StorageEngine;

const ORG: &str = "org-1";
const OTHER_ORG: &str = "org-2";

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

// ── Lazy state creation ──────────────────────────────────────────────────

#[test]
fn ensure_states_creates_default_rows() {
    let engine = engine();
    let now = Utc::now();
    let ids = vec!["m1".to_string(), "m2".to_string()];

    let states = engine.ensure_states(ORG, &ids, now).unwrap();
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].memory_id, "m1");
    assert_eq!(states[0].base_importance.value(), 0.5);
    assert_eq!(states[0].confidence.value(), 0.8);
    assert_eq!(states[0].access_count, 0);

    // Second call sees the same rows, not fresh ones.
    engine.record_access(ORG, "m1", now).unwrap();
    let again = engine.ensure_states(ORG, &ids, now).unwrap();
    assert_eq!(again[0].access_count, 1);
}

#[test]
fn record_access_increments_and_lazily_creates() {
    let engine = engine();
    let now = Utc::now();

    engine.record_access(ORG, "m1", now).unwrap();
    engine.record_access(ORG, "m1", now).unwrap();
    engine.record_access(ORG, "m1", now).unwrap();

    let state = engine.get_state(ORG, "m1").unwrap().unwrap();
    assert_eq!(state.access_count, 3);
    assert!(state.last_accessed_at.is_some());
}

#[test]
fn feedback_counters_accumulate() {
    let engine = engine();
    let now = Utc::now();

    engine
        .record_feedback(ORG, "m1", FeedbackSignal::Negative, now)
        .unwrap();
    engine
        .record_feedback(ORG, "m1", FeedbackSignal::Negative, now)
        .unwrap();
    engine
        .record_feedback(ORG, "m1", FeedbackSignal::Positive, now)
        .unwrap();

    let state = engine.get_state(ORG, "m1").unwrap().unwrap();
    assert_eq!(state.negative_feedback, 2);
    assert_eq!(state.positive_feedback, 1);
}

// ── Tenant isolation ─────────────────────────────────────────────────────

#[test]
fn state_rows_are_invisible_across_tenants() {
    let engine = engine();
    let now = Utc::now();

    engine.record_access(ORG, "m1", now).unwrap();

    assert!(engine.get_state(OTHER_ORG, "m1").unwrap().is_none());
    assert!(engine
        .get_states_bulk(OTHER_ORG, &["m1".to_string()])
        .unwrap()
        .is_empty());
}

#[test]
fn edges_are_invisible_across_tenants() {
    let engine = engine();
    let now = Utc::now();
    let cfg = GraphConfig::default();
    let pairs = vec![MemoryPair::new("a", "b").unwrap()];

    engine.apply_coactivation(ORG, "a", &pairs, now, &cfg).unwrap();

    assert!(engine.edges_for(OTHER_ORG, "a").unwrap().is_empty());
    assert_eq!(engine.edges_for(ORG, "a").unwrap().len(), 1);
}

// ── Deletion cascade ─────────────────────────────────────────────────────

#[test]
fn delete_state_removes_incident_edges() {
    let engine = engine();
    let now = Utc::now();
    let cfg = GraphConfig::default();

    engine
        .apply_coactivation(
            ORG,
            "a",
            &[
                MemoryPair::new("a", "b").unwrap(),
                MemoryPair::new("a", "c").unwrap(),
            ],
            now,
            &cfg,
        )
        .unwrap();

    engine.delete_state(ORG, "a").unwrap();
    assert!(engine.get_state(ORG, "a").unwrap().is_none());
    assert!(engine.edges_for(ORG, "a").unwrap().is_empty());
    // The untouched endpoint keeps nothing either — both edges touched "a".
    assert!(engine.edges_for(ORG, "b").unwrap().is_empty());
}

// ── Explanation log ──────────────────────────────────────────────────────

fn sample_explanation(org: &str, user: &str, hash: &str) -> RetrievalExplanation {
    RetrievalExplanation {
        id: uuid::Uuid::new_v4().to_string(),
        organization_id: org.to_string(),
        user_id: user.to_string(),
        query_hash: hash.to_string(),
        retrieved_at: Utc::now(),
        top_k: 5,
        results: vec![],
    }
}

#[test]
fn explanations_read_back_filtered() {
    let engine = engine();

    engine
        .insert_explanation(&sample_explanation(ORG, "u1", "hash-a"))
        .unwrap();
    engine
        .insert_explanation(&sample_explanation(ORG, "u2", "hash-b"))
        .unwrap();
    engine
        .insert_explanation(&sample_explanation(OTHER_ORG, "u1", "hash-a"))
        .unwrap();

    let all = engine
        .read_explanations(&ExplanationFilter::for_org(ORG))
        .unwrap();
    assert_eq!(all.len(), 2);

    let mut by_user = ExplanationFilter::for_org(ORG);
    by_user.user_id = Some("u1".to_string());
    assert_eq!(engine.read_explanations(&by_user).unwrap().len(), 1);

    let mut by_hash = ExplanationFilter::for_org(ORG);
    by_hash.query_hash = Some("hash-b".to_string());
    assert_eq!(engine.read_explanations(&by_hash).unwrap().len(), 1);

    let mut stale_window = ExplanationFilter::for_org(ORG);
    stale_window.to = Some(Utc::now() - Duration::days(1));
    assert!(engine.read_explanations(&stale_window).unwrap().is_empty());
}

// ── Upsert path ──────────────────────────────────────────────────────────

#[test]
fn upsert_preserves_counters_on_conflict() {
    let engine = engine();
    let now = Utc::now();

    engine.record_access(ORG, "m1", now).unwrap();

    let mut curated = ActivationState::new_default(ORG, "m1", now);
    curated.base_importance = Score::new(0.9);
    engine.upsert_state(&curated).unwrap();

    let state = engine.get_state(ORG, "m1").unwrap().unwrap();
    assert_eq!(state.base_importance.value(), 0.9);
    // The conflict path only touches curated fields, not counters.
    assert_eq!(state.access_count, 1);
}

// ── File-backed mode ─────────────────────────────────────────────────────

#[test]
fn file_backed_engine_runs_in_wal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synapse.db");
    let engine = StorageEngine::open(&path).unwrap();

    let wal = engine
        .pool()
        .writer
        .with_conn_sync(|conn| synapse_storage::pool::pragmas::verify_wal_mode(conn))
        .unwrap();
    assert!(wal);

    // A committed write is visible through the read pool.
    engine.record_access(ORG, "m1", Utc::now()).unwrap();
    assert_eq!(engine.get_state(ORG, "m1").unwrap().unwrap().access_count, 1);
}

// ── Tenant directory ─────────────────────────────────────────────────────

#[test]
fn organizations_lists_every_tenant_once() {
    let engine = engine();
    let now = Utc::now();

    engine.record_access(ORG, "m1", now).unwrap();
    engine.record_access(OTHER_ORG, "m1", now).unwrap();
    engine
        .apply_coactivation(
            ORG,
            "a",
            &[MemoryPair::new("a", "b").unwrap()],
            now,
            &GraphConfig::default(),
        )
        .unwrap();

    let orgs = engine.organizations().unwrap();
    assert_eq!(orgs, vec![ORG.to_string(), OTHER_ORG.to_string()]);
}
