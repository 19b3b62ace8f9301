use chrono::{Duration, Utc};

use synapse::Engine;
use synapse_core::config::SynapseConfig;
use synapse_core::model::{
    ActivationState, Candidate, ExplanationFilter, FeedbackSignal, GateInput, MemoryMetadata,
    QueryContext, Scope, Score,
};
use synapse_core::traits::IStateStorage;
use synapse_maintenance::JobBudget;

const ORG: &str = "org-1";

fn query(text: &str) -> QueryContext {
    QueryContext {
        organization_id: ORG.to_string(),
        user_id: "u1".to_string(),
        query_text: text.to_string(),
        scope: Scope::Team,
        episode_id: None,
        goal_id: None,
        top_k: 10,
        now: Utc::now(),
    }
}

fn candidate(memory_id: &str, similarity: f64) -> Candidate {
    Candidate {
        memory_id: memory_id.to_string(),
        similarity,
        metadata: MemoryMetadata::default(),
        gate: GateInput::Precomputed {
            allowed: true,
            reason: None,
        },
    }
}

// ── Ranking + explanation round trip ─────────────────────────────────────

#[test]
fn ranking_persists_one_explanation_per_call() {
    let engine = Engine::open_in_memory(SynapseConfig::default()).unwrap();

    let response = engine
        .score_and_rank(&[candidate("m1", 0.9), candidate("m2", 0.5)], &query("q"))
        .unwrap();

    assert_eq!(response.results.len(), 2);
    assert!(response.warnings.is_empty());
    let explanation_id = response.explanation_id.expect("explanation persisted");

    let stored = engine
        .read_explanations(&ExplanationFilter::for_org(ORG))
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, explanation_id);
    assert_eq!(stored[0].results.len(), 2);
}

#[test]
fn empty_candidate_set_writes_nothing() {
    let engine = Engine::open_in_memory(SynapseConfig::default()).unwrap();

    let response = engine.score_and_rank(&[], &query("q")).unwrap();
    assert!(response.results.is_empty());
    assert!(response.explanation_id.is_none());
    assert!(engine
        .read_explanations(&ExplanationFilter::for_org(ORG))
        .unwrap()
        .is_empty());
}

// ── The consume-then-reinforce loop ──────────────────────────────────────

#[test]
fn coactivation_feedback_loop_boosts_neighbors() {
    let engine = Engine::open_in_memory(SynapseConfig::default()).unwrap();

    // First retrieval: no edges yet.
    let before = engine
        .score_and_rank(&[candidate("a", 0.5), candidate("b", 0.5)], &query("q"))
        .unwrap();
    assert!(before.results.iter().all(|r| r.components.nbr.is_none()));

    // The application reports that a and b were used together.
    let report = engine
        .record_coactivation(ORG, "a", &["b".to_string()])
        .unwrap();
    assert_eq!(report.pairs_applied, 1);
    engine.record_access(ORG, "a").unwrap();
    engine.record_access(ORG, "b").unwrap();

    // Next retrieval sees the edge as a neighbor boost.
    let after = engine
        .score_and_rank(&[candidate("a", 0.5), candidate("b", 0.5)], &query("q"))
        .unwrap();
    assert!(after.results.iter().all(|r| r.components.nbr.is_some()));

    let state = engine.storage().get_state(ORG, "a").unwrap().unwrap();
    assert_eq!(state.access_count, 1);
}

// ── Feedback and contradiction paths ─────────────────────────────────────

#[test]
fn feedback_and_contradiction_change_ranking_inputs() {
    let engine = Engine::open_in_memory(SynapseConfig::default()).unwrap();

    engine
        .record_feedback(ORG, "m1", FeedbackSignal::Negative)
        .unwrap();
    engine.set_contradicted(ORG, "m1", true).unwrap();

    let response = engine
        .score_and_rank(&[candidate("m1", 0.8), candidate("m2", 0.8)], &query("q"))
        .unwrap();

    let m1 = response
        .results
        .iter()
        .find(|r| r.memory_id == "m1")
        .unwrap();
    let m2 = response
        .results
        .iter()
        .find(|r| r.memory_id == "m2")
        .unwrap();
    assert!(m1.components.imp < m2.components.imp);
    assert!(m1.components.conf < m2.components.conf * 0.5);
    assert_eq!(response.results[0].memory_id, "m2");
}

// ── File-backed mode ─────────────────────────────────────────────────────

#[test]
fn file_backed_reads_go_through_the_read_pool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synapse.db");
    let engine = Engine::open(&path, SynapseConfig::default()).unwrap();

    engine.record_access(ORG, "m1").unwrap();

    // get_state routes through the WAL read pool in file-backed mode and
    // must still see the committed write.
    let state = engine.storage().get_state(ORG, "m1").unwrap().unwrap();
    assert_eq!(state.access_count, 1);
}

// ── Maintenance through the facade ───────────────────────────────────────

#[test]
fn decay_refresh_runs_under_budget_through_facade() {
    let engine = Engine::open_in_memory(SynapseConfig::default()).unwrap();

    // Seed an old edge directly via the storage handle so it is stale.
    let old = Utc::now() - Duration::days(45);
    let mut state = ActivationState::new_default(ORG, "a", old);
    state.base_importance = Score::new(0.5);
    engine.storage().upsert_state(&state).unwrap();

    use synapse_core::traits::IEdgeStorage;
    use synapse_core::model::MemoryPair;
    engine
        .storage()
        .apply_coactivation(
            ORG,
            "a",
            &[MemoryPair::new("a", "b").unwrap()],
            old,
            &engine.config().graph,
        )
        .unwrap();

    let report = engine
        .run_decay_refresh(&JobBudget::from_secs(60), None)
        .unwrap();
    // One stale edge with count 1: decayed to zero and deleted.
    assert_eq!(report.edges_deleted, 1);

    let sweep = engine
        .run_causal_sweep(&JobBudget::from_secs(60), None)
        .unwrap();
    assert_eq!(sweep.promoted, 0);
}
