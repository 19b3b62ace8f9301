use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use synapse_core::config::{GraphConfig, MaintenanceConfig};
use synapse_core::model::FeedbackSignal;
use synapse_core::traits::{IEdgeStorage, IStateStorage};
use synapse_graph::CoactivationMaintainer;
use synapse_maintenance::{AccessRecorder, CausalSweepJob, DecayRefreshJob, JobBudget};
use synapse_storage::StorageEngine;

const ORG: &str = "org-1";

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ── Access recording ─────────────────────────────────────────────────────

#[test]
fn batch_recording_survives_individual_items() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let recorder = AccessRecorder::new(&engine, 3);
    let now = Utc::now();

    let report = recorder.record_access_batch(ORG, &ids(&["m1", "m2", "m3"]), now);
    assert_eq!(report.recorded, 3);
    assert_eq!(report.failed, 0);

    assert_eq!(engine.get_state(ORG, "m2").unwrap().unwrap().access_count, 1);
}

#[test]
fn feedback_goes_through_the_recorder() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let recorder = AccessRecorder::new(&engine, 3);
    let now = Utc::now();

    recorder
        .record_feedback(ORG, "m1", FeedbackSignal::Negative, now)
        .unwrap();
    assert_eq!(
        engine.get_state(ORG, "m1").unwrap().unwrap().negative_feedback,
        1
    );
}

// ── Decay refresh ────────────────────────────────────────────────────────

fn seed_stale_edge(engine: &StorageEngine, count: i64, days_ago: i64) {
    let cfg = GraphConfig::default();
    let maintainer = CoactivationMaintainer::new(engine, &cfg);
    let start = Utc::now() - Duration::days(days_ago);
    for i in 0..count {
        maintainer
            .record_coactivation(ORG, "a", &ids(&["b"]), start + Duration::hours(25 * i))
            .unwrap();
    }
}

#[test]
fn stale_edges_decay_and_weight_invariant_holds() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let graph_cfg = GraphConfig::default();
    let maintenance_cfg = MaintenanceConfig::default();
    // Four co-activations, all more than 30 days ago.
    seed_stale_edge(&engine, 4, 60);

    let job = DecayRefreshJob::new(&engine, &engine, &graph_cfg, &maintenance_cfg);
    let report = job
        .run(Utc::now(), &JobBudget::from_secs(60), None)
        .unwrap();

    assert_eq!(report.edges_decayed, 1);
    assert_eq!(report.edges_deleted, 0);
    assert!(report.resume.is_none());

    let edge = &engine.edges_for(ORG, "a").unwrap()[0];
    assert_eq!(edge.coactivation_count, 2);
    let expected = 1.0 - (-graph_cfg.lambda * 2.0).exp();
    assert!((edge.edge_weight - expected).abs() < 1e-12);
    assert!(edge.last_decayed_at.is_some());
}

#[test]
fn rerun_within_period_is_idempotent() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let graph_cfg = GraphConfig::default();
    let maintenance_cfg = MaintenanceConfig::default();
    seed_stale_edge(&engine, 4, 60);

    let job = DecayRefreshJob::new(&engine, &engine, &graph_cfg, &maintenance_cfg);
    let now = Utc::now();
    job.run(now, &JobBudget::from_secs(60), None).unwrap();
    // Simulated retry of an aborted cycle: same period, no double decay.
    let second = job.run(now, &JobBudget::from_secs(60), None).unwrap();

    assert_eq!(second.edges_decayed, 0);
    assert_eq!(
        engine.edges_for(ORG, "a").unwrap()[0].coactivation_count,
        2
    );
}

#[test]
fn fresh_edges_are_left_alone() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let graph_cfg = GraphConfig::default();
    let maintenance_cfg = MaintenanceConfig::default();
    // Recent co-activation: not stale.
    seed_stale_edge(&engine, 2, 3);

    let job = DecayRefreshJob::new(&engine, &engine, &graph_cfg, &maintenance_cfg);
    let report = job
        .run(Utc::now(), &JobBudget::from_secs(60), None)
        .unwrap();

    assert_eq!(report.edges_decayed, 0);
    assert_eq!(engine.edges_for(ORG, "a").unwrap()[0].coactivation_count, 2);
}

#[test]
fn edge_decayed_to_zero_is_deleted() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let graph_cfg = GraphConfig::default();
    let maintenance_cfg = MaintenanceConfig::default();
    // One old co-activation: floor(1 × 0.5) = 0.
    seed_stale_edge(&engine, 1, 60);

    let job = DecayRefreshJob::new(&engine, &engine, &graph_cfg, &maintenance_cfg);
    let report = job
        .run(Utc::now(), &JobBudget::from_secs(60), None)
        .unwrap();

    assert_eq!(report.edges_deleted, 1);
    assert!(engine.edges_for(ORG, "a").unwrap().is_empty());
}

#[test]
fn exhausted_budget_returns_resume_cursor() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let graph_cfg = GraphConfig::default();
    let maintenance_cfg = MaintenanceConfig::default();
    seed_stale_edge(&engine, 4, 60);

    let job = DecayRefreshJob::new(&engine, &engine, &graph_cfg, &maintenance_cfg);
    let spent = JobBudget::new(StdDuration::ZERO);
    std::thread::sleep(StdDuration::from_millis(1));

    let report = job.run(Utc::now(), &spent, None).unwrap();
    let resume = report.resume.expect("resume cursor");
    assert_eq!(resume.organization_id, ORG);
    assert_eq!(report.edges_decayed, 0);

    // Resuming with a fresh budget finishes the work.
    let finish = job
        .run(Utc::now(), &JobBudget::from_secs(60), Some(resume))
        .unwrap();
    assert_eq!(finish.edges_decayed, 1);
}

// ── Causal sweep ─────────────────────────────────────────────────────────

#[test]
fn sweep_promotes_eligible_hypotheses_once() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ledger = synapse_causal::CausalLedger::new(&engine);
    let now = Utc::now();

    // Meets both thresholds but was never touched after proposal.
    ledger
        .propose(
            ORG,
            synapse_causal::HypothesisDraft {
                relation: synapse_core::model::CausalRelation::Causes,
                evidence_memory_ids: ids(&["m1", "m2", "m3"]),
                confidence: 0.7,
                episode_id: None,
                from_event_id: None,
                to_event_id: None,
            },
            now,
        )
        .unwrap();
    // Below the confidence threshold: stays proposed.
    ledger
        .propose(
            ORG,
            synapse_causal::HypothesisDraft {
                relation: synapse_core::model::CausalRelation::Correlates,
                evidence_memory_ids: ids(&["m1", "m2", "m3"]),
                confidence: 0.3,
                episode_id: None,
                from_event_id: None,
                to_event_id: None,
            },
            now,
        )
        .unwrap();

    let job = CausalSweepJob::new(&engine, &engine);
    let report = job.run(now, &JobBudget::from_secs(60), None).unwrap();
    assert_eq!(report.promoted, 1);

    // Second sweep finds nothing new: the guard is the status itself.
    let again = job.run(now, &JobBudget::from_secs(60), None).unwrap();
    assert_eq!(again.promoted, 0);
}
