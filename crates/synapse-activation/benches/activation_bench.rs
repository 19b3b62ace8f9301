use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion};

use synapse_activation::scorer::{self, ScorerInput};
use synapse_core::config::{ActivationConfig, ComponentWeights};
use synapse_core::model::{ActivationState, MemoryMetadata, QueryContext, Scope};

fn bench_scoring(c: &mut Criterion) {
    let now = Utc::now();
    let state = ActivationState::new_default("org-1", "m1", now);
    let metadata = MemoryMetadata::default();
    let cfg = ActivationConfig::default();
    let weights = ComponentWeights::default();
    let query = QueryContext {
        organization_id: "org-1".to_string(),
        user_id: "u1".to_string(),
        query_text: "benchmark query".to_string(),
        scope: Scope::Team,
        episode_id: Some("ep-1".to_string()),
        goal_id: None,
        top_k: 10,
        now,
    };

    c.bench_function("compute_components", |b| {
        b.iter(|| {
            let components = scorer::compute_components(
                &ScorerInput {
                    state: &state,
                    metadata: &metadata,
                    similarity: std::hint::black_box(0.73),
                    neighbor_weight: Some(0.4),
                },
                &query,
                &cfg,
            );
            scorer::combine(&components, &weights)
        })
    });
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
