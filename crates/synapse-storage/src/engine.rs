//! StorageEngine — owns the ConnectionPool, implements every storage trait,
//! runs migrations at open.

use std::path::Path;

use chrono::{DateTime, Utc};

use synapse_core::config::GraphConfig;
use synapse_core::errors::SynapseResult;
use synapse_core::model::{
    ActivationState, CausalHypothesis, CoactivationEdge, ExplanationFilter, FeedbackSignal,
    HypothesisStatus, MemoryPair, RetrievalExplanation,
};
use synapse_core::traits::{
    CoactivationReport, DecayBatch, ICausalStorage, IEdgeStorage, IExplanationStorage,
    IStateStorage, ITenantDirectory,
};

use crate::migrations;
use crate::pool::ConnectionPool;

/// The main storage engine. Owns the connection pool and provides the full
/// trait surface the scoring, graph, causal, and maintenance crates need.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> SynapseResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> SynapseResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the writer.
    fn initialize(&self) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> SynapseResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> SynapseResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IStateStorage for StorageEngine {
    fn get_state(&self, org: &str, memory_id: &str) -> SynapseResult<Option<ActivationState>> {
        self.with_reader(|conn| crate::queries::state_ops::get_state(conn, org, memory_id))
    }

    fn get_states_bulk(
        &self,
        org: &str,
        memory_ids: &[String],
    ) -> SynapseResult<Vec<ActivationState>> {
        self.with_reader(|conn| crate::queries::state_ops::get_states_bulk(conn, org, memory_ids))
    }

    fn ensure_states(
        &self,
        org: &str,
        memory_ids: &[String],
        now: DateTime<Utc>,
    ) -> SynapseResult<Vec<ActivationState>> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::state_ops::ensure_states(conn, org, memory_ids, now)
        })
    }

    fn upsert_state(&self, state: &ActivationState) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::state_ops::upsert_state(conn, state))
    }

    fn record_access(&self, org: &str, memory_id: &str, now: DateTime<Utc>) -> SynapseResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::state_ops::record_access(conn, org, memory_id, now)
        })
    }

    fn record_feedback(
        &self,
        org: &str,
        memory_id: &str,
        signal: FeedbackSignal,
        now: DateTime<Utc>,
    ) -> SynapseResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::state_ops::record_feedback(conn, org, memory_id, signal, now)
        })
    }

    fn set_contradicted(
        &self,
        org: &str,
        memory_id: &str,
        contradicted: bool,
    ) -> SynapseResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::state_ops::set_contradicted(conn, org, memory_id, contradicted, Utc::now())
        })
    }

    fn delete_state(&self, org: &str, memory_id: &str) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::state_ops::delete_state(conn, org, memory_id))
    }
}

impl IEdgeStorage for StorageEngine {
    fn apply_coactivation(
        &self,
        org: &str,
        primary_id: &str,
        pairs: &[MemoryPair],
        now: DateTime<Utc>,
        cfg: &GraphConfig,
    ) -> SynapseResult<CoactivationReport> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::edge_ops::apply_coactivation(conn, org, primary_id, pairs, now, cfg)
        })
    }

    fn edges_for(&self, org: &str, memory_id: &str) -> SynapseResult<Vec<CoactivationEdge>> {
        self.with_reader(|conn| crate::queries::edge_ops::edges_for(conn, org, memory_id))
    }

    fn edges_among(
        &self,
        org: &str,
        memory_ids: &[String],
    ) -> SynapseResult<Vec<CoactivationEdge>> {
        self.with_reader(|conn| crate::queries::edge_ops::edges_among(conn, org, memory_ids))
    }

    fn decay_stale_edges(
        &self,
        org: &str,
        now: DateTime<Utc>,
        cfg: &GraphConfig,
        cursor: i64,
        limit: usize,
    ) -> SynapseResult<DecayBatch> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::edge_ops::decay_stale_edges(conn, org, now, cfg, cursor, limit)
        })
    }
}

impl IExplanationStorage for StorageEngine {
    fn insert_explanation(&self, explanation: &RetrievalExplanation) -> SynapseResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::explanation_ops::insert_explanation(conn, explanation)
        })
    }

    fn read_explanations(
        &self,
        filter: &ExplanationFilter,
    ) -> SynapseResult<Vec<RetrievalExplanation>> {
        self.with_reader(|conn| crate::queries::explanation_ops::read_explanations(conn, filter))
    }
}

impl ICausalStorage for StorageEngine {
    fn insert_hypothesis(&self, hypothesis: &CausalHypothesis) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::causal_ops::insert_hypothesis(conn, hypothesis))
    }

    fn get_hypothesis(&self, org: &str, id: &str) -> SynapseResult<Option<CausalHypothesis>> {
        self.with_reader(|conn| crate::queries::causal_ops::get_hypothesis(conn, org, id))
    }

    fn update_hypothesis(&self, hypothesis: &CausalHypothesis) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::causal_ops::update_hypothesis(conn, hypothesis))
    }

    fn list_by_status(
        &self,
        org: &str,
        status: HypothesisStatus,
        limit: usize,
    ) -> SynapseResult<Vec<CausalHypothesis>> {
        self.with_reader(|conn| {
            crate::queries::causal_ops::list_by_status(conn, org, status, limit)
        })
    }

    fn promote_eligible(
        &self,
        org: &str,
        evidence_min: usize,
        confidence_min: f64,
        now: DateTime<Utc>,
    ) -> SynapseResult<usize> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::causal_ops::promote_eligible(conn, org, evidence_min, confidence_min, now)
        })
    }
}

impl ITenantDirectory for StorageEngine {
    fn organizations(&self) -> SynapseResult<Vec<String>> {
        self.with_reader(crate::queries::tenant_ops::organizations)
    }
}
