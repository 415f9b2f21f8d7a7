use crate::error::DsResult;
use crate::reference::loader::load_reference;
use crate::scorer::builder::EngineBuildParams;
use crate::scorer::{ScoringEngine, ScoringResult};
use crate::snapshot::MetricsSnapshot;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Long-lived handle an embedding service keeps around.
///
/// Scoring clones the current `Arc` and releases the lock before computing, so a
/// recalibration swaps the whole engine without disturbing calls already in flight.
pub struct ScoringState {
    pub engine: RwLock<Arc<ScoringEngine>>,
}

impl Default for ScoringState {
    fn default() -> Self {
        Self::new(ScoringEngine::canonical())
    }
}

impl ScoringState {
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine: RwLock::new(Arc::new(engine)),
        }
    }

    pub fn current(&self) -> Arc<ScoringEngine> {
        // A poisoned lock still holds a complete engine; swaps never leave it half-written.
        let guard = self.engine.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    pub fn compute_score(&self, snapshot: &MetricsSnapshot) -> ScoringResult {
        self.current().compute_score(snapshot)
    }

    pub fn score_batch(&self, snapshots: &[MetricsSnapshot]) -> Vec<ScoringResult> {
        self.current().score_batch(snapshots)
    }

    /// Installs `engine` and returns the one it replaced.
    pub fn swap_engine(&self, engine: ScoringEngine) -> Arc<ScoringEngine> {
        let next = Arc::new(engine);
        let mut guard = self.engine.write().unwrap_or_else(|e| e.into_inner());
        info!(
            "Swapping scoring engine: model {} / reference '{}' -> model {} / reference '{}'",
            guard.config.version, guard.reference.version, next.config.version, next.reference.version
        );
        std::mem::replace(&mut *guard, next)
    }

    /// Rebuilds the engine around a freshly loaded reference table, keeping the
    /// current config and percentile map. On error the running engine is untouched.
    pub fn reload_reference<P: AsRef<Path>>(&self, path: P) -> DsResult<Arc<ScoringEngine>> {
        let current = self.current();
        let reference = load_reference(path)?;
        let engine = EngineBuildParams::builder()
            .config(current.config.clone())
            .reference(reference)
            .percentiles(current.percentiles.clone())
            .build()
            .build_engine()?;
        Ok(self.swap_engine(engine))
    }
}
