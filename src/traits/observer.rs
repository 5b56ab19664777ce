use crate::engine::UnitId;

/// Receives the advisory progress messages units emit while a run is going.
///
/// Called from the orchestrator's receive loop, so implementations should
/// return quickly.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, unit: UnitId, percent: u8, note: &str);
}
