use async_trait::async_trait;

use crate::engine::UnitId;
use crate::errors::RunnerError;

/// Result of advancing a unit by one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More items remain.
    Continue,
    /// The unit emitted its exit message with this code and must not be stepped again.
    Exited(i32),
}

/// A unit's body, driven one item at a time by whichever runtime hosts it.
///
/// Stepping lets every runtime put its own cancellation point between items
/// without knowing what the items are.
pub trait UnitWork: Send + 'static {
    fn id(&self) -> UnitId;

    fn step(&mut self) -> Step;
}

/// A live execution unit, as seen by the orchestrator.
#[async_trait]
pub trait UnitHandle: Send + Sync {
    fn id(&self) -> UnitId;

    /// Ask the unit to stop immediately. Never blocks.
    fn terminate(&self);

    /// Whether the unit has stopped running.
    fn is_finished(&self) -> bool;

    /// Resolve once the unit is no longer running.
    async fn wait(&mut self);
}

/// Creates isolated execution units.
///
/// Different runtimes implement `terminate` with different force (a
/// cooperative flag for blocking threads, task abortion for async tasks);
/// the orchestrator does not care which.
pub trait ExecutionRuntime: Send + Sync {
    fn name(&self) -> &'static str;

    fn spawn_unit(&self, work: Box<dyn UnitWork>) -> Result<Box<dyn UnitHandle>, RunnerError>;
}
