pub mod aggregator;
pub mod factory;
pub mod messages;
pub mod orchestrator;
pub mod partitioner;
pub mod supervisor;
pub mod worker;

pub use factory::RuntimeFactory;
pub use messages::{UnitId, UnitMessage};
pub use orchestrator::{default_max_workers, run_parallel, Orchestrator, RunnerOptions};
pub use partitioner::{partition, Partition, WorkItem};
pub use supervisor::{RunState, Supervisor};

/// The single resolution of a run: every result in input order, or the first failure.
pub type Outcome<R> = Result<Vec<R>, crate::errors::RunnerError>;
