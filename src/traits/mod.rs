pub mod observer;
pub mod processor;
pub mod runtime;

pub use observer::ProgressObserver;
pub use processor::{processor_fn, FnProcessor, ItemProcessor, SharedProcessor};
pub use runtime::{ExecutionRuntime, Step, UnitHandle, UnitWork};
