use std::sync::Arc;

/// The per-item computation a run applies to every input.
///
/// Implementations are shared by every unit of a run at once, so they must be
/// `Send + Sync`. They should be pure: the result for an item may only depend
/// on the item itself and on immutable configuration.
pub trait ItemProcessor<T>: Send + Sync {
    type Output: Send + 'static;

    fn process(&self, item: T) -> anyhow::Result<Self::Output>;

    fn name(&self) -> &'static str;
}

/// Type-erased processor, as produced by the local processor factory
pub type SharedProcessor<T, R> = Arc<dyn ItemProcessor<T, Output = R>>;

/// Adapter turning a plain closure into an [`ItemProcessor`]
pub struct FnProcessor<F> {
    name: &'static str,
    func: F,
}

impl<F> FnProcessor<F> {
    pub fn named(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

/// Wrap a closure as an anonymous processor.
///
/// ```rust
/// use the_divvy::traits::{processor_fn, ItemProcessor};
///
/// let double = processor_fn(|x: u32| Ok(x * 2));
/// assert_eq!(double.process(21).unwrap(), 42);
/// ```
pub fn processor_fn<T, R, F>(func: F) -> FnProcessor<F>
where
    F: Fn(T) -> anyhow::Result<R> + Send + Sync,
{
    FnProcessor::named("closure", func)
}

impl<T, R, F> ItemProcessor<T> for FnProcessor<F>
where
    F: Fn(T) -> anyhow::Result<R> + Send + Sync,
    R: Send + 'static,
{
    type Output = R;

    fn process(&self, item: T) -> anyhow::Result<R> {
        (self.func)(item)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
