use rayon::prelude::*;

/// How an operation walks its work items.
///
/// Scoring, matching and removal share one implementation and only differ in
/// the `for_each` strategy they are handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionPolicy {
    /// Call `f` once per item. The parallel variant splits the items across
    /// the rayon pool and returns only after every call has completed.
    pub fn for_each<T, F>(self, items: &[T], f: F)
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().for_each(f),
            ExecutionPolicy::Parallel => items.par_iter().for_each(f),
        }
    }

    /// Keep the items for which `pred` holds, preserving their order.
    pub fn filter<T, F>(self, items: &[T], pred: F) -> Vec<T>
    where
        T: Sync + Send + Clone,
        F: Fn(&T) -> bool + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().filter(|&t| pred(t)).cloned().collect(),
            ExecutionPolicy::Parallel => items.par_iter().filter(|&t| pred(t)).cloned().collect(),
        }
    }

    /// Whether `pred` holds for at least one item.
    pub fn any<T, F>(self, items: &[T], pred: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().any(pred),
            ExecutionPolicy::Parallel => items.par_iter().any(pred),
        }
    }

    /// Shards worth allocating for an accumulator: a sequential walk has a
    /// single writer, so one shard is enough.
    pub fn shard_count(self, configured: usize) -> usize {
        match self {
            ExecutionPolicy::Sequential => 1,
            ExecutionPolicy::Parallel => configured.max(1),
        }
    }

    pub fn is_parallel(self) -> bool { self == ExecutionPolicy::Parallel }
}
