//! # Caching Evaluators
//!
//! Cross-validating a classifier dominates the cost of every search. Populations
//! revisit the same subsets often (elitism, converged swarms, ants retracing a
//! strong trail), so wrapping an evaluator in a cache avoids retraining on subsets
//! that were already scored. Subsets are keyed by their sorted feature indices, so
//! an ant's ordered path and a mask's selection share entries.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Criteria, EvaluationContext, FitnessEvaluator};
use crate::error::Result;

type SubsetKey = Vec<usize>;

fn subset_key(features: &[usize]) -> SubsetKey {
    let mut key = features.to_vec();
    key.sort_unstable();
    key.dedup();
    key
}

/// An evaluator wrapper with a cache shared by all threads.
#[derive(Debug, Clone)]
pub struct CachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    evaluator: E,
    cache: Arc<Mutex<HashMap<SubsetKey, Criteria>>>,
}

impl<E> CachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a cached evaluator with a pre-populated cache.
    pub fn with_cache(evaluator: E, cache: HashMap<SubsetKey, Criteria>) -> Self {
        Self {
            evaluator,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Returns the number of cached subsets.
    pub fn cache_size(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<SubsetKey, Criteria> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<E> FitnessEvaluator for CachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    fn cross_validate(&self, features: &[usize], ctx: &EvaluationContext<'_>) -> Result<Criteria> {
        let key = subset_key(features);

        if let Some(criteria) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(*criteria);
        }

        // The lock is released while training so parallel evaluations don't serialize.
        let criteria = self.evaluator.cross_validate(features, ctx)?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, criteria);

        Ok(criteria)
    }
}

/// A per-thread cache of evaluation results.
#[derive(Debug, Default)]
pub struct ThreadLocalCache {
    cache: thread_local::ThreadLocal<RefCell<HashMap<SubsetKey, Criteria>>>,
}

impl ThreadLocalCache {
    pub fn new() -> Self {
        Self {
            cache: thread_local::ThreadLocal::new(),
        }
    }

    pub fn get(&self, key: &SubsetKey) -> Option<Criteria> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(key).copied())
    }

    pub fn insert(&self, key: SubsetKey, value: Criteria) {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));
        if let Ok(mut cache) = cell.try_borrow_mut() {
            cache.insert(key, value);
        }
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Number of entries cached by the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An evaluator wrapper that keeps a separate cache per thread, avoiding lock
/// contention when a large population is evaluated in parallel.
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    evaluator: E,
    cache: Arc<ThreadLocalCache>,
}

impl<E> ThreadLocalCachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: Arc::new(ThreadLocalCache::new()),
        }
    }

    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the number of cached subsets for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<E> FitnessEvaluator for ThreadLocalCachedEvaluator<E>
where
    E: FitnessEvaluator,
{
    fn cross_validate(&self, features: &[usize], ctx: &EvaluationContext<'_>) -> Result<Criteria> {
        let key = subset_key(features);

        if let Some(criteria) = self.cache.get(&key) {
            return Ok(criteria);
        }

        let criteria = self.evaluator.cross_validate(features, ctx)?;
        self.cache.insert(key, criteria);

        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    struct CountingEvaluator {
        evaluations: Arc<AtomicUsize>,
    }

    impl CountingEvaluator {
        fn new() -> Self {
            Self {
                evaluations: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn get_evaluations(&self) -> usize {
            self.evaluations.load(Ordering::SeqCst)
        }
    }

    impl FitnessEvaluator for CountingEvaluator {
        fn cross_validate(&self, features: &[usize], _: &EvaluationContext<'_>) -> Result<Criteria> {
            self.evaluations.fetch_add(1, Ordering::SeqCst);
            Ok(Criteria::from_accuracy(features.iter().sum::<usize>() as f64))
        }
    }

    fn ctx() -> EvaluationContext<'static> {
        EvaluationContext::new(Path::new("."), 2)
    }

    #[test]
    fn test_cached_evaluator() {
        let evaluator = CountingEvaluator::new();
        let cached = CachedEvaluator::new(evaluator.clone());

        let first = cached.cross_validate(&[3, 1], &ctx()).unwrap();
        assert_eq!(evaluator.get_evaluations(), 1);

        // Same subset in a different order hits the cache
        let second = cached.cross_validate(&[1, 3], &ctx()).unwrap();
        assert_eq!(evaluator.get_evaluations(), 1);
        assert_eq!(first, second);

        cached.cross_validate(&[2], &ctx()).unwrap();
        assert_eq!(evaluator.get_evaluations(), 2);
        assert_eq!(cached.cache_size(), 2);

        cached.clear_cache();
        assert_eq!(cached.cache_size(), 0);
        cached.cross_validate(&[1, 3], &ctx()).unwrap();
        assert_eq!(evaluator.get_evaluations(), 3);
    }

    #[test]
    fn test_thread_local_cached_evaluator() {
        let evaluator = CountingEvaluator::new();
        let cached = ThreadLocalCachedEvaluator::new(evaluator.clone());

        cached.cross_validate(&[0, 4], &ctx()).unwrap();
        cached.cross_validate(&[4, 0], &ctx()).unwrap();
        assert_eq!(evaluator.get_evaluations(), 1);
        assert_eq!(cached.cache_size(), 1);

        cached.clear_cache();
        assert_eq!(cached.cache_size(), 0);
    }

    #[test]
    fn test_with_cache() {
        let evaluator = CountingEvaluator::new();
        let mut cache = HashMap::new();
        cache.insert(vec![1, 2], Criteria::from_accuracy(75.0));

        let cached = CachedEvaluator::with_cache(evaluator.clone(), cache);
        let criteria = cached.cross_validate(&[2, 1], &ctx()).unwrap();
        assert_eq!(criteria.accuracy, 75.0);
        assert_eq!(evaluator.get_evaluations(), 0);
        assert_eq!(cached.get_cache().len(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let failing = move |_: &[usize], _: &EvaluationContext<'_>| -> Result<Criteria> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(crate::error::SearchError::Evaluation("boom".to_string()))
        };
        let cached = CachedEvaluator::new(failing);
        assert!(cached.cross_validate(&[0], &ctx()).is_err());
        assert!(cached.cross_validate(&[0], &ctx()).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cache_size(), 0);
    }
}
