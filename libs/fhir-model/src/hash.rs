//! Memoized structural hashing
//!
//! Model instances never change after `build()`, so their structural hash is computed
//! at most once per instance (modulo benign races) and stored in a [`HashCache`].

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Compute-once cell for a structural hash.
///
/// `0` marks "not computed yet". Two threads racing on the first access both compute
/// the same value and store it; a hash that really is `0` is simply recomputed.
///
/// The cell is invisible to equality and hashing of the value that owns it.
#[derive(Default)]
pub struct HashCache(AtomicU64);

impl HashCache {
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        let cached = self.0.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }
        let computed = compute();
        self.0.store(computed, Ordering::Relaxed);
        computed
    }

    #[cfg(test)]
    fn is_computed(&self) -> bool {
        self.0.load(Ordering::Relaxed) != 0
    }
}

impl Clone for HashCache {
    fn clone(&self) -> Self {
        Self(AtomicU64::new(self.0.load(Ordering::Relaxed)))
    }
}

impl PartialEq for HashCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HashCache {}

impl Hash for HashCache {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl fmt::Debug for HashCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashCache")
    }
}

/// Deterministic hasher used for structural hashes.
///
/// `DefaultHasher::new()` uses fixed keys, so equal values hash equally across
/// instances within a process.
pub(crate) fn structural_hasher() -> DefaultHasher {
    DefaultHasher::new()
}

/// Implements `Hash` and `hash_code()` for a model type over the listed fields.
///
/// The type must carry a `hash: HashCache` field; it is not listed. Fields are hashed
/// in the order given, which is the declared order (inherited base first).
macro_rules! cached_hash {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $ty {
            /// Structural hash over every field, computed on first use.
            pub fn hash_code(&self) -> u64 {
                self.hash.get_or_compute(|| {
                    let mut hasher = $crate::hash::structural_hasher();
                    $( ::std::hash::Hash::hash(&self.$field, &mut hasher); )+
                    ::std::hash::Hasher::finish(&hasher)
                })
            }
        }

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.hash_code());
            }
        }
    };
}

pub(crate) use cached_hash;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once() {
        let cache = HashCache::new();
        assert!(!cache.is_computed());
        assert_eq!(cache.get_or_compute(|| 42), 42);
        assert!(cache.is_computed());
        assert_eq!(cache.get_or_compute(|| unreachable!()), 42);
    }

    #[test]
    fn clone_keeps_cached_value() {
        let cache = HashCache::new();
        cache.get_or_compute(|| 7);
        let copy = cache.clone();
        assert_eq!(copy.get_or_compute(|| 0), 7);
    }

    #[test]
    fn zero_is_recomputed() {
        let cache = HashCache::new();
        assert_eq!(cache.get_or_compute(|| 0), 0);
        assert!(!cache.is_computed());
        assert_eq!(cache.get_or_compute(|| 9), 9);
    }
}
