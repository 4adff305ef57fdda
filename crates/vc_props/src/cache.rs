//! Memoized getter resolution for the static shape.
//!
//! Resolving a getter means scanning the property table of a type for a
//! matching name. [`AccessorCache`] does that once per
//! `(type, name, case policy)` and keeps the result, misses included, for
//! the lifetime of the cache. Entries are never evicted.

use alloc::boxed::Box;
use core::any::TypeId;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use vc_utils::hash::{Equivalent, FixedHashState, HashMap};

use crate::access::{PropertyGetter, Resolved, resolve_getter};
use crate::error::AccessError;
use crate::info::{GetFn, PropertyTable};
use crate::matcher::NameMatcher;
use crate::options::AccessOptions;

// -----------------------------------------------------------------------------
// Keys

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AccessorKey {
    type_id: TypeId,
    name: Box<str>,
    case_sensitive: bool,
}

/// Borrowed form of [`AccessorKey`], hashes identically.
#[derive(Hash)]
struct AccessorQuery<'a> {
    type_id: TypeId,
    name: &'a str,
    case_sensitive: bool,
}

impl Equivalent<AccessorKey> for AccessorQuery<'_> {
    #[inline]
    fn equivalent(&self, key: &AccessorKey) -> bool {
        self.type_id == key.type_id
            && self.case_sensitive == key.case_sensitive
            && self.name == &*key.name
    }
}

// -----------------------------------------------------------------------------
// CacheStats

/// A snapshot of an [`AccessorCache`]'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of stored resolutions, misses included.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that had to scan a property table.
    pub misses: usize,
}

// -----------------------------------------------------------------------------
// AccessorCache

/// A thread-safe memo of resolved static getters.
///
/// Lookups take a read lock. On a miss the property table is scanned
/// without holding any lock, then the result is inserted unless another
/// thread got there first; either way every caller observes the entry that
/// was stored first.
///
/// Most code uses the process-wide [`AccessorCache::global`] through
/// [`make_getter`](crate::make_getter). A separate cache can be created for
/// isolation:
///
/// ```
/// use vc_props::{AccessOptions, AccessorCache, derive::Inspect};
///
/// #[derive(Inspect)]
/// struct Sample {
///     id: u32,
/// }
///
/// static CACHE: AccessorCache = AccessorCache::new();
///
/// let getter = CACHE.getter("id", AccessOptions::STRICT).unwrap();
/// for id in 0..3 {
///     let value = getter.get(&Sample { id }).unwrap().unwrap();
///     assert_eq!(value.downcast_ref::<u32>(), Some(&id));
/// }
///
/// let stats = CACHE.stats();
/// assert_eq!((stats.entries, stats.misses, stats.hits), (1, 1, 2));
/// ```
pub struct AccessorCache {
    entries: RwLock<HashMap<AccessorKey, Resolved<GetFn>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl AccessorCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::with_hasher(FixedHashState)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Returns the process-wide cache.
    ///
    /// It is populated lazily and lives until the process exits.
    #[inline]
    pub fn global() -> &'static AccessorCache {
        static GLOBAL: AccessorCache = AccessorCache::new();
        &GLOBAL
    }

    /// Creates a reusable getter for `name` backed by this cache.
    ///
    /// Fails with [`AccessError::InvalidName`] if `name` is empty.
    pub fn getter(&self, name: &str, options: AccessOptions) -> Result<PropertyGetter<'_>, AccessError> {
        PropertyGetter::new(self, name, options)
    }

    /// Returns the getter resolved for `name` on the type `type_id`.
    ///
    /// `table` is only called on the first request for a key and must return
    /// the property table of `type_id`.
    pub fn resolve_getter(
        &self,
        type_id: TypeId,
        name: &str,
        case_sensitive: bool,
        table: impl FnOnce() -> &'static PropertyTable,
    ) -> Resolved<GetFn> {
        let query = AccessorQuery {
            type_id,
            name,
            case_sensitive,
        };

        if let Some(&resolved) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&query)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return resolved;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let table = table();

        #[cfg(all(debug_assertions, feature = "debug"))]
        if table.type_id() != type_id {
            log::warn!(
                "property table of `{}` was supplied for another type while resolving `{name}`",
                table.type_name(),
            );
        }

        let resolved = resolve_getter(table, name, NameMatcher::new(case_sensitive));
        log::trace!(
            "resolved getter `{name}` on `{}` (case sensitive: {case_sensitive}): {}",
            table.type_name(),
            match resolved {
                Resolved::Found(_) => "found",
                Resolved::Inaccessible => "inaccessible",
                Resolved::NotFound => "not found",
            },
        );

        let key = AccessorKey {
            type_id,
            name: name.into(),
            case_sensitive,
        };
        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(resolved)
    }

    /// Returns the number of stored resolutions.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for AccessorCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessorCache")
            .field("stats", &self.stats())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::AccessorCache;
    use crate::access::Resolved;
    use crate::info::{PropertyInfo, PropertyTable, TableCell, Typed};
    use crate::{AccessError, AccessOptions, Inspect, Value};
    use core::any::{Any, TypeId};
    use core::sync::atomic::{AtomicUsize, Ordering};

    static FETCHES: AtomicUsize = AtomicUsize::new(0);

    /// Counts every fetch of its property table; only used by one test.
    struct Counted(u64);

    fn read_x(item: &dyn Any) -> Result<Value, AccessError> {
        let this = item
            .downcast_ref::<Counted>()
            .ok_or_else(AccessError::receiver_mismatch::<Counted>)?;
        Ok(Value::new(this.0))
    }

    impl Typed for Counted {
        fn property_table() -> &'static PropertyTable {
            static CELL: TableCell = TableCell::new();
            FETCHES.fetch_add(1, Ordering::SeqCst);
            CELL.get_or_init(|| PropertyTable::new::<Self>([PropertyInfo::new("X").with_getter(read_x)]))
        }
    }

    impl Inspect for Counted {
        fn property_table(&self) -> &'static PropertyTable {
            <Self as Typed>::property_table()
        }
    }

    #[test]
    fn second_getter_does_not_rescan() {
        let cache = AccessorCache::new();
        let before = FETCHES.load(Ordering::SeqCst);

        let first = cache.getter("X", AccessOptions::STRICT).unwrap();
        let second = cache.getter("X", AccessOptions::STRICT).unwrap();
        for n in [1, 2, 3] {
            let a = first.get(&Counted(n)).unwrap().unwrap();
            let b = second.get(&Counted(n)).unwrap().unwrap();
            assert_eq!(a.downcast_ref::<u64>(), Some(&n));
            assert_eq!(b.downcast_ref::<u64>(), Some(&n));
        }

        assert_eq!(FETCHES.load(Ordering::SeqCst) - before, 1);
        let stats = cache.stats();
        assert_eq!((stats.entries, stats.misses, stats.hits), (1, 1, 5));
    }

    #[derive(crate::derive::Inspect)]
    struct Plain {
        x: u64,
    }

    #[test]
    fn misses_are_cached_per_policy() {
        let cache = AccessorCache::new();
        let id = TypeId::of::<Plain>();

        assert!(matches!(
            cache.resolve_getter(id, "X", true, <Plain as Typed>::property_table),
            Resolved::NotFound
        ));
        assert!(matches!(
            cache.resolve_getter(id, "X", true, || unreachable!()),
            Resolved::NotFound
        ));
        assert!(cache.resolve_getter(id, "X", false, <Plain as Typed>::property_table).is_found());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_resolution_converges() {
        let cache = AccessorCache::new();
        let id = TypeId::of::<Plain>();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let getter = cache
                        .resolve_getter(id, "x", true, <Plain as Typed>::property_table)
                        .found()
                        .unwrap();
                    let value = getter(&Plain { x: 9 }).unwrap();
                    assert_eq!(value.downcast_ref::<u64>(), Some(&9));
                });
            }
        });

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits + stats.misses, 8);
    }
}
