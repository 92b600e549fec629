//! Eviction policy seam.
//!
//! A policy owns the ordering structure that decides which entry leaves the
//! cache next. The [`Cache`](crate::Cache) engine owns the entries themselves
//! and calls into the policy at three points: when a new entry is admitted,
//! when an existing entry is accessed, and when room must be made.
//!
//! Policies never see keys. They work purely on [`Handle`]s and the
//! intrusive links stored in each entry, which keeps every hook O(1).

use crate::entry::{EntryStore, Handle};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// Ordering structure driving eviction.
///
/// Implementations must keep exactly the admitted, not yet evicted handles
/// linked, so that `len()` always equals the number of live entries.
pub trait EvictionPolicy: Default {
    /// Short upper-case name used in logs and metrics.
    const NAME: &'static str;

    /// Links a freshly created entry.
    fn admit<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle);

    /// Records an access to a linked entry: a `get` hit or a `put` update.
    fn promote<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle);

    /// Unlinks and returns the next entry to evict. `None` only when nothing
    /// is linked.
    fn evict_victim<K, V>(&mut self, store: &mut EntryStore<K, V>) -> Option<Handle>;

    /// Number of linked entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every link. Called together with clearing the store.
    fn clear(&mut self);

    /// Appends policy-specific metrics.
    fn extend_metrics(&self, metrics: &mut BTreeMap<String, f64>);

    /// Walks the whole ordering and panics on the first broken link or
    /// count mismatch. O(n); meant for tests and debugging.
    fn debug_validate_invariants<K, V>(&self, store: &EntryStore<K, V>);
}
