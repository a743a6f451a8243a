//! Follow-list data model and the snapshot handle published by the relay loop.

use arc_swap::ArcSwap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque 64-bit account identifier assigned by the upstream network.
pub type UserId = u64;

/// One fetched follow list: the ordered ids as the directory returned them,
/// paired with the membership set derived from the same fetch.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FollowList {
    ids: Vec<UserId>,
    members: HashSet<UserId>,
}

impl FollowList {
    /// Builds a list from the directory's ordered ids. Duplicates collapse
    /// harmlessly in the membership set; the ordered sequence is kept as
    /// returned for re-scoping the event source.
    pub fn from_ids(ids: Vec<UserId>) -> Self {
        let members = ids.iter().copied().collect();
        Self { ids, members }
    }

    /// A list that follows nobody.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ordered ids for reconfiguring the event source.
    pub fn ids(&self) -> &[UserId] {
        &self.ids
    }

    /// Membership test against the set derived from the same fetch.
    pub fn contains(&self, id: UserId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Immutable view of one published follow list.
pub struct FollowListSnapshot {
    version: u64,
    list: FollowList,
}

impl FollowListSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn list(&self) -> &FollowList {
        &self.list
    }
}

/// Versioned holder for the current follow list.
///
/// The relay loop is the only writer. [`replace`](Self::replace) publishes a
/// whole fetched list as one pointer swap, so a reader never observes a
/// partially updated set; snapshots already loaded keep the list they were
/// loaded with.
#[derive(Clone)]
pub struct FollowListHandle {
    snapshot: Arc<ArcSwap<FollowListSnapshot>>,
    next_version: Arc<AtomicU64>,
}

impl FollowListHandle {
    /// Creates a handle publishing an empty list at version zero.
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(ArcSwap::from_pointee(FollowListSnapshot {
                version: 0,
                list: FollowList::empty(),
            })),
            next_version: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Publishes a freshly fetched list, discarding the previous value.
    /// Returns the version assigned to the new snapshot.
    pub fn replace(&self, list: FollowList) -> u64 {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        self.snapshot
            .store(Arc::new(FollowListSnapshot { version, list }));
        version
    }

    /// Loads the currently published snapshot.
    pub fn load(&self) -> Arc<FollowListSnapshot> {
        self.snapshot.load_full()
    }
}

impl Default for FollowListHandle {
    fn default() -> Self {
        Self::new()
    }
}
