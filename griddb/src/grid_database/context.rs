use super::types::{DatabaseId, ObjectKey};
use slotmap::SlotMap;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

// Unique across every context in the process
static NEXT_DATABASE_ID: AtomicU32 = AtomicU32::new(0);

slotmap::new_key_type! {
    pub(crate) struct EntryKey;
}

/// One (object, bucket) membership.
///
/// Lives in two lists at once: the bucket's doubly linked list (`prev`/`next`)
/// and the owning object's singly linked chain (`next_in_object`).
#[derive(Clone, Copy, Debug)]
pub(crate) struct BucketEntry {
    pub(crate) object: ObjectKey,
    pub(crate) bucket: u32,
    pub(crate) prev: Option<EntryKey>,
    pub(crate) next: Option<EntryKey>,
    pub(crate) next_in_object: Option<EntryKey>,
}

/// Fixed-size node pool for bucket entries.
///
/// Freed slots are recycled before the pool grows, so its size never exceeds
/// the peak number of live entries.
#[derive(Debug)]
pub struct ChunkAllocator {
    entries: SlotMap<EntryKey, BucketEntry>,
    peak: usize,
}

impl ChunkAllocator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotMap::with_capacity_and_key(capacity),
            peak: 0,
        }
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let free = self.entries.capacity().saturating_sub(self.entries.len());
        if additional > free {
            self.entries.reserve(additional);
        }
    }

    #[inline(always)]
    pub(crate) fn allocate(&mut self, entry: BucketEntry) -> EntryKey {
        let key = self.entries.insert(entry);
        self.peak = self.peak.max(self.entries.len());
        key
    }

    /// Returns the entry to the pool.
    ///
    /// # Panics
    ///
    /// Panics when the entry was already freed.
    #[inline(always)]
    pub(crate) fn free(&mut self, key: EntryKey) -> BucketEntry {
        match self.entries.remove(key) {
            Some(entry) => entry,
            None => panic!("bucket entry {:?} freed twice", key),
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: EntryKey) -> &BucketEntry {
        &self.entries[key]
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, key: EntryKey) -> &mut BucketEntry {
        &mut self.entries[key]
    }

    pub(crate) fn contains(&self, key: EntryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn live(&self) -> usize {
        self.entries.len()
    }

    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}

#[derive(Debug)]
pub(crate) struct ContextInner {
    pub(crate) chunks: ChunkAllocator,
    query_stamp: u32,
    /// Bumped every time `query_stamp` wraps; object stamps from an older
    /// epoch are stale.
    stamp_epoch: u32,
    databases: usize,
}

impl ContextInner {
    #[inline(always)]
    pub(crate) fn next_query_stamp(&mut self) -> u32 {
        self.query_stamp = self.query_stamp.wrapping_add(1);
        if self.query_stamp == 0 {
            self.query_stamp = 1;
            self.stamp_epoch = self.stamp_epoch.wrapping_add(1);
        }
        self.query_stamp
    }

    #[inline(always)]
    pub(crate) fn stamp_epoch(&self) -> u32 {
        self.stamp_epoch
    }

    /// Stamp of the most recent sweep; starts a new one if none ran yet.
    #[inline(always)]
    pub(crate) fn continue_query_stamp(&mut self) -> u32 {
        if self.query_stamp == 0 {
            return self.next_query_stamp();
        }
        self.query_stamp
    }

    pub(crate) fn attach_database(&mut self, entry_reserve: usize) -> DatabaseId {
        let id = DatabaseId(NEXT_DATABASE_ID.fetch_add(1, Ordering::Relaxed));
        self.databases += 1;
        self.chunks.reserve(entry_reserve);
        id
    }

    pub(crate) fn detach_database(&mut self) {
        debug_assert!(self.databases > 0, "detaching from a context with no databases");
        self.databases = self.databases.saturating_sub(1);
    }
}

/// Shared state for every [`GridDatabase`](super::GridDatabase) built on it:
/// the bucket-entry pool, the query-stamp counter and the live database count.
///
/// Cloning the handle shares the state; the pool is released when the last
/// handle (including the ones held by databases) goes away. The handle is not
/// `Send`: one context serves one thread.
#[derive(Debug, Clone)]
pub struct GridContext {
    inner: Rc<RefCell<ContextInner>>,
}

impl GridContext {
    pub fn new() -> Self {
        Self::with_entry_capacity(0)
    }

    pub fn with_entry_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ContextInner {
                chunks: ChunkAllocator::with_capacity(capacity),
                query_stamp: 0,
                stamp_epoch: 0,
                databases: 0,
            })),
        }
    }

    /// Bucket entries currently linked by all databases on this context.
    pub fn live_entries(&self) -> usize {
        self.inner.borrow().chunks.live()
    }

    pub fn peak_entries(&self) -> usize {
        self.inner.borrow().chunks.peak()
    }

    /// Number of live databases using this context.
    pub fn database_count(&self) -> usize {
        self.inner.borrow().databases
    }

    pub fn ptr_eq(&self, other: &GridContext) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[inline(always)]
    pub(crate) fn borrow(&self) -> Ref<'_, ContextInner> {
        self.inner.borrow()
    }

    #[inline(always)]
    pub(crate) fn borrow_mut(&self) -> RefMut<'_, ContextInner> {
        self.inner.borrow_mut()
    }
}

impl Default for GridContext {
    fn default() -> Self {
        Self::new()
    }
}
