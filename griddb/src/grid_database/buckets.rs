use super::context::{BucketEntry, EntryKey};
use super::types::{BucketRange, ObjectId, ObjectKey};
use super::GridDatabase;
use common::shapes::Rect;
use tracing::{debug, trace};

impl<T> GridDatabase<T> {
    /// Bucket coordinates covered by `extent`, before wrapping.
    ///
    /// Spans wider than the grid are clamped to one full row so an object
    /// never owns the same bucket twice.
    pub fn bucket_range_for(&self, extent: &Rect) -> BucketRange {
        let bits = self.config.bucket_width_bits;
        let rows = self.config.row_count() as i64;
        let mut range = BucketRange {
            min_x: (extent.min_x.floor() as i64) >> bits,
            min_y: (extent.min_y.floor() as i64) >> bits,
            max_x: (extent.max_x.floor() as i64) >> bits,
            max_y: (extent.max_y.floor() as i64) >> bits,
        };
        if range.max_x.saturating_sub(range.min_x) >= rows
            || range.max_y.saturating_sub(range.min_y) >= rows
        {
            debug!(
                database = %self.id,
                ?extent,
                world_span = self.config.world_span(),
                "extent wider than the grid, clamping bucket range"
            );
            range.max_x = range.max_x.min(range.min_x.saturating_add(rows - 1));
            range.max_y = range.max_y.min(range.min_y.saturating_add(rows - 1));
        }
        range
    }

    #[inline(always)]
    pub(crate) fn bucket_index(&self, x: i64, y: i64) -> usize {
        (((y & self.row_mask) << self.config.bucket_row_bits) | (x & self.row_mask)) as usize
    }

    /// Links `key` into every bucket of its stored range.
    pub(crate) fn link(&mut self, key: ObjectKey) {
        let range = self.slots[key].range;
        debug_assert!(self.slots[key].chain.is_none(), "linking an object twice");
        let mut context = self.context.borrow_mut();
        let mut chain: Option<EntryKey> = None;
        for y in range.min_y..=range.max_y {
            for x in range.min_x..=range.max_x {
                let bucket = self.bucket_index(x, y);
                let head = self.buckets[bucket];
                let entry = context.chunks.allocate(BucketEntry {
                    object: key,
                    bucket: bucket as u32,
                    prev: None,
                    next: head,
                    next_in_object: chain,
                });
                if let Some(head) = head {
                    context.chunks.get_mut(head).prev = Some(entry);
                }
                self.buckets[bucket] = Some(entry);
                chain = Some(entry);
            }
        }
        self.slots[key].chain = chain;
    }

    /// Removes `key` from every bucket and returns its entries to the pool.
    pub(crate) fn unlink(&mut self, key: ObjectKey) {
        let mut cursor = self.slots[key].chain.take();
        let mut context = self.context.borrow_mut();
        while let Some(entry_key) = cursor {
            let entry = context.chunks.free(entry_key);
            debug_assert_eq!(entry.object, key, "bucket entry owned by another object");
            match entry.prev {
                Some(prev) => context.chunks.get_mut(prev).next = entry.next,
                None => {
                    debug_assert_eq!(self.buckets[entry.bucket as usize], Some(entry_key));
                    self.buckets[entry.bucket as usize] = entry.next;
                }
            }
            if let Some(next) = entry.next {
                context.chunks.get_mut(next).prev = entry.prev;
            }
            cursor = entry.next_in_object;
        }
    }

    /// Moves `key` to `extent`, touching the buckets only if its range changed.
    pub(crate) fn relink(&mut self, key: ObjectKey, extent: Rect) {
        let range = self.bucket_range_for(&extent);
        let slot = &mut self.slots[key];
        slot.extent = extent;
        if slot.range == range {
            return;
        }
        trace!(
            id = %ObjectId::new(self.id, key),
            from = ?slot.range,
            to = ?range,
            "relink"
        );
        slot.range = range;
        self.unlink(key);
        self.link(key);
    }

    /// Frees every bucket entry this database holds.
    pub(crate) fn release_buckets(&mut self) {
        let mut context = self.context.borrow_mut();
        for head in self.buckets.iter_mut() {
            let mut cursor = head.take();
            while let Some(entry_key) = cursor {
                cursor = context.chunks.free(entry_key).next;
            }
        }
        for slot in self.slots.values_mut() {
            slot.chain = None;
        }
    }
}
