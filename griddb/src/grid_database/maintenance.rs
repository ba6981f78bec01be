use super::types::ObjectId;
use super::GridDatabase;
use fxhash::FxHashSet;
use tracing::debug;

impl<T> GridDatabase<T> {
    /// Checks every bucket list, object chain and registry list against each
    /// other.
    ///
    /// # Panics
    ///
    /// Panics on the first inconsistency found.
    pub fn validate(&self) {
        let context = self.context.borrow();
        let chunks = &context.chunks;

        let mut bucket_entries = 0usize;
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut prev = None;
            let mut cursor = *head;
            while let Some(entry_key) = cursor {
                assert!(chunks.contains(entry_key), "bucket {bucket} links a freed entry");
                let entry = chunks.get(entry_key);
                assert_eq!(entry.prev, prev, "bucket {bucket} back-link mismatch");
                assert_eq!(entry.bucket as usize, bucket, "entry filed under the wrong bucket");
                assert!(
                    self.slots.contains_key(entry.object),
                    "bucket {bucket} links an unregistered object"
                );
                bucket_entries += 1;
                prev = cursor;
                cursor = entry.next;
            }
        }

        let mut chain_entries = 0usize;
        let mut expected = FxHashSet::default();
        for (key, slot) in self.slots.iter() {
            let id = ObjectId::new(self.id, key);
            let range = self.bucket_range_for(&slot.extent);
            assert_eq!(slot.range, range, "object {id} range does not match its extent");

            expected.clear();
            for y in range.min_y..=range.max_y {
                for x in range.min_x..=range.max_x {
                    expected.insert(self.bucket_index(x, y));
                }
            }
            let mut cursor = slot.chain;
            let mut linked = 0usize;
            while let Some(entry_key) = cursor {
                let entry = chunks.get(entry_key);
                assert_eq!(entry.object, key, "object {id} chain holds a foreign entry");
                assert!(
                    expected.remove(&(entry.bucket as usize)),
                    "object {id} linked into bucket {} outside its range",
                    entry.bucket
                );
                linked += 1;
                cursor = entry.next_in_object;
            }
            assert!(expected.is_empty(), "object {id} is missing from {} buckets", expected.len());
            chain_entries += linked;
        }
        assert_eq!(bucket_entries, chain_entries, "bucket lists and object chains disagree");

        assert_eq!(self.all_objects.len(), self.slots.len(), "registration list out of sync");
        for pair in self.all_objects.windows(2) {
            assert!(
                self.slots[pair[0]].sort_rank <= self.slots[pair[1]].sort_rank,
                "registration list out of order"
            );
        }

        let mut hot = 0usize;
        for (tag, list) in &self.hot_lists {
            for (index, key) in list.iter().enumerate() {
                let slot = &self.slots[*key];
                assert_eq!(slot.type_tag, *tag, "hot list {tag} holds another type");
                assert_eq!(slot.hot_slot, Some(index), "hot list {tag} back-index mismatch");
            }
            hot += list.len();
        }
        let expected_hot = self
            .slots
            .values()
            .filter(|slot| self.hot_lists.contains_key(&slot.type_tag))
            .count();
        assert_eq!(hot, expected_hot, "hot lists out of sync");
    }

    /// One line per occupied bucket: its wrapped coordinates and the objects in it.
    pub fn dump_buckets(&self) -> String {
        let context = self.context.borrow();
        let rows = self.config.row_count() as usize;
        let mut dump = String::new();
        for (bucket, head) in self.buckets.iter().enumerate() {
            if head.is_none() {
                continue;
            }
            dump.push_str(&format!("bucket ({}, {}):", bucket % rows, bucket / rows));
            let mut cursor = *head;
            while let Some(entry_key) = cursor {
                let entry = context.chunks.get(entry_key);
                dump.push_str(&format!(" {}", ObjectId::new(self.id, entry.object)));
                cursor = entry.next;
            }
            dump.push('\n');
        }
        debug!(database = %self.id, "bucket dump:\n{dump}");
        dump
    }
}
