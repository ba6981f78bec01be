use super::config::GridConfig;
use super::context::GridContext;
use super::types::IndexedObject;
use super::GridDatabase;
use crate::error::GridResult;
use fxhash::FxHashMap;
use slotmap::SlotMap;
use tracing::debug;

impl<T> GridDatabase<T> {
    /// Creates a database with its own private [`GridContext`].
    pub fn new(config: GridConfig) -> GridResult<Self> {
        let context = GridContext::with_entry_capacity(config.entry_reserve);
        Self::with_context(&context, config)
    }

    /// Creates a database that shares `context` (and its entry pool and
    /// query stamps) with every other database built on it.
    pub fn with_context(context: &GridContext, config: GridConfig) -> GridResult<Self> {
        config.validate()?;
        let row_count = config.row_count() as usize;
        let (id, stamp_epoch) = {
            let mut inner = context.borrow_mut();
            (inner.attach_database(config.entry_reserve), inner.stamp_epoch())
        };
        let mut hot_lists = FxHashMap::default();
        for tag in &config.hot_types {
            hot_lists.entry(*tag).or_insert_with(Vec::new);
        }
        debug!(
            database = %id,
            cell_width = config.cell_width(),
            row_count,
            hot_types = config.hot_types.len(),
            "grid database created"
        );
        Ok(GridDatabase {
            id,
            context: context.clone(),
            row_mask: row_count as i64 - 1,
            stamp_epoch,
            buckets: vec![None; row_count * row_count],
            slots: SlotMap::with_key(),
            all_objects: Vec::new(),
            hot_lists,
            config,
        })
    }

    /// Deletes every object.
    pub fn clear(&mut self) {
        self.release_buckets();
        self.slots.clear();
        self.all_objects.clear();
        for list in self.hot_lists.values_mut() {
            list.clear();
        }
    }

    /// Unregisters every object and hands them back in registration-list order.
    pub fn take_all(&mut self) -> Vec<T> {
        self.release_buckets();
        for list in self.hot_lists.values_mut() {
            list.clear();
        }
        let mut objects = Vec::with_capacity(self.all_objects.len());
        for key in self.all_objects.drain(..) {
            if let Some(slot) = self.slots.remove(key) {
                objects.push(slot.object);
            }
        }
        objects
    }
}

impl<T: IndexedObject + Clone> GridDatabase<T> {
    /// Copies every object into a new database on the same context.
    ///
    /// Copies get the extent this database indexed them with, even if the
    /// original object was changed through [`get_mut`](Self::get_mut) without
    /// a [`sync_extent`](Self::sync_extent).
    pub fn duplicate(&self) -> GridResult<GridDatabase<T>> {
        let mut copy = GridDatabase::with_context(&self.context, self.config.clone())?;
        for key in &self.all_objects {
            let slot = &self.slots[*key];
            let mut object = slot.object.clone();
            object.set_extent(slot.extent);
            copy.register(object)?;
        }
        Ok(copy)
    }
}

impl<T> Drop for GridDatabase<T> {
    fn drop(&mut self) {
        self.release_buckets();
        let mut context = self.context.borrow_mut();
        context.detach_database();
        debug!(
            database = %self.id,
            objects = self.slots.len(),
            live_entries = context.chunks.live(),
            "grid database dropped"
        );
    }
}
