use super::types::{sort_rank, validate_extent, IndexedObject, ObjectId, ObjectKey, TypeTag};
use super::{GridDatabase, ObjectSlot};
use crate::error::{GridError, GridResult};
use common::shapes::Rect;
use tracing::trace;

impl<T: IndexedObject> GridDatabase<T> {
    /// Indexes `object` under its current extent and takes ownership of it.
    pub fn register(&mut self, object: T) -> GridResult<ObjectId> {
        let extent = object.extent();
        validate_extent(&extent)?;
        let type_tag = object.type_tag();
        let rank = sort_rank(object.geometry_kind(), object.is_wall());
        let range = self.bucket_range_for(&extent);
        let key = self.slots.insert(ObjectSlot {
            object,
            type_tag,
            extent,
            range,
            query_stamp: 0,
            chain: None,
            sort_rank: rank,
            hot_slot: None,
        });
        self.link(key);

        let slots = &self.slots;
        let position = self
            .all_objects
            .partition_point(|other| slots[*other].sort_rank <= rank);
        self.all_objects.insert(position, key);

        if let Some(list) = self.hot_lists.get_mut(&type_tag) {
            self.slots[key].hot_slot = Some(list.len());
            list.push(key);
        }

        let id = ObjectId::new(self.id, key);
        trace!(id = %id, type_tag = %type_tag, ?range, "register");
        Ok(id)
    }

    /// Registers every object, stopping at the first one that fails.
    ///
    /// Objects before the failing one stay registered.
    pub fn register_all<I>(&mut self, objects: I) -> GridResult<Vec<ObjectId>>
    where
        I: IntoIterator<Item = T>,
    {
        let objects = objects.into_iter();
        let mut ids = Vec::with_capacity(objects.size_hint().0);
        for object in objects {
            ids.push(self.register(object)?);
        }
        Ok(ids)
    }

    /// Moves the object to `extent`, updating the object itself as well.
    pub fn update_extent(&mut self, id: ObjectId, extent: Rect) -> GridResult<()> {
        validate_extent(&extent)?;
        let key = self.resolve(id)?;
        self.slots[key].object.set_extent(extent);
        self.relink(key, extent);
        Ok(())
    }

    /// Re-reads the object's own extent, for objects moved through
    /// [`get_mut`](Self::get_mut).
    pub fn sync_extent(&mut self, id: ObjectId) -> GridResult<()> {
        let key = self.resolve(id)?;
        let extent = self.slots[key].object.extent();
        validate_extent(&extent)?;
        self.relink(key, extent);
        Ok(())
    }
}

impl<T> GridDatabase<T> {
    pub(crate) fn resolve(&self, id: ObjectId) -> GridResult<ObjectKey> {
        if id.database != self.id {
            return Err(GridError::ForeignObject {
                id,
                database: self.id,
            });
        }
        if !self.slots.contains_key(id.key) {
            return Err(GridError::NotRegistered { id });
        }
        Ok(id.key)
    }

    /// Removes the object from the index and hands it back.
    pub fn unregister(&mut self, id: ObjectId) -> GridResult<T> {
        let key = self.resolve(id)?;
        self.unlink(key);

        if let Some(position) = self.all_objects.iter().position(|other| *other == key) {
            self.all_objects.remove(position);
        }

        let type_tag = self.slots[key].type_tag;
        if let Some(index) = self.slots[key].hot_slot {
            if let Some(list) = self.hot_lists.get_mut(&type_tag) {
                list.swap_remove(index);
                if let Some(moved) = list.get(index) {
                    self.slots[*moved].hot_slot = Some(index);
                }
            }
        }

        trace!(id = %id, type_tag = %type_tag, "unregister");
        match self.slots.remove(key) {
            Some(slot) => Ok(slot.object),
            None => Err(GridError::NotRegistered { id }),
        }
    }

    /// Removes the object from the index and drops it.
    pub fn delete(&mut self, id: ObjectId) -> GridResult<()> {
        self.unregister(id).map(drop)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.resolve(id).is_ok()
    }

    pub fn get(&self, id: ObjectId) -> GridResult<&T> {
        let key = self.resolve(id)?;
        Ok(&self.slots[key].object)
    }

    /// Mutable access to the object.
    ///
    /// Changing the object's extent this way is not seen by queries until
    /// [`sync_extent`](Self::sync_extent) is called.
    pub fn get_mut(&mut self, id: ObjectId) -> GridResult<&mut T> {
        let key = self.resolve(id)?;
        Ok(&mut self.slots[key].object)
    }

    /// The extent the object is currently indexed under.
    pub fn extent_of(&self, id: ObjectId) -> GridResult<Rect> {
        let key = self.resolve(id)?;
        Ok(self.slots[key].extent)
    }

    pub fn type_of(&self, id: ObjectId) -> GridResult<TypeTag> {
        let key = self.resolve(id)?;
        Ok(self.slots[key].type_tag)
    }

    /// Ids of every object, in registration-list order.
    pub fn all(&self) -> impl Iterator<Item = ObjectId> + '_ {
        let database = self.id;
        self.all_objects
            .iter()
            .map(move |key| ObjectId::new(database, *key))
    }

    /// Ids of every object tagged `tag`.
    ///
    /// Served from the hot list when `tag` has one; its order is arbitrary.
    pub fn all_of_type(&self, tag: TypeTag) -> Box<dyn Iterator<Item = ObjectId> + '_> {
        let database = self.id;
        match self.hot_lists.get(&tag) {
            Some(list) => Box::new(list.iter().map(move |key| ObjectId::new(database, *key))),
            None => Box::new(
                self.all_objects
                    .iter()
                    .filter(move |key| self.slots[**key].type_tag == tag)
                    .map(move |key| ObjectId::new(database, *key)),
            ),
        }
    }

    /// Objects with their ids, in registration-list order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> + '_ {
        self.all()
            .map(move |id| (id, &self.slots[id.key].object))
    }

    pub fn iter_of_type(&self, tag: TypeTag) -> impl Iterator<Item = (ObjectId, &T)> + '_ {
        self.all_of_type(tag)
            .map(move |id| (id, &self.slots[id.key].object))
    }

    pub fn is_hot_type(&self, tag: TypeTag) -> bool {
        self.hot_lists.contains_key(&tag)
    }
}
