use super::types::{ObjectId, TypeTag};
use super::GridDatabase;
use common::shapes::Rect;

impl<T> GridDatabase<T> {
    /// Union of the exact extents of every object, or [`Rect::EMPTY`] when
    /// nothing is registered.
    pub fn extents(&self) -> Rect {
        let mut extents = self.all_objects.iter().map(|key| self.slots[*key].extent);
        match extents.next() {
            Some(first) => extents.fold(first, |acc, extent| acc.union(&extent)),
            None => Rect::EMPTY,
        }
    }

    pub fn count(&self) -> usize {
        self.all_objects.len()
    }

    pub fn count_of_type(&self, tag: TypeTag) -> usize {
        match self.hot_lists.get(&tag) {
            Some(list) => list.len(),
            None => self
                .all_objects
                .iter()
                .filter(|key| self.slots[**key].type_tag == tag)
                .count(),
        }
    }

    pub fn has_any_of_type(&self, tag: TypeTag) -> bool {
        match self.hot_lists.get(&tag) {
            Some(list) => !list.is_empty(),
            None => self
                .all_objects
                .iter()
                .any(|key| self.slots[*key].type_tag == tag),
        }
    }

    /// The `index`th object of the registration list.
    ///
    /// Positions shift on every register and unregister.
    pub fn object_by_positional_index(&self, index: usize) -> Option<(ObjectId, &T)> {
        let key = *self.all_objects.get(index)?;
        Some((ObjectId::new(self.id, key), &self.slots[key].object))
    }
}
