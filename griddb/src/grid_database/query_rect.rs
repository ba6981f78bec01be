use super::types::{validate_extent, ObjectId, QuerySweep, TypeFilter};
use super::GridDatabase;
use crate::error::GridResult;
use common::shapes::Rect;

impl<T> GridDatabase<T> {
    /// Appends every object matching `filter` whose extent intersects `rect`.
    ///
    /// Each object is reported once no matter how many buckets it spans.
    pub fn find_in_rect(
        &mut self,
        filter: TypeFilter<'_>,
        rect: &Rect,
        out: &mut Vec<ObjectId>,
    ) -> GridResult<()> {
        self.find_in_rect_sweep(filter, rect, QuerySweep::Fresh, out)
    }

    /// [`find_in_rect`](Self::find_in_rect) with explicit control of the
    /// dedup sweep. With [`QuerySweep::Continue`], objects already reported by
    /// the previous query are left out, so both result sets can be merged.
    pub fn find_in_rect_sweep(
        &mut self,
        filter: TypeFilter<'_>,
        rect: &Rect,
        sweep: QuerySweep,
        out: &mut Vec<ObjectId>,
    ) -> GridResult<()> {
        self.visit_rect(filter, rect, sweep, &mut |id: ObjectId, _: &T| out.push(id))
    }

    pub fn find_in_rect_with<F>(
        &mut self,
        filter: TypeFilter<'_>,
        rect: &Rect,
        mut f: F,
    ) -> GridResult<()>
    where
        F: FnMut(ObjectId, &T),
    {
        self.visit_rect(filter, rect, QuerySweep::Fresh, &mut f)
    }

    #[inline(always)]
    pub(crate) fn visit_rect<F>(
        &mut self,
        filter: TypeFilter<'_>,
        rect: &Rect,
        sweep: QuerySweep,
        f: &mut F,
    ) -> GridResult<()>
    where
        F: FnMut(ObjectId, &T),
    {
        validate_extent(rect)?;
        let range = self.bucket_range_for(rect);
        let (stamp, epoch) = {
            let mut context = self.context.borrow_mut();
            let stamp = match sweep {
                QuerySweep::Fresh => context.next_query_stamp(),
                QuerySweep::Continue => context.continue_query_stamp(),
            };
            (stamp, context.stamp_epoch())
        };
        if epoch != self.stamp_epoch {
            self.reset_query_stamps(epoch);
        }
        let database = self.id;
        for y in range.min_y..=range.max_y {
            for x in range.min_x..=range.max_x {
                let mut cursor = self.buckets[self.bucket_index(x, y)];
                while let Some(entry_key) = cursor {
                    let entry = *self.context.borrow().chunks.get(entry_key);
                    cursor = entry.next;
                    let slot = &mut self.slots[entry.object];
                    if slot.query_stamp == stamp
                        || !filter.matches(slot.type_tag)
                        || !slot.extent.intersects(rect)
                    {
                        continue;
                    }
                    slot.query_stamp = stamp;
                    f(ObjectId::new(database, entry.object), &slot.object);
                }
            }
        }
        Ok(())
    }

    // The shared stamp wrapped since this database last queried
    fn reset_query_stamps(&mut self, epoch: u32) {
        for slot in self.slots.values_mut() {
            slot.query_stamp = 0;
        }
        self.stamp_epoch = epoch;
    }

    /// Appends every object matching `filter`, anywhere in the world.
    ///
    /// A single-tag filter on a hot type is served from its hot list.
    pub fn find_all(&self, filter: TypeFilter<'_>, out: &mut Vec<ObjectId>) {
        let database = self.id;
        if let TypeFilter::Tag(tag) = filter {
            if let Some(list) = self.hot_lists.get(&tag) {
                out.extend(list.iter().map(|key| ObjectId::new(database, *key)));
                return;
            }
        }
        out.extend(
            self.all_objects
                .iter()
                .filter(|key| filter.matches(self.slots[**key].type_tag))
                .map(|key| ObjectId::new(database, *key)),
        );
    }
}
