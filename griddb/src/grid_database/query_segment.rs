use super::types::{
    validate_point, CollisionGeometry, LineOfSightHit, ObjectId, ObjectKey, QuerySweep,
    StateIndex, TypeFilter,
};
use super::GridDatabase;
use crate::error::GridResult;
use collisions::{segment_circle, segment_polygon, SegmentHit};
use common::shapes::{Point, Rect};
use smallvec::SmallVec;

impl<T: CollisionGeometry> GridDatabase<T> {
    /// Nearest object matching `filter` whose exact geometry the segment
    /// `start -> end` crosses.
    ///
    /// `time` is the fraction of the segment travelled before the hit. When
    /// two objects are hit at the same time the one visited first wins.
    pub fn find_along_segment(
        &mut self,
        filter: TypeFilter<'_>,
        state: StateIndex,
        start: Point,
        end: Point,
    ) -> GridResult<Option<LineOfSightHit>> {
        validate_point(start)?;
        validate_point(end)?;
        let mut candidates: SmallVec<[ObjectKey; 32]> = SmallVec::new();
        self.visit_rect(
            filter,
            &Rect::from_corners(start, end),
            QuerySweep::Fresh,
            &mut |id: ObjectId, _: &T| candidates.push(id.key),
        )?;
        Ok(self.nearest_hit(candidates, state, start, end))
    }

    /// Same narrowing as [`find_along_segment`](Self::find_along_segment),
    /// over candidates gathered by the caller.
    pub fn find_along_segment_in(
        &self,
        candidates: &[ObjectId],
        state: StateIndex,
        start: Point,
        end: Point,
    ) -> GridResult<Option<LineOfSightHit>> {
        validate_point(start)?;
        validate_point(end)?;
        let keys = candidates
            .iter()
            .map(|id| self.resolve(*id))
            .collect::<GridResult<SmallVec<[ObjectKey; 32]>>>()?;
        Ok(self.nearest_hit(keys, state, start, end))
    }

    /// True when no object matching `filter` blocks the segment.
    pub fn has_line_of_sight(
        &mut self,
        filter: TypeFilter<'_>,
        state: StateIndex,
        start: Point,
        end: Point,
    ) -> GridResult<bool> {
        Ok(self.find_along_segment(filter, state, start, end)?.is_none())
    }

    fn nearest_hit<I>(
        &self,
        candidates: I,
        state: StateIndex,
        start: Point,
        end: Point,
    ) -> Option<LineOfSightHit>
    where
        I: IntoIterator<Item = ObjectKey>,
    {
        let mut best: Option<LineOfSightHit> = None;
        for key in candidates {
            let Some(hit) = self.narrow(key, state, start, end) else {
                continue;
            };
            // Hits outside the segment are ignored, they do not end the search
            if !(0.0..=1.0).contains(&hit.time) {
                continue;
            }
            if best.map_or(true, |best| hit.time < best.time) {
                best = Some(LineOfSightHit {
                    id: ObjectId::new(self.id, key),
                    time: hit.time,
                    normal: hit.normal,
                });
            }
        }
        best
    }

    #[inline(always)]
    fn narrow(
        &self,
        key: ObjectKey,
        state: StateIndex,
        start: Point,
        end: Point,
    ) -> Option<SegmentHit> {
        let object = &self.slots[key].object;
        if !object.is_collision_enabled() {
            return None;
        }
        if let Some(points) = object.collision_polygon() {
            return segment_polygon(points, start, end);
        }
        let circle = object.collision_circle(state)?;
        segment_circle(&circle, start, end)
    }
}
