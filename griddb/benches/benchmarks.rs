use criterion::{black_box, criterion_group, criterion_main, Criterion};
use griddb::shapes::{Point, Rect};
use griddb::{
    CollisionGeometry, GridConfig, GridDatabase, IndexedObject, ObjectId, StateIndex, TypeFilter,
    TypeTag,
};
use rand::prelude::*;

const WORLD: Rect = Rect {
    min_x: 0.0,
    min_y: 0.0,
    max_x: 4000.0,
    max_y: 4000.0,
};

#[derive(Clone)]
struct Block {
    tag: TypeTag,
    extent: Rect,
    outline: [Point; 4],
}

impl Block {
    fn new(tag: TypeTag, extent: Rect) -> Self {
        Block {
            tag,
            extent,
            outline: [
                Point::new(extent.min_x, extent.min_y),
                Point::new(extent.max_x, extent.min_y),
                Point::new(extent.max_x, extent.max_y),
                Point::new(extent.min_x, extent.max_y),
            ],
        }
    }
}

impl IndexedObject for Block {
    fn type_tag(&self) -> TypeTag {
        self.tag
    }

    fn extent(&self) -> Rect {
        self.extent
    }

    fn set_extent(&mut self, extent: Rect) {
        *self = Block::new(self.tag, extent);
    }
}

impl CollisionGeometry for Block {
    fn collision_polygon(&self) -> Option<&[Point]> {
        Some(&self.outline[..])
    }
}

fn populated(count: usize, rng: &mut impl Rng) -> (GridDatabase<Block>, Vec<ObjectId>) {
    let mut db = GridDatabase::new(GridConfig::default()).unwrap();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let tag = TypeTag((i % 4) as u8);
        ids.push(db.register(Block::new(tag, WORLD.random_rect_inside(40.0, rng))).unwrap());
    }
    (db, ids)
}

fn register_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut db, _) = populated(1000, &mut rng);

    c.bench_function("griddb_register_unregister", |b| {
        b.iter(|| {
            let block = Block::new(TypeTag(0), WORLD.random_rect_inside(40.0, &mut rng));
            let id = db.register(black_box(block)).unwrap();
            db.delete(id).unwrap();
        })
    });
}

fn relink_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut db, ids) = populated(1000, &mut rng);

    c.bench_function("griddb_update_extent", |b| {
        b.iter(|| {
            let id = ids[rng.gen_range(0..ids.len())];
            let extent = WORLD.random_rect_inside(40.0, &mut rng);
            db.update_extent(black_box(id), extent).unwrap();
        })
    });
}

fn rect_query_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut db, _) = populated(5000, &mut rng);
    let mut found = Vec::new();

    c.bench_function("griddb_find_in_rect", |b| {
        b.iter(|| {
            found.clear();
            let rect = WORLD.random_rect_inside(300.0, &mut rng);
            db.find_in_rect(TypeFilter::Any, black_box(&rect), &mut found)
                .unwrap();
            black_box(found.len());
        })
    });

    let wanted = [TypeTag(1), TypeTag(3)];
    c.bench_function("griddb_find_in_rect_filtered", |b| {
        b.iter(|| {
            found.clear();
            let rect = WORLD.random_rect_inside(300.0, &mut rng);
            db.find_in_rect(TypeFilter::Tags(&wanted), black_box(&rect), &mut found)
                .unwrap();
            black_box(found.len());
        })
    });
}

fn segment_query_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut db, _) = populated(5000, &mut rng);

    c.bench_function("griddb_find_along_segment", |b| {
        b.iter(|| {
            let start = WORLD.random_point_inside(0.0, &mut rng);
            let end = start + (WORLD.random_point_inside(0.0, &mut rng) - start) * 0.1;
            black_box(
                db.find_along_segment(TypeFilter::Any, StateIndex::Actual, start, end)
                    .unwrap(),
            );
        })
    });
}

criterion_group!(
    benches,
    register_benchmark,
    relink_benchmark,
    rect_query_benchmark,
    segment_query_benchmark
);
criterion_main!(benches);
