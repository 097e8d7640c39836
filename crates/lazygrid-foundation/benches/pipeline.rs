use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazygrid_foundation::{
    layout_items, Arrangement, DataGrid, DataItem, GridConfig, GridItemVisual, Point,
    ScrollAxis, ScrollState, Size, TemplateRegistry, Viewport,
};
use lazygrid_testing::fixtures::{mixed_items, sized_items};

const ITEM_COUNT_SAMPLES: &[usize] = &[1_000, 10_000, 100_000];
const VIEWPORT_EXTENT: f32 = 1920.0;
const CROSS_EXTENT: f32 = 1080.0;
const SCROLL_STEP: f32 = 24.0;

#[derive(Default)]
struct NullVisual;

impl GridItemVisual<String> for NullVisual {
    fn place(&mut self, position: Point) {
        black_box(position);
    }

    fn set_active(&mut self, active: bool) {
        black_box(active);
    }

    fn render(&mut self, data: &String) {
        black_box(data.len());
    }
}

fn registry() -> TemplateRegistry<String> {
    let mut registry = TemplateRegistry::new();
    registry
        .register("header", || Box::new(NullVisual))
        .register("card", || Box::new(NullVisual));
    registry
}

fn grid_sizes(count: usize) -> Vec<(f32, f32)> {
    (0..count)
        .map(|i| (120.0 + (i % 7) as f32 * 30.0, 80.0 + (i % 4) as f32 * 20.0))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &count in ITEM_COUNT_SAMPLES {
        let sizes = grid_sizes(count);
        group.bench_with_input(BenchmarkId::new("wrapped_rows", count), &count, |b, _| {
            let mut items = sized_items(&sizes);
            b.iter(|| {
                let result =
                    layout_items(&mut items, ScrollAxis::Vertical, Arrangement::Both, CROSS_EXTENT);
                black_box(result);
            });
        });
    }
    group.finish();
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_sweep");
    for &count in ITEM_COUNT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("vertical_list", count), &count, |b, &count| {
            let items = mixed_items(count, Size::new(CROSS_EXTENT, 96.0), &["header", "card"]);
            let mut grid = match DataGrid::attach(GridConfig::vertical(), registry()) {
                Ok(grid) => grid,
                Err(err) => panic!("bench grid rejected: {err}"),
            };
            grid.set_items(items);
            let mut viewport = ScrollState::new(VIEWPORT_EXTENT);
            grid.sync_content_extent(&mut viewport);
            grid.tick(&viewport);

            b.iter(|| {
                if viewport.is_at_end() {
                    grid.move_to_start(&mut viewport);
                } else {
                    viewport.scroll_by(SCROLL_STEP);
                }
                black_box(grid.tick(&viewport));
            });
            black_box(viewport.scroll_offset());
        });
    }
    group.finish();
}

fn bench_reassign(c: &mut Criterion) {
    let mut group = c.benchmark_group("reassign");
    let count = 10_000;
    group.bench_function(BenchmarkId::new("wrapped_rows", count), |b| {
        let sizes = grid_sizes(count);
        let config = GridConfig::wrapping(ScrollAxis::Vertical, CROSS_EXTENT);
        let mut grid = match DataGrid::attach(config, registry()) {
            Ok(grid) => grid,
            Err(err) => panic!("bench grid rejected: {err}"),
        };
        let viewport = ScrollState::new(VIEWPORT_EXTENT);

        b.iter(|| {
            let items = sized_items(&sizes)
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    let template = if i % 10 == 0 { "header" } else { "card" };
                    DataItem::new(template, item.size(), item.into_data())
                })
                .collect();
            grid.set_items(items);
            black_box(grid.tick(&viewport));
        });
    });
    group.finish();
}

criterion_group!(pipeline, bench_layout, bench_scroll_sweep, bench_reassign);
criterion_main!(pipeline);
