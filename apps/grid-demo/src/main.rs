//! Scrolls two virtualized grids headlessly and prints their pool stats.
//!
//! Run with `RUST_LOG=info` to see every render, or `RUST_LOG=trace` to
//! follow each tick.

mod visuals;

use std::error::Error;

use lazygrid_foundation::{
    DataGrid, DataItem, GridConfig, GridItemVisual, GridStats, InstanceFactory, ScrollAxis,
    ScrollState, Size, TemplateRegistry, Viewport,
};

use visuals::{FeedEntry, LogVisual, Photo};

const SCREEN_WIDTH: f32 = 360.0;
const SCREEN_HEIGHT: f32 = 640.0;
const SECTION_COUNT: usize = 40;
const CARDS_PER_SECTION: usize = 24;
const PHOTO_COUNT: u32 = 600;

fn registry<T: 'static>(templates: &[&'static str]) -> TemplateRegistry<T>
where
    LogVisual: GridItemVisual<T>,
{
    let mut registry = TemplateRegistry::new();
    for &kind in templates {
        let mut serial = 0;
        registry.register(kind, move || {
            serial += 1;
            Box::new(LogVisual::new(kind, serial)) as Box<dyn GridItemVisual<T>>
        });
    }
    registry
}

fn feed_items(sections: usize) -> Vec<DataItem<FeedEntry>> {
    let mut items = Vec::with_capacity(sections * (CARDS_PER_SECTION + 1));
    for section in 0..sections {
        items.push(DataItem::new(
            "header",
            Size::new(SCREEN_WIDTH, 48.0),
            FeedEntry::Header {
                title: format!("Section {section}"),
            },
        ));
        for card in 0..CARDS_PER_SECTION {
            let likes = ((section * 31 + card * 17) % 500) as u32;
            items.push(DataItem::new(
                "card",
                Size::new(SCREEN_WIDTH, 96.0 + (card % 3) as f32 * 24.0),
                FeedEntry::Card {
                    title: format!("Post {section}.{card}"),
                    likes,
                },
            ));
        }
    }
    items
}

fn photo_items(count: u32) -> Vec<DataItem<Photo>> {
    (0..count)
        .map(|id| {
            let width = 80.0 + (id % 4) as f32 * 30.0;
            DataItem::new(
                "photo",
                Size::new(width, 90.0),
                Photo {
                    id,
                    caption: format!("IMG_{id:04}"),
                },
            )
        })
        .collect()
}

/// Flings the viewport with a decaying velocity, ticking once per frame.
/// Returns the number of frames that changed the grid.
fn fling<T, F>(grid: &mut DataGrid<T, F>, viewport: &mut ScrollState, velocity: f32) -> usize
where
    F: InstanceFactory<T>,
{
    let mut velocity = velocity;
    let mut changed = 0;
    while velocity.abs() >= 1.0 {
        let consumed = viewport.scroll_by(velocity);
        if grid.tick(&*viewport).changed() {
            changed += 1;
        }
        if consumed == 0.0 {
            break;
        }
        velocity *= 0.95;
    }
    changed
}

fn print_stats(title: &str, stats: &GridStats) {
    println!("{title}");
    println!("  in use:      {}", stats.items_in_use);
    println!("  pooled:      {}", stats.items_in_pool);
    println!("  created:     {}", stats.total_created);
    println!("  destroyed:   {}", stats.total_destroyed);
    println!("  reused:      {}", stats.reuse_count);
    println!("  failures:    {}", stats.instantiation_failures);
    println!("  last tick:   {:?}", stats.last_tick.duration);
}

fn run_feed() -> Result<(), Box<dyn Error>> {
    let mut grid: DataGrid<FeedEntry, _> =
        DataGrid::attach(GridConfig::vertical(), registry(&["header", "card"]))?;
    grid.set_items(feed_items(SECTION_COUNT));

    let mut viewport = ScrollState::new(SCREEN_HEIGHT);
    grid.sync_content_extent(&mut viewport);
    grid.tick(&viewport);
    log::info!(
        "Feed: {} items, content extent {}",
        grid.len(),
        grid.content_extent()
    );

    let frames = fling(&mut grid, &mut viewport, 180.0);
    log::info!("Fling settled at {} after {} changing frames", viewport.scroll_offset(), frames);
    fling(&mut grid, &mut viewport, -120.0);

    grid.move_to_end(&mut viewport);
    grid.tick(&viewport);
    grid.move_to_start(&mut viewport);
    grid.tick(&viewport);
    print_stats("feed after scrolling", grid.stats());

    // Pull-to-refresh: a shorter list replaces the current one.
    grid.set_items(feed_items(SECTION_COUNT / 4));
    grid.sync_content_extent(&mut viewport);
    grid.tick(&viewport);
    print_stats("feed after refresh", grid.stats());

    let destroyed = grid.destroy();
    println!("feed destroyed {destroyed} instances");
    Ok(())
}

fn run_photos() -> Result<(), Box<dyn Error>> {
    let config = GridConfig::wrapping(ScrollAxis::Vertical, SCREEN_WIDTH);
    let mut grid: DataGrid<Photo, _> = DataGrid::attach(config, registry(&["photo"]))?;
    grid.set_items(photo_items(PHOTO_COUNT));

    let mut viewport = ScrollState::new(SCREEN_HEIGHT);
    grid.sync_content_extent(&mut viewport);
    grid.tick(&viewport);
    log::info!(
        "Photos: {} items in rows of {} wide, content extent {}",
        grid.len(),
        SCREEN_WIDTH,
        grid.content_extent()
    );

    while !viewport.is_at_end() {
        viewport.scroll_by(SCREEN_HEIGHT / 3.0);
        grid.tick(&viewport);
    }

    // Rotating the device changes the viewport extent without scrolling.
    viewport.set_viewport_extent(SCREEN_WIDTH);
    grid.tick(&viewport);
    print_stats("photos after sweep", grid.stats());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    run_feed()?;
    run_photos()?;
    Ok(())
}
