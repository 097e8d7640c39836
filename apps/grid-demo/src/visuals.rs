//! Log-only visuals standing in for a real rendering backend.

use std::fmt;

use lazygrid_foundation::{GridItemVisual, Point};

/// One entry of the sectioned feed.
#[derive(Clone, Debug)]
pub enum FeedEntry {
    Header { title: String },
    Card { title: String, likes: u32 },
}

impl fmt::Display for FeedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedEntry::Header { title } => write!(f, "== {title} =="),
            FeedEntry::Card { title, likes } => write!(f, "{title} ({likes} likes)"),
        }
    }
}

/// One photo in the wrapping grid.
#[derive(Clone, Debug)]
pub struct Photo {
    pub id: u32,
    pub caption: String,
}

/// A visual that logs what it would draw.
///
/// `kind` names the template it was built for.
pub struct LogVisual {
    kind: &'static str,
    serial: u32,
    position: Point,
    active: bool,
}

impl LogVisual {
    pub fn new(kind: &'static str, serial: u32) -> Self {
        log::debug!("Building {} visual #{}", kind, serial);
        Self {
            kind,
            serial,
            position: Point::ZERO,
            active: false,
        }
    }

    fn draw(&self, content: &dyn fmt::Display) {
        log::info!(
            "[{} #{}] at ({:.0}, {:.0}): {}",
            self.kind,
            self.serial,
            self.position.x,
            self.position.y,
            content
        );
    }
}

impl GridItemVisual<FeedEntry> for LogVisual {
    fn place(&mut self, position: Point) {
        self.position = position;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn render(&mut self, data: &FeedEntry) {
        debug_assert!(self.active);
        self.draw(data);
    }

    fn release(&mut self) {
        log::trace!("[{} #{}] released", self.kind, self.serial);
    }
}

impl GridItemVisual<Photo> for LogVisual {
    fn place(&mut self, position: Point) {
        self.position = position;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn render(&mut self, data: &Photo) {
        debug_assert!(self.active);
        self.draw(&format_args!("photo {} '{}'", data.id, data.caption));
    }
}
