//! Recording instantiation backend.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lazygrid_foundation::{
    GridItemVisual, InstanceFactory, InstantiationError, Point, TemplateKey,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Serial number the factory gives each visual it creates.
pub type VisualSerial = u32;

/// One lifecycle call observed by the recording backend.
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent {
    Created {
        visual: VisualSerial,
        template: String,
    },
    Placed {
        visual: VisualSerial,
        position: Point,
    },
    Activated {
        visual: VisualSerial,
    },
    Deactivated {
        visual: VisualSerial,
    },
    Rendered {
        visual: VisualSerial,
        data: String,
    },
    Released {
        visual: VisualSerial,
    },
    Destroyed {
        visual: VisualSerial,
    },
}

impl GridEvent {
    pub fn visual(&self) -> VisualSerial {
        match self {
            GridEvent::Created { visual, .. }
            | GridEvent::Placed { visual, .. }
            | GridEvent::Activated { visual }
            | GridEvent::Deactivated { visual }
            | GridEvent::Rendered { visual, .. }
            | GridEvent::Released { visual }
            | GridEvent::Destroyed { visual } => *visual,
        }
    }
}

/// Shared, append-only list of [`GridEvent`]s.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GridEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: GridEvent) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<GridEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Events recorded after the first `mark` entries.
    ///
    /// Take `mark` from [`EventLog::len`] to look at one step of a test
    /// without truncating the history the lifecycle checks need.
    pub fn events_since(&self, mark: usize) -> Vec<GridEvent> {
        self.events.borrow().iter().skip(mark).cloned().collect()
    }

    pub fn count(&self, predicate: impl Fn(&GridEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }

    pub fn created_count(&self) -> usize {
        self.count(|e| matches!(e, GridEvent::Created { .. }))
    }

    pub fn destroyed_count(&self) -> usize {
        self.count(|e| matches!(e, GridEvent::Destroyed { .. }))
    }

    pub fn render_count(&self) -> usize {
        self.count(|e| matches!(e, GridEvent::Rendered { .. }))
    }

    pub fn release_count(&self) -> usize {
        self.count(|e| matches!(e, GridEvent::Released { .. }))
    }

    /// Data labels in render order.
    pub fn rendered_data(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                GridEvent::Rendered { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Only the render and release calls, in order.
    pub fn render_release_sequence(&self) -> Vec<GridEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, GridEvent::Rendered { .. } | GridEvent::Released { .. }))
            .cloned()
            .collect()
    }

    /// Visuals rendered and not released since.
    pub fn bound_visuals(&self) -> FxHashSet<VisualSerial> {
        let mut bound = FxHashSet::default();
        for event in self.events.borrow().iter() {
            match event {
                GridEvent::Rendered { visual, .. } => {
                    bound.insert(*visual);
                }
                GridEvent::Released { visual } | GridEvent::Destroyed { visual } => {
                    bound.remove(visual);
                }
                _ => {}
            }
        }
        bound
    }

    /// Walks the log and panics on any lifecycle violation:
    /// - a visual created twice, or used before creation or after destruction
    /// - a visual destroyed twice
    /// - a render on an inactive visual
    /// - a render on a visual that is still bound (no release in between)
    pub fn assert_lifecycle(&self) {
        #[derive(Default)]
        struct Track {
            active: bool,
            bound: bool,
            destroyed: bool,
        }

        let mut tracks: FxHashMap<VisualSerial, Track> = FxHashMap::default();
        for (at, event) in self.events.borrow().iter().enumerate() {
            let visual = event.visual();
            if let GridEvent::Created { .. } = event {
                assert!(
                    tracks.insert(visual, Track::default()).is_none(),
                    "event {at}: visual {visual} created twice"
                );
                continue;
            }

            let track = tracks
                .get_mut(&visual)
                .unwrap_or_else(|| panic!("event {at}: visual {visual} used before creation"));
            assert!(
                !track.destroyed,
                "event {at}: visual {visual} used after destruction: {event:?}"
            );

            match event {
                GridEvent::Activated { .. } => track.active = true,
                GridEvent::Deactivated { .. } => track.active = false,
                GridEvent::Rendered { .. } => {
                    assert!(track.active, "event {at}: visual {visual} rendered while inactive");
                    assert!(!track.bound, "event {at}: visual {visual} bound twice");
                    track.bound = true;
                }
                GridEvent::Released { .. } => track.bound = false,
                GridEvent::Destroyed { .. } => track.destroyed = true,
                GridEvent::Created { .. } | GridEvent::Placed { .. } => {}
            }
        }
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.events.borrow().iter()).finish()
    }
}

/// Visual that reports every call to an [`EventLog`].
#[derive(Debug)]
pub struct RecordingVisual {
    serial: VisualSerial,
    template: TemplateKey,
    log: EventLog,
    active: bool,
    position: Point,
    bound: Option<String>,
}

impl RecordingVisual {
    pub fn serial(&self) -> VisualSerial {
        self.serial
    }

    pub fn template(&self) -> &TemplateKey {
        &self.template
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Label of the data currently rendered, if bound.
    pub fn bound_data(&self) -> Option<&str> {
        self.bound.as_deref()
    }
}

impl<T: fmt::Display> GridItemVisual<T> for RecordingVisual {
    fn place(&mut self, position: Point) {
        self.position = position;
        self.log.push(GridEvent::Placed {
            visual: self.serial,
            position,
        });
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        let visual = self.serial;
        self.log.push(if active {
            GridEvent::Activated { visual }
        } else {
            GridEvent::Deactivated { visual }
        });
    }

    fn render(&mut self, data: &T) {
        let data = data.to_string();
        self.bound = Some(data.clone());
        self.log.push(GridEvent::Rendered {
            visual: self.serial,
            data,
        });
    }

    fn release(&mut self) {
        self.bound = None;
        self.log.push(GridEvent::Released {
            visual: self.serial,
        });
    }
}

/// [`InstanceFactory`] producing [`RecordingVisual`]s, with failure injection.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    log: EventLog,
    next_serial: VisualSerial,
    fail_next: usize,
    failing_templates: FxHashSet<TemplateKey>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records into an existing log.
    pub fn with_log(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Makes the next `count` creations fail.
    pub fn fail_next(&mut self, count: usize) {
        self.fail_next = count;
    }

    /// Makes every creation for `template` fail until recovered.
    pub fn fail_template(&mut self, template: impl Into<TemplateKey>) {
        self.failing_templates.insert(template.into());
    }

    pub fn recover_template(&mut self, template: impl Into<TemplateKey>) {
        self.failing_templates.remove(&template.into());
    }
}

impl<T: fmt::Display> InstanceFactory<T> for RecordingFactory {
    type Visual = RecordingVisual;

    fn create(&mut self, template: &TemplateKey) -> Result<RecordingVisual, InstantiationError> {
        if self.failing_templates.contains(template) {
            return Err(InstantiationError::new(format!(
                "template '{template}' is unavailable"
            )));
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(InstantiationError::new("injected failure"));
        }

        self.next_serial += 1;
        let serial = self.next_serial;
        self.log.push(GridEvent::Created {
            visual: serial,
            template: template.to_string(),
        });
        log::trace!("Recording factory created visual {} ({})", serial, template);

        Ok(RecordingVisual {
            serial,
            template: template.clone(),
            log: self.log.clone(),
            active: false,
            position: Point::ZERO,
            bound: None,
        })
    }

    fn destroy(&mut self, visual: RecordingVisual) {
        self.log.push(GridEvent::Destroyed {
            visual: visual.serial,
        });
    }
}
