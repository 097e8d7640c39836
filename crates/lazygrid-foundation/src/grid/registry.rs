//! Template registry: an [`InstanceFactory`] that picks a builder by key.

use crate::collections::map::HashMap;

use super::error::InstantiationError;
use super::item::TemplateKey;
use super::visual::{GridItemVisual, InstanceFactory};

type VisualBuilder<T> = Box<dyn FnMut() -> Box<dyn GridItemVisual<T>>>;

/// Maps template keys to builders of boxed visuals.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = TemplateRegistry::new();
/// registry.register("header", || Box::new(HeaderVisual::default()));
/// registry.register("card", || Box::new(CardVisual::default()));
/// let grid = DataGrid::attach(GridConfig::vertical(), registry)?;
/// ```
pub struct TemplateRegistry<T> {
    builders: HashMap<TemplateKey, VisualBuilder<T>>,
    destroyed: usize,
}

impl<T> TemplateRegistry<T> {
    pub fn new() -> Self {
        Self {
            builders: HashMap::default(),
            destroyed: 0,
        }
    }

    /// Registers (or replaces) the builder for `template`.
    pub fn register<F>(&mut self, template: impl Into<TemplateKey>, builder: F) -> &mut Self
    where
        F: FnMut() -> Box<dyn GridItemVisual<T>> + 'static,
    {
        self.builders.insert(template.into(), Box::new(builder));
        self
    }

    pub fn contains(&self, template: &TemplateKey) -> bool {
        self.builders.contains_key(template)
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Number of visuals destroyed through this registry.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl<T> Default for TemplateRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InstanceFactory<T> for TemplateRegistry<T> {
    type Visual = Box<dyn GridItemVisual<T>>;

    fn create(&mut self, template: &TemplateKey) -> Result<Self::Visual, InstantiationError> {
        match self.builders.get_mut(template) {
            Some(builder) => Ok(builder()),
            None => Err(InstantiationError::new(format!(
                "no template registered for '{template}'"
            ))),
        }
    }

    fn destroy(&mut self, visual: Self::Visual) {
        self.destroyed += 1;
        drop(visual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Label {
        name: &'static str,
        out: Rc<RefCell<Vec<String>>>,
    }

    impl GridItemVisual<u32> for Label {
        fn place(&mut self, _position: Point) {}

        fn set_active(&mut self, _active: bool) {}

        fn render(&mut self, data: &u32) {
            self.out.borrow_mut().push(format!("{}:{}", self.name, data));
        }
    }

    #[test]
    fn test_builder_selected_by_key() {
        let out = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TemplateRegistry::new();
        {
            let out = out.clone();
            registry.register("a", move || {
                Box::new(Label {
                    name: "a",
                    out: out.clone(),
                })
            });
        }
        {
            let out = out.clone();
            registry.register("b", move || {
                Box::new(Label {
                    name: "b",
                    out: out.clone(),
                })
            });
        }

        let mut visual = registry.create(&TemplateKey::from("b")).unwrap();
        visual.render(&5);
        registry.destroy(visual);

        assert_eq!(*out.borrow(), vec!["b:5".to_string()]);
        assert_eq!(registry.destroyed_count(), 1);
    }

    #[test]
    fn test_unknown_template_fails() {
        let mut registry: TemplateRegistry<u32> = TemplateRegistry::new();
        let err = registry.create(&TemplateKey::from("missing")).err().unwrap();
        assert!(err.reason().contains("missing"));
    }
}
