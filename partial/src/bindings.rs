//! Declarative handler registration.
//!
//! A [`BindingTable`] lists `selector + event → handler` entries. The same
//! table is applied at page load and after every partial swap, always scoped
//! to one root element, so the set of live handlers has a single definition.

use std::fmt;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use web_sys::{Element, Event};

use crate::controller::Controller;
use crate::dom;
use crate::error::NavError;

/// Behavior attached to a matched element
pub type Handler = Rc<dyn Fn(&Rc<Controller>, &Element, &Event)>;

#[derive(Clone)]
pub struct Binding {
    pub selector: &'static str,
    pub event: &'static str,
    handler: Handler,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("selector", &self.selector)
            .field("event", &self.event)
            .field("handler", &"<Handler>")
            .finish()
    }
}

#[derive(Clone, Default, Debug)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, selector: &'static str, event: &'static str, handler: F) -> Self
    where
        F: Fn(&Rc<Controller>, &Element, &Event) + 'static,
    {
        self.bindings.push(Binding {
            selector,
            event,
            handler: Rc::new(handler),
        });
        self
    }

    /// Append an entry taken from another table
    pub fn with(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn click<F>(self, selector: &'static str, handler: F) -> Self
    where
        F: Fn(&Rc<Controller>, &Element, &Event) + 'static,
    {
        self.on(selector, "click", handler)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether some entry handles `event` on `selector`
    pub fn handles(&self, selector: &str, event: &str) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.selector == selector && binding.event == event)
    }

    /// Attach every entry to the elements under `root` that `ownership` admits.
    pub(crate) fn apply(
        &self,
        controller: &Weak<Controller>,
        root: &Element,
        ownership: Ownership<'_>,
    ) -> Result<Vec<EventListener>, NavError> {
        let mut listeners = Vec::new();

        for binding in &self.bindings {
            for element in dom::select_all(root, binding.selector)? {
                if !ownership.admits(root, &element) {
                    continue;
                }

                listeners.push(listen(controller.clone(), element, binding));
            }
        }

        Ok(listeners)
    }
}

/// Which descendants of a scope root belong to that scope
#[derive(Debug, Clone, Copy)]
pub(crate) enum Ownership<'a> {
    /// Elements outside every container
    Page { container_selector: &'a str },
    /// Elements whose nearest container is the root itself
    Container { container_selector: &'a str },
    /// All descendants
    Detached,
}

impl Ownership<'_> {
    fn admits(&self, root: &Element, element: &Element) -> bool {
        match self {
            Ownership::Page { container_selector } => {
                dom::closest(element, container_selector).is_none()
            }
            Ownership::Container { container_selector } => {
                dom::closest(element, container_selector)
                    .is_some_and(|container| container.is_same_node(Some(root)))
            }
            Ownership::Detached => true,
        }
    }
}

fn listen(controller: Weak<Controller>, element: Element, binding: &Binding) -> EventListener {
    let handler = binding.handler.clone();
    let target = element.clone();

    EventListener::new_with_options(
        &target,
        binding.event,
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if let Some(controller) = controller.upgrade() {
                handler(&controller, &element, event);
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_records_entries_in_order() {
        let table = BindingTable::new()
            .click(".pagination-link", |_, _, _| {})
            .on("input[type=file]", "change", |_, _, _| {});

        let selectors: Vec<_> = table.iter().map(|b| (b.selector, b.event)).collect();
        assert_eq!(
            selectors,
            vec![(".pagination-link", "click"), ("input[type=file]", "change")]
        );
        assert!(table.handles(".pagination-link", "click"));
        assert!(!table.handles(".pagination-link", "change"));
        assert_eq!(table.len(), 2);
    }
}
