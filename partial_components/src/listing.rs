//! Handlers for paginated, sortable listings.
//!
//! All of them end in [`Controller::navigate`], which swaps the listing's
//! container and re-binds this same set onto the new content.

use std::rc::Rc;

use partial::prelude::*;
use partial_router::sort;
use web_sys::{Element, Event};

/// Pagination links load their own `href`
pub fn paginate(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let href = dom::attr(element, "href").unwrap_or_default();
    controller.navigate(element, NavAction::Href(href));
}

/// Column headers either sort by `data-sort` (flipping `data-order`) or, when
/// they only carry an `href`, load that link.
pub fn sort_by_column(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let action = match dom::data(element, "sort") {
        Some(key) => NavAction::Merge(sort::column_overrides(
            &key,
            dom::data(element, "order").as_deref(),
        )),
        None => NavAction::Href(dom::attr(element, "href").unwrap_or_default()),
    };

    controller.navigate(element, action);
}

/// Choose the sort attribute, keeping the current direction
pub fn sort_by_attribute(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let Some(key) = dom::data(element, "sort") else {
        tracing::debug!("sort attribute without data-sort");
        return;
    };

    controller.navigate(element, NavAction::Merge(sort::attribute_overrides(&key)));
}

/// Flip the sort direction, keeping the attribute
pub fn sort_by_order(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let current = dom::data(element, "order");
    controller.navigate(
        element,
        NavAction::Merge(sort::order_overrides(current.as_deref())),
    );
}

/// Open or close the enclosing `.dropdown`. Propagation stops here so the
/// document-level "close everything" listener does not undo the toggle.
pub fn toggle_dropdown(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.stop_propagation();

    if let Some(dropdown) = dom::closest(element, ".dropdown") {
        controller.toggle_dropdown(&dropdown);
    }
}
