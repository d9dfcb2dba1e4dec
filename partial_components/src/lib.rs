#![allow(missing_docs)]

//! The admin interface's concrete behaviors on top of `partial`.

use std::rc::Rc;

use partial::{BindingTable, Controller, Partial};
use wasm_bindgen::JsValue;

pub mod dashboard;
pub mod forms;
pub mod listing;
pub mod modal;
pub mod navbar;
pub mod widgets;

/// Handlers every listing container needs after each swap: pagination,
/// column sorting, attribute sorting, order sorting, dropdowns and delete
/// confirmation.
pub fn listing_bindings() -> BindingTable {
    BindingTable::new()
        .click(".pagination-previous", listing::paginate)
        .click(".pagination-next", listing::paginate)
        .click(".pagination-link", listing::paginate)
        .click(".sortable-header", listing::sort_by_column)
        .click(".sort-attribute", listing::sort_by_attribute)
        .click(".sort-order", listing::sort_by_order)
        .click(".dropdown-trigger", listing::toggle_dropdown)
        .click(".delete-item", modal::show_confirmation)
}

/// Listing handlers plus the admin page chrome
pub fn admin_bindings() -> BindingTable {
    extend(
        listing_bindings(),
        BindingTable::new()
            .click("#admin-sidebar-toggle", navbar::toggle_burger)
            .click(".navbar-burger", navbar::toggle_burger)
            .click(".aka-setnow", forms::set_now)
            .click(".aka-listitem", dashboard::open_list_item)
            .click(".aka-listcolumn", dashboard::reorder_list_column)
            .on("input[type=file]", "change", forms::show_upload_filename),
    )
}

/// Listing handlers plus the public site's navigation
pub fn site_bindings() -> BindingTable {
    extend(
        listing_bindings(),
        BindingTable::new()
            .click(".navbar-burger", navbar::toggle_burger)
            .click("#aka-navmenu", navbar::toggle_nav_menu),
    )
}

fn extend(base: BindingTable, extra: BindingTable) -> BindingTable {
    extra.iter().cloned().fold(base, |table, binding| table.with(binding))
}

/// Start the admin interface: partial navigation, widgets and sticky navbar
pub fn start_admin() -> Result<Rc<Controller>, JsValue> {
    let controller = Partial::new().bindings(admin_bindings()).start()?;

    widgets::attach_all();
    navbar::install_sticky_nav()?;

    Ok(controller)
}

/// Start the public site
pub fn start_site() -> Result<Rc<Controller>, JsValue> {
    let controller = Partial::new().bindings(site_bindings()).start()?;

    widgets::attach_tags_input()?;
    navbar::install_sticky_nav()?;

    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_set_is_complete() {
        let table = listing_bindings();

        for selector in [
            ".pagination-previous",
            ".pagination-next",
            ".pagination-link",
            ".sortable-header",
            ".sort-attribute",
            ".sort-order",
            ".dropdown-trigger",
            ".delete-item",
        ] {
            assert!(table.handles(selector, "click"), "{selector} is not rebound");
        }
    }

    #[test]
    fn page_tables_extend_the_listing_set() {
        let listing = listing_bindings().len();

        assert_eq!(admin_bindings().len(), listing + 6);
        assert_eq!(site_bindings().len(), listing + 2);
        assert!(admin_bindings().handles("input[type=file]", "change"));
        assert!(admin_bindings().handles(".aka-listitem", "click"));
        assert!(admin_bindings().handles(".aka-listcolumn", "click"));
        assert!(site_bindings().handles("#aka-navmenu", "click"));
    }
}
