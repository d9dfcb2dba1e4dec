use std::rc::Rc;

use gloo::events::EventListener;
use partial::prelude::*;
use web_sys::{Element, Event};

/// Toggle a burger button and the element named by its `data-target`
pub fn toggle_burger(_controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let Some(target) = dom::data(element, "target")
        .and_then(|id| dom::document().ok()?.get_element_by_id(&id))
    else {
        return;
    };

    dom::toggle_class(element, "is-active");
    dom::toggle_class(&target, "is-active");
}

/// Show or hide every `.navitem` on small screens
pub fn toggle_nav_menu(_controller: &Rc<Controller>, _element: &Element, _event: &Event) {
    let Ok(document) = dom::document() else {
        return;
    };
    let Some(root) = document.document_element() else {
        return;
    };

    for item in dom::select_all(&root, ".navitem").unwrap_or_default() {
        dom::toggle_class(&item, "shown");
    }
}

pub fn is_stuck(scroll_top: f64, navbar_top: f64) -> bool {
    scroll_top > navbar_top
}

/// Pin `.aka-navbar` once the page scrolls past it. Lives as long as the page.
pub fn install_sticky_nav() -> Result<(), NavError> {
    let window = dom::window()?;
    let document = dom::document()?;

    let Some(navbar) = document.query_selector(".aka-navbar").map_err(NavError::dom)? else {
        return Ok(());
    };
    let header = document.query_selector(".aka-header").map_err(NavError::dom)?;

    let navbar_top = navbar.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0);

    EventListener::new(&window, "scroll", move |_event| {
        let scroll_top = web_sys::window()
            .and_then(|window| window.scroll_y().ok())
            .unwrap_or(0.0);

        if is_stuck(scroll_top, navbar_top) {
            dom::add_class(&navbar, "sticky");
            if let Some(header) = &header {
                dom::add_class(header, "scrolling");
            }
        } else {
            dom::remove_class(&navbar, "sticky");
            if let Some(header) = &header {
                dom::remove_class(header, "scrolling");
            }
        }
    })
    .forget();

    Ok(())
}
