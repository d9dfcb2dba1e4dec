//! Small DOM accessors shared by the controller and the behaviors.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::error::NavError;

pub fn window() -> Result<Window, NavError> {
    web_sys::window().ok_or_else(|| NavError::Dom("no global window".to_owned()))
}

pub fn document() -> Result<Document, NavError> {
    window()?
        .document()
        .ok_or_else(|| NavError::Dom("no document".to_owned()))
}

/// Path and query of the address bar, e.g. `/posts?page=2`
pub fn current_url() -> String {
    let Ok(window) = window() else {
        return "/".to_owned();
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_owned());
    let search = location.search().unwrap_or_default();

    format!("{path}{search}")
}

pub fn origin() -> String {
    window()
        .and_then(|window| window.location().origin().map_err(NavError::dom))
        .unwrap_or_default()
}

/// `content` of `<meta name="{name}">`
pub fn meta_content(name: &str) -> Option<String> {
    document()
        .ok()?
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()??
        .get_attribute("content")
}

/// A non-empty attribute value
pub fn attr(element: &Element, name: &str) -> Option<String> {
    element
        .get_attribute(name)
        .filter(|value| !value.trim().is_empty())
}

/// `data-{name}` attribute
pub fn data(element: &Element, name: &str) -> Option<String> {
    attr(element, &format!("data-{name}"))
}

pub fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// Every element under `root` matching `selector`, in document order
pub fn select_all(root: &Element, selector: &str) -> Result<Vec<Element>, NavError> {
    let nodes = root.query_selector_all(selector).map_err(NavError::dom)?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn toggle_class(element: &Element, class: &str) {
    let _ = element.class_list().toggle(class);
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}
