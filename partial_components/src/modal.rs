//! Confirmation modal for destructive actions.
//!
//! Clicking a `.delete-item` link GETs the modal body from the link's `href`
//! and shows it; the `.confirm-action` button inside POSTs to its own `href`
//! and follows the redirect the server answers with.

use std::rc::Rc;

use partial::prelude::*;
use serde::Deserialize;
use web_sys::{Element, Event};

const ACTIVE_CLASS: &str = "is-active";

#[derive(Debug, Deserialize)]
struct DeletionReply {
    redirect: Option<String>,
}

/// Handlers bound inside the modal content each time it is shown
pub fn modal_bindings() -> BindingTable {
    BindingTable::new()
        .click(".delete", close)
        .click(".cancel-action", close)
        .click(".confirm-action", confirm)
}

/// `.delete-item` click
pub fn show_confirmation(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    // No link means the action is disabled
    let Some(link) = dom::attr(element, "href") else {
        return;
    };

    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = open(&controller, &link).await {
            controller.report(&err);
        }
    });
}

async fn open(controller: &Rc<Controller>, link: &str) -> Result<(), NavError> {
    let response = controller.send(Method::Get, link).await?;

    let (modal, content) = modal_elements(controller)?;
    content.set_inner_html(&response.body);
    controller.bind_detached(&content, &modal_bindings())?;
    dom::add_class(&modal, ACTIVE_CLASS);

    controller.ui().borrow_mut().modal = Some(content);

    Ok(())
}

fn modal_elements(controller: &Controller) -> Result<(Element, Element), NavError> {
    let document = dom::document()?;
    let config = controller.config();

    let find = |id: &str| {
        document
            .get_element_by_id(id)
            .ok_or_else(|| NavError::Dom(format!("missing #{id}")))
    };

    Ok((find(&config.modal_id)?, find(&config.modal_content_id)?))
}

/// Hide the modal and drop its handlers
pub fn close_modal(controller: &Controller) {
    let content = controller.ui().borrow_mut().modal.take();

    if let Some(content) = content {
        controller.unbind(&content);
        content.set_inner_html("");
    }

    if let Ok((modal, _)) = modal_elements(controller) {
        dom::remove_class(&modal, ACTIVE_CLASS);
    }
}

fn close(controller: &Rc<Controller>, _element: &Element, event: &Event) {
    event.prevent_default();
    close_modal(controller);
}

fn confirm(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let link = dom::attr(element, "href");
    close_modal(controller);

    let Some(link) = link else {
        controller.report(&NavError::Dom("cannot find deletion link".to_owned()));
        return;
    };

    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = delete(&controller, &link).await {
            controller.report(&err);
        }
    });
}

async fn delete(controller: &Rc<Controller>, link: &str) -> Result<(), NavError> {
    let response = controller.send(Method::Post, link).await?;
    let redirect = redirect_target(&response.body)?;

    tracing::info!(%link, %redirect, "item deleted");

    controller.location().replace(&redirect)
}

/// Where the server wants the browser to go after a deletion
pub fn redirect_target(body: &str) -> Result<String, NavError> {
    let reply: DeletionReply =
        serde_json::from_str(body).map_err(|e| NavError::Decode(e.to_string()))?;

    reply
        .redirect
        .filter(|redirect| !redirect.trim().is_empty())
        .ok_or(NavError::MissingRedirect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_is_read_from_json() {
        assert_eq!(
            redirect_target(r#"{"redirect": "/admin/posts"}"#),
            Ok("/admin/posts".to_owned())
        );
    }

    #[test]
    fn missing_or_empty_redirect_is_an_error() {
        assert_eq!(redirect_target("{}"), Err(NavError::MissingRedirect));
        assert_eq!(
            redirect_target(r#"{"redirect": ""}"#),
            Err(NavError::MissingRedirect)
        );
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        assert!(matches!(
            redirect_target("<html>oops</html>"),
            Err(NavError::Decode(_))
        ));
    }
}
