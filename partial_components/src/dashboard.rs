//! Dashboard list shortcuts. Both leave the page with a full navigation.

use std::rc::Rc;

use partial::prelude::*;
use partial_router::{NavigationTarget, QueryParams, SortOrder};
use web_sys::{Element, Event};

/// Attribute naming the item a list row stands for, and where it is edited
const EDIT_ROUTES: [(&str, &str); 4] = [
    ("page_id", "/dashboard/pages/edit/"),
    ("post_id", "/dashboard/blog/edit/"),
    ("user_id", "/dashboard/users/edit/"),
    ("file_id", "/dashboard/files/view/"),
];

const DEFAULT_ORDER_KEY: &str = "date";

/// Edit page of the first item attribute `attribute` yields
pub fn edit_url<F>(attribute: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    EDIT_ROUTES
        .iter()
        .find_map(|(name, prefix)| attribute(name).map(|id| format!("{prefix}{id}")))
}

/// `path?orderby=..&order=..` for a list column click
pub fn column_url(path: &str, order_key: Option<&str>, current_order: Option<&str>) -> String {
    let params: QueryParams = [
        ("orderby", order_key.unwrap_or(DEFAULT_ORDER_KEY).to_owned()),
        ("order", SortOrder::toggled(current_order).to_string()),
    ]
    .into_iter()
    .collect();

    format!("{path}?{params}")
}

/// `.aka-listitem` click
pub fn open_list_item(controller: &Rc<Controller>, element: &Element, _event: &Event) {
    let Some(url) = edit_url(|name| element.get_attribute(name)) else {
        tracing::debug!("list item without an item id");
        return;
    };

    if let Err(err) = controller.location().assign(&url) {
        controller.report(&err);
    }
}

/// `.aka-listcolumn` click
pub fn reorder_list_column(controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let current = NavigationTarget::parse(&dom::current_url());
    let url = column_url(
        current.path(),
        element.get_attribute("order-key").as_deref(),
        element.get_attribute("order").as_deref(),
    );

    if let Err(err) = controller.location().assign(&url) {
        controller.report(&err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();

        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn each_item_kind_has_its_edit_page() {
        assert_eq!(
            edit_url(attributes(&[("page_id", "4")])),
            Some("/dashboard/pages/edit/4".to_owned())
        );
        assert_eq!(
            edit_url(attributes(&[("post_id", "12")])),
            Some("/dashboard/blog/edit/12".to_owned())
        );
        assert_eq!(
            edit_url(attributes(&[("user_id", "3")])),
            Some("/dashboard/users/edit/3".to_owned())
        );
        assert_eq!(
            edit_url(attributes(&[("file_id", "9")])),
            Some("/dashboard/files/view/9".to_owned())
        );
    }

    #[test]
    fn pages_win_over_posts_and_unknown_rows_go_nowhere() {
        assert_eq!(
            edit_url(attributes(&[("post_id", "1"), ("page_id", "2")])),
            Some("/dashboard/pages/edit/2".to_owned())
        );
        assert_eq!(edit_url(attributes(&[("class", "row")])), None);
    }

    #[test]
    fn column_click_flips_order() {
        assert_eq!(
            column_url("/dashboard/blog", Some("title"), Some("desc")),
            "/dashboard/blog?orderby=title&order=asc"
        );
        assert_eq!(
            column_url("/dashboard/blog", Some("title"), Some("asc")),
            "/dashboard/blog?orderby=title&order=desc"
        );
        assert_eq!(
            column_url("/dashboard/blog", None, None),
            "/dashboard/blog?orderby=date&order=desc"
        );
    }
}
