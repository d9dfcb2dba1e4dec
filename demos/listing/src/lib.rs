#![allow(missing_docs)]

//! A paginated, sortable post listing rendered on the server and navigated
//! with partial swaps on the client.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use partial_router::{ORDER_PARAM, QueryParams, SORT_PARAM, SortOrder};
use serde::Serialize;

pub const PAGE_SIZE: usize = 5;
pub const PAGE_PARAM: &str = "page";
pub const LISTING_PATH: &str = "/posts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub date: String,
}

/// Column a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Date,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Date => "date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Date => "Date",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortKey::Title),
            "date" => Some(SortKey::Date),
            _ => None,
        }
    }
}

/// Listing state decoded from the query string
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub page: usize,
    pub sort: SortKey,
    pub order: SortOrder,
    params: QueryParams,
}

impl ListingQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        let page = params
            .get(PAGE_PARAM)
            .and_then(|page| page.parse().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);

        let sort = params
            .get(SORT_PARAM)
            .and_then(SortKey::parse)
            .unwrap_or(SortKey::Date);

        let order = params
            .get(ORDER_PARAM)
            .and_then(|order| order.parse().ok())
            .unwrap_or(SortOrder::Desc);

        Self {
            page,
            sort,
            order,
            params: params.clone(),
        }
    }

    /// Listing URL with `page` swapped in and every other parameter kept
    pub fn page_url(&self, page: usize) -> String {
        let mut params = self.params.clone();
        params.set(PAGE_PARAM, page.to_string());
        format!("{LISTING_PATH}?{params}")
    }
}

/// In-memory post table
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

/// One page of a sorted listing
#[derive(Debug)]
pub struct ListingPage<'a> {
    pub posts: Vec<&'a Post>,
    pub page: usize,
    pub pages: usize,
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// A store with a few dozen generated posts
    pub fn seeded() -> Self {
        let posts = (1..=23)
            .map(|id| Post {
                id,
                title: format!("Post number {id}"),
                date: format!("2024-{:02}-{:02}", (id % 12) + 1, (id % 28) + 1),
            })
            .collect();

        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Remove post `id`, returning whether it existed
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        self.posts.len() != before
    }

    pub fn page(&self, query: &ListingQuery) -> ListingPage<'_> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();

        posts.sort_by(|a, b| match query.sort {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Date => a.date.cmp(&b.date).then(a.id.cmp(&b.id)),
        });

        if query.order == SortOrder::Desc {
            posts.reverse();
        }

        let pages = posts.len().div_ceil(PAGE_SIZE).max(1);
        let page = query.page.min(pages);

        let posts = posts
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        ListingPage { posts, page, pages }
    }
}

/// JSON body answering a confirmed deletion
#[derive(Debug, Serialize)]
pub struct DeletionReply<'a> {
    pub redirect: &'a str,
}

/// `/posts/{id}/delete` → `id`
pub fn deletion_id(path: &str) -> Option<u64> {
    path.strip_prefix("/posts/")?
        .strip_suffix("/delete")?
        .parse()
        .ok()
}

/// The fragment living inside `.page-items`
pub fn render_listing(store: &PostStore, params: &QueryParams) -> String {
    let query = ListingQuery::from_params(params);
    let listing = store.page(&query);

    html! {
        div.level {
            div.level-left {
                @for key in SORT_KEYS {
                    a.button.sort-attribute.is-active[key == query.sort] data-sort=(key.as_str()) {
                        (key.label())
                    }
                }
            }
            div.level-right {
                a.button.sort-order data-order=(query.order.as_str()) {
                    @match query.order {
                        SortOrder::Asc => "Ascending",
                        SortOrder::Desc => "Descending",
                    }
                }
            }
        }
        table.table.is-fullwidth {
            thead {
                tr {
                    @for key in SORT_KEYS {
                        th {
                            a.sortable-header
                                data-sort=(key.as_str())
                                data-order=[(key == query.sort).then_some(query.order.as_str())]
                            { (key.label()) }
                        }
                    }
                    th {}
                }
            }
            tbody {
                @for post in &listing.posts {
                    tr {
                        td { (post.title) }
                        td { (post.date) }
                        td { (row_menu(post)) }
                    }
                }
            }
        }
        (render_pagination(&query, listing.page, listing.pages))
    }
    .into_string()
}

const SORT_KEYS: [SortKey; 2] = [SortKey::Title, SortKey::Date];

fn row_menu(post: &Post) -> Markup {
    html! {
        div.dropdown.is-right {
            div.dropdown-trigger {
                button.button.is-small { "…" }
            }
            div.dropdown-menu {
                div.dropdown-content {
                    a.dropdown-item.delete-item href={ "/posts/" (post.id) "/delete" } { "Delete" }
                }
            }
        }
    }
}

/// A pagination control; without a target it is rendered disabled
fn page_link(class: &str, href: Option<String>, label: &str) -> Markup {
    let disabled = href.is_none();

    html! {
        a class=(class) href=[href] disabled[disabled] { (label) }
    }
}

fn render_pagination(query: &ListingQuery, page: usize, pages: usize) -> Markup {
    let target = |n: Option<usize>| n.map(|n| query.page_url(n));

    html! {
        nav.pagination role="navigation" {
            (page_link("pagination-previous", target((page > 1).then(|| page - 1)), "Previous"))
            (page_link("pagination-next", target((page < pages).then(|| page + 1)), "Next"))
            ul.pagination-list {
                @for n in 1..=pages {
                    @let class = if n == page { "pagination-link is-current" } else { "pagination-link" };
                    li { (page_link(class, target(Some(n)), &n.to_string())) }
                }
            }
        }
    }
}

/// Body of the confirmation modal for `post`
pub fn render_delete_modal(post: &Post) -> String {
    html! {
        div.box {
            button.delete aria-label="close" {}
            p { "Delete " strong { (post.title) } "?" }
            div.buttons {
                a.button.is-danger.confirm-action href={ "/posts/" (post.id) "/delete" } { "Delete" }
                button.button.cancel-action { "Cancel" }
            }
        }
    }
    .into_string()
}

/// Shown in the modal when the post is already gone
pub fn render_missing_post() -> String {
    html! {
        div.box { p { "No such post." } }
    }
    .into_string()
}

/// Full page around `fragment`, carrying the CSRF token and the modal shell
pub fn render_layout(fragment: &str, csrf_token: &str) -> String {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="csrf-token" content=(csrf_token);
                title { "Posts" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@1.0/css/bulma.min.css";
            }
            body {
                section.section {
                    div.container.page-items { (PreEscaped(fragment)) }
                }
                div #global-modal .modal {
                    div.modal-background {}
                    div.modal-content #global-modal-content {}
                }
                script type="module" {
                    (PreEscaped(r#"import init from "/static/client.js"; init();"#))
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PostStore {
        PostStore::new(
            (1..=12)
                .map(|id| Post {
                    id,
                    title: format!("post {id:02}"),
                    date: format!("2024-01-{id:02}"),
                })
                .collect(),
        )
    }

    #[test]
    fn query_defaults_to_newest_first() {
        let query = ListingQuery::from_params(&QueryParams::parse(""));

        assert_eq!(query.page, 1);
        assert_eq!(query.sort, SortKey::Date);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn invalid_query_values_fall_back() {
        let query = ListingQuery::from_params(&QueryParams::parse(
            "page=0&sort=colour&order=sideways",
        ));

        assert_eq!(query.page, 1);
        assert_eq!(query.sort, SortKey::Date);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn page_url_keeps_other_parameters() {
        let query = ListingQuery::from_params(&QueryParams::parse("sort=title&page=2&order=asc"));

        assert_eq!(query.page_url(3), "/posts?sort=title&page=3&order=asc");
    }

    #[test]
    fn pages_are_sorted_and_clamped() {
        let store = store();

        let query = ListingQuery::from_params(&QueryParams::parse("sort=title&order=asc"));
        let page = store.page(&query);
        assert_eq!(page.pages, 3);
        assert_eq!(page.posts.first().map(|p| p.id), Some(1));
        assert_eq!(page.posts.len(), PAGE_SIZE);

        let query = ListingQuery::from_params(&QueryParams::parse("page=99"));
        let page = store.page(&query);
        assert_eq!(page.page, 3);
        assert_eq!(page.posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn delete_removes_once() {
        let mut store = store();

        assert!(store.delete(4));
        assert!(!store.delete(4));
        assert_eq!(store.len(), 11);
        assert!(store.get(4).is_none());
    }

    #[test]
    fn deletion_path_is_parsed() {
        assert_eq!(deletion_id("/posts/17/delete"), Some(17));
        assert_eq!(deletion_id("/posts/abc/delete"), None);
        assert_eq!(deletion_id("/posts/17"), None);
    }

    #[test]
    fn listing_carries_the_handler_hooks() {
        let html = render_listing(&store(), &QueryParams::parse("sort=title&order=desc"));

        assert!(html.contains(r#"class="sortable-header" data-sort="title" data-order="desc""#));
        assert!(html.contains(r#"class="sortable-header" data-sort="date">"#));
        assert!(html.contains(r#"class="button sort-order" data-order="desc""#));
        assert!(html.contains(r#"href="/posts/12/delete""#));
        assert!(html.contains(r#"<a class="pagination-previous" disabled>"#));
        assert!(html.contains(r#"<a class="pagination-next" href="/posts?sort=title&amp;order=desc&amp;page=2">"#));
        assert!(html.contains(r#"<a class="pagination-link is-current" href="/posts?sort=title&amp;order=desc&amp;page=1">1</a>"#));
    }

    #[test]
    fn titles_are_escaped() {
        let store = PostStore::new(vec![Post {
            id: 1,
            title: "<script>".to_owned(),
            date: "2024-01-01".to_owned(),
        }]);

        let html = render_listing(&store, &QueryParams::new());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));

        let modal = render_delete_modal(&store.posts[0]);
        assert!(modal.contains("confirm-action"));
        assert!(modal.contains("&lt;script&gt;"));
        assert!(modal.contains(r#"href="/posts/1/delete""#));
    }

    #[test]
    fn layout_wraps_fragment_in_container() {
        let page = render_layout("<p>hi</p>", "tok\"en");

        assert!(page.contains(r#"<div class="container page-items"><p>hi</p></div>"#));
        assert!(page.contains(r#"<meta name="csrf-token" content="tok&quot;en">"#));
        assert!(page.contains(r#"id="global-modal-content""#));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"import init from "/static/client.js";"#));
    }

    #[test]
    fn deletion_reply_serializes_redirect() {
        let body = serde_json::to_string(&DeletionReply { redirect: "/posts" }).unwrap();
        assert_eq!(body, r#"{"redirect":"/posts"}"#);
    }
}
