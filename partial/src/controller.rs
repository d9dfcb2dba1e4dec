//! Partial navigation controller.
//!
//! A navigation resolves a target URL, GETs it with the partial-request
//! header, replaces the trigger's container with the response body, pushes
//! the URL onto history and re-binds the handler table onto the new content.
//! Swap and rebind happen in the same synchronous step, so a container is
//! never observable with stale handlers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use partial_router::{FetchRequest, FetchResponse, Method, NavAction, NavigationTarget, Sequencer, needs_csrf};
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::bindings::{BindingTable, Ownership};
use crate::config::Config;
use crate::dom;
use crate::error::NavError;
use crate::fetch::Fetcher;
use crate::history::{self, HistoryMode};
use crate::location::PageLocation;
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::state::UiState;

/// Attribute holding a binding scope's key
pub const SCOPE_ATTRIBUTE: &str = "data-partial-scope";

const ACTIVE_CLASS: &str = "is-active";

/// Result of a completed fetch-and-swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    Swapped,
    /// A newer request for the same container was issued meanwhile, or the
    /// container left the document; nothing was changed
    Superseded,
}

/// A bound root and the listeners attached under it
struct Scope {
    root: Element,
    listeners: Vec<EventListener>,
}

pub struct Controller {
    config: Config,
    fetcher: Rc<dyn Fetcher>,
    notifier: Rc<dyn Notifier>,
    table: BindingTable,
    scopes: RefCell<HashMap<u64, Scope>>,
    sequencer: RefCell<Sequencer>,
    ui: RefCell<UiState>,
    globals: RefCell<Vec<EventListener>>,
    location: Rc<dyn PageLocation>,
    this: Weak<Controller>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("table", &self.table)
            .field("scopes", &self.scopes.borrow().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Controller {
    pub fn new(
        config: Config,
        table: BindingTable,
        fetcher: Rc<dyn Fetcher>,
        notifier: Rc<dyn Notifier>,
        location: Rc<dyn PageLocation>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            config,
            fetcher,
            notifier,
            location,
            table,
            scopes: RefCell::new(HashMap::new()),
            sequencer: RefCell::new(Sequencer::new()),
            ui: RefCell::new(UiState::default()),
            globals: RefCell::new(Vec::new()),
            this: this.clone(),
        })
    }

    /// Where full-page navigations go
    pub fn location(&self) -> &dyn PageLocation {
        self.location.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &BindingTable {
        &self.table
    }

    pub fn ui(&self) -> &RefCell<UiState> {
        &self.ui
    }

    /// Bind the handler table under `root` for the first time.
    ///
    /// Each container found gets its own scope; everything outside the
    /// containers belongs to the root's scope.
    pub fn attach(&self, root: &Element) -> Result<(), NavError> {
        let selector = self.config.container_selector.as_str();

        for container in dom::select_all(root, selector)? {
            self.bind_container(&container)?;
        }

        if root.matches(selector).unwrap_or(false) {
            self.bind_container(root)?;
        } else {
            let key = self.scope_key(root)?;
            self.bind_scope(
                root,
                key,
                &self.table,
                Ownership::Page {
                    container_selector: selector,
                },
            )?;
        }

        self.install_globals()?;

        tracing::debug!(scopes = self.scopes.borrow().len(), "partial navigation attached");

        Ok(())
    }

    /// Replace every listener of `container`'s scope with a fresh application
    /// of the handler table.
    ///
    /// Containers nested in the new content get scopes of their own, and
    /// scopes whose root left the document are dropped.
    pub fn rebind(&self, container: &Element) -> Result<(), NavError> {
        self.ui
            .borrow_mut()
            .dropdown
            .retain(|dropdown| dropdown.is_connected());

        self.bind_container(container)?;

        for nested in dom::select_all(container, &self.config.container_selector)? {
            self.bind_container(&nested)?;
        }

        self.prune();

        Ok(())
    }

    fn bind_container(&self, container: &Element) -> Result<(), NavError> {
        let key = self.scope_key(container)?;

        self.bind_scope(
            container,
            key,
            &self.table,
            Ownership::Container {
                container_selector: &self.config.container_selector,
            },
        )
    }

    /// Forget scopes, and their pending requests, whose root is detached
    fn prune(&self) {
        let mut dead = Vec::new();

        self.scopes.borrow_mut().retain(|key, scope| {
            let alive = scope.root.is_connected();
            if !alive {
                dead.push(*key);
            }
            alive
        });

        if dead.is_empty() {
            return;
        }

        let mut sequencer = self.sequencer.borrow_mut();
        for key in &dead {
            sequencer.forget(*key);
        }

        tracing::debug!(?dead, "dropped detached scopes");
    }

    /// Number of live binding scopes
    pub fn scope_count(&self) -> usize {
        self.scopes.borrow().len()
    }

    /// Bind `table` to every descendant of `root`, replacing the scope's
    /// previous listeners. Used for content that lives outside containers.
    pub fn bind_detached(&self, root: &Element, table: &BindingTable) -> Result<(), NavError> {
        let key = self.scope_key(root)?;
        self.bind_scope(root, key, table, Ownership::Detached)
    }

    /// Drop every listener of `root`'s scope
    pub fn unbind(&self, root: &Element) {
        if let Some(key) = scope_of(root) {
            let removed = self.scopes.borrow_mut().remove(&key);
            drop(removed);
            self.sequencer.borrow_mut().forget(key);
        }
    }

    /// Number of live listeners in `root`'s scope
    pub fn bound_count(&self, root: &Element) -> usize {
        scope_of(root)
            .and_then(|key| {
                self.scopes
                    .borrow()
                    .get(&key)
                    .map(|scope| scope.listeners.len())
            })
            .unwrap_or(0)
    }

    fn bind_scope(
        &self,
        root: &Element,
        key: u64,
        table: &BindingTable,
        ownership: Ownership<'_>,
    ) -> Result<(), NavError> {
        let listeners = table.apply(&self.this, root, ownership)?;
        let scope = Scope {
            root: root.clone(),
            listeners,
        };
        let previous = self.scopes.borrow_mut().insert(key, scope);
        drop(previous);

        Ok(())
    }

    /// The scope key stored on `element`, assigning one on first use
    pub fn scope_key(&self, element: &Element) -> Result<u64, NavError> {
        if let Some(key) = scope_of(element) {
            return Ok(key);
        }

        let key = partial_utils::next_scope_counter();
        element
            .set_attribute(SCOPE_ATTRIBUTE, &key.to_string())
            .map_err(NavError::dom)?;

        Ok(key)
    }

    /// Nearest container of `trigger`
    pub fn container_for(&self, trigger: &Element) -> Result<Element, NavError> {
        dom::closest(trigger, &self.config.container_selector).ok_or_else(|| {
            NavError::ContainerNotFound {
                selector: self.config.container_selector.clone(),
            }
        })
    }

    /// Start a partial navigation on behalf of `trigger`.
    ///
    /// Returns immediately; the request completes in a spawned task. An
    /// action resolving to nothing (disabled link) is ignored.
    pub fn navigate(&self, trigger: &Element, action: NavAction) {
        let container = match self.container_for(trigger) {
            Ok(container) => container,
            Err(err) => {
                self.report(&err);
                return;
            }
        };

        let Some(target) = NavigationTarget::resolve(&dom::current_url(), &action) else {
            tracing::debug!(?action, "nothing to navigate to");
            return;
        };

        self.spawn_swap(container, target.to_string(), HistoryMode::Push);
    }

    fn spawn_swap(&self, container: Element, url: String, mode: HistoryMode) {
        let Some(this) = self.this.upgrade() else {
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = this.clone().fetch_and_swap(container, url, mode).await {
                this.report(&err);
            }
        });
    }

    /// GET `url`, swap it into `container`, record history and rebind.
    ///
    /// On failure the container is left exactly as it was.
    pub async fn fetch_and_swap(
        self: Rc<Self>,
        container: Element,
        url: String,
        mode: HistoryMode,
    ) -> Result<SwapOutcome, NavError> {
        let scope = self.scope_key(&container)?;
        let ticket = self.sequencer.borrow_mut().issue(scope);

        tracing::debug!(%url, scope, "fetching partial");

        let result = self.send(Method::Get, &url).await;

        if !self.sequencer.borrow().is_current(&ticket) || !container.is_connected() {
            tracing::debug!(%url, scope, "discarding superseded response");
            return Ok(SwapOutcome::Superseded);
        }

        let response = result?;

        container.set_inner_html(&response.body);

        if mode == HistoryMode::Push {
            if let Err(err) = history::push(&url, scope) {
                tracing::warn!(%url, error = %err, "cannot push history entry");
            }
        }

        self.rebind(&container)?;

        tracing::debug!(%url, scope, "partial swapped");

        Ok(SwapOutcome::Swapped)
    }

    /// Build a request carrying the partial header and, where required, the
    /// CSRF token.
    pub fn prepare(&self, method: Method, url: &str) -> FetchRequest {
        let mut request =
            FetchRequest::new(method, url).header(self.config.partial_header.as_str(), "true");

        if needs_csrf(method, url, &dom::origin()) {
            match dom::meta_content(&self.config.csrf_meta_name) {
                Some(token) => {
                    request = request.header(self.config.csrf_header.as_str(), token);
                }
                None => self.report(&NavError::CsrfTokenMissing),
            }
        }

        request
    }

    /// Send a request; non-2xx statuses become [`NavError::RequestFailed`].
    pub async fn send(&self, method: Method, url: &str) -> Result<FetchResponse, NavError> {
        let request = self.prepare(method, url);
        let response = self.fetcher.fetch(request).await?;

        if response.is_success() {
            Ok(response)
        } else {
            Err(NavError::RequestFailed {
                status: response.status,
                body: response.body,
            })
        }
    }

    /// Log `err` and surface it to the user
    pub fn report(&self, err: &NavError) {
        match err {
            NavError::RequestFailed { status, body } => {
                tracing::error!(status, %body, "partial request failed");
            }
            other => tracing::error!(error = %other, "partial navigation failed"),
        }

        self.notify(NotificationKind::Error, err.user_message());
    }

    pub fn notify(&self, kind: NotificationKind, text: &str) {
        self.notifier.notify(Notification::new(
            kind,
            text,
            self.config.notification_timeout_ms,
        ));
    }

    /// Toggle `dropdown`, closing any other open one
    pub fn toggle_dropdown(&self, dropdown: &Element) {
        let change = self.ui.borrow_mut().dropdown.toggle(dropdown.clone());

        if let Some(closed) = change.close {
            dom::remove_class(&closed, ACTIVE_CLASS);
        }
        if let Some(opened) = change.open {
            dom::add_class(&opened, ACTIVE_CLASS);
        }
    }

    pub fn close_dropdowns(&self) {
        let closed = self.ui.borrow_mut().dropdown.close_all();

        if let Some(closed) = closed {
            dom::remove_class(&closed, ACTIVE_CLASS);
        }
    }

    fn install_globals(&self) -> Result<(), NavError> {
        if !self.globals.borrow().is_empty() {
            return Ok(());
        }

        let window = dom::window()?;
        let document = dom::document()?;

        let close_dropdowns = {
            let this = self.this.clone();
            EventListener::new(&document, "click", move |_event| {
                if let Some(this) = this.upgrade() {
                    this.close_dropdowns();
                }
            })
        };

        let restore = {
            let this = self.this.clone();
            EventListener::new(&window, "popstate", move |event| {
                if let Some(this) = this.upgrade() {
                    this.restore(event);
                }
            })
        };

        self.globals.borrow_mut().extend([close_dropdowns, restore]);

        Ok(())
    }

    /// Back/forward: re-fetch into the recorded container, or reload the page
    /// when the entry was not produced by a partial swap.
    fn restore(&self, event: &web_sys::Event) {
        let scope = event
            .dyn_ref::<web_sys::PopStateEvent>()
            .and_then(|event| history::scope_from_state(&event.state()));

        let container = scope.and_then(|scope| {
            dom::document()
                .ok()?
                .query_selector(&format!("[{SCOPE_ATTRIBUTE}=\"{scope}\"]"))
                .ok()
                .flatten()
        });

        match container {
            Some(container) => self.spawn_swap(container, dom::current_url(), HistoryMode::Keep),
            None => {
                if let Err(err) = self.location.reload() {
                    tracing::error!(error = %err, "cannot reload page");
                }
            }
        }
    }
}

fn scope_of(element: &Element) -> Option<u64> {
    element
        .get_attribute(SCOPE_ATTRIBUTE)
        .and_then(|key| key.parse().ok())
}
