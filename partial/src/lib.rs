#![allow(missing_docs)]

//! Partial page navigation for server-rendered pages.
//!
//! Clicks on listing controls fetch a server-rendered fragment, swap it into
//! the nearest container, record the URL in history and re-attach the handler
//! table to the new content.

use std::cell::RefCell;
use std::rc::Rc;

pub mod bindings;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod history;
pub mod location;
pub mod logging;
pub mod notify;
pub mod prelude;
pub mod state;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bindings::{Binding, BindingTable, Handler};
pub use config::Config;
pub use controller::{Controller, SwapOutcome};
pub use error::NavError;
pub use fetch::{Fetcher, WebFetcher};
pub use history::HistoryMode;
pub use location::{BrowserLocation, PageLocation};
pub use notify::{Notification, NotificationKind, Notifier, NotyNotifier};

pub use js_sys;
pub use partial_router;
pub use wasm_bindgen;
pub use web_sys;

thread_local! {
    static ACTIVE: RefCell<Option<Rc<Controller>>> = const { RefCell::new(None) };
}

/// Builder wiring a [`Controller`] to the page
#[derive(Default)]
pub struct Partial {
    config: Option<Config>,
    table: BindingTable,
    fetcher: Option<Rc<dyn Fetcher>>,
    notifier: Option<Rc<dyn Notifier>>,
    location: Option<Rc<dyn PageLocation>>,
}

impl std::fmt::Debug for Partial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Partial")
            .field("config", &self.config)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Partial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` instead of the one embedded in the page
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn bindings(mut self, table: BindingTable) -> Self {
        self.table = table;
        self
    }

    pub fn fetcher(mut self, fetcher: Rc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn location(mut self, location: Rc<dyn PageLocation>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn build(self) -> Rc<Controller> {
        Controller::new(
            self.config.unwrap_or_else(Config::load),
            self.table,
            self.fetcher.unwrap_or_else(|| Rc::new(WebFetcher)),
            self.notifier.unwrap_or_else(|| Rc::new(NotyNotifier)),
            self.location.unwrap_or_else(|| Rc::new(BrowserLocation)),
        )
    }

    /// Build the controller and bind it under `root`
    pub fn mount(self, root: &web_sys::Element) -> Result<Rc<Controller>, NavError> {
        let controller = self.build();
        controller.attach(root)?;
        Ok(controller)
    }

    /// Initialize logging, bind the whole document and keep the controller
    /// alive for the lifetime of the page.
    pub fn start(self) -> Result<Rc<Controller>, wasm_bindgen::JsValue> {
        logging::init_logging();

        let root = dom::document()?
            .document_element()
            .ok_or("No document element")?;

        let controller = self.mount(&root)?;
        ACTIVE.with(|active| *active.borrow_mut() = Some(controller.clone()));

        tracing::info!("partial navigation started");

        Ok(controller)
    }
}

/// The controller installed by [`Partial::start`]
pub fn active() -> Option<Rc<Controller>> {
    ACTIVE.with(|active| active.borrow().clone())
}
