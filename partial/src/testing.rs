//! Test doubles for the network and notification seams.

use std::cell::RefCell;
use std::collections::HashMap;

use futures_util::future::LocalBoxFuture;
use partial_router::{FetchRequest, FetchResponse};

use crate::error::NavError;
use crate::fetch::Fetcher;
use crate::location::PageLocation;
use crate::notify::{Notification, Notifier};

/// Answers from a fixed table and records every request
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: RefCell<HashMap<String, FetchResponse>>,
    delays: RefCell<HashMap<String, u32>>,
    requests: RefCell<Vec<FetchRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_owned(), FetchResponse::new(status, body));
    }

    /// Hold the response for `url` back by `millis`
    pub fn delay(&self, url: &str, millis: u32) {
        self.delays.borrow_mut().insert(url.to_owned(), millis);
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, request: FetchRequest) -> LocalBoxFuture<'static, Result<FetchResponse, NavError>> {
        let response = self
            .responses
            .borrow()
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, "not found"));

        let delay = self.delays.borrow().get(&request.url).copied();

        self.requests.borrow_mut().push(request);

        Box::pin(async move {
            if let Some(millis) = delay {
                gloo::timers::future::TimeoutFuture::new(millis).await;
            }

            Ok(response)
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

/// A full-page navigation that would have happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    Assign(String),
    Replace(String),
    Reload,
}

/// Records page navigations instead of leaving the page
#[derive(Debug, Default)]
pub struct RecordingLocation {
    visits: RefCell<Vec<Visit>>,
}

impl RecordingLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<Visit> {
        self.visits.borrow().clone()
    }
}

impl PageLocation for RecordingLocation {
    fn assign(&self, url: &str) -> Result<(), NavError> {
        self.visits.borrow_mut().push(Visit::Assign(url.to_owned()));
        Ok(())
    }

    fn replace(&self, url: &str) -> Result<(), NavError> {
        self.visits.borrow_mut().push(Visit::Replace(url.to_owned()));
        Ok(())
    }

    fn reload(&self) -> Result<(), NavError> {
        self.visits.borrow_mut().push(Visit::Reload);
        Ok(())
    }
}

/// Let spawned tasks and queued events run to completion
pub async fn settle() {
    gloo::timers::future::TimeoutFuture::new(0).await;
}
