//! Full-page navigations: the controller's way out of partial swaps.

use crate::dom;
use crate::error::NavError;

pub trait PageLocation {
    /// Load `url` as a new history entry
    fn assign(&self, url: &str) -> Result<(), NavError>;

    /// Load `url` in place of the current entry
    fn replace(&self, url: &str) -> Result<(), NavError>;

    /// Reload the current URL
    fn reload(&self) -> Result<(), NavError>;
}

/// `window.location` backed implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLocation;

impl PageLocation for BrowserLocation {
    fn assign(&self, url: &str) -> Result<(), NavError> {
        dom::window()?.location().assign(url).map_err(NavError::dom)
    }

    fn replace(&self, url: &str) -> Result<(), NavError> {
        dom::window()?.location().replace(url).map_err(NavError::dom)
    }

    fn reload(&self) -> Result<(), NavError> {
        dom::window()?.location().reload().map_err(NavError::dom)
    }
}
