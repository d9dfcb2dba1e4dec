//! Explicit UI state that would otherwise live in ad hoc CSS classes.

use web_sys::Element;

/// What a dropdown toggle has to apply to the DOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownChange<T> {
    pub close: Option<T>,
    pub open: Option<T>,
}

/// At most one open dropdown.
#[derive(Debug, Clone)]
pub struct DropdownState<T> {
    open: Option<T>,
}

impl<T> Default for DropdownState<T> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<T: Clone + PartialEq> DropdownState<T> {
    pub fn open(&self) -> Option<&T> {
        self.open.as_ref()
    }

    /// Toggle `dropdown`: closes it when it is the open one, otherwise closes
    /// the open one and opens `dropdown`.
    pub fn toggle(&mut self, dropdown: T) -> DropdownChange<T> {
        match self.open.take() {
            Some(open) if open == dropdown => DropdownChange {
                close: Some(open),
                open: None,
            },
            previous => {
                self.open = Some(dropdown.clone());
                DropdownChange {
                    close: previous,
                    open: Some(dropdown),
                }
            }
        }
    }

    pub fn close_all(&mut self) -> Option<T> {
        self.open.take()
    }

    /// Forget the open dropdown unless `keep` accepts it
    pub fn retain(&mut self, keep: impl FnOnce(&T) -> bool) {
        if self.open.as_ref().is_some_and(|open| !keep(open)) {
            self.open = None;
        }
    }
}

#[derive(Debug, Default)]
pub struct UiState {
    pub dropdown: DropdownState<Element>,
    /// Content element of the confirmation modal while it is shown
    pub modal: Option<Element>,
}
