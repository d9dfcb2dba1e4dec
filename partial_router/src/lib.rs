//! URL resolution and request plumbing for partial page navigation.
//!
//! Everything in here is plain Rust so it can be unit tested on the host; the
//! browser side lives in the `partial` crate.

pub mod query;
pub mod request;
pub mod sequence;
pub mod sort;
pub mod target;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

pub use query::QueryParams;
pub use request::{FetchRequest, FetchResponse, Method, is_same_origin, needs_csrf};
pub use sequence::{Sequencer, Ticket};
pub use sort::{ORDER_PARAM, SORT_PARAM, SortOrder};
pub use target::{NavAction, NavigationTarget};

#[cfg(not(target_arch = "wasm32"))]
pub use server::{DEFAULT_PARTIAL_HEADER, PartialServerRouter, RouteRequest};
