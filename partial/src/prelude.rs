pub use crate::{
    BindingTable, Config, Controller, NavError, Notification, NotificationKind, Notifier,
    PageLocation, Partial, dom,
};
pub use partial_router::{Method, NavAction};
pub use wasm_bindgen::JsCast;
