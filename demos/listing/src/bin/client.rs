#![allow(missing_docs)]

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(err) = partial_components::start_admin() {
            partial::web_sys::console::error_1(&err);
        }
    }
}
