use std::sync::Once;

static INIT: Once = Once::new();

/// Install the panic hook and the tracing subscriber. Safe to call repeatedly.
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(all(target_arch = "wasm32", feature = "console_error_panic_hook"))]
        console_error_panic_hook::set_once();

        #[cfg(target_arch = "wasm32")]
        wasm_tracing::set_as_global_default();
    });
}
