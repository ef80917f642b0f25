//! WASM bridge exposing the attractor generators to the JS front end.

use std::sync::Once;

mod affine;
mod chaos;
mod payload;
mod runner;
mod variations;

pub use affine::WasmAffineGame;
pub use chaos::WasmChaosGame;
pub use runner::WasmChaosGameRunner;
pub use variations::{blend_variations, transform_variation, variation_names};

static LOGGER: Once = Once::new();

/// Installs the panic hook and browser console logger once.
pub(crate) fn init_runtime() {
    console_error_panic_hook::set_once();
    LOGGER.call_once(|| {
        // The console logger only exists in the browser.
        #[cfg(target_arch = "wasm32")]
        console_log::init_with_level(log::Level::Warn).ok();
    });
}
