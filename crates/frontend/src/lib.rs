pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate; converter events arrive
    // through tracing's `log` bridge
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
