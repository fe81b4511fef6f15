//! Snowscape - double-buffered canvas snow effect in WASM
//!
//! The embedder supplies two equally sized canvases and a config object,
//! constructs [`Snow`], then calls `start()`, `resize()` on viewport changes
//! and `toggle()` from a user-facing control.

use wasm_bindgen::prelude::*;
use web_sys::console;

pub mod config;
pub mod constants;
pub mod field;
pub mod random;
pub mod renderer;

pub use config::SceneConfig;
pub use constants::*;
pub use field::{Particle, SnowField};
pub use random::{JsRandom, Lcg, RandomSource};
pub use renderer::Snow;

#[wasm_bindgen(start)]
pub fn main() {
    let mode = if RUNTIME_CONFIGURABLE {
        "configurable"
    } else {
        "release"
    };
    console::log_1(&format!("[Snowscape] WASM loaded ({mode})").into());
}

#[wasm_bindgen]
pub fn is_runtime_configurable() -> bool {
    RUNTIME_CONFIGURABLE
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
