//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only): logging setup and a
//! `wasm_bindgen` wrapper the JS host drives from `requestAnimationFrame`.
//! Native builds use the headless driver in `main.rs` directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Fresh session seed from the OS / browser entropy source
pub fn entropy_seed() -> u64 {
    rand::random()
}
