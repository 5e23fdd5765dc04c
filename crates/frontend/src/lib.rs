//! Lead Management - Yew WASM Frontend
//!
//! Single-page CRUD application over the lead management REST API:
//! dashboard, lead list/form/import, and user management.

mod api;
mod app;
mod components;
mod download;
mod logging;
mod pages;
mod session;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    yew::Renderer::<App>::new().render();
}
