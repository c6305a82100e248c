use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod catalog;
pub mod driver;
pub mod follow;
pub mod game;
pub mod orbit;
pub mod panel;
pub mod registry;
pub mod setup;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

/// Info-panel lines for the followed body, one string per line.
#[wasm_bindgen]
pub fn get_panel_lines() -> js_sys::Array {
    with_runner(|r| r.game().panel_lines().iter().map(|line| JsValue::from_str(line)).collect())
}

#[wasm_bindgen]
pub fn get_paused() -> bool {
    with_runner(|r| r.game().state().paused)
}
