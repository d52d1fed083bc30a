use wasm_bindgen::prelude::*;

// Modules actively used by JS
pub mod config;
pub mod ripple_physics;

// Internal building blocks, public for native hosts and tests
pub mod error;
pub mod grid;
pub mod logging;
pub mod mapping;
pub mod ripple;

pub use config::{DampingOrder, SimulationConfig};
pub use error::{SimError, SimResult};
pub use ripple_physics::HeightFieldSimulator;

#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Info);
}
