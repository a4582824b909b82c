//! Tumble Engine - DOM elements as rigid bodies, in WASM
//!
//! Each `.object` element inside a container is paired with a dynamic
//! rectangle that falls into a walled box, settles and can be dragged.
//! Physics state is written back to the element's position and rotation
//! every frame.
//!
//! Architecture:
//! - core/       - Logging macros, numeric helpers, RNG
//! - domain/     - Config, geometry, errors
//! - systems/    - Physics engine contract and rigid body solver
//! - simulation/ - Session: world builder, drag, sync, runner
//! - dom/        - Browser adapters (sampling, styles, listeners)

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod dom;

// Compatibility re-exports
pub use systems::engine;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Tumble WASM engine initialized");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default configuration as JSON, for pages that tweak a few fields
#[wasm_bindgen]
pub fn default_config_json() -> String {
    domain::SimConfig::default().to_json()
}

// Re-export main types
pub use domain::{Container, ElementSize, SandboxError, SimConfig};
pub use engine::{BodyHandle, PhysicsEngine};
pub use simulation::{Sandbox, SandboxCore};
