//! # Nimbus Core
//!
//! Core crate for the Nimbus renderer: math aliases and primitive types shared
//! by the graphics crate.

pub mod math;
pub mod primitive;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the core subsystem.
pub fn init() {
    log::info!("Nimbus Core v{} initialized", VERSION);
}
