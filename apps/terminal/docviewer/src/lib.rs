// Library exports for testing
// The binary (main.rs) imports these as well

pub mod effects;
pub mod error;
pub mod events;
pub mod input;
pub mod logger;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

#[cfg(test)]
mod tests;
