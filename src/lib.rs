//! Labyrinth: a word-hunt maze game core.
//!
//! The player walks a generated maze collecting the letters of a hidden
//! word while a hunter chases them. `sim::game::Game` is the entry point;
//! presentation layers send intents, advance the clock and read the world.

pub mod config;
pub mod domain;
pub mod error;
pub mod sim;
