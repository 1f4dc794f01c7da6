pub mod autopilot;
pub mod event;
pub mod game;
pub mod level;
pub mod schedule;
pub mod shop;
pub mod step;
pub mod words;
pub mod world;
