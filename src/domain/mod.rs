pub mod cell;
pub mod entity;
pub mod maze;
pub mod pursuit;
pub mod rules;
pub mod sampler;
