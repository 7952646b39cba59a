//! Explicit 2D heat diffusion on a plate with one hot edge.
//!
//! Forward Euler in time, central differences in space.
//! The time step comes from the stability bound once, at setup,
//! and is never re-checked while stepping.

mod config;
mod plate;

pub use config::*;
pub use plate::*;
