//! This module has things for managing the domain,
//! which really means retrieving values based on world coordinates.
//! Boundary handling is split out into `BCCheck` implementations so
//! the same stencil code can run with frozen, constant or mirrored edges.

mod bc;
mod edge;
mod gather_args;
mod view;

pub use bc::*;
pub use edge::*;
pub use gather_args::*;
pub use view::*;
