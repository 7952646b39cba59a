pub mod blur;
pub mod build_info;
pub mod cli;
pub mod diffusion;
pub mod domain;
pub mod error;
pub mod image;
pub mod npy;
pub mod par_slice;
pub mod par_stencil;
pub mod plot_log;
pub mod records;
pub mod stencil;
pub mod util;

pub use error::{Error, Result};
