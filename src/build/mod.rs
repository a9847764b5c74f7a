mod clean;
mod core;

pub use clean::clean;
pub use core::{BuildOptions, configure_and_build};
