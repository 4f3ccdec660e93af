mod surface;
mod window_target;

pub use surface::*;
pub use window_target::*;
