mod fps_counter;
mod framerate;

pub use fps_counter::*;
pub use framerate::*;

#[cfg(test)]
pub(crate) use framerate::test_clock;
