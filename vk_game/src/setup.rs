mod app_builder;
mod debug_utils;
mod extensions;

pub use app_builder::*;
pub(crate) use debug_utils::*;
pub(crate) use extensions::*;
