use ash::vk;
use log::debug;
use present::Surface;
use setup::DebugUtils;

pub mod config;
pub mod frame_loop;
pub mod present;
pub mod setup;
pub mod utils;
pub mod window;

pub use ash;
pub use winit;

pub const ENGINE_NAME: &str = "VK Game";
pub const VULKAN_VERSION: u32 = vk::API_VERSION_1_1;

pub mod errors {
    use thiserror::Error;

    pub type Result<T> = std::result::Result<T, VkGameError>;

    #[derive(Error, Debug)]
    pub enum VkGameError {
        #[error("Invalid target framerate {0}, it must be strictly positive")]
        InvalidFramerate(i32),
        #[error("Clock error: {0}")]
        Clock(String),
        #[error("Vulkan is not supported: {0}")]
        VulkanUnsupported(#[from] ash::LoadingError),
        #[error("Vulkan error: {0}")]
        Vulkan(#[from] ash::vk::Result),
        #[error("Window handle unavailable: {0}")]
        WindowHandle(#[from] raw_window_handle::HandleError),
        #[error("Winit window creation failure: {0}")]
        WindowCreation(#[from] winit::error::OsError),
        #[error("Invalid application name: {0}")]
        InvalidAppName(#[from] std::ffi::NulError),
    }
}

pub mod prelude {
    pub use crate::{
        config::EngineConfig,
        errors::{Result, VkGameError},
        frame_loop::{FrameLoop, LoopState, PresentationTarget},
        present::WindowTarget,
        utils::{Clock, FpsCounter, FramePacer, MonotonicClock},
        window::create_window,
        VkGameApp,
    };
}

/// Everything Vulkan needs to present to a window: the instance and its surface.
pub struct VkGameApp {
    pub(crate) _entry: ash::Entry,
    pub(crate) instance: ash::Instance,
    pub(crate) debug_utils: Option<DebugUtils>,
    pub(crate) surface: Surface,
}

impl Drop for VkGameApp {
    fn drop(&mut self) {
        unsafe {
            self.surface
                .loader
                .destroy_surface(self.surface.handle, None);
            debug!("Surface destroyed");

            if let Some(debug_utils) = self.debug_utils.take() {
                debug_utils.destroy();
            }

            self.instance.destroy_instance(None);
            debug!("Instance destroyed");
        }
    }
}
