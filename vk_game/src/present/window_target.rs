use crate::{errors::Result, frame_loop::PresentationTarget, VkGameApp};
use log::debug;
use winit::window::Window;

/// A winit window together with its Vulkan surface.
pub struct WindowTarget {
    // Declared before the window so the surface is destroyed first.
    app: VkGameApp,
    window: Window,
    close_requested: bool,
}

impl WindowTarget {
    pub fn new(app: VkGameApp, window: Window) -> Self {
        Self {
            app,
            window,
            close_requested: false,
        }
    }

    pub fn request_close(&mut self) {
        if !self.close_requested {
            debug!("Close requested");
        }
        self.close_requested = true;
    }

    pub fn resized(&mut self, size: (u32, u32)) {
        let surface = &mut self.app.surface;
        surface.resize(size);
        let extent = surface.extent();
        debug!("Surface extent now {}x{}", extent.width, extent.height);
    }
}

impl PresentationTarget for WindowTarget {
    fn present(&mut self) -> Result<()> {
        self.window.pre_present_notify();
        self.window.request_redraw();
        Ok(())
    }

    #[inline]
    fn close_requested(&self) -> bool {
        self.close_requested
    }
}
