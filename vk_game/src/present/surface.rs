use crate::errors::Result;
use ash::{khr, vk};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

/// A `VkSurfaceKHR` bound to a window. Destroyed by the owning `VkGameApp`.
pub struct Surface {
    pub(crate) loader: khr::surface::Instance,
    pub(crate) handle: vk::SurfaceKHR,
    pub(crate) extent: vk::Extent2D,
}

impl Surface {
    pub fn create<W: HasDisplayHandle + HasWindowHandle>(
        entry: &ash::Entry,
        instance: &ash::Instance,
        window: &W,
        window_size: (u32, u32),
    ) -> Result<Self> {
        let loader = khr::surface::Instance::new(entry, instance);
        let handle = unsafe {
            ash_window::create_surface(
                entry,
                instance,
                window.display_handle()?.as_raw(),
                window.window_handle()?.as_raw(),
                None,
            )?
        };

        Ok(Self {
            loader,
            handle,
            extent: extent_of(window_size),
        })
    }

    #[inline]
    pub fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    /// Track the new size of the window, the surface itself follows the window.
    pub fn resize(&mut self, window_size: (u32, u32)) {
        self.extent = extent_of(window_size);
    }
}

fn extent_of((width, height): (u32, u32)) -> vk::Extent2D {
    vk::Extent2D { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_follows_the_window_size() {
        let extent = extent_of((1920, 1080));
        assert_eq!((extent.width, extent.height), (1920, 1080));
    }
}
