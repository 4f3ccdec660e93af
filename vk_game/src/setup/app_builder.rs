use crate::{
    errors::Result,
    present::Surface,
    setup::{
        instance_extension_available, instance_layer_available,
        required_instance_extensions_with_surface, DebugUtils, VALIDATION_LAYER,
    },
    VkGameApp, ENGINE_NAME, VULKAN_VERSION,
};
use ash::{ext, vk};
use log::{debug, info, warn};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::{borrow::Cow, ffi::CString};

pub struct VkGameAppBuilder {
    app_name: Cow<'static, str>,
    version: (u32, u32, u32),
    debug_utils: bool,
}

impl VkGameApp {
    pub fn builder() -> VkGameAppBuilder {
        VkGameAppBuilder {
            app_name: Cow::Borrowed("Unnamed"),
            version: (0, 0, 1),
            debug_utils: false,
        }
    }
}

impl VkGameAppBuilder {
    pub fn with_app_info(mut self, app_name: Cow<'static, str>, version: (u32, u32, u32)) -> Self {
        self.app_name = app_name;
        self.version = version;
        self
    }

    /// Route validation messages to the logger. Skipped with a warning when the loader
    /// doesn't provide the extension.
    pub fn with_debug_utils(mut self, enabled: bool) -> Self {
        self.debug_utils = enabled;
        self
    }

    pub fn build<W: HasDisplayHandle + HasWindowHandle>(
        self,
        window: &W,
        window_size: (u32, u32),
    ) -> Result<VkGameApp> {
        // Failing to find a loader is how we learn Vulkan isn't supported here.
        let entry = unsafe { ash::Entry::load()? };
        info!("Vulkan is supported.");

        match unsafe { entry.try_enumerate_instance_version()? } {
            Some(version) => info!(
                "Currently running Vulkan {}.{}.{}",
                vk::api_version_major(version),
                vk::api_version_minor(version),
                vk::api_version_patch(version)
            ),
            None => info!("Currently running Vulkan 1.0"),
        }

        let debug_utils_enabled =
            self.debug_utils && instance_extension_available(&entry, ext::debug_utils::NAME)?;
        if self.debug_utils && !debug_utils_enabled {
            warn!("Debug utils requested but not provided by the loader");
        }

        let display = window.display_handle()?.as_raw();

        let instance = {
            let app_name = CString::new(self.app_name.as_bytes())?;
            let engine_name = CString::new(ENGINE_NAME)?;

            let vk_app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version({
                    let (major, minor, patch) = self.version;
                    vk::make_api_version(0, major, minor, patch)
                })
                .engine_name(&engine_name)
                .engine_version(engine_version())
                .api_version(VULKAN_VERSION);

            let vk_extensions =
                required_instance_extensions_with_surface(debug_utils_enabled, display)?;

            let layers = if debug_utils_enabled
                && instance_layer_available(&entry, VALIDATION_LAYER)?
            {
                vec![VALIDATION_LAYER.as_ptr()]
            } else {
                Vec::new()
            };

            let info = vk::InstanceCreateInfo::default()
                .application_info(&vk_app_info)
                .enabled_extension_names(&vk_extensions)
                .enabled_layer_names(&layers);

            unsafe { entry.create_instance(&info, None)? }
        };
        debug!("Instance created");

        let debug_utils = if debug_utils_enabled {
            match DebugUtils::new(&entry, &instance) {
                Ok(debug_utils) => Some(debug_utils),
                Err(err) => {
                    unsafe { instance.destroy_instance(None) };
                    return Err(err);
                }
            }
        } else {
            None
        };

        let surface = match Surface::create(&entry, &instance, window, window_size) {
            Ok(surface) => surface,
            Err(err) => {
                unsafe {
                    if let Some(debug_utils) = debug_utils {
                        debug_utils.destroy();
                    }
                    instance.destroy_instance(None);
                }
                return Err(err);
            }
        };
        info!("Vulkan was successfully created as a surface.");

        Ok(VkGameApp {
            _entry: entry,
            instance,
            debug_utils,
            surface,
        })
    }
}

fn engine_version() -> u32 {
    let parse = |part: &str| -> u32 { part.parse().unwrap_or(0) };
    vk::make_api_version(
        0,
        parse(env!("CARGO_PKG_VERSION_MAJOR")),
        parse(env!("CARGO_PKG_VERSION_MINOR")),
        parse(env!("CARGO_PKG_VERSION_PATCH")),
    )
}
