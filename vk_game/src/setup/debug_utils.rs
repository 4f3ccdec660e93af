use crate::errors::Result;
use ash::{ext, vk};
use log::{info, log, log_enabled, Level};
use std::{borrow::Cow, ffi::CStr};

pub(crate) const VALIDATION_LAYER: &CStr = c"VK_LAYER_KHRONOS_validation";

pub(crate) struct DebugUtils {
    loader: ext::debug_utils::Instance,
    messenger: vk::DebugUtilsMessengerEXT,
}

impl DebugUtils {
    pub(crate) fn new(entry: &ash::Entry, instance: &ash::Instance) -> Result<Self> {
        let loader = ext::debug_utils::Instance::new(entry, instance);
        let messenger = unsafe {
            loader.create_debug_utils_messenger(
                &vk::DebugUtilsMessengerCreateInfoEXT::default()
                    .message_severity(
                        vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                            | vk::DebugUtilsMessageSeverityFlagsEXT::INFO
                            | vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE,
                    )
                    .message_type(
                        vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
                    )
                    .pfn_user_callback(Some(vulkan_debug_callback)),
                None,
            )?
        };

        info!("Debug utils setup !");

        Ok(Self { loader, messenger })
    }

    /// Must run before the instance is destroyed.
    pub(crate) unsafe fn destroy(self) {
        self.loader
            .destroy_debug_utils_messenger(self.messenger, None);
    }
}

const VULKAN_LOG_TARGET: &str = "vulkan";

unsafe extern "system" fn vulkan_debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _user_data: *mut std::os::raw::c_void,
) -> vk::Bool32 {
    let level = severity_to_level(message_severity);
    if !log_enabled!(target: VULKAN_LOG_TARGET, level) {
        return vk::FALSE;
    }

    let line = match p_callback_data.as_ref() {
        Some(data) => describe_message(
            message_type,
            data.message_id_name_as_c_str(),
            data.message_id_number,
            data.message_as_c_str(),
        ),
        None => format!("{:?} message without callback data", message_type),
    };
    log!(target: VULKAN_LOG_TARGET, level, "{}", line);

    // Never abort the call that triggered the message.
    vk::FALSE
}

fn describe_message(
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    id_name: Option<&CStr>,
    id_number: i32,
    message: Option<&CStr>,
) -> String {
    let message = message.map_or(Cow::Borrowed("<empty>"), CStr::to_string_lossy);
    match id_name {
        Some(name) => format!(
            "{:?} {} (#{}): {}",
            message_type,
            name.to_string_lossy(),
            id_number,
            message
        ),
        None => format!("{:?} #{}: {}", message_type, id_number, message),
    }
}

/// Messages may carry several severity bits, the most severe one decides.
fn severity_to_level(severity: vk::DebugUtilsMessageSeverityFlagsEXT) -> Level {
    use vk::DebugUtilsMessageSeverityFlagsEXT as Severity;

    [
        (Severity::ERROR, Level::Error),
        (Severity::WARNING, Level::Warn),
        (Severity::INFO, Level::Info),
    ]
    .into_iter()
    .find(|(flag, _)| severity.contains(*flag))
    .map_or(Level::Trace, |(_, level)| level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vk::DebugUtilsMessageSeverityFlagsEXT as Severity;
    use vk::DebugUtilsMessageTypeFlagsEXT as MessageType;

    #[test]
    fn severities_map_to_log_levels() {
        assert_eq!(severity_to_level(Severity::ERROR), Level::Error);
        assert_eq!(severity_to_level(Severity::WARNING), Level::Warn);
        assert_eq!(severity_to_level(Severity::INFO), Level::Info);
        assert_eq!(severity_to_level(Severity::VERBOSE), Level::Trace);
        assert_eq!(severity_to_level(Severity::empty()), Level::Trace);
    }

    #[test]
    fn most_severe_bit_wins() {
        assert_eq!(
            severity_to_level(Severity::ERROR | Severity::WARNING),
            Level::Error
        );
        assert_eq!(
            severity_to_level(Severity::VERBOSE | Severity::INFO),
            Level::Info
        );
    }

    #[test]
    fn message_lines() {
        let line = describe_message(
            MessageType::VALIDATION,
            Some(c"VUID-vkDestroyInstance-instance-00629"),
            -1,
            Some(c"Surface not destroyed"),
        );
        assert_eq!(
            line,
            "VALIDATION VUID-vkDestroyInstance-instance-00629 (#-1): Surface not destroyed"
        );

        let line = describe_message(MessageType::GENERAL, None, 0, None);
        assert_eq!(line, "GENERAL #0: <empty>");
    }
}
