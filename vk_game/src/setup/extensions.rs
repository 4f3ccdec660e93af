use crate::errors::Result;
use ash::ext;
use raw_window_handle::RawDisplayHandle;
use std::{ffi::CStr, os::raw::c_char};

/// Get extensions required for the instance and to present to the given display.
pub(crate) fn required_instance_extensions_with_surface(
    with_debug_utils: bool,
    display: RawDisplayHandle,
) -> Result<Vec<*const c_char>> {
    let mut extensions = ash_window::enumerate_required_extensions(display)?.to_vec();

    if with_debug_utils {
        extensions.push(ext::debug_utils::NAME.as_ptr());
    }

    Ok(extensions)
}

/// Whether the loader exposes the instance extension `name`.
pub(crate) fn instance_extension_available(entry: &ash::Entry, name: &CStr) -> Result<bool> {
    let available = unsafe { entry.enumerate_instance_extension_properties(None)? };
    Ok(available
        .iter()
        .any(|ext| ext.extension_name_as_c_str().map_or(false, |n| n == name)))
}

/// Whether the loader knows about the instance layer `name`.
pub(crate) fn instance_layer_available(entry: &ash::Entry, name: &CStr) -> Result<bool> {
    let available = unsafe { entry.enumerate_instance_layer_properties()? };
    Ok(available
        .iter()
        .any(|layer| layer.layer_name_as_c_str().map_or(false, |n| n == name)))
}
