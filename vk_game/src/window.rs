use crate::{config::EngineConfig, errors::Result};
use log::{debug, info, warn};
use winit::{
    dpi::LogicalSize,
    event_loop::ActiveEventLoop,
    monitor::MonitorHandle,
    window::{Fullscreen, Window},
};

/// Create the game window, windowed or covering the primary monitor.
pub fn create_window(event_loop: &ActiveEventLoop, config: &EngineConfig) -> Result<Window> {
    let monitor = event_loop.primary_monitor();
    if let Some(monitor) = monitor.as_ref() {
        log_video_mode(monitor);
    }

    let mut attributes = Window::default_attributes()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.size.0, config.size.1));

    if config.borderless_fullscreen {
        if monitor.is_none() {
            warn!("No primary monitor reported, fullscreen on the current one");
        }
        attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(monitor)));
    }

    let window = event_loop.create_window(attributes)?;
    debug!("Window '{}' created", config.title);

    Ok(window)
}

fn log_video_mode(monitor: &MonitorHandle) {
    let size = monitor.size();
    let refresh = monitor
        .refresh_rate_millihertz()
        .map(|mhz| format!("{:.2} Hz", mhz as f64 / 1000.0))
        .unwrap_or_else(|| "unknown refresh rate".into());

    // Deepest mode at the monitor's native resolution
    let bit_depth = monitor
        .video_modes()
        .filter(|mode| mode.size() == size)
        .map(|mode| mode.bit_depth())
        .max();

    info!(
        "Primary monitor {}: {}x{}, {} bits per pixel, {}",
        monitor.name().unwrap_or_else(|| "<unnamed>".into()),
        size.width,
        size.height,
        bit_depth.map_or_else(|| "?".to_string(), |depth| depth.to_string()),
        refresh
    );
}
