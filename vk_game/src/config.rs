/// Startup parameters of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub title: String,
    /// Logical size of the window when not fullscreen.
    pub size: (u32, u32),
    /// Cover the primary monitor with an undecorated window.
    pub borderless_fullscreen: bool,
    pub target_fps: i32,
    pub verbose: bool,
    pub app_version: (u32, u32, u32),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "HELLO WORLD!".into(),
            size: (800, 600),
            borderless_fullscreen: false,
            target_fps: 250,
            verbose: true,
            app_version: (0, 1, 0),
        }
    }
}
