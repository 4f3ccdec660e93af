use clap::Parser;
use log::LevelFilter;
use std::ffi::OsString;
use vk_game::config::EngineConfig;

/// Spelling of the quiet flag inherited from older builds.
const LEGACY_QUIET_FLAG: &str = "/Q";

const VERBOSE_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
const TRACE_LOG_LEVEL: LevelFilter = LevelFilter::Trace;
const QUIET_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

#[derive(Parser, Debug)]
#[command(name = "rs-vk-game", about = "Vulkan window bootstrap with a paced frame loop")]
pub struct Cli {
    /// Don't print diagnostics (`/Q` works too).
    #[arg(short, long)]
    pub quiet: bool,
    /// Also log every presented frame.
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub trace: bool,
    /// Frames per second to aim for.
    #[arg(long, default_value_t = EngineConfig::default().target_fps, allow_negative_numbers = true)]
    pub fps: i32,
    /// Cover the primary monitor with a borderless window.
    #[arg(long)]
    pub fullscreen: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            QUIET_LOG_LEVEL
        } else if self.trace {
            TRACE_LOG_LEVEL
        } else {
            VERBOSE_LOG_LEVEL
        }
    }

    pub fn into_config(self) -> EngineConfig {
        EngineConfig {
            borderless_fullscreen: self.fullscreen,
            target_fps: self.fps,
            verbose: !self.quiet,
            ..EngineConfig::default()
        }
    }
}

fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == LEGACY_QUIET_FLAG {
                OsString::from("--quiet")
            } else {
                arg
            }
        })
        .collect()
}
