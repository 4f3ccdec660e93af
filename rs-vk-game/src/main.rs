use simplelog::{
    ColorChoice, ConfigBuilder, LevelFilter, LevelPadding, SimpleLogger, TermLogger,
    TerminalMode, ThreadLogMode,
};

use cli::Cli;
use engine::Engine;

mod cli;
mod engine;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    setup_logger(cli.log_level())?;

    Engine::new(cli.into_config()).run()
}

fn setup_logger(level: LevelFilter) -> anyhow::Result<()> {
    let config = ConfigBuilder::new()
        .set_level_padding(LevelPadding::Right)
        // Thread
        .set_thread_mode(ThreadLogMode::Both)
        .set_thread_level(LevelFilter::Error)
        // Code path
        .set_location_level(LevelFilter::Trace)
        .set_target_level(LevelFilter::Trace)
        .build();

    if TermLogger::init(level, config.clone(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        SimpleLogger::init(level, config)?;
    }
    Ok(())
}
