use crate::config::LogConfig;
use anyhow::Context;
use simplelog::{ConfigBuilder, WriteLogger};

/// Start writing log messages to the file given by `config`.  The terminal is
/// taken over by the game, so nothing is ever logged to stderr.
pub(crate) fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let Some(path) = config.log_file() else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::File::create(&path).context("failed to open log file")?;
    let log_config = ConfigBuilder::new()
        .set_target_level(config.level)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    WriteLogger::init(config.level, log_config, file).context("failed to install logger")?;
    Ok(())
}
