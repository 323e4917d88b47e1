//! File logging. Output goes to rotating files under the data directory and
//! never to the terminal, so command output stays clean.

use std::path::Path;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

use crate::error::{LendlordError, Result};

const LOG_FILE_BASENAME: &str = "lendlord";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start the file logger. `RUST_LOG` overrides `level`.
///
/// The returned handle must be kept alive for the rest of the process.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle> {
    std::fs::create_dir_all(log_dir)?;
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|e| LendlordError::Settings(format!("invalid log level `{level}`: {e}")))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| LendlordError::Other(format!("failed to start logger: {e}")))?;

    log::debug!(
        "event=start version={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(handle)
}
