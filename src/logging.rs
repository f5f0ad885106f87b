use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::warn;

/// Install the fmt subscriber. Logs go to stderr so stdout only carries results.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append a timestamped line to the error log at `log_path`.
pub fn log_error(log_path: &Path, message: &str) {
    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Could not create log directory {}: {}", parent.display(), e);
        }
    }

    match fs::OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
            if let Err(e) = writeln!(file, "[{}] {}", timestamp, message) {
                warn!("Could not write to error log {}: {}", log_path.display(), e);
            }
        }
        Err(e) => warn!("Could not open error log {}: {}", log_path.display(), e),
    }
}
