use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use weekly_review_core::Settings;

pub const LOG_FILE_NAME: &str = "weekly_review.log";

/// Directory for the log file: the configured one, else the platform data dir
pub fn log_dir(settings: &Settings) -> Option<PathBuf> {
    settings.log_dir.clone().or_else(|| {
        dirs::data_local_dir().map(|dir| dir.join("weekly-review").join("logs"))
    })
}

/// `RUST_LOG` when set, otherwise the configured level
fn filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level))
}

fn open_log_file(settings: &Settings) -> Option<File> {
    let dir = log_dir(settings)?;
    let opened = std::fs::create_dir_all(&dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE_NAME))
    });
    match opened {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[weekly-review] log file disabled: {} ({})", dir.display(), e);
            None
        }
    }
}

/// Install stderr logging plus an append-only log file
pub fn init(settings: &Settings) {
    let file_layer = open_log_file(settings).map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter(settings))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
}
