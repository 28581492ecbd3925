//! ISO-week file resolution inside the vault

use chrono::{Datelike, Duration, NaiveDate};
use std::path::{Path, PathBuf};

/// Which calendar week to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Week {
    Current,
    Previous,
}

impl Week {
    /// A date inside the requested week
    pub fn date_from(self, today: NaiveDate) -> NaiveDate {
        match self {
            Week::Current => today,
            Week::Previous => today - Duration::days(7),
        }
    }
}

/// `{isoYear}-W{isoWeek:02}.{extension}` for the week containing `date`
pub fn week_file_name(date: NaiveDate, extension: &str) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}.{}", iso.year(), iso.week(), extension)
}

/// Resolves weekly report paths under a vault root
#[derive(Debug, Clone)]
pub struct VaultLocator {
    root: PathBuf,
    extension: String,
}

impl VaultLocator {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Expected path for the week, whether or not it exists
    pub fn expected_path(&self, week: Week, today: NaiveDate) -> PathBuf {
        self.root
            .join(week_file_name(week.date_from(today), &self.extension))
    }

    /// Path for the week, only when the file exists
    pub fn locate(&self, week: Week, today: NaiveDate) -> Option<PathBuf> {
        let path = self.expected_path(week, today);
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!(path = %path.display(), "weekly report not found");
            None
        }
    }
}
