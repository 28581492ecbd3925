//! In-place replacement of a single section
//!
//! Everything outside the replaced span is preserved byte for byte. A heading
//! that is missing from the document is appended instead, so first-run files
//! without an AI section heal themselves.

use crate::io::{atomic_write, create_backup, read_document, VaultError};
use crate::render::{render_ai_summary, render_carryover};
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use weekly_review_core::{
    find_heading_line, section_end, AnalysisResult, Kpt, ReviewMode, TemplateVersion,
};

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// What a section update did to the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// An existing section body was replaced
    Replaced { heading: String },
    /// The heading was missing, so the section was appended
    Appended { heading: String },
    /// Nothing written
    Skipped { reason: String },
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        !matches!(self, WriteOutcome::Skipped { .. })
    }
}

/// Replace the body under `heading`, or append the section when absent.
///
/// The span runs from the heading line (trailing whitespace and `\r`
/// included) to the next boundary of the document's detected template, or
/// end of text. A replacement that leaves
/// the text unchanged is treated as absent, so the same body written twice
/// appears twice.
pub fn replace_section(document: &str, heading: &str, new_body: &str) -> String {
    replace_section_detailed(document, heading, new_body).0
}

fn replace_section_detailed(document: &str, heading: &str, new_body: &str) -> (String, bool) {
    let replacement = format!("{}\n{}\n", heading, new_body);

    let Some((heading_start, body_start)) = find_heading_line(document, heading) else {
        tracing::warn!(heading, "section not found, appending at end");
        return (format!("{}\n\n{}", document, replacement), false);
    };

    let boundaries = TemplateVersion::detect(document).descriptor().rewrite_boundaries;
    let end = section_end(document, body_start, boundaries);

    let mut updated = String::with_capacity(document.len() + new_body.len());
    updated.push_str(&document[..heading_start]);
    updated.push_str(&replacement);
    updated.push_str(&document[end..]);

    // A replacement that changes nothing counts as a miss
    if updated == document {
        tracing::warn!(heading, "section unchanged, appending at end");
        return (format!("{}\n\n{}", document, replacement), false);
    }
    (updated, true)
}

/// Applies section updates to weekly files.
///
/// The first mutation of each file made through one writer is preceded by a
/// backup, so the backup always holds the content from before the run.
#[derive(Debug, Default)]
pub struct DocumentWriter {
    backed_up: HashSet<PathBuf>,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `result` into the AI summary section of `path`
    pub fn update_ai_summary(
        &mut self,
        path: &Path,
        result: &AnalysisResult,
        mode: ReviewMode,
        generated_at: NaiveDateTime,
    ) -> Result<WriteOutcome, RewriteError> {
        self.backup_once(path);

        let document = read_document(path)?;
        let template = document.template();
        let heading = template.descriptor().ai_summary_heading;
        let body = render_ai_summary(result, template, mode, generated_at);

        self.write_section(path, document.text(), heading, &body)
    }

    /// Carry last week's Problem/Try into this week's file. Layouts without a
    /// carry-over heading are left untouched.
    pub fn update_carryover_section(
        &mut self,
        path: &Path,
        previous: &Kpt,
    ) -> Result<WriteOutcome, RewriteError> {
        let document = read_document(path)?;
        let template = document.template();

        let Some(heading) = template.descriptor().carryover_heading else {
            tracing::info!(%template, "template has no carry-over section, skipping");
            return Ok(WriteOutcome::Skipped {
                reason: format!("{} template has no carry-over section", template),
            });
        };

        self.backup_once(path);
        self.write_section(path, document.text(), heading, &render_carryover(previous))
    }

    /// Rendered AI summary section as it would be written, without touching
    /// the file
    pub fn preview_ai_summary(
        path: &Path,
        result: &AnalysisResult,
        mode: ReviewMode,
        generated_at: NaiveDateTime,
    ) -> Result<String, RewriteError> {
        let document = read_document(path)?;
        let template = document.template();
        let heading = template.descriptor().ai_summary_heading;
        let body = render_ai_summary(result, template, mode, generated_at);
        Ok(format!("{}\n{}\n", heading, body))
    }

    fn write_section(
        &mut self,
        path: &Path,
        text: &str,
        heading: &str,
        body: &str,
    ) -> Result<WriteOutcome, RewriteError> {
        let (updated, replaced) = replace_section_detailed(text, heading, body);
        atomic_write(path, updated.as_bytes())?;
        tracing::info!(path = %path.display(), heading, replaced, "weekly report updated");

        let heading = heading.to_string();
        Ok(if replaced {
            WriteOutcome::Replaced { heading }
        } else {
            WriteOutcome::Appended { heading }
        })
    }

    /// A failed backup is logged and does not block the write. Only the first
    /// attempt per file is made, so a later retry never copies content this
    /// writer already changed.
    fn backup_once(&mut self, path: &Path) {
        if !self.backed_up.insert(path.to_path_buf()) {
            return;
        }
        match create_backup(path) {
            Ok(backup) => tracing::info!(backup = %backup.display(), "backup created"),
            Err(e) => tracing::warn!(error = %e, "backup failed, continuing"),
        }
    }
}
