//! Weekly report document and the summary derived from it

use crate::fields::{Checklist, DailyLog, Kpt};
use crate::sections::Sections;
use crate::template::TemplateVersion;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Raw text of one weekly file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Recomputed from content on every call
    pub fn template(&self) -> TemplateVersion {
        TemplateVersion::detect(&self.text)
    }

    pub fn sections(&self) -> Sections {
        Sections::extract(&self.text)
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_sections(self.path.clone(), self.template(), &self.sections())
    }
}

/// Flat view over both template vocabularies, handed to the analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub file_path: PathBuf,
    /// Layout the source document follows; prompts and rendering both key off it
    pub template: TemplateVersion,

    // current template
    pub focus: String,
    pub daily_log: DailyLog,
    pub reflection: String,
    pub kpt: Kpt,
    pub prev_week: String,

    // shared (legacy values merged in when current ones are absent)
    pub ai_summary: String,
    pub annual_goals: String,

    // legacy template
    pub desired_results: String,
    pub accomplishments: String,
    pub good_bad: String,
    pub analysis: String,
    pub next_week_goals: String,
    pub todos: Checklist,
}

impl ReportSummary {
    pub fn from_sections(
        file_path: PathBuf,
        template: TemplateVersion,
        sections: &Sections,
    ) -> Self {
        Self {
            file_path,
            template,
            focus: sections.get("focus").to_string(),
            daily_log: DailyLog::parse(sections.get("daily_log")),
            reflection: sections.get("reflection").to_string(),
            kpt: Kpt::parse(sections.get("kpt")),
            prev_week: sections.get("prev_week").to_string(),
            ai_summary: sections.get("ai_summary").to_string(),
            annual_goals: sections.get("annual_goals").to_string(),
            desired_results: sections.get("desired_results").to_string(),
            accomplishments: sections.get("accomplishments").to_string(),
            good_bad: sections.get("good_bad").to_string(),
            analysis: sections.get("analysis").to_string(),
            next_week_goals: sections.get("next_week_goals").to_string(),
            todos: Checklist::parse(sections.get("todos")),
        }
    }

    pub fn todo_completed(&self) -> usize {
        self.todos.completed()
    }

    pub fn todo_total(&self) -> usize {
        self.todos.total()
    }
}
