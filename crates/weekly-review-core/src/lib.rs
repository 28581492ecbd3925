//! Weekly report model: templates, section extraction and field parsing

mod analysis;
mod config;
mod fields;
mod report;
mod sections;
mod template;

pub use analysis::{AnalysisResult, ReviewMode};
pub use config::{
    ConfigError, LineSettings, OpenAiSettings, Settings, DEFAULT_BASE_URL, DEFAULT_EXTENSION,
    DEFAULT_LOG_LEVEL, DEFAULT_MODEL,
};
pub use fields::{weekday_from_label, Checklist, ChecklistItem, DailyEntry, DailyLog, Kpt};
pub use report::{Document, ReportSummary};
pub use sections::Sections;
pub use template::{
    find_heading_line, section_end, BodyShape, SectionSpec, TemplateDescriptor, TemplateVersion,
    CURRENT, LEGACY,
};
