//! Structured fields parsed out of section bodies
//!
//! None of these parsers fail. Malformed or missing input yields the zero
//! value of the field (empty list, empty string, zero average).

use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static CHECKBOX_RE: OnceLock<Regex> = OnceLock::new();
static DAILY_ROW_RE: OnceLock<Regex> = OnceLock::new();
static KEEP_RE: OnceLock<Regex> = OnceLock::new();
static PROBLEM_RE: OnceLock<Regex> = OnceLock::new();
static TRY_RE: OnceLock<Regex> = OnceLock::new();

/// One checkbox line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// The original line, unchanged
    pub line: String,
    pub done: bool,
}

/// Checkbox lines of a todo section, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Collect lines starting with `- [ ]`, `- [x]` or `- [X]`
    pub fn parse(section: &str) -> Self {
        let checkbox_re = CHECKBOX_RE.get_or_init(|| Regex::new(r"^- \[([ xX])\]").unwrap());

        let items = section
            .lines()
            .filter_map(|line| {
                let cap = checkbox_re.captures(line)?;
                Some(ChecklistItem {
                    line: line.to_string(),
                    done: cap[1].eq_ignore_ascii_case("x"),
                })
            })
            .collect();

        Self { items }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn completed(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.line.as_str()).collect()
    }

    /// Completion rate as a percentage, 0 for an empty list
    pub fn completion_rate(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.completed() as f64 / self.total() as f64 * 100.0
    }
}

/// One row of the daily log table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Day-of-week label as written (`月`..`日`)
    pub day: String,
    pub content: String,
    /// Mood score, 1..=5
    pub mood: u8,
}

impl DailyEntry {
    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_label(&self.day)
    }
}

/// Map a Japanese day-of-week label to a weekday
pub fn weekday_from_label(label: &str) -> Option<Weekday> {
    match label {
        "月" => Some(Weekday::Mon),
        "火" => Some(Weekday::Tue),
        "水" => Some(Weekday::Wed),
        "木" => Some(Weekday::Thu),
        "金" => Some(Weekday::Fri),
        "土" => Some(Weekday::Sat),
        "日" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Mood-tagged daily entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    pub entries: Vec<DailyEntry>,
}

impl DailyLog {
    /// Parse `| 月 | content | 4/5 |` rows; anything else is skipped
    pub fn parse(section: &str) -> Self {
        let row_re = DAILY_ROW_RE.get_or_init(|| {
            Regex::new(r"^\s*\|\s*([月火水木金土日])\s*\|\s*(.*?)\s*\|\s*(\d+)/5\s*\|").unwrap()
        });

        let entries = section
            .lines()
            .filter_map(|line| {
                let cap = row_re.captures(line)?;
                let mood: u8 = cap[3].parse().ok()?;
                if !(1..=5).contains(&mood) {
                    return None;
                }
                Some(DailyEntry {
                    day: cap[1].to_string(),
                    content: cap[2].trim().to_string(),
                    mood,
                })
            })
            .collect();

        Self { entries }
    }

    /// Mean mood over all entries, 0 when there are none
    pub fn avg_mood(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.entries.iter().map(|e| u32::from(e.mood)).sum();
        sum as f64 / self.entries.len() as f64
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keep / Problem / Try retrospective items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpt {
    pub keep: String,
    pub problem: String,
    #[serde(rename = "try")]
    pub try_next: String,
}

impl Kpt {
    /// Each label is searched on its own, so a missing one leaves only its
    /// own field empty.
    pub fn parse(section: &str) -> Self {
        let keep_re = KEEP_RE.get_or_init(|| labeled_bullet("Keep", "続ける"));
        let problem_re = PROBLEM_RE.get_or_init(|| labeled_bullet("Problem", "課題"));
        let try_re = TRY_RE.get_or_init(|| labeled_bullet("Try", "来週試す"));

        Self {
            keep: bullet_body(section, keep_re),
            problem: bullet_body(section, problem_re),
            try_next: bullet_body(section, try_re),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.problem.is_empty() && self.try_next.is_empty()
    }
}

fn labeled_bullet(label: &str, alias: &str) -> Regex {
    Regex::new(&format!(
        r"-\s*\*\*{}[（(]{}[)）]\*\*[:：]\s*",
        label, alias
    ))
    .unwrap()
}

/// Text after the label, up to the next top-level bullet or end of section
fn bullet_body(section: &str, label_re: &Regex) -> String {
    let Some(label) = label_re.find(section) else {
        return String::new();
    };
    let rest = &section[label.end()..];
    let end = rest.find("\n-").unwrap_or(rest.len());
    rest[..end].trim().to_string()
}
