//! Review modes and the analysis result handed back by the model

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Depth of a review run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    /// Weekday reminder
    Quick,
    /// End-of-week evaluation
    Detailed,
}

impl ReviewMode {
    /// Friday through Sunday get the detailed review
    pub fn for_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Fri | Weekday::Sat | Weekday::Sun => ReviewMode::Detailed,
            _ => ReviewMode::Quick,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_weekday(date.weekday())
    }

    pub fn is_detailed(self) -> bool {
        matches!(self, ReviewMode::Detailed)
    }
}

impl std::fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewMode::Quick => f.write_str("quick"),
            ReviewMode::Detailed => f.write_str("detailed"),
        }
    }
}

/// Fields the model may return. Every field is optional; renderers and
/// notifiers substitute their own fallback text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    // quick
    pub message: Option<String>,
    pub mood_comment: Option<String>,
    pub todo_status: Option<String>,

    // detailed, current template
    pub focus_achievement_score: Option<u8>,
    pub mood_trend: Option<String>,
    pub reflection_insights: Option<String>,
    pub kpt_feedback: Option<String>,

    // detailed, legacy template
    pub goal_achievement_score: Option<u8>,
    pub task_completion_rate: Option<u8>,
    pub good_bad_analysis: Option<String>,
    pub annual_goal_alignment: Option<String>,

    // detailed, both
    pub overall_summary: Option<String>,
    pub next_week_suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Build from loosely shaped model output. Blank strings count as
    /// missing, scores may arrive as numbers or numeric strings and are
    /// clamped to 0..=100, unknown keys are ignored.
    pub fn from_value(value: &Value) -> Self {
        Self {
            message: text(value, "message"),
            mood_comment: text(value, "mood_comment"),
            todo_status: text(value, "todo_status"),
            focus_achievement_score: score(value, "focus_achievement_score"),
            mood_trend: text(value, "mood_trend"),
            reflection_insights: text(value, "reflection_insights"),
            kpt_feedback: text(value, "kpt_feedback"),
            goal_achievement_score: score(value, "goal_achievement_score"),
            task_completion_rate: score(value, "task_completion_rate"),
            good_bad_analysis: text(value, "good_bad_analysis"),
            annual_goal_alignment: text(value, "annual_goal_alignment"),
            overall_summary: text(value, "overall_summary"),
            next_week_suggestions: suggestions(value),
        }
    }
}

fn text(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn score(value: &Value, key: &str) -> Option<u8> {
    let raw = match value.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches(['%', '点']).parse().ok()?,
        _ => return None,
    };
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

fn suggestions(value: &Value) -> Vec<String> {
    match value.get("next_week_suggestions") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_for_weekday() {
        assert_eq!(ReviewMode::for_weekday(Weekday::Mon), ReviewMode::Quick);
        assert_eq!(ReviewMode::for_weekday(Weekday::Thu), ReviewMode::Quick);
        assert_eq!(ReviewMode::for_weekday(Weekday::Fri), ReviewMode::Detailed);
        assert_eq!(ReviewMode::for_weekday(Weekday::Sun), ReviewMode::Detailed);
    }

    #[test]
    fn test_mode_for_date() {
        // 2026-01-09 is a Friday
        let date = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        assert!(ReviewMode::for_date(date).is_detailed());
    }

    #[test]
    fn test_from_value_quick() {
        let result = AnalysisResult::from_value(&json!({
            "message": "順調です",
            "mood_comment": ""
        }));
        assert_eq!(result.message.as_deref(), Some("順調です"));
        assert_eq!(result.mood_comment, None);
    }

    #[test]
    fn test_from_value_scores() {
        let result = AnalysisResult::from_value(&json!({
            "focus_achievement_score": 72.4,
            "goal_achievement_score": "85点",
            "task_completion_rate": 140
        }));
        assert_eq!(result.focus_achievement_score, Some(72));
        assert_eq!(result.goal_achievement_score, Some(85));
        assert_eq!(result.task_completion_rate, Some(100));
    }

    #[test]
    fn test_from_value_suggestions() {
        let result = AnalysisResult::from_value(&json!({
            "next_week_suggestions": ["早寝", "", 3, "運動"]
        }));
        assert_eq!(result.next_week_suggestions, vec!["早寝", "運動"]);
    }

    #[test]
    fn test_from_value_ignores_non_object() {
        let result = AnalysisResult::from_value(&json!("plain text"));
        assert_eq!(result, AnalysisResult::default());
    }
}
