//! Section bodies written back into the weekly file

use chrono::NaiveDateTime;
use weekly_review_core::{AnalysisResult, Kpt, ReviewMode, TemplateVersion};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const NO_ANALYSIS: &str = "分析なし";
const NO_EVALUATION: &str = "評価なし";
const NO_REMINDER: &str = "リマインドなし";
const NOTHING: &str = "なし";

/// Body of the AI summary section for the given layout and mode
pub fn render_ai_summary(
    result: &AnalysisResult,
    template: TemplateVersion,
    mode: ReviewMode,
    generated_at: NaiveDateTime,
) -> String {
    let timestamp = generated_at.format(TIMESTAMP_FORMAT).to_string();
    match (mode, template) {
        (ReviewMode::Detailed, TemplateVersion::Current) => detailed_current(result, &timestamp),
        (ReviewMode::Detailed, TemplateVersion::Legacy) => detailed_legacy(result, &timestamp),
        // Same layout for both templates
        (ReviewMode::Quick, _) => quick(result, &timestamp),
    }
}

fn or<'a>(field: &'a Option<String>, fallback: &'a str) -> &'a str {
    field.as_deref().unwrap_or(fallback)
}

fn suggestion_lines(result: &AnalysisResult) -> String {
    result
        .next_week_suggestions
        .iter()
        .map(|s| format!("  - {}", s))
        .collect::<Vec<_>>()
        .join("\n")
}

fn detailed_current(result: &AnalysisResult, timestamp: &str) -> String {
    format!(
        "**[{timestamp} AI週次評価]**\n\
         \n\
         📊 **フォーカス達成度**: {score}/100点\n\
         \n\
         **気分の傾向**\n\
         {mood}\n\
         \n\
         **振り返りの洞察**\n\
         {insights}\n\
         \n\
         **KPTフィードバック**\n\
         {kpt}\n\
         \n\
         **総合評価**\n\
         {overall}\n\
         \n\
         **来週へのサジェスト**\n\
         {suggestions}",
        score = result.focus_achievement_score.unwrap_or(0),
        mood = or(&result.mood_trend, NO_ANALYSIS),
        insights = or(&result.reflection_insights, NO_ANALYSIS),
        kpt = or(&result.kpt_feedback, NO_ANALYSIS),
        overall = or(&result.overall_summary, NO_EVALUATION),
        suggestions = suggestion_lines(result),
    )
}

fn detailed_legacy(result: &AnalysisResult, timestamp: &str) -> String {
    format!(
        "**[{timestamp} AI評価]**\n\
         \n\
         📊 **目標達成度**: {score}/100点\n\
         ✅ **タスク完了率**: {rate}%\n\
         \n\
         **Good/Badパターン分析**\n\
         {good_bad}\n\
         \n\
         **年度目標との整合性**\n\
         {alignment}\n\
         \n\
         **総合評価**\n\
         {overall}\n\
         \n\
         **来週へのサジェスト**\n\
         {suggestions}",
        score = result.goal_achievement_score.unwrap_or(0),
        rate = result.task_completion_rate.unwrap_or(0),
        good_bad = or(&result.good_bad_analysis, NO_ANALYSIS),
        alignment = or(&result.annual_goal_alignment, NO_ANALYSIS),
        overall = or(&result.overall_summary, NO_EVALUATION),
        suggestions = suggestion_lines(result),
    )
}

fn quick(result: &AnalysisResult, timestamp: &str) -> String {
    let mut body = format!(
        "**[{timestamp} AI簡易チェック]**\n\n{}",
        or(&result.message, NO_REMINDER)
    );
    if let Some(comment) = &result.mood_comment {
        body.push_str("\n😊 ");
        body.push_str(comment);
    }
    body
}

/// Body of the carry-over section built from last week's KPT
pub fn render_carryover(previous: &Kpt) -> String {
    let non_empty = |s: &str| if s.is_empty() { NOTHING.to_string() } else { s.to_string() };
    format!(
        "**前週のProblem（課題）**\n\
         {}\n\
         \n\
         **前週のTry（試したこと）**\n\
         {}\n\
         \n\
         → 今週はどうだった？上記を振り返りに活かそう",
        non_empty(&previous.problem),
        non_empty(&previous.try_next),
    )
}
