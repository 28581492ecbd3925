//! Message text for each sink and event

use crate::base::{Notification, NotifyEvent};
use weekly_review_core::{AnalysisResult, TemplateVersion};

pub const REMINDER_TITLE: &str = "📝 週報AIチェック";
pub const REVIEW_TITLE: &str = "📊 週報AI評価完了";
pub const ERROR_TITLE: &str = "⚠️ 週報AIレビュー エラー";

pub const REPORT_NOT_FOUND: &str = "今週の週報ファイルが見つかりません";
pub const WRITE_FAILED: &str = "週報の書き込みに失敗しました";

const DEFAULT_REMINDER: &str = "リマインドを確認してください";
const REVIEW_SUBTITLE: &str = "詳細は週報ファイルを確認してください";
const MAX_SUGGESTIONS: usize = 3;

/// Short message for a desktop banner
pub fn desktop(event: &NotifyEvent<'_>) -> Notification {
    match event {
        NotifyEvent::Reminder(result) => Notification {
            title: REMINDER_TITLE.to_string(),
            subtitle: result.todo_status.clone().unwrap_or_default(),
            body: reminder_text(result).to_string(),
        },
        NotifyEvent::Review { result, template } => {
            let body = match template {
                TemplateVersion::Current => format!(
                    "フォーカス達成度: {}点",
                    result.focus_achievement_score.unwrap_or(0)
                ),
                TemplateVersion::Legacy => format!(
                    "目標達成度: {}点 | タスク完了率: {}%",
                    result.goal_achievement_score.unwrap_or(0),
                    result.task_completion_rate.unwrap_or(0)
                ),
            };
            Notification {
                title: REVIEW_TITLE.to_string(),
                subtitle: REVIEW_SUBTITLE.to_string(),
                body,
            }
        }
        NotifyEvent::Error(message) => Notification {
            title: ERROR_TITLE.to_string(),
            subtitle: String::new(),
            body: message.to_string(),
        },
    }
}

/// Chat message carrying the full result
pub fn chat(event: &NotifyEvent<'_>) -> Notification {
    let body = match event {
        NotifyEvent::Reminder(result) => chat_reminder(result),
        NotifyEvent::Review { result, template } => chat_review(result, *template),
        NotifyEvent::Error(message) => format!("{}\n\n{}", ERROR_TITLE, message),
    };
    Notification {
        title: String::new(),
        subtitle: String::new(),
        body,
    }
}

fn reminder_text(result: &AnalysisResult) -> &str {
    result.message.as_deref().unwrap_or(DEFAULT_REMINDER)
}

fn chat_reminder(result: &AnalysisResult) -> String {
    let mut body = format!(
        "{}\n\n今週のフォーカス進捗を確認しました。\n\n{}\n\n週報を更新してください！",
        REMINDER_TITLE,
        reminder_text(result)
    );
    if let Some(comment) = &result.mood_comment {
        body.push_str("\n\n😊 ");
        body.push_str(comment);
    }
    body
}

fn chat_review(result: &AnalysisResult, template: TemplateVersion) -> String {
    let scores = match template {
        TemplateVersion::Current => format!(
            "🎯 フォーカス達成度: {}/100点",
            result.focus_achievement_score.unwrap_or(0)
        ),
        TemplateVersion::Legacy => format!(
            "🎯 目標達成度: {}/100点\n✅ タスク完了率: {}%",
            result.goal_achievement_score.unwrap_or(0),
            result.task_completion_rate.unwrap_or(0)
        ),
    };

    let mut body = format!(
        "{}\n\n{}\n\n【総合評価】\n{}\n\n【来週へのサジェスト】",
        REVIEW_TITLE,
        scores,
        result.overall_summary.as_deref().unwrap_or_default()
    );
    for (i, suggestion) in result
        .next_week_suggestions
        .iter()
        .take(MAX_SUGGESTIONS)
        .enumerate()
    {
        body.push_str(&format!("\n{}. {}", i + 1, suggestion));
    }
    body.push_str("\n\n詳細は週報ファイルをチェック！");
    body
}
