//! Prompt construction for both templates and both review modes

use weekly_review_core::{ReportSummary, ReviewMode, TemplateVersion};

const MAX_FIELD_CHARS: usize = 4000;
const NOT_FILLED: &str = "未記入";

const QUICK_SYSTEM: &str = "あなたは個人の週次目標達成をサポートするコーチです。
週報の進捗状況を確認し、簡潔なリマインドメッセージを提供してください。

回答はJSON形式で以下を含めてください：
- message: リマインドメッセージ（150字以内）
- mood_comment: 調子に関するコメント（50字以内、ない場合は空文字）";

const DETAILED_SYSTEM_CURRENT: &str = "あなたは個人の週次振り返りをサポートする専門家です。
週報の内容を多角的に分析し、建設的なフィードバックを提供してください。

回答はJSON形式で以下を含めてください：
- focus_achievement_score: フォーカス達成度 (0-100の整数)
- mood_trend: 気分の傾向分析（100字程度）
- reflection_insights: 振り返りの洞察（150字程度）
- kpt_feedback: KPTに対するフィードバック（100字程度）
- overall_summary: 総合評価コメント（200字程度）
- next_week_suggestions: 来週の目標サジェスト（配列、3項目、各50字以内）";

const DETAILED_SYSTEM_LEGACY: &str = "あなたは個人の週次振り返りをサポートする専門家です。
週報の内容を多角的に分析し、建設的なフィードバックを提供してください。

回答はJSON形式で以下を含めてください：
- goal_achievement_score: 目標達成度 (0-100の整数)
- task_completion_rate: タスク完了率 (0-100の整数)
- good_bad_analysis: Good/Badのパターン分析（150字程度）
- annual_goal_alignment: 年度目標との整合性（100字程度）
- overall_summary: 総合評価コメント（200字程度）
- next_week_suggestions: 来週の目標サジェスト（配列、3項目、各50字以内）";

/// System prompt for the mode. Detailed keys follow the document's template,
/// which is also what the renderer reads them back by.
pub fn system_prompt(summary: &ReportSummary, mode: ReviewMode) -> &'static str {
    match (mode, summary.template) {
        (ReviewMode::Quick, _) => QUICK_SYSTEM,
        (ReviewMode::Detailed, TemplateVersion::Current) => DETAILED_SYSTEM_CURRENT,
        (ReviewMode::Detailed, TemplateVersion::Legacy) => DETAILED_SYSTEM_LEGACY,
    }
}

/// User prompt describing the report
pub fn user_prompt(summary: &ReportSummary, mode: ReviewMode) -> String {
    match (mode, summary.template) {
        (ReviewMode::Quick, TemplateVersion::Current) => quick_current(summary),
        (ReviewMode::Quick, TemplateVersion::Legacy) => quick_legacy(summary),
        (ReviewMode::Detailed, TemplateVersion::Current) => detailed_current(summary),
        (ReviewMode::Detailed, TemplateVersion::Legacy) => detailed_legacy(summary),
    }
}

/// Field text clipped to a bounded length, or the placeholder when empty
fn field(text: &str) -> String {
    if text.is_empty() {
        return NOT_FILLED.to_string();
    }
    match text.char_indices().nth(MAX_FIELD_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

fn quick_current(s: &ReportSummary) -> String {
    format!(
        "【今週のフォーカス】\n{}\n\n\
         【デイリーログ記録状況】\n記録日数: {}/7日\n平均気分スコア: {:.1}/5\n\n\
         【KPT】\nTry（今週試すこと）: {}\n\n\
         簡潔なリマインドをお願いします。",
        field(&s.focus),
        s.daily_log.len(),
        s.daily_log.avg_mood(),
        field(&s.kpt.try_next),
    )
}

fn quick_legacy(s: &ReportSummary) -> String {
    format!(
        "【今週の目標】\n{}\n\n\
         【ToDo進捗】\n完了: {}/{}\n\n\
         【やったこと】\n{}\n\n\
         簡潔なリマインドをお願いします。",
        field(&s.desired_results),
        s.todo_completed(),
        s.todo_total(),
        field(&s.accomplishments),
    )
}

fn detailed_current(s: &ReportSummary) -> String {
    let daily = s
        .daily_log
        .entries
        .iter()
        .map(|e| format!("{}: {} ({}/5)", e.day, e.content, e.mood))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "【今週のフォーカス】\n{}\n\n\
         【デイリーログ】\n{}\n平均気分スコア: {:.1}/5\n\n\
         【振り返り（4つの質問）】\n{}\n\n\
         【KPT】\nKeep: {}\nProblem: {}\nTry: {}\n\n\
         【年度目標】\n{}\n\n\
         上記の週報を分析し、JSON形式で出力してください。",
        field(&s.focus),
        field(&daily),
        s.daily_log.avg_mood(),
        field(&s.reflection),
        field(&s.kpt.keep),
        field(&s.kpt.problem),
        field(&s.kpt.try_next),
        field(&s.annual_goals),
    )
}

fn detailed_legacy(s: &ReportSummary) -> String {
    format!(
        "【今週の目標】\n{}\n\n\
         【ToDo状況】\n完了: {}/{}\n{}\n\n\
         【やったこと】\n{}\n\n\
         【Good/Bad】\n{}\n\n\
         【要因分析】\n{}\n\n\
         【年度目標】\n{}\n\n\
         上記の週報を分析し、JSON形式で出力してください。",
        field(&s.desired_results),
        s.todo_completed(),
        s.todo_total(),
        s.todos.lines().join("\n"),
        field(&s.accomplishments),
        field(&s.good_bad),
        field(&s.analysis),
        field(&s.annual_goals),
    )
}
