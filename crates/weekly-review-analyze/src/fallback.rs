use weekly_review_core::{AnalysisResult, ReviewMode};

const QUICK_ERROR: &str = "分析エラーが発生しました";
const FIELD_ERROR: &str = "分析エラー";
const SUGGESTION_ERROR: &str = "エラーにより生成できませんでした";

/// Fixed-shape result used when analysis could not be obtained
pub fn fallback_result(mode: ReviewMode, reason: &str) -> AnalysisResult {
    match mode {
        ReviewMode::Quick => AnalysisResult {
            message: Some(QUICK_ERROR.to_string()),
            ..Default::default()
        },
        ReviewMode::Detailed => AnalysisResult {
            focus_achievement_score: Some(0),
            goal_achievement_score: Some(0),
            task_completion_rate: Some(0),
            mood_trend: Some(FIELD_ERROR.to_string()),
            reflection_insights: Some(FIELD_ERROR.to_string()),
            kpt_feedback: Some(FIELD_ERROR.to_string()),
            good_bad_analysis: Some(FIELD_ERROR.to_string()),
            annual_goal_alignment: Some(FIELD_ERROR.to_string()),
            overall_summary: Some(format!("{}: {}", FIELD_ERROR, reason)),
            next_week_suggestions: vec![SUGGESTION_ERROR.to_string()],
            ..Default::default()
        },
    }
}
