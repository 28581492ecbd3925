mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{write_report, CURRENT_REPORT, LEGACY_REPORT};
use weekly_review_analyze::{fallback_result, prompts, AnalyzeError, Analyzer};
use weekly_review_core::{AnalysisResult, ReportSummary, ReviewMode, TemplateVersion};
use weekly_review_vault::{read_document, DocumentWriter, VaultLocator, Week, WriteOutcome};

struct FixedAnalyzer(AnalysisResult);

impl Analyzer for FixedAnalyzer {
    fn request(&self, _: &ReportSummary, _: ReviewMode) -> Result<AnalysisResult, AnalyzeError> {
        Ok(self.0.clone())
    }
}

struct Unreachable;

impl Analyzer for Unreachable {
    fn request(&self, _: &ReportSummary, _: ReviewMode) -> Result<AnalysisResult, AnalyzeError> {
        Err(AnalyzeError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })
    }
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap()
}

#[test]
fn test_quick_message_lands_in_ai_summary_only() {
    let temp = tempfile::TempDir::new().unwrap();
    let now = at(2026, 1, 7);
    let path = write_report(temp.path(), "2026-W02.md", CURRENT_REPORT);

    let locator = VaultLocator::new(temp.path(), "md");
    assert_eq!(locator.locate(Week::Current, now.date()), Some(path.clone()));

    let summary = read_document(&path).unwrap().summary();
    let analyzer = FixedAnalyzer(AnalysisResult {
        message: Some("フォーカスを続けましょう".to_string()),
        ..Default::default()
    });
    let result = analyzer.analyze(&summary, ReviewMode::Quick);

    let mut writer = DocumentWriter::new();
    let outcome = writer
        .update_ai_summary(&path, &result, ReviewMode::Quick, now)
        .unwrap();
    assert!(matches!(outcome, WriteOutcome::Replaced { .. }));

    let updated = std::fs::read_to_string(&path).unwrap();
    let expected = CURRENT_REPORT.replace(
        "## AIサマリ\n\n## 年度目標",
        "## AIサマリ\n**[2026-01-07 07:00 AI簡易チェック]**\n\nフォーカスを続けましょう\n\n## 年度目標",
    );
    assert_eq!(updated, expected);

    // Every other section parses exactly as before
    let before = summary;
    let after = read_document(&path).unwrap().summary();
    assert_eq!(after.focus, before.focus);
    assert_eq!(after.daily_log, before.daily_log);
    assert_eq!(after.kpt, before.kpt);
    assert_eq!(after.annual_goals, before.annual_goals);
    assert!(after.ai_summary.contains("フォーカスを続けましょう"));
}

#[test]
fn test_legacy_detailed_review_with_failed_analysis() {
    let temp = tempfile::TempDir::new().unwrap();
    let now = at(2026, 1, 9);
    let path = write_report(temp.path(), "2026-W02.md", LEGACY_REPORT);

    let document = read_document(&path).unwrap();
    assert_eq!(document.template(), TemplateVersion::Legacy);
    let summary = document.summary();
    assert_eq!(summary.todo_completed(), 2);
    assert_eq!(summary.todo_total(), 3);

    let mode = ReviewMode::for_date(now.date());
    assert_eq!(mode, ReviewMode::Detailed);
    let result = Unreachable.analyze(&summary, mode);
    assert_eq!(result, fallback_result(mode, "api returned 503: overloaded"));

    DocumentWriter::new()
        .update_ai_summary(&path, &result, mode, now)
        .unwrap();

    let updated = std::fs::read_to_string(&path).unwrap();
    assert!(updated.contains("■AIからの総括（振り返り）\n**[2026-01-09 07:00 AI評価]**\n"));
    assert!(updated.contains("**総合評価**\n分析エラー: api returned 503: overloaded"));
    assert!(updated.ends_with("\n---\n▼2026年度目標\n転職する\n"));
    assert_eq!(
        std::fs::read_to_string(temp.path().join("2026-W02.md.backup")).unwrap(),
        LEGACY_REPORT
    );
}

#[test]
fn test_carryover_from_previous_week_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let now = at(2026, 1, 7);
    write_report(temp.path(), "2026-W01.md", CURRENT_REPORT);
    let this_week = write_report(
        temp.path(),
        "2026-W02.md",
        "## 今週のフォーカス\n> 運動\n\n## 前週からの引き継ぎ\n(自動入力)\n\n## AIサマリ\n",
    );

    let locator = VaultLocator::new(temp.path(), "md");
    let previous = locator.locate(Week::Previous, now.date()).unwrap();
    let kpt = read_document(&previous).unwrap().summary().kpt;

    let outcome = DocumentWriter::new()
        .update_carryover_section(&this_week, &kpt)
        .unwrap();
    assert!(matches!(outcome, WriteOutcome::Replaced { .. }));

    let updated = std::fs::read_to_string(&this_week).unwrap();
    assert!(updated.contains("## 前週からの引き継ぎ\n**前週のProblem（課題）**\n夜更かし\n"));
    assert!(updated.contains("**前週のTry（試したこと）**\n23時就寝\n"));
    assert!(!updated.contains("(自動入力)"));
    assert!(updated.ends_with("\n## AIサマリ\n"));
}

#[test]
fn test_prompts_reflect_parsed_report() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = write_report(temp.path(), "2026-W02.md", CURRENT_REPORT);
    let summary = read_document(&path).unwrap().summary();

    let prompt = prompts::user_prompt(&summary, ReviewMode::Quick);
    assert!(prompt.contains("毎朝30分の読書"));
    assert!(prompt.contains("記録日数: 3/7日"));
    assert!(prompt.contains("平均気分スコア: 3.7/5"));
}
