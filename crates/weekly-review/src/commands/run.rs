//! The review pipeline: locate, parse, carry over, analyze, write, notify

use crate::cli::ModeArg;
use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use weekly_review_analyze::{Analyzer, OpenAiAnalyzer};
use weekly_review_core::{ReviewMode, Settings};
use weekly_review_notify::messages::{REPORT_NOT_FOUND, WRITE_FAILED};
use weekly_review_notify::{NotifierSet, NotifyEvent};
use weekly_review_vault::{read_document, DocumentWriter, VaultLocator, Week, WriteOutcome};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub mode: ModeArg,
    pub dry_run: bool,
    pub notify: bool,
}

/// How a run ended when no unexpected error occurred
#[derive(Debug)]
pub enum RunOutcome {
    Written {
        path: PathBuf,
        mode: ReviewMode,
        outcome: WriteOutcome,
    },
    DryRun {
        preview: String,
    },
    ReportMissing {
        expected: PathBuf,
    },
    WriteFailed {
        path: PathBuf,
    },
}

pub fn run(settings: &Settings, options: RunOptions) -> anyhow::Result<()> {
    let notifiers = if options.notify && !options.dry_run {
        NotifierSet::standard(settings.line.clone())?
    } else {
        NotifierSet::new()
    };

    tracing::info!("weekly review started");
    let result = analyzer(settings).and_then(|analyzer| {
        review(settings, &analyzer, &notifiers, options, Local::now().naive_local())
    });

    match result {
        Ok(outcome) => {
            report(outcome);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "weekly review failed");
            notifiers.notify_all(&NotifyEvent::Error(&format!("エラー: {e}")));
            Err(e)
        }
    }
}

/// Expected outcomes end the run normally; their notifications are already sent
fn report(outcome: RunOutcome) {
    match outcome {
        RunOutcome::DryRun { preview } => println!("{preview}"),
        RunOutcome::Written {
            path,
            mode,
            outcome,
        } => {
            tracing::info!(path = %path.display(), %mode, ?outcome, "weekly review finished");
        }
        RunOutcome::ReportMissing { expected } => {
            tracing::warn!(expected = %expected.display(), "weekly review finished without a report");
        }
        RunOutcome::WriteFailed { path } => {
            tracing::error!(path = %path.display(), "weekly review finished without writing");
        }
    }
}

/// Configuration is checked before any file is touched
fn analyzer(settings: &Settings) -> anyhow::Result<OpenAiAnalyzer> {
    settings.vault_root()?;
    settings.openai_api_key()?;
    Ok(OpenAiAnalyzer::from_settings(&settings.openai)?)
}

/// One pass over this week's report
pub fn review<A: Analyzer>(
    settings: &Settings,
    analyzer: &A,
    notifiers: &NotifierSet,
    options: RunOptions,
    now: NaiveDateTime,
) -> anyhow::Result<RunOutcome> {
    let today = now.date();
    let root = settings.vault_root()?;
    tracing::info!(vault = %root.display(), "vault resolved");
    let locator = VaultLocator::new(root, &settings.report_extension);

    let Some(path) = locator.locate(Week::Current, today) else {
        let expected = locator.expected_path(Week::Current, today);
        tracing::warn!(expected = %expected.display(), "this week's report not found");
        notifiers.notify_all(&NotifyEvent::Error(REPORT_NOT_FOUND));
        return Ok(RunOutcome::ReportMissing { expected });
    };

    let document = read_document(&path).context("failed to read this week's report")?;
    let summary = document.summary();
    tracing::info!(path = %path.display(), template = %document.template(), "report loaded");

    let mut writer = DocumentWriter::new();
    if !options.dry_run {
        carry_over(&locator, &mut writer, &path, now);
    }

    let mode = options.mode.resolve(today);
    tracing::info!(%mode, "analyzing");
    let result = analyzer.analyze(&summary, mode);

    if options.dry_run {
        let preview = DocumentWriter::preview_ai_summary(&path, &result, mode, now)?;
        return Ok(RunOutcome::DryRun { preview });
    }

    let outcome = match writer.update_ai_summary(&path, &result, mode, now) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "failed to write AI summary");
            notifiers.notify_all(&NotifyEvent::Error(WRITE_FAILED));
            return Ok(RunOutcome::WriteFailed { path });
        }
    };

    let event = match mode {
        ReviewMode::Detailed => NotifyEvent::Review {
            result: &result,
            template: document.template(),
        },
        ReviewMode::Quick => NotifyEvent::Reminder(&result),
    };
    notifiers.notify_all(&event);

    Ok(RunOutcome::Written {
        path,
        mode,
        outcome,
    })
}

/// Copy last week's Problem/Try into this week's file when there is any
fn carry_over(
    locator: &VaultLocator,
    writer: &mut DocumentWriter,
    path: &std::path::Path,
    now: NaiveDateTime,
) {
    let Some(previous_path) = locator.locate(Week::Previous, now.date()) else {
        return;
    };
    let previous = match read_document(&previous_path) {
        Ok(document) => document.summary().kpt,
        Err(e) => {
            tracing::warn!(error = %e, "could not read last week's report");
            return;
        }
    };
    if previous.problem.is_empty() && previous.try_next.is_empty() {
        return;
    }

    match writer.update_carryover_section(path, &previous) {
        Ok(outcome) if outcome.is_written() => tracing::info!("carry-over updated"),
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "carry-over update failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;
    use weekly_review_analyze::AnalyzeError;
    use weekly_review_core::{AnalysisResult, ReportSummary};
    use weekly_review_notify::{Notification, NotifyError, Notifier};

    struct StubAnalyzer;

    impl Analyzer for StubAnalyzer {
        fn request(
            &self,
            summary: &ReportSummary,
            mode: ReviewMode,
        ) -> Result<AnalysisResult, AnalyzeError> {
            Ok(AnalysisResult {
                message: Some(format!("{} / {}", mode, summary.focus)),
                focus_achievement_score: Some(70),
                ..Default::default()
            })
        }
    }

    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Notifier for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn max_chars(&self) -> usize {
            1000
        }

        fn compose(&self, event: &NotifyEvent<'_>) -> Notification {
            let body = match event {
                NotifyEvent::Reminder(_) => "reminder".to_string(),
                NotifyEvent::Review { .. } => "review".to_string(),
                NotifyEvent::Error(message) => message.to_string(),
            };
            Notification {
                body,
                ..Default::default()
            }
        }

        fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.0.borrow_mut().push(notification.body.clone());
            Ok(())
        }
    }

    fn wednesday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 7)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, Settings) {
        let temp = tempfile::TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(temp.path().join(name), content).unwrap();
        }
        let settings = Settings::new().with_vault(temp.path().to_string_lossy());
        (temp, settings)
    }

    fn recording_set() -> (NotifierSet, Rc<RefCell<Vec<String>>>) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let mut set = NotifierSet::new();
        set.register(Box::new(Recorder(sent.clone())));
        (set, sent)
    }

    fn options(mode: ModeArg) -> RunOptions {
        RunOptions {
            mode,
            dry_run: false,
            notify: true,
        }
    }

    const THIS_WEEK: &str = "## 今週のフォーカス\n> 読書\n\n## KPT\n- **Keep（続ける）**: 早起き\n\n## AIサマリ\n\n## 年度目標\n健康\n";

    #[test]
    fn test_quick_run_writes_and_reminds() {
        let (temp, settings) = setup(&[("2026-W02.md", THIS_WEEK)]);
        let (set, sent) = recording_set();

        let outcome =
            review(&settings, &StubAnalyzer, &set, options(ModeArg::Auto), wednesday()).unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::Written {
                mode: ReviewMode::Quick,
                ..
            }
        ));

        let text = std::fs::read_to_string(temp.path().join("2026-W02.md")).unwrap();
        assert!(text.contains("## AIサマリ\n**[2026-01-07 08:30 AI簡易チェック]**\n\nquick / 読書\n"));
        assert!(text.ends_with("## 年度目標\n健康\n"));
        assert_eq!(*sent.borrow(), vec!["reminder".to_string()]);
    }

    #[test]
    fn test_detailed_run_sends_review() {
        let (_temp, settings) = setup(&[("2026-W02.md", THIS_WEEK)]);
        let (set, sent) = recording_set();

        review(&settings, &StubAnalyzer, &set, options(ModeArg::Detailed), wednesday()).unwrap();
        assert_eq!(*sent.borrow(), vec!["review".to_string()]);
    }

    #[test]
    fn test_missing_report_notifies() {
        let (_temp, settings) = setup(&[]);
        let (set, sent) = recording_set();

        let outcome =
            review(&settings, &StubAnalyzer, &set, options(ModeArg::Auto), wednesday()).unwrap();
        assert!(matches!(outcome, RunOutcome::ReportMissing { .. }));
        assert_eq!(*sent.borrow(), vec![REPORT_NOT_FOUND.to_string()]);
    }

    #[test]
    fn test_carry_over_from_previous_week() {
        let previous = "## KPT\n- **Problem（課題）**: 夜更かし\n- **Try（来週試す）**: 23時就寝\n\n## AIサマリ\n";
        let (temp, settings) = setup(&[("2026-W02.md", THIS_WEEK), ("2026-W01.md", previous)]);
        let (set, _sent) = recording_set();

        review(&settings, &StubAnalyzer, &set, options(ModeArg::Quick), wednesday()).unwrap();

        let text = std::fs::read_to_string(temp.path().join("2026-W02.md")).unwrap();
        assert!(text.contains("## 前週からの引き継ぎ\n**前週のProblem（課題）**\n夜更かし\n"));
        assert!(text.contains("23時就寝"));

        // The backup holds the pre-run content even though two sections changed
        let backup = std::fs::read_to_string(temp.path().join("2026-W02.md.backup")).unwrap();
        assert_eq!(backup, THIS_WEEK);
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let (temp, settings) = setup(&[("2026-W02.md", THIS_WEEK)]);
        let (set, sent) = recording_set();
        let options = RunOptions {
            mode: ModeArg::Quick,
            dry_run: true,
            notify: true,
        };

        let outcome = review(&settings, &StubAnalyzer, &set, options, wednesday()).unwrap();
        let RunOutcome::DryRun { preview } = outcome else {
            panic!("Expected dry run");
        };
        assert!(preview.starts_with("## AIサマリ\n"));
        assert_eq!(
            std::fs::read_to_string(temp.path().join("2026-W02.md")).unwrap(),
            THIS_WEEK
        );
        assert!(!temp.path().join("2026-W02.md.backup").exists());
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn test_write_failure_is_an_outcome() {
        let (temp, settings) = setup(&[("2026-W02.md", THIS_WEEK)]);
        std::fs::create_dir(temp.path().join("2026-W02.md.tmp")).unwrap();
        let (set, sent) = recording_set();

        let outcome =
            review(&settings, &StubAnalyzer, &set, options(ModeArg::Quick), wednesday()).unwrap();
        assert!(matches!(outcome, RunOutcome::WriteFailed { .. }));
        assert_eq!(*sent.borrow(), vec![WRITE_FAILED.to_string()]);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("2026-W02.md")).unwrap(),
            THIS_WEEK
        );
    }

    #[test]
    fn test_missing_vault_is_error() {
        let settings = Settings::new();
        let (set, _sent) = recording_set();
        let result = review(&settings, &StubAnalyzer, &set, options(ModeArg::Auto), wednesday());
        assert!(result.is_err());
    }
}
