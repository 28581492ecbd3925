use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};
use weekly_review_core::{ReportSummary, Settings, TemplateVersion};
use weekly_review_vault::{read_document, VaultLocator, Week};

pub fn run(
    settings: &Settings,
    previous: bool,
    file: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => resolve(settings, previous)?,
    };

    let document = read_document(&path)?;
    let summary = document.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(document.template(), &summary));
    }
    Ok(())
}

fn resolve(settings: &Settings, previous: bool) -> anyhow::Result<PathBuf> {
    let locator = VaultLocator::new(settings.vault_root()?, &settings.report_extension);
    let week = if previous { Week::Previous } else { Week::Current };
    let today = Local::now().date_naive();
    locator.locate(week, today).with_context(|| {
        format!(
            "no weekly report at {}",
            locator.expected_path(week, today).display()
        )
    })
}

fn render_text(template: TemplateVersion, summary: &ReportSummary) -> String {
    let mut out = format!(
        "file: {}\ntemplate: {}\n",
        summary.file_path.display(),
        template
    );

    match template {
        TemplateVersion::Current => {
            out.push_str(&format!("focus: {}\n", or_dash(&summary.focus)));
            out.push_str(&format!(
                "daily log: {}/7 days, avg mood {:.1}/5\n",
                summary.daily_log.len(),
                summary.daily_log.avg_mood()
            ));
            out.push_str(&format!(
                "kpt: keep={} problem={} try={}\n",
                or_dash(&summary.kpt.keep),
                or_dash(&summary.kpt.problem),
                or_dash(&summary.kpt.try_next)
            ));
        }
        TemplateVersion::Legacy => {
            out.push_str(&format!(
                "desired results: {}\n",
                or_dash(&summary.desired_results)
            ));
            out.push_str(&format!(
                "todos: {}/{} done\n",
                summary.todo_completed(),
                summary.todo_total()
            ));
        }
    }
    out.push_str(&format!("annual goals: {}\n", or_dash(&summary.annual_goals)));
    out.push_str(&format!(
        "ai summary: {}\n",
        if summary.ai_summary.is_empty() {
            "empty"
        } else {
            "present"
        }
    ));
    out
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}
