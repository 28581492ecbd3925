use chrono::Local;
use weekly_review_core::Settings;
use weekly_review_vault::{VaultLocator, Week};

pub fn run(settings: &Settings, previous: bool) -> anyhow::Result<()> {
    let locator = VaultLocator::new(settings.vault_root()?, &settings.report_extension);
    let week = if previous { Week::Previous } else { Week::Current };
    let today = Local::now().date_naive();

    let path = locator.expected_path(week, today);
    let state = if locator.locate(week, today).is_some() {
        "exists"
    } else {
        "missing"
    };
    println!("{}\t{}", path.display(), state);
    Ok(())
}
