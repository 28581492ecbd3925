//! Vault access: locating weekly files, reading them and rewriting sections

mod io;
mod locator;
mod render;
mod rewrite;

pub use io::{atomic_write, backup_path, create_backup, read_document, VaultError, BACKUP_SUFFIX};
pub use locator::{week_file_name, VaultLocator, Week};
pub use render::{render_ai_summary, render_carryover};
pub use rewrite::{replace_section, DocumentWriter, RewriteError, WriteOutcome};
