//! Interactive command-line session.
//!
//! The front end owns the settings, the category table and the in-memory
//! undo record for the lifetime of the session, and drives the engine
//! through plain function calls. The password prompt implements the
//! [`CredentialGate`] collaborator, so the engine itself stays headless.

use crate::category::CategoryTable;
use crate::lang;
use crate::organizer::{
    self, CredentialGate, OrganizeError, OrganizeOptions, REPORT_FILE, UndoRecord,
};
use crate::output::OutputFormatter;
use crate::settings::{Language, Settings};
use crate::undo::UndoEngine;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password, Select};
use std::path::Path;

/// Masked password prompt checked against the stored setting, exact and
/// case-sensitive.
struct PasswordPrompt<'a> {
    expected: &'a str,
    prompt: &'static str,
}

impl CredentialGate for PasswordPrompt<'_> {
    fn verify(&mut self) -> bool {
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt(self.prompt)
            .allow_empty_password(true)
            .interact()
            .map(|entered| entered == self.expected)
            .unwrap_or(false)
    }
}

/// One interactive run of the tool.
///
/// The undo record lives here for the session and is replaced by every
/// organize pass; it is not persisted across restarts.
pub struct Session {
    settings: Settings,
    table: CategoryTable,
    undo_record: UndoRecord,
    folder: String,
}

impl Session {
    /// Creates a session, loading settings from disk.
    pub fn new(folder: Option<String>) -> Self {
        Self {
            settings: Settings::load(),
            table: CategoryTable::default(),
            undo_record: UndoRecord::new(),
            folder: folder.unwrap_or_default(),
        }
    }

    /// Runs the menu loop until the user quits.
    pub fn run(&mut self) {
        if self.folder.is_empty() {
            self.prompt_folder();
        }

        loop {
            let msgs = lang::messages(self.settings.language);
            let items = [
                msgs.browse,
                msgs.preview,
                msgs.organize,
                msgs.organize_date,
                msgs.undo,
                msgs.add_category,
                "Change Language",
                "Quit",
            ];

            let Ok(choice) = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(&self.folder)
                .items(&items)
                .default(0)
                .interact()
            else {
                break;
            };

            match choice {
                0 => self.prompt_folder(),
                1 => self.run_preview(),
                2 => self.run_organize(false),
                3 => self.run_organize(true),
                4 => self.run_undo(),
                5 => self.add_category(),
                6 => self.change_language(),
                _ => break,
            }
        }
    }

    fn prompt_folder(&mut self) {
        let msgs = lang::messages(self.settings.language);
        if let Ok(entered) = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(msgs.select_folder)
            .allow_empty(true)
            .interact_text()
        {
            self.folder = entered.trim().to_string();
        }
    }

    fn run_preview(&self) {
        let msgs = lang::messages(self.settings.language);
        match organizer::preview(&self.folder, &self.table) {
            Ok(counts) => {
                OutputFormatter::info("Files will be organized as:");
                OutputFormatter::summary_table(&counts);
            }
            Err(OrganizeError::MissingFolder) => OutputFormatter::warning(msgs.warning),
            Err(e) => OutputFormatter::error(&e.to_string()),
        }
    }

    fn run_organize(&mut self, sort_by_date: bool) {
        let msgs = lang::messages(self.settings.language);
        let options = OrganizeOptions {
            sort_by_date,
            size_limit_mib: self.settings.size_limit,
        };
        let mut gate = PasswordPrompt {
            expected: &self.settings.password,
            prompt: msgs.enter_password,
        };

        let pb = OutputFormatter::create_progress_bar(0);
        let mut on_progress = |processed: usize, total: usize| {
            pb.set_length(total as u64);
            pb.set_position(processed as u64);
        };

        match organizer::organize_with_progress(
            &self.folder,
            &self.table,
            &options,
            &mut gate,
            &mut on_progress,
        ) {
            Ok(outcome) => {
                pb.finish_and_clear();
                if let Err(e) = organizer::write_report(Path::new(REPORT_FILE), &outcome.counts) {
                    OutputFormatter::warning(&e.to_string());
                }
                self.undo_record = outcome.undo;
                OutputFormatter::success(msgs.success);
                OutputFormatter::summary_table(&outcome.counts);
                if outcome.archived > 0 {
                    OutputFormatter::info(&format!(
                        "{} oversized file(s) compressed in place",
                        outcome.archived
                    ));
                }
            }
            Err(OrganizeError::MissingFolder) => {
                pb.finish_and_clear();
                OutputFormatter::warning(msgs.warning);
            }
            Err(OrganizeError::AuthenticationFailed) => {
                pb.finish_and_clear();
                OutputFormatter::error(msgs.wrong_password);
            }
            Err(e) => {
                pb.finish_and_clear();
                // The aborted pass already reset the undo opportunity.
                self.undo_record = UndoRecord::new();
                OutputFormatter::error(&e.to_string());
            }
        }
    }

    fn run_undo(&mut self) {
        let msgs = lang::messages(self.settings.language);
        if self.undo_record.is_empty() {
            OutputFormatter::info(msgs.undo_empty);
            return;
        }
        if self.folder.is_empty() {
            OutputFormatter::warning(msgs.warning);
            return;
        }

        if let Some(report) = UndoEngine::undo(Path::new(&self.folder), &mut self.undo_record) {
            OutputFormatter::success(msgs.undo_success);
            if !report.missed_files.is_empty() {
                OutputFormatter::warning(&format!(
                    "{} file(s) could not be located",
                    report.missed_files.len()
                ));
            }
            for (path, reason) in &report.failed_restores {
                OutputFormatter::error(&format!("{}: {}", path.display(), reason));
            }
        }
    }

    fn add_category(&mut self) {
        let Ok(name) = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Category Name")
            .allow_empty(true)
            .interact_text()
        else {
            return;
        };
        let Ok(extensions) = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Extensions (comma separated)")
            .allow_empty(true)
            .interact_text()
        else {
            return;
        };

        // Empty input is rejected silently, matching the table's contract.
        if self.table.add(&name, &extensions) {
            OutputFormatter::success(&format!("Category '{}' added!", name.trim()));
        }
    }

    fn change_language(&mut self) {
        let names: Vec<&str> = Language::ALL.iter().map(Language::name).collect();
        let Ok(choice) = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Language")
            .items(&names)
            .default(0)
            .interact()
        else {
            return;
        };

        self.settings.language = Language::ALL[choice];
        if let Err(e) = self.settings.save() {
            OutputFormatter::warning(&format!("Could not save settings: {}", e));
        }
    }
}
