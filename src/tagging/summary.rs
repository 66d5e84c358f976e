//! Run totals

use crate::tagging::classify::Classification;
use colored::Colorize;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub cellular_tagged: usize,
    pub wifi_tagged: usize,
    pub tags_removed: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Devices that would have been updated in a dry run
    pub planned: usize,
}

impl RunSummary {
    /// A successful update; a removal-only update counts toward `tags_removed` alone
    pub fn record_updated(&mut self, classification: Classification, added: bool, removed: bool) {
        if added {
            match classification {
                Classification::Cellular => self.cellular_tagged += 1,
                Classification::WifiOnly => self.wifi_tagged += 1,
            }
        }
        if removed {
            self.tags_removed += 1;
        }
    }

    pub fn record_unchanged(&mut self) {
        self.unchanged += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_planned(&mut self) {
        self.planned += 1;
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Write the totals to the log (console and file)
    pub fn log(&self, dry_run: bool) {
        let label = if dry_run { "Dry run summary" } else { "Run summary" };
        tracing::info!(
            "{}: {} devices, {} tagged cellular, {} tagged Wi-Fi, {} wrong tags removed, {} unchanged, {} planned, {} skipped, {} failed",
            label,
            self.total,
            self.cellular_tagged,
            self.wifi_tagged,
            self.tags_removed,
            self.unchanged,
            self.planned,
            self.skipped,
            self.failed
        );
    }

    /// Print the colored summary to stdout
    pub fn print(&self, dry_run: bool) {
        if dry_run {
            println!("\n{}", "DRY RUN - No changes were made".yellow().bold());
        }
        println!("\n{} Tagging Summary:", "→".cyan().bold());
        println!("  Devices seen:        {}", self.total);
        println!("  Tagged cellular:     {}", self.cellular_tagged.to_string().green());
        println!("  Tagged Wi-Fi only:   {}", self.wifi_tagged.to_string().green());
        println!("  Wrong tags removed:  {}", self.tags_removed.to_string().green());
        println!("  Unchanged:           {}", self.unchanged);
        if dry_run {
            println!("  Would update:        {}", self.planned.to_string().yellow());
        }
        if self.skipped > 0 {
            println!("  Skipped (no id):     {}", self.skipped.to_string().yellow());
        }
        if self.has_failures() {
            println!("  Failed:              {}", self.failed.to_string().red());
        }
    }
}
