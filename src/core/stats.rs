use crate::config::ScrapeConfig;
use crate::logging::{log, LogLevel};
use std::collections::BTreeMap;
use std::time::Duration;

pub const CAT_PRIMARY: &str = "Primary Fetch";
pub const CAT_SPECIES: &str = "Species Fetch";
pub const CAT_ASSEMBLE: &str = "Assemble";
pub const CAT_SAVE: &str = "Save File";

const CATEGORIES_ORDER: [&str; 4] = [CAT_PRIMARY, CAT_SPECIES, CAT_ASSEMBLE, CAT_SAVE];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub ok: usize,
    pub fail: usize,
    pub skip_or_empty: usize,
    pub total_tasks: usize,
}

impl CategoryStats {
    pub fn add_ok(&mut self) {
        self.ok += 1;
    }
    pub fn add_fail(&mut self) {
        self.fail += 1;
    }
    pub fn add_skip(&mut self) {
        self.skip_or_empty += 1;
    }
    pub fn set_total(&mut self, total: usize) {
        self.total_tasks = total;
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunStats(BTreeMap<&'static str, CategoryStats>);

impl RunStats {
    pub fn new(total_ids: usize) -> Self {
        let mut map = BTreeMap::new();
        for cat in CATEGORIES_ORDER {
            map.insert(cat, CategoryStats::default());
        }
        let mut stats = RunStats(map);
        stats.category_mut(CAT_PRIMARY).set_total(total_ids);
        stats.category_mut(CAT_SAVE).set_total(1);
        stats
    }

    pub fn category(&self, name: &'static str) -> CategoryStats {
        self.0.get(name).cloned().unwrap_or_default()
    }

    pub fn category_mut(&mut self, name: &'static str) -> &mut CategoryStats {
        self.0.entry(name).or_default()
    }

    pub fn skipped_ids(&self) -> usize {
        self.category(CAT_PRIMARY).fail + self.category(CAT_SPECIES).fail
    }
}

pub fn print_summary(stats: &RunStats, cfg: &ScrapeConfig, duration: Duration) {
    let sep = "=".repeat(60);
    let title = format!("Run Summary (ids {}..={})", cfg.id_start, cfg.id_end);
    println!("\n{}\n{:^60}\n{}", sep, title, sep);
    println!("Output File:       {}", cfg.output_path.display());
    println!("Total Run Time:    {:.3?}", duration);
    println!("{}", "-".repeat(60));

    println!(
        "{:<17} {:<8} {:<12} {:<8} {:<8}",
        "Category", "OK", "Skip/Empty", "Fail", "Total"
    );
    println!("{}", "-".repeat(60));

    for cat_name in CATEGORIES_ORDER {
        let s = stats.category(cat_name);
        println!(
            "{:<17} {:<8} {:<12} {:<8} {:<8}",
            cat_name, s.ok, s.skip_or_empty, s.fail, s.total_tasks
        );
    }
    println!("{}", sep);

    log_overall_status(stats);

    let end_ts_str = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    log(
        LogLevel::Step,
        &format!("--- Run Finished at {} ---", end_ts_str),
    );
}

fn log_overall_status(stats: &RunStats) {
    let assembled = stats.category(CAT_ASSEMBLE).ok;
    let skipped = stats.skipped_ids();

    if assembled == 0 {
        log(LogLevel::Error, "Run completed, but no record was assembled.");
    } else if skipped > 0 {
        log(
            LogLevel::Warning,
            &format!(
                "Run completed: {} record(s) written, {} id(s) skipped. Check logs.",
                assembled, skipped
            ),
        );
    } else {
        log(
            LogLevel::Success,
            &format!("Run completed successfully: {} record(s) written.", assembled),
        );
    }
}

/// Skipped ids are expected; only an empty result counts as a failed run.
pub fn determine_exit_code(stats: &RunStats) -> i32 {
    let attempted = stats.category(CAT_PRIMARY).total_tasks;
    let assembled = stats.category(CAT_ASSEMBLE).ok;
    if attempted > 0 && assembled == 0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_do_not_fail_the_run() {
        let mut stats = RunStats::new(3);
        stats.category_mut(CAT_PRIMARY).add_ok();
        stats.category_mut(CAT_PRIMARY).add_fail();
        stats.category_mut(CAT_ASSEMBLE).add_ok();
        assert_eq!(stats.skipped_ids(), 1);
        assert_eq!(determine_exit_code(&stats), 0);
    }

    #[test]
    fn nothing_assembled_is_a_failure() {
        let mut stats = RunStats::new(2);
        stats.category_mut(CAT_PRIMARY).add_fail();
        stats.category_mut(CAT_PRIMARY).add_fail();
        assert_eq!(stats.category(CAT_PRIMARY).fail, 2);
        assert_eq!(determine_exit_code(&stats), 1);
    }
}
