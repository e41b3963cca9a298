use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use locale_sync_core::{LeafOutcome, ReconcileStats, RunConfig, SyncReporter, SyncSummary};
use std::path::Path;

const BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {percent:>3}% {pos}/{len} {msg}";

/// Terminal reporter: one line per language plus a per-leaf progress bar.
pub struct ConsoleReporter {
    style: ProgressStyle,
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl ConsoleReporter {
    /// # Errors
    ///
    /// Returns an error if the progress bar template is rejected.
    pub fn new(quiet: bool) -> Result<Self> {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)?.progress_chars("#>-");
        Ok(Self {
            style,
            bar: None,
            quiet,
        })
    }

    fn emit(&self, styled: &str, to_stderr: bool) {
        let print = || {
            if to_stderr {
                eprintln!("{styled}");
            } else {
                println!("{styled}");
            }
        };
        match &self.bar {
            Some(bar) => bar.suspend(print),
            None => print(),
        }
    }
}

impl SyncReporter for ConsoleReporter {
    fn language_started(&mut self, index: usize, total: usize, code: &str, leaves: usize) {
        let file = RunConfig::file_name(code);
        self.emit(
            &format!("{} {}", format!("[{index}/{total}]").cyan(), file.bold()),
            false,
        );

        let target = if self.quiet {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        let bar = ProgressBar::with_draw_target(Some(leaves as u64), target);
        bar.set_style(self.style.clone());
        bar.set_message(file);
        self.bar = Some(bar);
    }

    fn leaf_processed(&mut self, _outcome: LeafOutcome) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn language_finished(&mut self, code: &str, _path: &Path, stats: &ReconcileStats) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        let file = RunConfig::file_name(code);
        let detail = format!(
            "({} reused, {} translated, {} removed)",
            stats.reused, stats.translated, stats.pruned
        );
        self.emit(
            &format!("✅ Translated {} {}", file.green(), detail.dimmed()),
            false,
        );
    }

    fn warning(&mut self, message: &str) {
        self.emit(&format!("⚠️  {}", message.yellow()), true);
    }
}

pub fn print_summary(summary: &SyncSummary) {
    if summary.languages.is_empty() {
        println!("{}", "No target languages found.".yellow());
        return;
    }
    println!(
        "{} file(s): {} reused, {} translated, {} cache hit(s)",
        summary.languages.len(),
        summary.reused(),
        summary.translated(),
        summary.cache_hits
    );
}
