//! Terminal presentation: live progress lines and the end-of-run summary

use colored::Colorize;
use psync_core::{Outcome, Progress, RunReport};

/// Streams one line per project and per path as the engine works.
///
/// Quiet and JSON runs skip this entirely and go straight to the summary.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn enter_project(&mut self, name: &str) {
        println!("{} {}", "=>".blue().bold(), name);
    }

    fn path_started(&mut self, path: &str) {
        println!("   {}", path.cyan());
    }

    fn path_finished(&mut self, path: &str, outcome: Outcome) {
        match outcome {
            Outcome::Success => {}
            Outcome::Failed => println!("   {} {}", "!".red(), path.cyan()),
            Outcome::Unsupported => {
                println!("   {} {} (not supported)", "-".yellow(), path.cyan());
            }
        }
    }
}

/// Print the end-of-run summary: one OK line when clean, otherwise the
/// grouped failure sections. Quiet runs drop the OK line but keep every
/// failure section.
pub fn print_summary(report: &RunReport, quiet: bool) {
    if report.is_clean() {
        if !quiet {
            println!("{} All projects synchronized.", "OK".green().bold());
        }
        return;
    }

    if !report.unknown_projects.is_empty() {
        println!("{} Unknown projects:", "UNKNOWN".yellow().bold());
        for name in &report.unknown_projects {
            println!("   {} {}", "-".yellow(), name);
        }
    }

    if !report.failed_projects.is_empty() {
        println!("{} Projects with failures:", "FAILED".red().bold());
        for name in &report.failed_projects {
            println!("   {} {}", "!".red(), name);
        }
    }

    if !report.failed_paths.is_empty() {
        println!("{} Paths that did not synchronize:", "FAILED".red().bold());
        for path in &report.failed_paths {
            if report.unsupported_paths.contains(path) {
                println!("   {} {} (not supported)", "!".red(), path.cyan());
            } else {
                println!("   {} {}", "!".red(), path.cyan());
            }
        }
    }
}
