//! CLI argument parsing using clap derive

use clap::Parser;
use psync_core::{MergeStyle, Operation};

/// psync - Keep groups of project paths synchronized with their origins
#[derive(Parser, Debug)]
#[command(name = "psync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Projects to synchronize: names, or 1-based positions for unnamed
    /// projects. With no selectors, every auto-include project runs.
    pub projects: Vec<String>,

    /// Configuration file (defaults to ~/.psync/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Fetch remote changes, replaying local work on top (the default)
    #[arg(short, long, group = "mode")]
    pub update: bool,

    /// Like --update, but merge remote changes instead of rebasing
    #[arg(short, long, group = "mode")]
    pub merge: bool,

    /// Collect local changes and transmit them to the origin
    #[arg(short, long, group = "mode")]
    pub push: bool,

    /// Resolve synchronization conflicts
    #[arg(short, long, group = "mode")]
    pub resolve: bool,

    /// Increase verbosity (repeat to stream sync tool output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit the run report as JSON instead of human-readable output
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The operation the mode flags select; update when none is given.
    pub fn operation(&self) -> Operation {
        if self.push {
            Operation::Push
        } else if self.resolve {
            Operation::Resolve
        } else {
            Operation::Update
        }
    }

    /// Integration style for update runs.
    pub fn merge_style(&self) -> MergeStyle {
        if self.merge {
            MergeStyle::Merge
        } else {
            MergeStyle::Rebase
        }
    }

    /// Effective verbosity: 0 quiet, 1 normal, 2 debug. Extra `-v`s clamp.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            (1 + self.verbose).min(2)
        }
    }

    /// Requested projects, or `None` for the default selection.
    pub fn selectors(&self) -> Option<&[String]> {
        if self.projects.is_empty() {
            None
        } else {
            Some(&self.projects)
        }
    }
}
