//! Clean client logs command
//!
//! Deletes session log directories under the client's cache directory.
//! Prompts for confirmation unless `--yes` is given.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::dirs;

/// Delete client logs
#[derive(Parser, Debug)]
pub struct Clean {
    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Specific session to clean
    #[arg(long, conflicts_with = "keep")]
    pub session: Option<String>,

    /// Keep the N most recent sessions
    #[arg(long)]
    pub keep: Option<usize>,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let log_dir = dirs::log_dir()?;
        let targets = self.targets(&log_dir)?;

        if targets.is_empty() {
            println!("{}", style("Nothing to clean").dim());
            return Ok(());
        }

        println!("{}", style("Clean arena client logs").yellow().bold());
        println!();
        println!("The following will be deleted:");
        for (label, path) in &targets {
            println!("  {} {}", style("→").cyan(), style(label).bold());
            println!("    {}", style(path.display()).dim());
        }
        println!();

        if !self.yes && !self.confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for (label, path) in targets {
            print!("Deleting {}... ", label);
            io::stdout().flush()?;

            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to delete: {}", path.display()))?;

            println!("{}", style("✓").green());
        }

        println!();
        println!("{}", style("✓ Cleanup complete!").green().bold());
        Ok(())
    }

    /// Directories selected by the flags, labelled for display.
    fn targets(&self, log_dir: &std::path::Path) -> Result<Vec<(String, PathBuf)>> {
        if let Some(session_id) = &self.session {
            let session_dir = log_dir.join(session_id);
            if !session_dir.exists() {
                eprintln!(
                    "{} Session not found: {}",
                    style("✗").red().bold(),
                    style(session_id).cyan()
                );
                anyhow::bail!("Session directory does not exist");
            }
            return Ok(vec![(format!("Session logs ({})", session_id), session_dir)]);
        }

        if let Some(keep) = self.keep {
            return Ok(dirs::list_sessions(log_dir)?
                .into_iter()
                .skip(keep)
                .map(|session| (format!("Session logs ({})", session.id), session.dir))
                .collect());
        }

        if log_dir.exists() {
            Ok(vec![("All logs".to_string(), log_dir.to_path_buf())])
        } else {
            Ok(Vec::new())
        }
    }

    fn confirm(&self) -> Result<bool> {
        print!("{} ", style("Proceed? [y/N]").yellow().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }
}
