//! Tail client logs command
//!
//! Follows the arena client's log file like `tail -f`, defaulting to the most
//! recent session.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use std::time::Duration;

use crate::dirs;

/// Monitor client logs in real-time
#[derive(Parser, Debug)]
pub struct TailLogs {
    /// Specific session ID to monitor (defaults to latest)
    pub session: Option<String>,

    /// Number of lines to show from history before tailing
    #[arg(short = 'n', long, default_value = "10")]
    pub lines: usize,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "100")]
    pub poll_interval: u64,

    /// Only show lines containing this text (e.g. `WARN`, `combat`)
    #[arg(long)]
    pub grep: Option<String>,
}

impl TailLogs {
    pub fn execute(self) -> Result<()> {
        let log_dir = dirs::log_dir()?;

        if !log_dir.exists() {
            eprintln!("{}", style("✗ Log directory not found").red().bold());
            eprintln!("  Path: {}", style(log_dir.display()).dim());
            eprintln!();
            eprintln!("  Run the client first to generate logs:");
            eprintln!("    {}", style("cargo run -p arena-client").cyan());
            anyhow::bail!("Log directory does not exist");
        }

        let (session_id, log_path) = if let Some(ref session) = self.session {
            let path = dirs::find_session_log(&log_dir, session)?;
            (session.clone(), path)
        } else {
            dirs::find_latest_log(&log_dir).context("Failed to find latest log file")?
        };

        println!("{}", style("Monitoring arena client logs").green().bold());
        println!("  Session:  {}", style(&session_id).cyan());
        println!("  Log file: {}", style(log_path.display()).dim());
        if let Some(pattern) = &self.grep {
            println!("  Filter:   {}", style(pattern).yellow());
        }
        println!();

        self.tail_file(&log_path)
    }

    fn matches(&self, line: &str) -> bool {
        self.grep
            .as_deref()
            .is_none_or(|pattern| line.contains(pattern))
    }

    /// Print the last N matching lines, then follow new content.
    fn tail_file(&self, path: &Path) -> Result<()> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        for line in self.read_last_n_lines(&mut file, self.lines)? {
            println!("{}", line);
        }

        // `read_last_n_lines` leaves the cursor at the end of the file.
        let mut reader = BufReader::new(file);
        let poll_interval = Duration::from_millis(self.poll_interval);

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => std::thread::sleep(poll_interval),
                Ok(_) => {
                    if self.matches(&line) {
                        print!("{}", line);
                    }
                }
                Err(e) => {
                    eprintln!("{}", style(format!("Error reading log file: {}", e)).red());
                    anyhow::bail!("Failed to read log file");
                }
            }
        }
    }

    /// Read the whole file and keep the last `n` matching lines.
    fn read_last_n_lines(&self, file: &mut File, n: usize) -> Result<Vec<String>> {
        file.seek(SeekFrom::Start(0))?;

        let reader = BufReader::new(&mut *file);
        let lines: Vec<String> = reader
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("Failed to read lines from log file")?
            .into_iter()
            .filter(|line| self.matches(line))
            .collect();

        file.seek(SeekFrom::End(0))?;

        let start = lines.len().saturating_sub(n);
        Ok(lines[start..].to_vec())
    }
}
