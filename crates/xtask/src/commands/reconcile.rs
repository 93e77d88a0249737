//! Reconcile command
//!
//! Loads two combat snapshots (server JSON) and prints the events the client
//! would animate between them. Handy for checking crit detection and damage
//! deltas against captured server responses.

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::{CombatEvent, CombatState, Reconciler};
use console::style;
use std::path::{Path, PathBuf};

/// Diff two combat snapshots and print the detected events
#[derive(Parser, Debug)]
pub struct Reconcile {
    /// Earlier snapshot (JSON)
    #[arg(value_name = "PREV")]
    pub previous: PathBuf,

    /// Later snapshot (JSON)
    #[arg(value_name = "CURR")]
    pub current: PathBuf,

    /// Player id used to label victory/defeat
    #[arg(short, long)]
    pub player: Option<String>,
}

impl Reconcile {
    pub fn execute(self) -> Result<()> {
        let previous = load(&self.previous)?;
        let current = load(&self.current)?;

        let lines = describe(previous, current, self.player.as_deref());
        if lines.is_empty() {
            println!("{}", style("No events between the two snapshots").dim());
        }
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}

fn load(path: &Path) -> Result<CombatState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

/// One line per appended log line and detected event.
fn describe(previous: CombatState, current: CombatState, player: Option<&str>) -> Vec<String> {
    let mut reconciler = Reconciler::new();
    reconciler.observe(previous);
    let reconciliation = reconciler.observe(current);
    if reconciliation.stale {
        return vec!["stale    current is behind previous; the client ignores it".to_string()];
    }

    let mut lines: Vec<String> = reconciliation
        .new_log_lines
        .iter()
        .map(|line| format!("log      {line}"))
        .collect();

    for event in &reconciliation.events {
        let text = match event {
            CombatEvent::RoundAdvanced { from, to } => format!("round    {from} -> {to}"),
            CombatEvent::Damaged {
                side,
                amount,
                hp_before,
                hp_after,
                crit,
            } => format!(
                "damage   {side:?} -{amount} ({hp_before} -> {hp_after}){}",
                if *crit { " CRIT" } else { "" }
            ),
            CombatEvent::Healed {
                side,
                amount,
                hp_before,
                hp_after,
            } => format!("heal     {side:?} +{amount} ({hp_before} -> {hp_after})"),
            CombatEvent::Fainted { side } => format!("faint    {side:?}"),
            CombatEvent::Finished { winner_id } => {
                let winner = winner_id.as_deref().unwrap_or("none");
                match player {
                    Some(id) if winner_id.as_deref() == Some(id) => {
                        format!("finished winner={winner} (victory)")
                    }
                    Some(_) => format!("finished winner={winner} (defeat)"),
                    None => format!("finished winner={winner}"),
                }
            }
        };
        lines.push(text);
    }

    lines
}
