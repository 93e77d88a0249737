//! Auto-battle mode: repeated NPC fights without a UI.
use std::sync::Arc;

use anyhow::{Context, Result};
use client_api::GameApi;
use client_session::{
    AutoBattle, AutoBattleConfig, AutoBattleProgress, AutoBattleSummary, StopReason,
};
use tokio::sync::mpsc;

/// Run the configured fights, printing one line per fight and a summary.
pub async fn run_auto_battle(
    api: Arc<dyn GameApi>,
    config: AutoBattleConfig,
) -> Result<AutoBattleSummary> {
    let auto_battle = AutoBattle::new(api, config).context("auto-battle is not configured")?;
    tracing::info!(npc = auto_battle.npc_id(), "auto-battle starting");

    let (tx, mut rx) = mpsc::channel(16);
    let reporter = tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            println!("{}", describe_progress(&progress));
        }
    });

    let summary = auto_battle.run(Some(tx)).await;
    if let Err(err) = reporter.await {
        tracing::warn!("progress reporter failed: {err}");
    }

    println!("{}", describe_summary(&summary));
    tracing::info!(
        fights = summary.fights,
        wins = summary.wins,
        stop = ?summary.stop,
        "auto-battle finished"
    );
    Ok(summary)
}

pub fn describe_progress(progress: &AutoBattleProgress) -> String {
    let result = &progress.result;
    let mut line = format!(
        "Fight {}/{}: {}",
        progress.fight,
        progress.total,
        if result.won { "won" } else { "lost" }
    );
    if result.gold_earned > 0 || result.xp_earned > 0 {
        line.push_str(&format!(
            " (+{} gold, +{} xp)",
            result.gold_earned, result.xp_earned
        ));
    }
    if let Some(energy) = result.energy_remaining {
        line.push_str(&format!(", energy {energy}"));
    }
    line
}

pub fn describe_summary(summary: &AutoBattleSummary) -> String {
    let stop = match &summary.stop {
        StopReason::Completed => "all fights done".to_string(),
        StopReason::Defeated => "defeated".to_string(),
        StopReason::OutOfEnergy => "out of energy".to_string(),
        StopReason::Failed(message) => format!("error: {message}"),
    };
    format!(
        "{} fights, {} wins, {} gold, {} xp ({stop})",
        summary.fights, summary.wins, summary.gold, summary.xp
    )
}
