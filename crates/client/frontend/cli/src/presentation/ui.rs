//! Composition of the combat screen from widgets.
use anyhow::Result;
use client_frontend_core::{CombatView, CombatViewModel, MessageLog};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::{
    presentation::{terminal::Tui, theme::RatatuiTheme, widgets},
    state::AppState,
};

/// Height of the fighter panels at the bottom of the arena.
const FIGHTER_PANEL_HEIGHT: u16 = 6;

/// Everything one frame needs.
pub struct RenderContext<'a> {
    pub view_model: &'a CombatViewModel,
    pub messages: &'a MessageLog,
    pub app_state: &'a AppState,
    pub message_panel_height: u16,
}

pub fn render_with_view_model(terminal: &mut Tui, ctx: &RenderContext) -> Result<()> {
    terminal.draw(|frame| draw(frame, ctx))?;
    Ok(())
}

/// Draw one frame. Overlays (toasts, outcome, help) go on top of the fight.
pub fn draw(frame: &mut Frame, ctx: &RenderContext) {
    let theme = RatatuiTheme::new();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                        // Header
            Constraint::Min(0),                           // Arena
            Constraint::Length(ctx.message_panel_height), // Combat log
            Constraint::Length(3),                        // Actions
            Constraint::Length(1),                        // Footer
        ])
        .split(frame.area());

    widgets::header::render(frame, chunks[0], ctx.view_model);

    match &ctx.view_model.combat {
        Some(combat) => render_arena(frame, chunks[1], combat, &theme),
        None => {
            let waiting = Paragraph::new("Waiting for the first combat snapshot...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(waiting, chunks[1]);
        }
    }

    let recent: Vec<_> = ctx
        .messages
        .recent(ctx.message_panel_height as usize)
        .cloned()
        .collect();
    widgets::messages::render(frame, chunks[2], &recent, ctx.message_panel_height, &theme);

    widgets::actions::render(frame, chunks[3], ctx.view_model, &theme);
    widgets::footer::render(frame, chunks[4], ctx.app_state);

    widgets::toast::render(frame, chunks[1], &ctx.view_model.toasts, &theme);

    if let Some(outcome) = ctx.view_model.outcome {
        widgets::outcome::render(frame, centered_rect(50, 40, frame.area()), outcome, &theme);
    }

    if ctx.app_state.is_overlay() {
        widgets::help::render(frame, centered_rect(60, 60, frame.area()));
    }
}

fn render_arena(frame: &mut Frame, area: Rect, combat: &CombatView, theme: &RatatuiTheme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(FIGHTER_PANEL_HEIGHT)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let (me_title, opponent_title) = if combat.is_spectator {
        ("Player 1", "Player 2")
    } else {
        ("You", "Opponent")
    };
    widgets::fighter::render(frame, columns[0], me_title, &combat.me, theme);
    widgets::fighter::render(frame, columns[1], opponent_title, &combat.opponent, theme);

    widgets::floating::render(frame, area, &combat.floating, theme);
}

/// Create a centered rectangle for overlays.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_frontend_core::{CombatPresenter, FrontendConfig};
    use client_session::SessionEvent;
    use combat_core::{CombatActionKind, CombatState, CombatStatus, FighterState};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn snapshot(round: u32, me_hp: i32, foe_hp: i32) -> CombatState {
        CombatState::new(
            round,
            FighterState::new("me", me_hp, 100).with_name("Hero"),
            FighterState::new("foe", foe_hp, 100).with_name("Ogre"),
        )
    }

    fn screen(presenter: &CombatPresenter, app_state: &AppState) -> String {
        let view_model = presenter.view_model();
        let mut messages = MessageLog::new(16);
        messages.push_text("The duel begins.");
        let ctx = RenderContext {
            view_model: &view_model,
            messages: &messages,
            app_state,
            message_panel_height: 8,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &ctx)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_waiting_screen_before_first_snapshot() {
        let presenter = CombatPresenter::new(&FrontendConfig::default(), Some("me".into()));
        let text = screen(&presenter, &AppState::new());
        assert!(text.contains("Waiting for the first combat snapshot"));
        assert!(text.contains("The duel begins."));
    }

    #[test]
    fn renders_fighters_and_damage_number() {
        let now = Instant::now();
        let mut presenter = CombatPresenter::new(&FrontendConfig::default(), Some("me".into()));
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);
        presenter.apply(&SessionEvent::Combat(snapshot(2, 100, 83)), now);

        let text = screen(&presenter, &AppState::new());
        assert!(text.contains("You: Hero"));
        assert!(text.contains("Opponent: Ogre"));
        assert!(text.contains("-17"));
        assert!(text.contains("83/100"));
    }

    #[test]
    fn renders_outcome_overlay() {
        let now = Instant::now();
        let mut presenter = CombatPresenter::new(&FrontendConfig::default(), Some("me".into()));
        presenter.apply(&SessionEvent::Combat(snapshot(3, 40, 10)), now);

        let mut finished = snapshot(4, 40, 0);
        finished.status = CombatStatus::Finished;
        finished.winner_id = Some("me".into());
        presenter.request_action(CombatActionKind::Attack, now).unwrap();
        presenter.apply(
            &SessionEvent::ActionAccepted {
                action: CombatActionKind::Attack,
                combat: Some(finished),
                message: None,
            },
            now,
        );

        let text = screen(&presenter, &AppState::new());
        assert!(text.contains("VICTORY"));
        assert!(text.contains("combat over"));
    }

    #[test]
    fn renders_help_overlay() {
        let presenter = CombatPresenter::new(&FrontendConfig::default(), Some("me".into()));
        let mut app_state = AppState::new();
        app_state.toggle_help();
        let text = screen(&presenter, &app_state);
        assert!(text.contains("Leave the arena"));
    }
}
