//! Screen mode of the terminal client.

/// Top-level mode determining how keys are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppMode {
    /// Fight view; action keys submit.
    #[default]
    Combat,
    /// Key binding overlay; action keys are ignored.
    Help,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub mode: AppMode,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Combat => AppMode::Help,
            AppMode::Help => AppMode::Combat,
        };
    }

    /// Leave any overlay and return to the fight view.
    pub fn exit_to_combat(&mut self) {
        self.mode = AppMode::Combat;
    }

    pub fn is_overlay(&self) -> bool {
        self.mode == AppMode::Help
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_toggles_back_and_forth() {
        let mut state = AppState::new();
        assert_eq!(state.mode, AppMode::Combat);

        state.toggle_help();
        assert!(state.is_overlay());

        state.toggle_help();
        assert_eq!(state.mode, AppMode::Combat);
    }

    #[test]
    fn exit_returns_to_combat() {
        let mut state = AppState::new();
        state.toggle_help();
        state.exit_to_combat();
        assert!(!state.is_overlay());
    }
}
