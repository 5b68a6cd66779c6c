/// Keys the result panel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

/// What a key press did beyond moving the highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    None,
    /// Index of the selected result; the panel is now closed.
    Selected(usize),
    Closed,
}

/// Highlight position over the presented result list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub open: bool,
    pub highlighted: Option<usize>,
    pub len: usize,
}

impl NavigationState {
    /// A freshly opened panel over `len` results, nothing highlighted.
    pub fn presenting(len: usize) -> Self {
        Self {
            open: true,
            highlighted: None,
            len,
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }

    /// Arrow keys and Enter only act on an open, non-empty panel.
    pub fn enabled(&self) -> bool {
        self.open && self.len > 0
    }
}

/// Pure keyboard reducer. Arrow keys wrap at both ends; with nothing
/// highlighted, ArrowDown lands on the first result and ArrowUp on the last.
pub fn reduce(state: NavigationState, key: NavKey) -> (NavigationState, NavOutcome) {
    if !state.open {
        return (state, NavOutcome::None);
    }
    match key {
        NavKey::Escape => (NavigationState::closed(), NavOutcome::Closed),
        _ if state.len == 0 => (state, NavOutcome::None),
        NavKey::ArrowDown => {
            let next = match state.highlighted {
                Some(i) if i + 1 < state.len => i + 1,
                Some(_) | None => 0,
            };
            (
                NavigationState {
                    highlighted: Some(next),
                    ..state
                },
                NavOutcome::None,
            )
        }
        NavKey::ArrowUp => {
            let next = match state.highlighted {
                Some(0) | None => state.len - 1,
                Some(i) => (i - 1).min(state.len - 1),
            };
            (
                NavigationState {
                    highlighted: Some(next),
                    ..state
                },
                NavOutcome::None,
            )
        }
        NavKey::Enter => match state.highlighted {
            Some(i) if i < state.len => (NavigationState::closed(), NavOutcome::Selected(i)),
            _ => (state, NavOutcome::None),
        },
    }
}
