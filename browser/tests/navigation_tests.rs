use proptest::prelude::*;
use script_browser::search::navigation::*;

fn press(state: NavigationState, key: NavKey) -> NavigationState {
    reduce(state, key).0
}

#[test]
fn arrow_down_wraps_to_first() {
    let mut state = NavigationState::presenting(3);
    state = press(state, NavKey::ArrowDown);
    assert_eq!(state.highlighted, Some(0));
    state = press(state, NavKey::ArrowDown);
    state = press(state, NavKey::ArrowDown);
    assert_eq!(state.highlighted, Some(2));
    state = press(state, NavKey::ArrowDown);
    assert_eq!(state.highlighted, Some(0));
}

#[test]
fn arrow_up_wraps_to_last() {
    let state = NavigationState {
        highlighted: Some(0),
        ..NavigationState::presenting(4)
    };
    assert_eq!(press(state, NavKey::ArrowUp).highlighted, Some(3));
}

#[test]
fn arrow_up_from_nothing_lands_on_last() {
    let state = NavigationState::presenting(4);
    assert_eq!(press(state, NavKey::ArrowUp).highlighted, Some(3));
}

#[test]
fn enter_selects_highlighted_and_closes() {
    let state = NavigationState {
        highlighted: Some(1),
        ..NavigationState::presenting(2)
    };
    let (next, outcome) = reduce(state, NavKey::Enter);
    assert_eq!(outcome, NavOutcome::Selected(1));
    assert!(!next.open);
    assert_eq!(next.highlighted, None);
}

#[test]
fn enter_without_highlight_is_noop() {
    let state = NavigationState::presenting(2);
    assert_eq!(reduce(state, NavKey::Enter), (state, NavOutcome::None));
}

#[test]
fn escape_closes_and_clears_highlight() {
    let state = NavigationState {
        highlighted: Some(1),
        ..NavigationState::presenting(2)
    };
    let (next, outcome) = reduce(state, NavKey::Escape);
    assert_eq!(outcome, NavOutcome::Closed);
    assert_eq!(next, NavigationState::closed());
}

#[test]
fn closed_panel_ignores_keys() {
    let state = NavigationState::closed();
    for key in [NavKey::ArrowDown, NavKey::ArrowUp, NavKey::Enter, NavKey::Escape] {
        assert_eq!(reduce(state, key), (state, NavOutcome::None));
    }
}

#[test]
fn empty_list_ignores_arrows_and_enter() {
    let state = NavigationState::presenting(0);
    assert!(!state.enabled());
    for key in [NavKey::ArrowDown, NavKey::ArrowUp, NavKey::Enter] {
        assert_eq!(reduce(state, key), (state, NavOutcome::None));
    }
}

proptest! {
    #[test]
    fn n_downs_from_zero_return_to_zero(len in 1usize..40) {
        let mut state = NavigationState { highlighted: Some(0), ..NavigationState::presenting(len) };
        for _ in 0..len {
            state = press(state, NavKey::ArrowDown);
        }
        prop_assert_eq!(state.highlighted, Some(0));
    }

    #[test]
    fn up_then_down_is_identity(len in 1usize..40, start in 0usize..40) {
        let start = start % len;
        let state = NavigationState { highlighted: Some(start), ..NavigationState::presenting(len) };
        let back = press(press(state, NavKey::ArrowUp), NavKey::ArrowDown);
        prop_assert_eq!(back.highlighted, Some(start));
    }
}
