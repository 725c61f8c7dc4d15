use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{AlertBanner, AlertBannerProps, Component, PokemonBody, PokemonBodyProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for LookupDisplay - read-only view of state
pub struct LookupDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main display: alert stack, Pokemon body, key hints.
#[derive(Default)]
pub struct LookupDisplay;

impl Component<Action> for LookupDisplay {
    type Props<'a> = LookupDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPokemon),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPokemon),
                KeyCode::Char('/') => Some(Action::SearchStart),
                KeyCode::Char('x') => props.state.alerts.front_id().map(Action::AlertDismiss),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: LookupDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(props.state.alerts.len() as u16),
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut alerts = AlertBanner;
        alerts.render(
            frame,
            chunks[0],
            AlertBannerProps {
                alerts: &props.state.alerts,
            },
        );

        let mut body = PokemonBody;
        body.render(
            frame,
            chunks[1],
            PokemonBodyProps { state: props.state },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("←/→", "prev/next"),
                    StatusBarHint::new("x", "dismiss"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_handle_event_search() {
        let mut component = LookupDisplay;
        let state = AppState::default();
        let props = LookupDisplayProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("/")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::SearchStart);
    }

    #[test]
    fn test_handle_event_navigation() {
        let mut component = LookupDisplay;
        let state = AppState::default();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("l")),
                LookupDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::NextPokemon);

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("h")),
                LookupDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::PrevPokemon);
    }

    #[test]
    fn test_dismiss_targets_oldest_alert() {
        let mut component = LookupDisplay;
        let mut state = AppState::default();
        let first = state.alerts.push("first");
        state.alerts.push("second");

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("x")),
                LookupDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::AlertDismiss(first));
    }

    #[test]
    fn test_dismiss_without_alerts_is_ignored() {
        let mut component = LookupDisplay;
        let state = AppState::default();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("x")),
                LookupDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = LookupDisplay;
        let state = AppState::default();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("l")),
                LookupDisplayProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
