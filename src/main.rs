//! Pokemon lookup TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokenav::action::Action;
use pokenav::api;
use pokenav::components::{
    Component, LookupDisplay, LookupDisplayProps, SearchBar, SearchBarProps,
};
use pokenav::effect::Effect;
use pokenav::reducer::reducer;
use pokenav::sprite;
use pokenav::sprite_backend::{self, SpriteBackend};
use pokenav::state::{AppState, TICK_MS};

/// Look up Pokemon from PokeAPI by name or number
#[derive(Parser, Debug)]
#[command(name = "pokenav")]
#[command(about = "A Pokemon lookup TUI with prev/next navigation")]
struct Args {
    /// Species id shown on launch
    #[arg(long, short, default_value = "1", value_parser = clap::value_parser!(u16).range(1..=1025))]
    start_id: u16,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum NavComponentId {
    Display,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum NavContext {
    Main,
    Search,
}

impl EventRoutingState<NavComponentId, NavContext> for AppState {
    fn focused(&self) -> Option<NavComponentId> {
        if self.search.active {
            Some(NavComponentId::Search)
        } else {
            Some(NavComponentId::Display)
        }
    }

    fn modal(&self) -> Option<NavComponentId> {
        if self.search.active {
            Some(NavComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: NavComponentId) -> NavContext {
        match id {
            NavComponentId::Display => NavContext::Main,
            NavComponentId::Search => NavContext::Search,
        }
    }

    fn default_context(&self) -> NavContext {
        NavContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        start_id,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(start_id))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = SpriteBackend::new(stdout, sprite_backend::sprite_slot());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct LookupUi {
    display: LookupDisplay,
    search: SearchBar,
}

impl LookupUi {
    fn new() -> Self {
        Self {
            display: LookupDisplay,
            search: SearchBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<NavComponentId>,
    ) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Display
            Constraint::Length(1), // Search bar
        ])
        .split(area);

        event_ctx.set_component_area(NavComponentId::Display, chunks[0]);
        event_ctx.set_component_area(NavComponentId::Search, chunks[1]);

        let props = LookupDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search.active,
        };
        self.display.render(frame, chunks[0], props);

        self.search.set_active(state.search.active);
        let props = SearchBarProps {
            query: &state.search.query,
            is_active: state.search.active,
            is_focused: render_ctx.is_focused() && state.search.active,
            on_change: Action::SearchInput,
            on_submit: Action::LookupSubmit,
        };
        self.search.render(frame, chunks[1], props);
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = LookupDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_active(state.search.active);
        let props = SearchBarProps {
            query: &state.search.query,
            is_active: state.search.active,
            is_focused: true,
            on_change: Action::SearchInput,
            on_submit: Action::LookupSubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(LookupUi::new()));
    let mut bus: EventBus<AppState, Action, NavComponentId, NavContext> = EventBus::new();
    let keybindings: Keybindings<NavContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(NavComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(NavComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPokemon { seq, query } => {
            ctx.tasks().spawn(TaskKey::new("lookup"), async move {
                match api::fetch_pokemon(&query).await {
                    Ok(pokemon) => Action::LookupDidLoad { seq, pokemon },
                    Err(error) => Action::LookupDidError {
                        seq,
                        query,
                        error: error.to_string(),
                    },
                }
            });
        }
        Effect::FetchSprite { seq, url } => {
            ctx.tasks().spawn(TaskKey::new("sprite"), async move {
                match api::fetch_bytes(&url).await {
                    Ok(bytes) => match sprite::decode_sprite(&bytes, &url) {
                        Ok(sprite) => Action::SpriteDidLoad { seq, sprite },
                        Err(error) => Action::SpriteDidError { seq, error },
                    },
                    Err(error) => Action::SpriteDidError { seq, error },
                }
            });
        }
    }
}
