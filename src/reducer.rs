//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{
    AppState, ID_RANGE_ALERT, MAX_POKEMON_ID, MIN_POKEMON_ID, NAME_ALERT, TICK_MS,
};

/// Sprite animation advances every other tick.
const SPRITE_FRAME_STEP: u64 = 2;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => begin_lookup(state, state.current_id.to_string()),

        // ===== Lookup actions =====
        Action::LookupSubmit(raw) => {
            let query = raw.trim().to_lowercase();
            if query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();

            if classify_query(&query) == QueryKind::OutOfRange {
                state.alerts.push(ID_RANGE_ALERT);
                // Rejected ids never reach the network. The last confirmed
                // Pokemon goes back on screen; when the display no longer
                // shows it, fetch it again.
                if state.displayed_id() == Some(state.current_id) {
                    return DispatchResult::changed();
                }
                return begin_lookup(state, state.current_id.to_string());
            }

            begin_lookup(state, query)
        }

        Action::LookupDidLoad { seq, pokemon } => {
            if seq != state.lookup_seq {
                return DispatchResult::unchanged();
            }
            state.current_id = pokemon.id;
            state.search.query.clear();
            state.sprite.reset();
            let sprite_url = pokemon.sprite_animated.clone();
            state.pokemon = DataResource::Loaded(pokemon);
            match sprite_url {
                Some(url) => {
                    state.sprite.loading = true;
                    DispatchResult::changed_with(Effect::FetchSprite { seq, url })
                }
                None => DispatchResult::changed(),
            }
        }

        Action::LookupDidError { seq, query, error } => {
            if seq != state.lookup_seq {
                return DispatchResult::unchanged();
            }
            state.pokemon = DataResource::Failed(error);
            state.sprite.reset();
            state.search.query.clear();
            if classify_query(&query) == QueryKind::Name {
                state.alerts.push(NAME_ALERT);
            }
            DispatchResult::changed()
        }

        // ===== Navigation =====
        Action::PrevPokemon => {
            if state.current_id <= MIN_POKEMON_ID {
                return DispatchResult::unchanged();
            }
            state.current_id -= 1;
            begin_lookup(state, state.current_id.to_string())
        }

        Action::NextPokemon => {
            if state.current_id >= MAX_POKEMON_ID {
                return DispatchResult::unchanged();
            }
            state.current_id += 1;
            begin_lookup(state, state.current_id.to_string())
        }

        // ===== Search actions =====
        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            DispatchResult::changed()
        }

        Action::SearchInput(query) => {
            state.search.query = query;
            DispatchResult::changed()
        }

        // ===== Sprite actions =====
        Action::SpriteDidLoad { seq, sprite } => {
            if seq != state.lookup_seq {
                return DispatchResult::unchanged();
            }
            state.sprite.loading = false;
            state.sprite.frame_index = 0;
            state.sprite.frame_tick = 0;
            state.sprite.sprite = Some(sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { seq, error: _ } => {
            if seq != state.lookup_seq {
                return DispatchResult::unchanged();
            }
            state.sprite.loading = false;
            DispatchResult::changed()
        }

        // ===== Alerts =====
        Action::AlertDismiss(id) => {
            if state.alerts.dismiss(id) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            let alerts_changed = state.alerts.advance(TICK_MS);
            let sprite_changed = advance_sprite(state);
            if alerts_changed || sprite_changed {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn begin_lookup(state: &mut AppState, query: String) -> DispatchResult<Effect> {
    state.pokemon = DataResource::Loading;
    state.sprite.reset();
    state.lookup_seq = state.lookup_seq.wrapping_add(1);
    DispatchResult::changed_with(Effect::FetchPokemon {
        seq: state.lookup_seq,
        query,
    })
}

fn advance_sprite(state: &mut AppState) -> bool {
    let Some(sprite) = state.sprite.sprite.as_ref() else {
        return false;
    };
    if sprite.frames.len() <= 1 {
        return false;
    }
    state.sprite.frame_tick = state.sprite.frame_tick.wrapping_add(1);
    if state.sprite.frame_tick % SPRITE_FRAME_STEP == 0 {
        state.sprite.frame_index = (state.sprite.frame_index + 1) % sprite.frames.len();
        return true;
    }
    false
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueryKind {
    /// Numeric query within [MIN_POKEMON_ID, MAX_POKEMON_ID]
    InRange,
    /// Numeric query outside the id range; rejected before the network
    OutOfRange,
    /// Anything non-numeric goes to the API as a name
    Name,
}

/// Full-string integer parse; digit strings too large for the id type are
/// still numeric, just out of range.
fn classify_query(query: &str) -> QueryKind {
    if !query.is_empty() && query.chars().all(|ch| ch.is_ascii_digit()) {
        return match query.parse::<u16>() {
            Ok(id) if (MIN_POKEMON_ID..=MAX_POKEMON_ID).contains(&id) => QueryKind::InRange,
            _ => QueryKind::OutOfRange,
        };
    }
    if let Ok(value) = query.parse::<i64>() {
        return if (i64::from(MIN_POKEMON_ID)..=i64::from(MAX_POKEMON_ID)).contains(&value) {
            QueryKind::InRange
        } else {
            QueryKind::OutOfRange
        };
    }
    QueryKind::Name
}
