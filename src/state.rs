//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::alert::AlertStack;
use crate::sprite::SpriteData;

/// Species id range served by the API and covered by navigation.
pub const MIN_POKEMON_ID: u16 = 1;
pub const MAX_POKEMON_ID: u16 = 1025;

/// Display text while a lookup is in flight.
pub const LOADING_TEXT: &str = "Loading...";
/// Display text for a lookup miss, whatever the cause.
pub const NOT_FOUND_TEXT: &str = "Not found :c";

/// Alert raised for a numeric query outside the id range.
pub const ID_RANGE_ALERT: &str = "Pokémon ID must be between 1 and 1025";
/// Alert raised when a name query comes back empty.
pub const NAME_ALERT: &str = "Pokémon name not found, please check spelling";

/// Period of the tick subscription driving alerts and sprite frames.
pub const TICK_MS: u64 = 50;

/// One looked-up Pokemon, as shown in the display fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonSummary {
    pub id: u16,
    pub name: String,
    /// Animated front sprite (generation-v black-white), when the API has one.
    pub sprite_animated: Option<String>,
}

/// Search field state; `active` routes key events to the input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Decoded sprite plus animation counters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteState {
    pub sprite: Option<SpriteData>,
    pub frame_index: usize,
    pub frame_tick: u64,
    pub loading: bool,
}

impl SpriteState {
    pub fn reset(&mut self) {
        self.sprite = None;
        self.frame_index = 0;
        self.frame_tick = 0;
        self.loading = false;
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Identifier of the last confirmed Pokemon; navigation steps from here.
    /// Invariant: stays within [MIN_POKEMON_ID, MAX_POKEMON_ID].
    pub current_id: u16,

    /// Sequence number of the most recently issued lookup. Completions
    /// carrying an older value are discarded.
    pub lookup_seq: u64,

    /// Lookup lifecycle: Empty → Loading → Loaded/Failed
    pub pokemon: DataResource<PokemonSummary>,

    pub sprite: SpriteState,

    pub search: SearchState,

    pub alerts: AlertStack,

    pub tick: u64,
}

impl AppState {
    pub fn new(start_id: u16) -> Self {
        Self {
            current_id: start_id.clamp(MIN_POKEMON_ID, MAX_POKEMON_ID),
            lookup_seq: 0,
            pokemon: DataResource::Empty,
            sprite: SpriteState::default(),
            search: SearchState::default(),
            alerts: AlertStack::default(),
            tick: 0,
        }
    }

    /// Id currently on screen, when the display shows a loaded Pokemon.
    pub fn displayed_id(&self) -> Option<u16> {
        self.pokemon.data().map(|pokemon| pokemon.id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MIN_POKEMON_ID)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Lookup")
                .entry("current_id", ron_string(&self.current_id))
                .entry("seq", ron_string(&self.lookup_seq))
                .entry(
                    "name",
                    ron_string(&self.pokemon.data().map(|pokemon| pokemon.name.clone())),
                )
                .entry("loading", ron_string(&self.pokemon.is_loading())),
            DebugSection::new("Search")
                .entry("active", ron_string(&self.search.active))
                .entry("query", ron_string(&self.search.query)),
            DebugSection::new("Alerts").entry("count", ron_string(&self.alerts.len())),
        ]
    }
}
