//! Actions - user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::PokemonSummary;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Look up the starting id once at launch
    Init,

    // ===== Lookup category =====
    /// Submit the search field (name or numeric id)
    LookupSubmit(String),

    /// Result: lookup resolved
    LookupDidLoad { seq: u64, pokemon: PokemonSummary },

    /// Result: lookup failed (miss or transport error)
    LookupDidError {
        seq: u64,
        query: String,
        error: String,
    },

    // ===== Navigation =====
    /// Step to the previous id
    PrevPokemon,

    /// Step to the next id
    NextPokemon,

    // ===== Search category =====
    /// Give the search field focus
    SearchStart,

    /// Close the search field without submitting
    SearchCancel,

    /// Search field text changed
    SearchInput(String),

    // ===== Sprite category =====
    /// Result: sprite fetched and decoded
    SpriteDidLoad { seq: u64, sprite: SpriteData },

    /// Result: sprite fetch or decode failed
    SpriteDidError { seq: u64, error: String },

    // ===== Alerts =====
    /// Dismiss an alert before it expires
    AlertDismiss(u64),

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick driving alert expiry and sprite animation
    Tick,

    /// Exit the application
    Quit,
}
