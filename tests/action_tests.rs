//! Action and state tests using EffectStore
//!
//! FRAMEWORK PATTERN: EffectStore
//! - Create store with reducer, dispatch actions, verify state
//! - Check returned effects for the network calls a transition requests

use pokenav::{
    action::Action,
    effect::Effect,
    reducer::reducer,
    state::{AppState, PokemonSummary, ID_RANGE_ALERT, MAX_POKEMON_ID, NAME_ALERT},
};
use tui_dispatch::EffectStore;

fn summary(id: u16, name: &str) -> PokemonSummary {
    PokemonSummary {
        id,
        name: name.to_string(),
        sprite_animated: Some(format!("https://img.example/{id}.gif")),
    }
}

#[test]
fn test_submit_in_range_starts_lookup() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().pokemon.is_empty());

    let result = store.dispatch(Action::LookupSubmit("25".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().pokemon.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(&result.effects[0], Effect::FetchPokemon { query, .. } if query == "25"));
}

#[test]
fn test_lookup_success_sets_current_id() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::LookupSubmit("25".into()));
    let seq = store.state().lookup_seq;
    let result = store.dispatch(Action::LookupDidLoad {
        seq,
        pokemon: summary(25, "pikachu"),
    });

    assert!(result.changed);
    assert_eq!(store.state().current_id, 25);
    assert_eq!(
        store.state().pokemon.data().map(|p| p.name.as_str()),
        Some("pikachu")
    );
    assert!(store.state().alerts.is_empty());
    assert!(matches!(&result.effects[0], Effect::FetchSprite { .. }));
}

#[test]
fn test_name_lookup_success_moves_navigation_anchor() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::LookupSubmit("Charizard".into()));
    let seq = store.state().lookup_seq;
    store.dispatch(Action::LookupDidLoad {
        seq,
        pokemon: summary(6, "charizard"),
    });
    assert_eq!(store.state().current_id, 6);

    let result = store.dispatch(Action::NextPokemon);
    assert_eq!(store.state().current_id, 7);
    assert!(matches!(&result.effects[0], Effect::FetchPokemon { query, .. } if query == "7"));
}

#[test]
fn test_out_of_range_never_fetches_rejected_id() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::LookupSubmit("1026".into()));

    assert_eq!(store.state().alerts.len(), 1);
    assert_eq!(
        store.state().alerts.iter().next().unwrap().message,
        ID_RANGE_ALERT
    );
    // The only permitted effect is the restore fetch for the current id.
    for effect in &result.effects {
        assert!(matches!(effect, Effect::FetchPokemon { query, .. } if query == "1"));
    }
    assert_eq!(store.state().current_id, 1);
}

#[test]
fn test_out_of_range_keeps_intact_display() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::LookupSubmit("25".into()));
    let seq = store.state().lookup_seq;
    store.dispatch(Action::LookupDidLoad {
        seq,
        pokemon: summary(25, "pikachu"),
    });

    let result = store.dispatch(Action::LookupSubmit("0".into()));

    assert!(result.effects.is_empty());
    assert_eq!(store.state().current_id, 25);
    assert_eq!(store.state().displayed_id(), Some(25));
    assert_eq!(store.state().alerts.len(), 1);
}

#[test]
fn test_prev_at_lower_bound_is_noop() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::PrevPokemon);

    assert!(!result.changed);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().current_id, 1);
    assert!(store.state().alerts.is_empty());
}

#[test]
fn test_next_at_upper_bound_is_noop() {
    let state = AppState {
        current_id: MAX_POKEMON_ID,
        ..AppState::default()
    };
    let mut store = EffectStore::new(state, reducer);

    let result = store.dispatch(Action::NextPokemon);

    assert!(!result.changed);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().current_id, MAX_POKEMON_ID);
}

#[test]
fn test_prev_steps_back_and_fetches() {
    let state = AppState {
        current_id: 26,
        ..AppState::default()
    };
    let mut store = EffectStore::new(state, reducer);

    let result = store.dispatch(Action::PrevPokemon);

    assert_eq!(store.state().current_id, 25);
    assert!(matches!(&result.effects[0], Effect::FetchPokemon { query, .. } if query == "25"));
}

#[test]
fn test_name_miss_shows_not_found_and_alerts() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::LookupSubmit("notarealname".into()));
    let seq = store.state().lookup_seq;
    store.dispatch(Action::LookupDidError {
        seq,
        query: "notarealname".into(),
        error: "No Pokemon for: notarealname".into(),
    });

    assert!(store.state().pokemon.is_failed());
    assert_eq!(store.state().current_id, 1);
    assert_eq!(
        store.state().alerts.iter().next().unwrap().message,
        NAME_ALERT
    );
}

#[test]
fn test_numeric_miss_raises_no_alert() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::LookupSubmit("152".into()));
    let seq = store.state().lookup_seq;
    store.dispatch(Action::LookupDidError {
        seq,
        query: "152".into(),
        error: "No Pokemon for: 152".into(),
    });

    assert!(store.state().pokemon.is_failed());
    assert!(store.state().alerts.is_empty());
    assert_eq!(store.state().current_id, 1);
}

#[test]
fn test_stale_completion_is_discarded() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::LookupSubmit("25".into()));
    let stale_seq = store.state().lookup_seq;
    store.dispatch(Action::LookupSubmit("bulbasaur".into()));
    let live_seq = store.state().lookup_seq;
    assert_ne!(stale_seq, live_seq);

    let result = store.dispatch(Action::LookupDidLoad {
        seq: stale_seq,
        pokemon: summary(25, "pikachu"),
    });
    assert!(!result.changed);
    assert!(store.state().pokemon.is_loading());

    store.dispatch(Action::LookupDidLoad {
        seq: live_seq,
        pokemon: summary(1, "bulbasaur"),
    });
    assert_eq!(store.state().current_id, 1);
    assert_eq!(
        store.state().pokemon.data().map(|p| p.name.as_str()),
        Some("bulbasaur")
    );
}

#[test]
fn test_submit_is_lower_cased() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::LookupSubmit("  Pikachu ".into()));

    assert!(matches!(&result.effects[0], Effect::FetchPokemon { query, .. } if query == "pikachu"));
}

#[test]
fn test_init_looks_up_start_id() {
    let mut store = EffectStore::new(AppState::new(151), reducer);

    let result = store.dispatch(Action::Init);

    assert!(store.state().pokemon.is_loading());
    assert!(matches!(&result.effects[0], Effect::FetchPokemon { query, .. } if query == "151"));
}

#[test]
fn test_search_mode_toggle() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchStart);
    assert!(store.state().search.active);

    store.dispatch(Action::SearchInput("pika".into()));
    assert_eq!(store.state().search.query, "pika");

    store.dispatch(Action::SearchCancel);
    assert!(!store.state().search.active);
    assert!(store.state().search.query.is_empty());
}
