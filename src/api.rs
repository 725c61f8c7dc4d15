//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::PokemonSummary;

const API_BASE: &str = "https://pokeapi.co/api/v2";

/// JSON pointer to the animated front sprite inside the `sprites` blob.
const ANIMATED_SPRITE_POINTER: &str =
    "/versions/generation-v/black-white/animated/front_default";

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    sprites: serde_json::Value,
}

/// Lookup error type
#[derive(Debug)]
pub enum LookupError {
    Request(reqwest::Error),
    NotFound(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Request(e) => write!(f, "Lookup request failed: {}", e),
            LookupError::NotFound(query) => write!(f, "No Pokemon for: {}", query),
        }
    }
}

impl std::error::Error for LookupError {}

/// Fetch one Pokemon by lower-cased name or decimal id. Exactly one
/// attempt; any non-success status collapses to `NotFound`.
pub async fn fetch_pokemon(query: &str) -> Result<PokemonSummary, LookupError> {
    let url = format!("{API_BASE}/pokemon/{query}");
    let response = http_client()
        .get(&url)
        .send()
        .await
        .map_err(LookupError::Request)?;

    if !response.status().is_success() {
        return Err(LookupError::NotFound(query.to_string()));
    }

    let data: PokemonResponse = response.json().await.map_err(LookupError::Request)?;
    Ok(PokemonSummary {
        id: data.id,
        name: data.name,
        sprite_animated: pointer_string(&data.sprites, ANIMATED_SPRITE_POINTER),
    })
}

/// Fetch raw bytes (sprite images).
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    Ok(response
        .bytes()
        .await
        .map_err(|err| err.to_string())?
        .to_vec())
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sprite_pointer_finds_animated_url() {
        let sprites = json!({
            "front_default": "https://img.example/25.png",
            "versions": {
                "generation-v": {
                    "black-white": {
                        "animated": {
                            "front_default": "https://img.example/25.gif"
                        }
                    }
                }
            }
        });
        assert_eq!(
            pointer_string(&sprites, ANIMATED_SPRITE_POINTER),
            Some("https://img.example/25.gif".to_string())
        );
    }

    #[test]
    fn sprite_pointer_tolerates_missing_branch() {
        let sprites = json!({ "front_default": null });
        assert_eq!(pointer_string(&sprites, ANIMATED_SPRITE_POINTER), None);
    }
}
