//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch a Pokemon by name or id; `seq` tags the request so stale
    /// completions can be told apart from the live one
    FetchPokemon { seq: u64, query: String },
    /// Fetch and decode the animated sprite behind `url`
    FetchSprite { seq: u64, url: String },
}
