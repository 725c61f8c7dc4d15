pub mod alert_banner;
pub mod lookup_display;
pub mod pokemon_body;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use alert_banner::{AlertBanner, AlertBannerProps};
pub use lookup_display::{LookupDisplay, LookupDisplayProps};
pub use pokemon_body::{PokemonBody, PokemonBodyProps};
pub use search_bar::{SearchBar, SearchBarProps};
