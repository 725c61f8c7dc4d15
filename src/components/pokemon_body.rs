use artbox::{
    fonts, integrations::ratatui::ArtBox, Alignment as ArtAlignment, Color as ArtColor, Fill,
    LinearGradient, Renderer,
};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::sprite::{self, SpriteData};
use crate::sprite_backend;
use crate::state::{AppState, PokemonSummary, LOADING_TEXT, NOT_FOUND_TEXT};

/// Terminal cells are roughly twice as tall as wide.
const CELL_ASPECT: f32 = 2.0;

pub struct PokemonBody;

pub struct PokemonBodyProps<'a> {
    pub state: &'a AppState,
}

fn font_stack() -> Vec<artbox::Font> {
    fonts::stack(&["terminus", "miniwi"])
}

impl Component<Action> for PokemonBody {
    type Props<'a> = PokemonBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // number
            Constraint::Max(6),    // FIGlet name
            Constraint::Length(1), // spacer
            Constraint::Min(6),    // sprite
            Constraint::Length(1), // hint
        ])
        .flex(Flex::Center)
        .split(area);

        match &props.state.pokemon {
            DataResource::Loaded(pokemon) => {
                render_loaded(frame, &chunks, props.state, pokemon);
            }
            DataResource::Loading => {
                sprite_backend::hide_sprite();
                render_message(frame, chunks[1], LOADING_TEXT, Color::DarkGray);
            }
            DataResource::Failed(_) => {
                sprite_backend::hide_sprite();
                render_message(frame, chunks[1], NOT_FOUND_TEXT, Color::Red);
            }
            DataResource::Empty => {
                sprite_backend::hide_sprite();
                render_hint(frame, chunks[4]);
            }
        }
    }
}

fn render_loaded(frame: &mut Frame, chunks: &[Rect], state: &AppState, pokemon: &PokemonSummary) {
    let number = Line::from(vec![Span::styled(
        format!("#{}", pokemon.id),
        Style::default().fg(Color::Yellow).bold(),
    )])
    .centered();
    frame.render_widget(Paragraph::new(number), chunks[0]);

    let renderer = Renderer::new(font_stack())
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(name_gradient());
    frame.render_widget(ArtBox::new(&renderer, &pokemon.name), chunks[1]);

    render_sprite(frame, chunks[3], state, pokemon);
}

fn name_gradient() -> Fill {
    Fill::Linear(LinearGradient::horizontal(
        ArtColor::rgb(255, 203, 5),
        ArtColor::rgb(255, 120, 80),
    ))
}

fn render_sprite(frame: &mut Frame, area: Rect, state: &AppState, pokemon: &PokemonSummary) {
    if let Some(sprite) = state.sprite.sprite.as_ref() {
        if let Some(sprite_frame) = sprite.frame(state.sprite.frame_index) {
            let (cols, rows) = sprite_fit(sprite, area.width, area.height);
            if let Ok(sequence) = sprite::kitty_sequence(sprite_frame, cols, rows) {
                let offset_x = area.x.saturating_add(area.width.saturating_sub(cols) / 2);
                let offset_y = area.y.saturating_add(area.height.saturating_sub(rows) / 2);
                sprite_backend::show_sprite(offset_x, offset_y, sequence);
                return;
            }
        }
    }

    sprite_backend::hide_sprite();
    let content = if state.sprite.loading {
        "[loading sprite]"
    } else if pokemon.sprite_animated.is_none() {
        "[no sprite]"
    } else {
        ""
    };
    let line = Line::from(Span::styled(content, Style::default().fg(Color::DarkGray))).centered();
    frame.render_widget(Paragraph::new(line), area);
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let line = Line::from(Span::styled(text.to_string(), Style::default().fg(color))).centered();
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to look up a Pokemon", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), area);
}

/// Scale the sprite to the area while keeping its pixel aspect ratio.
fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if max_cols == 0 || max_rows == 0 || sprite.height == 0 {
        return (max_cols, max_rows);
    }
    let image_ratio = sprite.width as f32 / sprite.height as f32;
    let max_cols_f = max_cols as f32;
    let max_rows_f = max_rows as f32;
    let cols_for_max_rows = image_ratio * max_rows_f * CELL_ASPECT;
    if cols_for_max_rows <= max_cols_f {
        let cols = cols_for_max_rows.max(1.0).round() as u16;
        return (cols.max(1), max_rows.max(1));
    }
    let rows_for_max_cols = max_cols_f / (image_ratio * CELL_ASPECT);
    let rows = rows_for_max_cols.max(1.0).round() as u16;
    (max_cols.max(1), rows.min(max_rows).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(width: u32, height: u32) -> SpriteData {
        SpriteData {
            frames: vec![],
            width,
            height,
        }
    }

    #[test]
    fn square_sprite_is_bounded_by_rows() {
        // 40x20 area: a square image fits 20 rows = 40 cols at 2:1 cells.
        assert_eq!(sprite_fit(&sprite(96, 96), 40, 20), (40, 20));
    }

    #[test]
    fn wide_sprite_is_bounded_by_cols() {
        let (cols, rows) = sprite_fit(&sprite(200, 50), 40, 20);
        assert_eq!(cols, 40);
        assert!(rows <= 20);
    }

    #[test]
    fn degenerate_area_passes_through() {
        assert_eq!(sprite_fit(&sprite(96, 96), 0, 20), (0, 20));
        assert_eq!(sprite_fit(&sprite(96, 0), 40, 20), (40, 20));
    }
}
