use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::alert::{AlertPhase, AlertStack};

const ALERT_ICON: &str = "\u{26a0}";

/// Stacked one-line alerts, newest at the bottom.
pub struct AlertBanner;

pub struct AlertBannerProps<'a> {
    pub alerts: &'a AlertStack,
}

impl Component<Action> for AlertBanner {
    type Props<'a> = AlertBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.alerts.is_empty() || area.height == 0 {
            return;
        }

        let constraints: Vec<Constraint> = props
            .alerts
            .iter()
            .map(|_| Constraint::Length(1))
            .collect();
        let rows = Layout::vertical(constraints).split(area);

        for (alert, row) in props.alerts.iter().zip(rows.iter()) {
            let style = match alert.phase() {
                AlertPhase::Visible => Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
                AlertPhase::Fading => Style::default().fg(Color::DarkGray),
            };
            let line = Line::from(vec![
                Span::styled(format!("{ALERT_ICON} {}", alert.message), style),
                Span::styled("  x dismiss", Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(Paragraph::new(line), *row);
        }
    }
}
