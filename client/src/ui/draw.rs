use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::form::{Field, FormState, Widget};
use super::theme::Theme;

const LABEL_WIDTH: usize = 30;
const SLIDER_WIDTH: usize = 20;

pub const TITLE: &str = "🧠 Diabetes Prediction Interface";
pub const SUBTITLE: &str = "Submit patient data to get a diabetes prediction";
pub const SPINNER: &str = "⠋ Sending data to the model...";
pub const CAPTION: &str = "Made with ❤️ using ratatui + axum + ML";

pub fn draw(f: &mut Frame, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(state.fields.len() as u16 + 2),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.size());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(TITLE, Theme::title())),
        Line::from(Span::styled(SUBTITLE, Theme::text())),
        Line::from(Span::styled(
            "↑/↓ move · ←/→ adjust · type digits to edit · Enter/p predict · q quit",
            Theme::dim(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let lines: Vec<Line> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| field_line(field, i == state.focus))
        .collect();
    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Patient data "));
    f.render_widget(form, chunks[1]);

    let button_style = if state.on_button() { Theme::selected() } else { Theme::text() };
    let button = Paragraph::new(Line::from(Span::styled(" 🔍 Predict ", button_style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, chunks[2]);

    let result = if state.busy {
        Line::from(Span::styled(SPINNER, Theme::dim()))
    } else {
        match &state.outcome {
            Some(outcome) if outcome.is_error() => Line::from(Span::styled(outcome.message(), Theme::error())),
            Some(outcome) => Line::from(Span::styled(outcome.message(), Theme::success())),
            None => Line::from(Span::styled("No prediction yet", Theme::dim())),
        }
    };
    let result = Paragraph::new(result)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Result "));
    f.render_widget(result, chunks[3]);

    let caption = Paragraph::new(Span::styled(CAPTION, Theme::dim())).alignment(Alignment::Center);
    f.render_widget(caption, chunks[4]);
}

fn field_line(field: &Field, focused: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let value_style = if focused { Theme::selected() } else { Theme::text() };

    let mut spans = vec![
        Span::styled(marker, Theme::title()),
        Span::styled(format!("{:<width$}", field.label, width = LABEL_WIDTH), Theme::text()),
    ];

    match field.widget {
        Widget::Slider { min, max, .. } => {
            let filled = (field.fraction() * SLIDER_WIDTH as f64).round() as usize;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(SLIDER_WIDTH - filled));
            spans.push(Span::styled(bar, Theme::title()));
            spans.push(Span::styled(format!(" {} ", field.display()), value_style));
            spans.push(Span::styled(format!("  ({}–{})", min, max), Theme::dim()));
        }
        Widget::Number { min, max, decimals, .. } => {
            spans.push(Span::styled(format!("[ {:>7} ]", field.display()), value_style));
            spans.push(Span::styled(
                format!("  ({:.*}–{:.*})", decimals, min, decimals, max),
                Theme::dim(),
            ));
        }
        Widget::Select { .. } => {
            spans.push(Span::styled(format!("< {} >", field.display()), value_style));
        }
    }

    Line::from(spans)
}
