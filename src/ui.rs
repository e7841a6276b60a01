//! Terminal rendering - draws a `RenderState` with ratatui widgets

use ratatui::{prelude::*, widgets::*};

use crate::app::status::Banner;
use crate::constants::APP_NAME;
use crate::messages::ui_events::Field;
use crate::messages::RenderState;
use crate::models::RoomCount;

const ACCENT: Color = Color::Yellow;
const DISABLED: Color = Color::DarkGray;

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let banner_rows = banner_height(state, area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                      // Title
            Constraint::Length(banner_rows),            // Banner
            Constraint::Length(3),                      // Area
            Constraint::Length(3),                      // BHK
            Constraint::Length(3),                      // Bathrooms
            Constraint::Length(3),                      // Location
            Constraint::Length(3),                      // Estimate button
            Constraint::Length(4),                      // Result
            Constraint::Min(0),
            Constraint::Length(1),                      // Status bar
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" ⌂ ", Style::default().fg(ACCENT)),
        Span::styled(APP_NAME, Style::default().bold()),
    ]));
    f.render_widget(title, chunks[0]);

    if let Some(banner) = &state.banner {
        draw_banner(f, banner, chunks[1]);
    }

    draw_area_input(f, state, chunks[2]);
    draw_room_selector(f, state, Field::Bedrooms, state.bedrooms, chunks[3]);
    draw_room_selector(f, state, Field::Bathrooms, state.bathrooms, chunks[4]);
    draw_locality_selector(f, state, chunks[5]);
    draw_submit(f, state, chunks[6]);
    draw_result(f, state, chunks[7]);
    draw_status_bar(f, state, chunks[9]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

/// Rows needed to show the whole banner text at `width`, borders included
fn banner_height(state: &RenderState, width: u16) -> u16 {
    let Some(banner) = &state.banner else { return 0 };
    let (_, _, lines) = banner_content(banner);
    let wrapped = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .line_count(width.saturating_sub(2));
    u16::try_from(wrapped).unwrap_or(u16::MAX).saturating_add(2)
}

fn banner_content(banner: &Banner) -> (Color, &'static str, Vec<Line<'_>>) {
    match banner {
        Banner::Checking => (
            Color::Blue,
            " Backend ",
            vec![Line::from("Connecting to backend server...")],
        ),
        Banner::Offline { reason } => (
            Color::Red,
            " Backend server is not available ",
            vec![
                Line::from(reason.as_str()),
                Line::from(vec![
                    Span::styled("[r]", Style::default().fg(ACCENT).bold()),
                    Span::raw(" Retry Connection"),
                ]),
            ],
        ),
        Banner::Error(message) => (Color::Red, " Error ", vec![Line::from(message.as_str())]),
    }
}

fn draw_banner(f: &mut Frame, banner: &Banner, area: Rect) {
    let (color, title, lines) = banner_content(banner);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).bold());

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn field_block(state: &RenderState, field: Field, enabled: bool) -> Block<'static> {
    let border_style = if !enabled {
        Style::default().fg(DISABLED)
    } else if state.focus == field {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", field.label()))
}

fn draw_area_input(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = field_block(state, Field::Area, state.form_enabled);
    let content = if state.area_sqft.is_empty() {
        Span::styled("Enter area in sqft", Style::default().fg(DISABLED))
    } else {
        Span::raw(state.area_sqft.as_str())
    };
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if state.focus == Field::Area && state.form_enabled && !state.show_help {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + state.area_sqft.len() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_room_selector(f: &mut Frame, state: &RenderState, field: Field, selected: RoomCount, area: Rect) {
    let block = field_block(state, field, state.form_enabled);
    let line = Line::from(render_choices(selected, state.form_enabled));
    f.render_widget(Paragraph::new(line).block(block), area);
}

/// One-of-five selector with the chosen value highlighted
pub fn render_choices(selected: RoomCount, enabled: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(RoomCount::ALL.len() * 2);
    for value in RoomCount::ALL {
        let style = if !enabled {
            Style::default().fg(DISABLED)
        } else if value == selected {
            Style::default().fg(Color::Black).bg(ACCENT).bold()
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("  {}  ", value), style));
        spans.push(Span::raw(" "));
    }
    spans.pop();
    spans
}

fn draw_locality_selector(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = field_block(state, Field::Locality, state.locality_enabled);
    f.render_widget(Paragraph::new(locality_line(state)).block(block), area);
}

/// Current locality with its position in the list, or the placeholder
pub fn locality_line(state: &RenderState) -> Line<'static> {
    let position = state.locations.iter().position(|l| *l == state.locality);
    match position {
        Some(i) if !state.locality.is_empty() => {
            let style = if state.locality_enabled {
                Style::default()
            } else {
                Style::default().fg(DISABLED)
            };
            Line::from(vec![
                Span::styled("◀ ", Style::default().fg(DISABLED)),
                Span::styled(state.locality.clone(), style.bold()),
                Span::styled(" ▶", Style::default().fg(DISABLED)),
                Span::styled(
                    format!("  ({}/{})", i + 1, state.locations.len()),
                    Style::default().fg(DISABLED),
                ),
            ])
        }
        _ => Line::from(Span::styled(state.locality_placeholder, Style::default().fg(DISABLED))),
    }
}

fn draw_submit(f: &mut Frame, state: &RenderState, area: Rect) {
    let (border, text) = if !state.submit_enabled {
        (Style::default().fg(DISABLED), Style::default().fg(DISABLED))
    } else if state.focus == Field::Submit {
        (Style::default().fg(ACCENT), Style::default().fg(Color::Black).bg(ACCENT).bold())
    } else {
        (Style::default().fg(ACCENT), Style::default().fg(ACCENT).bold())
    };

    let block = Block::default().borders(Borders::ALL).border_style(border);
    let button = Paragraph::new(Span::styled(format!(" {} ", state.submit_label), text))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(button, area);
}

fn draw_result(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(estimate) = &state.estimate else { return };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Estimated Price ")
        .title_bottom(
            Line::from(format!(" {} ", estimate.received_at.format("%H:%M:%S"))).right_aligned(),
        );

    let price = Paragraph::new(Span::styled(estimate.display(), Style::default().fg(ACCENT).bold()))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(price, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... "
    } else if state.connectivity.is_offline() {
        " r:retry | ?:help | q:quit "
    } else {
        " Tab:field | ←/→:select | s/Enter:estimate | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(DISABLED));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 BHP TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / ↓            Next field
   Shift+Tab / ↑      Previous field

 FORM
   0-9 .              Type the area (Area field)
   Backspace          Delete last digit
   ← / →              Change BHK, bathrooms or location
   1-5                Pick BHK or bathrooms directly

 ACTIONS
   s / Enter          Estimate price
   r                  Retry backend connection (when offline)

 GENERAL
   ?                  Toggle this help
   q / Esc / Ctrl+C   Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::constants::{cannot_connect_message, DEFAULT_BACKEND_URL, MSG_ESTIMATE_FAILED};
    use crate::messages::NetworkResponse;
    use crate::models::PriceEstimate;
    use ratatui::backend::TestBackend;

    fn render(state: &RenderState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    /// Screen text with borders stripped and whitespace collapsed, so wrapped
    /// sentences read as one line
    fn flatten(screen: &str) -> String {
        screen
            .replace(['│', '─', '┌', '┐', '└', '┘'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn online(locations: &[&str]) -> AppState {
        let mut state = AppState::new();
        state.start_probe();
        state.handle_response(NetworkResponse::LocationsLoaded {
            id: 1,
            locations: locations.iter().map(|s| s.to_string()).collect(),
            time_ms: 1,
        });
        state
    }

    #[test]
    fn test_checking_screen() {
        let mut state = AppState::new();
        state.start_probe();
        let screen = render(&state.to_render_state());
        assert!(screen.contains("Connecting to backend server..."));
        assert!(screen.contains("Loading locations..."));
    }

    #[test]
    fn test_offline_screen_offers_retry() {
        let mut state = AppState::new();
        state.start_probe();
        state.handle_response(NetworkResponse::ProbeFailed {
            id: 1,
            message: "Backend server returned an error".into(),
            time_ms: 1,
        });
        let screen = render(&state.to_render_state());
        assert!(screen.contains("Backend server is not available"));
        assert!(screen.contains("Retry Connection"));
        assert!(screen.contains("Backend server offline"));
    }

    #[test]
    fn test_long_error_banner_is_not_clipped() {
        let mut state = online(&["Whitefield"]);
        state.select_locality("Whitefield");
        state.submit();
        state.handle_response(NetworkResponse::EstimateFailed {
            id: 2,
            message: MSG_ESTIMATE_FAILED.into(),
            time_ms: 1,
        });
        let screen = flatten(&render(&state.to_render_state()));
        assert!(screen.contains(MSG_ESTIMATE_FAILED));
    }

    #[test]
    fn test_long_offline_reason_keeps_retry_hint() {
        let reason = cannot_connect_message(DEFAULT_BACKEND_URL);
        let mut state = AppState::new();
        state.start_probe();
        state.handle_response(NetworkResponse::ProbeFailed {
            id: 1,
            message: reason.clone(),
            time_ms: 1,
        });
        let screen = flatten(&render(&state.to_render_state()));
        assert!(screen.contains(&reason));
        assert!(screen.contains("[r] Retry Connection"));
    }

    #[test]
    fn test_banner_height_grows_on_narrow_terminals() {
        let mut state = AppState::new();
        state.start_probe();
        state.handle_response(NetworkResponse::ProbeFailed {
            id: 1,
            message: cannot_connect_message(DEFAULT_BACKEND_URL),
            time_ms: 1,
        });
        let render_state = state.to_render_state();
        assert!(banner_height(&render_state, 40) > banner_height(&render_state, 120));
        let no_banner = RenderState { banner: None, ..render_state };
        assert_eq!(banner_height(&no_banner, 80), 0);
    }

    #[test]
    fn test_result_panel_shows_lakhs() {
        let mut state = online(&["Whitefield"]);
        state.select_locality("Whitefield");
        state.submit();
        state.handle_response(NetworkResponse::EstimateReady {
            id: 2,
            estimate: PriceEstimate::new("85.4"),
            time_ms: 1,
        });
        let screen = render(&state.to_render_state());
        assert!(screen.contains("₹ 85.4 Lakhs"));
        assert!(screen.contains("Whitefield"));
        assert!(screen.contains("(1/1)"));
    }

    #[test]
    fn test_locality_placeholder_when_online() {
        let state = online(&["Whitefield", "Indiranagar"]);
        assert!(render(&state.to_render_state()).contains("Select a location"));
    }

    #[test]
    fn test_render_choices_marks_selection() {
        let spans = render_choices(RoomCount::new(3).unwrap(), true);
        let selected: Vec<_> = spans
            .iter()
            .filter(|s| s.style.bg == Some(ACCENT))
            .map(|s| s.content.trim().to_string())
            .collect();
        assert_eq!(selected, vec!["3"]);
    }
}
