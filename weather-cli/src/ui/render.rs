use ir_weather_core::view::{CREDIT_NAME, CREDIT_PREFIX, ScreenView, Status, TITLE_APP_NAME, TITLE_SUFFIX};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::prompt::QUESTION;
use crate::ui::theme::{
    BACKGROUND, BODY_TEXT, BORDER, CREDIT_BOX, CREDIT_TEXT, MAP_MARKER, POPUP_BORDER,
    STATUS_ERROR, STATUS_PROGRESS, TITLE_TEXT, icon_color,
};

const FOOTER_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame<'_>, view: &ScreenView, asking_permission: bool) {
    let area = frame.area();
    let [main, footer] = split_footer(area);

    frame.render_widget(
        Block::default().style(Style::default().bg(BACKGROUND)),
        main,
    );

    let [title, data, desc, status] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .areas(main);

    frame.render_widget(title_widget(), title);
    frame.render_widget(data_widget(view), data);
    render_desc(frame, view, desc);
    frame.render_widget(status_widget(view.status.as_ref()), status);
    frame.render_widget(credit_widget(), footer);

    if asking_permission {
        render_permission_popup(frame, area);
    }
}

fn split_footer(area: Rect) -> [Rect; 2] {
    let footer_height = FOOTER_HEIGHT.min(area.height);
    let main = Rect {
        height: area.height.saturating_sub(footer_height),
        ..area
    };
    let footer = Rect {
        y: area.y + main.height,
        height: footer_height,
        ..area
    };
    [main, footer]
}

fn title_widget() -> Paragraph<'static> {
    let bold = Style::default().fg(TITLE_TEXT).add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(TITLE_APP_NAME, bold.add_modifier(Modifier::UNDERLINED)),
        Span::styled(TITLE_SUFFIX, bold),
    ]);

    Paragraph::new(vec![Line::default(), line]).alignment(Alignment::Center)
}

fn data_widget(view: &ScreenView) -> Paragraph<'_> {
    let text = Style::default().fg(BODY_TEXT);
    let lines = vec![
        Line::from(vec![
            Span::styled("📍 ", Style::default().fg(MAP_MARKER)),
            Span::styled(view.location.as_str(), text.add_modifier(Modifier::BOLD)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            view.temperature.as_str(),
            text.add_modifier(Modifier::BOLD),
        )),
    ];

    Paragraph::new(lines).alignment(Alignment::Center)
}

fn render_desc(frame: &mut Frame<'_>, view: &ScreenView, area: Rect) {
    let [icon_area, info_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .areas(area);

    let icon = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            view.icon.glyph(),
            Style::default()
                .fg(icon_color(view.icon))
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title(format!(" {} ", view.icon.name())),
    );
    frame.render_widget(icon, icon_area);

    let text = Style::default().fg(BODY_TEXT);
    let info = Paragraph::new(vec![
        Line::from(Span::styled(view.sky.as_str(), text)),
        Line::from(Span::styled(view.humidity.as_str(), text)),
        Line::from(Span::styled(view.wind.as_str(), text)),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::LEFT).border_style(Style::default().fg(BORDER)));
    frame.render_widget(info, info_area);
}

fn status_widget(status: Option<&Status>) -> Paragraph<'_> {
    let line = match status {
        Some(Status::Progress(message)) => {
            Line::from(Span::styled(message.as_str(), Style::default().fg(STATUS_PROGRESS)))
        }
        Some(Status::Error(message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD),
        )),
        None => Line::default(),
    };

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn credit_widget() -> Paragraph<'static> {
    let text = Style::default().fg(CREDIT_TEXT);
    let line = Line::from(vec![
        Span::styled(CREDIT_PREFIX, text),
        Span::styled(CREDIT_NAME, text.add_modifier(Modifier::BOLD)),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .style(Style::default().bg(CREDIT_BOX))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(BORDER)),
        )
}

fn render_permission_popup(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(60, 7, area);
    let lines = vec![
        Line::from(QUESTION),
        Line::default(),
        Line::from(vec![
            Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": allow   "),
            Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": deny"),
        ]),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(POPUP_BORDER))
                    .title(" Location "),
            ),
        popup,
    );
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir_weather_core::{
        Coordinates, ScreenState, WeatherSnapshot,
        error::{FailureKind, FetchFailure},
        view::render,
    };
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(view: &ScreenView, asking: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, view, asking)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn loaded_screen_shows_weather() {
        let view = render(&ScreenState::Loaded(WeatherSnapshot {
            location_name: "Dhaka".into(),
            temperature_c: 31.5,
            sky_description: "clear sky".into(),
            humidity_pct: 60,
            wind_speed_mps: 3.2,
        }));

        let text = screen_text(&view, false);

        assert!(text.contains("IR Weather Service"));
        assert!(text.contains("Dhaka"));
        assert!(text.contains("31.50°C"));
        assert!(text.contains("Weather: clear sky"));
        assert!(text.contains("Humidity: 60%"));
        assert!(text.contains("Wind: 3.2 m/s"));
        assert!(text.contains("Developed By Istiak Rahman"));
    }

    #[test]
    fn loading_screen_shows_placeholders() {
        let view = render(&ScreenState::Fetching(Coordinates::new(1.0, 2.0)));

        let text = screen_text(&view, false);

        assert!(text.contains("Fetching location..."));
        assert!(text.contains("Fetching weather..."));
        assert!(text.contains("Humidity: Loading..."));
    }

    #[test]
    fn failed_screen_shows_error_status() {
        let view = render(&ScreenState::Failed(FetchFailure {
            kind: FailureKind::Http,
            message: "city not found".into(),
        }));

        let text = screen_text(&view, false);

        assert!(text.contains("city not found"));
        assert!(text.contains("Fetching weather..."));
    }

    #[test]
    fn permission_popup_is_drawn() {
        let view = render(&ScreenState::ResolvingLocation);

        let text = screen_text(&view, true);

        assert!(text.contains("Allow IR Weather"));
        assert!(text.contains("y: allow"));
    }

    #[test]
    fn pending_prompt_shows_waiting_status() {
        let view = render(&ScreenState::ResolvingLocation).awaiting_permission();

        let text = screen_text(&view, true);

        assert!(text.contains("Waiting for location permission..."));
        assert!(!text.contains("Resolving location..."));
    }

    #[test]
    fn long_status_wraps_onto_second_row() {
        let view = render(&ScreenState::Failed(FetchFailure {
            kind: FailureKind::Location,
            message: "Location service unavailable: the lookup service did not answer in time".into(),
        }));

        let mut terminal = Terminal::new(TestBackend::new(40, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &view, false)).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        };
        // Status occupies the two rows above the 3-row credit box.
        let status = format!("{}{}", row(19), row(20));

        assert!(status.contains("Location service"));
        assert!(status.contains("in time"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let view = render(&ScreenState::Idle);
        let mut terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
        terminal.draw(|frame| draw(frame, &view, true)).unwrap();
    }
}
