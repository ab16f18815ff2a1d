use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Painter, Shape},
    },
};

use crate::game::{GameState, Rect as PixelRect, Sprite};
use crate::metrics::GameMetrics;
use crate::modes::Mode;

const BACKGROUND: Color = Color::Rgb(255, 0, 0);
const SNAKE: Color = Color::Rgb(0, 0, 255);
const FOOD: Color = Color::Rgb(0, 255, 0);
const WALL: Color = Color::Rgb(0, 255, 51);

/// Everything one frame shows
pub struct View<'a> {
    pub state: &'a GameState,
    pub mode: Mode,
    /// Player name typed so far
    pub name: &'a str,
    pub metrics: &'a GameMetrics,
}

/// A solid rectangle in screen pixels painted onto the canvas
struct FilledRect {
    rect: PixelRect,
    color: Color,
    screen_height: i32,
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        for py in self.rect.y..self.rect.bottom() {
            // Canvas y points up, screen y points down
            let y = f64::from(self.screen_height - py) - 0.5;
            for px in self.rect.x..self.rect.right() {
                if let Some((x, y)) = painter.get_point(f64::from(px) + 0.5, y) {
                    painter.paint(x, y, self.color);
                }
            }
        }
    }
}

fn sprite_color(sprite: Sprite) -> Color {
    match sprite {
        Sprite::SnakeSegment => SNAKE,
        Sprite::Food => FOOD,
        Sprite::Wall => WALL,
    }
}

/// Largest area inside `area` with the screen's aspect ratio, centered.
///
/// A terminal cell is about twice as tall as it is wide.
pub fn fit_aspect(area: Rect, screen_width: i32, screen_height: i32) -> Rect {
    if area.width == 0 || area.height == 0 || screen_width <= 0 || screen_height <= 0 {
        return area;
    }

    let ratio = f64::from(screen_width) / f64::from(screen_height) * 2.0;
    let mut width = area.width;
    let mut height = (f64::from(width) / ratio).round() as u16;
    if height > area.height {
        height = area.height;
        width = ((f64::from(height) * ratio).round() as u16).min(area.width);
    }

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Centered box of at most `width` x `height` cells inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(view);
        frame.render_widget(stats, chunks[0]);

        let arena = &view.state.arena;
        // Fit the field inside the border, then grow back by one cell each way
        let inner = fit_aspect(
            chunks[1].inner(Margin::new(1, 1)),
            arena.width,
            arena.height,
        );
        let game_area = Rect {
            x: inner.x.saturating_sub(1),
            y: inner.y.saturating_sub(1),
            width: inner.width + 2,
            height: inner.height + 2,
        };

        self.render_field(frame, game_area, view.state);

        if view.mode == Mode::NameEntry {
            let popup = centered(game_area, 40, 8 + view.metrics.leaderboard.len() as u16);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_name_entry(view), popup);
        }

        let controls = self.render_controls(view.mode);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let screen_height = state.arena.height;
        let mut shapes = Vec::with_capacity(state.snake.len() + 5);
        state.draw(|rect, sprite| {
            shapes.push(FilledRect {
                rect,
                color: sprite_color(sprite),
                screen_height,
            })
        });

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .marker(Marker::HalfBlock)
            .background_color(BACKGROUND)
            .x_bounds([0.0, f64::from(state.arena.width)])
            .y_bounds([0.0, f64::from(screen_height)])
            .paint(|ctx| {
                for shape in &shapes {
                    ctx.draw(shape);
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, view: &View) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Runs: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_name_entry(&self, view: &View) -> Paragraph<'_> {
        let score = view.metrics.last_score.unwrap_or_default();
        let mut text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Name: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}_", view.name),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for (rank, entry) in view.metrics.leaderboard.iter().enumerate() {
            text.push(Line::from(vec![
                Span::styled(format!("{}. ", rank + 1), Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{:<20}", entry.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(entry.score.to_string(), Style::default().fg(Color::White)),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" High Scores "),
        )
    }

    fn render_controls(&self, mode: Mode) -> Paragraph<'_> {
        let text = match mode {
            Mode::Playing => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Mode::NameEntry => Line::from(vec![
                Span::styled("A-Z 0-9", Style::default().fg(Color::Cyan)),
                Span::raw(" to type | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to play again | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![text]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_fit_aspect_keeps_ratio() {
        let area = Rect::new(0, 0, 200, 30);
        let fitted = fit_aspect(area, 640, 480);

        assert_eq!(fitted.height, 30);
        assert_eq!(fitted.width, 80);
        assert_eq!(fitted.x, 60);
    }

    #[test]
    fn test_fit_aspect_narrow_area() {
        let area = Rect::new(0, 0, 40, 60);
        let fitted = fit_aspect(area, 640, 480);

        assert_eq!(fitted.width, 40);
        assert_eq!(fitted.height, 15);
        assert_eq!(fitted.y, 22);
    }

    #[test]
    fn test_render_playing_frame() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset().unwrap();
        let metrics = GameMetrics::new();
        let view = View {
            state: &state,
            mode: Mode::Playing,
            name: "",
            metrics: &metrics,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &view))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 10"));
        assert!(text.contains("Snake"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_render_name_entry_frame() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset().unwrap();
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(25);
        metrics.record_name("zed");
        metrics.on_game_over(17);
        let view = View {
            state: &state,
            mode: Mode::NameEntry,
            name: "amy",
            metrics: &metrics,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &view))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 17"));
        assert!(text.contains("amy_"));
        assert!(text.contains("zed"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset().unwrap();
        let metrics = GameMetrics::new();
        let view = View {
            state: &state,
            mode: Mode::NameEntry,
            name: "x",
            metrics: &metrics,
        };

        let mut terminal = Terminal::new(TestBackend::new(8, 4)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &view))
            .unwrap();
    }
}
