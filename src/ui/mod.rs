use tui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::game::Grid;

mod scene;
pub use scene::{DrawCommand, MenuItem, MenuView, Scene, Shade};

/// Each tile is drawn as two terminal cells so it comes out roughly square.
const TILE_CELLS: u16 = 2;

/// Paint a presented scene, command by command, over the whole terminal.
pub fn render<B: Backend>(f: &mut Frame<B>, scene: &Scene) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Score
            Constraint::Min(1),    // Board
        ].as_ref())
        .split(size);

    for command in scene.commands() {
        match command {
            DrawCommand::Grid(grid) => render_grid(f, grid, chunks[1]),
            DrawCommand::Score(score) => render_score(f, *score, chunks[0]),
            DrawCommand::Shade(shade) => f.render_widget(ShadeOverlay(*shade), size),
            DrawCommand::Menu(view) => render_menu(f, view, size),
        }
    }
}

fn tile_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn render_grid<B: Backend>(f: &mut Frame<B>, grid: &Grid, area: Rect) {
    let board_width = (grid.width().max(0) as u16).saturating_mul(TILE_CELLS);
    let board_height = grid.height().max(0) as u16;
    let board = centered_fixed(board_width, board_height, area);

    let lines: Vec<Line> = (0..grid.height())
        .map(|y| {
            let spans: Vec<Span> = grid
                .row(y)
                .iter()
                .map(|tile| Span::styled("  ", Style::default().bg(tile_color(tile.rgb()))))
                .collect();
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), board);
}

fn render_score<B: Backend>(f: &mut Frame<B>, score: u32, area: Rect) {
    let score_area = centered_fixed(20, 3, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = Paragraph::new(Line::from(vec![
        Span::raw("Score: "),
        Span::styled(
            score.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, score_area);
}

/// Darkens every cell drawn so far.
struct ShadeOverlay(Shade);

impl Widget for ShadeOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = buf.get_mut(x, y);
                cell.bg = shade_color(cell.bg, self.0);
                cell.fg = shade_color(cell.fg, self.0);
            }
        }
    }
}

fn shade_color(color: Color, shade: Shade) -> Color {
    let (r, g, b) = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Reset | Color::Black => (0, 0, 0),
        _ => (128, 128, 128),
    };
    match shade {
        Shade::Dim => Color::Rgb(r / 3, g / 3, b / 3),
        Shade::Danger => Color::Rgb((r / 3).saturating_add(90), g / 4, b / 4),
    }
}

fn render_menu<B: Backend>(f: &mut Frame<B>, view: &MenuView, area: Rect) {
    let mut content = Vec::new();
    if let Some(subtitle) = &view.subtitle {
        content.push(Line::from(Span::styled(
            subtitle.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        content.push(Line::from(""));
    }

    if view.horizontal {
        let mut spans = Vec::new();
        for (index, item) in view.items.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw("   "));
            }
            spans.extend(item_spans(item, index == view.selected));
        }
        content.push(Line::from(spans));
    } else {
        for (index, item) in view.items.iter().enumerate() {
            content.push(Line::from(item_spans(item, index == view.selected)));
        }
    }

    if let Some(footer) = &view.footer {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            footer.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widest = content.iter().map(|line| line.width()).max().unwrap_or(0);
    let width = (widest.max(view.title.len()) as u16).saturating_add(8);
    let height = (content.len() as u16).saturating_add(4);
    let popup = centered_fixed(width, height, area);

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup);
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let menu = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(menu, inner.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    }));
}

fn item_spans(item: &MenuItem, selected: bool) -> Vec<Span<'static>> {
    let mut style = if selected {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if item.struck {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }

    let mut spans = vec![Span::styled(format!(" {} ", item.label), style)];
    if let Some(level) = item.level {
        let filled = level.min(10) as usize;
        spans.push(Span::raw(" "));
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(Color::Green)));
        spans.push(Span::styled(
            "░".repeat(10 - filled),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}

/// A `width` x `height` rectangle centered in `r`, clipped to it.
fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}
