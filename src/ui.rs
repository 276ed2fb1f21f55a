use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::game::{CellView, GameLoop, Status};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
pub const ACTIVE_GLYPH: &str = "##";
pub const SETTLED_GLYPH: &str = "@@";
pub const EMPTY_GLYPH: &str = " .";
const PANEL_WIDTH: u16 = 16;

pub fn glyph(view: CellView) -> (&'static str, Style) {
    match view {
        CellView::Active => (ACTIVE_GLYPH, Style::default().fg(Color::Yellow)),
        CellView::Settled => (SETTLED_GLYPH, Style::default().fg(Color::Cyan)),
        CellView::Empty => (EMPTY_GLYPH, Style::default().fg(Color::DarkGray)),
    }
}

/// Plain-text redraw of the whole grid, one line per row.
pub fn grid_lines(game: &GameLoop) -> Vec<String> {
    game.cell_views()
        .iter()
        .map(|row| row.iter().map(|&view| glyph(view).0).collect())
        .collect()
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render(frame: &mut Frame, game: &GameLoop) {
    let area = frame.size();
    let size = game.grid_size();

    // Validated configs stay far below u16::MAX; oversized grids are clipped, not wrapped.
    let cols = u16::try_from(size.x).unwrap_or(u16::MAX);
    let rows = u16::try_from(size.y).unwrap_or(u16::MAX);
    let grid_width = cols.saturating_mul(CELL_WIDTH).saturating_add(2);
    let grid_height = rows.saturating_add(2);
    let main_area = centered_rect(
        grid_width.saturating_add(PANEL_WIDTH),
        grid_height.saturating_add(2),
        area,
    );

    let vertical =
        Layout::vertical([Constraint::Length(grid_height), Constraint::Fill(1)]).split(main_area);
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_width),
        Constraint::Length(PANEL_WIDTH),
    ])
    .split(vertical[0]);

    render_grid(frame, game, horizontal[0]);
    render_status(frame, game, horizontal[1]);

    let hint = Line::from("↑: Rotate | ←→↓: Move | P: Pause | Q/ESC/^C: Quit");
    let controls = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(controls, vertical[1]);
}

fn render_grid(frame: &mut Frame, game: &GameLoop, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .cell_views()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&view| {
                    let (symbol, style) = glyph(view);
                    Span::styled(symbol, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status(frame: &mut Frame, game: &GameLoop, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Status ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (label, color) = match game.status {
        Status::Running => ("RUNNING", Color::Green),
        Status::Paused => ("PAUSED", Color::Yellow),
        Status::ToppedOut => ("TOPPED OUT", Color::Red),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(label, Style::default().fg(color))),
        Line::from(""),
        Line::from(Span::styled("Piece", Style::default().fg(Color::Cyan))),
        Line::from(format!("{:?}", game.piece.kind())),
        Line::from(""),
        Line::from(Span::styled("Settled", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", game.board.total_filled_cells())),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}
