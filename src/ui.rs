//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::{CellKind, Grid, Position},
    types::{MainMenuItem, Screen},
    App,
};

/// Returns the color a cell of the given kind is painted with.
pub(crate) const fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Wall => Color::Rgb(0x4b, 0x55, 0x63),
        CellKind::Path => Color::Rgb(0xf3, 0xf4, 0xf6),
        CellKind::Entrance => Color::Rgb(0x10, 0xb9, 0x81),
        CellKind::Exit => Color::Rgb(0xef, 0x44, 0x44),
        CellKind::Hazard => Color::Rgb(0xf5, 0x9e, 0x0b),
        CellKind::Reward => Color::Rgb(0x3b, 0x82, 0xf6),
        CellKind::Trail => Color::Rgb(0xa8, 0x55, 0xf7),
    }
}

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for a menu.
///
/// This function creates the centered, bordered block a menu is drawn in and returns one row of
/// layout per menu entry.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, title: &str, entries: u16) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(entries + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(title)
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); entries.into()]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with the "Play" and "Quit" options. It highlights the
/// currently selected option and provides visual feedback for user navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let entries = MainMenuItem::ALL;
    let inner_layout = init_menu(frame, "Main Menu", 2);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (entry, area) in entries.into_iter().zip(inner_layout.iter()) {
        let style = if entry == item {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(entry.label()).centered().style(style), *area);
    }
}

/// Transforms maze coordinates to screen coordinates for canvas rendering.
///
/// This function converts maze coordinates (col, row) to screen coordinates (x, y) using the
/// standard transformation formulas: coordinate[i] = (n - 1) / 2 - i for rows (ascending order) and
/// coordinate[i] = i - (n - 1) / 2 for columns (descending order).
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_maze_to_screen_coords(
    maze_coords: &[Position],
    grid: &Grid,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(grid.height())?);
    let cols_n = f64::from(u16::try_from(grid.width())?);

    maze_coords
        .iter()
        .map(|&(col, row)| {
            // Row transformation: coordinate[i] = (n - 1) / 2 - i
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(row)?);

            // Column transformation: coordinate[i] = i - (n - 1) / 2
            let screen_x = f64::from(u16::try_from(col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Groups the cells of the grid by kind and converts them to screen coordinates.
fn paint_layers(grid: &Grid) -> Result<Vec<(CellKind, Vec<(f64, f64)>)>> {
    CellKind::ALL
        .into_iter()
        .map(|kind| {
            let positions: Vec<Position> = grid
                .cells()
                .filter(|cell| cell.kind == kind)
                .map(|cell| cell.position)
                .collect();

            Ok((kind, transform_maze_to_screen_coords(&positions, grid)?))
        })
        .collect()
}

/// Renders the in-game screen with the maze, the player status and the controls.
///
/// This function clears the frame, paints every cell of the current maze in the color of its kind
/// on a [`Canvas`] and lists the level and health published by the session below it, together
/// with the available controls. Start is shown dimmed while a replay is in flight.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app.session.grid();
    let maze_rows = u16::try_from(grid.height())?;
    let maze_columns = u16::try_from(grid.width())?;

    // Create overall layout: maze area + status block at bottom
    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(4)])
        .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    let space = centered(maze_content_area, maze_columns, maze_rows)?;
    let status_area = centered(status_full_area, maze_columns.max(48), 4)?;

    let layers = paint_layers(grid)?;
    let half_width = f64::from(rounded_div::i32(i32::from(space.width) - 1, 2));
    let half_height = f64::from(rounded_div::i32(i32::from(space.height) - 1, 2));

    let maze = Canvas::default()
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .marker(Marker::Block)
        .paint(|ctx| {
            for (kind, coords) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: cell_color(*kind),
                });
            }
        });

    frame.render_widget(maze, space);

    let status = app.session.display().status();
    let max_health = app.session.player().max_health();

    let status_block = Block::bordered()
        .title("Status")
        .title_bottom(controls(app.session.is_busy()))
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP | Borders::BOTTOM);
    let inner_status = status_block.inner(status_area);
    frame.render_widget(status_block, status_area);

    let status_rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .split(inner_status);
    let level_line = Line::raw(format!(
        "Level {}  |  Health {}/{}",
        status.level, status.health, max_health
    ))
    .centered();
    frame.render_widget(
        level_line,
        *status_rows
            .first()
            .ok_or_eyre("failed to get status row from layout")?,
    );

    if let Some(notice) = &app.notice {
        frame.render_widget(
            Line::raw(notice.as_str()).centered(),
            *status_rows
                .last()
                .ok_or_eyre("failed to get notice row from layout")?,
        );
    }

    Ok(())
}

/// Centers a `width` by `height` rectangle inside `area`, shrinking it if the area is smaller.
fn centered(area: Rect, width: u16, height: u16) -> Result<Rect> {
    let row = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered row from vertical layout")?;

    Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(row)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered area from horizontal layout")
}

/// Builds the controls hint, dimming Start while it is disabled.
fn controls(busy: bool) -> Line<'static> {
    let start_style = if busy {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Green)
    };

    Line::from(vec![
        Span::styled("(s) start", start_style),
        Span::raw(" / (r) reset / (h) menu / (q) quit"),
    ])
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Config;

    /// Creates a minimal test app on a small seeded maze.
    fn create_test_app() -> App {
        App::new(&Config {
            width: 21,
            height: 11,
            seed: Some(4),
            ..Config::default()
        })
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    #[test]
    fn test_draw_main_menu() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
    }

    #[test]
    fn test_main_menu_each_selection() {
        let mut terminal = create_test_terminal();

        for item in MainMenuItem::ALL {
            let result = terminal.draw(|frame| main_menu(frame, item));
            assert!(result.is_ok(), "rendering main menu with {item:?} should succeed");
        }
    }

    #[test]
    fn test_init_menu_rows() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, "Main Menu", 2);
            assert_eq!(layout.len(), 2, "main menu should have 2 items");
        });

        assert!(result.is_ok(), "initializing main menu should succeed");
    }

    #[test]
    fn test_draw_in_game_shows_status() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;
        let mut terminal = create_test_terminal();

        let _ = terminal
            .draw(|frame| draw(&app, frame).expect("drawing should succeed in test"))
            .expect("terminal should draw");

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Level 1  |  Health 100/100"), "status line should be drawn");
        assert!(text.contains("(s) start"), "controls should be drawn");
    }

    #[test]
    fn test_draw_in_game_during_replay() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;
        let now = Instant::now();
        let _ = app.session.start(now);
        let _ = app.session.tick(now).expect("tick should succeed");
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("in-game should render successfully");
        });

        assert!(result.is_ok(), "rendering in-game during a replay should succeed");
        assert_eq!(
            app.session.grid().count(CellKind::Trail),
            1,
            "the entrance should be marked as trail"
        );
    }

    #[test]
    fn test_clear_function() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            clear(frame);
        });

        assert!(result.is_ok(), "clearing screen should succeed");
    }

    #[test]
    fn test_cell_colors_are_distinct() {
        let colors: Vec<Color> = CellKind::ALL.into_iter().map(cell_color).collect();

        for (index, color) in colors.iter().enumerate() {
            assert!(
                !colors.iter().skip(index + 1).any(|other| other == color),
                "{:?} shares its color",
                CellKind::ALL.get(index)
            );
        }
    }

    #[test]
    fn test_transform_centers_the_maze() {
        let grid = Grid::new(5, 3);

        let coords = transform_maze_to_screen_coords(&[(0, 0), (2, 1), (4, 2)], &grid)
            .expect("coordinates should convert");

        assert_eq!(
            coords,
            [(-2., 1.), (0., 0.), (2., -1.)],
            "maze center should map to the origin"
        );
    }

    #[test]
    fn test_paint_layers_cover_every_cell() {
        let app = create_test_app();
        let grid = app.session.grid();

        let layers = paint_layers(grid).expect("layers should convert");
        let painted: usize = layers.iter().map(|(_, coords)| coords.len()).sum();

        assert_eq!(layers.len(), CellKind::ALL.len(), "every kind should get a layer");
        assert_eq!(
            painted,
            grid.width() * grid.height(),
            "every cell should be painted once"
        );
    }
}
