//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    follow::Position,
    grid::{Direction, Grid},
    highlight::Tint,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

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
        Screen::OptionsMenu(item) => options_menu(app, frame, *item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: &MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders a column of menu entries, highlighting the one at `active`.
fn menu_entries(frame: &mut Frame, layout: &[Rect], labels: &[String], active: usize) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, (label, area)) in labels.iter().zip(layout).enumerate() {
        let style = if idx == active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(label.as_str()).centered().style(style), *area);
    }
}

/// Renders the main menu screen with navigation options.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::MainMenu(3));
    let labels = ["Start".to_owned(), "Options".to_owned(), "Quit".to_owned()];
    let active = match item {
        MainMenuItem::StartGame => 0,
        MainMenuItem::Options => 1,
        MainMenuItem::Quit => 2,
    };

    menu_entries(frame, &inner_layout, &labels, active);
}

/// Renders the options menu screen with the current value of each setting.
pub(crate) fn options_menu(app: &App, frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::OptionsMenu(3));
    let mark = |on: bool| if on { "[x]" } else { "[ ]" };
    let labels = [
        format!("{} Animate carving", mark(app.config.animate)),
        format!("{} Show path", mark(app.config.show_path)),
        "Return".to_owned(),
    ];
    let active = match item {
        OptionsMenuItem::Animate => 0,
        OptionsMenuItem::ShowPath => 1,
        OptionsMenuItem::Back => 2,
    };

    menu_entries(frame, &inner_layout, &labels, active);
}

/// Raster extents of `grid` as (columns, rows).
///
/// Each cell takes one floor tile and shares wall tiles with its neighbors, so a `width` by
/// `height` maze spans `2 * width + 1` by `2 * height + 1` tiles.
pub(crate) const fn raster_size(grid: &Grid) -> (usize, usize) {
    (2 * grid.width() + 1, 2 * grid.height() + 1)
}

/// Raster tiles occupied by walls, as (column, row) with row 0 at the top.
///
/// Corner tiles are always walls; the tile between two floor tiles is a wall unless the passage
/// between those cells is open.
pub(crate) fn wall_tiles(grid: &Grid) -> Vec<(usize, usize)> {
    let (_, rows) = raster_size(grid);
    let flip = |rz: usize| rows - 1 - rz;
    let mut tiles = Vec::new();

    for z in 0..=grid.height() {
        for x in 0..=grid.width() {
            tiles.push((2 * x, flip(2 * z)));
        }
    }
    for cell in grid.cells() {
        let (x, z) = (2 * cell.coord().x + 1, 2 * cell.coord().z + 1);
        for dir in Direction::ALL {
            if cell.has_wall(dir) {
                let tile = match dir {
                    Direction::Left => (x - 1, z),
                    Direction::Right => (x + 1, z),
                    Direction::Bottom => (x, z - 1),
                    Direction::Top => (x, z + 1),
                };
                tiles.push((tile.0, flip(tile.1)));
            }
        }
    }

    tiles.sort_unstable();
    tiles.dedup();
    tiles
}

/// Transforms raster positions to screen coordinates for canvas rendering.
///
/// This function converts raster positions (col, row) to screen coordinates (x, y) using the
/// standard transformation formulas: coordinate[i] = (n - 1) / 2 - i for rows (ascending order) and
/// coordinate[i] = i - (n - 1) / 2 for columns (descending order).
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_to_screen_coords(
    tiles: &[(f64, f64)],
    columns: usize,
    rows: usize,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(rows)?);
    let cols_n = f64::from(u16::try_from(columns)?);

    Ok(tiles
        .iter()
        .map(|&(col, row)| (col - (cols_n - 1.) / 2., (rows_n - 1.) / 2. - row))
        .collect())
}

/// Converts integer raster tiles to the floating-point form the canvas uses.
fn tiles_as_points(tiles: &[(usize, usize)]) -> Result<Vec<(f64, f64)>> {
    tiles
        .iter()
        .map(|&(col, row)| -> Result<(f64, f64)> {
            Ok((f64::from(u16::try_from(col)?), f64::from(u16::try_from(row)?)))
        })
        .collect()
}

/// Raster position of the agent, as (column, row) with row 0 at the top.
pub(crate) fn agent_tile(app: &App) -> Result<(f64, f64)> {
    let (_, rows) = raster_size(&app.grid);
    let rows_n = f64::from(u16::try_from(rows)?);
    let Position { x, z } = app.follower.position();
    let cell_size = app.follower.cell_size();

    let col = 2.0_f64.mul_add(x / cell_size, 1.);
    let rz = 2.0_f64.mul_add(z / cell_size, 1.);
    Ok((col, rows_n - 1. - rz))
}

/// Canvas color of a tint.
const fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Plain => Color::Reset,
        Tint::Current => Color::Yellow,
        Tint::Visited => Color::Cyan,
        Tint::Backtrack => Color::Magenta,
        Tint::Path => Color::LightBlue,
    }
}

/// Renders the maze screen: walls, highlighted cells and the agent.
///
/// The maze is drawn on [`Canvas`] widgets, one raster tile per terminal cell, with the status line
/// and key hints in a tooltip below it.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let (columns, rows) = raster_size(&app.grid);

    // Create overall layout: maze area + tooltip at bottom
    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let space = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(rows)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(columns)?),
        Constraint::Min(1),
    ])
    .split(space)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before closures
    let wall_screen_coords =
        transform_to_screen_coords(&tiles_as_points(&wall_tiles(&app.grid))?, columns, rows)?;
    let tinted: Vec<(Color, Vec<(f64, f64)>)> = [
        Tint::Visited,
        Tint::Backtrack,
        Tint::Current,
        Tint::Path,
    ]
    .into_iter()
    .map(|tint| -> Result<(Color, Vec<(f64, f64)>)> {
        let tiles: Vec<(usize, usize)> = app
            .tints
            .tinted()
            .filter(|&(_, cell_tint)| cell_tint == tint)
            .map(|(coord, _)| (2 * coord.x + 1, rows - 2 - 2 * coord.z))
            .collect();
        Ok((
            tint_color(tint),
            transform_to_screen_coords(&tiles_as_points(&tiles)?, columns, rows)?,
        ))
    })
    .collect::<Result<_>>()?;
    let agent_screen_coords = transform_to_screen_coords(&[agent_tile(app)?], columns, rows)?;

    let x_bounds: [f64; 2] = [
        (-rounded_div::i32(space.width.into(), 2)).into(),
        (rounded_div::i32(space.width.into(), 2)).into(),
    ];
    let y_bounds: [f64; 2] = [
        (-rounded_div::i32(space.height.into(), 2)).into(),
        (rounded_div::i32(space.height.into(), 2)).into(),
    ];

    let maze = Canvas::default()
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_screen_coords,
                color: Color::Green,
            });
        });
    let highlights = Canvas::default()
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .marker(Marker::Dot)
        .paint(|ctx| {
            for (color, coords) in &tinted {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
            ctx.draw(&Points {
                coords: &agent_screen_coords,
                color: Color::Red,
            });
        });

    frame.render_widget(maze, space);
    frame.render_widget(highlights, space);

    // Render tooltip as a block at the bottom center with top border
    let tooltip_block = Block::bordered()
        .title("(space) solve / (r) reset / (g) regenerate / (h) return")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_area = tooltip_block.inner(tooltip_area);

    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(Line::raw(app.status.as_str()).centered(), status_area);

    Ok(())
}
