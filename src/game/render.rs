use super::grid::Cell;
use super::{Ending, Game, GameState};
use crate::config::StyleConfig;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// Width & height of the bordered board
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const BLOCK_SIDE: u16 = consts::GRID as u16 + 2;

/// Read-only view of a [`Game`] for drawing to the terminal, together with
/// the best score so far and the configured styles
#[derive(Debug)]
pub(crate) struct Board<'a, R> {
    game: &'a Game<R>,
    best_score: u32,
    styles: StyleConfig,
}

impl<'a, R> Board<'a, R> {
    pub(crate) fn new(game: &'a Game<R>, best_score: u32, styles: StyleConfig) -> Self {
        Board {
            game,
            best_score,
            styles,
        }
    }

    fn score_line(&self) -> Line<'static> {
        let ticks_per_sec = 1.0 / self.game.tick_interval().as_secs_f64();
        Line::styled(
            format!(
                " Score: {}   Best: {}   Speed: {ticks_per_sec:.1}/s",
                self.game.score(),
                self.best_score.max(self.game.score()),
            ),
            consts::SCORE_BAR_STYLE,
        )
    }

    fn status_lines(&self) -> [Line<'static>; 2] {
        match self.game.state() {
            GameState::Running => [
                Line::default(),
                key_help([("space", "Pause"), ("r", "Restart"), ("q", "Quit")]),
            ],
            GameState::Paused => [
                Line::from(" — PAUSED —"),
                key_help([("space", "Resume"), ("r", "Restart"), ("q", "Quit")]),
            ],
            GameState::Over(ending) => [
                Line::from(format!(" — GAME OVER ({ending}) —")),
                key_help([("r", "Restart"), ("q", "Quit")]),
            ],
        }
    }
}

/// Build a line of the form " Pause (space) — Quit (q)" with the keys
/// highlighted
fn key_help<const N: usize>(items: [(&'static str, &'static str); N]) -> Line<'static> {
    let mut line = Line::default();
    for (i, (key, label)) in items.into_iter().enumerate() {
        if i == 0 {
            line.push_span(format!(" {label} ("));
        } else {
            line.push_span(format!(") — {label} ("));
        }
        line.push_span(Span::styled(key, consts::KEY_STYLE));
    }
    if N > 0 {
        line.push_span(")");
    }
    line
}

impl<R> Widget for Board<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        self.score_line().render(score_area, buf);

        let block_area = center_rect(block_area, Size::new(BLOCK_SIDE, BLOCK_SIDE));
        Block::bordered().render(block_area, buf);

        let board_area = block_area.inner(Margin::new(1, 1));
        let mut canvas = Canvas {
            area: board_area,
            buf,
        };
        let snake = self.game.snake();
        for &cell in snake.body() {
            canvas.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, self.styles.snake);
        }
        if let Some(food) = self.game.food() {
            canvas.draw_cell(food, consts::FOOD_SYMBOL, self.styles.food);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if matches!(
            self.game.state(),
            GameState::Over(Ending::Wall | Ending::SelfCollision)
        ) {
            // The head never moved onto the cell it crashed into, so mark
            // that cell instead, unless it's off the board.
            let crash = snake.direction().advance(snake.head());
            if crash.in_bounds() {
                canvas.draw_cell(snake.head(), snake.head_symbol(), self.styles.snake);
                canvas.draw_cell(crash, consts::COLLISION_SYMBOL, self.styles.collision);
            } else {
                canvas.draw_cell(
                    snake.head(),
                    consts::COLLISION_SYMBOL,
                    self.styles.collision,
                );
            }
        } else {
            canvas.draw_cell(snake.head(), snake.head_symbol(), self.styles.snake);
        }

        let [msg1, msg2] = self.status_lines();
        msg1.render(msg1_area, buf);
        msg2.render(msg2_area, buf);
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let (Ok(cx), Ok(cy)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        let Some(x) = self.area.x.checked_add(cx) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(cy) else {
            return;
        };
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}
