//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Side length of the (square) board, in cells
pub(crate) const GRID: i32 = 24;

/// Time between movements of the snake at the start of a game
pub(crate) const INITIAL_TICK_INTERVAL: Duration = Duration::from_millis(120);

/// The tick interval never drops below this, no matter how much has been
/// eaten
pub(crate) const MIN_TICK_INTERVAL: Duration = Duration::from_millis(55);

/// Factor by which the tick interval is multiplied each time the snake eats
pub(crate) const SPEED_UP_FACTOR: f64 = 0.98;

/// Length of the snake at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Upper bound on the real time credited to the scheduler for a single frame
pub(crate) const MAX_FRAME_DELTA: Duration = Duration::from_millis(1000);

/// How long the UI loop waits for input before running the scheduler again
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Number of random samples `place_food()` tries before falling back to
/// choosing among the free cells directly
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 4096;

/// Key under which the best score is kept in the key-value store
pub(crate) const BEST_SCORE_KEY: &str = "best-score";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 52,
    height: 29,
};

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph marking where the snake crashed
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Default style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Default style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Default style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
