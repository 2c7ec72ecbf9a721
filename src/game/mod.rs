mod direction;
mod grid;
mod render;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::Cell;
pub(crate) use self::render::Board;
use self::grid::place_food;
use self::snake::Snake;
use crate::consts;
use log::{debug, trace};
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// The complete state of one game of snake.
///
/// A `Game` only ever changes through [`Game::step()`] (one tick of
/// simulation) and the input methods [`Game::steer()`],
/// [`Game::toggle_pause()`], and [`Game::pause()`].  Restarting is done by
/// replacing the whole value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R> {
    rng: R,
    score: u32,
    snake: Snake,
    /// The most recent accepted direction change, applied on the next tick
    pending: Direction,
    /// `None` only once the snake has filled the entire board
    food: Option<Cell>,
    tick_interval: Duration,
    state: GameState,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(mut rng: R) -> Game<R> {
        let center = consts::GRID / 2;
        let snake = Snake::new(Cell::new(center, center), Direction::East);
        let food = place_food(&snake.occupied(), &mut rng);
        Game {
            rng,
            score: 0,
            pending: snake.direction(),
            snake,
            food,
            tick_interval: consts::INITIAL_TICK_INTERVAL,
            state: GameState::Running,
        }
    }

    /// Advance the simulation by one tick.  Does nothing if the game is
    /// paused or over.
    pub(crate) fn step(&mut self) -> Tick {
        if self.state != GameState::Running {
            return Tick::Idle;
        }
        // The buffered direction was checked against the direction at the
        // time it was entered, which may since have changed.
        if !self.pending.is_opposite(self.snake.direction()) {
            self.snake.turn(self.pending);
        }
        let next = self.snake.direction().advance(self.snake.head());
        if !next.in_bounds() {
            return self.end(Ending::Wall);
        }
        let will_eat = self.food == Some(next);
        if self.snake.would_collide(next, will_eat) {
            return self.end(Ending::SelfCollision);
        }
        self.snake.advance(next, will_eat);
        trace!("Snake head moved to ({}, {})", next.x, next.y);
        if will_eat {
            self.score += 1;
            self.tick_interval = self
                .tick_interval
                .mul_f64(consts::SPEED_UP_FACTOR)
                .max(consts::MIN_TICK_INTERVAL);
            debug!(
                "Ate food; score is now {}, tick interval is now {:?}",
                self.score, self.tick_interval
            );
            self.food = place_food(&self.snake.occupied(), &mut self.rng);
            if self.food.is_none() {
                return self.end(Ending::BoardFilled);
            }
            Tick::Ate
        } else {
            Tick::Moved
        }
    }
}

impl<R> Game<R> {
    /// Buffer a change of direction to be applied on the next tick.  A
    /// direction directly opposite the snake's current heading is ignored, as
    /// is any input after the game has ended.  Returns `true` if the
    /// direction was accepted.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        if self.is_over() || direction.is_opposite(self.snake.direction()) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Pause a running game or resume a paused one.  Returns `false` (and
    /// does nothing) if the game is over.
    pub(crate) fn toggle_pause(&mut self) -> bool {
        match self.state {
            GameState::Running => self.state = GameState::Paused,
            GameState::Paused => self.state = GameState::Running,
            GameState::Over(_) => return false,
        }
        true
    }

    /// Pause the game if it is running.  Returns `true` if the state changed.
    pub(crate) fn pause(&mut self) -> bool {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
            true
        } else {
            false
        }
    }

    fn end(&mut self, ending: Ending) -> Tick {
        self.state = GameState::Over(ending);
        Tick::Ended(ending)
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Cell> {
        self.food
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }

    pub(crate) fn is_over(&self) -> bool {
        matches!(self.state, GameState::Over(_))
    }
}

#[cfg(test)]
impl<R> Game<R> {
    pub(crate) fn set_food(&mut self, food: Option<Cell>) {
        self.food = food;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    Paused,
    Over(Ending),
}

/// How a game came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake tried to leave the board
    Wall,
    /// The snake ran into its own body
    SelfCollision,
    /// The snake has filled the board and there are no more cells to place
    /// food in.
    BoardFilled,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ending::Wall => "hit the wall",
            Ending::SelfCollision => "bit own tail",
            Ending::BoardFilled => "board filled",
        };
        f.pad(s)
    }
}

/// What happened during a call to [`Game::step()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Tick {
    /// The game was paused or already over, so nothing happened
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved one cell onto the food and grew
    Ate,
    /// The game ended on this tick
    Ended(Ending),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::{HashSet, VecDeque};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> Game<ChaCha12Rng> {
        let mut game = Game::new_with_rng(ChaCha12Rng::seed_from_u64(RNG_SEED));
        // Keep the food out of the way of the tests that don't care about it
        game.food = Some(Cell::new(0, 0));
        game
    }

    fn cells(game: &Game<ChaCha12Rng>) -> Vec<Cell> {
        game.snake.cells().collect()
    }

    fn assert_valid(game: &Game<ChaCha12Rng>) {
        let cells = cells(game);
        assert!(cells.iter().all(|c| c.in_bounds()), "{cells:?}");
        let distinct = cells.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), cells.len(), "{cells:?}");
        for (a, b) in cells.iter().zip(cells.iter().skip(1)) {
            let dist = (a.x - b.x).abs() + (a.y - b.y).abs();
            assert_eq!(dist, 1, "{cells:?}");
        }
        if let Some(food) = game.food {
            assert!(!cells.contains(&food), "food {food:?} on snake {cells:?}");
        }
    }

    #[test]
    fn fresh_game() {
        let game = Game::new_with_rng(ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(
            cells(&game),
            [Cell::new(12, 12), Cell::new(11, 12), Cell::new(10, 12)]
        );
        assert_eq!(game.snake.direction(), Direction::East);
        assert_eq!(game.score(), 0);
        assert_eq!(game.tick_interval(), consts::INITIAL_TICK_INTERVAL);
        assert_eq!(game.state(), GameState::Running);
        assert_valid(&game);
    }

    #[test]
    fn step_forward() {
        let mut game = new_game();
        assert_eq!(game.step(), Tick::Moved);
        assert_eq!(
            cells(&game),
            [Cell::new(13, 12), Cell::new(12, 12), Cell::new(11, 12)]
        );
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn wall_collision() {
        let mut game = new_game();
        game.snake.head = Cell::new(23, 12);
        game.snake.body = VecDeque::from([Cell::new(22, 12), Cell::new(21, 12)]);
        let before = cells(&game);
        assert_eq!(game.step(), Tick::Ended(Ending::Wall));
        assert_eq!(game.state(), GameState::Over(Ending::Wall));
        assert_eq!(cells(&game), before);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn eat_food() {
        let mut game = new_game();
        game.food = Some(Cell::new(13, 12));
        assert_eq!(game.step(), Tick::Ate);
        assert_eq!(
            cells(&game),
            [
                Cell::new(13, 12),
                Cell::new(12, 12),
                Cell::new(11, 12),
                Cell::new(10, 12)
            ]
        );
        assert_eq!(game.score(), 1);
        assert_eq!(
            game.tick_interval(),
            consts::INITIAL_TICK_INTERVAL.mul_f64(consts::SPEED_UP_FACTOR)
        );
        let food = game.food().unwrap();
        assert!(food.in_bounds());
        assert!(!cells(&game).contains(&food));
    }

    #[test]
    fn speed_floor() {
        let mut game = new_game();
        game.tick_interval = Duration::from_millis(56);
        game.food = Some(Cell::new(13, 12));
        assert_eq!(game.step(), Tick::Ate);
        assert_eq!(game.tick_interval(), consts::MIN_TICK_INTERVAL);
        game.food = Some(Cell::new(14, 12));
        assert_eq!(game.step(), Tick::Ate);
        assert_eq!(game.tick_interval(), consts::MIN_TICK_INTERVAL);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn self_collision() {
        let mut game = new_game();
        // A hook shape whose head is about to turn back into its own body
        game.snake.head = Cell::new(10, 10);
        game.snake.body = VecDeque::from([
            Cell::new(10, 11),
            Cell::new(11, 11),
            Cell::new(11, 10),
            Cell::new(11, 9),
        ]);
        game.snake.direction = Direction::North;
        assert!(game.steer(Direction::East));
        let before = cells(&game);
        assert_eq!(game.step(), Tick::Ended(Ending::SelfCollision));
        assert_eq!(cells(&game), before);
    }

    #[test]
    fn chase_own_tail() {
        let mut game = new_game();
        // A 2x2 loop: the head may move into the cell the tail is leaving
        game.snake.head = Cell::new(5, 5);
        game.snake.body = VecDeque::from([Cell::new(5, 6), Cell::new(4, 6), Cell::new(4, 5)]);
        game.snake.direction = Direction::North;
        game.pending = Direction::North;
        assert!(game.steer(Direction::West));
        assert_eq!(game.step(), Tick::Moved);
        assert_eq!(
            cells(&game),
            [
                Cell::new(4, 5),
                Cell::new(5, 5),
                Cell::new(5, 6),
                Cell::new(4, 6)
            ]
        );
    }

    #[test]
    fn tail_cell_with_food_is_collision() {
        let mut game = new_game();
        game.snake.head = Cell::new(5, 5);
        game.snake.body = VecDeque::from([Cell::new(5, 6), Cell::new(4, 6), Cell::new(4, 5)]);
        game.snake.direction = Direction::North;
        game.pending = Direction::West;
        game.food = Some(Cell::new(4, 5));
        assert_eq!(game.step(), Tick::Ended(Ending::SelfCollision));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn reversal_ignored() {
        let mut game = new_game();
        assert!(!game.steer(Direction::West));
        assert_eq!(game.step(), Tick::Moved);
        assert_eq!(game.snake.direction(), Direction::East);
        assert_eq!(game.snake.head(), Cell::new(13, 12));
    }

    #[test]
    fn last_intent_wins() {
        let mut game = new_game();
        assert!(game.steer(Direction::North));
        assert!(game.steer(Direction::South));
        assert_eq!(game.step(), Tick::Moved);
        assert_eq!(game.snake.head(), Cell::new(12, 13));
    }

    #[test]
    fn stale_pending_reversal_not_committed() {
        let mut game = new_game();
        // Buffered while heading north, but the snake is now heading south
        game.snake.direction = Direction::South;
        game.snake.head = Cell::new(12, 12);
        game.snake.body = VecDeque::from([Cell::new(12, 11), Cell::new(12, 10)]);
        game.pending = Direction::North;
        assert_eq!(game.step(), Tick::Moved);
        assert_eq!(game.snake.direction(), Direction::South);
        assert_eq!(game.snake.head(), Cell::new(12, 13));
    }

    #[rstest]
    #[case(GameState::Paused)]
    #[case(GameState::Over(Ending::Wall))]
    fn step_idempotent_when_stopped(#[case] state: GameState) {
        let mut game = new_game();
        game.state = state;
        let before = game.clone();
        for _ in 0..5 {
            assert_eq!(game.step(), Tick::Idle);
        }
        assert_eq!(game, before);
    }

    #[test]
    fn pause_toggle() {
        let mut game = new_game();
        assert!(game.toggle_pause());
        assert_eq!(game.state(), GameState::Paused);
        assert!(!game.pause());
        assert!(game.toggle_pause());
        assert_eq!(game.state(), GameState::Running);
        assert!(game.pause());
        assert_eq!(game.state(), GameState::Paused);
    }

    #[test]
    fn input_ignored_once_over() {
        let mut game = new_game();
        game.state = GameState::Over(Ending::SelfCollision);
        assert!(!game.toggle_pause());
        assert!(!game.pause());
        assert!(!game.steer(Direction::North));
        assert_eq!(game.state(), GameState::Over(Ending::SelfCollision));
    }

    #[test]
    fn board_filled() {
        let mut game = new_game();
        // Snake winding over every row but the last cell, which holds the food
        let mut path = Vec::new();
        for y in 0..consts::GRID {
            if y % 2 == 0 {
                path.extend((0..consts::GRID).map(|x| Cell::new(x, y)));
            } else {
                path.extend((0..consts::GRID).rev().map(|x| Cell::new(x, y)));
            }
        }
        // Row 23 is odd, so the path ends at (0, 23); that is the food cell.
        let food = path.pop().unwrap();
        let head = path.pop().unwrap();
        path.reverse();
        game.snake.head = head;
        game.snake.body = path.into_iter().collect();
        game.snake.direction = Direction::West;
        game.pending = Direction::West;
        game.food = Some(food);
        assert_eq!(game.step(), Tick::Ended(Ending::BoardFilled));
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake.len(), 576);
        assert_eq!(game.food(), None);
        assert_eq!(game.state(), GameState::Over(Ending::BoardFilled));
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let mut game = Game::new_with_rng(ChaCha12Rng::seed_from_u64(RNG_SEED));
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        for _ in 0..5000 {
            if rng.random_ratio(1, 4) {
                let _ = game.steer(directions[rng.random_range(0..directions.len())]);
            }
            let before = game.clone();
            match game.step() {
                Tick::Ended(_) => {
                    assert_eq!(cells(&game), cells(&before));
                    game = Game::new_with_rng(ChaCha12Rng::seed_from_u64(rng.random()));
                }
                Tick::Ate => {
                    assert_eq!(game.score(), before.score() + 1);
                    assert_eq!(game.snake.len(), before.snake.len() + 1);
                    assert!(game.tick_interval() >= consts::MIN_TICK_INTERVAL);
                }
                Tick::Moved => {
                    assert_eq!(game.score(), before.score());
                    assert_eq!(game.snake.len(), before.snake.len());
                }
                Tick::Idle => panic!("running game did not advance"),
            }
            assert_valid(&game);
        }
    }
}
