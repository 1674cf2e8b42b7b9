mod collision;
mod direction;
mod grid;
mod placement;
mod snake;
mod snapshot;
pub use self::collision::Collision;
pub use self::direction::Direction;
pub use self::grid::{Grid, GridError, Position};
use self::placement::{generate_obstacles, place_food};
use self::snake::Snake;
pub use self::snapshot::Snapshot;
use crate::consts;
use rand::{rngs::ThreadRng, Rng};
use std::time::Duration;

/// Parameters fixed for the lifetime of an [`Engine`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settings {
    /// The playing field
    pub grid: Grid,

    /// Number of obstacles placed at the start of each game
    pub obstacles: usize,

    /// Time between ticks at the initial speed
    pub tick_period: Duration,

    /// Shortest time between ticks, however fast the snake gets
    pub min_tick_period: Duration,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            grid: Grid::default(),
            obstacles: consts::DEFAULT_OBSTACLES,
            tick_period: consts::DEFAULT_TICK_PERIOD,
            min_tick_period: consts::DEFAULT_MIN_TICK_PERIOD,
        }
    }
}

/// Whether the game is still going
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameState {
    Running,
    /// The snake has collided with something.  No further ticks have any
    /// effect until the engine is reset.
    Over(Collision),
}

/// The simulation engine.  It owns all game state and advances it one step
/// per call to [`tick()`][Engine::tick].
#[derive(Clone, Debug)]
pub struct Engine<R = ThreadRng> {
    rng: R,
    settings: Settings,
    snake: Snake,
    food: Position,
    obstacles: Vec<Position>,
    score: u32,
    speed: f64,
    state: GameState,
}

impl Engine<ThreadRng> {
    /// Create an engine for a `rows × cols` grid of `block_size`-pixel cells,
    /// with the default number of obstacles and tick timing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any of the dimensions is zero.
    pub fn initialize(rows: u16, cols: u16, block_size: u16) -> Result<Self, GridError> {
        let grid = Grid::new(rows, cols, block_size)?;
        Ok(Engine::new(
            Settings {
                grid,
                ..Settings::default()
            },
            rand::rng(),
        ))
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine that draws its randomness from `rng`.  The food is
    /// placed first, then the obstacles.
    pub fn new(settings: Settings, mut rng: R) -> Engine<R> {
        let grid = settings.grid;
        let engine = Engine {
            snake: Snake::new(grid.start_position()),
            food: place_food(grid, &mut rng),
            obstacles: generate_obstacles(grid, settings.obstacles, &mut rng),
            rng,
            settings,
            score: 0,
            speed: consts::INITIAL_SPEED,
            state: GameState::Running,
        };
        log::debug!(
            "New {}×{} game; food at {}, obstacles at {:?}",
            grid.cols(),
            grid.rows(),
            engine.food,
            engine.obstacles
        );
        engine
    }

    /// Start a new game on the same grid with the same settings
    pub fn reset(&mut self) {
        let grid = self.settings.grid;
        self.snake = Snake::new(grid.start_position());
        self.food = place_food(grid, &mut self.rng);
        self.obstacles = generate_obstacles(grid, self.settings.obstacles, &mut self.rng);
        self.score = 0;
        self.speed = consts::INITIAL_SPEED;
        self.state = GameState::Running;
        log::debug!(
            "Game reset; food at {}, obstacles at {:?}",
            self.food,
            self.obstacles
        );
    }

    /// Advance the game by one step and return the resulting state.
    ///
    /// The food is eaten if the head is on it at the *start* of the tick, in
    /// which case the body keeps its last segment.  Once the game is over,
    /// this just returns the final state.
    pub fn tick(&mut self) -> Snapshot {
        if !self.running() {
            return self.snapshot();
        }
        let grid = self.settings.grid;
        let eaten = self.snake.head() == self.food;
        self.snake.advance(grid, eaten);
        if eaten {
            self.score += 1;
            self.speed += consts::SPEED_INCREMENT;
            log::debug!(
                "Food eaten at {}; score is now {}",
                self.food,
                self.score
            );
            self.food = place_food(grid, &mut self.rng);
        }
        if let Some(cause) =
            collision::detect(grid, self.snake.head(), self.snake.body(), &self.obstacles)
        {
            self.state = GameState::Over(cause);
            log::info!(
                "Game over: snake {cause} at {}; final score {}",
                self.snake.head(),
                self.score
            );
        }
        log::trace!(
            "Tick: head at {}, body length {}",
            self.snake.head(),
            self.snake.body().len()
        );
        self.snapshot()
    }
}

impl<R> Engine<R> {
    /// Steer the snake.  A request to turn directly around is ignored, as is
    /// any request made after the game is over.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.running() {
            log::debug!("Game is over; ignoring request to turn {direction}");
        } else if !self.snake.turn(direction) {
            log::debug!("Ignoring request to reverse direction to {direction}");
        }
    }

    /// Return the current state of the game
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            head: self.snake.head(),
            body: self.snake.body().iter().copied().collect(),
            food: self.food,
            obstacles: self.obstacles.clone(),
            score: self.score,
            game_over: !self.running(),
            cause: match self.state {
                GameState::Running => None,
                GameState::Over(cause) => Some(cause),
            },
        }
    }

    /// The time the driver should wait between ticks at the current speed
    pub fn tick_period(&self) -> Duration {
        self.settings
            .tick_period
            .div_f64(self.speed)
            .max(self.settings.min_tick_period)
    }

    /// Return the grid the game is played on
    pub fn grid(&self) -> Grid {
        self.settings.grid
    }

    /// The speed multiplier: 1 at the start, plus 0.1 per food eaten
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The snake's velocity as a unit vector; `(0, 0)` before the first turn
    pub fn velocity(&self) -> (i64, i64) {
        self.snake.velocity()
    }

    /// Return whether the game is running or how it ended
    pub fn state(&self) -> GameState {
        self.state
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A default 20×20 engine with no obstacles and the food tucked away in
    /// the bottom-right corner
    fn clear_engine() -> Engine<ChaCha12Rng> {
        let mut engine = Engine::new(Settings::default(), ChaCha12Rng::seed_from_u64(RNG_SEED));
        engine.obstacles.clear();
        engine.food = Position::new(475, 475);
        engine
    }

    fn assert_period<R>(engine: &Engine<R>, millis: u64) {
        let period = engine.tick_period();
        assert!(
            period.abs_diff(Duration::from_millis(millis)) < Duration::from_micros(1),
            "tick period is {period:?}, expected {millis}ms"
        );
    }

    #[test]
    fn initial_state() {
        let engine = Engine::new(Settings::default(), ChaCha12Rng::seed_from_u64(RNG_SEED));
        let snap = engine.snapshot();
        assert_eq!(snap.head, Position::new(125, 125));
        assert!(snap.body.is_empty());
        assert_eq!(snap.obstacles.len(), 5);
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
        assert_eq!(snap.cause, None);
        assert_eq!(engine.velocity(), (0, 0));
        assert_eq!(engine.state(), GameState::Running);
        assert_period(&engine, 100);
        let grid = engine.grid();
        for pos in snap.obstacles.iter().chain([&snap.food]) {
            assert!(grid.contains(*pos), "{pos} is off the grid");
            assert_eq!((pos.x % 25, pos.y % 25), (0, 0), "{pos} is not aligned");
        }
    }

    #[test]
    fn initialize_validates() {
        assert_eq!(
            Engine::initialize(20, 0, 25).unwrap_err(),
            GridError::NotPositive("cols")
        );
        let engine = Engine::initialize(20, 20, 25).unwrap();
        assert_eq!(engine.grid(), Grid::new(20, 20, 25).unwrap());
        assert_eq!(engine.snapshot().head, Position::new(125, 125));
    }

    #[test]
    fn motionless_tick() {
        let mut engine = clear_engine();
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(125, 125));
        assert!(snap.body.is_empty());
        assert!(!snap.game_over);
    }

    #[test]
    fn move_right() {
        let mut engine = clear_engine();
        engine.set_direction(Direction::Right);
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(150, 125));
        assert!(snap.body.is_empty());
        assert!(!snap.game_over);
    }

    #[test]
    fn wrap_at_right_edge() {
        let mut engine = clear_engine();
        engine.snake.head = Position::new(475, 125);
        engine.set_direction(Direction::Right);
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(0, 125));
        assert!(!snap.game_over);
    }

    #[test]
    fn wrap_at_top_edge() {
        let mut engine = clear_engine();
        engine.snake.head = Position::new(125, 0);
        engine.set_direction(Direction::Up);
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(125, 475));
        assert!(!snap.game_over);
    }

    #[test]
    fn obstacle_collision() {
        let mut engine = clear_engine();
        engine.obstacles = vec![Position::new(150, 125)];
        engine.score = 2;
        engine.snake.body = VecDeque::from([Position::new(100, 125), Position::new(75, 125)]);
        engine.set_direction(Direction::Right);
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(150, 125));
        assert!(snap.game_over);
        assert_eq!(snap.cause, Some(Collision::Obstacle));
        assert_eq!(snap.score, 2);
        assert_eq!(engine.state(), GameState::Over(Collision::Obstacle));
    }

    #[test]
    fn reverse_request_ignored() {
        let mut engine = clear_engine();
        engine.set_direction(Direction::Right);
        engine.set_direction(Direction::Left);
        assert_eq!(engine.velocity(), (1, 0));
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(150, 125));
    }

    #[test]
    fn last_request_wins() {
        let mut engine = clear_engine();
        engine.set_direction(Direction::Right);
        engine.set_direction(Direction::Down);
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(125, 150));
    }

    #[test]
    fn eat_food() {
        let mut engine = clear_engine();
        engine.food = Position::new(150, 125);
        engine.set_direction(Direction::Right);
        let snap = engine.tick();
        assert_eq!(snap.score, 0, "food is only eaten on the tick after arrival");
        let snap = engine.tick();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.head, Position::new(175, 125));
        assert_eq!(snap.body, vec![Position::new(150, 125)]);
        assert!(!snap.game_over);
        assert!(
            (engine.speed() - 1.1).abs() < 1e-9,
            "speed is {}, expected 1.1",
            engine.speed()
        );
        assert!(engine.tick_period() < Duration::from_millis(100));
        engine.food = Position::new(475, 475);
        let snap = engine.tick();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.head, Position::new(200, 125));
        assert_eq!(snap.body, vec![Position::new(175, 125)]);
    }

    #[test]
    fn tick_period_is_bounded() {
        let mut engine = clear_engine();
        engine.speed = 2.0;
        assert_period(&engine, 50);
        engine.speed = 10.0;
        assert_eq!(engine.tick_period(), Duration::from_millis(40));
    }

    #[test]
    fn self_collision() {
        let mut engine = clear_engine();
        engine.score = 6;
        engine.snake.body = VecDeque::from([
            Position::new(100, 125),
            Position::new(100, 100),
            Position::new(125, 100),
            Position::new(150, 100),
            Position::new(150, 125),
            Position::new(150, 150),
        ]);
        engine.set_direction(Direction::Right);
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(150, 125));
        assert!(snap.game_over);
        assert_eq!(snap.cause, Some(Collision::Body));
        assert_eq!(snap.body.len(), 6);
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        let mut engine = clear_engine();
        engine.score = 3;
        engine.snake.body = VecDeque::from([
            Position::new(125, 150),
            Position::new(150, 150),
            Position::new(150, 125),
        ]);
        engine.set_direction(Direction::Right);
        let snap = engine.tick();
        assert_eq!(snap.head, Position::new(150, 125));
        assert!(!snap.game_over);
    }

    #[test]
    fn eating_while_motionless_is_fatal() {
        let mut engine = clear_engine();
        engine.food = Position::new(125, 125);
        let snap = engine.tick();
        assert_eq!(snap.score, 1);
        assert!(snap.game_over);
        assert_eq!(snap.cause, Some(Collision::Body));
    }

    #[test]
    fn game_over_is_final() {
        let mut engine = clear_engine();
        engine.obstacles = vec![Position::new(150, 125)];
        engine.set_direction(Direction::Right);
        let over = engine.tick();
        assert!(over.game_over);
        engine.set_direction(Direction::Down);
        assert_eq!(engine.tick(), over);
        assert_eq!(engine.tick(), over);
    }

    #[test]
    fn no_turning_after_game_over() {
        let mut engine = clear_engine();
        engine.obstacles = vec![Position::new(125, 125)];
        let over = engine.tick();
        assert_eq!(over.cause, Some(Collision::Obstacle));
        engine.set_direction(Direction::Up);
        assert_eq!(engine.velocity(), (0, 0));
        assert_eq!(engine.tick(), over);
        engine.set_direction(Direction::Left);
        engine.set_direction(Direction::Down);
        assert_eq!(engine.velocity(), (0, 0));
        assert_eq!(engine.tick(), over);
    }

    #[test]
    fn reset_after_game_over() {
        let mut engine = clear_engine();
        engine.obstacles = vec![Position::new(150, 125)];
        engine.score = 4;
        engine.speed = 1.4;
        engine.set_direction(Direction::Right);
        assert!(engine.tick().game_over);
        engine.reset();
        let snap = engine.snapshot();
        assert_eq!(engine.state(), GameState::Running);
        assert_eq!(snap.head, Position::new(125, 125));
        assert!(snap.body.is_empty());
        assert_eq!(snap.obstacles.len(), 5);
        assert_eq!(snap.score, 0);
        assert_eq!(engine.velocity(), (0, 0));
        assert_period(&engine, 100);
    }

    #[test]
    fn same_seed_same_game() {
        let settings = Settings::default();
        let a = Engine::new(settings, ChaCha12Rng::seed_from_u64(RNG_SEED));
        let b = Engine::new(settings, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(a.snapshot(), b.snapshot());
    }

    fn direction(i: usize) -> Direction {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ][i % 4]
    }

    proptest! {
        #[test]
        fn invariants_hold(
            seed in any::<u64>(),
            obstacles in 0usize..6,
            turns in prop::collection::vec(prop::collection::vec(0usize..4, 0..3), 1..300),
        ) {
            let settings = Settings {
                grid: Grid::new(6, 7, 3).unwrap(),
                obstacles,
                ..Settings::default()
            };
            let mut engine = Engine::new(settings, ChaCha12Rng::seed_from_u64(seed));
            let grid = engine.grid();
            for requests in turns {
                let before = engine.snapshot();
                let (vx, vy) = engine.velocity();
                prop_assert_eq!(before.body.len(), usize::try_from(before.score).unwrap());
                for i in requests {
                    engine.set_direction(direction(i));
                    if (vx, vy) != (0, 0) {
                        prop_assert_ne!(engine.velocity(), (-vx, -vy));
                    }
                }
                let after = engine.tick();
                prop_assert!(grid.contains(after.head));
                prop_assert_eq!(after.head.x % 3, 0);
                prop_assert_eq!(after.head.y % 3, 0);
                if before.game_over {
                    prop_assert_eq!(&after, &before);
                } else {
                    let eaten = u32::from(before.head == before.food);
                    prop_assert_eq!(after.score, before.score + eaten);
                    prop_assert_eq!(&after.obstacles, &before.obstacles);
                    if after.game_over {
                        prop_assert!(after.cause.is_some());
                    } else {
                        prop_assert!(!after.body.contains(&after.head));
                    }
                }
            }
        }
    }
}
