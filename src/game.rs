use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, GameConfig, GridSize};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::Snake;

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    SelfCollision,
    WallCollision,
    /// No free cell was left for new food.
    BoardFilled,
}

/// Current high-level gameplay state. `Over` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Over(EndReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct Game {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub status: GameStatus,
    pub tick_count: u64,
    config: GameConfig,
    rng: StdRng,
}

impl Game {
    /// Creates a game whose food placement is seeded from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::new(config.start, Direction::Right);
        let food =
            Food::spawn(&mut rng, &config, &snake, 0).ok_or(ConfigError::GridTooSmall {
                width: config.grid.width,
                height: config.grid.height,
            })?;
        debug!("new game on {:?}, first food at {:?}", config.grid, food.position);

        Ok(Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            tick_count: 0,
            config,
            rng,
        })
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// The snake always moves first. Food is resolved before the collision
    /// checks, so a fatal move still scores the food it lands on.
    pub fn update(&mut self) {
        if self.is_over() {
            debug!("update ignored, game is over");
            return;
        }

        self.tick_count += 1;
        self.snake.move_forward();

        let mut board_filled = false;
        if self.snake.head() == self.food.position {
            let eaten = self.food;
            eaten.apply_effect(&mut self.snake, &mut self.score);

            match Food::spawn(&mut self.rng, &self.config, &self.snake, self.score) {
                Some(food) => {
                    debug!("spawned {:?} at {:?}", food.kind, food.position);
                    self.food = food;
                }
                None => board_filled = true,
            }

            self.score = self.score.saturating_add(1);
            debug!("ate {:?}, score {}", eaten.kind, self.score);
        }

        let head = self.snake.head();
        let reason = if self.snake.head_overlaps_body() {
            Some(EndReason::SelfCollision)
        } else if !head.is_within_bounds(self.config.grid) {
            Some(EndReason::WallCollision)
        } else if board_filled {
            Some(EndReason::BoardFilled)
        } else {
            None
        };

        if let Some(reason) = reason {
            info!(
                "game over after {} ticks: {reason:?}, score {}",
                self.tick_count, self.score
            );
            self.status = GameStatus::Over(reason);
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.status {
            GameStatus::Over(reason) => Some(reason),
            GameStatus::Running => None,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GameConfig, GridSize};
    use crate::food::{Food, FoodKind};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{EndReason, Game, GameStatus};

    fn game_on(width: u16, height: u16, seed: u64) -> Game {
        let config = GameConfig {
            grid: GridSize { width, height },
            start: Position::new(0, 0),
            ..GameConfig::default()
        };
        Game::with_seed(config, seed).expect("test config should be valid")
    }

    #[test]
    fn new_game_starts_running_at_start_cell() {
        let game = Game::with_seed(GameConfig::default(), 9).expect("default config is valid");

        assert_eq!(game.status, GameStatus::Running);
        assert_eq!(game.score, 0);
        assert_eq!(game.snake.head(), Position::new(5, 5));
        assert_eq!(game.snake.direction(), Direction::Right);
        assert_eq!(game.food.kind, FoodKind::Normal);
        assert!(!game.snake.occupies(game.food.position));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut game = game_on(10, 10, 1);
        game.snake = Snake::new(Position::new(1, 1), Direction::Right);
        game.food = Food::normal(Position::new(2, 1));

        game.update();
        assert_eq!(game.snake.len(), 1);
        assert!(game.snake.grow_pending());

        game.food = Food::normal(Position::new(9, 9));
        game.update();
        assert_eq!(game.snake.len(), 2);
    }

    #[test]
    fn score_increments_by_one_for_normal_food() {
        let mut game = game_on(10, 10, 4);
        game.snake = Snake::new(Position::new(5, 5), Direction::Right);
        game.food = Food::normal(Position::new(6, 5));

        game.update();

        assert_eq!(game.score, 1);
        assert_ne!(game.food.position, Position::new(6, 5));
    }

    #[test]
    fn special_food_adds_bonus_and_base_point() {
        let mut game = game_on(10, 10, 5);
        game.snake = Snake::new(Position::new(5, 5), Direction::Right);
        game.food = Food::special(Position::new(6, 5), 10);
        game.score = 2;

        game.update();

        assert_eq!(game.score, 13);
    }

    #[test]
    fn food_regenerated_at_multiple_of_five_is_special() {
        let mut game = game_on(10, 10, 6);
        game.snake = Snake::new(Position::new(1, 1), Direction::Right);
        game.food = Food::normal(Position::new(2, 1));
        game.score = 5;

        game.update();

        assert_eq!(game.food.kind, FoodKind::Special { bonus: 10 });
        assert_eq!(game.score, 6);
    }

    #[test]
    fn kind_uses_score_before_base_point() {
        let mut game = game_on(10, 10, 7);
        game.snake = Snake::new(Position::new(1, 1), Direction::Right);
        game.food = Food::normal(Position::new(2, 1));
        game.score = 4;

        game.update();

        assert_eq!(game.score, 5);
        assert_eq!(game.food.kind, FoodKind::Normal);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut game = game_on(4, 4, 2);
        game.snake = Snake::new(Position::new(3, 1), Direction::Right);
        game.food = Food::normal(Position::new(0, 3));

        game.update();

        assert_eq!(game.status, GameStatus::Over(EndReason::WallCollision));
    }

    #[test]
    fn moving_onto_edge_cell_is_safe() {
        let mut game = game_on(4, 4, 2);
        game.snake = Snake::new(Position::new(1, 1), Direction::Left);
        game.food = Food::normal(Position::new(3, 3));

        game.update();
        assert_eq!(game.snake.head(), Position::new(0, 1));
        assert_eq!(game.status, GameStatus::Running);

        game.update();
        assert_eq!(game.status, GameStatus::Over(EndReason::WallCollision));
    }

    #[test]
    fn leaving_through_the_bottom_edge_is_game_over() {
        let mut game = game_on(4, 4, 12);
        game.snake = Snake::new(Position::new(2, 2), Direction::Down);
        game.food = Food::normal(Position::new(0, 0));

        game.update();
        assert_eq!(game.snake.head(), Position::new(2, 3));
        assert_eq!(game.status, GameStatus::Running);

        game.update();
        assert_eq!(game.snake.head(), Position::new(2, 4));
        assert_eq!(game.status, GameStatus::Over(EndReason::WallCollision));
    }

    #[test]
    fn oversized_bonus_from_config_does_not_overflow() {
        let config = GameConfig {
            grid: GridSize {
                width: 10,
                height: 10,
            },
            start: Position::new(0, 0),
            special_food_bonus: u32::MAX,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
        let mut game = Game::with_seed(config, 13).expect("config is valid");
        game.snake = Snake::new(Position::new(5, 5), Direction::Right);
        game.food = Food::special(Position::new(6, 5), config.special_food_bonus);
        game.score = 1;

        game.update();

        assert_eq!(game.score, u32::MAX);
        assert_eq!(game.status, GameStatus::Running);
        assert_eq!(game.end_reason(), None);
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut game = game_on(6, 6, 3);
        game.snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Up,
        );
        game.snake.set_direction(Direction::Left);
        game.food = Food::normal(Position::new(5, 5));

        game.update();

        assert_eq!(game.status, GameStatus::Over(EndReason::SelfCollision));
        assert_eq!(game.end_reason(), Some(EndReason::SelfCollision));
    }

    #[test]
    fn eating_into_the_wall_keeps_the_points() {
        let mut game = game_on(4, 4, 8);
        game.snake = Snake::from_segments(
            vec![Position::new(3, 2), Position::new(2, 2)],
            Direction::Right,
        );
        // Food just outside the grid can only be placed by hand.
        game.food = Food::normal(Position::new(4, 2));

        game.update();

        assert_eq!(game.score, 1);
        assert!(game.snake.grow_pending());
        assert_eq!(game.status, GameStatus::Over(EndReason::WallCollision));
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut game = game_on(2, 2, 11);
        game.snake = Snake::from_segments(
            vec![Position::new(1, 0), Position::new(0, 0), Position::new(0, 1)],
            Direction::Down,
        );
        game.snake.grow();
        game.food = Food::normal(Position::new(1, 1));

        game.update();

        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.score, 1);
        assert_eq!(game.status, GameStatus::Over(EndReason::BoardFilled));
    }

    #[test]
    fn update_after_game_over_is_ignored() {
        let mut game = game_on(4, 4, 2);
        game.snake = Snake::new(Position::new(3, 1), Direction::Right);
        game.update();
        let head = game.snake.head();
        let ticks = game.tick_count;

        game.update();

        assert_eq!(game.snake.head(), head);
        assert_eq!(game.tick_count, ticks);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            start: Position::new(-1, 0),
            ..GameConfig::default()
        };

        assert!(Game::with_seed(config, 0).is_err());
    }
}
