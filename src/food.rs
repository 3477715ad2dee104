use rand::Rng;

use crate::config::{GameConfig, GridSize};
use crate::snake::{Position, Snake};

/// Display color class of a food item.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ColorTag {
    Red,
    Blue,
}

/// Food type and associated metadata.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Special { bonus: u32 },
}

/// Food entity currently active on the board.
///
/// Collision only ever looks at `position`, even for the larger special
/// footprint.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
        }
    }

    #[must_use]
    pub fn special(position: Position, bonus: u32) -> Self {
        Self {
            position,
            kind: FoodKind::Special { bonus },
        }
    }

    /// Edge length of the drawn footprint, in grid cells.
    #[must_use]
    pub fn size(self) -> u16 {
        match self.kind {
            FoodKind::Normal => 1,
            FoodKind::Special { .. } => 2,
        }
    }

    #[must_use]
    pub fn color_tag(self) -> ColorTag {
        match self.kind {
            FoodKind::Normal => ColorTag::Red,
            FoodKind::Special { .. } => ColorTag::Blue,
        }
    }

    /// Applies what eating this food does: growth, plus the bonus for
    /// special food. The base point for eating is not included.
    pub fn apply_effect(self, snake: &mut Snake, score: &mut u32) {
        snake.grow();
        if let FoodKind::Special { bonus } = self.kind {
            *score = score.saturating_add(bonus);
        }
    }

    /// Spawns food on a free cell, or `None` when the snake covers the grid.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        config: &GameConfig,
        snake: &Snake,
        score: u32,
    ) -> Option<Self> {
        let position = spawn_position(rng, config.grid, snake)?;
        let kind = kind_for_score(score, config);
        Some(Self { position, kind })
    }
}

/// Special while the score is a positive multiple of the configured modulus.
#[must_use]
pub fn kind_for_score(score: u32, config: &GameConfig) -> FoodKind {
    if score > 0 && score % config.special_food_modulus == 0 {
        FoodKind::Special {
            bonus: config.special_food_bonus,
        }
    } else {
        FoodKind::Normal
    }
}

/// Samples uniformly random cells until one is not covered by the snake.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if !has_free_cell(bounds, snake) {
        return None;
    }

    loop {
        let position = Position::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );
        if !snake.occupies(position) {
            return Some(position);
        }
    }
}

fn has_free_cell(bounds: GridSize, snake: &Snake) -> bool {
    // Fewer segments than cells always leaves a gap.
    if snake.len() < bounds.total_cells() {
        return true;
    }
    bounds.cells().any(|cell| !snake.occupies(cell))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::{GameConfig, GridSize};
    use crate::input::Direction;

    use super::{kind_for_score, spawn_position, ColorTag, Food, FoodKind};
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
            ],
            Direction::Left,
        );
        let bounds = GridSize {
            width: 3,
            height: 2,
        };

        for _ in 0..200 {
            let food_position =
                spawn_position(&mut rng, bounds, &snake).expect("two cells are still free");
            assert!(!snake.occupies(food_position));
            assert!(food_position.is_within_bounds(bounds));
        }
    }

    #[test]
    fn spawn_on_full_grid_returns_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
            ],
            Direction::Up,
        );
        let bounds = GridSize {
            width: 2,
            height: 2,
        };

        assert_eq!(spawn_position(&mut rng, bounds, &snake), None);
    }

    #[test]
    fn kind_depends_only_on_score() {
        let config = GameConfig::default();

        assert_eq!(kind_for_score(0, &config), FoodKind::Normal);
        assert_eq!(kind_for_score(4, &config), FoodKind::Normal);
        assert_eq!(kind_for_score(5, &config), FoodKind::Special { bonus: 10 });
        assert_eq!(kind_for_score(6, &config), FoodKind::Normal);
        assert_eq!(kind_for_score(15, &config), FoodKind::Special { bonus: 10 });
    }

    #[test]
    fn special_food_is_larger_and_blue() {
        let normal = Food::normal(Position::new(1, 1));
        let special = Food::special(Position::new(2, 2), 10);

        assert_eq!(normal.size(), 1);
        assert_eq!(normal.color_tag(), ColorTag::Red);
        assert_eq!(special.size(), 2);
        assert_eq!(special.color_tag(), ColorTag::Blue);
    }

    #[test]
    fn effects_grow_and_special_adds_bonus() {
        let mut snake = Snake::new(Position::new(3, 3), Direction::Right);
        let mut score = 7;

        Food::normal(Position::new(0, 0)).apply_effect(&mut snake, &mut score);
        assert!(snake.grow_pending());
        assert_eq!(score, 7);

        Food::special(Position::new(0, 0), 10).apply_effect(&mut snake, &mut score);
        assert_eq!(score, 17);

        snake.move_forward();
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn huge_bonus_saturates_score() {
        let mut snake = Snake::new(Position::new(3, 3), Direction::Right);
        let mut score = 1;

        Food::special(Position::new(0, 0), u32::MAX).apply_effect(&mut snake, &mut score);

        assert_eq!(score, u32::MAX);
    }
}
