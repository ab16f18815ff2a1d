/// Direction the snake can move
///
/// Screen coordinates grow to the right and downwards, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction pointing the other way
    pub fn reversed(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Input handed to one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Steer in a specific direction before moving
    Move(Direction),
    /// Keep the current direction
    Continue,
}

impl From<Option<Direction>> for Action {
    fn from(direction: Option<Direction>) -> Self {
        direction.map(Action::Move).unwrap_or(Action::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_deltas_are_unit_and_axis_aligned() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn test_reversed() {
        assert_eq!(Direction::Up.reversed(), Direction::Down);
        assert_eq!(Direction::Left.reversed(), Direction::Right);
        assert_eq!(Direction::Right.reversed().reversed(), Direction::Right);
    }

    #[test]
    fn test_action_from_pending() {
        assert_eq!(Action::from(Some(Direction::Up)), Action::Move(Direction::Up));
        assert_eq!(Action::from(None), Action::Continue);
    }
}
