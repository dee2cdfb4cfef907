use crate::models::Direction;

pub const DEFAULT_DRAG_THRESHOLD: i32 = 12;

/// Drag state of the card under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Committing { dx: i32, direction: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Commit(Direction),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct Drag {
    threshold: i32,
    origin: Option<i32>,
    state: DragState,
}

impl Drag {
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold: threshold.max(1),
            origin: None,
            state: DragState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Current horizontal displacement, 0 when idle.
    pub fn dx(&self) -> i32 {
        match self.state {
            DragState::Idle => 0,
            DragState::Committing { dx, .. } => dx,
        }
    }

    pub fn begin(&mut self, x: i32) {
        self.origin = Some(x);
        self.state = DragState::Idle;
    }

    /// Moves the pointer to absolute column `x`. Ignored unless a drag began.
    pub fn move_to(&mut self, x: i32) {
        let Some(origin) = self.origin else { return };
        self.set_dx(x - origin);
    }

    /// Sets the displacement directly (keyboard nudges, tests).
    pub fn set_dx(&mut self, dx: i32) {
        if self.origin.is_none() {
            self.origin = Some(0);
        }
        self.state = match Direction::from_dx(dx) {
            Some(direction) => DragState::Committing { dx, direction },
            None => DragState::Idle,
        };
    }

    /// Ends the drag. Only a displacement at or past the threshold commits.
    pub fn release(&mut self) -> Outcome {
        let outcome = match self.state {
            DragState::Committing { dx, direction } if dx.abs() >= self.threshold => {
                Outcome::Commit(direction)
            }
            _ => Outcome::Cancel,
        };
        self.cancel();
        outcome
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.state = DragState::Idle;
    }

    /// How close the drag is to committing, 0.0..=1.0, with its direction.
    pub fn intensity(&self) -> Option<(Direction, f32)> {
        match self.state {
            DragState::Idle => None,
            DragState::Committing { dx, direction } => {
                let ratio = dx.unsigned_abs() as f32 / self.threshold as f32;
                Some((direction, ratio.min(1.0)))
            }
        }
    }
}

impl Default for Drag {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_past_threshold_commits() {
        let mut drag = Drag::new(10);
        drag.begin(40);
        drag.move_to(52);
        assert_eq!(drag.release(), Outcome::Commit(Direction::Right));
        assert_eq!(drag.dx(), 0);

        drag.begin(40);
        drag.move_to(30);
        assert_eq!(drag.release(), Outcome::Commit(Direction::Left));
    }

    #[test]
    fn test_release_short_of_threshold_cancels() {
        let mut drag = Drag::new(10);
        drag.begin(40);
        drag.move_to(49);
        assert!(matches!(
            drag.state,
            DragState::Committing { dx: 9, direction: Direction::Right }
        ));
        assert_eq!(drag.release(), Outcome::Cancel);
        assert_eq!(drag.dx(), 0);
        assert!(!drag.is_active());
    }

    #[test]
    fn test_back_to_origin_is_idle() {
        let mut drag = Drag::new(10);
        drag.begin(5);
        drag.move_to(20);
        drag.move_to(5);
        assert_eq!(drag.state, DragState::Idle);
        assert_eq!(drag.release(), Outcome::Cancel);
    }

    #[test]
    fn test_move_without_begin_is_ignored() {
        let mut drag = Drag::new(10);
        drag.move_to(100);
        assert_eq!(drag.state, DragState::Idle);
        assert!(!drag.is_active());
    }

    #[test]
    fn test_intensity_is_clamped() {
        let mut drag = Drag::new(10);
        drag.set_dx(-5);
        assert_eq!(drag.intensity(), Some((Direction::Left, 0.5)));
        drag.set_dx(30);
        assert_eq!(drag.intensity(), Some((Direction::Right, 1.0)));
    }
}
