//! One-month-at-a-time navigation over a quarter window.
//!
//! The carousel never wraps: a gesture past either end of the window is a
//! no-op, as are out-of-range selections and swipes shorter than the
//! threshold. Every method that changes position returns the [`Transition`]
//! so the caller can animate it and recompute the month status.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{Month, QuarterWindow, WINDOW_LEN};

/// Visual direction of a transition. Carries no other meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    last_direction: Option<Direction>,
}

impl Carousel {
    /// Positions the carousel on `today`'s month, or the first month when
    /// `today` falls outside the window.
    pub fn reset(window: &QuarterWindow, today: NaiveDate) -> Self {
        let index = window.position(Month::of(today)).unwrap_or(0);
        Self {
            index,
            last_direction: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Dot states for the view; the active dot is `true`.
    pub fn dots(&self) -> [bool; WINDOW_LEN] {
        let mut dots = [false; WINDOW_LEN];
        dots[self.index] = true;
        dots
    }

    /// Jumps to `target`. Selecting the active dot is still a transition
    /// (reported as backward) so the view re-renders.
    pub fn select_index(&mut self, target: usize) -> Option<Transition> {
        if target >= WINDOW_LEN {
            tracing::debug!(requested = target, "ignoring out-of-range carousel selection");
            return None;
        }
        let direction = if target > self.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Some(self.move_to(target, direction))
    }

    /// Applies a horizontal gesture. Positive `delta_x` means the finger
    /// travelled left (start minus end), which advances.
    pub fn swipe(&mut self, delta_x: f64, threshold: f64) -> Option<Transition> {
        if delta_x.is_nan() || delta_x.abs() < threshold {
            return None;
        }
        if delta_x > 0.0 && self.index < WINDOW_LEN - 1 {
            Some(self.move_to(self.index + 1, Direction::Forward))
        } else if delta_x < 0.0 && self.index > 0 {
            Some(self.move_to(self.index - 1, Direction::Backward))
        } else {
            None
        }
    }

    /// Swipe from raw touch coordinates.
    pub fn swipe_between(&mut self, start_x: f64, end_x: f64, threshold: f64) -> Option<Transition> {
        self.swipe(start_x - end_x, threshold)
    }

    fn move_to(&mut self, target: usize, direction: Direction) -> Transition {
        let transition = Transition {
            from: self.index,
            to: target,
            direction,
        };
        self.index = target;
        self.last_direction = Some(direction);
        tracing::debug!(from = transition.from, to = target, ?direction, "carousel moved");
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Quarter;

    fn at(index: usize) -> Carousel {
        let mut carousel = Carousel::reset(
            &QuarterWindow::for_quarter(Quarter::Q2),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        );
        carousel.select_index(index);
        carousel
    }

    #[test]
    fn reset_finds_current_month() {
        let window = QuarterWindow::for_quarter(Quarter::Q2);
        let carousel = Carousel::reset(&window, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.last_direction(), None);
    }

    #[test]
    fn reset_falls_back_to_first_month() {
        let window = QuarterWindow::for_quarter(Quarter::Q1);
        let carousel = Carousel::reset(&window, NaiveDate::from_ymd_opt(2025, 11, 2).unwrap());
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn select_reports_direction() {
        let mut carousel = at(0);
        let forward = carousel.select_index(2).unwrap();
        assert_eq!(forward.direction, Direction::Forward);
        assert_eq!((forward.from, forward.to), (0, 2));

        let backward = carousel.select_index(1).unwrap();
        assert_eq!(backward.direction, Direction::Backward);
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut carousel = at(1);
        assert!(carousel.select_index(5).is_none());
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn swipe_below_threshold_is_ignored() {
        let mut carousel = at(1);
        assert!(carousel.swipe(49.9, 50.0).is_none());
        assert!(carousel.swipe(-20.0, 50.0).is_none());
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn swipe_does_not_wrap_at_boundaries() {
        let mut first = at(0);
        assert!(first.swipe(-100.0, 50.0).is_none());
        assert_eq!(first.index(), 0);

        let mut last = at(2);
        assert!(last.swipe(100.0, 50.0).is_none());
        assert_eq!(last.index(), 2);
    }

    #[test]
    fn swipe_from_middle_moves_one_step() {
        let mut left = at(1);
        assert_eq!(left.swipe(100.0, 50.0).unwrap().to, 2);

        let mut right = at(1);
        let transition = right.swipe(-100.0, 50.0).unwrap();
        assert_eq!(transition.to, 0);
        assert_eq!(transition.direction, Direction::Backward);
    }

    #[test]
    fn swipe_at_exact_threshold_moves() {
        let mut carousel = at(0);
        assert!(carousel.swipe(50.0, 50.0).is_some());
    }

    #[test]
    fn swipe_between_uses_start_minus_end() {
        let mut carousel = at(0);
        let transition = carousel.swipe_between(300.0, 120.0, 50.0).unwrap();
        assert_eq!(transition.direction, Direction::Forward);
        assert_eq!(carousel.dots(), [false, true, false]);
    }
}
