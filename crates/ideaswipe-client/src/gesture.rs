//! Turns pointer or touch motion into swipe decisions.
//!
//! Two phases: while dragging, horizontal motion produces a live [`Preview`]
//! (card offset plus tilt, and a direction hint once past
//! [`PREVIEW_THRESHOLD`]); on release, motion past [`COMMIT_THRESHOLD`]
//! commits an accept or reject. Anything shorter snaps back.

/// Horizontal distance at which the preview starts hinting a direction.
pub const PREVIEW_THRESHOLD: f64 = 50.0;
/// Horizontal distance a release must exceed to commit a decision.
pub const COMMIT_THRESHOLD: f64 = 100.0;
pub const TRANSLATE_FACTOR: f64 = 0.5;
pub const ROTATE_FACTOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mouse pointers and individual touches each get their own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub rotate_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeHint {
    Left,
    Right,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    pub transform: Transform,
    pub hint: SwipeHint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Accept,
    Reject,
    /// Released short of the threshold; the card snaps back.
    Cancel,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    pointer: PointerId,
    origin: Point,
}

#[derive(Debug, Default)]
pub struct GestureController {
    drag: Option<Drag>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag. Ignored while another pointer is already dragging.
    pub fn press(&mut self, pointer: PointerId, at: Point) {
        if self.drag.is_none() {
            self.drag = Some(Drag { pointer, origin: at });
        }
    }

    pub fn move_to(&mut self, pointer: PointerId, at: Point) -> Option<Preview> {
        let drag = self.active(pointer)?;
        let dx = at.x - drag.origin.x;
        let dy = at.y - drag.origin.y;

        // Vertical-dominant motion is a scroll, not a swipe.
        if dx.abs() <= dy.abs() {
            return None;
        }

        let hint = if dx > PREVIEW_THRESHOLD {
            SwipeHint::Right
        } else if dx < -PREVIEW_THRESHOLD {
            SwipeHint::Left
        } else {
            SwipeHint::Neutral
        };

        Some(Preview {
            transform: Transform {
                translate_x: dx * TRANSLATE_FACTOR,
                rotate_deg: dx * ROTATE_FACTOR,
            },
            hint,
        })
    }

    /// End the drag (also used when the pointer leaves the card).
    /// Returns `None` if this pointer was not dragging.
    pub fn release(&mut self, pointer: PointerId, at: Point) -> Option<SwipeOutcome> {
        let drag = self.active(pointer)?;
        self.drag = None;

        let dx = at.x - drag.origin.x;
        let outcome = if dx.abs() > COMMIT_THRESHOLD {
            if dx > 0.0 {
                SwipeOutcome::Accept
            } else {
                SwipeOutcome::Reject
            }
        } else {
            SwipeOutcome::Cancel
        };
        Some(outcome)
    }

    fn active(&self, pointer: PointerId) -> Option<Drag> {
        self.drag.filter(|d| d.pointer == pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUSE: PointerId = PointerId(0);

    fn swipe(to: Point) -> (Option<Preview>, Option<SwipeOutcome>) {
        let mut g = GestureController::new();
        g.press(MOUSE, Point::new(100.0, 100.0));
        let preview = g.move_to(MOUSE, to);
        let outcome = g.release(MOUSE, to);
        assert!(!g.is_dragging());
        (preview, outcome)
    }

    #[test]
    fn long_right_swipe_accepts() {
        let (preview, outcome) = swipe(Point::new(220.0, 100.0));
        let preview = preview.unwrap();
        assert_eq!(preview.hint, SwipeHint::Right);
        assert_eq!(preview.transform.translate_x, 60.0);
        assert!((preview.transform.rotate_deg - 12.0).abs() < 1e-9);
        assert_eq!(outcome, Some(SwipeOutcome::Accept));
    }

    #[test]
    fn long_left_swipe_rejects() {
        let (preview, outcome) = swipe(Point::new(-20.0, 110.0));
        assert_eq!(preview.unwrap().hint, SwipeHint::Left);
        assert_eq!(outcome, Some(SwipeOutcome::Reject));
    }

    #[test]
    fn short_swipe_previews_but_cancels() {
        let (preview, outcome) = swipe(Point::new(150.0, 100.0));
        let preview = preview.unwrap();
        assert_eq!(preview.transform.translate_x, 25.0);
        assert_eq!(preview.hint, SwipeHint::Neutral);
        assert_eq!(outcome, Some(SwipeOutcome::Cancel));
    }

    #[test]
    fn hint_appears_before_commit() {
        let (preview, outcome) = swipe(Point::new(180.0, 100.0));
        assert_eq!(preview.unwrap().hint, SwipeHint::Right);
        assert_eq!(outcome, Some(SwipeOutcome::Cancel));
    }

    #[test]
    fn vertical_motion_is_not_a_swipe() {
        let (preview, outcome) = swipe(Point::new(100.0, 220.0));
        assert_eq!(preview, None);
        assert_eq!(outcome, Some(SwipeOutcome::Cancel));
    }

    #[test]
    fn exactly_threshold_does_not_commit() {
        let (_, outcome) = swipe(Point::new(200.0, 100.0));
        assert_eq!(outcome, Some(SwipeOutcome::Cancel));
    }

    #[test]
    fn release_uses_release_point_not_last_move() {
        let mut g = GestureController::new();
        g.press(MOUSE, Point::new(0.0, 0.0));
        g.move_to(MOUSE, Point::new(30.0, 0.0));
        assert_eq!(
            g.release(MOUSE, Point::new(140.0, 5.0)),
            Some(SwipeOutcome::Accept)
        );
    }

    #[test]
    fn events_without_press_are_ignored() {
        let mut g = GestureController::new();
        assert_eq!(g.move_to(MOUSE, Point::new(300.0, 0.0)), None);
        assert_eq!(g.release(MOUSE, Point::new(300.0, 0.0)), None);
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut g = GestureController::new();
        let touch = PointerId(7);
        g.press(MOUSE, Point::new(0.0, 0.0));
        g.press(touch, Point::new(500.0, 0.0));

        assert_eq!(g.move_to(touch, Point::new(900.0, 0.0)), None);
        assert_eq!(g.release(touch, Point::new(900.0, 0.0)), None);
        assert!(g.is_dragging());
        assert_eq!(
            g.release(MOUSE, Point::new(-150.0, 0.0)),
            Some(SwipeOutcome::Reject)
        );
    }
}
