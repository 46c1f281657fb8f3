use super::math::segment_length;
use crate::cluster::Point;

/// Motion status of a track.
///
/// Starts as `Moving`. The only legal transition is `Moving -> Stationary`;
/// a stationary track never becomes moving again, even if later scans look
/// like a moving object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Moving,
    Stationary,
}

impl Default for MotionState {
    fn default() -> Self {
        MotionState::Moving
    }
}

impl MotionState {
    #[inline]
    pub fn is_moving(self) -> bool {
        self == MotionState::Moving
    }

    /// Folds one scan's verdict into the state. Returns the new state and
    /// whether this call performed the transition.
    #[inline]
    pub fn observe(self, stationary: bool) -> (Self, bool) {
        match (self, stationary) {
            (MotionState::Moving, true) => (MotionState::Stationary, true),
            (state, _) => (state, false),
        }
    }
}

/// Shape heuristic over a simplified polyline.
#[derive(Debug, Clone, Copy)]
pub struct MotionClassifier {
    pub segment_threshold: f64,
}

impl Default for MotionClassifier {
    fn default() -> Self {
        Self {
            segment_threshold: 0.8,
        }
    }
}

impl MotionClassifier {
    pub fn new(segment_threshold: f64) -> Self {
        Self { segment_threshold }
    }

    /// `true` when the polyline looks like static structure: more than three
    /// vertices (a corner or clutter), or a single segment longer than
    /// `segment_threshold` (a wall).
    ///
    /// `false` means "no evidence", not "moving".
    pub fn classify(&self, polyline: &[Point]) -> bool {
        match polyline.len() {
            n if n > 3 => true,
            2 => segment_length(&polyline[0], &polyline[1]) > self.segment_threshold,
            _ => false,
        }
    }
}
