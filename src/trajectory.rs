use crate::cluster::Point;
use crate::error::Error;

use serde_derive::{Deserialize, Serialize};

/// Planar pose stamped with the frame it is expressed in. Orientation is
/// not tracked; poses are positions with identity rotation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pose {
    pub frame_id: String,
    pub position: Point,
    // seconds
    pub stamp: f64,
}

impl Pose {
    pub fn new(frame_id: &str, position: Point, stamp: f64) -> Self {
        Self {
            frame_id: frame_id.to_string(),
            position,
            stamp,
        }
    }
}

/// Frame lookup service supplied by the host application.
pub trait FrameTransform {
    fn can_transform(&self, target: &str, source: &str) -> bool;

    /// Re-expresses `pose` in `target`. May fail with
    /// `Error::FrameTransformUnavailable` even after `can_transform` said yes.
    fn transform_pose(&self, target: &str, pose: &Pose) -> Result<Pose, Error>;
}

/// Poses of one track accumulated in a single target frame.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub frame_id: Option<String>,
    pub poses: Vec<Pose>,
}

impl Trajectory {
    pub fn push(&mut self, pose: Pose) {
        self.frame_id = Some(pose.frame_id.clone());
        self.poses.push(pose);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&Pose> {
        self.poses.last()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Pose> {
        self.poses.iter()
    }
}
