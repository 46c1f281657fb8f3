pub mod cluster;
pub mod config;
pub mod error;
pub mod history;
pub mod kalman;
pub mod math;
pub mod motion;
pub mod simplify;
pub mod trajectory;

mod track;

pub use cluster::{Point, PointCluster};
pub use config::{KalmanConfig, TrackConfig};
pub use error::Error;
pub use kalman::{KalmanTracker, StateVector};
pub use motion::{MotionClassifier, MotionState};
pub use track::{Color, Odometry, TrackRecord};
pub use trajectory::{FrameTransform, Pose, Trajectory};
