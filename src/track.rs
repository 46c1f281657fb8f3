use crate::cluster::{Point, PointCluster};
use crate::config::TrackConfig;
use crate::error::{check_dt, Error};
use crate::history::ObservationHistory;
use crate::kalman::{KalmanTracker, StateVector};
use crate::math;
use crate::motion::{MotionClassifier, MotionState};
use crate::simplify::simplify;
use crate::trajectory::{FrameTransform, Pose, Trajectory};

use nalgebra as na;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Display color of a track, components in `[0, 1)`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Draws a color from a caller-owned generator; seed it for reproducible
    /// runs.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Odometry {
    pub position: Point,
    pub velocity: na::Vector2<f64>,
}

/// State of one tracked object across scans.
#[derive(Debug, Clone)]
pub struct TrackRecord {
    id: u64,
    dt: f64,
    color: Color,
    epsilon: f64,
    classifier: MotionClassifier,
    source_frame: String,
    target_frame: String,

    mean: Point,
    previous_mean: Option<Point>,
    velocity: na::Vector2<f64>,
    kalman: KalmanTracker,
    history: ObservationHistory,
    polyline: Vec<Point>,
    motion: MotionState,
    trajectory: Trajectory,
}

impl TrackRecord {
    pub fn new(
        id: u64,
        points: Vec<Point>,
        dt: f64,
        config: &TrackConfig,
        color: Color,
    ) -> Result<Self, Error> {
        let cluster = PointCluster::new(points)?;
        check_dt(dt)?;

        let mean = cluster.mean();
        let polyline = simplify(cluster.as_slice(), config.epsilon)?;
        let kalman = KalmanTracker::init(id, mean, dt, &config.kalman)?;

        let mut history = ObservationHistory::with_capacity(config.history_capacity);
        history.push(cluster);

        debug!(track = id, x = mean.x, y = mean.y, "track created");

        Ok(Self {
            id,
            dt,
            color,
            epsilon: config.epsilon,
            classifier: MotionClassifier::new(config.segment_threshold),
            source_frame: config.source_frame.clone(),
            target_frame: config.target_frame.clone(),
            mean,
            previous_mean: None,
            velocity: na::Vector2::zeros(),
            kalman,
            history,
            polyline,
            motion: MotionState::Moving,
            trajectory: Trajectory::default(),
        })
    }

    pub fn with_rng<R: Rng>(
        id: u64,
        points: Vec<Point>,
        dt: f64,
        config: &TrackConfig,
        rng: &mut R,
    ) -> Result<Self, Error> {
        Self::new(id, points, dt, config, Color::sample(rng))
    }

    /// Feeds one scan's cluster into the track and returns the filtered
    /// state.
    ///
    /// Must be called at most once per scan, in time order. If any step
    /// fails the record is left as it was.
    pub fn update(&mut self, points: Vec<Point>, dt: f64) -> Result<StateVector, Error> {
        let cluster = PointCluster::new(points)?;
        check_dt(dt)?;

        let mean = cluster.mean();
        let velocity = math::velocity(&mean, &self.mean, dt)?;
        let polyline = simplify(cluster.as_slice(), self.epsilon)?;

        let z = StateVector::new(mean.x, mean.y, velocity.x, velocity.y);
        let filtered = self.kalman.step(&z, dt)?;

        self.dt = dt;
        self.previous_mean = Some(self.mean);
        self.mean = mean;
        self.velocity = velocity;
        self.history.push(cluster);

        let (motion, changed) = self.motion.observe(self.classifier.classify(&polyline));
        if changed {
            debug!(
                track = self.id,
                vertices = polyline.len(),
                "track classified stationary"
            );
        }

        self.motion = motion;
        self.polyline = polyline;

        Ok(filtered)
    }

    /// Appends the filtered position, expressed in the target frame, to the
    /// trajectory. Returns whether a pose was appended; transform failures
    /// only skip this cycle.
    pub fn update_trajectory(&mut self, tf: &dyn FrameTransform, stamp: f64) -> bool {
        if !tf.can_transform(&self.target_frame, &self.source_frame) {
            debug!(
                track = self.id,
                from = %self.source_frame,
                to = %self.target_frame,
                "no transform yet, trajectory not extended"
            );
            return false;
        }

        let pose = Pose::new(&self.source_frame, self.kalman.position(), stamp);

        match tf.transform_pose(&self.target_frame, &pose) {
            Ok(pose) => {
                self.trajectory.push(pose);
                true
            }
            Err(err) => {
                warn!(track = self.id, %err, "trajectory not extended");
                false
            }
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Centroid of the latest observation.
    #[inline]
    pub fn mean(&self) -> Point {
        self.mean
    }

    /// Centroid of the observation before the latest; `None` until the
    /// first update.
    #[inline]
    pub fn previous_mean(&self) -> Option<Point> {
        self.previous_mean
    }

    /// Finite-difference velocity; zero until the first update.
    #[inline]
    pub fn velocity(&self) -> na::Vector2<f64> {
        self.velocity
    }

    #[inline]
    pub fn raw_odometry(&self) -> Odometry {
        Odometry {
            position: self.mean,
            velocity: self.velocity,
        }
    }

    #[inline]
    pub fn filtered_state(&self) -> StateVector {
        self.kalman.state()
    }

    #[inline]
    pub fn filtered_odometry(&self) -> Odometry {
        Odometry {
            position: self.kalman.position(),
            velocity: self.kalman.velocity(),
        }
    }

    #[inline]
    pub fn kalman(&self) -> &KalmanTracker {
        &self.kalman
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }

    #[inline]
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    /// Simplified shape of the latest observation.
    #[inline]
    pub fn polyline(&self) -> &[Point] {
        &self.polyline
    }

    #[inline]
    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    #[inline]
    pub fn latest_observation(&self) -> Option<&PointCluster> {
        self.history.latest()
    }

    /// Accumulated trajectory, withheld while the track is stationary.
    #[inline]
    pub fn trajectory(&self) -> Option<&Trajectory> {
        if self.motion.is_moving() {
            Some(&self.trajectory)
        } else {
            None
        }
    }
}
