use serde_derive::{Deserialize, Serialize};

/// Noise model of the constant-velocity filter. Each array is the diagonal
/// of the matching 4x4 covariance over `(x, y, vx, vy)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KalmanConfig {
    /// Q
    pub process_noise: [f64; 4],
    /// R
    pub measurement_noise: [f64; 4],
    /// P at track creation
    pub initial_covariance: [f64; 4],
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_noise: [1.0; 4],
            measurement_noise: [1.0; 4],
            initial_covariance: [1.0; 4],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackConfig {
    /// RDP tolerance used to simplify each scan's cluster
    pub epsilon: f64,
    /// Two-vertex polylines longer than this are taken as static surfaces
    pub segment_threshold: f64,
    /// Observations retained per track (at least one is always kept)
    pub history_capacity: usize,
    pub source_frame: String,
    pub target_frame: String,
    pub kalman: KalmanConfig,
}

impl TrackConfig {
    pub fn new(epsilon: f64, segment_threshold: f64) -> Self {
        Self {
            epsilon,
            segment_threshold,
            ..Default::default()
        }
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            segment_threshold: 0.8,
            history_capacity: 16,
            source_frame: "laser".to_string(),
            target_frame: "map".to_string(),
            kalman: KalmanConfig::default(),
        }
    }
}
