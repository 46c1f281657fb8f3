use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Point cluster is empty")]
    EmptyClusterError,

    #[error("Invalid timestep {0}: must be positive and finite")]
    InvalidTimestepError(f64),

    #[error("Simplification tolerance must be non-negative and finite")]
    InvalidToleranceError,

    #[error("Kalman filter diverged: {0}")]
    FilterDivergedError(&'static str),

    #[error("Simplification assembled {0} points, expected at least 2")]
    SimplificationAssemblyError(usize),

    #[error("Transform from `{from}` to `{to}` is unavailable")]
    FrameTransformUnavailable { from: String, to: String },
}

pub(crate) fn check_dt(dt: f64) -> Result<(), Error> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidTimestepError(dt))
    }
}
