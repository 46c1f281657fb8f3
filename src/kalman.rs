//! Constant-velocity Kalman filter over `(x, y, vx, vy)`.
//!
//! Both position and velocity are observed: the measurement is the scan
//! centroid together with its finite-difference velocity, so the
//! observation matrix is the identity.

use crate::cluster::Point;
use crate::config::KalmanConfig;
use crate::error::{check_dt, Error};

use nalgebra as na;
use tracing::{trace, warn};

pub type StateVector = na::Vector4<f64>;
pub type StateMatrix = na::Matrix4<f64>;

#[inline]
fn transition(dt: f64) -> StateMatrix {
    StateMatrix::new(
        1.0, 0.0, dt, 0.0, //
        0.0, 1.0, 0.0, dt, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

#[inline]
fn diagonal(d: &[f64; 4]) -> StateMatrix {
    StateMatrix::from_diagonal(&StateVector::from(*d))
}

#[inline]
fn invert(m: &StateMatrix) -> Option<StateMatrix> {
    m.try_inverse()
}

#[inline]
fn all_finite(m: &StateMatrix) -> bool {
    m.iter().all(|v| v.is_finite())
}

#[derive(Debug, Clone)]
pub struct KalmanTracker {
    id: u64,
    dt: f64,
    steps: u64,
    x: StateVector,
    p: StateMatrix,
    h: StateMatrix,
    q: StateMatrix,
    r: StateMatrix,
}

impl KalmanTracker {
    /// Seeds the filter at `position` with zero velocity.
    pub fn init(id: u64, position: Point, dt: f64, config: &KalmanConfig) -> Result<Self, Error> {
        check_dt(dt)?;

        Ok(Self {
            id,
            dt,
            steps: 0,
            x: StateVector::new(position.x, position.y, 0.0, 0.0),
            p: diagonal(&config.initial_covariance),
            h: StateMatrix::identity(),
            q: diagonal(&config.process_noise),
            r: diagonal(&config.measurement_noise),
        })
    }

    /// One predict/correct cycle against `z = (x, y, vx, vy)`.
    ///
    /// On error the filter is left exactly as it was before the call.
    pub fn step(&mut self, z: &StateVector, dt: f64) -> Result<StateVector, Error> {
        check_dt(dt)?;

        let f = transition(dt);
        let x_pred = f * self.x;
        let p_pred = f * self.p * f.transpose() + self.q;

        let s = self.h * p_pred * self.h.transpose() + self.r;
        let s_inv = match invert(&s) {
            Some(inv) if all_finite(&inv) => inv,
            _ => {
                warn!(track = self.id, "innovation covariance is singular");
                return Err(Error::FilterDivergedError("singular innovation covariance"));
            }
        };

        let k = p_pred * self.h.transpose() * s_inv;
        let x_new = x_pred + k * (z - self.h * x_pred);
        let p_new = (StateMatrix::identity() - k * self.h) * p_pred;

        if !x_new.iter().all(|v| v.is_finite()) || !all_finite(&p_new) {
            warn!(track = self.id, ?z, "filter produced non-finite state");
            return Err(Error::FilterDivergedError("non-finite state"));
        }

        self.x = x_new;
        self.p = p_new;
        self.dt = dt;
        self.steps += 1;

        trace!(
            track = self.id,
            dt,
            x = self.x[0],
            y = self.x[1],
            vx = self.x[2],
            vy = self.x[3],
            "kalman step"
        );

        Ok(self.x)
    }

    #[inline]
    pub fn state(&self) -> StateVector {
        self.x
    }

    #[inline]
    pub fn covariance(&self) -> &StateMatrix {
        &self.p
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x[0], self.x[1])
    }

    #[inline]
    pub fn velocity(&self) -> na::Vector2<f64> {
        na::Vector2::new(self.x[2], self.x[3])
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Timestep of the most recent cycle (or the one given at init).
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
