use crate::cluster::Point;
use crate::error::{check_dt, Error};

use nalgebra as na;
use num_traits::Float;

/// Arithmetic mean of `points`, independently per axis.
pub fn mean(points: &[Point]) -> Result<Point, Error> {
    if points.is_empty() {
        return Err(Error::EmptyClusterError);
    }

    Ok(centroid(points))
}

// Caller guarantees `points` is non-empty.
#[inline]
pub(crate) fn centroid(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(na::Vector2::zeros(), |acc, p| acc + p.coords);

    Point::from(sum / n)
}

/// Finite-difference velocity between two consecutive centroids.
///
/// Each axis uses its own difference: `vx = Δx / dt`, `vy = Δy / dt`.
pub fn velocity(current: &Point, previous: &Point, dt: f64) -> Result<na::Vector2<f64>, Error> {
    check_dt(dt)?;

    Ok((current - previous) / dt)
}

/// Distance from `pt` to the infinite line through `start` and `end`.
///
/// A zero-length chord degrades to the distance from `start`.
pub fn perpendicular_distance<F>(
    pt: &na::Point2<F>,
    start: &na::Point2<F>,
    end: &na::Point2<F>,
) -> F
where
    F: na::RealField + Float,
{
    let chord = end - start;
    let offset = pt - start;
    let len = chord.norm();

    if len <= F::zero() {
        return offset.norm();
    }

    let dir = chord / len;
    let projected = dir * offset.dot(&dir);

    (offset - projected).norm()
}

#[inline]
pub fn segment_length<F>(a: &na::Point2<F>, b: &na::Point2<F>) -> F
where
    F: na::RealField + Float,
{
    na::distance(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn mean_of_empty_is_rejected() {
        assert_eq!(mean(&[]), Err(Error::EmptyClusterError));
    }

    #[test]
    fn mean_of_single_point_is_the_point() {
        let p = Point::new(-3.5, 7.25);
        assert_eq!(mean(&[p]).unwrap(), p);
    }

    #[test]
    fn velocity_uses_matching_axes() {
        let v = velocity(&Point::new(1.0, 3.0), &Point::new(0.5, 1.0), 0.5).unwrap();

        assert_relative_eq!(v.x, 1.0);
        assert_relative_eq!(v.y, 4.0);
    }

    #[test]
    fn velocity_rejects_non_positive_dt() {
        let p = Point::new(1.0, 1.0);

        assert_eq!(velocity(&p, &p, 0.0), Err(Error::InvalidTimestepError(0.0)));
        assert_eq!(velocity(&p, &p, -0.1), Err(Error::InvalidTimestepError(-0.1)));
        assert!(velocity(&p, &p, f64::NAN).is_err());
    }

    #[test]
    fn perpendicular_distance_to_horizontal_chord() {
        let d = perpendicular_distance(
            &na::Point2::new(1.0, 2.0),
            &na::Point2::new(0.0, 0.0),
            &na::Point2::new(4.0, 0.0),
        );

        assert_relative_eq!(d, 2.0);
    }

    #[test]
    fn perpendicular_distance_beyond_segment_uses_infinite_line() {
        let d = perpendicular_distance(
            &na::Point2::new(10.0, -1.0),
            &na::Point2::new(0.0, 0.0),
            &na::Point2::new(1.0, 0.0),
        );

        assert_relative_eq!(d, 1.0);
    }

    #[test]
    fn degenerate_chord_falls_back_to_point_distance() {
        let d = perpendicular_distance(
            &na::Point2::new(3.0f32, 4.0),
            &na::Point2::new(0.0, 0.0),
            &na::Point2::new(0.0, 0.0),
        );

        assert_relative_eq!(d, 5.0);
    }

    proptest! {
        #[test]
        fn mean_matches_per_axis_average(
            pts in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 1..64)
        ) {
            let points: Vec<Point> = pts.iter().map(|&(x, y)| Point::new(x, y)).collect();
            let m = mean(&points).unwrap();

            let n = pts.len() as f64;
            let ex = pts.iter().map(|p| p.0).sum::<f64>() / n;
            let ey = pts.iter().map(|p| p.1).sum::<f64>() / n;

            assert_abs_diff_eq!(m.x, ex, epsilon = 1e-9);
            assert_abs_diff_eq!(m.y, ey, epsilon = 1e-9);
        }
    }
}
