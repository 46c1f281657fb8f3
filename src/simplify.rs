//! Ramer-Douglas-Peucker polyline simplification.

use super::math::perpendicular_distance;
use crate::error::Error;

use nalgebra as na;
use num_traits::Float;

/// Simplifies an ordered point sequence, keeping only vertices that deviate
/// more than `epsilon` from the chord of the span they belong to.
///
/// The result always starts and ends with the input's endpoints and never
/// grows. Inputs shorter than three points come back unchanged.
pub fn simplify<F>(points: &[na::Point2<F>], epsilon: F) -> Result<Vec<na::Point2<F>>, Error>
where
    F: na::RealField + Float,
{
    if points.is_empty() {
        return Err(Error::EmptyClusterError);
    }

    if !Float::is_finite(epsilon) || epsilon < F::zero() {
        return Err(Error::InvalidToleranceError);
    }

    if points.len() < 3 {
        return Ok(points.to_vec());
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    simplify_span(points, epsilon, &mut out);

    if out.len() < 2 {
        return Err(Error::SimplificationAssemblyError(out.len()));
    }

    Ok(out)
}

// Appends the kept vertices of `span`, excluding its first point (already
// emitted by the caller) and including its last.
fn simplify_span<F>(span: &[na::Point2<F>], epsilon: F, out: &mut Vec<na::Point2<F>>)
where
    F: na::RealField + Float,
{
    let end = span.len() - 1;
    let (first, last) = (&span[0], &span[end]);

    let mut dmax = F::zero();
    let mut index = 0;

    for (i, pt) in span.iter().enumerate().take(end).skip(1) {
        let d = perpendicular_distance(pt, first, last);
        if d > dmax {
            index = i;
            dmax = d;
        }
    }

    // epsilon >= 0 means dmax > epsilon only after some interior point won,
    // so `index` is strictly inside the span and both halves shrink
    if dmax > epsilon {
        simplify_span(&span[..=index], epsilon, out);
        simplify_span(&span[index..], epsilon, out);
    } else {
        out.push(*last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type P = na::Point2<f64>;

    fn pts(pairs: &[(f64, f64)]) -> Vec<P> {
        pairs.iter().map(|&(x, y)| P::new(x, y)).collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(simplify::<f64>(&[], 0.1), Err(Error::EmptyClusterError));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let line = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        assert_eq!(simplify(&line, -0.1), Err(Error::InvalidToleranceError));
        assert_eq!(simplify(&line, f64::NAN), Err(Error::InvalidToleranceError));
    }

    #[test]
    fn short_inputs_pass_through() {
        let one = pts(&[(1.0, 1.0)]);
        let two = pts(&[(0.0, 0.0), (3.0, 4.0)]);

        assert_eq!(simplify(&one, 0.1).unwrap(), one);
        assert_eq!(simplify(&two, 0.1).unwrap(), two);
    }

    #[test]
    fn near_collinear_collapses_to_endpoints() {
        let line = pts(&[(0.0, 0.0), (1.0, 0.05), (2.0, -0.04), (3.0, 0.02), (4.0, 0.0)]);

        assert_eq!(simplify(&line, 0.1).unwrap(), pts(&[(0.0, 0.0), (4.0, 0.0)]));
    }

    #[test]
    fn keeps_corner_of_l_shape() {
        let l = pts(&[(0.0, 2.0), (0.0, 1.0), (0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        assert_eq!(
            simplify(&l, 0.1).unwrap(),
            pts(&[(0.0, 2.0), (0.0, 0.0), (2.0, 0.0)])
        );
    }

    #[test]
    fn zigzag_keeps_every_vertex() {
        let z = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);

        assert_eq!(simplify(&z, 0.1).unwrap(), z);
    }

    #[test]
    fn closed_contour_with_coincident_endpoints() {
        let ring = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let out = simplify(&ring, 0.1).unwrap();

        assert_eq!(out.first(), ring.first());
        assert_eq!(out.last(), ring.last());
        assert!(out.len() >= 3);
    }

    #[test]
    fn works_in_single_precision() {
        let line: Vec<na::Point2<f32>> = vec![
            na::Point2::new(0.0, 0.0),
            na::Point2::new(0.5, 0.01),
            na::Point2::new(1.0, 0.0),
        ];

        assert_eq!(simplify(&line, 0.1f32).unwrap().len(), 2);
    }

    fn arb_polyline() -> impl Strategy<Value = Vec<P>> {
        prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 2..40)
            .prop_map(|v| v.into_iter().map(|(x, y)| P::new(x, y)).collect())
    }

    proptest! {
        #[test]
        fn keeps_endpoints_and_never_grows(line in arb_polyline(), eps in 0.01f64..2.0) {
            let out = simplify(&line, eps).unwrap();

            prop_assert_eq!(out.first(), line.first());
            prop_assert_eq!(out.last(), line.last());
            prop_assert!(out.len() >= 2);
            prop_assert!(out.len() <= line.len());
        }

        #[test]
        fn output_is_an_ordered_subsequence(line in arb_polyline(), eps in 0.01f64..2.0) {
            let out = simplify(&line, eps).unwrap();

            let mut it = line.iter();
            for p in &out {
                prop_assert!(it.any(|q| q == p));
            }
        }

        #[test]
        fn idempotent(line in arb_polyline(), eps in 0.01f64..2.0) {
            let once = simplify(&line, eps).unwrap();
            let twice = simplify(&once, eps).unwrap();

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn collinear_within_tolerance_is_two_points(
            ts in prop::collection::vec(0.0f64..1.0, 1..30),
            eps in 0.01f64..1.0,
        ) {
            let mut line = vec![P::new(0.0, 0.0)];
            line.extend(ts.iter().map(|&t| P::new(5.0 * t, 2.5 * t)));
            line.push(P::new(5.0, 2.5));

            prop_assert_eq!(simplify(&line, eps).unwrap(), vec![P::new(0.0, 0.0), P::new(5.0, 2.5)]);
        }
    }
}
