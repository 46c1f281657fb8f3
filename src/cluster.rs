use crate::error::Error;
use crate::math;

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

/// 2D point in the sensor-local frame
pub type Point = na::Point2<f64>;

/// One scan's observation of a tracked object: a non-empty sequence of
/// points in scan order.
///
/// First and last points are treated as the chord endpoints when the
/// cluster is simplified, so the order matters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointCluster(Vec<Point>);

impl PointCluster {
    pub fn new(points: Vec<Point>) -> Result<Self, Error> {
        if points.is_empty() {
            return Err(Error::EmptyClusterError);
        }

        Ok(Self(points))
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    #[inline]
    pub fn first(&self) -> &Point {
        &self.0[0]
    }

    #[inline]
    pub fn last(&self) -> &Point {
        &self.0[self.0.len() - 1]
    }

    /// Centroid of the cluster.
    #[inline]
    pub fn mean(&self) -> Point {
        // never empty, so the division is always defined
        math::centroid(&self.0)
    }
}

impl TryFrom<Vec<Point>> for PointCluster {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PointCluster> for Vec<Point> {
    fn from(cluster: PointCluster) -> Self {
        cluster.0
    }
}

impl<'a> IntoIterator for &'a PointCluster {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Convenience for building clusters from `(x, y)` pairs.
pub fn cluster_from_pairs(pairs: &[(f64, f64)]) -> Result<PointCluster, Error> {
    PointCluster::new(pairs.iter().map(|&(x, y)| Point::new(x, y)).collect())
}
