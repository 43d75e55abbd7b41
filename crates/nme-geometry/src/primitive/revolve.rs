//! Rational circle arcs and surfaces of revolution about the Y axis.

use std::f64::consts::TAU;

use nme_math::{ControlPoint, DVec2};

use crate::nurbs::circular_knots;

/// Control polygon of an exact rational quadratic arc split into equal pieces.
///
/// Points are on the unit circle at even indices; odd (corner) points sit at
/// `1 / cos(half)` with weight `cos(half)`, `half` being half of one piece's sweep.
pub(crate) struct Arc {
    pub points: Vec<DVec2>,
    pub weights: Vec<f64>,
    pub knots: Vec<f64>,
}

impl Arc {
    pub fn new(start: f64, sweep: f64, segments: usize) -> Option<Self> {
        let knots = circular_knots(segments).ok()?;
        let half = sweep / (2 * segments) as f64;
        let corner_weight = half.cos();

        let mut points = Vec::with_capacity(2 * segments + 1);
        let mut weights = Vec::with_capacity(2 * segments + 1);
        for k in 0..=2 * segments {
            let angle = start + k as f64 * half;
            let dir = DVec2::new(angle.cos(), angle.sin());
            if k % 2 == 0 {
                points.push(dir);
                weights.push(1.0);
            } else {
                points.push(dir / corner_weight);
                weights.push(corner_weight);
            }
        }

        Some(Self {
            points,
            weights,
            knots,
        })
    }

    /// Full circle starting at angle 0.
    pub fn circle(segments: usize) -> Option<Self> {
        Self::new(0.0, TAU, segments)
    }
}

/// Sweep a weighted profile of `(radius, height)` points around the Y axis.
///
/// Ring point `i` places profile point `j` at
/// `(radius * ring.x, height, radius * ring.y)` with weight `w_i * w_j`.
/// The result is indexed `[ring][profile]`.
pub(crate) fn revolve(ring: &Arc, profile: &[(DVec2, f64)]) -> Vec<Vec<ControlPoint>> {
    ring.points
        .iter()
        .zip(&ring.weights)
        .map(|(dir, ring_weight)| {
            profile
                .iter()
                .map(|(p, w)| {
                    ControlPoint::new(
                        nme_math::dvec3(p.x * dir.x, p.y, p.x * dir.y),
                        ring_weight * w,
                    )
                })
                .collect()
        })
        .collect()
}
