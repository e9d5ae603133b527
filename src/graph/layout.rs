//! 2-D placement of ranked nodes for plotting

use serde::Serialize;

/// A point on the drawing canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
}

/// Places nodes evenly on a circle, in rank order, starting at angle zero
/// and running counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularLayout {
    /// Circle radius
    pub radius: f64,
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl CircularLayout {
    /// Unit-circle layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the radius
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Positions for `count` nodes; node `k` sits at angle `2πk / count`.
    pub fn positions(&self, count: usize) -> Vec<NodePosition> {
        (0..count)
            .map(|k| {
                let theta = std::f64::consts::TAU * k as f64 / count as f64;
                NodePosition {
                    x: self.radius * theta.cos(),
                    y: self.radius * theta.sin(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_layout() {
        assert!(CircularLayout::new().positions(0).is_empty());
    }

    #[test]
    fn test_four_points_are_compass_directions() {
        let pts = CircularLayout::new().with_radius(2.0).positions(4);

        let expected = [(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0)];
        for (p, (x, y)) in pts.iter().zip(expected) {
            assert!((p.x - x).abs() < 1e-9);
            assert!((p.y - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_points_are_distinct_and_on_circle() {
        let pts = CircularLayout::new().positions(7);
        for (i, p) in pts.iter().enumerate() {
            assert!(((p.x * p.x + p.y * p.y).sqrt() - 1.0).abs() < 1e-9);
            for q in &pts[i + 1..] {
                assert!((p.x - q.x).abs() > 1e-6 || (p.y - q.y).abs() > 1e-6);
            }
        }
    }
}
