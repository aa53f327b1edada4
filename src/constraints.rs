//! Pluggable contracts steering the planner: metrics rank candidate
//! configurations, path distances choose the interpolation resolution of edge
//! checks, constraints decide admissibility. All three are pure functions
//! over poses; closures with the matching signature implement the traits
//! directly.

use crate::kinematic_traits::Pose;
use crate::orientation::pose_delta;
use nalgebra::UnitQuaternion;

/// Ranks a candidate pose against the goal pose. Costs are non-negative and,
/// for well formed metrics, zero only at the goal. Used to steer the search,
/// never to reject candidates.
pub trait Metric: Send + Sync {
    fn cost(&self, current: &Pose, goal: &Pose) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&Pose, &Pose) -> f64 + Send + Sync,
{
    fn cost(&self, current: &Pose, goal: &Pose) -> f64 {
        self(current, goal)
    }
}

/// Scalar distance between two poses, zero iff they are identical. A larger
/// distance puts more interpolation samples on the edge between them.
pub trait PathDist: Send + Sync {
    fn distance(&self, a: &Pose, b: &Pose) -> f64;
}

impl<F> PathDist for F
where
    F: Fn(&Pose, &Pose) -> f64 + Send + Sync,
{
    fn distance(&self, a: &Pose, b: &Pose) -> f64 {
        self(a, b)
    }
}

/// Admissibility predicate. Every accepted edge must satisfy every active
/// constraint at every interpolated pose, not just at the endpoints.
/// Constraints are stateless; an absent constraint set admits everything.
pub trait Constraint: Send + Sync {
    fn admits(&self, pose: &Pose) -> bool;
}

impl<F> Constraint for F
where
    F: Fn(&Pose) -> bool + Send + Sync,
{
    fn admits(&self, pose: &Pose) -> bool {
        self(pose)
    }
}

/// Default metric: squared pose space distance, the rotation angle weighted
/// against the translation norm.
#[derive(Debug, Clone, Copy)]
pub struct SquaredNormMetric {
    pub rotation_weight: f64,
}

impl Default for SquaredNormMetric {
    fn default() -> Self {
        SquaredNormMetric {
            rotation_weight: 1.0,
        }
    }
}

impl Metric for SquaredNormMetric {
    fn cost(&self, current: &Pose, goal: &Pose) -> f64 {
        let (linear, angular) = pose_delta(current, goal);
        let distance = linear + self.rotation_weight * angular;
        distance * distance
    }
}

/// Default path distance: proportional to the pose delta, translation norm
/// plus rotation angle.
pub fn pose_path_distance(a: &Pose, b: &Pose) -> f64 {
    let (linear, angular) = pose_delta(a, b);
    linear + angular
}

/// Constraint over the rotation part of a pose only.
pub struct OrientationConstraint<F> {
    predicate: F,
}

impl<F> OrientationConstraint<F>
where
    F: Fn(&UnitQuaternion<f64>) -> bool + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        OrientationConstraint { predicate }
    }
}

impl<F> Constraint for OrientationConstraint<F>
where
    F: Fn(&UnitQuaternion<f64>) -> bool + Send + Sync,
{
    fn admits(&self, pose: &Pose) -> bool {
        (self.predicate)(&pose.rotation)
    }
}

/// Angular region around a reference orientation. Doubles as a distance
/// function (zero inside, exceeding angle outside) and as a constraint.
#[derive(Clone)]
pub struct OrientationRegion {
    pub reference: UnitQuaternion<f64>,
    pub tolerance: f64,
}

impl OrientationRegion {
    pub fn new(reference: UnitQuaternion<f64>, tolerance: f64) -> Self {
        OrientationRegion {
            reference,
            tolerance,
        }
    }

    /// Zero inside the region, the angle beyond the tolerance outside.
    pub fn distance(&self, orientation: &UnitQuaternion<f64>) -> f64 {
        (self.reference.angle_to(orientation) - self.tolerance).max(0.0)
    }

    pub fn contains(&self, orientation: &UnitQuaternion<f64>) -> bool {
        self.distance(orientation) == 0.0
    }
}

impl Constraint for OrientationRegion {
    fn admits(&self, pose: &Pose) -> bool {
        self.contains(&pose.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::OvPose;
    use nalgebra::Vector3;
    use std::sync::Arc;

    fn pose(x: f64, theta_degrees: f64) -> Pose {
        OvPose::new(x, 0.0, 0.0, theta_degrees, 0.0, 0.0, 1.0).to_isometry()
    }

    #[test]
    fn test_default_metric_zero_at_goal() {
        let metric = SquaredNormMetric::default();
        let goal = pose(1.0, 30.0);
        assert!(metric.cost(&goal, &goal) < 1e-20);
        assert!(metric.cost(&pose(0.0, 0.0), &goal) > 0.0);
    }

    #[test]
    fn test_default_metric_ranks_closer_poses_lower() {
        let metric = SquaredNormMetric::default();
        let goal = pose(1.0, 0.0);
        let near = metric.cost(&pose(0.9, 0.0), &goal);
        let far = metric.cost(&pose(0.0, 0.0), &goal);
        assert!(near < far);
    }

    #[test]
    fn test_path_distance_zero_iff_identical() {
        let a = pose(0.5, 10.0);
        assert!(pose_path_distance(&a, &a) < 1e-12);
        assert!(pose_path_distance(&a, &pose(0.5, 11.0)) > 0.0);
        assert!(pose_path_distance(&a, &pose(0.6, 10.0)) > 0.0);
    }

    #[test]
    fn test_orientation_region() {
        let region = OrientationRegion::new(
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.0),
            0.1,
        );
        assert!(region.contains(&UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.05)));
        assert!(!region.contains(&UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.2)));
        let outside = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3);
        assert!((region.distance(&outside) - 0.2).abs() < 1e-12);
        assert!(region.admits(&pose(5.0, 0.0)));
    }

    #[test]
    fn test_closures_implement_the_contracts() {
        let metric: Arc<dyn Metric> = Arc::new(|a: &Pose, b: &Pose| pose_path_distance(a, b));
        let constraint: Arc<dyn Constraint> = Arc::new(|_: &Pose| true);
        let goal = pose(1.0, 0.0);
        assert!(metric.cost(&goal, &goal) < 1e-12);
        assert!(constraint.admits(&goal));
    }

    #[test]
    fn test_orientation_constraint_sees_rotation_only() {
        let upright = OrientationConstraint::new(|o: &UnitQuaternion<f64>| o.angle() < 0.2);
        assert!(upright.admits(&pose(100.0, 0.0)));
        assert!(!upright.admits(&pose(0.0, 90.0)));
    }
}
