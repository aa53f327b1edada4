extern crate nalgebra as na;

use na::Isometry3;

/// Pose of the end effector. It contains both Cartesian position and rotation quaternion.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Ordered joint values of a kinematic chain, in radians, one entry per degree
/// of freedom. The planner never mutates a configuration once created.
pub type Joints = Vec<f64>;

/// Inverse kinematics may return multiple solutions, each defining the
/// rotations of all joints. An empty vector means the pose is not reachable.
pub type Solutions = Vec<Joints>;

/// Lower and upper limit for each joint, in radians, in joint order.
pub type JointLimits = Vec<(f64, f64)>;

/// A planned trajectory: joint configurations from the start configuration to
/// a configuration whose forward kinematics match the goal pose.
pub type Path = Vec<Joints>;

/// The kinematic model of the chain the planner searches. Implementations
/// must be safe for concurrent read access; the planner calls them from its
/// worker pool.
pub trait Kinematics: Send + Sync {
    /// Compute the end effector pose for the given joint configuration.
    fn forward(&self, joints: &Joints) -> Pose;

    /// Find joint configurations placing the end effector at the given pose.
    /// Solutions outside joint limits may be returned; the planner filters
    /// them. Empty output means no solution exists.
    fn inverse(&self, pose: &Pose) -> Solutions;

    /// Number of degrees of freedom, the required length of [Joints].
    fn dof(&self) -> usize;

    /// Joint limits as (min, max) pairs, one per joint.
    fn joint_limits(&self) -> JointLimits;
}
