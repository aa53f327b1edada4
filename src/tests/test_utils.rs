//! Shared fixtures for the planner tests: deterministic stub kinematic
//! models standing in for a real arm, so the tests need no model files.

use std::f64::consts::PI;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use crate::kinematic_traits::{JointLimits, Joints, Kinematics, Pose, Solutions};

/// Seven joint gantry-like chain. Joints 0 and 1 both drive X (a redundant
/// pair, so inverse kinematics is multi-valued), joints 2 and 3 drive Y and
/// Z, and the sum of joints 4..=6 rotates the effector around Z. Forward and
/// inverse kinematics are exact, which keeps the planner tests deterministic.
#[derive(Clone, Copy, Default)]
pub struct GantryArm;

impl Kinematics for GantryArm {
    fn forward(&self, joints: &Joints) -> Pose {
        let rotation = UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            joints[4] + joints[5] + joints[6],
        );
        Isometry3::from_parts(
            Translation3::new(joints[0] + joints[1], joints[2], joints[3]),
            rotation,
        )
    }

    fn inverse(&self, pose: &Pose) -> Solutions {
        // Only rotations about the Z axis are reachable for this chain.
        let angle = match pose.rotation.axis_angle() {
            None => 0.0,
            Some((axis, angle)) => {
                if axis.x.abs() > 1e-9 || axis.y.abs() > 1e-9 {
                    return Vec::new();
                }
                angle * axis.z.signum()
            }
        };
        let translation = pose.translation.vector;
        vec![
            vec![
                translation.x,
                0.0,
                translation.y,
                translation.z,
                angle,
                0.0,
                0.0,
            ],
            vec![
                translation.x / 2.0,
                translation.x / 2.0,
                translation.y,
                translation.z,
                angle,
                0.0,
                0.0,
            ],
        ]
    }

    fn dof(&self) -> usize {
        7
    }

    fn joint_limits(&self) -> JointLimits {
        vec![
            (-5.0, 5.0),
            (-5.0, 5.0),
            (-5.0, 5.0),
            (-5.0, 5.0),
            (-PI, PI),
            (-PI, PI),
            (-PI, PI),
        ]
    }
}

/// Degenerate model for construction failure tests.
pub struct ZeroDofModel;

impl Kinematics for ZeroDofModel {
    fn forward(&self, _joints: &Joints) -> Pose {
        Pose::identity()
    }

    fn inverse(&self, _pose: &Pose) -> Solutions {
        Vec::new()
    }

    fn dof(&self) -> usize {
        0
    }

    fn joint_limits(&self) -> JointLimits {
        Vec::new()
    }
}

pub fn home() -> Joints {
    vec![0.0; 7]
}
