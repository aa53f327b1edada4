//! Validation of joint space edges against the active constraint set. An edge
//! is admissible only if every constraint holds at every pose sampled along
//! its interpolation, endpoints included.

use std::sync::Arc;

use crate::constraints::{Constraint, PathDist};
use crate::kinematic_traits::{Joints, Kinematics, Pose};
use crate::options::PlannerOptions;
use crate::utils::interpolate_joints;

pub(crate) struct EdgeChecker {
    kinematics: Arc<dyn Kinematics>,
    constraints: Vec<Arc<dyn Constraint>>,
    path_dist: Arc<dyn PathDist>,
    edge_resolution: f64,
    max_edge_samples: usize,
}

impl EdgeChecker {
    pub fn new(kinematics: Arc<dyn Kinematics>, options: &PlannerOptions) -> Self {
        EdgeChecker {
            kinematics,
            constraints: options.constraints.values().cloned().collect(),
            path_dist: options.path_dist.clone(),
            edge_resolution: options.edge_resolution,
            max_edge_samples: options.max_edge_samples,
        }
    }

    /// True if every active constraint admits the pose of the configuration.
    pub fn configuration_valid(&self, joints: &Joints) -> bool {
        if self.constraints.is_empty() {
            return true;
        }
        self.pose_valid(&self.kinematics.forward(joints))
    }

    fn pose_valid(&self, pose: &Pose) -> bool {
        self.constraints.iter().all(|constraint| constraint.admits(pose))
    }

    /// Interpolate the edge in joint space and check constraints at each
    /// sampled pose. The sample count follows the path distance of the
    /// endpoint poses at the configured resolution, capped so a single edge
    /// check stays cheap.
    pub fn edge_valid(&self, from: &Joints, to: &Joints) -> bool {
        if self.constraints.is_empty() {
            return true;
        }
        let from_pose = self.kinematics.forward(from);
        let to_pose = self.kinematics.forward(to);
        let distance = self.path_dist.distance(&from_pose, &to_pose);
        let samples = ((distance / self.edge_resolution).ceil() as usize)
            .clamp(2, self.max_edge_samples.max(2));
        if !self.pose_valid(&from_pose) || !self.pose_valid(&to_pose) {
            return false;
        }
        for i in 1..samples {
            let t = i as f64 / samples as f64;
            let step = interpolate_joints(from, to, t);
            if !self.pose_valid(&self.kinematics.forward(&step)) {
                return false;
            }
        }
        true
    }
}
