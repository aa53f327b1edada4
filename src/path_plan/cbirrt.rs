//! Constrained bidirectional RRT (CBiRRT) planner.
//!
//! Two trees grow through the joint space of the chain: one rooted at the
//! start configuration, the other at inverse kinematics solutions of the goal
//! pose. Each growth step extends the tree a bounded distance toward a
//! sampled target and is accepted only if the active constraints hold along
//! the whole interpolated edge. Whenever an extension is accepted, the
//! planner tries to join the trees through the new node; the connected path
//! is then shortcut-smoothed under the same constraint checks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::kinematic_traits::{JointLimits, Joints, Kinematics, Path, Pose};
use crate::options::PlannerOptions;
use crate::orientation::{OvPose, fix_ov_increment};
use crate::path_check::EdgeChecker;
use crate::planner_error::PlanningError;
use crate::smoother::smooth_path;
use crate::utils::{interpolate_joints, joint_distance};

/// Node of a search tree. Each node references the configuration it was grown
/// from by index; roots have no parent. Nodes are never mutated once added,
/// so the graph is acyclic by construction and extracting a path is an index
/// walk to the root.
struct Node {
    parent: Option<usize>,
    joints: Joints,
}

struct Tree {
    nodes: Vec<Node>,
    /// Most recently added node, the target of the opposing tree bias.
    latest: usize,
}

impl Tree {
    fn with_roots(roots: Vec<Joints>) -> Self {
        let nodes = roots
            .into_iter()
            .map(|joints| Node {
                parent: None,
                joints,
            })
            .collect();
        Tree { nodes, latest: 0 }
    }

    /// Index of the node closest to the target. The strictly-closer
    /// comparison keeps the earliest created node on distance ties.
    fn nearest(&self, target: &Joints) -> usize {
        let mut best = 0;
        let mut best_distance = joint_distance(&self.nodes[0].joints, target);
        for (index, node) in self.nodes.iter().enumerate().skip(1) {
            let distance = joint_distance(&node.joints, target);
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }

    fn add(&mut self, parent: usize, joints: Joints) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            joints,
        });
        self.latest = index;
        index
    }

    /// Step from the nearest node at most `step_size` toward the target.
    /// Returns the index of the new node, or None if the tree is already at
    /// the target or the edge fails the constraint check.
    fn extend(&mut self, target: &Joints, step_size: f64, checker: &EdgeChecker) -> Option<usize> {
        let nearest = self.nearest(target);
        let near = &self.nodes[nearest].joints;
        let distance = joint_distance(near, target);
        if distance < 1e-12 {
            return None;
        }
        let step = if distance <= step_size {
            target.clone()
        } else {
            interpolate_joints(near, target, step_size / distance)
        };
        if !checker.edge_valid(near, &step) {
            return None;
        }
        Some(self.add(nearest, step))
    }

    /// Configurations from the root of this tree up to the given node.
    fn path_from_root(&self, index: usize) -> Path {
        let mut path = self.path_to_root(index);
        path.reverse();
        path
    }

    /// Configurations from the given node down to the root of this tree.
    fn path_to_root(&self, index: usize) -> Path {
        let mut path = vec![self.nodes[index].joints.clone()];
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            current = parent;
            path.push(self.nodes[current].joints.clone());
        }
        path
    }
}

/// The planner. Construct once per kinematic model, reuse across planning
/// calls; it keeps no state between calls other than the injected model and
/// the worker pool.
pub struct CBiRRTPlanner {
    kinematics: Arc<dyn Kinematics>,
    pool: rayon::ThreadPool,
}

impl CBiRRTPlanner {
    /// Create the planner over the given kinematic model with the given
    /// degree of parallelism. The worker count is fixed for the planner's
    /// lifetime; counts below one are raised to one.
    pub fn new(kinematics: Arc<dyn Kinematics>, workers: usize) -> Result<Self, PlanningError> {
        if kinematics.dof() == 0 {
            return Err(PlanningError::ZeroDof);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
            .map_err(|error| PlanningError::WorkerPool(error.to_string()))?;
        Ok(CBiRRTPlanner { kinematics, pool })
    }

    /// Plan a constraint compliant joint space path from the start
    /// configuration to the goal pose. `None` options mean defaults.
    pub fn plan(
        &self,
        goal: &OvPose,
        start: &Joints,
        options: Option<PlannerOptions>,
    ) -> Result<Path, PlanningError> {
        self.plan_with_stop(goal, start, options, &AtomicBool::new(false))
    }

    /// Same as [CBiRRTPlanner::plan], returning promptly with
    /// [PlanningError::Cancelled] once the stop flag is raised. In-flight
    /// extension attempts complete; no new iterations start.
    pub fn plan_with_stop(
        &self,
        goal: &OvPose,
        start: &Joints,
        options: Option<PlannerOptions>,
        stop: &AtomicBool,
    ) -> Result<Path, PlanningError> {
        let options = options.unwrap_or_default();
        let dof = self.kinematics.dof();
        if start.len() != dof {
            return Err(PlanningError::InvalidInput {
                expected: dof,
                found: start.len(),
            });
        }
        let started = Instant::now();
        let checker = EdgeChecker::new(self.kinematics.clone(), &options);

        // Correct the goal theta against the seed pose before solving.
        let seed_pose = self.kinematics.forward(start);
        let goal = fix_ov_increment(goal, &OvPose::from_isometry(&seed_pose));
        let goal_pose = goal.to_isometry();

        let goal_seeds = self.goal_configurations(&goal_pose, &options, &checker, stop)?;
        debug!("goal tree seeded with {} configurations", goal_seeds.len());

        let mut trees = vec![
            Tree::with_roots(vec![start.clone()]),
            Tree::with_roots(goal_seeds),
        ];

        // The trivial case: a goal seed already within reach of the start.
        for root in 0..trees[1].nodes.len() {
            let joints = &trees[1].nodes[root].joints;
            let gap = joint_distance(start, joints);
            if gap <= options.connect_threshold
                && (gap == 0.0 || checker.edge_valid(start, joints))
            {
                let mut path = vec![start.clone()];
                if gap > 0.0 {
                    path.push(joints.clone());
                }
                return Ok(path);
            }
        }

        let limits = self.kinematics.joint_limits();
        let mut rng = StdRng::seed_from_u64(options.random_seed);

        // The first targets steer each tree at the opposing root.
        let mut targets = vec![
            trees[1].nodes[0].joints.clone(),
            trees[0].nodes[0].joints.clone(),
        ];

        for iteration in 0..options.max_iterations {
            if stop.load(Ordering::Relaxed) {
                return Err(PlanningError::Cancelled);
            }
            if let Some(budget) = options.timeout {
                if started.elapsed() >= budget {
                    return Err(PlanningError::Timeout(budget));
                }
            }

            // Both trees grow concurrently; each worker owns its tree, so
            // node insertion stays single-writer per tree.
            let added: Vec<Option<usize>> = self.pool.install(|| {
                trees
                    .par_iter_mut()
                    .zip(targets.par_iter())
                    .map(|(tree, target)| tree.extend(target, options.step_size, &checker))
                    .collect()
            });

            // Try to join the trees through each accepted extension.
            for side in 0..2 {
                let Some(new_index) = added[side] else {
                    continue;
                };
                let other = 1 - side;
                let new_joints = &trees[side].nodes[new_index].joints;
                let near = trees[other].nearest(new_joints);
                let near_joints = &trees[other].nodes[near].joints;
                let gap = joint_distance(new_joints, near_joints);
                if gap > options.connect_threshold {
                    continue;
                }
                if gap > 0.0 && !checker.edge_valid(new_joints, near_joints) {
                    continue;
                }
                debug!(
                    "trees connected at iteration {}, {} + {} nodes",
                    iteration,
                    trees[0].nodes.len(),
                    trees[1].nodes.len()
                );
                let (start_index, goal_index) = if side == 0 {
                    (new_index, near)
                } else {
                    (near, new_index)
                };
                let mut path = trees[0].path_from_root(start_index);
                let mut tail = trees[1].path_to_root(goal_index);
                if gap == 0.0 {
                    tail.remove(0);
                }
                path.append(&mut tail);
                smooth_path(
                    &mut path,
                    |a, b| checker.edge_valid(a, b),
                    options.max_smoothing_checks,
                    stop,
                );
                return Ok(path);
            }

            // Draw the next pair of targets: occasionally the opposing
            // tree's latest node, otherwise a uniform sample within limits.
            for side in 0..2 {
                let other = 1 - side;
                targets[side] = if rng.gen_range(0.0..1.0) < options.opposing_bias {
                    trees[other].nodes[trees[other].latest].joints.clone()
                } else {
                    random_configuration(&limits, &mut rng)
                };
            }
        }
        Err(PlanningError::IterationExceeded(options.max_iterations))
    }

    /// Solve inverse kinematics for the goal pose and keep the best
    /// configurations: within joint limits, admitted by the constraints,
    /// ranked by the metric. All survivors seed the goal tree so the search
    /// is not biased toward an arbitrary solution branch.
    fn goal_configurations(
        &self,
        goal_pose: &Pose,
        options: &PlannerOptions,
        checker: &EdgeChecker,
        stop: &AtomicBool,
    ) -> Result<Vec<Joints>, PlanningError> {
        if stop.load(Ordering::Relaxed) {
            return Err(PlanningError::Cancelled);
        }
        let solutions = self.kinematics.inverse(goal_pose);
        if stop.load(Ordering::Relaxed) {
            return Err(PlanningError::Cancelled);
        }
        let limits = self.kinematics.joint_limits();
        let mut scored: Vec<(f64, Joints)> = solutions
            .into_iter()
            .filter(|joints| joints.len() == self.kinematics.dof())
            .filter(|joints| within_limits(joints, &limits))
            .filter(|joints| checker.configuration_valid(joints))
            .map(|joints| {
                let cost = options
                    .metric
                    .cost(&self.kinematics.forward(&joints), goal_pose);
                (cost, joints)
            })
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(options.max_goal_seeds);
        if scored.is_empty() {
            return Err(PlanningError::NoIkSolution);
        }
        Ok(scored.into_iter().map(|(_, joints)| joints).collect())
    }
}

fn random_configuration(limits: &JointLimits, rng: &mut StdRng) -> Joints {
    limits
        .iter()
        .map(|&(low, high)| {
            if high > low {
                rng.gen_range(low..=high)
            } else {
                low
            }
        })
        .collect()
}

fn within_limits(joints: &Joints, limits: &JointLimits) -> bool {
    joints
        .iter()
        .zip(limits.iter())
        .all(|(value, &(low, high))| *value >= low && *value <= high)
}
