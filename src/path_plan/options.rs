//! Planner configuration: the steering metric, the path distance function,
//! named constraints and the search budgets. Options are built with defaults,
//! adjusted through the setters, and are read-only once handed to the
//! planner. A fresh bundle is expected per planning call.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::constraints::{Constraint, Metric, PathDist, SquaredNormMetric, pose_path_distance};

/// Iteration budget of the search loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;

/// Joint space extension bound per tree growth step, radians.
pub const DEFAULT_STEP_SIZE: f64 = 0.2;

/// Probability that a tree targets the opposing tree's latest node instead of
/// a uniform random sample.
pub const DEFAULT_OPPOSING_BIAS: f64 = 0.25;

/// Path distance per interpolation sample of an edge check.
pub const DEFAULT_EDGE_RESOLUTION: f64 = 0.05;

/// Upper bound on interpolation samples per edge check.
pub const DEFAULT_MAX_EDGE_SAMPLES: usize = 64;

/// How many inverse kinematics solutions, best first, seed the goal tree.
pub const DEFAULT_MAX_GOAL_SEEDS: usize = 10;

/// Edge validations the smoother may spend on shortcuts.
pub const DEFAULT_MAX_SMOOTHING_CHECKS: usize = 200;

/// Fixed seed so repeated searches are reproducible.
pub const DEFAULT_RANDOM_SEED: u64 = 42;

#[derive(Clone)]
pub struct PlannerOptions {
    pub(crate) metric: Arc<dyn Metric>,
    pub(crate) path_dist: Arc<dyn PathDist>,
    pub(crate) constraints: HashMap<String, Arc<dyn Constraint>>,

    pub max_iterations: usize,
    /// Optional wall clock budget; `None` leaves only the iteration budget.
    pub timeout: Option<Duration>,
    pub step_size: f64,
    /// Joint space distance below which the two trees may be joined.
    pub connect_threshold: f64,
    pub opposing_bias: f64,
    pub edge_resolution: f64,
    pub max_edge_samples: usize,
    pub max_goal_seeds: usize,
    pub max_smoothing_checks: usize,
    pub random_seed: u64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        PlannerOptions {
            metric: Arc::new(SquaredNormMetric::default()),
            path_dist: Arc::new(pose_path_distance),
            constraints: HashMap::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            timeout: None,
            step_size: DEFAULT_STEP_SIZE,
            connect_threshold: DEFAULT_STEP_SIZE,
            opposing_bias: DEFAULT_OPPOSING_BIAS,
            edge_resolution: DEFAULT_EDGE_RESOLUTION,
            max_edge_samples: DEFAULT_MAX_EDGE_SAMPLES,
            max_goal_seeds: DEFAULT_MAX_GOAL_SEEDS,
            max_smoothing_checks: DEFAULT_MAX_SMOOTHING_CHECKS,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }
}

impl PlannerOptions {
    /// Replace the metric ranking candidate goal configurations.
    pub fn set_metric(&mut self, metric: Arc<dyn Metric>) {
        self.metric = metric;
    }

    /// Replace the path distance function choosing edge check resolution.
    pub fn set_path_dist(&mut self, path_dist: Arc<dyn PathDist>) {
        self.path_dist = path_dist;
    }

    /// Register a named constraint. Re-adding a name replaces the prior
    /// constraint under that name.
    pub fn add_constraint(&mut self, name: &str, constraint: Arc<dyn Constraint>) {
        self.constraints.insert(name.to_string(), constraint);
    }

    /// Names of the active constraints, for diagnostics.
    pub fn constraint_names(&self) -> Vec<&str> {
        self.constraints.keys().map(|name| name.as_str()).collect()
    }
}
