//! Rust implementation of constrained bidirectional RRT (CBiRRT) motion
//! planning for serial robot arms.
//!
//! The planner searches the joint space of a kinematic chain for a path that
//! brings the end effector from a known start configuration to a requested
//! pose. It consumes the kinematic model through the [kinematic_traits::Kinematics]
//! trait, so any forward/inverse solver can drive it; the crate itself
//! implements no robot. Admissibility is pluggable: named constraints are
//! checked along every interpolated edge of the search trees, and metrics and
//! path distance functions steer sampling and edge resolution.
//!
//! # Features
//!
//! - Bidirectional search: one tree grows from the start configuration, the
//!   other from inverse kinematics solutions of the goal pose; all solutions
//!   within limits and constraints seed the goal tree.
//! - Every accepted edge is verified against all active constraints at every
//!   interpolated pose, not only at the waypoints. The returned path keeps
//!   this invariant through shortcut smoothing.
//! - Goal poses are taken in orientation vector form; the theta sign flip
//!   near the ±Z singularity is corrected against the seed pose before
//!   solving ([orientation::fix_ov_increment]).
//! - The two trees grow in parallel on a worker pool sized at construction.
//!   Searches are cancellable through a stop flag and observe iteration and
//!   wall clock budgets.
//! - Sampling is seeded, so a planning request is reproducible.

pub mod constraints;
pub mod kinematic_traits;
pub mod orientation;
pub mod planner_error;

#[path = "utils/utils.rs"]
pub mod utils;

#[path = "path_plan/options.rs"]
pub mod options;

#[path = "path_plan/path_check.rs"]
mod path_check;

#[path = "path_plan/cbirrt.rs"]
pub mod cbirrt;

#[path = "path_plan/smoother.rs"]
pub mod smoother;

#[cfg(test)]
mod tests;
