//! Error taxonomy of the motion planner.

use std::fmt;
use std::time::Duration;

/// Failures a planning request can surface to the caller. Rejected extension
/// attempts are not failures; only budget exhaustion, bad input, missing
/// inverse kinematics solutions and cancellation reach this level.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanningError {
    /// The start configuration length does not match the kinematic chain.
    InvalidInput { expected: usize, found: usize },
    /// Inverse kinematics produced no goal configuration that passes joint
    /// limits and the active constraints. Retrying with relaxed constraints
    /// may succeed.
    NoIkSolution,
    /// The iteration budget ran out before the trees connected. Retrying
    /// with a larger budget may succeed.
    IterationExceeded(usize),
    /// The time budget ran out before the trees connected.
    Timeout(Duration),
    /// The caller cancelled the search via the stop flag.
    Cancelled,
    /// The kinematic model reports zero degrees of freedom.
    ZeroDof,
    /// The worker pool could not be created.
    WorkerPool(String),
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlanningError::InvalidInput { expected, found } => write!(
                f,
                "Invalid start configuration: expected {} joints, found {}",
                expected, found
            ),
            PlanningError::NoIkSolution => {
                write!(f, "No inverse kinematics solution satisfies the constraints")
            }
            PlanningError::IterationExceeded(iterations) => {
                write!(f, "No path found within {} iterations", iterations)
            }
            PlanningError::Timeout(budget) => {
                write!(f, "No path found within the time budget of {:?}", budget)
            }
            PlanningError::Cancelled => write!(f, "Planning cancelled by the caller"),
            PlanningError::ZeroDof => {
                write!(f, "The kinematic model has zero degrees of freedom")
            }
            PlanningError::WorkerPool(ref err) => {
                write!(f, "Could not create the worker pool: {}", err)
            }
        }
    }
}

impl std::error::Error for PlanningError {}
