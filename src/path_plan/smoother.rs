//! Shortcut smoothing of planned joint space paths.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::kinematic_traits::{Joints, Path};

/// Shorten the path by replacing runs of interior waypoints with the direct
/// edge between their endpoints. `edge_valid` must be the same per-edge
/// constraint check the planner accepted the path with, so a shortcut can
/// never introduce a violation; a rejected shortcut keeps the original
/// waypoints. The first and last waypoints are never removed. The scan is
/// deterministic, tries the longest shortcut from each anchor first, and
/// terminates when no improving shortcut remains, the stop flag is raised, or
/// `max_checks` validations were spent.
pub fn smooth_path<F>(path: &mut Path, edge_valid: F, max_checks: usize, stop: &AtomicBool)
where
    F: Fn(&Joints, &Joints) -> bool,
{
    if path.len() < 3 {
        return;
    }
    let before = path.len();
    let mut checks = 0;
    'scan: loop {
        for a in 0..path.len().saturating_sub(2) {
            for b in ((a + 2)..path.len()).rev() {
                if stop.load(Ordering::Relaxed) || checks >= max_checks {
                    break 'scan;
                }
                checks += 1;
                if edge_valid(&path[a], &path[b]) {
                    path.drain(a + 1..b);
                    continue 'scan;
                }
            }
        }
        break;
    }
    if path.len() < before {
        debug!(
            "smoothing removed {} of {} waypoints in {} checks",
            before - path.len(),
            before,
            checks
        );
    }
}
