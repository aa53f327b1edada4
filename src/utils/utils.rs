//! Helper functions

use crate::kinematic_traits::Joints;

/// Euclidean distance between two joint configurations.
pub fn joint_distance(a: &Joints, b: &Joints) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Element-wise linear interpolation between two configurations.
pub fn interpolate_joints(start: &Joints, end: &Joints, t: f64) -> Joints {
    if t <= 0.0 {
        return start.clone();
    } else if t >= 1.0 {
        return end.clone();
    }
    start
        .iter()
        .zip(end.iter())
        .map(|(s, e)| s + t * (e - s))
        .collect()
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for value in joints {
        row_str.push_str(&format!("{:5.2} ", value.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: &[f64]) -> Joints {
    degrees.iter().map(|d| d.to_radians()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_distance() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 2.0];
        assert_eq!(joint_distance(&a, &b), 3.0);
        assert_eq!(joint_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_interpolate_joints() {
        let a = vec![0.0, 1.0];
        let b = vec![2.0, 3.0];
        assert_eq!(interpolate_joints(&a, &b, 0.5), vec![1.0, 2.0]);
        assert_eq!(interpolate_joints(&a, &b, -1.0), a);
        assert_eq!(interpolate_joints(&a, &b, 2.0), b);
    }

    #[test]
    fn test_as_radians() {
        let radians = as_radians(&[180.0, 90.0]);
        assert!((radians[0] - std::f64::consts::PI).abs() < 1e-12);
        assert!((radians[1] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
