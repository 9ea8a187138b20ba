//! Running-median similarity clustering over sorted values.

use crate::outliers::median;

/// Relative distance of `value` from `center`. Zero center matches only zero.
pub fn relative_distance(value: f64, center: f64) -> f64 {
    if center == 0.0 {
        if value == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((value - center) / center).abs()
    }
}

/// Walk sorted values, extending the current cluster while each value is
/// within `tolerance` of the cluster's running median.
pub fn cluster(sorted: &[f64], tolerance: f64) -> Vec<Vec<f64>> {
    let mut clusters: Vec<Vec<f64>> = Vec::new();
    for &value in sorted {
        match clusters.last_mut() {
            Some(current) if relative_distance(value, median(current)) <= tolerance => {
                current.push(value);
            }
            _ => clusters.push(vec![value]),
        }
    }
    clusters
}

/// The largest cluster; on equal size the earlier (lower-valued) one.
pub fn largest(clusters: &[Vec<f64>]) -> Option<&Vec<f64>> {
    clusters
        .iter()
        .reduce(|best, c| if c.len() > best.len() { c } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tight_values_form_one_cluster() {
        let clusters = cluster(&[9.0, 10.0, 10.0, 11.0, 12.0], 0.30);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 5);
    }

    #[test]
    fn distant_groups_split() {
        let clusters = cluster(&[1.0, 1.1, 1.2, 5.0, 5.2], 0.30);
        assert_eq!(clusters, vec![vec![1.0, 1.1, 1.2], vec![5.0, 5.2]]);
        assert_eq!(largest(&clusters).map(Vec::len), Some(3));
    }

    #[test]
    fn ties_prefer_first_cluster() {
        let clusters = cluster(&[1.0, 1.1, 5.0, 5.1], 0.30);
        assert_eq!(largest(&clusters), Some(&vec![1.0, 1.1]));
    }

    #[test]
    fn zero_center() {
        assert_eq!(relative_distance(0.0, 0.0), 0.0);
        assert!(relative_distance(1.0, 0.0).is_infinite());
    }
}
