//! Output orders for retained clusters.
//!
//! Both orders are total: remaining ties fall back to box position and then
//! to the smallest member id, so the result never depends on input order.

use super::DiagramCluster;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Row threshold as a fraction of the mean padded height.
const ROW_THRESHOLD_FACTOR: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortingMethod {
    /// Rows top to bottom, left to right within a row.
    #[default]
    ReadingOrder,
    /// Largest padded box first.
    Area,
}

pub fn order_clusters(clusters: &mut Vec<DiagramCluster>, method: SortingMethod) {
    match method {
        SortingMethod::Area => clusters.sort_by(|a, b| {
            b.padded
                .area()
                .cmp(&a.padded.area())
                .then_with(|| by_position(a, b))
        }),
        SortingMethod::ReadingOrder => {
            let rows = reading_rows(std::mem::take(clusters));
            clusters.extend(rows.into_iter().flatten());
        }
    }
}

/// Group clusters into rows of nearby vertical centres.
///
/// Clusters are walked by ascending centre; a new row starts whenever the
/// step to the previous centre exceeds half the mean padded height. Rows
/// come out top to bottom, each sorted by horizontal centre.
pub fn reading_rows(mut clusters: Vec<DiagramCluster>) -> Vec<Vec<DiagramCluster>> {
    if clusters.is_empty() {
        return Vec::new();
    }
    let mean_height =
        clusters.iter().map(|c| c.padded.h as f64).sum::<f64>() / clusters.len() as f64;
    let threshold = ROW_THRESHOLD_FACTOR * mean_height;

    clusters.sort_by(|a, b| {
        center_y(a)
            .total_cmp(&center_y(b))
            .then_with(|| center_x(a).total_cmp(&center_x(b)))
            .then_with(|| a.members.first().cmp(&b.members.first()))
    });

    let mut rows: Vec<Vec<DiagramCluster>> = Vec::new();
    let mut last_y = f64::NEG_INFINITY;
    for cluster in clusters {
        let y = center_y(&cluster);
        match rows.last_mut() {
            Some(row) if y - last_y <= threshold => row.push(cluster),
            _ => rows.push(vec![cluster]),
        }
        last_y = y;
    }
    for row in &mut rows {
        row.sort_by(|a, b| {
            center_x(a)
                .total_cmp(&center_x(b))
                .then_with(|| center_y(a).total_cmp(&center_y(b)))
                .then_with(|| a.members.first().cmp(&b.members.first()))
        });
    }
    rows
}

fn by_position(a: &DiagramCluster, b: &DiagramCluster) -> Ordering {
    (a.padded.y, a.padded.x, a.members.first()).cmp(&(b.padded.y, b.padded.x, b.members.first()))
}

fn center_x(c: &DiagramCluster) -> f64 {
    c.padded.center().0
}

fn center_y(c: &DiagramCluster) -> f64 {
    c.padded.center().1
}
