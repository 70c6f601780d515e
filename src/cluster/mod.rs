//! Diagram components → padded, disjoint, text-clear clusters.
//!
//! Stages, in order:
//! 1. grouping: union-find over the "border distance ≤ proximity" relation
//!    between diagram components;
//! 2. bounding: union of member boxes, padded and clipped to the image;
//! 3. overlap resolution: the first pair of intersecting padded boxes is
//!    merged until none intersect;
//! 4. text-touch rejection: clusters near or over handwriting are dropped
//!    whole;
//! 5. minimum confidence, then the retained-count cap;
//! 6. output ordering ([`SortingMethod`]).
//!
//! Components are never modified; clusters refer to them by id.

pub mod ordering;
mod proximity;
mod union_find;

pub use ordering::{order_clusters, reading_rows, SortingMethod};
pub use proximity::{border_distance_within, box_distance_within};
pub use union_find::UnionFind;

use crate::features::StrokeComponent;
use crate::types::{BoundingBox, ComponentId};
use log::debug;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterOptions {
    /// Grouping and text-touch distance (px).
    pub proximity: f64,
    pub padding: u32,
    pub max_diagrams: usize,
    pub sorting: SortingMethod,
    /// Clusters below this mean confidence are dropped before the cap.
    pub min_confidence: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            proximity: 25.0,
            padding: 3,
            max_diagrams: 10,
            sorting: SortingMethod::ReadingOrder,
            min_confidence: 0.0,
        }
    }
}

/// Group of mutually proximate diagram components.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiagramCluster {
    /// Ascending, never empty.
    pub members: Vec<ComponentId>,
    /// Union of member boxes.
    pub bbox: BoundingBox,
    /// `bbox` grown by the padding and clipped to the image.
    pub padded: BoundingBox,
    /// Mean member confidence.
    pub confidence: f64,
}

/// Why a cluster was not emitted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// A member lies within the proximity of a handwriting component.
    NearHandwriting {
        handwriting: ComponentId,
        distance: f64,
    },
    /// The padded box intersects a handwriting bounding box.
    OverlapsHandwriting { handwriting: ComponentId },
    /// The padded box lies within the proximity of handwriting ink.
    PaddingNearHandwriting {
        handwriting: ComponentId,
        distance: f64,
    },
    BelowMinConfidence,
    OverCap,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RejectedCluster {
    pub cluster: DiagramCluster,
    pub reason: RejectionReason,
}

/// Output of the clustering stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clustering {
    /// Emitted clusters in output order.
    pub clusters: Vec<DiagramCluster>,
    pub rejected: Vec<RejectedCluster>,
    /// Connected groups before overlap resolution.
    pub proximity_groups: usize,
    pub overlap_merges: usize,
}

/// Cluster under construction; `indices` point into the component slice.
struct Draft {
    indices: Vec<usize>,
    cluster: DiagramCluster,
}

impl Draft {
    fn build(
        indices: Vec<usize>,
        components: &[StrokeComponent],
        frame: (u32, u32),
        padding: u32,
    ) -> Self {
        let mut members: Vec<ComponentId> = indices.iter().map(|&i| components[i].id).collect();
        members.sort();
        let bbox = indices
            .iter()
            .skip(1)
            .fold(components[indices[0]].bbox, |acc, &i| acc.union(&components[i].bbox));
        let confidence =
            indices.iter().map(|&i| components[i].confidence).sum::<f64>() / indices.len() as f64;
        Self {
            cluster: DiagramCluster {
                members,
                bbox,
                padded: bbox.padded(padding, frame.0, frame.1),
                confidence,
            },
            indices,
        }
    }
}

/// Cluster the diagram-labelled components of one `width × height` image.
pub fn cluster_diagrams(
    components: &[StrokeComponent],
    width: u32,
    height: u32,
    options: &ClusterOptions,
) -> Clustering {
    let frame = (width, height);
    let diagram: Vec<usize> = (0..components.len())
        .filter(|&i| components[i].is_diagram())
        .collect();
    if diagram.is_empty() {
        return Clustering::default();
    }

    let mut uf = UnionFind::new(diagram.len());
    for a in 0..diagram.len() {
        for b in a + 1..diagram.len() {
            let (ca, cb) = (&components[diagram[a]], &components[diagram[b]]);
            if border_distance_within(ca, cb, options.proximity).is_some() {
                uf.union(a, b);
            }
        }
    }
    let mut drafts: Vec<Draft> = uf
        .groups()
        .into_iter()
        .map(|g| {
            let indices = g.into_iter().map(|k| diagram[k]).collect();
            Draft::build(indices, components, frame, options.padding)
        })
        .collect();
    let proximity_groups = drafts.len();

    let overlap_merges = resolve_overlaps(&mut drafts, components, frame, options.padding);

    let handwriting: Vec<&StrokeComponent> =
        components.iter().filter(|c| !c.is_diagram()).collect();
    let mut survivors = Vec::new();
    let mut rejected = Vec::new();
    for draft in drafts {
        let reason = text_touch(&draft, components, &handwriting, options.proximity).or(
            (draft.cluster.confidence < options.min_confidence)
                .then_some(RejectionReason::BelowMinConfidence),
        );
        match reason {
            Some(reason) => rejected.push(RejectedCluster {
                cluster: draft.cluster,
                reason,
            }),
            None => survivors.push(draft.cluster),
        }
    }

    order_clusters(&mut survivors, options.sorting);
    if survivors.len() > options.max_diagrams {
        let (kept, capped) = enforce_cap(survivors, options.max_diagrams);
        survivors = kept;
        order_clusters(&mut survivors, options.sorting);
        rejected.extend(capped.into_iter().map(|cluster| RejectedCluster {
            cluster,
            reason: RejectionReason::OverCap,
        }));
    }

    debug!(
        "clustering: {} diagram components, {} groups, {} overlap merges, {} kept, {} rejected",
        diagram.len(),
        proximity_groups,
        overlap_merges,
        survivors.len(),
        rejected.len()
    );

    Clustering {
        clusters: survivors,
        rejected,
        proximity_groups,
        overlap_merges,
    }
}

/// Merge intersecting padded boxes until all are disjoint. Returns the number
/// of merges.
fn resolve_overlaps(
    drafts: &mut Vec<Draft>,
    components: &[StrokeComponent],
    frame: (u32, u32),
    padding: u32,
) -> usize {
    let mut merges = 0;
    while let Some((i, j)) = first_intersecting_pair(drafts) {
        let absorbed = drafts.remove(j);
        let mut indices = std::mem::take(&mut drafts[i].indices);
        indices.extend(absorbed.indices);
        indices.sort_unstable();
        drafts[i] = Draft::build(indices, components, frame, padding);
        merges += 1;
    }
    merges
}

fn first_intersecting_pair(drafts: &[Draft]) -> Option<(usize, usize)> {
    for i in 0..drafts.len() {
        for j in i + 1..drafts.len() {
            if drafts[i].cluster.padded.intersects(&drafts[j].cluster.padded) {
                return Some((i, j));
            }
        }
    }
    None
}

fn text_touch(
    draft: &Draft,
    components: &[StrokeComponent],
    handwriting: &[&StrokeComponent],
    proximity: f64,
) -> Option<RejectionReason> {
    for hw in handwriting {
        for &m in &draft.indices {
            if let Some(distance) = border_distance_within(&components[m], hw, proximity) {
                return Some(RejectionReason::NearHandwriting {
                    handwriting: hw.id,
                    distance,
                });
            }
        }
    }
    let padded = draft.cluster.padded;
    if let Some(hw) = handwriting.iter().find(|hw| padded.intersects(&hw.bbox)) {
        return Some(RejectionReason::OverlapsHandwriting { handwriting: hw.id });
    }
    handwriting.iter().find_map(|hw| {
        box_distance_within(&padded, hw, proximity).map(|distance| {
            RejectionReason::PaddingNearHandwriting {
                handwriting: hw.id,
                distance,
            }
        })
    })
}

/// Keep the `max` most confident clusters of an ordered list; earlier
/// positions win ties. Returns `(kept, dropped)`, both in input order.
fn enforce_cap(
    ordered: Vec<DiagramCluster>,
    max: usize,
) -> (Vec<DiagramCluster>, Vec<DiagramCluster>) {
    let mut ranked: Vec<usize> = (0..ordered.len()).collect();
    ranked.sort_by(|&a, &b| {
        ordered[b]
            .confidence
            .total_cmp(&ordered[a].confidence)
            .then(a.cmp(&b))
    });
    let mut keep = vec![false; ordered.len()];
    for &i in ranked.iter().take(max) {
        keep[i] = true;
    }
    let mut kept = Vec::with_capacity(max);
    let mut dropped = Vec::new();
    for (cluster, keep) in ordered.into_iter().zip(keep) {
        if keep {
            kept.push(cluster);
        } else {
            dropped.push(cluster);
        }
    }
    (kept, dropped)
}
