//! Retained clusters → transparent crops.
//!
//! Each crop copies the colour channels of the original note unchanged over
//! the padded box; alpha is 255 where the stroke mask has ink and 0
//! elsewhere. A cluster whose box cannot be cropped is skipped with an
//! [`ExtractionWarning`]; file names stay contiguous over the emitted crops.

mod manifest;

pub use manifest::{build_manifest, Manifest, ManifestEntry, NO_DIAGRAMS_MESSAGE};

use crate::cluster::DiagramCluster;
use crate::error::ExtractionWarning;
use crate::image::ImageRgba8;
use crate::preprocess::StrokeMask;
use crate::types::{BoundingBox, ComponentId};
use image::{Rgba, RgbaImage};
use log::warn;
use rayon::prelude::*;
use serde::Serialize;

pub const OPAQUE: u8 = 255;

pub fn diagram_file_name(index: usize) -> String {
    format!("diagram_{index}.png")
}

/// Opacity statistics of one crop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CropStats {
    pub opaque_pixels: u64,
    /// `opaque_pixels` over the crop area.
    pub coverage: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedDiagram {
    pub file: String,
    /// Padded box in original image coordinates.
    pub bbox: BoundingBox,
    pub confidence: f64,
    pub members: Vec<ComponentId>,
    pub image: RgbaImage,
    pub stats: CropStats,
}

#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub diagrams: Vec<ExtractedDiagram>,
    pub warnings: Vec<ExtractionWarning>,
}

/// Crop every cluster, in order.
pub fn extract_diagrams(
    input: ImageRgba8<'_>,
    mask: &StrokeMask,
    clusters: &[DiagramCluster],
) -> Extraction {
    let crops: Vec<Result<(RgbaImage, CropStats), ExtractionWarning>> = clusters
        .par_iter()
        .enumerate()
        .map(|(position, cluster)| crop_cluster(input, mask, position, &cluster.padded))
        .collect();

    let mut out = Extraction::default();
    for (cluster, crop) in clusters.iter().zip(crops) {
        match crop {
            Ok((image, stats)) => {
                let file = diagram_file_name(out.diagrams.len());
                out.diagrams.push(ExtractedDiagram {
                    file,
                    bbox: cluster.padded,
                    confidence: cluster.confidence,
                    members: cluster.members.clone(),
                    image,
                    stats,
                });
            }
            Err(warning) => {
                warn!("{warning}");
                out.warnings.push(warning);
            }
        }
    }
    out
}

fn crop_cluster(
    input: ImageRgba8<'_>,
    mask: &StrokeMask,
    position: usize,
    bbox: &BoundingBox,
) -> Result<(RgbaImage, CropStats), ExtractionWarning> {
    if bbox.is_empty() {
        return Err(ExtractionWarning::DegenerateCrop {
            position,
            bbox: *bbox,
        });
    }
    let fits_input = bbox.right() as usize <= input.w && bbox.bottom() as usize <= input.h;
    let fits_mask = bbox.right() <= mask.width() && bbox.bottom() <= mask.height();
    if !fits_input || !fits_mask {
        return Err(ExtractionWarning::CropOutOfBounds {
            position,
            bbox: *bbox,
        });
    }

    let mut opaque_pixels = 0u64;
    let image = RgbaImage::from_fn(bbox.w, bbox.h, |dx, dy| {
        let (x, y) = (bbox.x + dx, bbox.y + dy);
        let [r, g, b, _] = input.pixel(x as usize, y as usize);
        if mask.is_ink(x, y) {
            opaque_pixels += 1;
            Rgba([r, g, b, OPAQUE])
        } else {
            Rgba([r, g, b, 0])
        }
    });
    let stats = CropStats {
        opaque_pixels,
        coverage: opaque_pixels as f64 / bbox.area() as f64,
    };
    Ok((image, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::INK;
    use image::{GrayImage, Luma};

    fn cluster(padded: BoundingBox, confidence: f64) -> DiagramCluster {
        DiagramCluster {
            members: vec![ComponentId(0)],
            bbox: padded,
            padded,
            confidence,
        }
    }

    #[test]
    fn crop_keeps_colour_and_masks_alpha() {
        let rgba = RgbaImage::from_fn(8, 6, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 7, 255]));
        let mut gray = GrayImage::new(8, 6);
        gray.put_pixel(3, 2, Luma([INK]));
        let mask = StrokeMask::from_gray(gray);

        let out = extract_diagrams(
            ImageRgba8::from_rgba(&rgba),
            &mask,
            &[cluster(BoundingBox::new(2, 1, 3, 3), 0.9)],
        );
        assert!(out.warnings.is_empty());
        let d = &out.diagrams[0];
        assert_eq!(d.file, "diagram_0.png");
        assert_eq!(d.image.dimensions(), (3, 3));
        assert_eq!(d.image.get_pixel(1, 1), &Rgba([30, 20, 7, 255]));
        assert_eq!(d.image.get_pixel(0, 0), &Rgba([20, 10, 7, 0]));
        assert_eq!(d.stats.opaque_pixels, 1);
        assert!((d.stats.coverage - 1.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_boxes_are_skipped_and_names_stay_contiguous() {
        let rgba = RgbaImage::new(10, 10);
        let mask = StrokeMask::from_gray(GrayImage::new(10, 10));
        let clusters = [
            cluster(BoundingBox::new(0, 0, 4, 4), 0.9),
            cluster(BoundingBox::new(5, 5, 0, 3), 0.8),
            cluster(BoundingBox::new(8, 8, 4, 4), 0.8),
            cluster(BoundingBox::new(5, 0, 4, 4), 0.7),
        ];
        let out = extract_diagrams(ImageRgba8::from_rgba(&rgba), &mask, &clusters);
        let files: Vec<&str> = out.diagrams.iter().map(|d| d.file.as_str()).collect();
        assert_eq!(files, vec!["diagram_0.png", "diagram_1.png"]);
        assert_eq!(out.diagrams[1].bbox, BoundingBox::new(5, 0, 4, 4));
        assert!(matches!(
            out.warnings[..],
            [
                ExtractionWarning::DegenerateCrop { position: 1, .. },
                ExtractionWarning::CropOutOfBounds { position: 2, .. }
            ]
        ));
    }
}
