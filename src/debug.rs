//! Debug renderings of a finished run.
//!
//! - `mask_image`: the binary ink mask as a grayscale PNG-ready buffer.
//! - `render_overlay`: the note with component boxes coloured by label and
//!   emitted diagram boxes on top.

use crate::detector::ExtractionOutcome;
use crate::image::ImageRgba8;
use crate::types::{BoundingBox, Label};
use image::{GrayImage, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

const HANDWRITING: Rgba<u8> = Rgba([40, 110, 230, 255]);
const DIAGRAM: Rgba<u8> = Rgba([40, 180, 60, 255]);
const EMITTED: Rgba<u8> = Rgba([220, 30, 30, 255]);

pub fn mask_image(outcome: &ExtractionOutcome) -> GrayImage {
    outcome.mask.as_gray().clone()
}

/// Copy of `input` annotated with the run's components and crops.
pub fn render_overlay(input: ImageRgba8<'_>, outcome: &ExtractionOutcome) -> RgbaImage {
    let mut canvas = input.to_rgba_image();
    for sample in &outcome.trace.components {
        let colour = match sample.label {
            Label::Handwriting => HANDWRITING,
            Label::Diagram => DIAGRAM,
        };
        draw_box(&mut canvas, &sample.bbox, colour);
    }
    for diagram in &outcome.diagrams {
        draw_box(&mut canvas, &diagram.bbox, EMITTED);
    }
    canvas
}

fn draw_box(canvas: &mut RgbaImage, bbox: &BoundingBox, colour: Rgba<u8>) {
    if bbox.is_empty() {
        return;
    }
    let rect = Rect::at(bbox.x as i32, bbox.y as i32).of_size(bbox.w, bbox.h);
    draw_hollow_rect_mut(canvas, rect, colour);
}
