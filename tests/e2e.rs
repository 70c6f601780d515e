mod common;

use common::synthetic_image::{rect_note, Note, INK};
use diagram_extractor::cluster::{RejectionReason, SortingMethod};
use diagram_extractor::extract::NO_DIAGRAMS_MESSAGE;
use diagram_extractor::image::ImageRgba8;
use diagram_extractor::{DiagramExtractor, ExtractionConfig, ExtractionOutcome, Label};
use image::RgbaImage;

fn run(note: &RgbaImage, config: ExtractionConfig) -> ExtractionOutcome {
    let extractor = DiagramExtractor::new(config).expect("valid config");
    extractor
        .process(ImageRgba8::from_rgba(note), "note.png")
        .expect("extraction succeeds")
}

fn bboxes(outcome: &ExtractionOutcome) -> Vec<[u32; 4]> {
    outcome.manifest.diagrams.iter().map(|d| d.bbox).collect()
}

#[test]
fn blank_page_reports_no_diagrams() {
    let note = Note::new(320, 240).build();
    let outcome = run(&note, ExtractionConfig::default());

    assert!(outcome.diagrams.is_empty());
    assert!(outcome.warnings.is_empty());
    let json = serde_json::to_value(&outcome.manifest).unwrap();
    assert_eq!(json["original_file"], "note.png");
    assert_eq!(json["diagrams"], serde_json::json!([]));
    assert_eq!(json["message"], NO_DIAGRAMS_MESSAGE);
}

#[test]
fn isolated_rectangle_is_cropped_with_padding() {
    let note = rect_note(300, 250, 100, 100);
    let outcome = run(&note, ExtractionConfig::default());

    assert_eq!(bboxes(&outcome), vec![[97, 97, 66, 46]]);
    let entry = &outcome.manifest.diagrams[0];
    assert_eq!(entry.file, "diagram_0.png");
    assert!(
        entry.confidence >= 0.8,
        "confidence {:.3} below 0.8",
        entry.confidence
    );
    assert!(outcome.manifest.message.is_none());

    let crop = &outcome.diagrams[0];
    assert_eq!(crop.image.dimensions(), (66, 46));
    // Stroke pixel keeps its colour and becomes opaque; paper turns clear.
    assert_eq!(*crop.image.get_pixel(3, 3), INK);
    assert_eq!(crop.image.get_pixel(0, 0)[3], 0);
    assert_eq!(crop.image.get_pixel(33, 23)[3], 0);
    assert_eq!(crop.stats.opaque_pixels, 60 * 40 - 54 * 34);

    let sample = &outcome.trace.components[0];
    assert_eq!(sample.label, Label::Diagram);
    assert!(sample.descriptors.area >= 2000.0);
}

#[test]
fn shapes_ten_pixels_apart_merge() {
    let note = Note::new(360, 250)
        .rect(100, 100, 60, 40, 3)
        .rect(170, 100, 60, 40, 3)
        .build();
    let outcome = run(&note, ExtractionConfig::default());

    assert_eq!(bboxes(&outcome), vec![[97, 97, 136, 46]]);
    assert_eq!(outcome.diagrams[0].members.len(), 2);
    assert_eq!(outcome.trace.proximity_groups, 1);
}

#[test]
fn shapes_forty_pixels_apart_stay_separate() {
    let note = Note::new(360, 250)
        .rect(100, 100, 60, 40, 3)
        .rect(200, 100, 60, 40, 3)
        .build();
    let outcome = run(&note, ExtractionConfig::default());

    assert_eq!(bboxes(&outcome), vec![[97, 97, 66, 46], [197, 97, 66, 46]]);
    let files: Vec<&str> = outcome.diagrams.iter().map(|d| d.file.as_str()).collect();
    assert_eq!(files, ["diagram_0.png", "diagram_1.png"]);
}

#[test]
fn diagram_next_to_handwriting_is_discarded() {
    // Scribble ink starts 5 px right of the rectangle.
    let note = Note::new(400, 260)
        .rect(100, 100, 60, 40, 3)
        .wave(166, 180, 120.0, 10.0, 16.0)
        .build();
    let config = ExtractionConfig {
        min_contour_area: 300.0,
        ..ExtractionConfig::default()
    };
    let outcome = run(&note, config);

    assert_eq!(outcome.trace.components.len(), 2);
    let labels: Vec<Label> = outcome.trace.components.iter().map(|c| c.label).collect();
    assert_eq!(labels, [Label::Diagram, Label::Handwriting]);

    assert!(outcome.diagrams.is_empty());
    assert_eq!(
        outcome.manifest.message.as_deref(),
        Some(NO_DIAGRAMS_MESSAGE)
    );
    let rejected: Vec<_> = outcome.trace.rejected().collect();
    assert_eq!(rejected.len(), 1);
    match rejected[0].rejection {
        Some(RejectionReason::NearHandwriting { distance, .. }) => {
            assert!(distance <= 25.0, "distance {distance}")
        }
        other => panic!("unexpected rejection {other:?}"),
    }
}

#[test]
fn diagram_on_the_left_edge_is_cropped() {
    let note = Note::new(300, 200).rect(0, 50, 60, 40, 3).build();
    let outcome = run(&note, ExtractionConfig::default());

    assert_eq!(outcome.trace.discarded_components, 0);
    assert_eq!(bboxes(&outcome), vec![[0, 47, 63, 46]]);
    assert_eq!(*outcome.diagrams[0].image.get_pixel(0, 3), INK);
}

#[test]
fn handwriting_on_the_left_edge_still_isolates_diagrams() {
    let note = Note::new(320, 240)
        .wave(0, 180, 120.0, 10.0, 16.0)
        .rect(185, 100, 60, 40, 3)
        .build();
    let config = ExtractionConfig {
        min_contour_area: 300.0,
        ..ExtractionConfig::default()
    };
    let outcome = run(&note, config);

    assert_eq!(outcome.trace.components.len(), 2);
    assert_eq!(outcome.trace.labels.handwriting, 1);
    assert!(outcome.diagrams.is_empty());
    let reasons: Vec<_> = outcome.trace.rejected().map(|c| c.rejection).collect();
    assert!(
        matches!(reasons[..], [Some(RejectionReason::NearHandwriting { .. })]),
        "{reasons:?}"
    );
}

#[test]
fn crops_follow_reading_order() {
    let note = Note::new(420, 340)
        .rect(300, 100, 60, 40, 3)
        .rect(60, 100, 60, 40, 3)
        .rect(100, 250, 60, 40, 3)
        .build();
    let outcome = run(&note, ExtractionConfig::default());

    assert_eq!(
        bboxes(&outcome),
        vec![[57, 97, 66, 46], [297, 97, 66, 46], [97, 247, 66, 46]]
    );
    for (i, entry) in outcome.manifest.diagrams.iter().enumerate() {
        assert_eq!(entry.file, format!("diagram_{i}.png"));
    }
}

#[test]
fn area_sorting_puts_largest_first() {
    let note = Note::new(480, 340)
        .rect(40, 40, 60, 40, 3)
        .rect(300, 200, 120, 80, 3)
        .build();
    let config = ExtractionConfig {
        sorting_method: SortingMethod::Area,
        ..ExtractionConfig::default()
    };
    let outcome = run(&note, config);

    assert_eq!(
        bboxes(&outcome),
        vec![[297, 197, 126, 86], [37, 37, 66, 46]]
    );
}

#[test]
fn cap_keeps_the_first_clusters_on_ties() {
    let mut note = Note::new(640, 200);
    for x in [20, 180, 340, 500] {
        note = note.rect(x, 80, 60, 40, 3);
    }
    let note = note.build();
    let config = ExtractionConfig {
        max_diagrams: 2,
        ..ExtractionConfig::default()
    };
    let outcome = run(&note, config);

    assert_eq!(bboxes(&outcome), vec![[17, 77, 66, 46], [177, 77, 66, 46]]);
    let capped = outcome
        .trace
        .rejected()
        .filter(|c| c.rejection == Some(RejectionReason::OverCap))
        .count();
    assert_eq!(capped, 2);
}

#[test]
fn minimum_confidence_filters_clusters() {
    let note = rect_note(300, 250, 100, 100);
    let config = ExtractionConfig {
        min_confidence: 0.99,
        ..ExtractionConfig::default()
    };
    let outcome = run(&note, config);

    assert!(outcome.diagrams.is_empty());
    let reasons: Vec<_> = outcome.trace.rejected().map(|c| c.rejection).collect();
    assert_eq!(reasons, [Some(RejectionReason::BelowMinConfidence)]);
}

#[test]
fn environment_style_overrides_change_padding() {
    let note = rect_note(300, 250, 100, 100);
    let config = diagram_extractor::config::apply_env_overrides(
        ExtractionConfig::default(),
        |key| (key == "PADDING").then(|| "10".to_string()),
    )
    .unwrap();
    let outcome = run(&note, config);
    assert_eq!(bboxes(&outcome), vec![[90, 90, 80, 60]]);
}
