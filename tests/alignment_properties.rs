//! Integration tests for alignment and distribution behavior

use pretty_assertions::assert_eq;
use rect_align::geometry::{horizontal_center, min_top, vertical_middle};
use rect_align::{
    AlignError, Aligner, BorderMode, Borders, Bounds, Completion, ElementId, PositionChange, Rect,
    RectSet, Scene, SceneElement, Selector,
};

fn scene_of(rects: &[(&str, i64, i64, u32, u32)]) -> Scene {
    let mut scene = Scene::new();
    for &(id, top, left, width, height) in rects {
        scene.push(SceneElement::new(id, top, left, width, height).with_class("item"));
    }
    scene
}

fn items() -> Selector {
    Selector::class("item")
}

#[test]
fn test_min_top_is_attained_lower_bound() {
    let set = RectSet::new(vec![
        Rect::new(17, 0, 5, 5),
        Rect::new(-3, 9, 5, 5),
        Rect::new(40, 2, 5, 5),
    ])
    .unwrap();
    let top = min_top(&set);
    assert!(set.iter().all(|r| top <= r.top));
    assert!(set.iter().any(|r| r.top == top));
}

#[test]
fn test_centroid_uses_containing_element() {
    let set = RectSet::new(vec![Rect::new(0, 0, 100, 100), Rect::new(20, 20, 60, 60)]).unwrap();
    assert_eq!(horizontal_center(&set), 50);
    assert_eq!(vertical_middle(&set), 50);
}

#[test]
fn test_centroid_floors_mean_of_centers() {
    // spans [0, 50] and [40, 100]
    let set = RectSet::new(vec![Rect::new(0, 0, 50, 50), Rect::new(40, 40, 60, 60)]).unwrap();
    assert_eq!(horizontal_center(&set), 47);
    assert_eq!(vertical_middle(&set), 47);
}

#[test]
fn test_top_alignment_is_idempotent() {
    let mut scene = scene_of(&[("a", 30, 0, 10, 10), ("b", 5, 20, 10, 20), ("c", 18, 40, 10, 5)]);
    let mut aligner = Aligner::new(&mut scene);
    let first = aligner.top(&items(), Completion::Absent).unwrap();
    let second = aligner.top(&items(), Completion::Absent).unwrap();

    for (before, after) in first.iter().zip(&second) {
        assert_eq!(after.prev_y, before.next_y);
        assert_eq!(after.next_y, before.next_y);
    }
}

#[test]
fn test_canvas_alignment_translates_uniformly() {
    let mut scene = scene_of(&[("a", 30, 7, 10, 10), ("b", 5, 63, 10, 20), ("c", 18, 40, 31, 5)]);
    scene.push(SceneElement::new("page", 0, 0, 401, 301));

    for kind in ["top", "bottom", "left", "right", "center", "middle"] {
        let mut aligner = Aligner::new(&mut scene);
        let page = Selector::id("page");
        let records = match kind {
            "top" => aligner.canvas_top(&items(), &page, None, Completion::Absent),
            "bottom" => aligner.canvas_bottom(&items(), &page, None, Completion::Absent),
            "left" => aligner.canvas_left(&items(), &page, None, Completion::Absent),
            "right" => aligner.canvas_right(&items(), &page, None, Completion::Absent),
            "center" => aligner.canvas_center(&items(), &page, None, Completion::Absent),
            _ => aligner.canvas_middle(&items(), &page, None, Completion::Absent),
        }
        .unwrap();

        let dx: Vec<i64> = records.iter().map(PositionChange::dx).collect();
        let dy: Vec<i64> = records.iter().map(PositionChange::dy).collect();
        assert!(dx.windows(2).all(|w| w[0] == w[1]), "{}: {:?}", kind, dx);
        assert!(dy.windows(2).all(|w| w[0] == w[1]), "{}: {:?}", kind, dy);
    }
    assert_eq!(scene.get("page").unwrap().left, 0);
    assert_eq!(scene.get("page").unwrap().top, 0);
}

#[test]
fn test_distribution_chains_in_sorted_order() {
    let mut scene = scene_of(&[
        ("wide", 0, 300, 30, 10),
        ("narrow", 0, 12, 10, 10),
        ("mid", 0, 95, 20, 10),
    ]);
    let records = Aligner::new(&mut scene)
        .distribute_horizontal(&items(), 5, Completion::Absent)
        .unwrap();

    let order: Vec<_> = records
        .iter()
        .map(|r| scene.id_of(r.node.unwrap()).unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["narrow", "mid", "wide"]);
    assert_eq!(scene.get("narrow").unwrap().left, 12);
    assert_eq!(scene.get("mid").unwrap().left, 12 + 10 + 5);
    assert_eq!(scene.get("wide").unwrap().left, 27 + 20 + 5);
}

#[test]
fn test_single_element_self_align_rejected() {
    let mut scene = scene_of(&[("only", 3, 4, 10, 10)]);
    let mut delivered = 0;
    let mut handler = |records: &[PositionChange<ElementId>]| delivered += records.len();
    let err = Aligner::new(&mut scene)
        .left(&items(), Completion::Handler(&mut handler))
        .unwrap_err();
    assert_eq!(err, AlignError::cardinality(2, 1));
    assert_eq!(delivered, 0);
}

#[test]
fn test_non_numeric_spacing_moves_nothing() {
    let mut scene = scene_of(&[("a", 0, 0, 10, 10), ("b", 0, 70, 10, 10)]);
    let before = scene.clone();
    let err = Aligner::new(&mut scene)
        .distribute_horizontal(&items(), "abc", Completion::Absent)
        .unwrap_err();
    assert_eq!(err, AlignError::invalid_spacing("abc"));
    assert_eq!(scene, before);
}

#[test]
fn test_huge_spacing_moves_nothing() {
    let mut scene = scene_of(&[("a", 0, 0, 10, 10), ("b", 0, 70, 10, 10)]);
    let before = scene.clone();
    let handles = Selector::Handles(vec![ElementId(0), ElementId(1)]);
    let err = Aligner::new(&mut scene)
        .distribute_horizontal(&handles, "9223372036854775807", Completion::Absent)
        .unwrap_err();
    assert!(matches!(err, AlignError::Overflow { .. }));
    assert_eq!(scene, before);
}

#[test]
fn test_repeated_handle_is_one_element() {
    let mut scene = scene_of(&[("a", 0, 0, 10, 10), ("b", 0, 70, 10, 10)]);
    let before = scene.clone();
    let handles = Selector::Handles(vec![ElementId(0), ElementId(0)]);
    let err = Aligner::new(&mut scene)
        .distribute_horizontal(&handles, 5, Completion::Absent)
        .unwrap_err();
    assert_eq!(err, AlignError::cardinality(2, 1));
    assert_eq!(scene, before);
}

#[test]
fn test_unresolved_selector() {
    let mut scene = scene_of(&[("a", 0, 0, 10, 10)]);
    let err = Aligner::new(&mut scene)
        .top(&Selector::class("ghost"), Completion::Absent)
        .unwrap_err();
    assert_eq!(err, AlignError::not_found(".ghost"));
}

#[test]
fn test_canvas_with_only_canvas_selected_is_rejected() {
    let mut scene = scene_of(&[("page", 0, 0, 100, 100)]);
    let err = Aligner::new(&mut scene)
        .canvas_left(&items(), &Selector::id("page"), None, Completion::Absent)
        .unwrap_err();
    assert_eq!(err, AlignError::cardinality(1, 0));
}

#[test]
fn test_exclude_border_is_per_edge() {
    let mut scene = Scene::new();
    scene.push(
        SceneElement::new("a", 50, 50, 10, 10)
            .with_class("item")
            .with_border(Borders {
                top: 1,
                right: 2,
                bottom: 3,
                left: 4,
            }),
    );
    scene.push(SceneElement::new("page", 0, 0, 100, 100));
    let page = Selector::id("page");

    let mut aligner = Aligner::new(&mut scene);
    aligner
        .canvas_left(&items(), &page, Some(BorderMode::Exclude), Completion::Absent)
        .unwrap();
    aligner
        .canvas_bottom(&items(), &page, Some(BorderMode::Exclude), Completion::Absent)
        .unwrap();

    let a = scene.get("a").unwrap();
    assert_eq!(a.left, -4);
    assert_eq!(a.top, 100 - 10 - 3);
}

#[test]
fn test_clamped_move_is_reported() {
    let mut scene = scene_of(&[("a", 0, 0, 10, 10), ("b", 0, 30, 10, 10)]).with_bounds(Bounds {
        top: 0,
        left: 0,
        width: 200,
        height: 100,
    });
    scene.push(SceneElement::new("page", 0, 150, 100, 100));

    let records = Aligner::new(&mut scene)
        .canvas_right(&items(), &Selector::id("page"), None, Completion::Absent)
        .unwrap();
    // page right is 250; the frame stops at 200
    assert_eq!(records[1].next_x, 190);
    assert_eq!(records[0].next_x, 190);
    assert_eq!(scene.get("b").unwrap().left, 190);
}
