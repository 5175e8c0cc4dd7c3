use super::*;

const FRAME_JSON: &str = r#"{
  "roots": [
    {
      "id": "root",
      "name": "Card",
      "kind": "Frame",
      "x": 0, "y": 0, "width": 50, "height": 50,
      "style": {
        "fills": [{"type": "Solid", "color": {"r": 1, "g": 1, "b": 1}}],
        "cornerRadius": {"topLeft": 4, "topRight": 4, "bottomRight": 0, "bottomLeft": 0}
      },
      "children": [
        {"id": "a", "kind": "Rectangle", "x": 0, "y": 0, "width": 20, "height": 20,
         "style": {"strokes": [{"type": "Solid", "color": {"r": 0, "g": 0, "b": 0}}],
                   "strokeWeight": 2, "strokeAlign": "Outside"}},
        {"id": "t", "kind": "Text", "x": 0, "y": 30, "width": 40, "height": 10,
         "text": {"characters": "Hi", "autoResize": "Height"}}
      ]
    }
  ]
}"#;

#[test]
fn parses_camel_case_scene_with_defaults() {
    let scene = Scene::from_json_str(FRAME_JSON).unwrap();
    let root = &scene.roots[0];
    assert_eq!(root.kind, ElementKind::Frame);
    assert_eq!(root.geometry, Geometry::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(root.layout.layout_mode, LayoutMode::None);
    assert_eq!(root.layout.counter_axis_sizing_mode, SizingMode::Fixed);
    assert_eq!(root.style.opacity, 1.0);
    assert!(root.style.visible);
    assert!(matches!(
        root.style.corner_radius,
        CornerRadius::PerCorner { top_left, .. } if top_left == 4.0
    ));

    let rect = &root.children[0];
    assert_eq!(rect.style.stroke_align, StrokeAlign::Outside);
    assert_eq!(rect.style.stroke_weight, 2.0);

    let text = root.children[1].text.as_ref().unwrap();
    assert_eq!(text.auto_resize, TextAutoResize::Height);
    assert_eq!(text.font_size, 14.0);
    assert_eq!(text.font_weight, 400);
}

#[test]
fn uniform_corner_radius_is_a_bare_number() {
    let style: Style = serde_json::from_str(r#"{"cornerRadius": 8}"#).unwrap();
    assert_eq!(style.corner_radius, CornerRadius::Uniform(8.0));
    assert!(!style.corner_radius.is_zero());
    assert!(Style::default().corner_radius.is_zero());
}

#[test]
fn rejects_duplicate_ids_across_roots() {
    let json = r#"{"roots": [
        {"id": "x", "kind": "Rectangle", "x": 0, "y": 0, "width": 1, "height": 1},
        {"id": "x", "kind": "Rectangle", "x": 0, "y": 0, "width": 1, "height": 1}
    ]}"#;
    let err = Scene::from_json_str(json).unwrap_err();
    assert!(err.to_string().contains("duplicate node id"));
}

#[test]
fn rejects_children_under_leaf_kinds() {
    let json = r#"{"roots": [
        {"id": "r", "kind": "Rectangle", "x": 0, "y": 0, "width": 1, "height": 1,
         "children": [{"id": "c", "kind": "Rectangle", "x": 0, "y": 0, "width": 1, "height": 1}]}
    ]}"#;
    assert!(matches!(
        Scene::from_json_str(json),
        Err(FlexError::Validation(_))
    ));
}

#[test]
fn rejects_out_of_range_opacity() {
    let json = r#"{"roots": [
        {"id": "r", "kind": "Rectangle", "x": 0, "y": 0, "width": 1, "height": 1,
         "style": {"opacity": 1.5}}
    ]}"#;
    assert!(Scene::from_json_str(json).is_err());
}

#[test]
fn zero_sized_nodes_are_valid_but_invisible() {
    let json = r#"{"roots": [
        {"id": "e", "kind": "Ellipse", "x": 0, "y": 0, "width": 0, "height": 10}
    ]}"#;
    let scene = Scene::from_json_str(json).unwrap();
    assert!(!scene.roots[0].geometry.has_visible_box());
}

#[test]
fn malformed_json_maps_to_serde_error() {
    assert!(matches!(
        Scene::from_json_str("{"),
        Err(FlexError::Serde(_))
    ));
}

#[test]
fn kind_predicates() {
    assert!(ElementKind::Group.is_container());
    assert!(!ElementKind::Text.is_container());
    assert!(ElementKind::Ellipse.is_leaf_shape());
    assert!(ElementKind::Instance.can_be_background());
    assert!(!ElementKind::Group.can_be_background());
    assert!(!ElementKind::Ellipse.can_be_background());
}

#[test]
fn text_case_is_applied_on_display() {
    let mut t = TextProps::new("Hello");
    t.text_case = TextCase::Upper;
    assert_eq!(t.display_text(), "HELLO");
    t.text_case = TextCase::Lower;
    assert_eq!(t.display_text(), "hello");
}
