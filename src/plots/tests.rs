// src/plots/tests.rs

use super::*;
use serde_json::json;
use test_log::test;

#[test]
fn it_should_register_every_plot_type_once() {
    let names: Vec<&str> = registered().map(|ty| ty.name).collect();
    assert_eq!(names.len(), 18);
    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn it_should_look_up_by_name_or_entry_point() {
    let by_name = lookup("line-stacked").unwrap();
    let by_func = lookup("linestacked").unwrap();
    assert!(std::ptr::eq(by_name, by_func));
    assert_eq!(by_name.entry_name(), "linestacked");
    assert_eq!(lookup("scatter").unwrap().entry_name(), "scatter");
    assert!(lookup("pie").is_none());
}

#[test]
fn it_should_resolve_declared_defaults() {
    let resolved = Options::new().resolve(&basic::SCATTER).unwrap();
    assert_eq!(
        serde_json::Value::Object(resolved),
        json!({"tooltips": true, "zoom": true, "brush": true})
    );

    let resolved = Options::new()
        .set("zoom", false)
        .width(400)
        .resolve(&basic::SCATTER)
        .unwrap();
    assert_eq!(resolved.get("zoom"), Some(&json!(false)));
    assert_eq!(resolved.get("width"), Some(&json!(400)));
}

#[test]
fn it_should_reject_unknown_or_mistyped_options() {
    let unknown = Options::new().set("bogus", true).resolve(&basic::LINE);
    assert!(matches!(unknown, Err(VizError::Configuration(_))));

    let mistyped = Options::new().set("zoom", "yes").resolve(&basic::LINE);
    assert!(matches!(mistyped, Err(VizError::Configuration(_))));

    let open = Options::new().set("anything", "goes").resolve(&basic::GENERIC);
    assert_eq!(open.unwrap().get("anything"), Some(&json!("goes")));
}

#[test]
fn it_should_build_a_bare_scatter_payload() {
    let payload = Scatter::new(vec![1, 2, 3], vec![4, 5, 6]).clean().unwrap();
    assert_eq!(payload.to_value(), json!({"points": [[1, 4], [2, 5], [3, 6]]}));
    assert!(!payload.has_images());
}

#[test]
fn it_should_broadcast_a_single_scatter_color() {
    let payload = Scatter::new(vec![1, 2], vec![3, 4])
        .color(vec![1, 0, 0])
        .clean()
        .unwrap();
    assert_eq!(
        payload.to_value(),
        json!({"points": [[1, 3], [2, 4]], "color": [[1, 0, 0]]})
    );
}

#[test]
fn it_should_reject_bad_scatter_styles_before_sending() {
    let err = Scatter::new(vec![1, 2], vec![3, 4])
        .size(vec![1.0, 0.0])
        .clean()
        .unwrap_err();
    assert!(matches!(err, VizError::Range(_)));

    let err = Scatter::new(vec![1, 2], vec![3, 4])
        .colormap("Rainbow")
        .clean()
        .unwrap_err();
    assert!(matches!(err, VizError::Configuration(_)));
}

#[test]
fn it_should_build_force_links_and_nodes_from_a_matrix() {
    let payload = Force::new(vec![vec![0, 1], vec![1, 0]]).clean().unwrap();
    assert_eq!(
        payload.to_value(),
        json!({"links": [[0, 1, 1], [1, 0, 1]], "nodes": [0, 1]})
    );
}

#[test]
fn it_should_build_a_region_map() {
    let payload = RegionMap::new(["CA", "NY"], vec![0.2, 0.8]).clean().unwrap();
    assert_eq!(
        payload.to_value(),
        json!({"regions": ["CA", "NY"], "values": [0.2, 0.8]})
    );

    let mixed = RegionMap::new(["CA", "USA"], vec![0.2, 0.8]).clean();
    assert!(matches!(mixed, Err(VizError::Configuration(_))));

    let short = RegionMap::new(["CA", "NY"], vec![0.2]).clean();
    assert!(matches!(short, Err(VizError::Length { .. })));
}

#[test]
fn it_should_keep_ragged_line_series() {
    let payload = Line::new(vec![vec![1, 2, 3], vec![4]])
        .thickness(2)
        .clean()
        .unwrap();
    assert_eq!(
        payload.to_value(),
        json!({"series": [[1, 2, 3], [4]], "thickness": [2]})
    );
}

#[test]
fn it_should_require_a_type_for_generic_plots() {
    let err = Generic::new("", vec![1, 2]).clean().unwrap_err();
    assert!(matches!(err, VizError::Configuration(_)));

    let generic = Generic::new("histogram", vec![1, 2]);
    assert_eq!(generic.type_name(), "histogram");
    assert_eq!(generic.clean().unwrap().to_value(), json!({"data": [1, 2]}));

    let err = Generic::new("histogram", 3.0).clean().unwrap_err();
    assert!(matches!(err, VizError::Shape(_)));
}

#[test]
fn it_should_attach_a_background_image_to_graphs() {
    let graph = Graph::new(vec![0, 1, 2], vec![0, 1, 0], vec![vec![0, 1], vec![1, 2], vec![2, 0]])
        .image(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    let payload = graph.clean().unwrap();
    assert_eq!(payload.images().len(), 1);
    assert_eq!(payload.get("nodes"), Some(&json!([[0, 0], [1, 1], [2, 0]])));

    let dangling = Graph::new(vec![0, 1], vec![0, 1], vec![vec![0, 4], vec![1, 0], vec![0, 0]]);
    assert!(matches!(dangling.clean(), Err(VizError::Range(_))));
}

#[test]
fn it_should_keep_gallery_images_in_order() {
    let dark = Data::from(vec![vec![0.0, 0.0], vec![0.0, 1.0]]);
    let light = Data::from(vec![vec![1.0, 1.0, 1.0]]);
    let payload = Gallery::new(vec![dark.clone(), light.clone()]).clean().unwrap();
    assert_eq!(payload.images().len(), 2);
    assert_eq!(payload.images()[0], crate::convert::array_to_im(&dark).unwrap());
    assert_eq!(payload.images()[1], crate::convert::array_to_im(&light).unwrap());
    assert!(!payload.has_fields());

    assert!(matches!(Volume::new(vec![]).clean(), Err(VizError::Shape(_))));
}

#[test]
fn it_should_reverse_image_poly_coordinates_unless_xy() {
    let image = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
    let rc = ImagePoly::new(image.clone())
        .coordinates(vec![vec![1, 2], vec![3, 4], vec![5, 6]], false)
        .clean()
        .unwrap();
    assert_eq!(rc.get("coordinates"), Some(&json!([[[2, 1], [4, 3], [6, 5]]])));
    assert_eq!(rc.images().len(), 1);

    let xy = ImagePoly::new(image)
        .coordinates(vec![vec![1, 2], vec![3, 4], vec![5, 6]], true)
        .clean()
        .unwrap();
    assert_eq!(xy.get("coordinates"), Some(&json!([[[1, 2], [3, 4], [5, 6]]])));
}

#[test]
fn it_should_stack_particles_in_three_dimensions() {
    let payload = Particles::new(vec![1, 2], vec![3, 4], vec![5, 6])
        .alpha(0.5)
        .clean()
        .unwrap();
    assert_eq!(
        payload.to_value(),
        json!({"points": [[1, 3, 5], [2, 4, 6]], "alpha": [0.5]})
    );
}
