// src/convert/tests.rs

use super::*;
use crate::error::VizError;
use std::io::Cursor;
use test_log::test;

#[test]
fn it_should_stack_vectors_into_points() {
    let x = Data::from(vec![1.0, 2.0, 3.0]);
    let y = Data::from(vec![4.0, 5.0, 6.0]);
    let points = vecs_to_points(&x, &y).unwrap();
    assert_eq!(points, vec![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]);
}

#[test]
fn it_should_reject_points_with_mismatched_lengths() {
    let x = Data::from(vec![1.0, 2.0, 3.0]);
    let y = Data::from(vec![4.0, 5.0]);
    match vecs_to_points(&x, &y) {
        Err(VizError::Length { left, right, .. }) => assert_eq!((left, right), (3, 2)),
        other => panic!("expected length error, got {other:?}"),
    }
}

#[test]
fn it_should_reject_nested_point_vectors() {
    let x = Data::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let y = Data::from(vec![1.0, 2.0]);
    assert!(matches!(vecs_to_points(&x, &y), Err(VizError::Shape(_))));
}

#[test]
fn it_should_stack_three_vectors() {
    let points = vecs_to_points_three(
        &Data::from(vec![1, 2]),
        &Data::from(vec![3, 4]),
        &Data::from(vec![5, 6]),
    )
    .unwrap();
    assert_eq!(points, vec![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]]);
    assert!(matches!(
        vecs_to_points_three(&Data::from(vec![1]), &Data::from(vec![1]), &Data::from(vec![1, 2])),
        Err(VizError::Length { .. })
    ));
}

#[test]
fn it_should_keep_ragged_series_intact() {
    let ragged = Data::from(vec![vec![1.0, 2.0, 3.0], vec![4.0], vec![]]);
    let lines = array_to_lines(&ragged).unwrap();
    assert_eq!(lines, vec![vec![1.0, 2.0, 3.0], vec![4.0], vec![]]);

    let single = array_to_lines(&Data::from(vec![1.0, 2.0])).unwrap();
    assert_eq!(single, vec![vec![1.0, 2.0]]);

    assert!(array_to_lines(&Data::from(1.0)).is_err());
    assert!(array_to_lines(&Data::from(vec![vec![vec![1.0]]])).is_err());
}

#[test]
fn it_should_require_rank_two_for_dense_matrices() {
    assert_eq!(
        mat_to_array(&Data::from(vec![vec![1.0, 2.0]])).unwrap(),
        vec![vec![1.0, 2.0]]
    );
    assert!(matches!(
        mat_to_array(&Data::from(vec![1.0, 2.0])),
        Err(VizError::Shape(_))
    ));
}

#[test]
fn it_should_emit_one_link_per_nonzero_cell() {
    let m = Data::from(vec![
        vec![0.0, 2.0, 0.0],
        vec![0.5, 0.0, 0.0],
        vec![0.0, 3.0, 1.0],
    ]);
    let links = mat_to_links(&m).unwrap();
    assert_eq!(
        links,
        vec![
            Link::new(0, 1, 2.0),
            Link::new(1, 0, 0.5),
            Link::new(2, 1, 3.0),
            Link::new(2, 2, 1.0),
        ]
    );
}

#[test]
fn it_should_treat_square_input_as_adjacency() {
    let conn = parse_links(&Data::from(vec![vec![0, 1], vec![1, 0]])).unwrap();
    assert_eq!(conn.links, vec![Link::new(0, 1, 1.0), Link::new(1, 0, 1.0)]);
    assert_eq!(conn.node_count, 2);
}

#[test]
fn it_should_pass_explicit_links_through() {
    let two = parse_links(&Data::from(vec![vec![0, 1], vec![1, 2], vec![2, 3]])).unwrap();
    assert_eq!(
        two.links,
        vec![Link::new(0, 1, 1.0), Link::new(1, 2, 1.0), Link::new(2, 3, 1.0)]
    );
    assert_eq!(two.node_count, 4);

    let three = parse_links(&Data::from(vec![
        vec![0.0, 4.0, 0.5],
        vec![4.0, 1.0, 2.0],
        vec![1.0, 2.0, 1.0],
        vec![3.0, 0.0, 7.0],
    ]))
    .unwrap();
    assert_eq!(three.links[0], Link::new(0, 4, 0.5));
    assert_eq!(three.node_count, 5);
}

#[test]
fn it_should_reject_malformed_connectivity() {
    assert!(matches!(
        parse_links(&Data::from(vec![vec![0, 1, 2, 3, 4]])),
        Err(VizError::Shape(_))
    ));
    assert!(matches!(parse_links(&Data::from(vec![0, 1])), Err(VizError::Shape(_))));
    assert!(matches!(
        parse_links(&Data::from(vec![vec![-1.0, 1.0], vec![1.0, 2.0], vec![0.0, 0.0]])),
        Err(VizError::Range(_))
    ));
}

#[test]
fn it_should_reject_link_indices_past_the_node_limit() {
    let huge = parse_links(&Data::from(vec![vec![0.0, 1e20], vec![1.0, 0.0], vec![0.0, 0.0]]));
    assert!(matches!(huge, Err(VizError::Range(_))));

    let limit = MAX_NODE_INDEX as f64;
    let edge = parse_links(&Data::from(vec![vec![0.0, limit], vec![1.0, 0.0], vec![0.0, 0.0]]))
        .unwrap();
    assert_eq!(edge.node_count, MAX_NODE_INDEX + 1);
}

#[test]
fn it_should_check_link_bounds() {
    let conn = parse_links(&Data::from(vec![vec![0, 5], vec![1, 2], vec![2, 0]])).unwrap();
    assert!(conn.check_bounds(6).is_ok());
    assert!(matches!(conn.check_bounds(3), Err(VizError::Range(_))));
}

#[test]
fn it_should_validate_region_code_lengths() {
    assert_eq!(
        list_to_regions(&Regions::from(vec!["CA", "NY"])).unwrap(),
        vec!["CA".to_string(), "NY".to_string()]
    );
    assert!(list_to_regions(&Regions::from(vec!["USA", "CAN"])).is_ok());
    assert!(matches!(
        list_to_regions(&Regions::from(vec!["CA", "USA"])),
        Err(VizError::Configuration(_))
    ));
    assert!(list_to_regions(&Regions::from(vec!["CALIF"])).is_err());
    assert_eq!(list_to_regions(&Regions::from("CA")).unwrap(), vec!["CA".to_string()]);
}

const SQUARE: [[f64; 2]; 4] = [[1.0, 1.0], [1.0, 4.0], [4.0, 4.0], [4.0, 1.0]];

#[test]
fn it_should_rasterise_a_polygon_into_a_mask() {
    let mask = polygon_to_mask(&SQUARE, &[6, 6], None).unwrap();
    assert_eq!(mask.dims(), &[6, 6]);
    assert_eq!(mask.count(), 9);
    assert_eq!(mask.get(&[1, 1]), Some(1));
    assert_eq!(mask.get(&[3, 3]), Some(1));
    assert_eq!(mask.get(&[4, 4]), Some(0));
    assert_eq!(mask.get(&[0, 0]), Some(0));
}

#[test]
fn it_should_embed_a_mask_at_a_z_plane() {
    let mask = polygon_to_mask(&SQUARE, &[6, 6, 3], Some(2)).unwrap();
    assert_eq!(mask.dims(), &[6, 6, 3]);
    assert_eq!(mask.count(), 9);
    assert_eq!(mask.get(&[2, 2, 2]), Some(1));
    assert_eq!(mask.get(&[2, 2, 0]), Some(0));

    assert!(matches!(
        polygon_to_mask(&SQUARE, &[6, 6, 3], Some(3)),
        Err(VizError::Range(_))
    ));
    assert!(matches!(
        polygon_to_mask(&SQUARE, &[6, 6], Some(0)),
        Err(VizError::Shape(_))
    ));
}

#[test]
fn it_should_list_interior_points_row_by_row() {
    let points = polygon_to_points(&SQUARE, None).unwrap();
    assert_eq!(points.len(), 9);
    assert_eq!(points[0], vec![1, 1]);
    assert_eq!(points[1], vec![1, 2]);
    assert_eq!(points[8], vec![3, 3]);

    let with_z = polygon_to_points(&SQUARE, Some(7)).unwrap();
    assert!(with_z.iter().all(|p| p.len() == 3 && p[2] == 7));
}

#[test]
fn it_should_agree_between_mask_and_points() {
    let triangle = [[0.0, 0.0], [8.0, 0.0], [0.0, 8.0]];
    let mask = polygon_to_mask(&triangle, &[10, 10], None).unwrap();
    let points = polygon_to_points(&triangle, None).unwrap();
    assert_eq!(mask.count(), points.len());
    for p in points {
        assert_eq!(mask.get(&[p[0] as usize, p[1] as usize]), Some(1));
    }
}

fn decode_info(bytes: &[u8]) -> (u32, u32, png::ColorType) {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (info.width, info.height, info.color_type)
}

#[test]
fn it_should_encode_grayscale_and_rgb_images() {
    let gray = Data::from(vec![vec![0.0, 0.5, 1.0], vec![1.0, 0.5, 0.0]]);
    let bytes = array_to_im(&gray).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(decode_info(&bytes), (3, 2, png::ColorType::Grayscale));

    let rgb = Data::from(vec![vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]]);
    let bytes = array_to_im(&rgb).unwrap();
    assert_eq!(decode_info(&bytes), (2, 1, png::ColorType::Rgb));
}

#[test]
fn it_should_reject_images_of_the_wrong_rank() {
    assert!(matches!(
        array_to_im(&Data::from(vec![1.0, 2.0])),
        Err(VizError::Shape(_))
    ));
    let rank4 = Data::from(vec![vec![vec![vec![0.0; 3]; 2]; 2]; 2]);
    assert!(matches!(array_to_im(&rank4), Err(VizError::Shape(_))));
}
