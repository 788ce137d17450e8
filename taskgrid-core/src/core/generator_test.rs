//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::generator::{generate_task_grid, GridError, TaskFeature, TaskGridGenerator};
use crate::core::geom::{Shape, WebMercator, Wgs84};
use crate::core::intersection::{AreaIntersection, BooleanIntersection};
use geo::{LineString, Polygon};
use std::cell::Cell;
use std::collections::BTreeSet;
use tile_grid::{Extent, TilingScheme, MAX_ZOOM};

fn triangle() -> Shape<WebMercator> {
    Shape::from_polygon(Polygon::new(
        LineString::from(vec![
            (-440959.40, 7584157.59),
            (-440679.93, 7584367.80),
            (-440700.23, 7583837.51),
        ]),
        vec![],
    ))
}

fn cell_ids(tasks: &[TaskFeature]) -> BTreeSet<(i64, i64)> {
    tasks.iter().map(|t| (t.x, t.y)).collect()
}

#[test]
fn test_triangle_grid() {
    let aoi = triangle();
    assert_eq!(generate_task_grid(&aoi, 17).unwrap().len(), 4);
    assert_eq!(generate_task_grid(&aoi, 18).unwrap().len(), 10);
    assert_eq!(generate_task_grid(&aoi, 19).unwrap().len(), 23);
}

#[test]
fn test_task_geometry() {
    let scheme = TilingScheme::web_mercator();
    let tasks = generate_task_grid(&triangle(), 18).unwrap();
    for task in &tasks {
        assert_eq!(task.zoom, 18);
        assert_eq!(task.geometry.polygons().0.len(), 1);
        // Cells are aligned to the tiling scheme
        assert_eq!(
            task.geometry.bbox().unwrap(),
            scheme.cell_extent(task.x, task.y, 18)
        );
    }
}

#[test]
fn test_subset_of_candidates() {
    let aoi = triangle();
    let generator = TaskGridGenerator::new(BooleanIntersection);
    for zoom in 17..21 {
        let limits = generator.candidates(&aoi, zoom).unwrap();
        let tasks = generator.generate(&aoi, zoom).unwrap();
        assert!(tasks.len() as u64 <= limits.count());
        for task in &tasks {
            assert!(limits.contains(task.x, task.y));
        }
    }
}

#[test]
fn test_idempotent() {
    let aoi = triangle();
    let first = generate_task_grid(&aoi, 19).unwrap();
    let second = generate_task_grid(&aoi, 19).unwrap();
    assert_eq!(cell_ids(&first), cell_ids(&second));
    assert_eq!(first, second);
}

#[test]
fn test_finer_grid_needs_more_cells() {
    let aoi = triangle();
    let scheme = TilingScheme::web_mercator();
    let mut previous = 0;
    for zoom in 15..21 {
        let count = generate_task_grid(&aoi, zoom).unwrap().len();
        assert!(count >= previous, "zoom {}: {} < {}", zoom, count, previous);
        assert_eq!(scheme.step(zoom), 2.0 * scheme.step(zoom + 1));
        previous = count;
    }
}

#[test]
fn test_single_cell() {
    let scheme = TilingScheme::web_mercator();
    let cell = scheme.cell_extent(128188, 180681, 18);
    let inset = cell.width() / 4.0;
    let aoi = Shape::from_polygon(Polygon::new(
        LineString::from(vec![
            (cell.minx + inset, cell.miny + inset),
            (cell.maxx - inset, cell.miny + inset),
            (cell.minx + inset, cell.maxy - inset),
        ]),
        vec![],
    ));
    let tasks = generate_task_grid(&aoi, 18).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!((tasks[0].x, tasks[0].y), (128188, 180681));
}

#[test]
fn test_zoom_one() {
    let scheme = TilingScheme::web_mercator();
    let tasks = generate_task_grid(&triangle(), 1).unwrap();
    assert_eq!(tasks.len(), 1);
    // Western cell of the northern half
    assert_eq!((tasks[0].x, tasks[0].y), (0, 1));
    let bbox = tasks[0].geometry.bbox().unwrap();
    assert_eq!(bbox.width(), scheme.max_extent());
}

#[test]
fn test_aligned_grids() {
    let aoi = triangle();
    let shifted = Shape::<WebMercator>::from_extent(&Extent {
        minx: -440800.0,
        miny: 7584000.0,
        maxx: -440300.0,
        maxy: 7584600.0,
    });
    let a = generate_task_grid(&aoi, 19).unwrap();
    let b = generate_task_grid(&shifted, 19).unwrap();
    let mut shared = 0;
    for task in &a {
        if let Some(other) = b.iter().find(|t| (t.x, t.y) == (task.x, task.y)) {
            assert_eq!(other.geometry, task.geometry);
            shared += 1;
        }
    }
    assert!(shared > 0);
}

#[test]
fn test_degenerate_aoi() {
    // All vertices on one line
    let aoi = Shape::<WebMercator>::from_polygon(Polygon::new(
        LineString::from(vec![(0.0, 0.0), (100.0, 0.0), (50.0, 0.0)]),
        vec![],
    ));
    assert_eq!(generate_task_grid(&aoi, 18).unwrap(), vec![]);

    let empty = Shape::<WebMercator>::from_multi_polygon(geo::MultiPolygon(vec![]));
    assert!(empty.is_empty());
    assert_eq!(generate_task_grid(&empty, 18).unwrap(), vec![]);
}

#[test]
fn test_invalid_zoom() {
    assert_eq!(
        generate_task_grid(&triangle(), 0),
        Err(GridError::InvalidZoom(0))
    );
    assert_eq!(
        format!("{}", GridError::InvalidZoom(0)),
        "Invalid zoom level 0 (expected 1 to 62)"
    );
}

#[test]
fn test_deep_zoom() {
    let aoi = triangle();
    // Deepest level still computes its candidate range
    let generator = TaskGridGenerator::new(BooleanIntersection).with_max_cells(Some(1000));
    assert!(generator.candidates(&aoi, MAX_ZOOM).is_ok());
    // Candidate count beyond u64
    assert_eq!(
        generate_task_grid(&aoi, 49),
        Err(GridError::CellOverflow(49))
    );
    assert_eq!(
        generator.generate(&aoi, 49),
        Err(GridError::CellOverflow(49))
    );
    assert_eq!(
        generate_task_grid(&aoi, 63),
        Err(GridError::InvalidZoom(63))
    );
    assert_eq!(
        generate_task_grid(&aoi, 70),
        Err(GridError::InvalidZoom(70))
    );
    assert_eq!(
        generate_task_grid(&aoi, 255),
        Err(GridError::InvalidZoom(255))
    );
    // Limit is checked before any cell is visited
    match generator.generate(&aoi, 30) {
        Err(GridError::TooManyCells { limit, .. }) => assert_eq!(limit, 1000),
        other => panic!("TooManyCells expected, got {:?}", other),
    }
}

#[test]
fn test_coordinates_beyond_index_range() {
    // Far outside of the scheme extent
    let aoi = Shape::<WebMercator>::from_extent(&Extent {
        minx: 1e300,
        miny: 1e300,
        maxx: 2e300,
        maxy: 2e300,
    });
    assert_eq!(
        generate_task_grid(&aoi, 18),
        Err(GridError::CellOverflow(18))
    );
}

#[test]
fn test_generate_within_candidates() {
    let aoi = triangle();
    let generator = TaskGridGenerator::new(BooleanIntersection);
    let limits = generator.candidates(&aoi, 19).unwrap();
    assert_eq!(
        generator.generate_within(&aoi, 19, &limits).unwrap(),
        generator.generate(&aoi, 19).unwrap()
    );
}

#[test]
fn test_cell_limit() {
    let generator = TaskGridGenerator::new(BooleanIntersection).with_max_cells(Some(20));
    assert_eq!(generator.max_cells(), Some(20));
    assert_eq!(generator.generate(&triangle(), 18).unwrap().len(), 10);
    assert_eq!(
        generator.generate(&triangle(), 19),
        Err(GridError::TooManyCells {
            candidates: 32,
            limit: 20
        })
    );
}

/// Accepts every candidate and counts calls
struct AcceptAll {
    calls: Cell<usize>,
}

impl AreaIntersection for AcceptAll {
    fn intersection(&self, a: &Shape<Wgs84>, _b: &Shape<Wgs84>) -> Option<Shape<Wgs84>> {
        self.calls.set(self.calls.get() + 1);
        Some(a.clone())
    }
}

/// Rejects every candidate
struct RejectAll;

impl AreaIntersection for RejectAll {
    fn intersection(&self, _a: &Shape<Wgs84>, _b: &Shape<Wgs84>) -> Option<Shape<Wgs84>> {
        None
    }
}

#[test]
fn test_injected_intersection() {
    let stub = AcceptAll {
        calls: Cell::new(0),
    };
    let generator = TaskGridGenerator::new(&stub);
    let tasks = generator.generate(&triangle(), 18).unwrap();
    // All 3x4 candidates are returned
    assert_eq!(tasks.len(), 12);
    assert_eq!(stub.calls.get(), 12);

    let generator = TaskGridGenerator::new(RejectAll);
    assert_eq!(generator.generate(&triangle(), 18).unwrap(), vec![]);
}

#[test]
fn test_custom_scheme() {
    // 512 pixel tiles double the cell size
    let generator = TaskGridGenerator::new(BooleanIntersection).with_scheme(TilingScheme::new(512, 156543.0339));
    let web_mercator = TilingScheme::web_mercator();
    assert_eq!(generator.scheme().step(19), web_mercator.step(18));
    assert_eq!(generator.generate(&triangle(), 19).unwrap().len(), 10);
}
