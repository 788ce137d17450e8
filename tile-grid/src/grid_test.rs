//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{
    extent_merc_to_wgs84, extent_wgs84_to_merc, lonlat_to_merc, merc_to_lonlat, CellLimits,
    Extent, TilingScheme, MAX_RESOLUTION, MAX_ZOOM,
};

fn assert_close(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() < eps, "{} != {}", a, b);
}

#[test]
fn test_scheme_constants() {
    let scheme = TilingScheme::web_mercator();
    assert_eq!(scheme.tile_size(), 256);
    assert_eq!(scheme.max_extent(), MAX_RESOLUTION * 128.0);
    assert_close(scheme.max_extent(), 20037508.3392, 1e-6);
    assert_eq!(scheme.resolution(0), MAX_RESOLUTION);
    assert_eq!(scheme.resolution(10), MAX_RESOLUTION / 1024.0);
}

#[test]
fn test_steps() {
    let scheme = TilingScheme::web_mercator();
    // One quadrant-sized cell at zoom 1
    assert_eq!(scheme.step(1), scheme.max_extent());
    assert_eq!(scheme.step(2), scheme.max_extent() / 2.0);
    assert_close(scheme.step(18), 152.87405654296876, 1e-9);
    assert_close(scheme.step(19), 76.43702827148438, 1e-9);
    for zoom in 1..24 {
        // Cell side is one tile of 256 pixels at the level resolution
        assert_close(
            scheme.step(zoom),
            scheme.resolution(zoom) * 256.0,
            1e-6,
        );
        assert_eq!(scheme.step(zoom) / scheme.step(zoom + 1), 2.0);
    }
}

#[test]
fn test_cell_extent() {
    let scheme = TilingScheme::web_mercator();
    let max = scheme.max_extent();

    assert_eq!(
        scheme.cell_extent(0, 0, 1),
        Extent {
            minx: -max,
            miny: -max,
            maxx: 0.0,
            maxy: 0.0,
        }
    );
    assert_eq!(
        scheme.cell_extent(1, 1, 1),
        Extent {
            minx: 0.0,
            miny: 0.0,
            maxx: max,
            maxy: max,
        }
    );

    let step = scheme.step(18);
    let extent = scheme.cell_extent(128187, 180680, 18);
    assert_eq!(extent.minx, 128187.0 * step - max);
    assert_eq!(extent.maxy, 180681.0 * step - max);
    assert_close(extent.width(), step, 1e-6);
    assert_close(extent.height(), step, 1e-6);
}

#[test]
fn test_cell_limits() {
    let scheme = TilingScheme::web_mercator();

    let limits = scheme.cell_limits(&scheme.extent(), 1).unwrap();
    assert_eq!(
        limits,
        CellLimits {
            minx: 0,
            miny: 0,
            maxx: 2,
            maxy: 2,
        }
    );
    assert_eq!(limits.count(), 4);

    // Bounding box of a small triangle in Spain
    let bbox = Extent {
        minx: -440959.40,
        miny: 7583837.51,
        maxx: -440679.93,
        maxy: 7584367.80,
    };
    assert_eq!(
        scheme.cell_limits(&bbox, 17).unwrap(),
        CellLimits {
            minx: 64093,
            miny: 90340,
            maxx: 64095,
            maxy: 90342,
        }
    );
    let limits = scheme.cell_limits(&bbox, 18).unwrap();
    assert_eq!(
        limits,
        CellLimits {
            minx: 128187,
            miny: 180680,
            maxx: 128190,
            maxy: 180684,
        }
    );
    assert_eq!(limits.count(), 12);
    assert!(limits.contains(128187, 180683));
    assert!(!limits.contains(128190, 180683));
}

#[test]
fn test_aligned_limits() {
    let scheme = TilingScheme::web_mercator();
    // An extent matching a cell exactly only covers this cell
    let extent = scheme.cell_extent(10, 20, 5);
    let limits = scheme.cell_limits(&extent, 5).unwrap();
    assert_eq!(limits.minx, 10);
    assert_eq!(limits.miny, 20);
    assert_eq!(limits.count(), 1);

    // Degenerate extent on a cell boundary
    let line = Extent {
        minx: 0.0,
        miny: 0.0,
        maxx: 0.0,
        maxy: 1000.0,
    };
    assert!(line.is_empty());
    assert_eq!(scheme.cell_limits(&line, 10).unwrap().count(), 0);
}

#[test]
fn test_projection() {
    let (x, y) = lonlat_to_merc(0.0, 0.0);
    assert_eq!((x, y), (0.0, 0.0));

    let (x, y) = lonlat_to_merc(-3.96125, 56.0);
    let (lon, lat) = merc_to_lonlat(x, y);
    assert_close(lon, -3.96125, 1e-9);
    assert_close(lat, 56.0, 1e-9);

    let (lon, _) = merc_to_lonlat(20037508.342789244, 0.0);
    assert_close(lon, 180.0, 1e-9);

    let extent = Extent {
        minx: -180.0,
        miny: -85.0511287798066,
        maxx: 180.0,
        maxy: 85.0511287798066,
    };
    let merc = extent_wgs84_to_merc(&extent);
    assert_close(merc.maxx, 20037508.342789244, 1e-6);
    assert_close(merc.maxy, 20037508.342789244, 1e-3);
    let wgs84 = extent_merc_to_wgs84(&merc);
    assert_close(wgs84.minx, extent.minx, 1e-9);
    assert_close(wgs84.miny, extent.miny, 1e-9);
}

#[test]
fn test_deep_zoom_limits() {
    let scheme = TilingScheme::web_mercator();
    // The full scheme extent still fits at the deepest zoom level
    let limits = scheme.cell_limits(&scheme.extent(), MAX_ZOOM).unwrap();
    assert_eq!(limits.maxx, 1 << MAX_ZOOM);
    assert_eq!(limits.checked_count(), None);

    // Cell numbers beyond the index range
    assert_eq!(scheme.cell_limits(&scheme.extent(), 70), None);
    let bbox = Extent {
        minx: -440959.40,
        miny: 7583837.51,
        maxx: -440679.93,
        maxy: 7584367.80,
    };
    assert_eq!(scheme.cell_limits(&bbox, 255), None);
    let limits = scheme.cell_limits(&bbox, 49).unwrap();
    assert_eq!(limits.checked_count(), None);
}
