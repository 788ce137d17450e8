//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tiling scheme

use std::f64::consts;

/// Resolution of zoom level 0 in meters per pixel
pub const MAX_RESOLUTION: f64 = 156543.0339;

/// Sphere radius of the spherical Mercator projection
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Deepest zoom level whose cell numbers within the scheme extent fit into `i64`
pub const MAX_ZOOM: u8 = 62;

// Cell numbers beyond this magnitude are rejected
const MAX_CELL_INDEX: f64 = 4611686018427387904.0; // 2^62

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    /// True for extents without area (points, lines or inverted boxes)
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// Half-open range of grid cell numbers: `minx <= x < maxx`, `miny <= y < maxy`
#[derive(PartialEq, Clone, Debug)]
pub struct CellLimits {
    pub minx: i64,
    pub miny: i64,
    pub maxx: i64,
    pub maxy: i64,
}

impl CellLimits {
    /// Number of cells in range, `None` if it exceeds `u64`
    pub fn checked_count(&self) -> Option<u64> {
        let nx = self.maxx.checked_sub(self.minx)?.max(0) as u64;
        let ny = self.maxy.checked_sub(self.miny)?.max(0) as u64;
        nx.checked_mul(ny)
    }
    /// Number of cells in range, saturating at `u64::MAX`
    pub fn count(&self) -> u64 {
        self.checked_count().unwrap_or(u64::MAX)
    }
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.minx && x < self.maxx && y >= self.miny && y < self.maxy
    }
}

/// Global square tiling scheme centered at the origin
///
/// Cell boundaries at zoom level `z` fall at `n * step(z) - max_extent()`
/// for every integer `n`, with the origin in the bottom left corner.
#[derive(Clone, Debug)]
pub struct TilingScheme {
    /// The width and height of an individual tile, in pixels.
    tile_size: u16,
    /// Resolution of zoom level 0, in units per pixel.
    /// Every following level halves the resolution.
    max_resolution: f64,
}

impl TilingScheme {
    /// Web Mercator scheme (Google maps compatible)
    pub fn web_mercator() -> TilingScheme {
        TilingScheme::new(256, MAX_RESOLUTION)
    }

    pub fn new(tile_size: u16, max_resolution: f64) -> TilingScheme {
        TilingScheme {
            tile_size,
            max_resolution,
        }
    }
    pub fn tile_size(&self) -> u16 {
        self.tile_size
    }
    /// Half width of the square covered by the scheme
    pub fn max_extent(&self) -> f64 {
        self.max_resolution * self.tile_size as f64 / 2.0
    }
    /// Full extent covered by the scheme
    pub fn extent(&self) -> Extent {
        let max = self.max_extent();
        Extent {
            minx: -max,
            miny: -max,
            maxx: max,
            maxy: max,
        }
    }
    /// Units per pixel
    pub fn resolution(&self, zoom: u8) -> f64 {
        self.max_resolution / (zoom as f64).exp2()
    }
    /// Side length of a grid cell.
    ///
    /// Zoom level 1 covers the extent with 2x2 cells of `max_extent()`.
    pub fn step(&self, zoom: u8) -> f64 {
        self.max_extent() / (zoom as f64 - 1.0).exp2()
    }
    /// Extent of the cell with index `(x, y)`
    pub fn cell_extent(&self, x: i64, y: i64, zoom: u8) -> Extent {
        let step = self.step(zoom);
        let max = self.max_extent();
        Extent {
            minx: x as f64 * step - max,
            miny: y as f64 * step - max,
            maxx: (x + 1) as f64 * step - max,
            maxy: (y + 1) as f64 * step - max,
        }
    }
    /// Cell index limits covering extent
    ///
    /// Limits are not clipped to the scheme extent. Returns `None` when a cell
    /// number is out of the supported index range.
    pub fn cell_limits(&self, extent: &Extent, zoom: u8) -> Option<CellLimits> {
        let step = self.step(zoom);
        let max = self.max_extent();
        let index = |v: f64| {
            if v.abs() <= MAX_CELL_INDEX {
                Some(v as i64)
            } else {
                None
            }
        };
        Some(CellLimits {
            minx: index(((extent.minx + max) / step).floor())?,
            miny: index(((extent.miny + max) / step).floor())?,
            maxx: index(((extent.maxx + max) / step).ceil())?,
            maxy: index(((extent.maxy + max) / step).ceil())?,
        })
    }
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Returns (lon, lat) in degrees of a Spherical Mercator position
pub fn merc_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - consts::PI * 0.5).to_degrees();
    (lon, lat)
}

/// Projected extent
pub fn extent_wgs84_to_merc(extent: &Extent) -> Extent {
    let (minx, miny) = lonlat_to_merc(extent.minx, extent.miny);
    let (maxx, maxy) = lonlat_to_merc(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}

/// Geographic extent
pub fn extent_merc_to_wgs84(extent: &Extent) -> Extent {
    let (minx, miny) = merc_to_lonlat(extent.minx, extent.miny);
    let (maxx, maxy) = merc_to_lonlat(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}
