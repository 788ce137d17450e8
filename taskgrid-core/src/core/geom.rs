//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geometries tagged with their coordinate reference system

use geo::{Area, BoundingRect, Coord, LineString, MapCoords, MultiPolygon, Polygon};
use std::fmt;
use std::marker::PhantomData;
use tile_grid::{lonlat_to_merc, merc_to_lonlat, Extent};

/// Coordinate reference system
///
/// Conversions between systems always pass through WGS84.
pub trait Crs: Clone + Copy + fmt::Debug + PartialEq {
    const EPSG: i32;
    fn to_wgs84(coord: Coord<f64>) -> Coord<f64>;
    fn from_wgs84(coord: Coord<f64>) -> Coord<f64>;
}

/// Spherical Mercator, the working projection of task grids
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WebMercator;

/// Geographic coordinates (lon, lat) in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wgs84;

impl Crs for WebMercator {
    const EPSG: i32 = 3857;
    fn to_wgs84(coord: Coord<f64>) -> Coord<f64> {
        let (x, y) = merc_to_lonlat(coord.x, coord.y);
        Coord { x, y }
    }
    fn from_wgs84(coord: Coord<f64>) -> Coord<f64> {
        let (x, y) = lonlat_to_merc(coord.x, coord.y);
        Coord { x, y }
    }
}

impl Crs for Wgs84 {
    const EPSG: i32 = 4326;
    fn to_wgs84(coord: Coord<f64>) -> Coord<f64> {
        coord
    }
    fn from_wgs84(coord: Coord<f64>) -> Coord<f64> {
        coord
    }
}

/// Polygonal geometry in coordinate system `S`
#[derive(Clone, Debug, PartialEq)]
pub struct Shape<S: Crs> {
    polygons: MultiPolygon<f64>,
    crs: PhantomData<S>,
}

impl<S: Crs> Shape<S> {
    pub fn from_polygon(polygon: Polygon<f64>) -> Shape<S> {
        Shape::from_multi_polygon(MultiPolygon(vec![polygon]))
    }
    pub fn from_multi_polygon(polygons: MultiPolygon<f64>) -> Shape<S> {
        Shape {
            polygons,
            crs: PhantomData,
        }
    }
    /// Rectangle with counter-clockwise exterior ring
    pub fn from_extent(extent: &Extent) -> Shape<S> {
        let ring = LineString::from(vec![
            (extent.minx, extent.miny),
            (extent.maxx, extent.miny),
            (extent.maxx, extent.maxy),
            (extent.minx, extent.maxy),
            (extent.minx, extent.miny),
        ]);
        Shape::from_polygon(Polygon::new(ring, vec![]))
    }
    pub fn epsg(&self) -> i32 {
        S::EPSG
    }
    pub fn polygons(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }
    pub fn into_polygons(self) -> MultiPolygon<f64> {
        self.polygons
    }
    pub fn is_empty(&self) -> bool {
        self.polygons.0.is_empty()
    }
    /// Planar area in squared units of `S`
    pub fn area(&self) -> f64 {
        self.polygons.unsigned_area()
    }
    /// Axis-aligned bounding box
    pub fn bbox(&self) -> Option<Extent> {
        self.polygons.bounding_rect().map(|rect| Extent {
            minx: rect.min().x,
            miny: rect.min().y,
            maxx: rect.max().x,
            maxy: rect.max().y,
        })
    }
    /// Reproject vertices into coordinate system `T`
    pub fn transform<T: Crs>(&self) -> Shape<T> {
        let polygons = self
            .polygons
            .map_coords(|coord| T::from_wgs84(S::to_wgs84(coord)));
        Shape::from_multi_polygon(polygons)
    }
}
