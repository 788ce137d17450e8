//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Area intersection of polygons

use crate::core::geom::{Shape, Wgs84};
use geo::{Area, BooleanOps};

/// Computes the overlapping area of two geometries.
///
/// Implementations return `None` when the geometries are disjoint or only
/// touch in points or along edges.
pub trait AreaIntersection {
    fn intersection(&self, a: &Shape<Wgs84>, b: &Shape<Wgs84>) -> Option<Shape<Wgs84>>;
}

impl<I: AreaIntersection + ?Sized> AreaIntersection for &I {
    fn intersection(&self, a: &Shape<Wgs84>, b: &Shape<Wgs84>) -> Option<Shape<Wgs84>> {
        (**self).intersection(a, b)
    }
}

impl<I: AreaIntersection + ?Sized> AreaIntersection for Box<I> {
    fn intersection(&self, a: &Shape<Wgs84>, b: &Shape<Wgs84>) -> Option<Shape<Wgs84>> {
        (**self).intersection(a, b)
    }
}

/// Polygon clipping with the `geo` boolean operations
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanIntersection;

impl AreaIntersection for BooleanIntersection {
    fn intersection(&self, a: &Shape<Wgs84>, b: &Shape<Wgs84>) -> Option<Shape<Wgs84>> {
        let overlap = BooleanOps::intersection(a.polygons(), b.polygons());
        if overlap.unsigned_area() > 0.0 {
            Some(Shape::from_multi_polygon(overlap))
        } else {
            None
        }
    }
}
