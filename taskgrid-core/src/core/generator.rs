//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Task grid generation

use crate::core::geom::{Shape, WebMercator, Wgs84};
use crate::core::intersection::{AreaIntersection, BooleanIntersection};
use std::error::Error;
use std::fmt;
use tile_grid::{CellIterator, CellLimits, TilingScheme, MAX_ZOOM};

/// One square cell of a task grid
#[derive(Clone, Debug, PartialEq)]
pub struct TaskFeature {
    pub x: i64,
    pub y: i64,
    pub zoom: u8,
    pub geometry: Shape<WebMercator>,
}

#[derive(Debug, PartialEq)]
pub enum GridError {
    /// Zoom levels range from 1 to `MAX_ZOOM`
    InvalidZoom(u8),
    /// Cell numbers or candidate count out of the supported range
    CellOverflow(u8),
    /// Candidate cells exceeding the configured limit
    TooManyCells { candidates: u64, limit: u64 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidZoom(zoom) => write!(
                f,
                "Invalid zoom level {} (expected 1 to {})",
                zoom, MAX_ZOOM
            ),
            GridError::CellOverflow(zoom) => write!(
                f,
                "Area of interest exceeds the cell index range at zoom {}",
                zoom
            ),
            GridError::TooManyCells { candidates, limit } => write!(
                f,
                "Area of interest covers {} candidate cells (limit: {})",
                candidates, limit
            ),
        }
    }
}

impl Error for GridError {}

/// Splits an area of interest into square task cells aligned to a tiling scheme
pub struct TaskGridGenerator<I: AreaIntersection = BooleanIntersection> {
    scheme: TilingScheme,
    intersection: I,
    max_cells: Option<u64>,
}

impl Default for TaskGridGenerator<BooleanIntersection> {
    fn default() -> Self {
        TaskGridGenerator::new(BooleanIntersection)
    }
}

impl<I: AreaIntersection> TaskGridGenerator<I> {
    pub fn new(intersection: I) -> TaskGridGenerator<I> {
        TaskGridGenerator {
            scheme: TilingScheme::web_mercator(),
            intersection,
            max_cells: None,
        }
    }
    pub fn with_scheme(mut self, scheme: TilingScheme) -> Self {
        self.scheme = scheme;
        self
    }
    /// Reject areas with more candidate cells than `max_cells`
    pub fn with_max_cells(mut self, max_cells: Option<u64>) -> Self {
        self.max_cells = max_cells;
        self
    }
    pub fn scheme(&self) -> &TilingScheme {
        &self.scheme
    }
    pub fn max_cells(&self) -> Option<u64> {
        self.max_cells
    }
    /// Cell index range covering the bounding box of `aoi`
    ///
    /// Empty areas and bounding boxes without area return empty limits.
    pub fn candidates(&self, aoi: &Shape<WebMercator>, zoom: u8) -> Result<CellLimits, GridError> {
        if zoom == 0 || zoom > MAX_ZOOM {
            return Err(GridError::InvalidZoom(zoom));
        }
        let limits = match aoi.bbox() {
            Some(ref bbox) if !bbox.is_empty() => {
                debug!("AOI bbox: {:?}", bbox);
                self.scheme
                    .cell_limits(bbox, zoom)
                    .ok_or(GridError::CellOverflow(zoom))?
            }
            _ => CellLimits {
                minx: 0,
                miny: 0,
                maxx: 0,
                maxy: 0,
            },
        };
        debug!("level {}: {:?}", zoom, limits);
        Ok(limits)
    }
    /// Cells intersecting `aoi` with a non-zero area
    pub fn generate(
        &self,
        aoi: &Shape<WebMercator>,
        zoom: u8,
    ) -> Result<Vec<TaskFeature>, GridError> {
        let limits = self.candidates(aoi, zoom)?;
        self.generate_within(aoi, zoom, &limits)
    }
    /// Cells within `limits` intersecting `aoi`
    ///
    /// `limits` are expected to come from `candidates` for the same area and zoom.
    pub fn generate_within(
        &self,
        aoi: &Shape<WebMercator>,
        zoom: u8,
        limits: &CellLimits,
    ) -> Result<Vec<TaskFeature>, GridError> {
        let candidates = limits
            .checked_count()
            .ok_or(GridError::CellOverflow(zoom))?;
        if let Some(limit) = self.max_cells {
            if candidates > limit {
                return Err(GridError::TooManyCells { candidates, limit });
            }
        }
        if candidates == 0 {
            warn!("No candidate cells for area of interest at zoom {}", zoom);
            return Ok(Vec::new());
        }

        let aoi_wgs84 = aoi.transform::<Wgs84>();
        let tasks: Vec<TaskFeature> = CellIterator::new(limits)
            .filter_map(|(x, y)| {
                let cell = Shape::<WebMercator>::from_extent(&self.scheme.cell_extent(x, y, zoom));
                self.intersection
                    .intersection(&cell.transform::<Wgs84>(), &aoi_wgs84)
                    .map(|_| TaskFeature {
                        x,
                        y,
                        zoom,
                        geometry: cell,
                    })
            })
            .collect();
        info!(
            "Generated {} tasks from {} candidate cells at zoom {} (cell size {:.2})",
            tasks.len(),
            candidates,
            zoom,
            self.scheme.step(zoom)
        );
        Ok(tasks)
    }
}

/// Task grid for `aoi` on the web mercator tiling scheme
pub fn generate_task_grid(
    aoi: &Shape<WebMercator>,
    zoom: u8,
) -> Result<Vec<TaskFeature>, GridError> {
    TaskGridGenerator::new(BooleanIntersection).generate(aoi, zoom)
}
