//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Interactive map session

use crate::core::generator::{GridError, TaskFeature, TaskGridGenerator};
use crate::core::geom::{Shape, WebMercator};
use crate::core::intersection::AreaIntersection;

/// Polygon drawing tool state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawInteraction {
    pub active: bool,
}

/// Map state of one project creation workflow
///
/// Holds the drawn area of interest and the task grid generated from it.
/// Changing the area or the zoom level discards stale tasks.
#[derive(Clone, Debug)]
pub struct MapSession {
    pub draw: DrawInteraction,
    zoom: u8,
    aoi: Option<Shape<WebMercator>>,
    tasks: Vec<TaskFeature>,
}

impl MapSession {
    pub fn new(zoom: u8) -> MapSession {
        MapSession {
            draw: DrawInteraction::default(),
            zoom,
            aoi: None,
            tasks: Vec::new(),
        }
    }
    pub fn zoom(&self) -> u8 {
        self.zoom
    }
    pub fn aoi(&self) -> Option<&Shape<WebMercator>> {
        self.aoi.as_ref()
    }
    pub fn tasks(&self) -> &[TaskFeature] {
        &self.tasks
    }
    /// Start drawing a new area of interest
    pub fn activate_draw(&mut self) {
        self.draw.active = true;
    }
    pub fn deactivate_draw(&mut self) {
        self.draw.active = false;
    }
    /// Store the drawn area and stop drawing
    pub fn finish_drawing(&mut self, aoi: Shape<WebMercator>) {
        debug!("AOI drawn: {:?}", aoi.bbox());
        self.aoi = Some(aoi);
        self.tasks.clear();
        self.draw.active = false;
    }
    pub fn set_zoom(&mut self, zoom: u8) {
        if zoom != self.zoom {
            self.zoom = zoom;
            self.tasks.clear();
        }
    }
    /// Replace the task grid with a grid of the current area.
    ///
    /// Without area of interest the grid is empty.
    pub fn generate<I: AreaIntersection>(
        &mut self,
        generator: &TaskGridGenerator<I>,
    ) -> Result<&[TaskFeature], GridError> {
        self.tasks = match self.aoi {
            Some(ref aoi) => generator.generate(aoi, self.zoom)?,
            None => Vec::new(),
        };
        Ok(&self.tasks)
    }
    /// Remove area and tasks
    pub fn clear(&mut self) {
        self.aoi = None;
        self.tasks.clear();
        self.draw.active = false;
    }
}
