//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::ApplicationCfg;
use crate::core::geojson::{tasks_to_geojson, OutputCrs};
use crate::core::intersection::BooleanIntersection;
use crate::core::{Config, GridError, Shape, TaskFeature, TaskGridGenerator, WebMercator};
use crate::service::stats::{GridStats, ZoomStats};
use pbr::ProgressBar;
use std::io::{stderr, Stderr, Write};

/// Task grid generation with configured defaults
pub struct GridService {
    pub generator: TaskGridGenerator<BooleanIntersection>,
    /// Default zoom level
    pub zoom: u8,
    pub output_crs: OutputCrs,
    pub pretty: bool,
}

impl GridService {
    /// Grid cells of `aoi` at `zoom` or at the configured zoom level
    pub fn generate(
        &self,
        aoi: &Shape<WebMercator>,
        zoom: Option<u8>,
    ) -> Result<Vec<TaskFeature>, GridError> {
        self.generator.generate(aoi, zoom.unwrap_or(self.zoom))
    }
    fn progress_bar_drilldown(&self, zoomlevels: u64) -> ProgressBar<Stderr> {
        let mut pb = ProgressBar::on(stderr(), zoomlevels);
        pb.message("Level ");
        pb.show_speed = false;
        pb.show_percent = false;
        pb.show_time_left = false;
        pb
    }
    /// Get statistics for a range of zoom levels
    pub fn drilldown(
        &self,
        aoi: &Shape<WebMercator>,
        minzoom: u8,
        maxzoom: u8,
        progress: bool,
    ) -> Result<GridStats, GridError> {
        let mut stats = GridStats::new();
        if minzoom > maxzoom {
            warn!("Empty zoom range {}-{}", minzoom, maxzoom);
            return Ok(stats);
        }
        let mut pb = if progress {
            Some(self.progress_bar_drilldown((maxzoom - minzoom) as u64 + 1))
        } else {
            None
        };
        for zoom in minzoom..=maxzoom {
            let limits = self.generator.candidates(aoi, zoom)?;
            let tasks = self.generator.generate_within(aoi, zoom, &limits)?;
            stats.add(ZoomStats {
                zoom,
                step: self.generator.scheme().step(zoom),
                candidates: limits.count(),
                tasks: tasks.len() as u64,
            });
            if let Some(ref mut pb) = pb {
                pb.inc();
            }
        }
        if pb.is_some() {
            eprintln!("");
        }
        Ok(stats)
    }
    /// Write task grid as GeoJSON feature collection
    pub fn write_geojson<W: Write>(&self, tasks: &[TaskFeature], out: W) -> Result<(), String> {
        let collection = tasks_to_geojson(tasks, self.output_crs);
        let result = if self.pretty {
            serde_json::to_writer_pretty(out, &collection)
        } else {
            serde_json::to_writer(out, &collection)
        };
        result.map_err(|e| format!("Error writing GeoJSON: {}", e))
    }
}

impl<'a> Config<'a, ApplicationCfg> for GridService {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let generator = TaskGridGenerator::<BooleanIntersection>::from_config(&config.grid)?;
        let output_crs = OutputCrs::from_config(&config.output)?;
        Ok(GridService {
            generator,
            zoom: config.grid.zoom,
            output_crs,
            pretty: config.output.pretty,
        })
    }
    fn gen_config() -> String {
        let mut config = String::new();
        config.push_str(&TaskGridGenerator::<BooleanIntersection>::gen_config());
        config.push_str(&OutputCrs::gen_config());
        config
    }
}
