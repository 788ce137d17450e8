//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod config;
pub mod generator;
pub mod geojson;
pub mod geom;
pub mod intersection;
pub mod session;

pub use self::config::{parse_config, read_config, ApplicationCfg, Config};
pub use self::generator::{generate_task_grid, GridError, TaskFeature, TaskGridGenerator};
pub use self::geom::{Crs, Shape, WebMercator, Wgs84};
pub use self::intersection::{AreaIntersection, BooleanIntersection};

#[cfg(test)]
mod generator_test;
