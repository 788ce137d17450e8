//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::generator::TaskGridGenerator;
use crate::core::geojson::OutputCrs;
use crate::core::intersection::BooleanIntersection;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::str::FromStr;
use tera::{Context, Tera};
use tile_grid::{TilingScheme, MAX_RESOLUTION, MAX_ZOOM};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub grid: GridCfg,
    #[serde(default)]
    pub output: OutputCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GridCfg {
    /// Default zoom level of generated cells
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Maximal number of candidate cells per area of interest
    pub max_cells: Option<u64>,
    /// Tile size of the tiling scheme in pixels (Default: 256)
    pub tile_size: Option<u16>,
}

pub fn default_zoom() -> u8 {
    18
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputCfg {
    /// EPSG:3857 or EPSG:4326
    #[serde(default = "default_crs")]
    pub crs: String,
    /// Pretty-print GeoJSON output
    #[serde(default)]
    pub pretty: bool,
}

pub fn default_crs() -> String {
    "EPSG:3857".to_string()
}

impl Default for OutputCfg {
    fn default() -> Self {
        OutputCfg {
            crs: default_crs(),
            pretty: false,
        }
    }
}

pub const DEFAULT_CONFIG: &'static str = r#"
[grid]
zoom = 18
max_cells = 100000

[output]
crs = "EPSG:3857"
pretty = false
"#;

impl<'a> Config<'a, GridCfg> for TaskGridGenerator<BooleanIntersection> {
    fn from_config(grid_cfg: &GridCfg) -> Result<Self, String> {
        if grid_cfg.zoom == 0 || grid_cfg.zoom > MAX_ZOOM {
            return Err(format!(
                "Invalid grid zoom {} (expected 1 to {})",
                grid_cfg.zoom, MAX_ZOOM
            ));
        }
        let scheme = match grid_cfg.tile_size {
            Some(0) => return Err("Invalid grid tile_size 0".to_string()),
            Some(tile_size) => TilingScheme::new(tile_size, MAX_RESOLUTION),
            None => TilingScheme::web_mercator(),
        };
        Ok(TaskGridGenerator::new(BooleanIntersection)
            .with_scheme(scheme)
            .with_max_cells(grid_cfg.max_cells))
    }
    fn gen_config() -> String {
        let toml = r#"
[grid]
# Zoom level of task cells (cell size = 20037508.34 / 2^(zoom-1) meters)
zoom = 18
# Reject areas covering more candidate cells
max_cells = 100000
"#;
        toml.to_string()
    }
}

impl<'a> Config<'a, OutputCfg> for OutputCrs {
    fn from_config(output_cfg: &OutputCfg) -> Result<Self, String> {
        OutputCrs::from_str(&output_cfg.crs)
    }
    fn gen_config() -> String {
        let toml = r#"
[output]
# EPSG:3857 (Web Mercator) or EPSG:4326 (WGS84)
crs = "EPSG:3857"
pretty = false
"#;
        toml.to_string()
    }
}

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let env: HashMap<String, String> = env::vars().collect();
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
