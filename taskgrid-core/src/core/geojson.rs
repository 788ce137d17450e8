//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GeoJSON interchange of areas of interest and task grids

use crate::core::generator::TaskFeature;
use crate::core::geom::{Crs, Shape, WebMercator, Wgs84};
use geo::{LineString, MultiPolygon, Polygon};
use regex::Regex;
use serde_json::Value;
use std::str::FromStr;

pub type Position = Vec<f64>;

lazy_static! {
    static ref EPSG_NAME: Regex = Regex::new(r"(?i)EPSG::?(\d+)$").unwrap();
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

/// Named coordinate reference system member
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NamedCrs {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: CrsProperties,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CrsProperties {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<NamedCrs>,
    pub features: Vec<Feature>,
}

impl NamedCrs {
    pub fn epsg(code: i32) -> NamedCrs {
        NamedCrs {
            kind: "name".to_string(),
            properties: CrsProperties {
                name: format!("urn:ogc:def:crs:EPSG::{}", code),
            },
        }
    }
    /// EPSG code of `EPSG:n`, `urn:ogc:def:crs:EPSG::n` and CRS84 names
    pub fn epsg_code(&self) -> Option<i32> {
        let name = self.properties.name.as_str();
        if name.ends_with("CRS84") {
            return Some(4326);
        }
        EPSG_NAME
            .captures(name)
            .and_then(|caps| caps[1].parse::<i32>().ok())
            .map(|code| if code == 900913 { 3857 } else { code })
    }
}

/// Coordinate system of generated task grids
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum OutputCrs {
    WebMercator,
    Wgs84,
}

impl OutputCrs {
    pub fn epsg(&self) -> i32 {
        match self {
            OutputCrs::WebMercator => WebMercator::EPSG,
            OutputCrs::Wgs84 => Wgs84::EPSG,
        }
    }
}

impl FromStr for OutputCrs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let crs = NamedCrs {
            kind: "name".to_string(),
            properties: CrsProperties {
                name: s.to_string(),
            },
        };
        match crs.epsg_code() {
            Some(3857) => Ok(OutputCrs::WebMercator),
            Some(4326) => Ok(OutputCrs::Wgs84),
            _ => Err(format!("Unsupported output CRS '{}'", s)),
        }
    }
}

fn ring_from_positions(positions: &[Position]) -> Result<LineString<f64>, String> {
    positions
        .iter()
        .map(|pos| match pos.as_slice() {
            [x, y, ..] => Ok((*x, *y)),
            _ => Err(format!("Invalid position {:?}", pos)),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::from)
}

fn polygon_from_rings(rings: &[Vec<Position>]) -> Result<Polygon<f64>, String> {
    let mut rings = rings.iter();
    let exterior = match rings.next() {
        Some(ring) => ring_from_positions(ring)?,
        None => return Err("Polygon without exterior ring".to_string()),
    };
    let interiors = rings
        .map(|ring| ring_from_positions(ring))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

impl Geometry {
    pub fn polygons(&self) -> Result<Vec<Polygon<f64>>, String> {
        match self {
            Geometry::Polygon { coordinates } => Ok(vec![polygon_from_rings(coordinates)?]),
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .map(|rings| polygon_from_rings(rings))
                .collect(),
        }
    }
}

fn positions(ring: &LineString<f64>) -> Vec<Position> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}

fn polygon_coordinates(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    let mut rings = vec![positions(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(positions));
    rings
}

impl<S: Crs> From<&Shape<S>> for Geometry {
    fn from(shape: &Shape<S>) -> Geometry {
        let polygons = &shape.polygons().0;
        if polygons.len() == 1 {
            Geometry::Polygon {
                coordinates: polygon_coordinates(&polygons[0]),
            }
        } else {
            Geometry::MultiPolygon {
                coordinates: polygons.iter().map(polygon_coordinates).collect(),
            }
        }
    }
}

fn parse_crs(value: &Value) -> Result<Option<NamedCrs>, String> {
    match value.get("crs") {
        None | Some(Value::Null) => Ok(None),
        Some(crs) => serde_json::from_value(crs.clone())
            .map(Some)
            .map_err(|e| format!("Invalid crs member: {}", e)),
    }
}

fn parse_geometry(value: Value) -> Result<Vec<Polygon<f64>>, String> {
    let geometry: Geometry = serde_json::from_value(value)
        .map_err(|e| format!("Unsupported geometry: {}", e))?;
    geometry.polygons()
}

fn parse_feature(value: Value) -> Result<Vec<Polygon<f64>>, String> {
    let feature: Feature =
        serde_json::from_value(value).map_err(|e| format!("Invalid feature: {}", e))?;
    match feature.geometry {
        Some(geometry) => geometry.polygons(),
        None => Ok(Vec::new()),
    }
}

/// Read an area of interest into the working projection.
///
/// Accepts a polygonal geometry, a feature or a feature collection.
/// Coordinates are WGS84 unless a `crs` member declares EPSG:3857.
pub fn read_aoi(json: &str) -> Result<Shape<WebMercator>, String> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| format!("Invalid GeoJSON: {}", e))?;
    let crs = parse_crs(&value)?;
    let kind = value.get("type").and_then(Value::as_str).map(str::to_string);
    let polygons = match kind.as_deref() {
        Some("FeatureCollection") => {
            let collection: FeatureCollection = serde_json::from_value(value)
                .map_err(|e| format!("Invalid feature collection: {}", e))?;
            let mut polygons = Vec::new();
            for feature in collection.features {
                if let Some(geometry) = feature.geometry {
                    polygons.extend(geometry.polygons()?);
                }
            }
            polygons
        }
        Some("Feature") => parse_feature(value)?,
        Some(_) => parse_geometry(value)?,
        None => return Err("Missing GeoJSON type".to_string()),
    };
    if polygons.is_empty() {
        return Err("No polygon geometry found".to_string());
    }
    let epsg = crs.as_ref().and_then(NamedCrs::epsg_code).unwrap_or(4326);
    debug!("AOI with {} polygon(s) in EPSG:{}", polygons.len(), epsg);
    match epsg {
        3857 => Ok(Shape::from_multi_polygon(MultiPolygon(polygons))),
        4326 => Ok(Shape::<Wgs84>::from_multi_polygon(MultiPolygon(polygons)).transform()),
        _ => Err(format!("Unsupported CRS EPSG:{}", epsg)),
    }
}

/// Task grid as feature collection with `x`, `y` and `zoom` properties
pub fn tasks_to_geojson(tasks: &[TaskFeature], crs: OutputCrs) -> FeatureCollection {
    let features = tasks
        .iter()
        .map(|task| {
            let geometry = match crs {
                OutputCrs::WebMercator => Geometry::from(&task.geometry),
                OutputCrs::Wgs84 => Geometry::from(&task.geometry.transform::<Wgs84>()),
            };
            Feature {
                kind: "Feature".to_string(),
                geometry: Some(geometry),
                properties: json!({
                    "x": task.x,
                    "y": task.y,
                    "zoom": task.zoom,
                }),
            }
        })
        .collect();
    FeatureCollection {
        kind: "FeatureCollection".to_string(),
        crs: Some(NamedCrs::epsg(crs.epsg())),
        features,
    }
}
