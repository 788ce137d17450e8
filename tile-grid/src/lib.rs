//! Tiling scheme arithmetic for square task grids
//!
//! Grid cells are aligned to the global web map tiling scheme, so that
//! grids computed independently at the same zoom level always share cell
//! boundaries.
//!
//! ```rust
//! use tile_grid::{Extent, TilingScheme};
//!
//! let scheme = TilingScheme::web_mercator();
//! let extent = scheme.cell_extent(0, 0, 1);
//! assert_eq!(extent.minx, -scheme.max_extent());
//! assert_eq!(extent.maxx, 0.0);
//! ```
//!
//! ## Cell iterators
//!
//! ```rust
//! use tile_grid::{CellIterator, Extent, TilingScheme};
//!
//! let scheme = TilingScheme::web_mercator();
//! let limits = scheme.cell_limits(
//!     &Extent {
//!         minx: -1000.0,
//!         miny: -1000.0,
//!         maxx: 1000.0,
//!         maxy: 1000.0,
//!     },
//!     10,
//! )
//! .unwrap();
//! for (x, y) in CellIterator::new(&limits) {
//!     println!("Cell {}/{}", x, y);
//! }
//! ```

mod grid;
mod grid_iterator;
#[cfg(test)]
mod grid_test;

pub use grid::{
    extent_merc_to_wgs84, extent_wgs84_to_merc, lonlat_to_merc, merc_to_lonlat, CellLimits,
    Extent, TilingScheme, EARTH_RADIUS, MAX_RESOLUTION, MAX_ZOOM,
};
pub use grid_iterator::CellIterator;
