//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid statistics per zoom level

use std::fmt;

pub struct ZoomStats {
    pub zoom: u8,
    /// Cell side length
    pub step: f64,
    /// Cells within the bounding box
    pub candidates: u64,
    /// Cells intersecting the area
    pub tasks: u64,
}

pub struct GridStats(Vec<ZoomStats>);

impl GridStats {
    pub fn new() -> GridStats {
        GridStats(Vec::new())
    }
    pub fn add(&mut self, stats: ZoomStats) {
        self.0.push(stats);
    }
    pub fn levels(&self) -> &[ZoomStats] {
        &self.0
    }
    pub fn as_csv(&self) -> String {
        let mut lines = vec!["zoom,step,candidates,tasks".to_string()];
        for level in &self.0 {
            lines.push(format!(
                "{},{:.3},{},{}",
                level.zoom, level.step, level.candidates, level.tasks
            ));
        }
        lines.join("\n") + "\n"
    }
}

impl fmt::Debug for ZoomStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "zoom {}: {} of {} cells ({:.3} m)",
            self.zoom, self.tasks, self.candidates, self.step
        )
    }
}

impl fmt::Debug for GridStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for level in &self.0 {
            writeln!(f, "{:?}", level)?;
        }
        Ok(())
    }
}
