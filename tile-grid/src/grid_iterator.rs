//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Cell iterators

use crate::grid::CellLimits;
use std::convert::TryFrom;

/// Iterator over all cells within limits, column by column
pub struct CellIterator {
    x: i64,
    y: i64,
    limits: CellLimits,
    finished: bool,
}

impl CellIterator {
    pub fn new(limits: &CellLimits) -> CellIterator {
        CellIterator {
            x: limits.minx,
            y: limits.miny,
            limits: limits.clone(),
            // Return "empty" iterator for empty limits
            finished: limits.maxx <= limits.minx || limits.maxy <= limits.miny,
        }
    }
}

impl Iterator for CellIterator {
    /// Current cell index `(x, y)`
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = (self.x, self.y);
        if self.y < self.limits.maxy - 1 {
            self.y += 1;
        } else if self.x < self.limits.maxx - 1 {
            self.x += 1;
            self.y = self.limits.miny;
        } else {
            self.finished = true;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let rest_of_column = (self.limits.maxy as i128 - self.y as i128) as u64;
        let columns_left = (self.limits.maxx as i128 - self.x as i128 - 1) as u64;
        let height = (self.limits.maxy as i128 - self.limits.miny as i128) as u64;
        let remaining = columns_left
            .checked_mul(height)
            .and_then(|n| n.checked_add(rest_of_column))
            .and_then(|n| usize::try_from(n).ok());
        match remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

#[test]
fn test_cell_iter() {
    let limits = CellLimits {
        minx: 3,
        miny: -1,
        maxx: 5,
        maxy: 2,
    };
    let iter = CellIterator::new(&limits);
    assert_eq!(iter.size_hint(), (6, Some(6)));
    let cells = iter.collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![(3, -1), (3, 0), (3, 1), (4, -1), (4, 0), (4, 1)]
    );

    let limits = CellLimits {
        minx: 0,
        miny: 0,
        maxx: 1,
        maxy: 1,
    };
    let cells = CellIterator::new(&limits).collect::<Vec<_>>();
    assert_eq!(cells, vec![(0, 0)]);
}

#[test]
fn test_empty_limits() {
    // zero width
    let limits = CellLimits {
        minx: 4,
        miny: 0,
        maxx: 4,
        maxy: 3,
    };
    let cells = CellIterator::new(&limits).collect::<Vec<_>>();
    assert_eq!(cells, vec![]);

    // inverted
    let limits = CellLimits {
        minx: 0,
        miny: 5,
        maxx: 2,
        maxy: 3,
    };
    let mut iter = CellIterator::new(&limits);
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_huge_limits() {
    let limits = CellLimits {
        minx: 0,
        miny: 0,
        maxx: 1 << 40,
        maxy: 1 << 40,
    };
    assert_eq!(limits.checked_count(), None);
    assert_eq!(limits.count(), u64::MAX);
    let mut iter = CellIterator::new(&limits);
    assert_eq!(iter.size_hint(), (usize::MAX, None));
    assert_eq!(iter.next(), Some((0, 0)));

    // Width beyond i64
    let limits = CellLimits {
        minx: -(1 << 62),
        miny: 0,
        maxx: 1 << 62,
        maxy: 1,
    };
    assert_eq!(limits.checked_count(), None);
    assert_eq!(CellIterator::new(&limits).next(), Some((-(1 << 62), 0)));
}
