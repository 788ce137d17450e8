//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod grid_service;
pub mod stats;

pub use self::grid_service::GridService;
pub use self::stats::{GridStats, ZoomStats};
