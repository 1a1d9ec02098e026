// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh kernel: primitives, placements, solids and analytics

mod analytics;
mod bbox;
mod csg;
mod mesh;
pub mod mesh_utils;
mod placement;
mod primitives;
mod solid;

pub use analytics::{analyze, mesh_volume, GeometryStats};
pub use bbox::BoundingBox;
pub use csg::csg_union;
pub use mesh::{Mesh, Triangle, Vertex};
pub use placement::{Axis, Placement};
pub use primitives::{ISection, Primitive};
pub use solid::{Block, Body, Solid};
