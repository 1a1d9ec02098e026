// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::mesh_utils::is_closed;
use super::{Mesh, Solid};
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Volume enclosed by the fused mesh, overlaps counted once
    pub volume: f64,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Vertex centroid [x, y, z]
    pub centroid: [f64; 3],
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of triangles
    pub triangle_count: usize,
    /// Is every edge shared by exactly two triangles? Seams where a face was
    /// cut during a union leave unmatched edges and report false.
    pub is_watertight: bool,
    /// Number of fused bodies
    pub body_count: usize,
    /// Groups of bodies joined within `joint_tolerance`
    pub component_count: usize,
    pub joint_tolerance: f64,
}

impl GeometryStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            centroid: [0.0; 3],
            vertex_count: 0,
            triangle_count: 0,
            is_watertight: false,
            body_count: 0,
            component_count: 0,
            joint_tolerance: 0.0,
        }
    }

    /// Extent along each axis
    pub fn size(&self) -> [f64; 3] {
        [
            self.bbox[3] - self.bbox[0],
            self.bbox[4] - self.bbox[1],
            self.bbox[5] - self.bbox[2],
        ]
    }
}

/// Analyze a solid and compute statistics
pub fn analyze(solid: &Solid, joint_tolerance: f64) -> Result<GeometryStats, GeometryError> {
    let mesh = solid.mesh();
    if mesh.vertices.is_empty() || mesh.triangles.is_empty() {
        return Ok(GeometryStats::empty());
    }

    Ok(GeometryStats {
        volume: mesh_volume(mesh),
        surface_area: surface_area(mesh),
        bbox: mesh.bounding_box().to_array(),
        centroid: centroid(mesh),
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        is_watertight: is_closed(mesh),
        body_count: solid.body_count(),
        component_count: solid.connected_components(joint_tolerance)?,
        joint_tolerance,
    })
}

/// Calculate mesh volume using signed volume of triangles
pub fn mesh_volume(mesh: &Mesh) -> f64 {
    let mut volume = 0.0;

    for triangle in &mesh.triangles {
        let v0 = &mesh.vertices[triangle.indices[0]].position;
        let v1 = &mesh.vertices[triangle.indices[1]].position;
        let v2 = &mesh.vertices[triangle.indices[2]].position;

        // Signed volume of tetrahedron formed by triangle and origin
        volume += v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0;
    }

    volume.abs()
}

/// Calculate total surface area
fn surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let v0 = &mesh.vertices[triangle.indices[0]].position;
            let v1 = &mesh.vertices[triangle.indices[1]].position;
            let v2 = &mesh.vertices[triangle.indices[2]].position;
            (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
        })
        .sum()
}

fn centroid(mesh: &Mesh) -> [f64; 3] {
    let sum = mesh
        .vertices
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.position.coords);
    let mean = sum / mesh.vertices.len() as f64;
    [mean.x, mean.y, mean.z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ISection, Placement, Primitive};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_analyze_block() {
        let solid = Primitive::block(10.0, 10.0, 10.0).to_solid("box").unwrap();
        let stats = analyze(&solid, 0.0).unwrap();

        assert_relative_eq!(stats.volume, 1000.0, max_relative = 1e-12);
        assert_relative_eq!(stats.surface_area, 600.0, max_relative = 1e-12);
        assert_eq!(stats.vertex_count, 8);
        assert_eq!(stats.triangle_count, 12);
        assert!(stats.is_watertight);
        assert_eq!(stats.body_count, 1);
        assert_eq!(stats.component_count, 1);
        assert_relative_eq!(stats.centroid[0], 5.0);
    }

    #[test]
    fn test_volume_survives_placement() {
        let section = ISection::new(900.0, 250.0, 250.0, 20.0, 9.1);
        let solid = Primitive::i_section(section).to_solid("beam").unwrap();
        let moved = solid
            .transformed(&Placement::translation(Vector3::new(1e4, -3e3, 2e3)))
            .unwrap();

        let before = analyze(&solid, 0.0).unwrap();
        let after = analyze(&moved, 0.0).unwrap();
        assert_relative_eq!(before.volume, after.volume, max_relative = 1e-9);
        assert_relative_eq!(before.surface_area, after.surface_area, max_relative = 1e-9);
    }

    #[test]
    fn test_fused_volume_counts_overlap_once() {
        let a = Primitive::block(2.0, 2.0, 2.0).to_solid("a").unwrap();
        let b = a.clone().fuse(a.clone()).unwrap();
        let stats = analyze(&b, 0.0).unwrap();

        assert_relative_eq!(stats.volume, 8.0, max_relative = 1e-9);
        assert!(stats.is_watertight);
        assert_eq!(stats.body_count, 2);
        assert_eq!(stats.component_count, 1);
    }

    #[test]
    fn test_half_overlapping_blocks() {
        let a = Primitive::block(2.0, 2.0, 2.0).to_solid("a").unwrap();
        let b = a
            .transformed(&Placement::translation(Vector3::new(1.0, 0.0, 0.0)))
            .unwrap();
        let stats = analyze(&a.fuse(b).unwrap(), 0.0).unwrap();

        assert_relative_eq!(stats.volume, 12.0, max_relative = 1e-9);
        assert_eq!(stats.bbox, [0.0, 0.0, 0.0, 3.0, 2.0, 2.0]);
    }

    #[test]
    fn test_column_seated_in_foundation() {
        let section = ISection::new(4000.0, 250.0, 250.0, 20.0, 9.1);
        let column = Primitive::i_section(section).to_solid("column").unwrap();
        let column = column
            .transformed(&Placement::translation(Vector3::new(400.0, 375.0, 375.0)))
            .unwrap();
        let foundation = Primitive::block(1000.0, 1000.0, 1000.0)
            .to_solid("foundation")
            .unwrap();

        // 600 of the 4000 mm length sits inside the block
        let expected = 1e9 + section.area() * 3400.0;
        let stats = analyze(&foundation.fuse(column).unwrap(), 0.0).unwrap();
        assert_relative_eq!(stats.volume, expected, max_relative = 1e-9);
    }
}
