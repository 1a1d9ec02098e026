// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh validation utilities

use super::Mesh;
use std::collections::HashMap;

/// Undirected edge, smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    v0: usize,
    v1: usize,
}

impl Edge {
    fn new(v0: usize, v1: usize) -> Self {
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

/// How many triangles use each undirected edge
pub fn build_edge_counts(mesh: &Mesh) -> HashMap<Edge, u32> {
    let mut edge_counts: HashMap<Edge, u32> = HashMap::new();

    for triangle in &mesh.triangles {
        let [a, b, c] = triangle.indices;
        for edge in [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)] {
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }

    edge_counts
}

/// Check if mesh is manifold (each edge shared by at most 2 triangles)
pub fn is_manifold(mesh: &Mesh) -> bool {
    build_edge_counts(mesh).values().all(|&count| count <= 2)
}

/// Check if mesh is closed (each edge shared by exactly 2 triangles)
pub fn is_closed(mesh: &Mesh) -> bool {
    build_edge_counts(mesh).values().all(|&count| count == 2)
}

/// Every directed edge appears once and its reverse once, so
/// neighbouring triangles agree on orientation.
pub fn is_consistently_wound(mesh: &Mesh) -> bool {
    let mut directed: HashMap<(usize, usize), u32> = HashMap::new();
    for triangle in &mesh.triangles {
        let [a, b, c] = triangle.indices;
        for edge in [(a, b), (b, c), (c, a)] {
            *directed.entry(edge).or_insert(0) += 1;
        }
    }

    directed
        .iter()
        .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
}

/// Mesh validation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshValidation {
    pub is_manifold: bool,
    pub is_closed: bool,
    pub is_consistently_wound: bool,
    pub edge_count: usize,
    pub boundary_edge_count: usize,
}

pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    let edge_counts = build_edge_counts(mesh);

    MeshValidation {
        is_manifold: edge_counts.values().all(|&count| count <= 2),
        is_closed: edge_counts.values().all(|&count| count == 2),
        is_consistently_wound: is_consistently_wound(mesh),
        edge_count: edge_counts.len(),
        boundary_edge_count: edge_counts.values().filter(|&&count| count == 1).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ISection, Primitive, Triangle};

    #[test]
    fn test_block_is_closed_and_wound() {
        let mesh = Primitive::block(10.0, 10.0, 10.0).to_mesh();
        let validation = validate_mesh(&mesh);

        assert!(validation.is_manifold);
        assert!(validation.is_closed);
        assert!(validation.is_consistently_wound);
        // 12 outline/side edges + 6 face diagonals
        assert_eq!(validation.edge_count, 18);
        assert_eq!(validation.boundary_edge_count, 0);
    }

    #[test]
    fn test_i_section_is_consistently_wound() {
        let section = ISection::new(500.0, 250.0, 250.0, 20.0, 9.1);
        let mesh = Primitive::i_section(section).to_mesh();
        assert!(is_consistently_wound(&mesh));
    }

    #[test]
    fn test_open_mesh_reports_boundary() {
        let mut mesh = Primitive::block(1.0, 1.0, 1.0).to_mesh();
        mesh.triangles.pop();

        let validation = validate_mesh(&mesh);
        assert!(validation.is_manifold);
        assert!(!validation.is_closed);
        assert_eq!(validation.boundary_edge_count, 3);
    }

    #[test]
    fn test_flipped_triangle_breaks_winding() {
        let mut mesh = Primitive::block(1.0, 1.0, 1.0).to_mesh();
        let [a, b, c] = mesh.triangles[0].indices;
        mesh.triangles[0] = Triangle::new([a, c, b]);
        assert!(!is_consistently_wound(&mesh));
    }
}
