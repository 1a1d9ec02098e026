// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives generator
//!
//! Every primitive is a prism: a closed 2D profile in the YZ plane extruded
//! along +X. Meshes share vertices between faces and wind outward.

use super::{Block, Mesh, Solid, Triangle, Vertex};
use crate::error::GeometryError;
use nalgebra::{Isometry3, Point2, Point3, Vector3};

/// Structural I-section profile extruded along +X.
///
/// Flanges run along Y and sit at the bottom and top of the section depth
/// (Z); the web is centered on the flange width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ISection {
    pub length: f64,
    /// Flange width (Y extent)
    pub flange_width: f64,
    /// Overall depth (Z extent)
    pub depth: f64,
    pub flange_thickness: f64,
    pub web_thickness: f64,
}

impl ISection {
    pub fn new(
        length: f64,
        flange_width: f64,
        depth: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> Self {
        Self {
            length,
            flange_width,
            depth,
            flange_thickness,
            web_thickness,
        }
    }

    fn validate(&self) -> Result<(), GeometryError> {
        for (name, value) in [
            ("length", self.length),
            ("flange width", self.flange_width),
            ("depth", self.depth),
            ("flange thickness", self.flange_thickness),
            ("web thickness", self.web_thickness),
        ] {
            positive(name, value)?;
        }
        if 2.0 * self.flange_thickness >= self.depth {
            return Err(GeometryError::Degenerate(format!(
                "flanges ({} each) leave no web in a {} deep section",
                self.flange_thickness, self.depth
            )));
        }
        if self.web_thickness >= self.flange_width {
            return Err(GeometryError::Degenerate(format!(
                "web thickness {} is not narrower than flange width {}",
                self.web_thickness, self.flange_width
            )));
        }
        Ok(())
    }

    /// Cross-sectional area
    pub fn area(&self) -> f64 {
        2.0 * self.flange_width * self.flange_thickness
            + self.web_thickness * (self.depth - 2.0 * self.flange_thickness)
    }

    /// Outline, counter-clockwise in (y, z)
    fn profile(&self) -> Vec<Point2<f64>> {
        let w = self.flange_width;
        let d = self.depth;
        let t = self.flange_thickness;
        let web_lo = (w - self.web_thickness) / 2.0;
        let web_hi = (w + self.web_thickness) / 2.0;

        vec![
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, t),
            Point2::new(web_hi, t),
            Point2::new(web_hi, d - t),
            Point2::new(w, d - t),
            Point2::new(w, d),
            Point2::new(0.0, d),
            Point2::new(0.0, d - t),
            Point2::new(web_lo, d - t),
            Point2::new(web_lo, t),
            Point2::new(0.0, t),
        ]
    }

    /// Flange, web, flange. Fans never cross the re-entrant corners.
    const CAP_TRIANGLES: [[usize; 3]; 10] = [
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 10],
        [0, 10, 11],
        [10, 3, 4],
        [10, 4, 9],
        [7, 8, 9],
        [7, 9, 4],
        [7, 4, 5],
        [7, 5, 6],
    ];

    fn blocks(&self) -> Vec<Block> {
        let t = self.flange_thickness;
        let web_lo = (self.flange_width - self.web_thickness) / 2.0;

        vec![
            Block::new(
                Vector3::new(self.length, self.flange_width, t),
                Isometry3::identity(),
            ),
            Block::new(
                Vector3::new(self.length, self.web_thickness, self.depth - 2.0 * t),
                Isometry3::translation(0.0, web_lo, t),
            ),
            Block::new(
                Vector3::new(self.length, self.flange_width, t),
                Isometry3::translation(0.0, 0.0, self.depth - t),
            ),
        ]
    }
}

/// Geometric primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box with one corner at the origin
    Cuboid { size: Vector3<f64> },
    ISection(ISection),
}

impl Primitive {
    /// Box spanning `[0,dx]×[0,dy]×[0,dz]`
    pub fn block(dx: f64, dy: f64, dz: f64) -> Self {
        Self::Cuboid {
            size: Vector3::new(dx, dy, dz),
        }
    }

    /// Roof prism: length along X, width along Y, height along Z
    pub fn rectangular_prism(length: f64, width: f64, height: f64) -> Self {
        Self::block(length, width, height)
    }

    pub fn i_section(section: ISection) -> Self {
        Self::ISection(section)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Self::Cuboid { size } => {
                positive("box length", size.x)?;
                positive("box width", size.y)?;
                positive("box height", size.z)
            }
            Self::ISection(section) => section.validate(),
        }
    }

    /// Analytic volume
    pub fn volume(&self) -> f64 {
        match self {
            Self::Cuboid { size } => size.x * size.y * size.z,
            Self::ISection(section) => section.area() * section.length,
        }
    }

    /// Tessellate without validation
    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cuboid { size } => {
                let profile = [
                    Point2::new(0.0, 0.0),
                    Point2::new(size.y, 0.0),
                    Point2::new(size.y, size.z),
                    Point2::new(0.0, size.z),
                ];
                extrude_profile(&profile, &[[0, 1, 2], [0, 2, 3]], size.x)
            }
            Self::ISection(section) => {
                extrude_profile(&section.profile(), &ISection::CAP_TRIANGLES, section.length)
            }
        }
    }

    /// Build a validated, single-body solid
    pub fn to_solid(&self, label: &str) -> Result<Solid, GeometryError> {
        self.validate()?;

        let blocks = match self {
            Self::Cuboid { size } => vec![Block::new(*size, Isometry3::identity())],
            Self::ISection(section) => section.blocks(),
        };
        Ok(Solid::from_body(label, self.to_mesh(), blocks))
    }
}

fn positive(name: &str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::Degenerate(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Extrude a counter-clockwise (y, z) profile along +X.
///
/// `caps` triangulates the profile using outline indices only.
fn extrude_profile(profile: &[Point2<f64>], caps: &[[usize; 3]], length: f64) -> Mesh {
    let n = profile.len();
    let mut mesh = Mesh::with_capacity(2 * n, 2 * caps.len() + 2 * n);

    for x in [0.0, length] {
        for p in profile {
            mesh.add_vertex(Vertex::new(Point3::new(x, p.x, p.y), Vector3::zeros()));
        }
    }

    // Near cap faces -X, far cap faces +X
    for &[a, b, c] in caps {
        mesh.add_triangle(Triangle::new([a, c, b]));
        mesh.add_triangle(Triangle::new([n + a, n + b, n + c]));
    }

    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_triangle(Triangle::new([i, j, n + j]));
        mesh.add_triangle(Triangle::new([i, n + j, n + i]));
    }

    mesh.recompute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::analytics::mesh_volume;
    use crate::geometry::mesh_utils::{is_closed, is_manifold};
    use approx::assert_relative_eq;

    fn reference_section(length: f64) -> ISection {
        ISection::new(length, 250.0, 250.0, 20.0, 9.10)
    }

    #[test]
    fn test_block_generation() {
        let mesh = Primitive::block(10.0, 20.0, 30.0).to_mesh();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(is_manifold(&mesh));
        assert!(is_closed(&mesh));

        let bbox = mesh.bounding_box();
        assert_eq!(bbox.to_array(), [0.0, 0.0, 0.0, 10.0, 20.0, 30.0]);
        assert_relative_eq!(mesh_volume(&mesh), 6000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_i_section_is_closed() {
        let mesh = Primitive::i_section(reference_section(4000.0)).to_mesh();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 44);
        assert!(is_manifold(&mesh), "I-section mesh should be manifold");
        assert!(is_closed(&mesh), "I-section mesh should be closed");
    }

    #[test]
    fn test_i_section_volume_matches_area() {
        let section = reference_section(4000.0);
        let mesh = Primitive::i_section(section).to_mesh();

        // 2 × 250 × 20 + 9.1 × 210 = 11911 mm²
        assert_relative_eq!(section.area(), 11911.0, max_relative = 1e-12);
        assert_relative_eq!(mesh_volume(&mesh), 11911.0 * 4000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_i_section_blocks_cover_area() {
        let section = reference_section(1.0);
        let total: f64 = section.blocks().iter().map(Block::volume).sum();
        assert_relative_eq!(total, section.area(), max_relative = 1e-12);
    }

    #[test]
    fn test_degenerate_primitives_rejected() {
        assert!(Primitive::block(0.0, 1.0, 1.0).to_solid("box").is_err());
        assert!(Primitive::block(1.0, f64::NAN, 1.0).to_solid("box").is_err());

        let fat_flanges = ISection::new(100.0, 250.0, 250.0, 125.0, 9.1);
        assert!(matches!(
            Primitive::i_section(fat_flanges).to_solid("beam"),
            Err(GeometryError::Degenerate(_))
        ));

        let wide_web = ISection::new(100.0, 250.0, 250.0, 20.0, 250.0);
        assert!(Primitive::i_section(wide_web).validate().is_err());
    }
}
