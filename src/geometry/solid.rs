// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Solids: meshes plus the labeled bodies fused into them

use super::{csg_union, BoundingBox, Mesh, Placement};
use crate::error::GeometryError;
use nalgebra::{Isometry3, Point3, Translation3, Vector3};
use parry3d::na as pna;
use parry3d::shape::Cuboid;

/// Oriented box, `pose` maps the local `[0, size]` box into place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub size: Vector3<f64>,
    pub pose: Isometry3<f64>,
}

impl Block {
    pub fn new(size: Vector3<f64>, pose: Isometry3<f64>) -> Self {
        Self { size, pose }
    }

    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let s = self.size;
        let local = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(s.x, 0.0, 0.0),
            Point3::new(s.x, s.y, 0.0),
            Point3::new(0.0, s.y, 0.0),
            Point3::new(0.0, 0.0, s.z),
            Point3::new(s.x, 0.0, s.z),
            Point3::new(s.x, s.y, s.z),
            Point3::new(0.0, s.y, s.z),
        ];
        local.map(|p| self.pose.transform_point(&p))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.corners())
    }

    /// Centered cuboid and its pose in parry's single-precision types
    fn to_parry(&self) -> (pna::Isometry3<f32>, Cuboid) {
        let half = self.size / 2.0;
        let center = self.pose * Translation3::from(half);
        let t = center.translation.vector;
        let q = center.rotation.quaternion();

        let rotation = pna::UnitQuaternion::from_quaternion(pna::Quaternion::new(
            q.w as f32, q.i as f32, q.j as f32, q.k as f32,
        ));
        let pose = pna::Isometry3::from_parts(
            pna::Translation3::new(t.x as f32, t.y as f32, t.z as f32),
            rotation,
        );
        let cuboid = Cuboid::new(pna::Vector3::new(half.x as f32, half.y as f32, half.z as f32));
        (pose, cuboid)
    }

    /// Euclidean gap between two blocks, zero when they touch or overlap
    pub fn distance(&self, other: &Block) -> Result<f64, GeometryError> {
        let (pose_a, a) = self.to_parry();
        let (pose_b, b) = other.to_parry();
        parry3d::query::distance(&pose_a, &a, &pose_b, &b)
            .map(f64::from)
            .map_err(|e| GeometryError::Query(format!("{e:?}")))
    }
}

/// One primitive fused into a solid
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    label: String,
    blocks: Vec<Block>,
}

impl Body {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn volume(&self) -> f64 {
        self.blocks.iter().map(Block::volume).sum()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.blocks
            .iter()
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b.bounding_box()))
    }

    /// Smallest gap between any pair of blocks
    pub fn distance(&self, other: &Body) -> Result<f64, GeometryError> {
        let mut best = f64::INFINITY;
        for a in &self.blocks {
            for b in &other.blocks {
                best = best.min(a.distance(b)?);
            }
        }
        Ok(best)
    }
}

/// Boundary-represented solid.
///
/// Values are never mutated in place: transforms return new solids and
/// [`Solid::fuse`] consumes both operands.
#[derive(Debug, Clone)]
pub struct Solid {
    mesh: Mesh,
    bodies: Vec<Body>,
}

impl Solid {
    pub(crate) fn from_body(label: &str, mesh: Mesh, blocks: Vec<Block>) -> Self {
        Self {
            mesh,
            bodies: vec![Body {
                label: label.to_string(),
                blocks,
            }],
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Bodies whose label equals `label`
    pub fn count_label(&self, label: &str) -> usize {
        self.bodies.iter().filter(|b| b.label == label).count()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() || self.mesh.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.mesh.bounding_box()
    }

    /// Relabel every body
    pub fn labeled(mut self, label: &str) -> Solid {
        for body in &mut self.bodies {
            body.label = label.to_string();
        }
        self
    }

    /// Transformed copy
    pub fn transformed(&self, placement: &Placement) -> Result<Solid, GeometryError> {
        if !placement.is_finite() {
            return Err(GeometryError::NonFinite("placement"));
        }
        let iso = placement.isometry();

        let mut mesh = self.mesh.clone();
        mesh.transform(iso);
        if !mesh.is_finite() {
            return Err(GeometryError::NonFinite("transform"));
        }

        let bodies = self
            .bodies
            .iter()
            .map(|body| Body {
                label: body.label.clone(),
                blocks: body
                    .blocks
                    .iter()
                    .map(|b| Block::new(b.size, iso * b.pose))
                    .collect(),
            })
            .collect();

        Ok(Solid { mesh, bodies })
    }

    /// Boolean union. The mesh bounds the occupied volume of both operands;
    /// bodies are kept in operand order.
    pub fn fuse(mut self, other: Solid) -> Result<Solid, GeometryError> {
        if self.is_empty() || other.is_empty() {
            return Err(GeometryError::EmptyOperand);
        }
        self.mesh = csg_union(&self.mesh, &other.mesh);
        self.bodies.extend(other.bodies);
        Ok(self)
    }

    /// Left-to-right fold of [`Solid::fuse`]
    pub fn fuse_all<I>(solids: I) -> Result<Solid, GeometryError>
    where
        I: IntoIterator<Item = Solid>,
    {
        let mut iter = solids.into_iter();
        let first = iter.next().ok_or(GeometryError::EmptyOperand)?;
        iter.try_fold(first, Solid::fuse)
    }

    /// Number of groups of bodies linked by gaps no wider than `tolerance`
    pub fn connected_components(&self, tolerance: f64) -> Result<usize, GeometryError> {
        let boxes: Vec<BoundingBox> = self.bodies.iter().map(Body::bounding_box).collect();
        let mut parent: Vec<usize> = (0..self.bodies.len()).collect();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                if find(&mut parent, i) == find(&mut parent, j) {
                    continue;
                }
                if !boxes[i].intersects(&boxes[j], tolerance / 2.0) {
                    continue;
                }
                if self.bodies[i].distance(&self.bodies[j])? <= tolerance {
                    let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                    parent[rj] = ri;
                }
            }
        }

        Ok((0..parent.len())
            .filter(|&i| find(&mut parent, i) == i)
            .count())
    }
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}
