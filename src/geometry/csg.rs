// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG union of closed triangle meshes using BSP trees

use super::{BoundingBox, Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

const EPSILON: f64 = 1e-5;

/// Grid used to weld split vertices back into shared ones
const WELD: f64 = 1e-6;

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

#[derive(Debug, Clone, Copy)]
struct Plane {
    normal: Vector3<f64>,
    w: f64,
}

impl Plane {
    fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a)).try_normalize(1e-12)?;
        Some(Self {
            normal,
            w: normal.dot(&a.coords),
        })
    }

    fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    fn orient_point(&self, point: &Point3<f64>) -> u8 {
        let distance = self.normal.dot(&point.coords) - self.w;
        if distance > EPSILON {
            FRONT
        } else if distance < -EPSILON {
            BACK
        } else {
            COPLANAR
        }
    }

    fn classify(&self, polygon: &Polygon) -> u8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(v))
    }

    /// Sort `polygon` into the four buckets, cutting it where it spans the plane.
    /// Pieces keep the parent's plane.
    fn split_polygon(
        &self,
        polygon: &Polygon,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        let types: Vec<u8> = polygon.vertices.iter().map(|v| self.orient_point(v)).collect();

        match types.iter().fold(COPLANAR, |acc, t| acc | t) {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let n = polygon.vertices.len();
                let mut f = Vec::with_capacity(n + 1);
                let mut b = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (vi, vj) = (polygon.vertices[i], polygon.vertices[j]);

                    if types[i] != BACK {
                        f.push(vi);
                    }
                    if types[i] != FRONT {
                        b.push(vi);
                    }
                    if (types[i] | types[j]) == SPANNING {
                        let denom = self.normal.dot(&(vj - vi));
                        if denom.abs() > f64::EPSILON {
                            let t = (self.w - self.normal.dot(&vi.coords)) / denom;
                            let crossing = vi + (vj - vi) * t;
                            f.push(crossing);
                            b.push(crossing);
                        }
                    }
                }

                if f.len() >= 3 {
                    front.push(Polygon {
                        vertices: f,
                        plane: polygon.plane,
                    });
                }
                if b.len() >= 3 {
                    back.push(Polygon {
                        vertices: b,
                        plane: polygon.plane,
                    });
                }
            }
        }
    }
}

/// Convex planar polygon, counter-clockwise seen from outside
#[derive(Debug, Clone)]
struct Polygon {
    vertices: Vec<Point3<f64>>,
    plane: Plane,
}

impl Polygon {
    fn from_triangle(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Self> {
        let plane = Plane::from_points(&a, &b, &c)?;
        Some(Self {
            vertices: vec![a, b, c],
            plane,
        })
    }

    fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().copied())
    }
}

/// BSP tree node. Built and walked with explicit stacks.
#[derive(Debug, Default)]
struct BSPNode {
    plane: Option<Plane>,
    front: Option<Box<BSPNode>>,
    back: Option<Box<BSPNode>>,
    polygons: Vec<Polygon>,
}

impl BSPNode {
    fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Candidate plane with the fewest spanning polygons and the best balance,
    /// sampled from the first few polygons
    fn pick_splitting_plane(polygons: &[Polygon]) -> Plane {
        const SPAN_WEIGHT: f64 = 8.0;
        const SAMPLE: usize = 20;

        let mut best = polygons[0].plane;
        let mut best_score = f64::MAX;

        for candidate in polygons.iter().take(SAMPLE) {
            let plane = candidate.plane;
            let (mut front, mut back, mut spanning) = (0i64, 0i64, 0i64);
            for polygon in polygons {
                match plane.classify(polygon) {
                    COPLANAR => {}
                    FRONT => front += 1,
                    BACK => back += 1,
                    _ => spanning += 1,
                }
            }
            let score = SPAN_WEIGHT * spanning as f64 + (front - back).abs() as f64;
            if score < best_score {
                best_score = score;
                best = plane;
            }
        }
        best
    }

    fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }
            let plane = *node
                .plane
                .get_or_insert_with(|| Self::pick_splitting_plane(&polys));

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in &polys {
                plane.split_polygon(
                    polygon,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }
            node.polygons.append(&mut coplanar_front);
            node.polygons.append(&mut coplanar_back);

            if !front.is_empty() {
                let child = node.front.get_or_insert_with(Box::default);
                stack.push((&mut **child, front));
            }
            if !back.is_empty() {
                let child = node.back.get_or_insert_with(Box::default);
                stack.push((&mut **child, back));
            }
        }
    }

    /// Remove the parts of `polygons` inside this tree's solid
    fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = node.plane else {
                result.extend(polys);
                continue;
            };

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in &polys {
                plane.split_polygon(
                    polygon,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);

            match &node.front {
                Some(child) if !front.is_empty() => stack.push((&**child, front)),
                Some(_) => {}
                None => result.extend(front),
            }
            if let Some(child) = &node.back {
                if !back.is_empty() {
                    stack.push((&**child, back));
                }
            }
        }
        result
    }
}

fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    mesh.triangles
        .iter()
        .filter_map(|t| {
            let [a, b, c] = t.indices.map(|i| mesh.vertices[i].position);
            Polygon::from_triangle(a, b, c)
        })
        .collect()
}

/// Fan-triangulate polygons into a shared-vertex mesh
fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let mut mesh = Mesh::with_capacity(polygons.len() * 3, polygons.len() * 2);
    let mut welded: HashMap<[i64; 3], usize> = HashMap::new();

    let mut index_of = |mesh: &mut Mesh, p: Point3<f64>| -> usize {
        let key = [p.x, p.y, p.z].map(|c| (c / WELD).round() as i64);
        *welded
            .entry(key)
            .or_insert_with(|| mesh.add_vertex(Vertex::new(p, Vector3::zeros())))
    };

    for polygon in polygons {
        let indices: Vec<usize> = polygon
            .vertices
            .iter()
            .map(|&p| index_of(&mut mesh, p))
            .collect();
        for k in 1..indices.len().saturating_sub(1) {
            let tri = [indices[0], indices[k], indices[k + 1]];
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                mesh.add_triangle(Triangle::new(tri));
            }
        }
    }

    mesh.recompute_normals();
    mesh
}

fn partition(polygons: Vec<Polygon>, other: &BoundingBox) -> (Vec<Polygon>, Vec<Polygon>) {
    polygons
        .into_iter()
        .partition(|p| p.bounding_box().intersects(other, EPSILON))
}

/// Union of two closed meshes.
///
/// Each operand's faces are clipped against the other's full BSP tree, so
/// containment is handled. Faces outside the other operand's bounding box
/// skip clipping, and when the boxes do not meet the meshes are appended.
pub fn csg_union(a: &Mesh, b: &Mesh) -> Mesh {
    let (a_box, b_box) = (a.bounding_box(), b.bounding_box());
    if !a_box.intersects(&b_box, EPSILON) {
        let mut result = a.clone();
        result.merge(b);
        return result;
    }

    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);
    let (a_clip, a_passthru) = partition(polys_a.clone(), &b_box);
    let (b_clip, b_passthru) = partition(polys_b.clone(), &a_box);

    let tree_a = BSPNode::from_polygons(polys_a);
    let tree_b = BSPNode::from_polygons(polys_b);

    // Faces of A outside B. Faces shared with B survive here.
    let mut polygons = tree_b.clip_polygons(a_clip);

    // Faces of B outside A, less those lying on a same-facing face of A
    let mut outside = tree_a.clip_polygons(b_clip);
    outside.iter_mut().for_each(Polygon::flip);
    let mut outside = tree_a.clip_polygons(outside);
    outside.iter_mut().for_each(Polygon::flip);

    polygons.append(&mut outside);
    polygons.extend(a_passthru);
    polygons.extend(b_passthru);
    polygons_to_mesh(&polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh_utils::is_closed;
    use crate::geometry::{mesh_volume, Primitive};
    use approx::assert_relative_eq;
    use nalgebra::Isometry3;

    fn cube_at(x: f64, y: f64, z: f64) -> Mesh {
        let mut mesh = Primitive::block(2.0, 2.0, 2.0).to_mesh();
        mesh.transform(&Isometry3::translation(x, y, z));
        mesh
    }

    #[test]
    fn test_union_with_itself_keeps_volume() {
        let a = cube_at(0.0, 0.0, 0.0);
        let u = csg_union(&a, &a);

        assert_relative_eq!(mesh_volume(&u), 8.0, max_relative = 1e-9);
        assert_eq!(u.vertex_count(), 8);
        assert!(is_closed(&u));
    }

    #[test]
    fn test_half_overlap_counts_shared_volume_once() {
        let u = csg_union(&cube_at(0.0, 0.0, 0.0), &cube_at(1.0, 0.0, 0.0));

        assert_relative_eq!(mesh_volume(&u), 12.0, max_relative = 1e-9);
        assert_eq!(u.bounding_box().to_array(), [0.0, 0.0, 0.0, 3.0, 2.0, 2.0]);
    }

    #[test]
    fn test_corner_overlap() {
        let u = csg_union(&cube_at(0.0, 0.0, 0.0), &cube_at(1.0, 1.0, 1.0));
        assert_relative_eq!(mesh_volume(&u), 15.0, max_relative = 1e-9);
    }

    #[test]
    fn test_contained_operand_disappears() {
        let mut inner = Primitive::block(1.0, 1.0, 1.0).to_mesh();
        inner.transform(&Isometry3::translation(0.5, 0.5, 0.5));
        let outer = cube_at(0.0, 0.0, 0.0);

        for u in [csg_union(&outer, &inner), csg_union(&inner, &outer)] {
            assert_relative_eq!(mesh_volume(&u), 8.0, max_relative = 1e-9);
            assert!(is_closed(&u));
        }
    }

    #[test]
    fn test_disjoint_operands_are_appended() {
        let a = cube_at(0.0, 0.0, 0.0);
        let b = cube_at(5.0, 0.0, 0.0);
        let u = csg_union(&a, &b);

        assert_eq!(u.triangle_count(), 24);
        assert_relative_eq!(mesh_volume(&u), 16.0, max_relative = 1e-12);
        assert!(is_closed(&u));
    }

    #[test]
    fn test_touching_faces_add_up() {
        let u = csg_union(&cube_at(0.0, 0.0, 0.0), &cube_at(2.0, 0.0, 0.0));
        assert_relative_eq!(mesh_volume(&u), 16.0, max_relative = 1e-9);
        assert!(is_closed(&u));
    }

    #[test]
    fn test_split_keeps_both_halves() {
        let plane = Plane {
            normal: Vector3::x(),
            w: 0.5,
        };
        let polygon = Polygon::from_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();

        let (mut cf, mut cb, mut front, mut back) = (vec![], vec![], vec![], vec![]);
        plane.split_polygon(&polygon, &mut cf, &mut cb, &mut front, &mut back);

        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        assert_eq!(front[0].vertices.len(), 3);
        assert_eq!(back[0].vertices.len(), 4);
    }
}
