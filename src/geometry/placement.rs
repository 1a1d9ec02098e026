// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rigid-body placements

use crate::error::GeometryError;
use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

/// Rotation axis: a direction through a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl Axis {
    /// Axis through `origin` along `direction`, which must be non-zero and finite
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Result<Self, GeometryError> {
        if !direction.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("axis direction"));
        }
        let direction = Unit::try_new(direction, 1e-12).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { origin, direction })
    }

    pub fn through(origin: Point3<f64>, direction: Unit<Vector3<f64>>) -> Self {
        Self { origin, direction }
    }

    pub fn y_through(origin: Point3<f64>) -> Self {
        Self::through(origin, Vector3::y_axis())
    }

    pub fn z_through(origin: Point3<f64>) -> Self {
        Self::through(origin, Vector3::z_axis())
    }
}

/// A rigid transform applied to solids.
///
/// Placements compose left to right with [`Placement::then`], so
/// `a.then(&b)` applies `a` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    isometry: Isometry3<f64>,
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }

    pub fn translation(offset: Vector3<f64>) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(offset), UnitQuaternion::identity()),
        }
    }

    /// Right-handed rotation by `angle` radians about `axis`
    pub fn rotation(axis: &Axis, angle: f64) -> Self {
        let to_origin = Isometry3::translation(-axis.origin.x, -axis.origin.y, -axis.origin.z);
        let rotate = Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(&axis.direction, angle),
        );
        let back = Isometry3::translation(axis.origin.x, axis.origin.y, axis.origin.z);

        Self {
            isometry: back * rotate * to_origin,
        }
    }

    /// Apply `self`, then `next`
    pub fn then(&self, next: &Placement) -> Placement {
        Placement {
            isometry: next.isometry * self.isometry,
        }
    }

    pub fn isometry(&self) -> &Isometry3<f64> {
        &self.isometry
    }

    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.isometry.transform_point(point)
    }

    pub fn is_finite(&self) -> bool {
        self.isometry.translation.vector.iter().all(|c| c.is_finite())
            && self.isometry.rotation.coords.iter().all(|c| c.is_finite())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}
