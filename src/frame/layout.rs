// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Placement arithmetic for columns, foundations, rafters and purlins
//!
//! Axes: X spans the frame (left row at x = 0), Y runs along the building
//! depth through the bays, Z is up.

use super::FrameParameters;
use crate::error::{FrameError, GeometryError, ParameterError};
use crate::geometry::{Axis, Placement};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Layout constants. The offsets are empirical joint alignments tuned for
/// the reference dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Frames along the building depth, one rafter length apart
    pub bay_count: usize,
    /// Foundation block size [x, y, z]
    pub foundation_size: [f64; 3],
    /// Foundation shift toward -X, in column thicknesses
    pub foundation_offset_x: f64,
    /// Foundation shift toward -Y, in column thicknesses
    pub foundation_offset_y: f64,
    /// Right rafter pivot shift along +X, in millimetres
    pub right_pivot_shift: f64,
    /// Right rafter pivot rise is `column_thickness / right_pivot_divisor`
    pub right_pivot_divisor: f64,
    /// Left purlin lift, in flange thicknesses
    pub left_purlin_rise: f64,
    /// Ridge purlin drop, in column thicknesses
    pub ridge_purlin_drop: f64,
    /// Right purlin lift, in column thicknesses
    pub right_purlin_rise: f64,
    /// Largest gap still counted as a joint when reporting connectivity
    pub joint_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bay_count: 5,
            foundation_size: [1000.0, 1000.0, 1000.0],
            foundation_offset_x: 2.0,
            foundation_offset_y: 1.5,
            right_pivot_shift: 20.0,
            right_pivot_divisor: 2.1,
            left_purlin_rise: 3.5,
            ridge_purlin_drop: 0.5,
            right_purlin_rise: 1.45,
            joint_tolerance: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.bay_count == 0 {
            return Err(ParameterError::InvalidLayout(
                "at least one bay is required".into(),
            ));
        }
        if !self.foundation_size.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(ParameterError::InvalidLayout(format!(
                "foundation size {:?} must be positive",
                self.foundation_size
            )));
        }
        if !(self.right_pivot_divisor.is_finite() && self.right_pivot_divisor != 0.0) {
            return Err(ParameterError::InvalidLayout(format!(
                "right pivot divisor {} must be finite and non-zero",
                self.right_pivot_divisor
            )));
        }
        if !(self.joint_tolerance.is_finite() && self.joint_tolerance >= 0.0) {
            return Err(ParameterError::InvalidLayout(format!(
                "joint tolerance {} must be a finite, non-negative length",
                self.joint_tolerance
            )));
        }
        let offsets = [
            self.foundation_offset_x,
            self.foundation_offset_y,
            self.right_pivot_shift,
            self.left_purlin_rise,
            self.ridge_purlin_drop,
            self.right_purlin_rise,
        ];
        if !offsets.iter().all(|o| o.is_finite()) {
            return Err(ParameterError::InvalidLayout(
                "tuned offsets must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Derived positions for one parameter set
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    params: FrameParameters,
    config: LayoutConfig,
    angle: f64,
    column_spacing_x: f64,
}

impl FrameLayout {
    pub fn new(params: &FrameParameters, config: &LayoutConfig) -> Result<Self, FrameError> {
        params.validate()?;
        config.validate()?;

        let angle = params.rafter_angle.to_radians();
        let column_spacing_x = 2.0 * params.dimensions.rafter_length * angle.cos();
        if !(column_spacing_x.is_finite() && column_spacing_x > 0.0) || !angle.tan().is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "rafter angle {}° leaves no horizontal span",
                params.rafter_angle
            ))
            .into());
        }

        Ok(Self {
            params: *params,
            config: *config,
            angle,
            column_spacing_x,
        })
    }

    pub fn params(&self) -> &FrameParameters {
        &self.params
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn angle_radians(&self) -> f64 {
        self.angle
    }

    /// Horizontal distance between opposite column centerlines of a bay
    pub fn column_spacing_x(&self) -> f64 {
        self.column_spacing_x
    }

    /// Offset of the right column row from the left one
    pub fn column_row_separation(&self) -> f64 {
        self.column_spacing_x + self.params.dimensions.column_thickness
    }

    pub fn bay_count(&self) -> usize {
        self.config.bay_count
    }

    pub fn bay_depth(&self, bay: usize) -> f64 {
        bay as f64 * self.params.dimensions.rafter_length
    }

    /// Ridge point where the bay's rafters meet
    pub fn apex(&self, bay: usize) -> Point3<f64> {
        let half_span = self.column_spacing_x / 2.0;
        Point3::new(
            half_span,
            self.bay_depth(bay),
            self.params.dimensions.column_height + self.angle.tan() * half_span,
        )
    }

    /// Left and right column placements for the standing column template
    pub fn column_placements(&self, bay: usize) -> [Placement; 2] {
        let y = self.bay_depth(bay);
        [
            Placement::translation(Vector3::new(0.0, y, 0.0)),
            Placement::translation(Vector3::new(self.column_row_separation(), y, 0.0)),
        ]
    }

    pub fn foundation_placements(&self, bay: usize) -> [Placement; 2] {
        let t = self.params.dimensions.column_thickness;
        let x = -t * self.config.foundation_offset_x;
        let y = self.bay_depth(bay) - t * self.config.foundation_offset_y;
        [
            Placement::translation(Vector3::new(x, y, 0.0)),
            Placement::translation(Vector3::new(self.column_spacing_x + x, y, 0.0)),
        ]
    }

    /// Left and right rafter placements for the +X rafter template
    pub fn rafter_placements(&self, bay: usize) -> [Placement; 2] {
        let dims = &self.params.dimensions;
        let y = self.bay_depth(bay);
        let h = dims.column_height;

        let left_foot = Point3::new(0.0, y, h);
        let left = Placement::translation(left_foot.coords)
            .then(&Placement::rotation(&Axis::y_through(left_foot), -self.angle));

        let pivot = Point3::new(
            self.column_spacing_x + self.config.right_pivot_shift,
            y,
            h + dims.column_thickness / self.config.right_pivot_divisor,
        );
        let right = Placement::translation(Vector3::new(self.column_spacing_x, y, h))
            .then(&Placement::rotation(&Axis::y_through(pivot), self.angle - PI));

        [left, right]
    }

    /// Horizontal purlin pitch. Derived from the rafter run, whatever
    /// spacing the caller supplied.
    pub fn purlin_spacing(&self) -> f64 {
        self.params.dimensions.rafter_length * self.angle.cos()
            / (self.params.num_prisms - 1) as f64
    }

    /// Prism origins along the left rafter, eave to ridge
    pub fn left_purlin_positions(&self) -> Vec<Point3<f64>> {
        let dims = &self.params.dimensions;
        let n = self.params.num_prisms;
        let spacing = self.purlin_spacing();
        let slope = self.angle.tan();

        (0..n)
            .map(|i| {
                let (x, bias) = if i == n - 1 {
                    (
                        i as f64 * spacing + dims.roof_width / 2.0,
                        -dims.column_thickness * self.config.ridge_purlin_drop,
                    )
                } else {
                    (
                        i as f64 * spacing,
                        dims.flange_thickness * self.config.left_purlin_rise,
                    )
                };
                let z = dims.column_height + dims.roof_height + slope * x + bias;
                Point3::new(x, 0.0, z)
            })
            .collect()
    }

    /// Prism origins along the right rafter, eave inward. One fewer than
    /// the left rafter.
    pub fn right_purlin_positions(&self) -> Vec<Point3<f64>> {
        let dims = &self.params.dimensions;
        let spacing = self.purlin_spacing();
        let slope = self.angle.tan();

        (0..self.params.num_prisms - 1)
            .map(|i| {
                let run = i as f64 * spacing;
                let z = dims.column_height
                    + slope * run
                    + dims.column_thickness * self.config.right_purlin_rise;
                Point3::new(self.column_spacing_x - run, 0.0, z)
            })
            .collect()
    }

    /// Move a roof prism to `origin` and turn its length across the bays
    pub fn purlin_placement(origin: &Point3<f64>) -> Placement {
        Placement::translation(origin.coords)
            .then(&Placement::rotation(&Axis::z_through(*origin), FRAC_PI_2))
    }
}
