// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structural parameters

use crate::error::ParameterError;
use serde::{Deserialize, Serialize};

/// Fixed member dimensions, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub column_height: f64,
    /// Flange width and overall depth of the I-section members. Many
    /// offsets in [`LayoutConfig`](super::LayoutConfig) scale with it.
    pub column_thickness: f64,
    pub rafter_length: f64,
    pub roof_length: f64,
    pub roof_width: f64,
    pub roof_height: f64,
    pub flange_thickness: f64,
    pub web_thickness: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        let rafter_length = 9000.0;
        Self {
            column_height: 4000.0,
            column_thickness: 250.0,
            rafter_length,
            roof_length: rafter_length * 4.0 + 200.0,
            roof_width: 200.0,
            roof_height: 200.0,
            flange_thickness: 20.0,
            web_thickness: 9.10,
        }
    }
}

impl Dimensions {
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (parameter, value) in [
            ("column_height", self.column_height),
            ("column_thickness", self.column_thickness),
            ("rafter_length", self.rafter_length),
            ("roof_length", self.roof_length),
            ("roof_width", self.roof_width),
            ("roof_height", self.roof_height),
            ("flange_thickness", self.flange_thickness),
            ("web_thickness", self.web_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::NotPositive { parameter, value });
            }
        }

        if 2.0 * self.flange_thickness >= self.column_thickness {
            return Err(ParameterError::InvalidSection(format!(
                "two {} mm flanges do not fit a {} mm deep section",
                self.flange_thickness, self.column_thickness
            )));
        }
        if self.web_thickness >= self.column_thickness {
            return Err(ParameterError::InvalidSection(format!(
                "{} mm web is not narrower than the {} mm flange",
                self.web_thickness, self.column_thickness
            )));
        }
        Ok(())
    }
}

/// Everything one structure is generated from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameParameters {
    pub dimensions: Dimensions,
    /// Rafter inclination in degrees
    pub rafter_angle: f64,
    /// Caller-supplied purlin spacing. Placement recomputes the spacing from
    /// the rafter geometry and never reads this value.
    pub prism_spacing: f64,
    /// Purlins on the left rafter; the right rafter carries one fewer
    pub num_prisms: usize,
}

impl FrameParameters {
    /// Parameters with the supplied spacing defaulted to
    /// `rafter_length / (num_prisms - 1)`.
    pub fn new(dimensions: Dimensions, rafter_angle: f64, num_prisms: usize) -> Self {
        let prism_spacing = if num_prisms > 1 {
            dimensions.rafter_length / (num_prisms - 1) as f64
        } else {
            f64::INFINITY
        };
        Self {
            dimensions,
            rafter_angle,
            prism_spacing,
            num_prisms,
        }
    }

    /// Reference dimensions with the two user inputs
    pub fn reference(rafter_angle: f64, num_prisms: usize) -> Self {
        Self::new(Dimensions::default(), rafter_angle, num_prisms)
    }

    pub fn with_prism_spacing(mut self, prism_spacing: f64) -> Self {
        self.prism_spacing = prism_spacing;
        self
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        self.dimensions.validate()?;

        let angle = self.rafter_angle;
        if !(angle.is_finite() && angle > 0.0 && angle < 90.0) {
            return Err(ParameterError::OutOfRange {
                parameter: "rafter_angle",
                value: angle,
                min: 0.0,
                max: 90.0,
            });
        }
        if self.num_prisms < 2 {
            return Err(ParameterError::TooFewPurlins(self.num_prisms));
        }
        Ok(())
    }
}
