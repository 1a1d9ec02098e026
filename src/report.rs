// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Build summary: parameters, derived layout figures, member tally and
//! geometry statistics

use crate::error::FrameError;
use crate::frame::{FrameBuilder, FrameLayout, FrameParameters, FrameSummary, LayoutConfig};
use crate::geometry::{analyze, GeometryStats, Solid};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key positions derived from the parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutFigures {
    pub column_spacing_x: f64,
    pub column_row_separation: f64,
    pub purlin_spacing: f64,
    pub ridge_height: f64,
    /// Distance between the first and last bay origins
    pub bay_span: f64,
}

impl LayoutFigures {
    pub fn from_layout(layout: &FrameLayout) -> Self {
        let last_bay = layout.bay_count().saturating_sub(1);
        Self {
            column_spacing_x: layout.column_spacing_x(),
            column_row_separation: layout.column_row_separation(),
            purlin_spacing: layout.purlin_spacing(),
            ridge_height: layout.apex(0).z,
            bay_span: layout.bay_depth(last_bay),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub parameters: FrameParameters,
    pub layout: LayoutConfig,
    pub figures: LayoutFigures,
    pub summary: FrameSummary,
    pub stats: GeometryStats,
    /// Wall-clock build and analysis time in milliseconds
    pub elapsed_ms: f64,
}

impl StructureReport {
    /// Build the structure and summarize it
    pub fn generate(
        params: &FrameParameters,
        config: &LayoutConfig,
    ) -> Result<(Solid, StructureReport), FrameError> {
        let start = std::time::Instant::now();
        let builder = FrameBuilder::new(params, config)?;
        let solid = builder.build()?;
        let stats = analyze(&solid, config.joint_tolerance)?;

        let report = StructureReport {
            parameters: *params,
            layout: *config,
            figures: LayoutFigures::from_layout(builder.layout()),
            summary: FrameSummary::from_solid(&solid),
            stats,
            elapsed_ms: duration_ms(start.elapsed()),
        };
        Ok((solid, report))
    }

    /// Every body joined into one piece at the joint tolerance
    pub fn is_connected(&self) -> bool {
        self.stats.component_count == 1
    }
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
