// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Portal frame generator
//!
//! Builds a parametric steel portal frame (I-section columns and rafters,
//! foundation blocks, roof purlins) as one fused triangle-mesh solid and
//! reports its geometry.

pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod report;

pub use config::FrameConfig;
pub use error::{FrameError, GeometryError, InputError, ParameterError, Result};
pub use frame::{Dimensions, FrameBuilder, FrameLayout, FrameParameters, LayoutConfig};
pub use geometry::{analyze, GeometryStats, Mesh, Primitive, Solid};
pub use report::StructureReport;

/// Build the structure with the default layout
pub fn build_structure(params: &FrameParameters) -> Result<Solid> {
    build_structure_with(params, &LayoutConfig::default())
}

pub fn build_structure_with(params: &FrameParameters, config: &LayoutConfig) -> Result<Solid> {
    FrameBuilder::new(params, config)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_build() {
        let solid = build_structure(&FrameParameters::reference(20.0, 10)).unwrap();
        assert_eq!(solid.body_count(), 49);
    }

    #[test]
    fn test_vertical_rafters_rejected() {
        let err = build_structure(&FrameParameters::reference(90.0, 10)).unwrap_err();
        assert!(matches!(err, FrameError::Parameter(_)));
    }
}
