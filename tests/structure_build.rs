// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end portal frame builds

use anyhow::Result;
use approx::assert_relative_eq;
use portalframe::frame::{FrameSummary, LayoutConfig};
use portalframe::{analyze, build_structure, build_structure_with, FrameParameters, StructureReport};

fn reference() -> FrameParameters {
    FrameParameters::reference(20.0, 10)
}

#[test]
fn test_reference_member_counts() -> Result<()> {
    let solid = build_structure(&reference())?;
    let summary = FrameSummary::from_solid(&solid);

    println!("Reference frame: {:?}", summary);

    assert_eq!(summary.columns, 10);
    assert_eq!(summary.foundations, 10);
    assert_eq!(summary.rafters, 10);
    assert_eq!(summary.left_purlins, 10);
    assert_eq!(summary.right_purlins, 9);
    assert_eq!(summary.other, 0);
    assert_eq!(solid.body_count(), 49);

    Ok(())
}

#[test]
fn test_reference_extent() -> Result<()> {
    let solid = build_structure(&reference())?;
    let bbox = solid.bounding_box();
    let column_spacing_x = 2.0 * 9000.0 * 20f64.to_radians().cos();

    // Foundations overhang the first and last bay origins
    assert_relative_eq!(bbox.min.y, -375.0, epsilon = 1e-6);
    assert_relative_eq!(bbox.max.y, 4.0 * 9000.0 + 625.0, epsilon = 1e-6);
    assert_relative_eq!(bbox.size().y, 4.0 * 9000.0 + 1000.0, epsilon = 1e-6);

    assert_relative_eq!(bbox.min.x, -500.0, epsilon = 1e-6);
    assert_relative_eq!(bbox.max.x, column_spacing_x + 500.0, epsilon = 1e-6);
    assert_relative_eq!(bbox.min.z, 0.0, epsilon = 1e-6);
    assert!(bbox.max.z > 4000.0 + 20f64.to_radians().tan() * column_spacing_x / 2.0);

    Ok(())
}

#[test]
fn test_reference_volume_is_union_of_members() -> Result<()> {
    let solid = build_structure(&reference())?;
    let stats = analyze(&solid, 50.0)?;

    let section_area = 2.0 * 250.0 * 20.0 + 9.10 * 210.0;
    let member_sum = 10.0 * section_area * 4000.0
        + 10.0 * 1000.0f64.powi(3)
        + 10.0 * section_area * 9000.0
        + 19.0 * 36200.0 * 200.0 * 200.0;

    // The bottom 1000 mm of every column is inside its foundation
    let seated = 10.0 * section_area * 1000.0;
    let without_seating = member_sum - seated;

    println!(
        "Volume: {:.6e} mm³ (members {:.6e}, less seating {:.6e})",
        stats.volume, member_sum, without_seating
    );

    // What remains is the rafter pair and ridge purlin overlap at each apex
    let apex_overlap = without_seating - stats.volume;
    assert!(apex_overlap > 0.0, "apex overlap {apex_overlap}");
    assert!(apex_overlap < 5.0e6, "apex overlap {apex_overlap}");

    Ok(())
}

#[test]
fn test_overlaps_leave_member_sum() -> Result<()> {
    let config = LayoutConfig {
        bay_count: 2,
        ..LayoutConfig::default()
    };
    let solid = build_structure_with(&FrameParameters::reference(20.0, 2), &config)?;
    let fused = analyze(&solid, 50.0)?;

    let summed: f64 = solid.bodies().iter().map(|body| body.volume()).sum();
    let seated = 4.0 * (2.0 * 250.0 * 20.0 + 9.10 * 210.0) * 1000.0;
    assert!(summed - fused.volume >= seated * (1.0 - 1e-9));

    Ok(())
}

#[test]
fn test_reference_is_connected_at_default_tolerance() -> Result<()> {
    let (_, report) = StructureReport::generate(&reference(), &LayoutConfig::default())?;

    println!(
        "Components at {} mm: {}",
        report.stats.joint_tolerance, report.stats.component_count
    );
    assert!(report.is_connected());

    let column_spacing_x = 2.0 * 9000.0 * 20f64.to_radians().cos();
    assert_relative_eq!(
        report.figures.column_row_separation,
        column_spacing_x + 250.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(report.figures.bay_span, 4.0 * 9000.0);

    Ok(())
}

#[test]
fn test_tight_tolerance_exposes_seating_gaps() -> Result<()> {
    let config = LayoutConfig {
        joint_tolerance: 0.5,
        ..LayoutConfig::default()
    };
    let (_, report) = StructureReport::generate(&reference(), &config)?;

    assert!(report.stats.component_count > 1);
    assert!(!report.is_connected());

    Ok(())
}

#[test]
fn test_build_is_idempotent() -> Result<()> {
    let params = FrameParameters::reference(27.5, 7);
    let first = build_structure(&params)?;
    let second = build_structure(&params)?;

    assert_eq!(first.bounding_box(), second.bounding_box());
    assert_eq!(analyze(&first, 0.0)?.volume, analyze(&second, 0.0)?.volume);
    assert_eq!(first.mesh().vertices.len(), second.mesh().vertices.len());

    Ok(())
}

#[test]
fn test_purlin_asymmetry_across_counts() -> Result<()> {
    for n in [2, 3, 6, 12] {
        let solid = build_structure(&FrameParameters::reference(20.0, n))?;
        let summary = FrameSummary::from_solid(&solid);
        assert_eq!(summary.left_purlins, n);
        assert_eq!(summary.right_purlins, n - 1);
    }
    Ok(())
}

#[test]
fn test_supplied_spacing_does_not_change_geometry() -> Result<()> {
    let params = reference();
    let skewed = params.with_prism_spacing(123.0);

    let a = build_structure(&params)?;
    let b = build_structure(&skewed)?;
    assert_eq!(a.bounding_box(), b.bounding_box());

    Ok(())
}

#[test]
fn test_invalid_inputs_fail() {
    assert!(build_structure(&FrameParameters::reference(0.0, 10)).is_err());
    assert!(build_structure(&FrameParameters::reference(90.0, 10)).is_err());
    assert!(build_structure(&FrameParameters::reference(20.0, 1)).is_err());

    let mut params = reference();
    params.dimensions.web_thickness = -1.0;
    assert!(build_structure(&params).is_err());

    let config = LayoutConfig {
        bay_count: 0,
        ..LayoutConfig::default()
    };
    assert!(build_structure_with(&reference(), &config).is_err());
}

#[test]
fn test_report_json_has_sections() -> Result<()> {
    let params = FrameParameters::reference(20.0, 4);
    let (_, report) = StructureReport::generate(&params, &LayoutConfig::default())?;
    let value = serde_json::to_value(&report)?;

    for key in ["parameters", "layout", "figures", "summary", "stats"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["summary"]["left_purlins"], 4);

    Ok(())
}
