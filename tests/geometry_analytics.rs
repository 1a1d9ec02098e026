// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics verification tests

use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use portalframe::geometry::{analyze, Axis, ISection, Placement, Primitive, Solid};

#[test]
fn test_block_volume_and_surface_area() -> Result<()> {
    let solid = Primitive::block(10.0, 10.0, 10.0).to_solid("block")?;
    let stats = analyze(&solid, 0.0)?;

    println!("Block 10×10×10:");
    println!("  Volume: {:.2} mm³ (expected: 1000)", stats.volume);
    println!("  Surface area: {:.2} mm² (expected: 600)", stats.surface_area);

    assert_relative_eq!(stats.volume, 1000.0, max_relative = 1e-12);
    assert_relative_eq!(stats.surface_area, 600.0, max_relative = 1e-12);
    assert_eq!(stats.vertex_count, 8);
    assert_eq!(stats.triangle_count, 12);
    assert!(stats.is_watertight);

    Ok(())
}

#[test]
fn test_i_section_volume_and_surface_area() -> Result<()> {
    let section = ISection::new(1000.0, 250.0, 250.0, 20.0, 9.10);
    let solid = Primitive::i_section(section).to_solid("beam")?;
    let stats = analyze(&solid, 0.0)?;

    // Outline: 2 outer flange faces, 4 flange edges, 4 flange undersides,
    // 2 web faces
    let perimeter = 2.0 * 250.0 + 4.0 * 20.0 + 4.0 * (250.0 - 9.10) / 2.0 + 2.0 * 210.0;
    let expected_area = perimeter * 1000.0 + 2.0 * section.area();

    println!("I-section 1000 mm:");
    println!("  Volume: {:.2} mm³ (expected: {:.2})", stats.volume, 11911.0 * 1000.0);
    println!("  Surface area: {:.2} mm² (expected: {:.2})", stats.surface_area, expected_area);

    assert_relative_eq!(stats.volume, 11911.0 * 1000.0, max_relative = 1e-9);
    assert_relative_eq!(stats.surface_area, expected_area, max_relative = 1e-9);
    assert_eq!(stats.bbox, [0.0, 0.0, 0.0, 1000.0, 250.0, 250.0]);

    Ok(())
}

#[test]
fn test_rotation_preserves_measures() -> Result<()> {
    let solid = Primitive::rectangular_prism(3000.0, 200.0, 200.0).to_solid("purlin")?;
    let axis = Axis::new(Point3::new(10.0, -4.0, 7.0), Vector3::new(1.0, 2.0, 3.0))?;
    let turned = solid.transformed(&Placement::rotation(&axis, 1.234))?;

    let before = analyze(&solid, 0.0)?;
    let after = analyze(&turned, 0.0)?;

    assert_relative_eq!(before.volume, after.volume, max_relative = 1e-9);
    assert_relative_eq!(before.surface_area, after.surface_area, max_relative = 1e-9);
    assert!(after.is_watertight);

    Ok(())
}

#[test]
fn test_component_count_follows_tolerance() -> Result<()> {
    let block = Primitive::block(100.0, 100.0, 100.0).to_solid("block")?;
    let gap = |x: f64| block.transformed(&Placement::translation(Vector3::new(x, 0.0, 0.0)));

    // 0..100, 110..210, 400..500
    let solid = Solid::fuse_all([block.clone(), gap(110.0)?, gap(400.0)?])?;

    assert_eq!(analyze(&solid, 5.0)?.component_count, 3);
    assert_eq!(analyze(&solid, 10.5)?.component_count, 2);
    assert_eq!(analyze(&solid, 200.0)?.component_count, 1);

    Ok(())
}

#[test]
fn test_empty_fuse_operand_rejected() -> Result<()> {
    let solid = Primitive::block(1.0, 1.0, 1.0).to_solid("block")?;
    assert!(Solid::fuse_all(Vec::<Solid>::new()).is_err());
    assert!(Solid::fuse_all([solid]).is_ok());
    Ok(())
}
