// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Frame builder: places member templates and fuses them into one solid

use super::{FrameLayout, FrameParameters, LayoutConfig, Member, MemberKind, Side};
use crate::error::{FrameError, GeometryError};
use crate::geometry::{Axis, ISection, Placement, Primitive, Solid};
use nalgebra::Point3;
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, debug_span, info};

/// Build phases, in fuse order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Columns,
    Foundations,
    Rafters,
    LeftPurlins,
    RightPurlins,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Columns,
        Phase::Foundations,
        Phase::Rafters,
        Phase::LeftPurlins,
        Phase::RightPurlins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Columns => "columns",
            Phase::Foundations => "foundations",
            Phase::Rafters => "rafters",
            Phase::LeftPurlins => "left_purlins",
            Phase::RightPurlins => "right_purlins",
        }
    }
}

/// Unplaced member solids, one per member family
struct Templates {
    column: Solid,
    foundation: Solid,
    rafter: Solid,
    purlin: Solid,
}

impl Templates {
    fn new(layout: &FrameLayout) -> Result<Self, GeometryError> {
        let dims = &layout.params().dimensions;
        let section = |length| {
            Primitive::i_section(ISection::new(
                length,
                dims.column_thickness,
                dims.column_thickness,
                dims.flange_thickness,
                dims.web_thickness,
            ))
        };

        // Extruded along +X, stood up on Z
        let column = section(dims.column_height)
            .to_solid("column")?
            .transformed(&Placement::rotation(
                &Axis::y_through(Point3::origin()),
                -FRAC_PI_2,
            ))?;

        let [fx, fy, fz] = layout.config().foundation_size;
        Ok(Self {
            column,
            foundation: Primitive::block(fx, fy, fz).to_solid("foundation")?,
            rafter: section(dims.rafter_length).to_solid("rafter")?,
            purlin: Primitive::rectangular_prism(
                dims.roof_length,
                dims.roof_width,
                dims.roof_height,
            )
            .to_solid("purlin")?,
        })
    }

    fn place(&self, member: &Member) -> Result<Solid, GeometryError> {
        let template = match member.kind {
            MemberKind::Column(_) => &self.column,
            MemberKind::Foundation(_) => &self.foundation,
            MemberKind::Rafter(_) => &self.rafter,
            MemberKind::Purlin(_) => &self.purlin,
        };
        Ok(template
            .transformed(&member.placement)?
            .labeled(member.kind.as_str()))
    }
}

/// Portal frame generator
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    layout: FrameLayout,
}

impl FrameBuilder {
    /// Validates both parameter sets up front
    pub fn new(params: &FrameParameters, config: &LayoutConfig) -> Result<Self, FrameError> {
        Ok(Self {
            layout: FrameLayout::new(params, config)?,
        })
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Placed members of one phase
    pub fn phase_members(&self, phase: Phase) -> Vec<Member> {
        let layout = &self.layout;
        let bays = 0..layout.bay_count();
        let pair = |kinds: [MemberKind; 2], placements: [Placement; 2]| {
            kinds
                .into_iter()
                .zip(placements)
                .map(|(kind, placement)| Member::new(kind, placement))
        };

        match phase {
            Phase::Columns => bays
                .flat_map(|bay| {
                    pair(
                        [MemberKind::Column(Side::Left), MemberKind::Column(Side::Right)],
                        layout.column_placements(bay),
                    )
                })
                .collect(),
            Phase::Foundations => bays
                .flat_map(|bay| {
                    pair(
                        [
                            MemberKind::Foundation(Side::Left),
                            MemberKind::Foundation(Side::Right),
                        ],
                        layout.foundation_placements(bay),
                    )
                })
                .collect(),
            Phase::Rafters => bays
                .flat_map(|bay| {
                    pair(
                        [MemberKind::Rafter(Side::Left), MemberKind::Rafter(Side::Right)],
                        layout.rafter_placements(bay),
                    )
                })
                .collect(),
            Phase::LeftPurlins => layout
                .left_purlin_positions()
                .iter()
                .map(|origin| {
                    Member::new(
                        MemberKind::Purlin(Side::Left),
                        FrameLayout::purlin_placement(origin),
                    )
                })
                .collect(),
            Phase::RightPurlins => layout
                .right_purlin_positions()
                .iter()
                .map(|origin| {
                    Member::new(
                        MemberKind::Purlin(Side::Right),
                        FrameLayout::purlin_placement(origin),
                    )
                })
                .collect(),
        }
    }

    /// Every placed member, in fuse order
    pub fn members(&self) -> Vec<Member> {
        Phase::ALL
            .iter()
            .flat_map(|&phase| self.phase_members(phase))
            .collect()
    }

    /// Generate the fused structure
    pub fn build(&self) -> Result<Solid, FrameError> {
        let params = self.layout.params();
        let templates = Templates::new(&self.layout)?;

        if params.prism_spacing.is_finite()
            && (params.prism_spacing - self.layout.purlin_spacing()).abs() > 1e-9
        {
            debug!(
                supplied = params.prism_spacing,
                used = self.layout.purlin_spacing(),
                "purlin spacing recomputed from rafter run"
            );
        }

        let mut structure: Option<Solid> = None;
        for phase in Phase::ALL {
            let _span = debug_span!("phase", name = phase.as_str()).entered();

            let members = self.phase_members(phase);
            let placed = members
                .iter()
                .map(|member| templates.place(member))
                .collect::<Result<Vec<_>, _>>()?;
            let part = Solid::fuse_all(placed)?;
            debug!(members = members.len(), "fused");

            structure = Some(match structure.take() {
                Some(acc) => acc.fuse(part)?,
                None => part,
            });
        }

        let structure = structure.ok_or(GeometryError::EmptyOperand)?;
        info!(
            angle = params.rafter_angle,
            purlins = params.num_prisms,
            bodies = structure.body_count(),
            triangles = structure.mesh().triangle_count(),
            "portal frame built"
        );
        Ok(structure)
    }
}
