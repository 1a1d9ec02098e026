// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structural members and the per-kind tally of a built frame

use crate::geometry::{Placement, Solid};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// What a fused body is. Doubles as the body label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "side", rename_all = "lowercase")]
pub enum MemberKind {
    Column(Side),
    Foundation(Side),
    Rafter(Side),
    Purlin(Side),
}

impl MemberKind {
    pub const ALL: [MemberKind; 8] = [
        MemberKind::Column(Side::Left),
        MemberKind::Column(Side::Right),
        MemberKind::Foundation(Side::Left),
        MemberKind::Foundation(Side::Right),
        MemberKind::Rafter(Side::Left),
        MemberKind::Rafter(Side::Right),
        MemberKind::Purlin(Side::Left),
        MemberKind::Purlin(Side::Right),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Column(Side::Left) => "column.left",
            MemberKind::Column(Side::Right) => "column.right",
            MemberKind::Foundation(Side::Left) => "foundation.left",
            MemberKind::Foundation(Side::Right) => "foundation.right",
            MemberKind::Rafter(Side::Left) => "rafter.left",
            MemberKind::Rafter(Side::Right) => "rafter.right",
            MemberKind::Purlin(Side::Left) => "purlin.left",
            MemberKind::Purlin(Side::Right) => "purlin.right",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placed copy of a member template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Member {
    pub kind: MemberKind,
    pub placement: Placement,
}

impl Member {
    pub fn new(kind: MemberKind, placement: Placement) -> Self {
        Self { kind, placement }
    }
}

/// Member counts read back from a fused solid's body labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameSummary {
    pub columns: usize,
    pub foundations: usize,
    pub rafters: usize,
    pub left_purlins: usize,
    pub right_purlins: usize,
    /// Bodies carrying a label outside [`MemberKind`]
    pub other: usize,
}

impl FrameSummary {
    pub fn from_solid(solid: &Solid) -> Self {
        let mut summary = Self::default();
        for kind in MemberKind::ALL {
            let count = solid.count_label(kind.as_str());
            match kind {
                MemberKind::Column(_) => summary.columns += count,
                MemberKind::Foundation(_) => summary.foundations += count,
                MemberKind::Rafter(_) => summary.rafters += count,
                MemberKind::Purlin(Side::Left) => summary.left_purlins += count,
                MemberKind::Purlin(Side::Right) => summary.right_purlins += count,
            }
        }
        summary.other = solid.body_count() - summary.total();
        summary
    }

    pub fn purlins(&self) -> usize {
        self.left_purlins + self.right_purlins
    }

    pub fn total(&self) -> usize {
        self.columns + self.foundations + self.rafters + self.purlins() + self.other
    }
}
