// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Portal frame generation: parameters, placement layout and the builder

mod builder;
mod layout;
mod members;
mod params;

pub use builder::{FrameBuilder, Phase};
pub use layout::{FrameLayout, LayoutConfig};
pub use members::{FrameSummary, Member, MemberKind, Side};
pub use params::{Dimensions, FrameParameters};
