// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem: prompts and terminal reports

pub mod prompt;
pub mod reporter;

pub use prompt::Prompter;
pub use reporter::Reporter;
