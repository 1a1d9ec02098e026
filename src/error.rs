// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types

use thiserror::Error;

/// Top-level error type for structure generation.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Rejected structural or layout parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{parameter} = {value} must be a positive, finite length")]
    NotPositive { parameter: &'static str, value: f64 },

    #[error("parameter {parameter} = {value} is out of range ({min}, {max})")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("at least 2 purlins per rafter are required, got {0}")]
    TooFewPurlins(usize),

    #[error("invalid I-section: {0}")]
    InvalidSection(String),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Failures raised by the mesh kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("{0} produced non-finite coordinates")]
    NonFinite(&'static str),

    #[error("cannot fuse an empty solid")]
    EmptyOperand,

    #[error("proximity query failed: {0}")]
    Query(String),
}

/// Interactive input failures.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not parse {field} from {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("input closed before {field} was entered")]
    Closed { field: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results using [`FrameError`].
pub type Result<T> = std::result::Result<T, FrameError>;
