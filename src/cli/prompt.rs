// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interactive parameter prompts

use crate::error::InputError;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const ANGLE_PROMPT: &str = "Enter the angle of inclination:";
pub const PURLIN_PROMPT: &str = "Enter the number of prisms:";

/// Line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Rafter angle in degrees. Range checks happen at build time.
    pub fn ask_angle(&mut self) -> Result<f64, InputError> {
        self.ask(ANGLE_PROMPT, "rafter angle")
    }

    pub fn ask_purlin_count(&mut self) -> Result<usize, InputError> {
        self.ask(PURLIN_PROMPT, "number of prisms")
    }

    fn ask<T: FromStr>(&mut self, prompt: &str, field: &'static str) -> Result<T, InputError> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed { field });
        }

        let value = line.trim();
        value.parse().map_err(|_| InputError::Parse {
            field,
            value: value.to_string(),
        })
    }
}
