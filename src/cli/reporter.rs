// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::report::StructureReport;
use colored::*;
use std::io::{self, Write};

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a built structure
    pub fn report_structure(report: &StructureReport) {
        let params = &report.parameters;
        let figures = &report.figures;
        let summary = &report.summary;
        let stats = &report.stats;

        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {}° rafters, {} purlins",
            "Portal frame:".bold(),
            params.rafter_angle.to_string().cyan(),
            params.num_prisms.to_string().cyan()
        );
        println!("{}", "━".repeat(80).bright_black());

        if report.is_connected() {
            println!(
                "{} {}",
                "✅".green(),
                "Single connected solid".green().bold()
            );
        } else {
            println!(
                "{} {}",
                "⚠️ ".yellow(),
                format!(
                    "{} separate pieces at {} mm joint tolerance",
                    stats.component_count, stats.joint_tolerance
                )
                .yellow()
                .bold()
            );
        }

        println!("\n{}", "Layout:".bold());
        Self::print_value("Column spacing", &format!("{:.3} mm", figures.column_spacing_x));
        Self::print_value(
            "Row separation",
            &format!("{:.3} mm", figures.column_row_separation),
        );
        Self::print_value("Ridge height", &format!("{:.3} mm", figures.ridge_height));
        Self::print_value("Purlin spacing", &format!("{:.3} mm", figures.purlin_spacing));
        Self::print_value("Bay span", &format!("{:.3} mm", figures.bay_span));

        println!("\n{}", "Members:".bold());
        Self::print_value("Columns", &summary.columns.to_string());
        Self::print_value("Foundations", &summary.foundations.to_string());
        Self::print_value("Rafters", &summary.rafters.to_string());
        Self::print_value(
            "Purlins",
            &format!(
                "{} ({} left, {} right)",
                summary.purlins(),
                summary.left_purlins,
                summary.right_purlins
            ),
        );

        println!("\n{}", "Geometry:".bold());
        let [sx, sy, sz] = stats.size();
        Self::print_value("Extent", &format!("{sx:.1} × {sy:.1} × {sz:.1} mm"));
        Self::print_value("Volume", &format!("{:.4e} mm³", stats.volume));
        Self::print_value("Surface area", &format!("{:.4e} mm²", stats.surface_area));
        Self::print_value(
            "Mesh",
            &format!(
                "{} vertices, {} triangles",
                stats.vertex_count, stats.triangle_count
            ),
        );

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            format!("{:.2}ms", report.elapsed_ms).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Pretty JSON followed by a newline. Nothing else goes to `out`.
    pub fn write_json<W: Write>(report: &StructureReport, mut out: W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut out, report)?;
        writeln!(out)?;
        out.flush()
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_value(name: &str, value: &str) {
        println!(
            "  {} {}",
            format!("{:<16}", format!("{name}:")).bright_black(),
            value.cyan()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::{ANGLE_PROMPT, PURLIN_PROMPT};
    use crate::cli::Prompter;
    use crate::frame::{FrameParameters, LayoutConfig};
    use std::io::Cursor;

    #[test]
    fn test_prompts_stay_out_of_json_stream() {
        let mut prompts = Vec::new();
        let mut json = Vec::new();

        let mut prompter = Prompter::new(Cursor::new("20\n2\n"), &mut prompts);
        let angle = prompter.ask_angle().unwrap();
        let purlins = prompter.ask_purlin_count().unwrap();

        let config = LayoutConfig {
            bay_count: 2,
            ..LayoutConfig::default()
        };
        let params = FrameParameters::reference(angle, purlins);
        let (_, report) = StructureReport::generate(&params, &config).unwrap();
        Reporter::write_json(&report, &mut json).unwrap();

        let shown = String::from_utf8(prompts).unwrap();
        assert!(shown.contains(ANGLE_PROMPT));
        assert!(shown.contains(PURLIN_PROMPT));

        let text = String::from_utf8(json).unwrap();
        assert!(text.starts_with('{'));
        assert!(text.ends_with("}\n"));
        assert!(!text.contains(ANGLE_PROMPT));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["parameters"]["num_prisms"], 2);
    }
}
