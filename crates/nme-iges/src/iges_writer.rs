//! IGES writer for rational B-spline curves and surfaces.

use std::path::Path;

use nme_core::{NmeError, Result};
use nme_geometry::{NurbsCurve, NurbsSurface};

use crate::iges_directory::DirectoryEntry;
use crate::iges_entities::{encode_curve, encode_surface};
use crate::iges_global::GlobalSection;
use crate::iges_params::Param;
use crate::iges_record::{format_record, IgesSection, DATA_COLUMNS, PARAM_COLUMNS};

/// Content of an IGES file to be written.
#[derive(Debug, Clone, Default)]
pub struct IgesExport {
    /// Free text for the Start section; one record per line.
    pub description: String,
    pub global: GlobalSection,
    pub curves: Vec<NurbsCurve>,
    pub surfaces: Vec<NurbsSurface>,
}

/// Join parameters with the delimiters and break them into lines of at most
/// `width` columns. Tokens are kept whole unless a single token exceeds `width`.
fn wrap_params(params: &[Param], param_delim: char, record_delim: char, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for (index, param) in params.iter().enumerate() {
        let delim = if index + 1 == params.len() { record_delim } else { param_delim };
        let mut piece = param.to_text();
        piece.push(delim);

        if !current.is_empty() && current.len() + piece.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        while piece.len() > width {
            let cut = (1..=width).rev().find(|&i| piece.is_char_boundary(i)).unwrap_or(width);
            let rest = piece.split_off(cut);
            lines.push(std::mem::replace(&mut piece, rest));
        }
        current.push_str(&piece);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Records are 7-bit ASCII; any other text is rejected.
fn check_ascii(field: &str, text: &str) -> Result<()> {
    if text.is_ascii() {
        Ok(())
    } else {
        Err(NmeError::InvalidParameter(format!(
            "IGES {field} must be ASCII: '{text}'"
        )))
    }
}

fn check_export_text(export: &IgesExport) -> Result<()> {
    let global = &export.global;
    check_ascii("description", &export.description)?;
    check_ascii(
        "delimiters",
        &format!("{}{}", global.parameter_delimiter, global.record_delimiter),
    )?;
    for (field, text) in [
        ("product id", &global.product_id),
        ("file name", &global.file_name),
        ("system id", &global.system_id),
        ("preprocessor version", &global.preprocessor_version),
        ("units name", &global.units_name),
        ("date", &global.date),
        ("author", &global.author),
        ("organization", &global.organization),
    ] {
        check_ascii(field, text)?;
    }
    Ok(())
}

/// Render a complete IGES file.
pub fn write_iges(export: &IgesExport) -> Result<String> {
    check_export_text(export)?;
    let global = &export.global;
    let (pd, rd) = (global.parameter_delimiter, global.record_delimiter);
    let mut out: Vec<String> = Vec::new();

    let mut start: Vec<String> = export
        .description
        .lines()
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            chars
                .chunks(DATA_COLUMNS)
                .map(|chunk| chunk.iter().collect::<String>())
                .collect::<Vec<_>>()
        })
        .collect();
    if start.is_empty() {
        start.push(String::new());
    }
    let start_count = start.len();
    out.extend(
        start
            .iter()
            .enumerate()
            .map(|(i, line)| format_record(IgesSection::Start, line, i as u32 + 1)),
    );

    let global_lines = wrap_params(&global.to_params(), pd, rd, DATA_COLUMNS);
    out.extend(
        global_lines
            .iter()
            .enumerate()
            .map(|(i, line)| format_record(IgesSection::Global, line, i as u32 + 1)),
    );

    let entities: Vec<(i32, Vec<Param>)> = export
        .curves
        .iter()
        .map(|c| (crate::RATIONAL_BSPLINE_CURVE, encode_curve(c)))
        .chain(
            export
                .surfaces
                .iter()
                .map(|s| (crate::RATIONAL_BSPLINE_SURFACE, encode_surface(s))),
        )
        .collect();

    let mut directory = Vec::with_capacity(entities.len() * 2);
    let mut parameter = Vec::new();
    for (index, (entity_type, params)) in entities.iter().enumerate() {
        let de_sequence = 2 * index as u32 + 1;
        let first_line = parameter.len() as u32 + 1;
        let lines = wrap_params(params, pd, rd, PARAM_COLUMNS);

        for line in &lines {
            let sequence = parameter.len() as u32 + 1;
            parameter.push(format_record(
                IgesSection::Parameter,
                &format!("{line:<64}{de_sequence:>8}"),
                sequence,
            ));
        }

        let entry = DirectoryEntry::new(*entity_type, first_line, lines.len() as u32, de_sequence);
        directory.extend(entry.to_records());
    }

    let terminate = format!(
        "S{:>7}G{:>7}D{:>7}P{:>7}",
        start_count,
        global_lines.len(),
        directory.len(),
        parameter.len()
    );

    log::debug!(
        "IGES export: {} curves, {} surfaces, {} P records",
        export.curves.len(),
        export.surfaces.len(),
        parameter.len()
    );

    out.extend(directory);
    out.extend(parameter);
    out.push(format_record(IgesSection::Terminate, &terminate, 1));

    let mut text = out.join("\n");
    text.push('\n');
    Ok(text)
}

/// Write an IGES file to disk.
pub fn save_iges(path: impl AsRef<Path>, export: &IgesExport) -> Result<()> {
    std::fs::write(path.as_ref(), write_iges(export)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_iges;
    use nme_geometry::create_line_curve;
    use nme_math::dvec3;

    #[test]
    fn test_wrap_keeps_tokens_whole() {
        let params: Vec<Param> = (0..30).map(|i| Param::Real(i as f64 * 0.125)).collect();
        let lines = wrap_params(&params, ',', ';', 16);
        assert!(lines.iter().all(|l| l.len() <= 16));
        assert!(lines.last().unwrap().ends_with(';'));
        let joined = lines.concat();
        assert!(joined.starts_with("0.0,0.125,0.25,"));
        assert_eq!(joined.matches(',').count(), 29);
    }

    #[test]
    fn test_wrap_splits_oversized_token() {
        let params = vec![Param::String("x".repeat(20))];
        let lines = wrap_params(&params, ',', ';', 8);
        assert!(lines.iter().all(|l| l.len() <= 8));
        assert_eq!(lines.concat(), format!("20H{};", "x".repeat(20)));
    }

    #[test]
    fn test_wrap_splits_on_char_boundaries() {
        let text = "\u{20ac}".repeat(10);
        let lines = wrap_params(&[Param::String(text.clone())], ',', ';', 8);
        assert!(lines.iter().all(|l| l.len() <= 8));
        assert_eq!(lines.concat(), format!("30H{text};"));
    }

    #[test]
    fn test_every_record_is_80_columns() {
        let export = IgesExport {
            description: "one line".into(),
            curves: vec![create_line_curve(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 1.0, 1.0))],
            ..IgesExport::default()
        };
        let text = write_iges(&export).unwrap();
        assert!(text.lines().all(|l| l.len() == 80), "{text}");
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("S      1G"));
        assert!(last.contains("D      2P"));
        assert_eq!(&last[72..], "T      1");
    }

    #[test]
    fn test_written_file_reads_back() {
        let line = create_line_curve(dvec3(-1.0, 0.5, 2.0), dvec3(3.0, 0.25, -1e-7));
        let export = IgesExport {
            curves: vec![line.clone()],
            ..IgesExport::default()
        };
        let model = parse_iges(&write_iges(&export).unwrap()).unwrap();
        assert_eq!(model.curves.len(), 1);
        assert_eq!(model.curves[0].curve.control_points(), line.control_points());
        assert_eq!(model.curves[0].curve.knots(), line.knots());
        assert_eq!(model.global.system_id, "nme");
    }

    #[test]
    fn test_non_ascii_text_is_rejected() {
        let export = IgesExport {
            description: format!("a{}", "\u{20ac}".repeat(71)),
            ..IgesExport::default()
        };
        let err = write_iges(&export).unwrap_err();
        assert!(matches!(err, NmeError::InvalidParameter(_)), "{err}");

        let export = IgesExport {
            global: GlobalSection {
                author: "J\u{f6}rg".into(),
                ..GlobalSection::default()
            },
            ..IgesExport::default()
        };
        assert!(write_iges(&export).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rejected.igs");
        assert!(save_iges(&path, &export).is_err());
        assert!(!path.exists());
    }
}
