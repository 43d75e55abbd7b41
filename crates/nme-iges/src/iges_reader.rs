//! IGES file reader: record layer, Global section, directory and the
//! rational B-spline entities.

use std::collections::HashMap;
use std::path::Path;

use nme_core::{NmeError, Result};
use rayon::prelude::*;

use crate::iges_directory::DirectoryEntry;
use crate::iges_entities::{
    decode_curve, decode_surface, IgesCurveRecord, IgesSurfaceRecord, RATIONAL_BSPLINE_CURVE,
    RATIONAL_BSPLINE_SURFACE,
};
use crate::iges_global::GlobalSection;
use crate::iges_params::tokenize;
use crate::iges_record::{split_records, IgesRecord, IgesSection};

/// Entity count above which entities are decoded in parallel.
const PARALLEL_ENTITY_THRESHOLD: usize = 64;

/// Everything read from one IGES file.
#[derive(Debug, Clone, Default)]
pub struct IgesModel {
    /// Start section lines, trailing blanks removed.
    pub start: Vec<String>,
    pub global: GlobalSection,
    pub directory: Vec<DirectoryEntry>,
    pub curves: Vec<IgesCurveRecord>,
    pub surfaces: Vec<IgesSurfaceRecord>,
    /// Number of entities of unsupported types.
    pub skipped: usize,
}

enum Decoded {
    Curve(IgesCurveRecord),
    Surface(IgesSurfaceRecord),
    Skipped(i32),
}

#[derive(Default)]
struct Sections<'a> {
    start: Vec<&'a IgesRecord>,
    global: Vec<&'a IgesRecord>,
    directory: Vec<&'a IgesRecord>,
    parameter: Vec<&'a IgesRecord>,
    terminate: Vec<&'a IgesRecord>,
}

impl<'a> Sections<'a> {
    fn split(records: &'a [IgesRecord]) -> Self {
        let mut sections = Self::default();
        for record in records {
            let bucket = match record.section {
                IgesSection::Start => &mut sections.start,
                IgesSection::Global => &mut sections.global,
                IgesSection::Directory => &mut sections.directory,
                IgesSection::Parameter => &mut sections.parameter,
                IgesSection::Terminate => &mut sections.terminate,
            };
            bucket.push(record);
        }
        sections
    }

    /// Compare the Terminate record's counts with the records actually read.
    fn check_terminate(&self) {
        let Some(record) = self.terminate.first() else {
            log::warn!("IGES file has no Terminate record");
            return;
        };
        let expected = [
            ('S', self.start.len()),
            ('G', self.global.len()),
            ('D', self.directory.len()),
            ('P', self.parameter.len()),
        ];
        for (index, (letter, actual)) in expected.into_iter().enumerate() {
            let field = record.data.get(index * 8..(index + 1) * 8).unwrap_or("");
            let declared = field
                .strip_prefix(letter)
                .and_then(|count| count.trim().parse::<usize>().ok());
            match declared {
                Some(count) if count == actual => {}
                Some(count) => log::warn!(
                    "Terminate record declares {count} {letter} records, found {actual}"
                ),
                None => log::warn!("Terminate record has no {letter} count"),
            }
        }
    }
}

/// Parameter text of one entity: its P records concatenated, columns 1-64 only.
fn entity_parameter_text(
    entry: &DirectoryEntry,
    parameters: &HashMap<u32, &IgesRecord>,
) -> Result<String> {
    let first = entry.parameter_pointer;
    let count = entry.parameter_line_count.max(1);
    let mut text = String::with_capacity(count as usize * 64);

    for sequence in first..first.saturating_add(count) {
        let record = parameters.get(&sequence).ok_or_else(|| {
            NmeError::Parse(format!("P record {sequence} is missing"))
        })?;
        match record.back_pointer() {
            Some(owner) if owner == entry.sequence => {}
            Some(owner) => {
                return Err(NmeError::Parse(format!(
                    "P record {sequence} belongs to D{owner}"
                )))
            }
            None => {
                return Err(NmeError::Parse(format!(
                    "P record {sequence} has no directory pointer"
                )))
            }
        }
        text.push_str(record.parameter_text());
    }

    Ok(text)
}

fn decode_entity(
    entry: &DirectoryEntry,
    parameters: &HashMap<u32, &IgesRecord>,
    global: &GlobalSection,
) -> Result<Decoded> {
    let kind = entry.entity_type;
    if kind != RATIONAL_BSPLINE_CURVE && kind != RATIONAL_BSPLINE_SURFACE {
        log::debug!("skipping entity {kind} at D{}", entry.sequence);
        return Ok(Decoded::Skipped(kind));
    }

    let decoded = entity_parameter_text(entry, parameters)
        .and_then(|text| tokenize(&text, global.parameter_delimiter, global.record_delimiter))
        .and_then(|params| {
            if kind == RATIONAL_BSPLINE_CURVE {
                decode_curve(&params).map(Decoded::Curve)
            } else {
                decode_surface(&params).map(Decoded::Surface)
            }
        });

    decoded.map_err(|err| {
        let context = format!("entity {kind} at D{}", entry.sequence);
        match err {
            NmeError::Validation(msg) => NmeError::Validation(format!("{context}: {msg}")),
            NmeError::Parse(msg) => NmeError::Parse(format!("{context}: {msg}")),
            other => other,
        }
    })
}

/// Parse a complete IGES file.
pub fn parse_iges(input: &str) -> Result<IgesModel> {
    let records = split_records(input)?;
    let sections = Sections::split(&records);

    if sections.global.is_empty() {
        return Err(NmeError::Parse("IGES file has no Global section".into()));
    }
    if sections.directory.len() % 2 != 0 {
        return Err(NmeError::Parse(format!(
            "Directory section has {} records, expected an even count",
            sections.directory.len()
        )));
    }
    sections.check_terminate();

    let start = sections
        .start
        .iter()
        .map(|r| r.data.trim_end().to_string())
        .collect();

    let global_text: String = sections.global.iter().map(|r| r.data.as_str()).collect();
    let global = GlobalSection::parse(&global_text)?;
    log::debug!(
        "IGES global: product '{}', units {} ({})",
        global.product_id,
        global.units_name,
        global.units_flag
    );

    let directory = sections
        .directory
        .chunks_exact(2)
        .map(|pair| DirectoryEntry::parse(pair[0], pair[1]))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("IGES directory: {} entities", directory.len());

    let parameters: HashMap<u32, &IgesRecord> = sections
        .parameter
        .iter()
        .map(|r| (r.sequence, *r))
        .collect();

    let decoded: Vec<Decoded> = if directory.len() >= PARALLEL_ENTITY_THRESHOLD {
        directory
            .par_iter()
            .map(|entry| decode_entity(entry, &parameters, &global))
            .collect::<Result<_>>()?
    } else {
        directory
            .iter()
            .map(|entry| decode_entity(entry, &parameters, &global))
            .collect::<Result<_>>()?
    };

    let mut model = IgesModel {
        start,
        directory,
        ..IgesModel::default()
    };
    let mut skipped_types: Vec<i32> = Vec::new();
    for entity in decoded {
        match entity {
            Decoded::Curve(curve) => model.curves.push(curve),
            Decoded::Surface(surface) => model.surfaces.push(surface),
            Decoded::Skipped(kind) => {
                model.skipped += 1;
                if !skipped_types.contains(&kind) {
                    skipped_types.push(kind);
                }
            }
        }
    }
    model.global = global;

    if model.skipped > 0 {
        log::warn!(
            "skipped {} unsupported IGES entities (types {:?})",
            model.skipped,
            skipped_types
        );
    }
    log::debug!(
        "IGES import: {} curves, {} surfaces",
        model.curves.len(),
        model.surfaces.len()
    );

    Ok(model)
}

/// Read and parse an IGES file from disk.
pub fn load_iges(path: impl AsRef<Path>) -> Result<IgesModel> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_iges(&text)
}
