//! IGES fixed-format records.
//!
//! Every line is an 80-column record: columns 1-72 hold data, column 73 the
//! section letter and columns 74-80 the right-justified sequence number.

use nme_core::{NmeError, Result};

pub const DATA_COLUMNS: usize = 72;
/// Parameter data occupies columns 1-64 of a P record; 65-72 hold the directory back-pointer.
pub const PARAM_COLUMNS: usize = 64;

/// The five sections of an ASCII IGES file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IgesSection {
    Start,
    Global,
    Directory,
    Parameter,
    Terminate,
}

impl IgesSection {
    pub fn letter(self) -> char {
        match self {
            IgesSection::Start => 'S',
            IgesSection::Global => 'G',
            IgesSection::Directory => 'D',
            IgesSection::Parameter => 'P',
            IgesSection::Terminate => 'T',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'S' => Some(IgesSection::Start),
            'G' => Some(IgesSection::Global),
            'D' => Some(IgesSection::Directory),
            'P' => Some(IgesSection::Parameter),
            'T' => Some(IgesSection::Terminate),
            _ => None,
        }
    }
}

/// One 80-column line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgesRecord {
    pub section: IgesSection,
    /// Columns 1-72, space padded.
    pub data: String,
    pub sequence: u32,
}

impl IgesRecord {
    /// Parameter text of a P record (columns 1-64).
    pub fn parameter_text(&self) -> &str {
        &self.data[..PARAM_COLUMNS]
    }

    /// Directory back-pointer of a P record (columns 65-72).
    pub fn back_pointer(&self) -> Option<u32> {
        self.data[PARAM_COLUMNS..].trim().parse().ok()
    }
}

/// Split IGES text into records, checking section order.
///
/// Blank lines are skipped; any other line shorter than 73 columns is an error.
pub fn split_records(input: &str) -> Result<Vec<IgesRecord>> {
    let mut records = Vec::new();
    let mut last_section = IgesSection::Start;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        if !line.is_ascii() {
            return Err(NmeError::Parse(format!("line {line_no}: non-ASCII record")));
        }
        if line.len() <= DATA_COLUMNS {
            return Err(NmeError::Parse(format!(
                "line {line_no}: record has {} columns, need at least 73",
                line.len()
            )));
        }

        let letter = line.as_bytes()[DATA_COLUMNS] as char;
        let section = IgesSection::from_letter(letter).ok_or_else(|| {
            NmeError::Parse(format!("line {line_no}: unknown section letter '{letter}'"))
        })?;
        if section < last_section {
            return Err(NmeError::Parse(format!(
                "line {line_no}: section {} after section {}",
                section.letter(),
                last_section.letter()
            )));
        }
        last_section = section;

        let seq_text = line[DATA_COLUMNS + 1..].trim();
        let sequence = seq_text.parse().map_err(|_| {
            NmeError::Parse(format!("line {line_no}: bad sequence number '{seq_text}'"))
        })?;

        records.push(IgesRecord {
            section,
            data: line[..DATA_COLUMNS].to_string(),
            sequence,
        });
    }

    Ok(records)
}

/// Format one 80-column record. `data` longer than 72 characters is truncated.
pub fn format_record(section: IgesSection, data: &str, sequence: u32) -> String {
    let data = match data.char_indices().nth(DATA_COLUMNS) {
        Some((end, _)) => &data[..end],
        None => data,
    };
    format!("{data:<72}{}{sequence:>7}", section.letter())
}
