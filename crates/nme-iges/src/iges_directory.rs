//! Directory Entry section: two 80-column records per entity, ten 8-column fields each.

use nme_core::{NmeError, Result};

use crate::iges_record::{format_record, IgesRecord, IgesSection};

const FIELD_WIDTH: usize = 8;

/// One entity's directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub entity_type: i32,
    /// Sequence number of the entity's first P record.
    pub parameter_pointer: u32,
    pub structure: i32,
    pub line_font: i32,
    pub level: i32,
    pub view: i32,
    pub transform: i32,
    pub label_display: i32,
    /// Eight status digits (blank, subordinate, use, hierarchy).
    pub status: String,
    /// Sequence number of the first D record; entities reference each other by it.
    pub sequence: u32,
    pub line_weight: i32,
    pub color: i32,
    pub parameter_line_count: u32,
    pub form: i32,
    pub label: String,
    pub subscript: i32,
}

impl DirectoryEntry {
    /// A fresh entry for an exported entity.
    pub fn new(entity_type: i32, parameter_pointer: u32, parameter_line_count: u32, sequence: u32) -> Self {
        Self {
            entity_type,
            parameter_pointer,
            structure: 0,
            line_font: 0,
            level: 0,
            view: 0,
            transform: 0,
            label_display: 0,
            status: "00000000".into(),
            sequence,
            line_weight: 0,
            color: 0,
            parameter_line_count,
            form: 0,
            label: String::new(),
            subscript: 0,
        }
    }

    /// Decode from the two D records of one entity.
    pub fn parse(first: &IgesRecord, second: &IgesRecord) -> Result<Self> {
        let field = |record: &IgesRecord, index: usize| -> String {
            record.data[index * FIELD_WIDTH..(index + 1) * FIELD_WIDTH]
                .trim()
                .to_string()
        };
        let int = |record: &IgesRecord, index: usize, name: &str| -> Result<i32> {
            let text = field(record, index);
            if text.is_empty() {
                return Ok(0);
            }
            text.parse().map_err(|_| {
                NmeError::Parse(format!(
                    "directory entry D{}: bad {name} field '{text}'",
                    first.sequence
                ))
            })
        };
        let unsigned = |record: &IgesRecord, index: usize, name: &str| -> Result<u32> {
            let value = int(record, index, name)?;
            u32::try_from(value).map_err(|_| {
                NmeError::Parse(format!(
                    "directory entry D{}: negative {name} {value}",
                    first.sequence
                ))
            })
        };

        let entry = Self {
            entity_type: int(first, 0, "entity type")?,
            parameter_pointer: unsigned(first, 1, "parameter pointer")?,
            structure: int(first, 2, "structure")?,
            line_font: int(first, 3, "line font")?,
            level: int(first, 4, "level")?,
            view: int(first, 5, "view")?,
            transform: int(first, 6, "transform")?,
            label_display: int(first, 7, "label display")?,
            status: field(first, 8),
            sequence: first.sequence,
            line_weight: int(second, 1, "line weight")?,
            color: int(second, 2, "color")?,
            parameter_line_count: unsigned(second, 3, "parameter line count")?,
            form: int(second, 4, "form")?,
            label: field(second, 7),
            subscript: int(second, 8, "subscript")?,
        };

        let repeated = int(second, 0, "entity type")?;
        if repeated != entry.entity_type {
            return Err(NmeError::Parse(format!(
                "directory entry D{}: entity type {} on first line but {repeated} on second",
                first.sequence, entry.entity_type
            )));
        }
        Ok(entry)
    }

    /// Both D records, numbered `sequence` and `sequence + 1`.
    pub fn to_records(&self) -> [String; 2] {
        let first = format!(
            "{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}",
            self.entity_type,
            self.parameter_pointer,
            self.structure,
            self.line_font,
            self.level,
            self.view,
            self.transform,
            self.label_display,
            self.status,
        );
        let second = format!(
            "{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}",
            self.entity_type,
            self.line_weight,
            self.color,
            self.parameter_line_count,
            self.form,
            "",
            "",
            self.label,
            self.subscript,
        );
        [
            format_record(IgesSection::Directory, &first, self.sequence),
            format_record(IgesSection::Directory, &second, self.sequence + 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iges_record::split_records;

    #[test]
    fn test_round_trip() {
        let mut entry = DirectoryEntry::new(128, 5, 12, 3);
        entry.color = 4;
        entry.label = "FACE".into();
        let [a, b] = entry.to_records();
        assert_eq!(a.len(), 80);
        let records = split_records(&format!("{a}\n{b}\n")).unwrap();
        assert_eq!(DirectoryEntry::parse(&records[0], &records[1]).unwrap(), entry);
    }

    #[test]
    fn test_blank_fields_default_to_zero() {
        let first = format!("{:>8}{:>8}{:48}{:>8}", 126, 1, "", "00000000");
        let second = format!("{:>8}{:16}{:>8}", 126, "", 3);
        let text = format!(
            "{}\n{}\n",
            format_record(IgesSection::Directory, &first, 1),
            format_record(IgesSection::Directory, &second, 2)
        );
        let records = split_records(&text).unwrap();
        let entry = DirectoryEntry::parse(&records[0], &records[1]).unwrap();
        assert_eq!(entry.entity_type, 126);
        assert_eq!(entry.parameter_pointer, 1);
        assert_eq!(entry.level, 0);
        assert_eq!(entry.parameter_line_count, 3);
        assert_eq!(entry.status, "00000000");
        assert_eq!(entry.label, "");
    }

    #[test]
    fn test_mismatched_type_rejected() {
        let [a, _] = DirectoryEntry::new(126, 1, 1, 1).to_records();
        let [_, b] = DirectoryEntry::new(128, 1, 1, 1).to_records();
        let records = split_records(&format!("{a}\n{b}\n")).unwrap();
        assert!(DirectoryEntry::parse(&records[0], &records[1]).is_err());
    }
}
