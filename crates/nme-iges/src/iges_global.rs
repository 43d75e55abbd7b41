//! Global section: delimiters and file-wide metadata.

use nme_core::Result;

use crate::iges_params::{tokenize, Param};

/// Global section fields used by the editor.
///
/// Unlisted fields are read past and written back with defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSection {
    pub parameter_delimiter: char,
    pub record_delimiter: char,
    pub product_id: String,
    pub file_name: String,
    pub system_id: String,
    pub preprocessor_version: String,
    pub model_space_scale: f64,
    /// 1 = inches, 2 = millimetres, ... (IGES unit flag)
    pub units_flag: i64,
    pub units_name: String,
    pub date: String,
    pub min_resolution: f64,
    pub max_coordinate: f64,
    pub author: String,
    pub organization: String,
    pub iges_version: i64,
}

impl Default for GlobalSection {
    fn default() -> Self {
        Self {
            parameter_delimiter: ',',
            record_delimiter: ';',
            product_id: String::new(),
            file_name: String::new(),
            system_id: "nme".into(),
            preprocessor_version: env!("CARGO_PKG_VERSION").into(),
            model_space_scale: 1.0,
            units_flag: 2,
            units_name: "MM".into(),
            date: String::new(),
            min_resolution: 1e-6,
            max_coordinate: 0.0,
            author: String::new(),
            organization: String::new(),
            iges_version: 11,
        }
    }
}

/// `1H<c>` at `pos`: the character declared by a one-character Hollerith string.
fn hollerith_char(chars: &[char], pos: usize) -> Option<char> {
    match (chars.get(pos), chars.get(pos + 1), chars.get(pos + 2)) {
        (Some('1'), Some('H' | 'h'), Some(c)) => Some(*c),
        _ => None,
    }
}

/// Read the two delimiters declared at the start of the global text.
///
/// Either field may be omitted (empty), in which case `,` and `;` apply.
fn detect_delimiters(text: &str) -> (char, char) {
    let chars: Vec<char> = text.trim_start().chars().collect();

    let (param_delim, mut pos) = match hollerith_char(&chars, 0) {
        Some(c) => (c, 3),
        None => (',', 0),
    };
    if chars.get(pos) == Some(&param_delim) {
        pos += 1;
    }
    let record_delim = hollerith_char(&chars, pos).unwrap_or(';');
    (param_delim, record_delim)
}

impl GlobalSection {
    /// Parse the concatenated data columns of all G records.
    pub fn parse(text: &str) -> Result<Self> {
        let (param_delim, record_delim) = detect_delimiters(text);
        let params = tokenize(text.trim_start(), param_delim, record_delim)?;
        let defaults = Self::default();

        let string = |i: usize, fallback: &str| {
            params
                .get(i)
                .and_then(Param::as_str)
                .unwrap_or(fallback)
                .to_string()
        };
        let real = |i: usize, fallback: f64| match params.get(i) {
            Some(Param::Default) | None => fallback,
            Some(p) => p.as_real().unwrap_or(fallback),
        };
        let int = |i: usize, fallback: i64| match params.get(i) {
            Some(Param::Default) | None => fallback,
            Some(p) => p.as_int().unwrap_or(fallback),
        };

        Ok(Self {
            parameter_delimiter: param_delim,
            record_delimiter: record_delim,
            product_id: string(2, ""),
            file_name: string(3, ""),
            system_id: string(4, ""),
            preprocessor_version: string(5, ""),
            model_space_scale: real(12, defaults.model_space_scale),
            units_flag: int(13, defaults.units_flag),
            units_name: string(14, &defaults.units_name),
            date: string(17, ""),
            min_resolution: real(18, defaults.min_resolution),
            max_coordinate: real(19, defaults.max_coordinate),
            author: string(20, ""),
            organization: string(21, ""),
            iges_version: int(22, defaults.iges_version),
        })
    }

    /// All global parameters in file order.
    pub fn to_params(&self) -> Vec<Param> {
        let s = |v: &str| Param::String(v.to_string());
        vec![
            s(&self.parameter_delimiter.to_string()),
            s(&self.record_delimiter.to_string()),
            s(&self.product_id),
            s(&self.file_name),
            s(&self.system_id),
            s(&self.preprocessor_version),
            Param::Integer(32),
            Param::Integer(38),
            Param::Integer(6),
            Param::Integer(308),
            Param::Integer(15),
            s(&self.product_id),
            Param::Real(self.model_space_scale),
            Param::Integer(self.units_flag),
            s(&self.units_name),
            Param::Integer(1),
            Param::Real(1.0),
            s(&self.date),
            Param::Real(self.min_resolution),
            Param::Real(self.max_coordinate),
            s(&self.author),
            s(&self.organization),
            Param::Integer(self.iges_version),
            Param::Integer(0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiters() {
        assert_eq!(detect_delimiters("1H,,1H;,4Hpart;"), (',', ';'));
        assert_eq!(detect_delimiters("1H|,1H/|4Hpart/"), ('|', '/'));
        assert_eq!(detect_delimiters(",,4Hpart;"), (',', ';'));
        assert_eq!(detect_delimiters("1H,,,4Hpart;"), (',', ';'));
    }

    #[test]
    fn test_parse_fields() {
        let text = "1H,,1H;,7HBracket,11Hbracket.igs,3Hcad,3H1.0,32,38,6,308,15,\
                    7HBracket,2.0,2,2HMM,1,1.0,15H20240101.120000,0.001,500.0,\
                    5HAlice,4HACME,11,0;";
        let global = GlobalSection::parse(text).unwrap();
        assert_eq!(global.product_id, "Bracket");
        assert_eq!(global.file_name, "bracket.igs");
        assert_eq!(global.system_id, "cad");
        assert_eq!(global.model_space_scale, 2.0);
        assert_eq!(global.units_flag, 2);
        assert_eq!(global.units_name, "MM");
        assert_eq!(global.date, "20240101.120000");
        assert_eq!(global.min_resolution, 0.001);
        assert_eq!(global.max_coordinate, 500.0);
        assert_eq!(global.author, "Alice");
        assert_eq!(global.organization, "ACME");
        assert_eq!(global.iges_version, 11);
    }

    #[test]
    fn test_sparse_global_uses_defaults() {
        let global = GlobalSection::parse(",,4Hpart;").unwrap();
        assert_eq!(global.parameter_delimiter, ',');
        assert_eq!(global.product_id, "part");
        assert_eq!(global.model_space_scale, 1.0);
        assert_eq!(global.units_name, "MM");
    }

    #[test]
    fn test_params_round_trip() {
        let global = GlobalSection {
            product_id: "map".into(),
            author: "editor".into(),
            model_space_scale: 0.5,
            ..GlobalSection::default()
        };
        let text: Vec<String> = global.to_params().iter().map(Param::to_text).collect();
        let text = format!("{};", text.join(","));
        assert_eq!(GlobalSection::parse(&text).unwrap(), global);
    }
}
