//! Free-format parameter tokenizer for the Global and Parameter Data sections.
//!
//! Parameters are separated by the parameter delimiter and the list ends at the
//! record delimiter. Strings are Hollerith constants (`5HHello`); an empty
//! field is a defaulted parameter.

use nme_core::{NmeError, Result};

// ---------------------------------------------------------------------------
// Parameter values
// ---------------------------------------------------------------------------

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Integer(i64),
    Real(f64),
    /// Hollerith string, without the `nH` prefix.
    String(String),
    /// Empty field; the entity's default applies.
    Default,
}

impl Param {
    /// Integers are accepted where reals are expected; defaults read as 0.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Param::Real(v) => Some(*v),
            Param::Integer(v) => Some(*v as f64),
            Param::Default => Some(0.0),
            Param::String(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Param::Integer(v) => Some(*v),
            Param::Default => Some(0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Param::String(s) => Some(s),
            _ => None,
        }
    }

    /// Free-format text of this value.
    pub fn to_text(&self) -> String {
        match self {
            Param::Integer(v) => v.to_string(),
            Param::Real(v) => format_real(*v),
            Param::String(s) => format!("{}H{s}", s.len()),
            Param::Default => String::new(),
        }
    }
}

/// Shortest round-trip decimal with an explicit point and an upper-case exponent.
pub fn format_real(v: f64) -> String {
    format!("{v:?}").replace('e', "E")
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Tokenize free-format parameter text.
///
/// Stops at the record delimiter; text after it is ignored.
pub fn tokenize(input: &str, param_delim: char, record_delim: char) -> Result<Vec<Param>> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut pos = 0;
    let mut params = Vec::new();

    loop {
        while pos < len && chars[pos] == ' ' {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        // Hollerith string: <digits>H<chars>
        let start = pos;
        while pos < len && chars[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos > start && pos < len && (chars[pos] == 'H' || chars[pos] == 'h') {
            let count: usize = chars[start..pos]
                .iter()
                .collect::<String>()
                .parse()
                .map_err(|e| NmeError::Parse(format!("invalid Hollerith length: {e}")))?;
            pos += 1;
            if pos + count > len {
                return Err(NmeError::Parse(format!(
                    "Hollerith string of {count} characters runs past the end of the data"
                )));
            }
            params.push(Param::String(chars[pos..pos + count].iter().collect()));
            pos += count;
            while pos < len && chars[pos] == ' ' {
                pos += 1;
            }
        } else {
            pos = start;
            while pos < len && chars[pos] != param_delim && chars[pos] != record_delim {
                pos += 1;
            }
            let text: String = chars[start..pos].iter().collect();
            params.push(parse_value(text.trim())?);
        }

        if pos >= len {
            break;
        }
        let delim = chars[pos];
        pos += 1;
        if delim == record_delim {
            break;
        }
        if delim != param_delim {
            return Err(NmeError::Parse(format!(
                "expected delimiter after parameter {}, found '{delim}'",
                params.len()
            )));
        }
        // A trailing parameter delimiter before the record delimiter leaves a defaulted field.
        if pos >= len {
            params.push(Param::Default);
        }
    }

    Ok(params)
}

fn parse_value(text: &str) -> Result<Param> {
    if text.is_empty() {
        return Ok(Param::Default);
    }
    let is_integer = text
        .strip_prefix(&['+', '-'][..])
        .unwrap_or(text)
        .chars()
        .all(|c| c.is_ascii_digit());
    if is_integer {
        return text
            .parse()
            .map(Param::Integer)
            .map_err(|e| NmeError::Parse(format!("invalid integer '{text}': {e}")));
    }
    text.replace(&['D', 'd'][..], "E")
        .parse()
        .map(Param::Real)
        .map_err(|e| NmeError::Parse(format!("invalid real '{text}': {e}")))
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Sequential reader over a parameter list.
pub struct ParamCursor<'a> {
    params: &'a [Param],
    pos: usize,
}

impl<'a> ParamCursor<'a> {
    pub fn new(params: &'a [Param]) -> Self {
        Self { params, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.params.len() - self.pos
    }

    fn advance(&mut self, what: &str) -> Result<&'a Param> {
        let param = self.params.get(self.pos).ok_or_else(|| {
            NmeError::Parse(format!("unexpected end of parameters reading {what}"))
        })?;
        self.pos += 1;
        Ok(param)
    }

    pub fn next_int(&mut self, what: &str) -> Result<i64> {
        let param = self.advance(what)?;
        param
            .as_int()
            .ok_or_else(|| NmeError::Parse(format!("expected integer for {what}, got {param:?}")))
    }

    pub fn next_real(&mut self, what: &str) -> Result<f64> {
        let param = self.advance(what)?;
        param
            .as_real()
            .ok_or_else(|| NmeError::Parse(format!("expected real for {what}, got {param:?}")))
    }

    /// Non-negative count, checked against the parameters left.
    pub fn next_count(&mut self, what: &str) -> Result<usize> {
        let value = self.next_int(what)?;
        let count = usize::try_from(value)
            .map_err(|_| NmeError::Parse(format!("{what} must be non-negative, got {value}")))?;
        if count > self.remaining() {
            return Err(NmeError::Parse(format!(
                "{what} = {count} exceeds the {} parameters left",
                self.remaining()
            )));
        }
        Ok(count)
    }

    pub fn next_reals(&mut self, count: usize, what: &str) -> Result<Vec<f64>> {
        if count > self.remaining() {
            return Err(NmeError::Parse(format!(
                "{what}: need {count} values, only {} left",
                self.remaining()
            )));
        }
        (0..count).map(|_| self.next_real(what)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_numbers() {
        let params = tokenize("126, 1,-2,0.5,1.0D0,2.5E-3,+7;", ',', ';').unwrap();
        assert_eq!(
            params,
            vec![
                Param::Integer(126),
                Param::Integer(1),
                Param::Integer(-2),
                Param::Real(0.5),
                Param::Real(1.0),
                Param::Real(2.5e-3),
                Param::Integer(7),
            ]
        );
    }

    #[test]
    fn test_tokenize_hollerith() {
        let params = tokenize("1H,,1H;,9Hpart,name,3.;", ',', ';').unwrap();
        assert_eq!(params[0], Param::String(",".into()));
        assert_eq!(params[1], Param::String(";".into()));
        assert_eq!(params[2], Param::String("part,name".into()));
        assert_eq!(params[3], Param::Real(3.0));
    }

    #[test]
    fn test_tokenize_defaults() {
        let params = tokenize(",,5,;", ',', ';').unwrap();
        assert_eq!(
            params,
            vec![Param::Default, Param::Default, Param::Integer(5), Param::Default]
        );
    }

    #[test]
    fn test_custom_delimiters() {
        let params = tokenize("1|2.5|3HA|B/ignored", '|', '/').unwrap();
        assert_eq!(
            params,
            vec![Param::Integer(1), Param::Real(2.5), Param::String("A|B".into())]
        );
    }

    #[test]
    fn test_tokenize_errors() {
        assert!(tokenize("5Habc", ',', ';').is_err());
        assert!(tokenize("1.2.3;", ',', ';').is_err());
        assert!(tokenize("2HAB 7;", ',', ';').is_err());
    }

    #[test]
    fn test_round_trip_text() {
        for value in [1.0, -0.5, 1e-7, 12345.678, std::f64::consts::FRAC_1_SQRT_2] {
            let text = Param::Real(value).to_text();
            assert_eq!(tokenize(&text, ',', ';').unwrap(), vec![Param::Real(value)]);
        }
        assert_eq!(Param::String("abc".into()).to_text(), "3Habc");
    }

    #[test]
    fn test_cursor() {
        let params = tokenize("2,1.5,3,4;", ',', ';').unwrap();
        let mut cursor = ParamCursor::new(&params);
        assert_eq!(cursor.next_count("K").unwrap(), 2);
        assert_eq!(cursor.next_real("x").unwrap(), 1.5);
        assert_eq!(cursor.next_reals(2, "pair").unwrap(), vec![3.0, 4.0]);
        assert!(cursor.next_int("past end").is_err());

        let params = vec![Param::Integer(-1)];
        assert!(ParamCursor::new(&params).next_count("K").is_err());
        let params = vec![Param::Integer(1)];
        assert!(ParamCursor::new(&params).next_reals(5, "knots").is_err());
        let params = vec![Param::Integer(1_000_000), Param::Integer(0)];
        assert!(ParamCursor::new(&params).next_count("K").is_err());
    }
}
