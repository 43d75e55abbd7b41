use thiserror::Error;

#[derive(Debug, Error)]
pub enum NmeError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, NmeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = NmeError::Validation("degree must be >= 1".into());
        assert_eq!(err.to_string(), "Validation failed: degree must be >= 1");

        let err = NmeError::Parse("bad record".into());
        assert_eq!(err.to_string(), "Parse error: bad record");
    }

    #[test]
    fn test_io_conversion() {
        fn open_missing() -> Result<()> {
            std::fs::File::open("/definitely/not/a/real/path.igs")?;
            Ok(())
        }
        assert!(matches!(open_missing(), Err(NmeError::Io(_))));
    }
}
