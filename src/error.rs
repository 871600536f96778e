use thiserror::Error;

/// Errors that end a whole run. Per-file problems never surface here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("No matching files found!")]
    NoMatchingFiles,
    #[error("Program interrupted!")]
    Interrupted,
}

impl RunError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::NoMatchingFiles => 1,
            RunError::Interrupted => 130,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunError::NoMatchingFiles.exit_code(), 1);
        assert_eq!(RunError::Interrupted.exit_code(), 130);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RunError::NoMatchingFiles.to_string(),
            "No matching files found!"
        );
    }
}
