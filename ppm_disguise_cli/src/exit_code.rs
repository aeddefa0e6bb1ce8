use std::process::ExitCode;

use ppm_disguise::ErrorClass;

use crate::CliError;

// Maps a CLI error into the process exit code for its class of failure.
pub struct ErrorCode {
  pub code: u8,
}

impl ErrorCode {
  pub const ARGUMENT: u8 = 2;
  pub const IO: u8 = 3;
  pub const FORMAT: u8 = 4;
  pub const VALIDATION: u8 = 5;
}

impl From<&CliError> for ErrorCode {
  fn from(error: &CliError) -> Self {
    match error {
      CliError::MissingColor => ErrorCode { code: ErrorCode::ARGUMENT },
      CliError::Io { .. } => ErrorCode { code: ErrorCode::IO },
      CliError::Codec { source, .. } => match source.class() {
        ErrorClass::Io => ErrorCode { code: ErrorCode::IO },
        ErrorClass::Format => ErrorCode { code: ErrorCode::FORMAT },
        ErrorClass::Validation => ErrorCode { code: ErrorCode::VALIDATION },
      },
    }
  }
}

impl From<ErrorCode> for ExitCode {
  fn from(error_code: ErrorCode) -> Self {
    ExitCode::from(error_code.code)
  }
}
