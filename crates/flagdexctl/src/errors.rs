//! Exit codes for flagdexctl

use flagdex_common::ProgressError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when an import payload was rejected
pub const EXIT_IMPORT_REJECTED: i32 = 65;

/// Exit code when a file could not be read or written
pub const EXIT_IO_ERROR: i32 = 74;

/// Map an error to the process exit code
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ProgressError>() {
        Some(ProgressError::InvalidImport(_)) | Some(ProgressError::Json(_)) => {
            EXIT_IMPORT_REJECTED
        }
        Some(ProgressError::Io(_)) => EXIT_IO_ERROR,
        _ if err.downcast_ref::<std::io::Error>().is_some() => EXIT_IO_ERROR,
        _ => EXIT_GENERAL_ERROR,
    }
}
