//! File selection rules checked before any request is made.

use crate::error::UploadError;
use crate::types::FileMeta;

/// A submission needs a selected file.
pub fn require_file(file: Option<&FileMeta>) -> Result<&FileMeta, UploadError> {
    file.ok_or(UploadError::NoFileSelected)
}

/// Files strictly larger than `limit` are rejected.
pub fn check_file_size(file: &FileMeta, limit: u64) -> Result<(), UploadError> {
    if file.size > limit {
        return Err(UploadError::FileTooLarge { size: file.size, limit });
    }
    Ok(())
}

/// Rule applied when a file input changes. Clearing a selection is fine.
pub fn validate_selection(file: Option<&FileMeta>, limit: u64) -> Result<(), UploadError> {
    match file {
        Some(file) => check_file_size(file, limit),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FILE_SIZE;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_limit_is_inclusive() {
        let at_limit = FileMeta::new("exact.bin", MAX_FILE_SIZE);
        let over = FileMeta::new("over.bin", MAX_FILE_SIZE + 1);

        assert!(check_file_size(&at_limit, MAX_FILE_SIZE).is_ok());
        assert_eq!(
            check_file_size(&over, MAX_FILE_SIZE),
            Err(UploadError::FileTooLarge { size: MAX_FILE_SIZE + 1, limit: MAX_FILE_SIZE })
        );
    }

    #[test]
    fn test_selection_of_150_mib_is_rejected() {
        let file = FileMeta::new("video.mp4", 150 * MIB);
        let err = validate_selection(Some(&file), MAX_FILE_SIZE).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds the maximum limit of 100MB");
    }

    #[test]
    fn test_small_and_empty_selections_pass() {
        for size in [0, 1, 50 * MIB, MAX_FILE_SIZE] {
            let file = FileMeta::new("ok.bin", size);
            assert!(validate_selection(Some(&file), MAX_FILE_SIZE).is_ok());
        }
        assert!(validate_selection(None, MAX_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_require_file() {
        assert_eq!(require_file(None), Err(UploadError::NoFileSelected));

        let file = FileMeta::new("a.txt", 3);
        assert_eq!(require_file(Some(&file)).unwrap().name, "a.txt");
    }
}
