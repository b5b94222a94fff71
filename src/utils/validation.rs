// file: src/utils/validation.rs
// description: filesystem precondition checks for deploy inputs
// reference: input validation patterns

use crate::error::{DeployError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(DeployError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(DeployError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_file_path(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(DeployError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_zip_file(path: &Path) -> Result<()> {
        Self::validate_file_path(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("zip") => Ok(()),
            _ => Err(DeployError::Validation(format!(
                "File is not a zip archive: {}",
                path.display()
            ))),
        }
    }
}
