use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PostError;

pub struct ContentFile {
    pub file_name: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: &Path) -> Result<ContentFile, PostError> {
        let file_name = match file_path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => file_path.to_string_lossy().to_string(),
        };

        // Invalid UTF-8 is replaced, only a failed read rejects the file
        let bytes = fs::read(file_path).map_err(|e| PostError::io(file_path, e))?;
        let raw_content = String::from_utf8_lossy(&bytes).into_owned();

        Ok(ContentFile {
            file_name,
            file_path: file_path.to_path_buf(),
            raw_content,
        })
    }
}
