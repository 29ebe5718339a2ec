use std::fs;
use std::path::PathBuf;

use crate::error::PostError;

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self { root_dir: root_dir.into() }
    }

    /// Lists every entry of the post directory, sorted by file name.
    /// Nothing is filtered, a sub directory fails later when it is read as a post.
    pub fn retrieve_entries(&self) -> Result<Vec<PathBuf>, PostError> {
        let read_err = |e| PostError::io(&self.root_dir, e);

        let mut entries = vec![];
        for entry in fs::read_dir(self.root_dir.as_path()).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            entries.push(entry.path());
        }

        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(entries)
    }
}
