use std::path::Path;

use spdlog::{error, info};

use crate::content::PostRecord;
use crate::error::PostError;
use crate::post_list::PostList;
use crate::publisher::{publish_all, PostSink, PublishSummary};
use crate::slug::SlugOptions;

#[derive(Debug)]
pub struct FileFailure {
    pub file_name: String,
    pub error: PostError,
}

/// Outcome of validating a whole directory. Records keep the directory order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<PostRecord>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses every entry of `input_dir`. A broken file is logged and recorded,
/// the remaining files are still processed.
pub fn process_dir(input_dir: &Path, slug_options: &SlugOptions) -> Result<BatchReport, PostError> {
    let entries = PostList::new(input_dir).retrieve_entries()?;
    let mut report = BatchReport::default();

    for entry in entries {
        match PostRecord::from_file(&entry, slug_options) {
            Ok(record) => {
                info!("Validated {}", record);
                report.records.push(record);
            }
            Err(e) => {
                let file_name = entry.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| entry.to_string_lossy().to_string());
                error!("Error in file {}: {}", file_name, e);
                report.failures.push(FileFailure { file_name, error: e });
            }
        }
    }

    Ok(report)
}

/// Validates the directory and only publishes when every file is valid.
pub fn run_batch(input_dir: &Path, slug_options: &SlugOptions, sink: &dyn PostSink) -> Result<PublishSummary, PostError> {
    info!("Reading posts from {}", input_dir.display());
    let report = process_dir(input_dir, slug_options)?;

    if !report.is_valid() {
        return Err(PostError::BatchRejected { failed: report.failures.len() });
    }

    info!("{} post(s) validated, publishing", report.records.len());
    Ok(publish_all(sink, &report.records))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;

    use crate::publisher::Delivery;
    use crate::test_data::{DRAFT_POST, HELLO_WORLD_POST, NO_DATE_POST};

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        urls: RefCell<Vec<String>>,
    }

    impl PostSink for RecordingSink {
        fn submit(&self, record: &PostRecord) -> Result<Delivery, PostError> {
            self.urls.borrow_mut().push(record.url.clone());
            Ok(Delivery::Accepted)
        }
    }

    fn write_posts(dir: &Path, posts: &[(&str, &str)]) {
        for (name, content) in posts {
            fs::write(dir.join(name), content).unwrap();
        }
    }

    #[test]
    fn test_valid_batch_is_published_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_posts(dir.path(), &[
            ("b-draft.md", DRAFT_POST),
            ("a-hello.md", HELLO_WORLD_POST),
        ]);

        let sink = RecordingSink::default();
        let summary = run_batch(dir.path(), &SlugOptions::default(), &sink).unwrap();

        assert_eq!(summary, PublishSummary { sent: 2, rejected: 0, failed: 0 });
        assert_eq!(*sink.urls.borrow(), ["2023-05-01-hello-world", "2019-07-15-quotes-inside-and-tabs"]);
    }

    #[test]
    fn test_invalid_file_blocks_submission() {
        let dir = tempfile::tempdir().unwrap();
        write_posts(dir.path(), &[
            ("1.md", HELLO_WORLD_POST),
            ("2.md", DRAFT_POST),
            ("3.md", NO_DATE_POST),
            ("4.md", HELLO_WORLD_POST),
        ]);

        let sink = RecordingSink::default();
        let res = run_batch(dir.path(), &SlugOptions::default(), &sink);

        assert!(matches!(res, Err(PostError::BatchRejected { failed: 1 })));
        assert!(sink.urls.borrow().is_empty());
    }

    #[test]
    fn test_all_failures_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        write_posts(dir.path(), &[
            ("a.md", NO_DATE_POST),
            ("b.md", HELLO_WORLD_POST),
            ("c.md", "no front matter at all"),
        ]);
        fs::create_dir(dir.path().join("d-images")).unwrap();

        let report = process_dir(dir.path(), &SlugOptions::default()).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].file_name, "b.md");

        let failed: Vec<&str> = report.failures.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(failed, ["a.md", "c.md", "d-images"]);
        assert!(matches!(report.failures[0].error, PostError::MissingDate));
        assert!(matches!(report.failures[1].error, PostError::MissingTitle));
        assert!(matches!(report.failures[2].error, PostError::Io { .. }));
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();
        let res = run_batch(&dir.path().join("missing"), &SlugOptions::default(), &sink);
        assert!(matches!(res, Err(PostError::Io { .. })));
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();
        let summary = run_batch(dir.path(), &SlugOptions::default(), &sink).unwrap();
        assert_eq!(summary, PublishSummary::default());
    }
}
