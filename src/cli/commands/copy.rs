//! `procbar copy` – copy a file with a progress bar.

use anyhow::{Context, Result};
use procbar::{ProgressTracker, ProgressWriter, TrackerOption};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn run_copy(src: &Path, dst: &Path, mut opts: Vec<TrackerOption>) -> Result<()> {
    let total = std::fs::metadata(src)
        .with_context(|| format!("stat {}", src.display()))?
        .len();

    // --show-file-name without --url labels the bar with the source name.
    if !opts.iter().any(|o| matches!(o, TrackerOption::Url(_))) {
        opts.insert(0, TrackerOption::Url(src.display().to_string()));
    }

    let tracker = ProgressTracker::with_options(total, opts);
    let mut reader = File::open(src).with_context(|| format!("open {}", src.display()))?;
    let out = File::create(dst).with_context(|| format!("create {}", dst.display()))?;
    let mut writer = ProgressWriter::new(out, tracker.clone());

    let copied = io::copy(&mut reader, &mut writer)
        .with_context(|| format!("copy {} to {}", src.display(), dst.display()))?;
    writer.flush().context("flush destination")?;

    // Source shrank while copying: close out the bar anyway.
    if copied < total {
        tracker.finish();
        tracker.advance(0)?;
    }

    tracing::info!(bytes = copied, src = %src.display(), dst = %dst.display(), "copy finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn copies_content() {
        let mut src = tempfile::NamedTempFile::new().unwrap();
        let body: Vec<u8> = (0u8..=250).cycle().take(20_000).collect();
        src.write_all(&body).unwrap();
        src.flush().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.bin");
        run_copy(src.path(), &dst, vec![TrackerOption::Invisible(true)]).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), body);
    }

    #[test]
    fn empty_source() {
        let src = tempfile::NamedTempFile::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("empty.bin");
        run_copy(src.path(), &dst, Vec::new()).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap().len(), 0);
    }

    #[test]
    fn missing_source_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_copy(
            &dir.path().join("nope"),
            &dir.path().join("out"),
            Vec::new(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("stat"));
    }
}
