//! Zip creation for the archived articles.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::ScrapeError;

/// Zip the files directly inside `dir` into a sibling `<dir>.zip`.
///
/// Entries are stored flat (no directory prefix), matching an archive made
/// from inside the folder.
pub fn zip_directory(dir: &Path) -> Result<PathBuf, ScrapeError> {
    let zip_path = dir.with_extension("zip");
    let file = File::create(&zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    for path in entries {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ScrapeError::Zip(format!("unrepresentable filename: {path:?}")))?
            .to_string();
        writer
            .start_file(&name, options)
            .map_err(|e| ScrapeError::Zip(e.to_string()))?;
        let mut src = File::open(&path)?;
        io::copy(&mut src, &mut writer)?;
    }

    writer
        .finish()
        .map_err(|e| ScrapeError::Zip(e.to_string()))?
        .flush()?;

    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn zips_all_files_in_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("blogs");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("blog_01_a.txt"), "first article").unwrap();
        std::fs::write(dir.join("blog_02_b.txt"), "second article").unwrap();

        let zip_path = zip_directory(&dir).unwrap();
        assert!(zip_path.exists());
        assert_eq!(zip_path.extension().unwrap(), "zip");

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut contents = String::new();
        archive
            .by_name("blog_01_a.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first article");
    }

    #[test]
    fn empty_directory_yields_empty_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("empty");
        std::fs::create_dir(&dir).unwrap();

        let zip_path = zip_directory(&dir).unwrap();
        let archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
