use anyhow::{Context, Result};
use bzip2::read::MultiBzDecoder;
use flate2::read::GzDecoder;
use log::warn;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Bzip2,
    Gzip,
    None,
}

impl Compression {
    /// The compression of a tar archive judged by its file name, `None` if it is not an archive.
    pub fn of_archive(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;

        if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") {
            Some(Compression::Bzip2)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Compression::Gzip)
        } else if name.ends_with(".tar") {
            Some(Compression::None)
        } else {
            None
        }
    }
}

/// All archives below the directory, in file name order.
pub fn find_archives(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| Compression::of_archive(p).is_some())
        .collect()
}

/// A game record file read out of an archive.
#[derive(Debug, Clone)]
pub struct RecordEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLimits {
    /// Members examined per archive, records or not.
    pub max_members: usize,
    /// Larger records are skipped and counted as failures.
    pub max_record_bytes: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub members: usize,
    pub records: usize,
    pub failures: usize,
}

/// Hands every `.sgf` file among the first `max_members` members of a tar archive to `f`, until
/// `f` returns false.
///
/// The sizes in member headers are not trusted for allocation. Records above `max_record_bytes`
/// are skipped and counted.
///
/// Members that cannot be read are logged and counted. A broken archive stream is an error, the
/// records handed out before it remain valid.
pub fn read_archive<F>(path: &Path, limits: &ArchiveLimits, mut f: F) -> Result<ArchiveSummary>
where
    F: FnMut(RecordEntry) -> bool,
{
    let compression = Compression::of_archive(path).unwrap_or(Compression::None);
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let file = BufReader::new(file);

    let reader: Box<dyn Read> = match compression {
        Compression::Bzip2 => Box::new(MultiBzDecoder::new(file)),
        Compression::Gzip => Box::new(GzDecoder::new(file)),
        Compression::None => Box::new(file),
    };

    let mut archive = tar::Archive::new(reader);
    let mut summary = ArchiveSummary::default();

    let entries = archive
        .entries()
        .with_context(|| format!("Failed to read entries of {:?}", path))?;

    for entry in entries.take(limits.max_members) {
        let mut entry = entry.with_context(|| format!("Corrupt entry in {:?}", path))?;
        summary.members += 1;

        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = match entry.path() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(err) => {
                warn!("Unreadable member name in {:?}: {}", path, err);
                summary.failures += 1;
                continue;
            }
        };

        if !name.ends_with(".sgf") {
            continue;
        }

        if entry.size() > limits.max_record_bytes {
            warn!(
                "Skipping {} in {:?}: {} bytes exceeds the limit of {}",
                name,
                path,
                entry.size(),
                limits.max_record_bytes
            );
            summary.failures += 1;
            continue;
        }

        let mut bytes = Vec::new();
        if let Err(err) = entry.read_to_end(&mut bytes) {
            warn!("Failed to read {} in {:?}: {}", name, path, err);
            summary.failures += 1;
            continue;
        }

        summary.records += 1;
        if !f(RecordEntry { name, bytes }) {
            break;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_of_archive() {
        assert_eq!(
            Compression::of_archive(Path::new("a/2025-01-01rating.tar.bz2")),
            Some(Compression::Bzip2)
        );
        assert_eq!(
            Compression::of_archive(Path::new("games.tgz")),
            Some(Compression::Gzip)
        );
        assert_eq!(
            Compression::of_archive(Path::new("games.tar")),
            Some(Compression::None)
        );
        assert_eq!(Compression::of_archive(Path::new("game.sgf")), None);
        assert_eq!(Compression::of_archive(Path::new("notes.bz2")), None);
    }

    fn limits(max_record_bytes: u64) -> ArchiveLimits {
        ArchiveLimits {
            max_members: 100,
            max_record_bytes,
        }
    }

    fn write_tar(path: &Path, members: &[(&str, &[u8])]) {
        let mut builder = tar::Builder::new(File::create(path).unwrap());

        for (name, content) in members {
            let mut header = tar::Header::new_gnu();
            header.set_entry_type(tar::EntryType::Regular);
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            builder.append_data(&mut header, name, *content).unwrap();
        }

        builder.into_inner().unwrap();
    }

    #[test]
    fn test_oversized_record_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.tar");
        let large = vec![b'x'; 600];
        write_tar(
            &path,
            &[
                ("a.sgf", &b"(;B[pd])"[..]),
                ("b.sgf", &large[..]),
                ("c.sgf", &b"(;W[dd])"[..]),
            ],
        );

        let mut names = Vec::new();
        let summary = read_archive(&path, &limits(512), |entry| {
            names.push(entry.name);
            true
        })
        .unwrap();

        assert_eq!(names, vec!["a.sgf", "c.sgf"]);
        assert_eq!(
            summary,
            ArchiveSummary {
                members: 3,
                records: 2,
                failures: 1
            }
        );
    }

    #[test]
    fn test_huge_size_in_header_does_not_allocate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.tar");

        let mut header = tar::Header::new_gnu();
        header.set_path("x.sgf").unwrap();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(1 << 62);
        header.set_mode(0o644);
        header.set_cksum();

        let mut bytes = header.as_bytes().to_vec();
        bytes.extend_from_slice(&[0; 1024]);
        std::fs::write(&path, bytes).unwrap();

        let mut records = 0;
        let res = read_archive(&path, &limits(4 * 1024 * 1024), |_| {
            records += 1;
            true
        });

        assert_eq!(records, 0);
        // The stream ends inside the member, which may also fail the archive as a whole.
        if let Ok(summary) = res {
            assert_eq!(summary.failures, 1);
        }
    }
}
