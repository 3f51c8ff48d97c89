use anyhow::{Context, Result};
use joseki::JosekiTree;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const CHUNK_SIZE: usize = 1024 * 1024;

/// A joseki tree stored as an SGF file.
pub struct JosekiPersistance {
    path: PathBuf,
}

impl JosekiPersistance {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, tree: &JosekiTree) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let text = sgf::serialise(&tree.to_sgf());
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {:?}", self.path))?;
        let mut writer = BufWriter::new(file);

        let total = text.len();
        let mut written = 0;
        for chunk in text.as_bytes().chunks(CHUNK_SIZE) {
            writer.write_all(chunk)?;
            written += chunk.len();
            info!(
                "Writing {:?}: {}/{} bytes ({:.0}%)",
                self.path,
                written,
                total,
                written as f32 / total as f32 * 100.0
            );
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write {:?}", self.path))?;

        Ok(())
    }

    pub fn read(&self) -> Result<JosekiTree> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let root = sgf::parse_first(&text)
            .with_context(|| format!("Failed to parse {:?}", self.path))?;

        JosekiTree::from_sgf(&root).with_context(|| format!("Invalid joseki tree in {:?}", self.path))
    }
}
