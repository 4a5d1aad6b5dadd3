use anyhow::{Result, Context, anyhow};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a translated localization file
    // @params: input_file, output_dir, input_ending (".en-US.xlf"), output_ending (".uz-UZ.xlf")
    // @returns: None when the file name does not carry the input ending
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        input_ending: &str,
        output_ending: &str,
    ) -> Option<PathBuf> {
        let file_name = input_file.as_ref().file_name()?.to_str()?;
        let base = file_name.strip_suffix(input_ending)?;
        Some(output_dir.as_ref().join(format!("{}{}", base, output_ending)))
    }

    /// List the files directly inside `dir` whose name ends with `ending`, sorted
    pub fn list_files_with_ending<P: AsRef<Path>>(dir: P, ending: &str) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut result = Vec::new();

        for entry in fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))? {
            let path = entry.context("Failed to read directory entry")?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(ending));
            if path.is_file() && matches {
                result.push(path);
            }
        }

        result.sort();
        Ok(result)
    }

    /// Find files with one of the given extensions under a directory, recursively and sorted
    pub fn find_files<P: AsRef<Path>, S: AsRef<str>>(dir: P, extensions: &[S]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy();
                if extensions
                    .iter()
                    .any(|wanted| ext.eq_ignore_ascii_case(wanted.as_ref().trim_start_matches('.')))
                {
                    result.push(path.to_path_buf());
                }
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Replace a file's content in one step
    ///
    /// The content goes to a temporary file next to the destination, which is
    /// then renamed over it, so readers never see a half-written file.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temporary file for {:?}", path))?;
        temp.flush()?;
        temp.persist(path)
            .map_err(|e| anyhow!("Failed to replace {:?}: {}", path, e.error))?;

        Ok(())
    }
}
