// File: ./src/storage.rs
// Line-oriented persistence behind the task store
use std::cell::RefCell;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Where the task store reads and writes its canonical lines.
pub trait LineStorage {
    /// Every stored line in order. A missing backing file is an empty list.
    fn load_lines(&self) -> io::Result<Vec<String>>;
    /// Replaces the stored contents with `lines`.
    fn save_lines(&self, lines: &[String]) -> io::Result<()>;
}

/// Newline-delimited UTF-8 text file, one task per line.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

impl LineStorage for FileStorage {
    fn load_lines(&self) -> io::Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "task file absent, starting empty");
                return Ok(vec![]);
            }
            Err(e) => return Err(e),
        };
        let lines: Vec<String> = content
            .lines()
            .map(|l| l.trim_end().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        tracing::debug!(path = %self.path.display(), count = lines.len(), "loaded tasks");
        Ok(lines)
    }

    fn save_lines(&self, lines: &[String]) -> io::Result<()> {
        let mut out = String::new();
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        Self::atomic_write(&self.path, out)?;
        tracing::debug!(path = %self.path.display(), count = lines.len(), "saved tasks");
        Ok(())
    }
}

/// In-memory storage. Clones share the same buffer, so a test can keep a
/// handle and inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
        }
    }

    /// Snapshot of what is currently persisted.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl LineStorage for MemoryStorage {
    fn load_lines(&self) -> io::Result<Vec<String>> {
        Ok(self.lines())
    }

    fn save_lines(&self, lines: &[String]) -> io::Result<()> {
        *self.lines.borrow_mut() = lines.to_vec();
        Ok(())
    }
}
