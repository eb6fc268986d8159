//! Storage access passed explicitly to the loader and the writer.
//! The disk-backed implementation is used by the binary; the in-memory one
//! lets tests run the whole pipeline without touching the filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::debug;
use tempfile::Builder;

/// Byte-level access to wherever manifests live and artifacts go.
pub trait Storage: Send + Sync {
    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Returns true if anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Creates `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replaces the file at `path` with `contents` in one step. The parent
    /// directory must already exist. A failed write leaves the previous file
    /// (or nothing) in place, never a truncated one.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Storage backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemStorage;

impl FileSystemStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FileSystemStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // The temp file lives next to the destination so the final rename
        // stays on one filesystem.
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Same mode a plain create would give, after the umask.
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut file = builder.tempfile_in(dir)?;
        file.write_all(contents)?;
        if let Ok(existing) = fs::metadata(path) {
            file.as_file().set_permissions(existing.permissions())?;
        }
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;

        debug!("Persisted {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Dir,
    File(Vec<u8>),
}

/// Storage kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<PathBuf, Entry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating its parent directories.
    pub fn insert_file<P: AsRef<Path>, C: AsRef<[u8]>>(&self, path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write(path, contents.as_ref())
    }

    /// Reads a file back as UTF-8 text.
    pub fn read_to_string<P: AsRef<Path>>(&self, path: P) -> io::Result<String> {
        let bytes = self.read(path.as_ref())?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Paths of all files, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock()
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The root and the empty relative path always exist.
fn is_implicit_dir(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.parent().is_none()
}

impl Storage for MemoryStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.lock().get(path) {
            Some(Entry::File(contents)) => Ok(contents.clone()),
            Some(Entry::Dir) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        is_implicit_dir(path) || self.lock().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.lock();
        let mut ancestors: Vec<&Path> =
            path.ancestors().filter(|p| !is_implicit_dir(p)).collect();
        ancestors.reverse();

        for dir in ancestors {
            match entries.get(dir) {
                Some(Entry::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} exists and is not a directory", dir.display()),
                    ));
                }
                Some(Entry::Dir) => {}
                None => {
                    entries.insert(dir.to_path_buf(), Entry::Dir);
                }
            }
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut entries = self.lock();

        if let Some(parent) = path.parent().filter(|p| !is_implicit_dir(p)) {
            match entries.get(parent) {
                Some(Entry::Dir) => {}
                Some(Entry::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("{} is not a directory", parent.display()),
                    ));
                }
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("{} does not exist", parent.display()),
                    ));
                }
            }
        }

        if let Some(Entry::Dir) = entries.get(path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            ));
        }

        entries.insert(path.to_path_buf(), Entry::File(contents.to_vec()));
        Ok(())
    }
}
