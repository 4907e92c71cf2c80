//! Blob stores: where a save blob lives between sessions.

use crate::core::constants::{SAVE_FILE_NAME, SAVE_VERSION_MAGIC};
use crate::error::PersistenceError;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A single-key blob store.
pub trait SaveStore {
    /// Returns the stored blob, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError>;

    fn save(&mut self, blob: &[u8]) -> Result<(), PersistenceError>;
}

/// Per-user data directory for saves and logs.
pub fn data_dir() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "tycoon").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;
    let dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn default_save_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join(SAVE_FILE_NAME))
}

/// Stores the blob on disk with a checksummed envelope.
///
/// File format:
/// - Version magic (8 bytes)
/// - Data length (4 bytes)
/// - Blob (variable length)
/// - SHA256 checksum over magic + length + blob (32 bytes)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn at_default_location() -> io::Result<Self> {
        Ok(Self::new(default_save_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

fn checksum(magic: &[u8], length: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(magic);
    hasher.update(length);
    hasher.update(data);
    hasher.finalize().into()
}

/// Wraps `data` in the magic/length/checksum envelope.
pub fn seal(data: &[u8]) -> Vec<u8> {
    let magic = SAVE_VERSION_MAGIC.to_le_bytes();
    let length = (data.len() as u32).to_le_bytes();
    let mut out = Vec::with_capacity(8 + 4 + data.len() + 32);
    out.extend_from_slice(&magic);
    out.extend_from_slice(&length);
    out.extend_from_slice(data);
    out.extend_from_slice(&checksum(&magic, &length, data));
    out
}

/// Verifies the envelope and returns the inner blob.
pub fn unseal(bytes: &[u8]) -> Result<Vec<u8>, PersistenceError> {
    let (magic, rest) = bytes
        .split_first_chunk::<8>()
        .ok_or(PersistenceError::Truncated("version magic"))?;
    let found = u64::from_le_bytes(*magic);
    if found != SAVE_VERSION_MAGIC {
        return Err(PersistenceError::BadMagic {
            expected: SAVE_VERSION_MAGIC,
            found,
        });
    }

    let (length, rest) = rest
        .split_first_chunk::<4>()
        .ok_or(PersistenceError::Truncated("data length"))?;
    let data_len = u32::from_le_bytes(*length) as usize;
    if rest.len() < data_len {
        return Err(PersistenceError::Truncated("data"));
    }
    let (data, rest) = rest.split_at(data_len);
    let stored = rest
        .first_chunk::<32>()
        .ok_or(PersistenceError::Truncated("checksum"))?;

    if *stored != checksum(magic, length, data) {
        return Err(PersistenceError::Checksum);
    }
    Ok(data.to_vec())
}

impl SaveStore for FileStore {
    fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        unseal(&bytes).map(Some)
    }

    fn save(&mut self, blob: &[u8]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Temp file + rename keeps the previous save intact until the new one is complete
        let tmp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&seal(blob))?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same buffer, so a test can keep a
/// handle and inspect what the session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Rc<RefCell<Option<Vec<u8>>>>,
    writes: Rc<RefCell<u64>>,
}

impl MemoryStore {
    pub fn with_blob(blob: Vec<u8>) -> Self {
        let store = Self::default();
        *store.blob.borrow_mut() = Some(blob);
        store
    }

    pub fn blob(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> u64 {
        *self.writes.borrow()
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.blob.borrow().clone())
    }

    fn save(&mut self, blob: &[u8]) -> Result<(), PersistenceError> {
        *self.blob.borrow_mut() = Some(blob.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_unseal() {
        let sealed = seal(b"{\"coins\":1}");
        assert_eq!(sealed.len(), 8 + 4 + 11 + 32);
        assert_eq!(unseal(&sealed).unwrap(), b"{\"coins\":1}".to_vec());
    }

    #[test]
    fn test_unseal_detects_tampering() {
        let mut sealed = seal(b"hello");
        sealed[13] ^= 0xFF;
        assert!(matches!(unseal(&sealed), Err(PersistenceError::Checksum)));
    }

    #[test]
    fn test_unseal_rejects_bad_magic_and_truncation() {
        let mut sealed = seal(b"hello");
        sealed[0] ^= 0x01;
        assert!(matches!(
            unseal(&sealed),
            Err(PersistenceError::BadMagic { .. })
        ));
        assert!(matches!(
            unseal(&seal(b"hello")[..20]),
            Err(PersistenceError::Truncated(_))
        ));
        assert!(matches!(unseal(&[]), Err(PersistenceError::Truncated(_))));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("save.sav"));
        assert!(store.load().unwrap().is_none());

        store.save(b"first").unwrap();
        store.save(b"second").unwrap();
        assert_eq!(store.load().unwrap(), Some(b"second".to_vec()));
        assert!(store.exists());

        store.delete().unwrap();
        assert!(!store.exists());
        store.delete().unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.sav");
        fs::write(&path, b"garbage").unwrap();
        assert!(FileStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store_shares_buffer() {
        let store = MemoryStore::default();
        let mut writer = store.clone();
        writer.save(b"blob").unwrap();
        assert_eq!(store.blob(), Some(b"blob".to_vec()));
        assert_eq!(store.writes(), 1);
    }
}
