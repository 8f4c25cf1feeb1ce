use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::warn;

/// Storage for named, independently persisted record collections.
///
/// A collection is an ordered sequence of opaque serialized records
/// ("frames"). Every write replaces the whole collection; the four
/// planner collections live under independent keys and never share a
/// write.
pub trait Storage {
    /// Read all frames of a collection. A missing collection is empty.
    fn read(&self, key: &str) -> io::Result<Vec<Vec<u8>>>;

    /// Replace a collection with the given frames in one atomic write.
    fn write(&self, key: &str, frames: &[Vec<u8>]) -> io::Result<()>;

    /// Remove a collection outright. Removing a missing collection is Ok.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Encode a single frame to `[len][payload][crc32]` format.
fn encode_frame(writer: &mut impl Write, payload: &[u8]) -> io::Result<()> {
    let len = payload.len() as u32;
    let crc = crc32fast::hash(payload);
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(payload)?;
    writer.write_all(&crc.to_le_bytes())?;
    Ok(())
}

/// File-backed store: one file per collection under a data directory.
///
/// Format per frame: `[u32: len][payload][u32: crc32]`
/// - `len` is the byte length of the payload (not including the CRC).
/// - A truncated or corrupt trailing frame (torn write, external damage)
///   ends the read; the valid prefix is returned.
///
/// Writes go to a temp file, fsync, then rename over the collection file,
/// so a crash mid-write leaves the previous contents intact.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (or create) the data directory at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.db"))
    }
}

impl Storage for FileStore {
    fn read(&self, key: &str) -> io::Result<Vec<Vec<u8>>> {
        let path = self.collection_path(key);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut reader = BufReader::new(file);
        let mut frames = Vec::new();

        loop {
            // Read length prefix
            let mut len_buf = [0u8; 4];
            match reader.read_exact(&mut len_buf) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            }
            let len = u32::from_le_bytes(len_buf) as usize;

            // Read payload
            let mut payload = vec![0u8; len];
            match reader.read_exact(&mut payload) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!(key, "truncated frame, dropping tail");
                    break;
                }
                Err(e) => return Err(e),
            }

            // Read CRC
            let mut crc_buf = [0u8; 4];
            match reader.read_exact(&mut crc_buf) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!(key, "truncated frame, dropping tail");
                    break;
                }
                Err(e) => return Err(e),
            }
            let stored_crc = u32::from_le_bytes(crc_buf);
            let computed_crc = crc32fast::hash(&payload);

            if stored_crc != computed_crc {
                warn!(key, "corrupt frame, dropping tail");
                break;
            }

            frames.push(payload);
        }

        Ok(frames)
    }

    fn write(&self, key: &str, frames: &[Vec<u8>]) -> io::Result<()> {
        let path = self.collection_path(key);
        let tmp_path = path.with_extension("db.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        for frame in frames {
            encode_frame(&mut writer, frame)?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.collection_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Ephemeral in-memory store for tests and embedding without a data
/// directory. Same key independence as [`FileStore`], no durability.
pub struct MemStore {
    collections: DashMap<String, Vec<Vec<u8>>>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
        }
    }
}

impl Storage for MemStore {
    fn read(&self, key: &str) -> io::Result<Vec<Vec<u8>>> {
        Ok(self
            .collections
            .get(key)
            .map(|e| e.value().clone())
            .unwrap_or_default())
    }

    fn write(&self, key: &str, frames: &[Vec<u8>]) -> io::Result<()> {
        self.collections.insert(key.to_string(), frames.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.collections.remove(key);
        Ok(())
    }
}
