use super::{apply_batch, scan_prefix, Table};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

/// File-backed key-value store for development without RocksDB.
///
/// The whole table lives in memory and is rewritten to a single file after
/// every mutation, via a temp file and rename so a crash never leaves a
/// half-written store behind.
///
/// File format: `[key_len: u32 LE][key][value_len: u32 LE][value]...`
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: Table,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).map_err(io_error)?;
                let data = Self::decode(&bytes)?;
                info!(
                    "Loaded {} keys ({} bytes) from {}",
                    data.len(),
                    bytes.len(),
                    path.display()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing storage file at {}", path.display());
                Table::new()
            }
            Err(e) => return Err(io_error(e)),
        };

        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(bytes: &[u8]) -> Result<Table, KVStoreError> {
        fn take<'a>(bytes: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8], KVStoreError> {
            let end = cursor
                .checked_add(len)
                .filter(|&end| end <= bytes.len())
                .ok_or_else(|| KVStoreError::CorruptionError {
                    message: format!("truncated entry at offset {}", cursor),
                })?;
            let slice = &bytes[*cursor..end];
            *cursor = end;
            Ok(slice)
        }

        fn take_len(bytes: &[u8], cursor: &mut usize) -> Result<usize, KVStoreError> {
            let raw = take(bytes, cursor, 4)?;
            let mut len = [0u8; 4];
            len.copy_from_slice(raw);
            Ok(u32::from_le_bytes(len) as usize)
        }

        let mut data = Table::new();
        let mut cursor = 0;
        while cursor < bytes.len() {
            let key_len = take_len(bytes, &mut cursor)?;
            let key = take(bytes, &mut cursor, key_len)?.to_vec();
            let value_len = take_len(bytes, &mut cursor)?;
            let value = take(bytes, &mut cursor, value_len)?.to_vec();
            data.insert(key, value);
        }
        Ok(data)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::delete(key)])
    }

    /// Applied in memory, then the whole table is rewritten; a failed write
    /// rolls the in-memory table back.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let snapshot = self.data.clone();
        apply_batch(&mut self.data, operations);
        if let Err(e) = self.save_to_file() {
            self.data = snapshot;
            return Err(e);
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan_prefix(&self.data, prefix))
    }
}
