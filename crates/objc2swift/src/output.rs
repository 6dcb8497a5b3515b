// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Writer outputs

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Accepts an output path and returns a character sink for it.
pub trait WriterOutput {
    fn create(&mut self, path: &str) -> anyhow::Result<Box<dyn Write>>;
}

/// Writes under a base directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct FileSystemOutput {
    base_directory: PathBuf,
}

impl FileSystemOutput {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }
}

impl WriterOutput for FileSystemOutput {
    fn create(&mut self, path: &str) -> anyhow::Result<Box<dyn Write>> {
        let full_path = self.base_directory.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Box::new(File::create(full_path)?))
    }
}

/// Collects outputs in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    files: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .expect("output mutex poisoned")
            .get(path)
            .cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .files
            .lock()
            .expect("output mutex poisoned")
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl WriterOutput for MemoryOutput {
    fn create(&mut self, path: &str) -> anyhow::Result<Box<dyn Write>> {
        Ok(Box::new(MemorySink {
            path: path.to_string(),
            buffer: Vec::new(),
            store: self.files.clone(),
        }))
    }
}

/// Buffers writes and lands them in the shared map when dropped.
struct MemorySink {
    path: String,
    buffer: Vec<u8>,
    store: Arc<Mutex<HashMap<String, String>>>,
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MemorySink {
    fn drop(&mut self) {
        let contents = String::from_utf8_lossy(&self.buffer).into_owned();
        self.store
            .lock()
            .expect("output mutex poisoned")
            .insert(std::mem::take(&mut self.path), contents);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = FileSystemOutput::new(dir.path());
        {
            let mut sink = output.create("nested/dir/C.swift").unwrap();
            sink.write_all(b"class C {}\n").unwrap();
        }
        let written = std::fs::read_to_string(dir.path().join("nested/dir/C.swift")).unwrap();
        assert_eq!(written, "class C {}\n");
    }

    #[test]
    fn test_memory_output_round_trip() {
        let mut output = MemoryOutput::new();
        {
            let mut sink = output.create("C.swift").unwrap();
            sink.write_all(b"class C {}\n").unwrap();
        }
        assert_eq!(output.file("C.swift").as_deref(), Some("class C {}\n"));
    }
}
