// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Writing captured output to files.

use crate::channel::Contents;
use crate::error::{CaptureError, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// What to write and how to open the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Buffer to write. Defaults to the combined output.
    pub contents: Contents,
    /// Append to an existing file instead of truncating it.
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            contents: Contents::Output,
            append: false,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(mut self, contents: Contents) -> Self {
        self.contents = contents;
        self
    }

    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }
}

/// Text terminated by exactly the newline it already has, or one added.
pub(crate) fn terminated(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

pub(crate) fn write_file(path: &Path, text: &str, append: bool) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    };
    write().map_err(|source| CaptureError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) async fn write_file_async(path: &Path, text: &str, append: bool) -> Result<()> {
    let write = async {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await
    };
    write.await.map_err(|source| CaptureError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
