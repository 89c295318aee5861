use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use super::capabilities::ImageStore;

pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn numbered_name(file_name: &str, n: usize) -> String {
    if n == 0 {
        return file_name.to_string();
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    match name.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{} ({}).{}", stem, n, ext),
        None => format!("{} ({})", stem, n),
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn save(&self, file_name: &str, data: Bytes) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut n = 0;
        let (path, mut file) = loop {
            let path = self.dir.join(numbered_name(file_name, n));
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
                Err(e) => return Err(e),
            }
        };

        file.write_all(&data).await?;
        file.flush().await?;

        Ok(path)
    }
}
