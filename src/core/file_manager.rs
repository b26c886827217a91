use crate::error::{Result, SampleError};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::path::{Path, PathBuf};

/// The single input file of a run.
#[derive(Debug, Clone)]
pub struct InputFile {
    path: PathBuf,
    size: u64,
}

impl InputFile {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // 标准输入暂不支持
        if path.as_os_str() == "-" {
            return Err(SampleError::StdinUnsupported);
        }

        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SampleError::FileNotFound(path.to_path_buf()),
            _ => SampleError::FileAccess(e),
        })?;

        if metadata.is_dir() {
            return Err(SampleError::FileAccess(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{} is a directory", path.display()),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn open(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SampleError::FileNotFound(self.path.clone()),
            _ => SampleError::FileAccess(e),
        })
    }

    // 内存映射文件
    pub fn mmap(&self) -> Result<Mmap> {
        let file = self.open()?;

        // 只读映射；运行期间不修改输入文件
        let mmap = unsafe { MmapOptions::new().map(&file).map_err(SampleError::MapFailed)? };

        Ok(mmap)
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            path: self.path.display().to_string(),
            size: self.size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: String,
    pub size: u64,
}
