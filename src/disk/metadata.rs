use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    fs::{
        config::CapacityPlan,
        error::{FsError, HostOp, Result},
    },
    utils::{current_timestamp, generate_uuid},
};

pub const FS_TYPE: &str = "VDisk";
pub const MAGIC: u64 = 0x5644_4953_4B00_0001;

/// 元数据文件头，只做记录，不用于恢复文件内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataHeader {
    pub fs_type: String,     // 文件系统标识
    pub magic: u64,          // 魔数
    pub volume_id: String,   // 每次格式化生成新的 id
    pub plan: CapacityPlan,  // 容量划分
    pub formatted_at: i64,   // 格式化时间（unix 秒）
}

impl MetadataHeader {
    pub fn new(plan: CapacityPlan) -> Self {
        Self {
            fs_type: FS_TYPE.to_string(),
            magic: MAGIC,
            volume_id: generate_uuid(),
            plan,
            formatted_at: current_timestamp(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == MAGIC && self.fs_type == FS_TYPE
    }
}

/// 磁盘旁边的元数据文件
#[derive(Debug, Clone)]
pub struct MetadataFile {
    path: PathBuf,
}

impl MetadataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件不存在或文件头无法识别时重新写入文件头，否则沿用原来的
    pub fn open_or_create(&self, plan: CapacityPlan) -> Result<MetadataHeader> {
        match self.read_header() {
            Ok(Some(header)) if header.is_valid() => {
                debug!(path = %self.path.display(), volume_id = %header.volume_id, "metadata header loaded");
                Ok(header)
            }
            Ok(Some(_)) => {
                warn!(path = %self.path.display(), "unrecognised metadata header, restamping");
                self.stamp(plan)
            }
            Ok(None) => self.stamp(plan),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable metadata file, restamping");
                self.stamp(plan)
            }
        }
    }

    /// 截断文件并写入新的文件头
    pub fn stamp(&self, plan: CapacityPlan) -> Result<MetadataHeader> {
        let header = MetadataHeader::new(plan);
        let bytes = bincode::serialize(&header).map_err(|e| FsError::Metadata(e.to_string()))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| FsError::host(HostOp::Write, &self.path, e))?;
        file.write_all(&bytes)
            .map_err(|e| FsError::host(HostOp::Write, &self.path, e))?;

        info!(path = %self.path.display(), volume_id = %header.volume_id, "metadata file stamped");
        Ok(header)
    }

    /// 文件不存在或为空时返回 None
    pub fn read_header(&self) -> Result<Option<MetadataHeader>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FsError::host(HostOp::Read, &self.path, e)),
        };
        if bytes.is_empty() {
            return Ok(None);
        }

        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(|e| FsError::Metadata(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gets_stamped() {
        let dir = tempfile::tempdir().unwrap();
        let meta = MetadataFile::new(dir.path().join("File_system.bin"));

        assert_eq!(meta.read_header().unwrap(), None);
        let header = meta.open_or_create(CapacityPlan::standard()).unwrap();
        assert!(header.is_valid());
        assert_eq!(meta.read_header().unwrap(), Some(header));
    }

    #[test]
    fn existing_header_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let meta = MetadataFile::new(dir.path().join("meta.bin"));

        let first = meta.open_or_create(CapacityPlan::standard()).unwrap();
        let second = meta.open_or_create(CapacityPlan::standard()).unwrap();
        assert_eq!(first.volume_id, second.volume_id);
    }

    #[test]
    fn empty_or_garbage_file_is_restamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.bin");

        fs::write(&path, b"").unwrap();
        let meta = MetadataFile::new(&path);
        assert!(meta.open_or_create(CapacityPlan::standard()).unwrap().is_valid());

        fs::write(&path, b"\x01\x02").unwrap();
        assert!(meta.read_header().is_err());
        assert!(meta.open_or_create(CapacityPlan::standard()).unwrap().is_valid());
    }

    #[test]
    fn restamp_changes_volume_id() {
        let dir = tempfile::tempdir().unwrap();
        let meta = MetadataFile::new(dir.path().join("meta.bin"));

        let first = meta.stamp(CapacityPlan::standard()).unwrap();
        let second = meta.stamp(CapacityPlan::standard()).unwrap();
        assert_ne!(first.volume_id, second.volume_id);
    }
}
