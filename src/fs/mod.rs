use std::path::Path;

use tracing::{debug, info};

use crate::{
    disk::HostFs,
    fs::{
        config::CapacityPlan,
        data_area::DataArea,
        directory::{Directory, FileRecord},
        error::{FsError, HostOp, Result},
        occupancy::OccupancyMap,
    },
};

pub mod allocator;
pub mod config;
pub mod data_area;
pub mod directory;
pub mod error;
pub mod occupancy;

/// 数据区使用情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub capacity: usize,
    pub used: usize,
    pub free: usize,
    pub largest_free_run: usize,
    pub files: usize,
}

/// 虚拟文件系统：独占数据区、占用表和目录，三者始终保持一致
#[derive(Debug)]
pub struct VirtualFs {
    plan: CapacityPlan,      // 容量划分
    data_area: DataArea,     // 文件内容
    occupancy: OccupancyMap, // 每个字节的占用情况
    directory: Directory,    // 所有文件记录
}

impl VirtualFs {
    pub fn new() -> Self {
        Self::with_plan(CapacityPlan::standard())
    }

    pub fn with_plan(plan: CapacityPlan) -> Self {
        Self {
            plan,
            data_area: DataArea::new(plan.data_size),
            occupancy: OccupancyMap::new(plan.data_size),
            directory: Directory::new(),
        }
    }

    pub fn plan(&self) -> &CapacityPlan {
        &self.plan
    }

    /// 创建文件。先检查容量并分配，成功后才写目录、数据和占用表
    pub fn create(&mut self, name: &str, content: &[u8]) -> Result<FileRecord> {
        let size = content.len();
        let capacity = self.plan.data_size;
        if size > capacity {
            return Err(FsError::ContentTooLarge { size, capacity });
        }

        // 按字节粒度首次适配，块数只用于展示
        let start = allocator::find_free_run(&self.occupancy, size).ok_or(
            FsError::InsufficientSpace {
                requested: size,
                free: self.occupancy.free_bytes(),
            },
        )?;

        let record = FileRecord::new(name, start, size);
        self.directory.append(record.clone());
        self.data_area.write_at(start, content);
        self.occupancy.mark_range(start, size, true);

        debug!(
            name,
            start,
            size,
            blocks = self.plan.blocks_for(size),
            "file created"
        );
        Ok(record)
    }

    pub fn list(&self) -> Vec<(String, usize)> {
        self.directory.list()
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let record = self.lookup(name)?;
        Ok(self
            .data_area
            .read_at(record.start_address, record.size)
            .to_vec())
    }

    pub fn stat(&self, name: &str) -> Result<FileRecord> {
        self.lookup(name).cloned()
    }

    /// 删除第一个同名文件；数据区内容不清零，只释放占用
    pub fn delete(&mut self, name: &str) -> Result<FileRecord> {
        let record = self
            .directory
            .remove(name)
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;
        self.occupancy
            .mark_range(record.start_address, record.size, false);

        debug!(name, start = record.start_address, size = record.size, "file deleted");
        Ok(record)
    }

    /// 清空目录并释放整个数据区，数据字节保持原样
    pub fn reset(&mut self) {
        let removed = self.directory.len();
        self.directory.clear();
        self.occupancy.reset();
        info!(removed, "all files deleted");
    }

    /// 把文件内容写到宿主文件系统，返回写入的字节数
    pub fn export(&self, name: &str, host: &dyn HostFs, dest: &Path) -> Result<usize> {
        let record = self.lookup(name)?;
        let bytes = self.data_area.read_at(record.start_address, record.size);
        host.write(dest, bytes)
            .map_err(|e| FsError::host(HostOp::Write, dest, e))?;

        info!(name, dest = %dest.display(), size = bytes.len(), "file exported");
        Ok(bytes.len())
    }

    /// 从宿主文件系统读入文件，以路径的文件名作为虚拟文件名
    pub fn import(&mut self, host: &dyn HostFs, path: &Path) -> Result<FileRecord> {
        let content = host
            .read(path)
            .map_err(|e| FsError::host(HostOp::Read, path, e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let record = self.create(&name, &content)?;
        info!(name = %name, src = %path.display(), size = record.size, "file imported");
        Ok(record)
    }

    pub fn usage(&self) -> Usage {
        Usage {
            capacity: self.plan.data_size,
            used: self.occupancy.used_bytes(),
            free: self.occupancy.free_bytes(),
            largest_free_run: allocator::largest_free_run(&self.occupancy),
            files: self.directory.len(),
        }
    }

    /// 校验目录和占用表是否一致：记录范围全部被占用、互不重叠，且没有多余的占用
    pub fn verify(&self) -> Result<()> {
        let mut claimed = vec![false; self.occupancy.len()];
        let mut claimed_bytes = 0;

        for record in self.directory.iter() {
            if record.end_address() > self.occupancy.len() {
                return Err(FsError::Corrupted(format!(
                    "'{}' extends past the data region ({}..{})",
                    record.name,
                    record.start_address,
                    record.end_address()
                )));
            }
            for offset in record.start_address..record.end_address() {
                if claimed[offset] {
                    return Err(FsError::Corrupted(format!(
                        "'{}' overlaps another file at offset {}",
                        record.name, offset
                    )));
                }
                if self.occupancy.is_free(offset) {
                    return Err(FsError::Corrupted(format!(
                        "'{}' covers offset {} which is marked free",
                        record.name, offset
                    )));
                }
                claimed[offset] = true;
                claimed_bytes += 1;
            }
        }

        let used = self.occupancy.used_bytes();
        if used != claimed_bytes {
            return Err(FsError::Corrupted(format!(
                "{} bytes marked used but files only claim {}",
                used, claimed_bytes
            )));
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&FileRecord> {
        self.directory
            .find(name)
            .ok_or_else(|| FsError::NotFound(name.to_string()))
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 一个 10 字节的文件 "a"，位于 0..10
    fn fs_with_one_file() -> VirtualFs {
        let mut fs = VirtualFs::with_plan(CapacityPlan::with_data_size(64));
        fs.create("a", &[1; 10]).unwrap();
        fs.verify().unwrap();
        fs
    }

    #[test]
    fn verify_detects_record_byte_marked_free() {
        let mut fs = fs_with_one_file();
        fs.occupancy.mark_range(3, 1, false);

        match fs.verify() {
            Err(FsError::Corrupted(msg)) => assert!(msg.contains("offset 3")),
            other => panic!("expected Corrupted, got {:?}", other),
        }
    }

    #[test]
    fn verify_detects_unclaimed_occupied_bytes() {
        let mut fs = fs_with_one_file();
        fs.occupancy.mark_range(40, 2, true);

        match fs.verify() {
            Err(FsError::Corrupted(msg)) => assert!(msg.contains("12 bytes marked used")),
            other => panic!("expected Corrupted, got {:?}", other),
        }
    }

    #[test]
    fn verify_detects_overlapping_records() {
        let mut fs = fs_with_one_file();
        fs.directory.append(FileRecord::new("b", 5, 10));
        fs.occupancy.mark_range(5, 10, true);

        match fs.verify() {
            Err(FsError::Corrupted(msg)) => {
                assert!(msg.contains("'b' overlaps another file at offset 5"))
            }
            other => panic!("expected Corrupted, got {:?}", other),
        }
    }

    #[test]
    fn verify_detects_record_past_data_region() {
        let mut fs = fs_with_one_file();
        fs.directory.append(FileRecord::new("tail", 60, 10));

        assert!(matches!(fs.verify(), Err(FsError::Corrupted(_))));
    }
}
