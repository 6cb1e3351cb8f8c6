use serde::{Deserialize, Serialize};

/// 虚拟磁盘总大小：10MB
pub const DISK_SIZE: usize = 10 * 1024 * 1024;

/// 元数据保留区：1MB（只占位，不使用）
pub const METADATA_SIZE: usize = 1024 * 1024;

/// 空闲块追踪保留区：1MB（只占位，不使用）
pub const TRACKER_SIZE: usize = 1024 * 1024;

/// 真正存放文件内容的数据区：8MB
pub const FILE_DATA_SIZE: usize = DISK_SIZE - METADATA_SIZE - TRACKER_SIZE;

// 分配时按 512 字节向上取整计算块数
pub const BLOCK_SIZE: usize = 512;

pub const METADATA_FILE_NAME: &str = "File_system.bin";

/// 磁盘容量划分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityPlan {
    pub disk_size: usize,
    pub metadata_size: usize,
    pub tracker_size: usize,
    pub data_size: usize,
    pub block_size: usize,
}

impl CapacityPlan {
    pub const fn standard() -> Self {
        Self {
            disk_size: DISK_SIZE,
            metadata_size: METADATA_SIZE,
            tracker_size: TRACKER_SIZE,
            data_size: FILE_DATA_SIZE,
            block_size: BLOCK_SIZE,
        }
    }

    /// 保留区与标准方案相同，数据区大小自定义（测试时构造小磁盘用）
    pub const fn with_data_size(data_size: usize) -> Self {
        Self {
            disk_size: data_size + METADATA_SIZE + TRACKER_SIZE,
            metadata_size: METADATA_SIZE,
            tracker_size: TRACKER_SIZE,
            data_size,
            block_size: BLOCK_SIZE,
        }
    }

    pub fn blocks_for(&self, len: usize) -> usize {
        len.div_ceil(self.block_size)
    }
}

impl Default for CapacityPlan {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_plan_leaves_eight_megabytes_for_data() {
        let plan = CapacityPlan::standard();
        assert_eq!(plan.data_size, 8 * 1024 * 1024);
        assert_eq!(
            plan.disk_size,
            plan.data_size + plan.metadata_size + plan.tracker_size
        );
    }

    #[test]
    fn blocks_round_up() {
        let plan = CapacityPlan::standard();
        assert_eq!(plan.blocks_for(0), 0);
        assert_eq!(plan.blocks_for(1), 1);
        assert_eq!(plan.blocks_for(512), 1);
        assert_eq!(plan.blocks_for(513), 2);
    }
}
