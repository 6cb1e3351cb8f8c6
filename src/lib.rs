//! # VDisk
//!
//! 单进程内模拟的小容量磁盘：一块固定大小的字节缓冲充当数据区，
//! 首次适配分配器在其中为命名文件划出连续区域。
//!
//! ```text
//!   shell (reedline)  ──>  VirtualFs ──┬── Directory     文件记录
//!                              │        ├── OccupancyMap  字节占用表
//!                              │        └── DataArea      文件内容
//!                              └──> HostFs  (import / export)
//! ```

pub mod disk;
pub mod fs;
pub mod shell;
pub mod utils;

pub use disk::{HostFs, LocalHostFs};
pub use fs::{
    config::CapacityPlan,
    directory::FileRecord,
    error::{FsError, HostOp, Result},
    Usage, VirtualFs,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
