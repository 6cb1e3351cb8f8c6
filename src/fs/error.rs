use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// 宿主文件系统上的操作类型，用于区分 import 的读阶段和 export 的写阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    Read,
    Write,
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// 文件系统错误类型
#[derive(Debug, Error)]
pub enum FsError {
    // 内容比整个数据区还大
    #[error("File content ({size} bytes) exceeds the data region ({capacity} bytes)")]
    ContentTooLarge { size: usize, capacity: usize },

    // 总空闲可能足够，但没有足够长的连续空闲区
    #[error("Not enough contiguous space: need {requested} bytes, {free} bytes free in total")]
    InsufficientSpace { requested: usize, free: usize },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Host {op} failed for {}: {source}", path.display())]
    HostIo {
        op: HostOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Metadata file error: {0}")]
    Metadata(String),

    #[error("File system corrupted: {0}")]
    Corrupted(String),
}

impl FsError {
    pub fn host(op: HostOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::HostIo {
            op,
            path: path.into(),
            source,
        }
    }

    /// 是否是宿主文件系统边界上的失败
    pub fn is_host_error(&self) -> bool {
        matches!(self, Self::HostIo { .. })
    }
}

/// 文件系统统一结果类型
pub type Result<T> = std::result::Result<T, FsError>;
