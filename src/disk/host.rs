use std::{
    fs,
    io::Result,
    path::{Path, PathBuf},
};

/// 宿主文件系统：import 从这里读，export 往这里写
pub trait HostFs: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// 本地磁盘实现，相对路径基于 root 目录解析（默认为进程当前目录）
#[derive(Debug, Clone)]
pub struct LocalHostFs {
    root: PathBuf,
}

impl LocalHostFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        // 绝对路径 join 之后仍是它自己
        self.root.join(path)
    }
}

impl HostFs for LocalHostFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(self.resolve(path), bytes)
    }
}
