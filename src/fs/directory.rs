// 一条文件记录：文件名 + 在数据区中的起始偏移 + 字节长度
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub start_address: usize,
    pub size: usize,
}

impl FileRecord {
    pub fn new(name: &str, start_address: usize, size: usize) -> Self {
        Self {
            name: name.to_string(),
            start_address,
            size,
        }
    }

    pub fn end_address(&self) -> usize {
        self.start_address + self.size
    }
}

/// 扁平目录：按创建顺序保存文件记录，允许重名，查找时取第一个匹配项
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: Vec<FileRecord>,
}

impl Directory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, record: FileRecord) {
        self.entries.push(record);
    }

    pub fn find(&self, name: &str) -> Option<&FileRecord> {
        self.entries.iter().find(|record| record.name == name)
    }

    // 删除第一个同名记录并返回
    pub fn remove(&mut self, name: &str) -> Option<FileRecord> {
        let idx = self.entries.iter().position(|record| record.name == name)?;
        Some(self.entries.remove(idx))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// (文件名, 大小) 快照
    pub fn list(&self) -> Vec<(String, usize)> {
        self.entries
            .iter()
            .map(|record| (record.name.clone(), record.size))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.entries.iter()
    }
}
