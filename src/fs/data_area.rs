/// 模拟磁盘数据区的字节缓冲，大小固定，创建后不再改变
#[derive(Debug, Clone)]
pub struct DataArea {
    bytes: Vec<u8>,
}

impl DataArea {
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0u8; size], // 扁平化存储
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    // 调用方保证 offset + buf.len() 不越界
    pub fn write_at(&mut self, offset: usize, buf: &[u8]) {
        self.bytes[offset..offset + buf.len()].copy_from_slice(buf);
    }

    pub fn read_at(&self, offset: usize, len: usize) -> &[u8] {
        &self.bytes[offset..offset + len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_area_is_zeroed() {
        let area = DataArea::new(16);
        assert_eq!(area.len(), 16);
        assert!(area.read_at(0, 16).iter().all(|&b| b == 0));
    }

    #[test]
    fn write_then_read_slice() {
        let mut area = DataArea::new(16);
        area.write_at(4, b"disk");
        assert_eq!(area.read_at(4, 4), b"disk");
        assert_eq!(area.read_at(3, 1), &[0]);
        assert_eq!(area.read_at(8, 1), &[0]);
    }
}
