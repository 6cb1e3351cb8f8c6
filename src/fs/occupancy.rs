/// 数据区占用表：每个字节一个标记，true = 空闲，false = 已占用
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    free: Vec<bool>,   // 每个字节偏移是否空闲
    free_bytes: usize, // 当前空闲字节数
}

impl OccupancyMap {
    pub fn new(size: usize) -> Self {
        Self {
            free: vec![true; size],
            free_bytes: size,
        }
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn is_free(&self, offset: usize) -> bool {
        self.free[offset]
    }

    pub fn free_bytes(&self) -> usize {
        self.free_bytes
    }

    pub fn used_bytes(&self) -> usize {
        self.free.len() - self.free_bytes
    }

    // 把 [start, start + length) 标记为占用或空闲
    // 越界属于调用方的编程错误，范围只来自成功的分配
    pub fn mark_range(&mut self, start: usize, length: usize, occupied: bool) {
        debug_assert!(start + length <= self.free.len(), "range out of bounds");

        let target = !occupied;
        let mut changed = 0;
        for slot in &mut self.free[start..start + length] {
            if *slot != target {
                *slot = target;
                changed += 1;
            }
        }

        if occupied {
            self.free_bytes -= changed;
        } else {
            self.free_bytes += changed;
        }
    }

    // 全部标记为空闲
    pub fn reset(&mut self) {
        self.free.fill(true);
        self.free_bytes = self.free.len();
    }

    pub(crate) fn as_slice(&self) -> &[bool] {
        &self.free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_all_free() {
        let map = OccupancyMap::new(64);
        assert_eq!(map.len(), 64);
        assert_eq!(map.free_bytes(), 64);
        assert!((0..64).all(|i| map.is_free(i)));
    }

    #[test]
    fn mark_range_updates_counts() {
        let mut map = OccupancyMap::new(64);
        map.mark_range(10, 5, true);
        assert_eq!(map.free_bytes(), 59);
        assert!(map.is_free(9));
        assert!(!map.is_free(10));
        assert!(!map.is_free(14));
        assert!(map.is_free(15));

        // 重复标记不应重复计数
        map.mark_range(12, 8, true);
        assert_eq!(map.used_bytes(), 10);

        map.mark_range(10, 10, false);
        assert_eq!(map.free_bytes(), 64);
    }

    #[test]
    fn zero_length_range_is_noop() {
        let mut map = OccupancyMap::new(8);
        map.mark_range(8, 0, true);
        assert_eq!(map.free_bytes(), 8);
    }

    #[test]
    fn reset_frees_everything() {
        let mut map = OccupancyMap::new(32);
        map.mark_range(0, 32, true);
        assert_eq!(map.free_bytes(), 0);
        map.reset();
        assert_eq!(map.free_bytes(), 32);
        assert!(map.is_free(31));
    }
}
