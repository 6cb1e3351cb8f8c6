use crate::fs::occupancy::OccupancyMap;

/// 首次适配：从低地址往高地址扫描，返回第一段长度 >= length 的连续空闲区的起始偏移
///
/// 每次调用都线性扫描整个数据区，容量固定且较小，可以接受。
pub fn find_free_run(map: &OccupancyMap, length: usize) -> Option<usize> {
    if length == 0 {
        return Some(0);
    }

    let mut free_count = 0;
    for (offset, &free) in map.as_slice().iter().enumerate() {
        if free {
            free_count += 1;
            if free_count == length {
                return Some(offset + 1 - length); // 这段空闲区的起点
            }
        } else {
            free_count = 0;
        }
    }
    None
}

/// 最长的一段连续空闲区长度
pub fn largest_free_run(map: &OccupancyMap) -> usize {
    let mut largest = 0;
    let mut current = 0;
    for &free in map.as_slice() {
        if free {
            current += 1;
            largest = largest.max(current);
        } else {
            current = 0;
        }
    }
    largest
}
