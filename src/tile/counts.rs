use super::tile::Tile;
use crate::error::ValidationError;

/// 定长计数表：34 种牌各自的张数
///
/// `Copy` 语义，回溯分支时直接按值复制，各分支互不干扰
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCounts([u8; Tile::KIND_COUNT]);

impl TileCounts {
    /// 创建空计数表
    pub fn new() -> Self {
        Self([0; Tile::KIND_COUNT])
    }

    /// 从一组牌统计
    pub fn from_tiles<'a, I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        let mut counts = Self::new();
        for tile in tiles {
            counts.add(*tile);
        }
        counts
    }

    /// 合法牌的槽位；点数越界的牌没有槽位
    #[inline]
    fn slot(tile: Tile) -> Option<usize> {
        if tile.is_valid() {
            Some(tile.kind_index())
        } else {
            None
        }
    }

    /// 增加一张（饱和在 255，不做 4 张上限检查；非法牌忽略）
    #[inline]
    pub fn add(&mut self, tile: Tile) {
        self.add_n(tile, 1);
    }

    /// 增加 `n` 张
    pub fn add_n(&mut self, tile: Tile, n: u8) {
        if let Some(index) = Self::slot(tile) {
            let slot = &mut self.0[index];
            *slot = slot.saturating_add(n);
        }
    }

    /// 移除一张，没有时返回 false
    #[inline]
    pub fn remove(&mut self, tile: Tile) -> bool {
        let slot = match Self::slot(tile) {
            Some(index) => &mut self.0[index],
            None => return false,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// 查询某种牌的张数，非法牌为 0
    #[inline]
    pub fn get(&self, tile: Tile) -> u8 {
        Self::slot(tile).map_or(0, |index| self.0[index])
    }

    /// 按索引查询
    #[inline]
    pub fn get_index(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// 按索引减少 `n` 张（调用方保证足够）
    #[inline]
    pub(crate) fn take_index(&mut self, index: usize, n: u8) {
        self.0[index] -= n;
    }

    /// 总张数
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// 第一个非零的种类索引
    #[inline]
    pub fn first_nonzero(&self) -> Option<usize> {
        self.0.iter().position(|&c| c > 0)
    }

    /// 张数大于零的所有牌（按排序顺序）
    pub fn distinct(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .filter_map(|(i, &c)| Tile::from_kind_index(i).map(|t| (t, c)))
    }

    /// 展开为排序后的牌向量
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total());
        for (tile, count) in self.distinct() {
            for _ in 0..count {
                result.push(tile);
            }
        }
        result
    }

    /// 合并另一张计数表
    pub fn merge(&mut self, other: &TileCounts) {
        for (slot, &c) in self.0.iter_mut().zip(other.0.iter()) {
            *slot = slot.saturating_add(c);
        }
    }

    /// 校验 136 张牌的构成：34 种牌每种恰好 4 张
    ///
    /// 调用方把牌墙、各家手牌、牌河和所有牌组合并后调用
    pub fn verify_full_set(&self) -> Result<(), ValidationError> {
        for (index, &count) in self.0.iter().enumerate() {
            if count != Tile::COPIES {
                if let Some(tile) = Tile::from_kind_index(index) {
                    return Err(ValidationError::CompositionMismatch { tile, count });
                }
            }
        }
        Ok(())
    }
}

impl Default for TileCounts {
    fn default() -> Self {
        Self::new()
    }
}
