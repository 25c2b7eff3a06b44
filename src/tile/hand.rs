use super::counts::TileCounts;
use super::tile::Tile;
use crate::error::ValidationError;
use smallvec::SmallVec;
use std::collections::HashMap;

/// 手牌（暗牌多重集合）
///
/// 使用 HashMap 存储每张牌的数量，支持 O(1) 的添加、移除和查询操作
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// 牌的数量映射：Tile -> 数量（1-4）
    tiles: HashMap<Tile, u8>,
    /// 总牌数（用于快速查询）
    total_count: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
            total_count: 0,
        }
    }

    /// 从一组牌创建手牌，非法牌和超过 4 张的部分被忽略
    pub fn from_tiles<'a, I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        let mut hand = Self::new();
        for tile in tiles {
            hand.add_tile(*tile);
        }
        hand
    }

    /// 从一组牌创建手牌，遇到非法牌或第 5 张时报错
    pub fn try_from_tiles(tiles: &[Tile]) -> Result<Self, ValidationError> {
        let mut hand = Self::new();
        for &tile in tiles {
            if !tile.is_valid() {
                return Err(ValidationError::InvalidRank { suit: tile.suit(), rank: tile.rank() });
            }
            if !hand.add_tile(tile) {
                let count = tiles.iter().filter(|&&t| t == tile).count();
                return Err(ValidationError::TooManyCopies { tile, count });
            }
        }
        Ok(hand)
    }

    /// 添加一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功添加
    /// - `false`：点数非法，或该牌已有 4 张
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        if !tile.is_valid() {
            return false;
        }
        let count = self.tiles.entry(tile).or_insert(0);
        if *count >= Tile::COPIES {
            return false;
        }
        *count += 1;
        self.total_count += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.total_count -= 1;
                if *count == 0 {
                    self.tiles.remove(&tile);
                }
                true
            }
            _ => false,
        }
    }

    /// 移除 `n` 张同样的牌，不够时不做任何修改并返回 false
    pub fn remove_n(&mut self, tile: Tile, n: u8) -> bool {
        if self.tile_count(tile) < n {
            return false;
        }
        for _ in 0..n {
            self.remove_tile(tile);
        }
        true
    }

    /// 检查是否有某张牌
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某张牌的数量
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.tiles.get(&tile).copied().unwrap_or(0)
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 转换为排序后的牌向量
    ///
    /// 排序规则：先按花色（万、条、筒、字），再按数字
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        self.counts().to_sorted_vec()
    }

    /// 转换为定长计数表（胡牌回溯使用）
    pub fn counts(&self) -> TileCounts {
        let mut counts = TileCounts::new();
        for (tile, &count) in &self.tiles {
            counts.add_n(*tile, count);
        }
        counts
    }

    /// 检查手牌是否为空
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 获取所有不同的牌（按排序顺序）
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 14]> {
        let mut result: SmallVec<[Tile; 14]> = self.tiles.keys().copied().collect();
        result.sort();
        result
    }

    /// 获取所有牌的数量映射
    pub fn tiles_map(&self) -> &HashMap<Tile, u8> {
        &self.tiles
    }

    /// 返回添加一张牌后的副本
    pub fn with_tile(&self, tile: Tile) -> Hand {
        let mut hand = self.clone();
        hand.add_tile(tile);
        hand
    }

    /// 返回移除一张牌后的副本
    pub fn without_tile(&self, tile: Tile) -> Hand {
        let mut hand = self.clone();
        hand.remove_tile(tile);
        hand
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_creation() {
        let hand = Hand::new();
        assert!(hand.is_empty());
        assert_eq!(hand.total_count(), 0);
    }

    #[test]
    fn test_hand_add_multiple() {
        let mut hand = Hand::new();
        let tile = Tile::Zi(Tile::ZHONG);

        // 添加 4 张相同的牌
        for _ in 0..4 {
            assert!(hand.add_tile(tile));
        }
        assert_eq!(hand.tile_count(tile), 4);

        // 第 5 张应该失败
        assert!(!hand.add_tile(tile));
        assert_eq!(hand.total_count(), 4);
    }

    #[test]
    fn test_invalid_tiles_rejected() {
        let mut hand = Hand::new();
        assert!(!hand.add_tile(Tile::Wan(10)));
        assert!(!hand.add_tile(Tile::Zi(8)));
        assert!(!hand.add_tile(Tile::Tong(0)));
        assert!(hand.is_empty());

        assert_eq!(
            Hand::try_from_tiles(&[Tile::Wan(1), Tile::Zi(8)]),
            Err(ValidationError::InvalidRank { suit: crate::tile::Suit::Zi, rank: 8 })
        );
        assert_eq!(
            Hand::try_from_tiles(&[Tile::Tiao(2); 5]),
            Err(ValidationError::TooManyCopies { tile: Tile::Tiao(2), count: 5 })
        );
        assert_eq!(Hand::try_from_tiles(&[Tile::Tiao(2); 4]).map(|h| h.total_count()), Ok(4));
    }

    #[test]
    fn test_hand_remove_tile() {
        let mut hand = Hand::new();
        let tile = Tile::Tong(3);

        assert!(!hand.remove_tile(tile));

        hand.add_tile(tile);
        assert!(hand.remove_tile(tile));
        assert_eq!(hand.total_count(), 0);
        assert!(!hand.has_tile(tile));
    }

    #[test]
    fn test_hand_remove_n() {
        let mut hand = Hand::from_tiles(&[Tile::Tiao(7), Tile::Tiao(7)]);
        assert!(!hand.remove_n(Tile::Tiao(7), 3));
        assert_eq!(hand.tile_count(Tile::Tiao(7)), 2);
        assert!(hand.remove_n(Tile::Tiao(7), 2));
        assert!(hand.is_empty());
    }

    #[test]
    fn test_hand_to_sorted_vec() {
        let mut hand = Hand::new();

        // 乱序添加
        hand.add_tile(Tile::Zi(1));
        hand.add_tile(Tile::Tong(5));
        hand.add_tile(Tile::Wan(3));
        hand.add_tile(Tile::Tiao(1));
        hand.add_tile(Tile::Tong(5));

        let sorted = hand.to_sorted_vec();
        assert_eq!(
            sorted,
            vec![Tile::Wan(3), Tile::Tiao(1), Tile::Tong(5), Tile::Tong(5), Tile::Zi(1)]
        );
    }

    #[test]
    fn test_hand_distinct_tiles() {
        let hand = Hand::from_tiles(&[Tile::Tong(2), Tile::Wan(1), Tile::Wan(1), Tile::Tiao(3)]);
        let distinct = hand.distinct_tiles();
        assert_eq!(distinct.as_slice(), &[Tile::Wan(1), Tile::Tiao(3), Tile::Tong(2)]);
    }

    #[test]
    fn test_with_and_without() {
        let hand = Hand::from_tiles(&[Tile::Wan(1)]);
        let more = hand.with_tile(Tile::Wan(2));
        assert_eq!(more.total_count(), 2);
        assert_eq!(hand.total_count(), 1);
        assert!(more.without_tile(Tile::Wan(1)).has_tile(Tile::Wan(2)));
    }
}
