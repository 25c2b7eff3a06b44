use super::constants::{COMPLETE_HAND_SIZE, MAX_MELDS, WAITING_HAND_SIZE};
use super::meld::{Meld, MeldKind};
use crate::error::ValidationError;
use crate::tile::{Hand, Tile, TileCounts, WinChecker};

/// 一个座位的牌：暗牌 + 已形成的牌组
///
/// 引擎只读取 `HandState`；摸牌、打牌、吃碰杠对它的修改由调用方完成
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandState {
    /// 暗牌
    pub hand: Hand,
    /// 牌组（按形成顺序）
    pub melds: Vec<Meld>,
}

impl HandState {
    /// 创建空状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 从暗牌和牌组创建，校验牌组数与每种牌的张数
    pub fn from_parts(hand: Hand, melds: Vec<Meld>) -> Result<Self, ValidationError> {
        let state = Self { hand, melds };
        state.validate_structure()?;
        Ok(state)
    }

    /// 逻辑张数：暗牌数 + 3 × 牌组数（杠按 3 张计）
    pub fn logical_count(&self) -> usize {
        self.hand.total_count() + self.melds.iter().map(Meld::logical_size).sum::<usize>()
    }

    /// 牌组数不超过 4，所有牌点数合法，任何一种牌（暗牌 + 牌组）不超过 4 张
    pub fn validate_structure(&self) -> Result<(), ValidationError> {
        if self.melds.len() > MAX_MELDS {
            return Err(ValidationError::TooManyMelds(self.melds.len()));
        }
        let hand_tiles = self.hand.tiles_map().keys();
        let meld_tiles = self.melds.iter().flat_map(|m| m.tiles().iter());
        if let Some(tile) = hand_tiles.chain(meld_tiles).find(|t| !t.is_valid()) {
            return Err(ValidationError::InvalidRank { suit: tile.suit(), rank: tile.rank() });
        }
        let counts = self.physical_counts();
        for (tile, count) in counts.distinct() {
            if count > Tile::COPIES {
                return Err(ValidationError::TooManyCopies { tile, count: count as usize });
            }
        }
        Ok(())
    }

    /// 可判胡的完整手牌（14 张）
    pub fn validate_complete(&self) -> Result<(), ValidationError> {
        self.validate_logical(COMPLETE_HAND_SIZE)
    }

    /// 等牌中的手牌（13 张）
    pub fn validate_waiting(&self) -> Result<(), ValidationError> {
        self.validate_logical(WAITING_HAND_SIZE)
    }

    fn validate_logical(&self, expected: usize) -> Result<(), ValidationError> {
        self.validate_structure()?;
        let logical = self.logical_count();
        if logical != expected {
            return Err(ValidationError::InvalidTileCount { logical, expected });
        }
        Ok(())
    }

    /// 暗牌和牌组中的全部实体牌（杠为 4 张）
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.hand.to_sorted_vec();
        for meld in &self.melds {
            tiles.extend_from_slice(meld.tiles());
        }
        tiles
    }

    /// 自己可见的牌的计数（暗牌 + 牌组）
    pub fn physical_counts(&self) -> TileCounts {
        let mut counts = self.hand.counts();
        for meld in &self.melds {
            for tile in meld.tiles() {
                counts.add(*tile);
            }
        }
        counts
    }

    /// 牌组中是否已有碰或杠
    pub fn has_triplet_meld(&self) -> bool {
        self.melds.iter().any(|m| m.kind().is_triplet_like())
    }

    /// 门清：没有吃、碰、明杠、补杠（暗杠不影响）
    pub fn is_concealed(&self) -> bool {
        self.melds.iter().all(|m| m.kind() == MeldKind::ConcealedQuad)
    }

    /// 按锚牌排序的牌组，用于显示
    pub fn sorted_melds(&self) -> Vec<&Meld> {
        let mut melds: Vec<&Meld> = self.melds.iter().collect();
        melds.sort_by_key(|m| m.anchor());
        melds
    }

    /// 加入一张牌后的副本（摸牌或他人打出的牌）
    pub fn with_tile(&self, tile: Tile) -> HandState {
        Self {
            hand: self.hand.with_tile(tile),
            melds: self.melds.clone(),
        }
    }

    /// 按长春规则判胡，先校验 14 张
    ///
    /// 牌数不对返回 `Err(InvalidTileCount)`；格式正确但不能胡返回 `Ok(false)`
    pub fn check_win(&self) -> Result<bool, ValidationError> {
        self.validate_complete()?;
        Ok(WinChecker::new().is_winning_hand(&self.hand, &self.melds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::parse_tiles;

    fn state(notation: &str, melds: Vec<Meld>) -> HandState {
        HandState::from_parts(Hand::from_tiles(&parse_tiles(notation).unwrap()), melds).unwrap()
    }

    #[test]
    fn test_logical_count_quad_as_three() {
        let s = state("456s456789p22p", vec![Meld::concealed_quad(Tile::Wan(9)).unwrap()]);
        assert_eq!(s.logical_count(), 14);
        assert_eq!(s.all_tiles().len(), 15);
        assert!(s.validate_complete().is_ok());
        assert!(s.is_concealed());
        assert!(s.has_triplet_meld());
    }

    #[test]
    fn test_check_win_validates_count() {
        let s = state("12322m456s55789p", vec![]);
        assert_eq!(
            s.check_win(),
            Err(ValidationError::InvalidTileCount { logical: 13, expected: 14 })
        );
        assert!(s.validate_waiting().is_ok());
        assert_eq!(s.with_tile(Tile::Tong(5)).check_win(), Ok(true));
        assert_eq!(s.with_tile(Tile::Zi(1)).check_win(), Ok(false));
    }

    #[test]
    fn test_out_of_range_tiles_never_count() {
        // 10 万不能被当作 1 条凑成对子
        let mut hand = Hand::from_tiles(&parse_tiles("123m456s789p555z").unwrap());
        assert!(!hand.add_tile(Tile::Wan(10)));
        assert!(!hand.add_tile(Tile::Wan(10)));
        let s = HandState::from_parts(hand, vec![]).unwrap();
        assert_eq!(
            s.check_win(),
            Err(ValidationError::InvalidTileCount { logical: 12, expected: 14 })
        );
        assert!(!WinChecker::new().is_winning_hand(&s.with_tile(Tile::Wan(10)).hand, &[]));

        // 8z 不会越界
        let s = state("123m456s789p555z1z", vec![]);
        assert!(s.with_tile(Tile::Zi(8)).validate_structure().is_ok());
        assert_eq!(s.with_tile(Tile::Zi(8)).logical_count(), 13);

        let tiles = [parse_tiles("123m456s789p555z").unwrap(), vec![Tile::Wan(10); 2]].concat();
        assert_eq!(
            Hand::try_from_tiles(&tiles),
            Err(ValidationError::InvalidRank { suit: crate::tile::Suit::Wan, rank: 10 })
        );
        assert_eq!(
            Meld::triplet(Tile::Zi(8), Some(1)),
            Err(ValidationError::InvalidRank { suit: crate::tile::Suit::Zi, rank: 8 })
        );
    }

    #[test]
    fn test_too_many_copies() {
        let hand = Hand::from_tiles(&parse_tiles("55z").unwrap());
        let melds = vec![Meld::triplet(Tile::Zi(5), Some(1)).unwrap()];
        assert_eq!(
            HandState::from_parts(hand, melds),
            Err(ValidationError::TooManyCopies { tile: Tile::Zi(5), count: 5 })
        );
    }

    #[test]
    fn test_too_many_melds() {
        let melds = vec![Meld::triplet(Tile::Wan(1), None).unwrap(); 5];
        assert_eq!(
            HandState::from_parts(Hand::new(), melds),
            Err(ValidationError::TooManyMelds(5))
        );
    }

    #[test]
    fn test_sorted_melds_and_concealed() {
        let s = state(
            "11z",
            vec![
                Meld::triplet(Tile::Tong(3), Some(1)).unwrap(),
                Meld::sequence(Tile::Wan(7), Some(3)).unwrap(),
            ],
        );
        let anchors: Vec<Tile> = s.sorted_melds().iter().map(|m| m.anchor()).collect();
        assert_eq!(anchors, vec![Tile::Wan(7), Tile::Tong(3)]);
        assert!(!s.is_concealed());
    }
}
