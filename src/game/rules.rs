use crate::game::meld::Meld;
use crate::tile::win_check::{Group, Partition};
use crate::tile::{Suit, Tile};

/// 胡牌规则
///
/// 回溯拆牌只负责找出"4 组 + 1 对"或七对；本地规则的附加条件通过此 trait 叠加，
/// 替换规则变体时不需要改动拆牌算法。
pub trait WinRules {
    /// 针对全部 14 张牌（暗牌 + 牌组）的构成条件
    fn accepts_composition(&self, tiles: &[Tile]) -> bool;

    /// 针对某一种拆法的条件
    fn accepts_partition(&self, partition: &Partition, melds: &[Meld]) -> bool;

    /// 是否允许七对
    fn allows_seven_pairs(&self, melds: &[Meld]) -> bool {
        melds.is_empty()
    }
}

/// 长春麻将规则
///
/// - 三门齐：万、条、筒必须都有
/// - 有幺九：至少一张 1、9 或字牌
/// - 有刻：至少一个刻子或杠；没有时对子为中发白之一也可以
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangchunRules;

impl WinRules for ChangchunRules {
    fn accepts_composition(&self, tiles: &[Tile]) -> bool {
        has_three_suits(tiles) && has_terminal_or_honor(tiles)
    }

    fn accepts_partition(&self, partition: &Partition, melds: &[Meld]) -> bool {
        has_triplet_seed(partition, melds)
    }
}

/// 无附加条件的基本胡牌规则
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl WinRules for StandardRules {
    fn accepts_composition(&self, _tiles: &[Tile]) -> bool {
        true
    }

    fn accepts_partition(&self, _partition: &Partition, _melds: &[Meld]) -> bool {
        true
    }
}

/// 三门齐：万、条、筒各至少一张
pub fn has_three_suits(tiles: &[Tile]) -> bool {
    let mut seen = [false; 3];
    for tile in tiles {
        if tile.is_number() {
            seen[tile.suit() as usize] = true;
        }
    }
    seen.iter().all(|&s| s)
}

/// 有幺九：至少一张 1、9 或字牌
pub fn has_terminal_or_honor(tiles: &[Tile]) -> bool {
    tiles.iter().any(|t| t.is_terminal_or_honor())
}

/// 有刻：牌组中有碰/杠，或拆法中有刻子，或对子是三元牌
pub fn has_triplet_seed(partition: &Partition, melds: &[Meld]) -> bool {
    melds.iter().any(|m| m.kind().is_triplet_like())
        || partition.groups.iter().any(|g| matches!(g, Group::Triplet { .. }))
        || partition.pair.is_dragon()
}

/// 某花色在牌组中是否出现
pub fn suit_in_melds(suit: Suit, melds: &[Meld]) -> bool {
    melds.iter().any(|m| m.anchor().suit() == suit)
}
