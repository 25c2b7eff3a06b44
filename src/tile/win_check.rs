use super::{Hand, Suit, Tile, TileCounts};
use crate::game::meld::Meld;
use crate::game::rules::{ChangchunRules, WinRules};
use smallvec::SmallVec;

/// 胡牌判定结果
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinResult {
    /// 是否胡牌
    pub is_win: bool,
    /// 胡牌类型
    pub win_type: WinType,
    /// 对子（七对时为 None）
    pub pair: Option<Tile>,
    /// 暗牌中拆出的顺子/刻子
    pub groups: SmallVec<[Group; 4]>,
}

impl WinResult {
    fn not_win() -> Self {
        Self {
            is_win: false,
            win_type: WinType::Standard,
            pair: None,
            groups: SmallVec::new(),
        }
    }
}

/// 胡牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinType {
    /// 基本胡牌型：(4 - 牌组数) 组 + 1 对
    Standard,
    /// 七对（不能有牌组）
    SevenPairs,
}

/// 暗牌中的一组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// 顺子（连续三张牌）
    Sequence { suit: Suit, start: u8 },
    /// 刻子（三张相同牌）
    Triplet { tile: Tile },
}

impl Group {
    /// 以 `tile` 为中张的顺子
    pub fn has_middle(&self, tile: Tile) -> bool {
        match self {
            Group::Sequence { suit, start } => *suit == tile.suit() && start + 1 == tile.rank(),
            Group::Triplet { .. } => false,
        }
    }
}

/// 一种拆法：一个对子加若干组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub pair: Tile,
    pub groups: SmallVec<[Group; 4]>,
}

/// 胡牌判定器
///
/// 无内部可变状态，可在多线程中共享；附加规则由 `R` 决定
#[derive(Debug, Clone, Default)]
pub struct WinChecker<R: WinRules = ChangchunRules> {
    rules: R,
}

impl WinChecker<ChangchunRules> {
    /// 使用长春麻将规则
    pub fn new() -> Self {
        Self { rules: ChangchunRules }
    }
}

impl<R: WinRules> WinChecker<R> {
    /// 使用自定义规则
    pub fn with_rules(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// 判定手牌是否胡牌
    ///
    /// # 算法
    ///
    /// 1. 牌数检查：`3 * 牌组数 + 暗牌数 == 14`，否则直接不胡
    /// 2. 整手牌的构成条件（三门齐、有幺九）
    /// 3. 七对（仅无牌组时）
    /// 4. 回溯拆牌：逐个尝试对子，剩余牌拆成 (4 - 牌组数) 组，每种拆法再过一遍规则
    ///
    /// # 参数
    ///
    /// - `hand`: 暗牌（已包含和牌张）
    /// - `melds`: 已吃/碰/杠的牌组
    pub fn check_win(&self, hand: &Hand, melds: &[Meld]) -> WinResult {
        if !self.precheck(hand, melds) {
            return WinResult::not_win();
        }

        let counts = hand.counts();
        if self.rules.allows_seven_pairs(melds) && is_seven_pairs(&counts) {
            return WinResult {
                is_win: true,
                win_type: WinType::SevenPairs,
                pair: None,
                groups: SmallVec::new(),
            };
        }

        let mut found = None;
        self.for_each_partition(&counts, melds, &mut |partition| {
            found = Some(partition);
            true
        });

        match found {
            Some(partition) => WinResult {
                is_win: true,
                win_type: WinType::Standard,
                pair: Some(partition.pair),
                groups: partition.groups,
            },
            None => WinResult::not_win(),
        }
    }

    /// 只返回是否胡牌
    #[inline]
    pub fn is_winning_hand(&self, hand: &Hand, melds: &[Meld]) -> bool {
        self.check_win(hand, melds).is_win
    }

    /// 列出所有满足规则的基本型拆法（不含七对）
    pub fn winning_partitions(&self, hand: &Hand, melds: &[Meld]) -> Vec<Partition> {
        let mut result = Vec::new();
        if !self.precheck(hand, melds) {
            return result;
        }
        self.for_each_partition(&hand.counts(), melds, &mut |partition| {
            result.push(partition);
            false
        });
        result
    }

    /// 牌数与整手牌构成检查
    fn precheck(&self, hand: &Hand, melds: &[Meld]) -> bool {
        let logical = hand.total_count() + melds.iter().map(Meld::logical_size).sum::<usize>();
        if melds.len() > 4 || logical != 14 {
            return false;
        }
        let mut all_tiles = hand.to_sorted_vec();
        for meld in melds {
            all_tiles.extend_from_slice(meld.tiles());
        }
        self.rules.accepts_composition(&all_tiles)
    }

    /// 枚举拆法，`visit` 返回 true 时停止；返回是否被提前停止
    fn for_each_partition(
        &self,
        counts: &TileCounts,
        melds: &[Meld],
        visit: &mut dyn FnMut(Partition) -> bool,
    ) -> bool {
        let needed = 4 - melds.len();
        for (pair, count) in counts.distinct() {
            if count < 2 {
                continue;
            }
            let mut rest = *counts;
            rest.take_index(pair.kind_index(), 2);

            let mut groups = SmallVec::new();
            let stopped = search_groups(rest, needed, &mut groups, &mut |groups| {
                let partition = Partition { pair, groups: groups.iter().copied().collect() };
                if self.rules.accepts_partition(&partition, melds) {
                    visit(partition)
                } else {
                    false
                }
            });
            if stopped {
                return true;
            }
        }
        false
    }
}

/// 七对：14 张且每种牌张数为偶数（四张相同算两对）
fn is_seven_pairs(counts: &TileCounts) -> bool {
    counts.total() == 14 && counts.distinct().all(|(_, c)| c % 2 == 0)
}

/// 递归回溯：把 `counts` 恰好拆成 `needed` 组
///
/// 每层取最小的一张，分别尝试作为刻子和顺子的起点；计数表按值复制，分支之间互不影响。
/// 拆完时调用 `visit`，其返回 true 表示停止搜索。
fn search_groups(
    counts: TileCounts,
    needed: usize,
    groups: &mut SmallVec<[Group; 4]>,
    visit: &mut dyn FnMut(&[Group]) -> bool,
) -> bool {
    let index = match counts.first_nonzero() {
        Some(index) => index,
        None => return needed == 0 && visit(groups.as_slice()),
    };
    if needed == 0 {
        return false;
    }
    let tile = match Tile::from_kind_index(index) {
        Some(tile) => tile,
        None => return false,
    };

    // 刻子
    if counts.get_index(index) >= 3 {
        let mut next = counts;
        next.take_index(index, 3);
        groups.push(Group::Triplet { tile });
        if search_groups(next, needed - 1, groups, visit) {
            return true;
        }
        groups.pop();
    }

    // 顺子（字牌不能组顺子）
    if tile.is_number()
        && tile.rank() <= 7
        && counts.get_index(index + 1) > 0
        && counts.get_index(index + 2) > 0
    {
        let mut next = counts;
        next.take_index(index, 1);
        next.take_index(index + 1, 1);
        next.take_index(index + 2, 1);
        groups.push(Group::Sequence { suit: tile.suit(), start: tile.rank() });
        if search_groups(next, needed - 1, groups, visit) {
            return true;
        }
        groups.pop();
    }

    false
}

/// 便捷函数：按长春规则检查是否胡牌
pub fn is_win(hand: &Hand, melds: &[Meld]) -> bool {
    WinChecker::new().is_winning_hand(hand, melds)
}

/// 便捷函数：按长春规则获取胡牌结果
pub fn check_win(hand: &Hand, melds: &[Meld]) -> WinResult {
    WinChecker::new().check_win(hand, melds)
}
