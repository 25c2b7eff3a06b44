use super::constants::{COMPLETE_HAND_SIZE, WAITING_HAND_SIZE};
use super::hand_state::HandState;
use super::kong::{KongHandler, QuadForm};
use super::meld::Meld;
use super::rules::{ChangchunRules, WinRules};
use crate::error::ValidationError;
use crate::tile::{Hand, Tile, TileCounts, WinChecker};
use smallvec::SmallVec;

/// 听牌集合：每种和牌张及其剩余实体张数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outs {
    entries: SmallVec<[(Tile, u8); 8]>,
}

impl Outs {
    /// 和牌张（按排序顺序）
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    /// (和牌张, 剩余张数)
    pub fn entries(&self) -> &[(Tile, u8)] {
        &self.entries
    }

    /// 剩余和牌张总数
    pub fn total_remaining(&self) -> usize {
        self.entries.iter().map(|(_, n)| *n as usize).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.entries.iter().any(|(t, _)| *t == tile)
    }

    /// 某张和牌的剩余数量（不在听牌集合中为 0）
    pub fn remaining(&self, tile: Tile) -> u8 {
        self.entries
            .iter()
            .find(|(t, _)| *t == tile)
            .map_or(0, |(_, n)| *n)
    }
}

/// 听牌分析器
///
/// 所有方法只读取输入并在本地复制，不修改手牌
#[derive(Debug, Clone, Default)]
pub struct TenpaiAnalyzer<R: WinRules = ChangchunRules> {
    checker: WinChecker<R>,
}

impl TenpaiAnalyzer<ChangchunRules> {
    pub fn new() -> Self {
        Self { checker: WinChecker::new() }
    }
}

impl<R: WinRules> TenpaiAnalyzer<R> {
    /// 使用自定义的胡牌判定器
    pub fn with_checker(checker: WinChecker<R>) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> &WinChecker<R> {
        &self.checker
    }

    /// 只看自己的牌时的和牌张
    ///
    /// 手牌必须是 13 张（逻辑张数），否则返回空；自己已持有 4 张的牌不算
    pub fn waits(&self, hand: &Hand, melds: &[Meld]) -> SmallVec<[Tile; 8]> {
        let own = own_counts(hand, melds);
        let outs = self.collect_outs(hand, melds, &own);
        outs.tiles().collect()
    }

    /// 计算听牌集合
    ///
    /// # 参数
    ///
    /// - `hand`: 暗牌（13 张逻辑牌）
    /// - `melds`: 自己的牌组
    /// - `table`: 自己以外可见的牌（牌河 + 其他家的牌组）
    ///
    /// 可见张数（自己 + `table`）达到 4 的牌不计入
    pub fn compute_outs(&self, hand: &Hand, melds: &[Meld], table: &TileCounts) -> Outs {
        let mut visible = own_counts(hand, melds);
        visible.merge(table);
        self.collect_outs(hand, melds, &visible)
    }

    /// 以已合并好的可见计数计算听牌集合
    pub fn outs_given_visible(&self, hand: &Hand, melds: &[Meld], visible: &TileCounts) -> Outs {
        self.collect_outs(hand, melds, visible)
    }

    fn collect_outs(&self, hand: &Hand, melds: &[Meld], visible: &TileCounts) -> Outs {
        let mut outs = Outs::default();
        if logical_count(hand, melds) != WAITING_HAND_SIZE {
            return outs;
        }
        for tile in Tile::all_kinds() {
            let seen = visible.get(tile);
            if seen >= Tile::COPIES {
                continue;
            }
            if self.checker.is_winning_hand(&hand.with_tile(tile), melds) {
                outs.entries.push((tile, Tile::COPIES - seen));
            }
        }
        outs
    }

    /// 是否听牌
    ///
    /// - 13 张：存在和牌张
    /// - 14 张：打出某一张后听牌
    pub fn is_tenpai(&self, hand: &Hand, melds: &[Meld]) -> bool {
        match logical_count(hand, melds) {
            WAITING_HAND_SIZE => !self.waits(hand, melds).is_empty(),
            COMPLETE_HAND_SIZE => hand
                .distinct_tiles()
                .into_iter()
                .any(|t| !self.waits(&hand.without_tile(t), melds).is_empty()),
            _ => false,
        }
    }

    /// 打出后仍听牌的牌（去重、排序），仅对 14 张手牌有意义
    pub fn tenpai_discards(&self, hand: &Hand, melds: &[Meld]) -> Vec<Tile> {
        if logical_count(hand, melds) != COMPLETE_HAND_SIZE {
            return Vec::new();
        }
        hand.distinct_tiles()
            .into_iter()
            .filter(|t| !self.waits(&hand.without_tile(*t), melds).is_empty())
            .collect()
    }

    /// 杠牌是否会改变和牌张
    ///
    /// - 明杠：`hand` 为 13 张，别人打出第四张
    /// - 暗杠 / 补杠：`hand` 为 14 张（刚摸到第四张），比较基准是少一张杠牌的手牌
    ///
    /// 原本不听牌时返回 `Ok(false)`
    pub fn quad_changes_wait(
        &self,
        hand: &Hand,
        melds: &[Meld],
        tile: Tile,
        form: QuadForm,
    ) -> Result<bool, ValidationError> {
        let logical = logical_count(hand, melds);
        let expected = match form {
            QuadForm::Exposed => WAITING_HAND_SIZE,
            QuadForm::Concealed | QuadForm::Added => COMPLETE_HAND_SIZE,
        };
        if logical != expected {
            return Err(ValidationError::InvalidTileCount { logical, expected });
        }

        let baseline = match form {
            QuadForm::Exposed => hand.clone(),
            QuadForm::Concealed | QuadForm::Added => {
                if !hand.has_tile(tile) {
                    return Err(ValidationError::MissingTiles { tile, needed: 1, held: 0 });
                }
                hand.without_tile(tile)
            }
        };
        let before = self.waits(&baseline, melds);
        if before.is_empty() {
            return Ok(false);
        }

        let state = HandState { hand: hand.clone(), melds: melds.to_vec() };
        let after_state = KongHandler::after_kong(&state, tile, form, None)?;
        let after = self.waits(&after_state.hand, &after_state.melds);
        Ok(before != after)
    }

    /// `quad_changes_wait` 的简化形式：只区分暗杠与明杠，输入不合法时返回 false
    pub fn would_quad_change_wait(&self, hand: &Hand, melds: &[Meld], tile: Tile, is_concealed: bool) -> bool {
        let form = if is_concealed { QuadForm::Concealed } else { QuadForm::Exposed };
        self.quad_changes_wait(hand, melds, tile, form).unwrap_or(false)
    }
}

fn logical_count(hand: &Hand, melds: &[Meld]) -> usize {
    hand.total_count() + melds.iter().map(Meld::logical_size).sum::<usize>()
}

fn own_counts(hand: &Hand, melds: &[Meld]) -> TileCounts {
    let mut counts = hand.counts();
    for meld in melds {
        for tile in meld.tiles() {
            counts.add(*tile);
        }
    }
    counts
}
