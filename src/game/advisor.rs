use super::action::Action;
use super::hand_state::HandState;
use super::meld::Meld;
use super::ready::TenpaiAnalyzer;
use super::rules::suit_in_melds;
use crate::config::EngineConfig;
use crate::tile::{Hand, Suit, Tile, TileCounts};
use rand::seq::SliceRandom;
use rand::Rng;

/// 保留价值的各项权重
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdvisorWeights {
    /// 手中已有三张以上
    pub triplet: f64,
    /// 对子（还没有碰/杠时）
    pub pair_first: f64,
    pub dragon_pair_first: f64,
    /// 对子（已有碰/杠时）
    pub pair_after_triplet: f64,
    pub dragon_pair_after_triplet: f64,
    /// 唯一的幺九牌
    pub only_terminal: f64,
    /// 还有其他幺九牌
    pub extra_terminal: f64,
    /// 某门花色在手中只剩 3 / 2 / 1 张且牌组中没有
    pub suit_last_three: f64,
    pub suit_last_two: f64,
    pub suit_last_one: f64,
    /// 已在顺子中
    pub run: f64,
    /// 两面搭子
    pub open_wait: f64,
    /// 坎张搭子
    pub closed_wait: f64,
    /// 每张已可见的同种牌
    pub visible_copy_penalty: f64,
    /// 孤张字牌
    pub lone_honor_penalty: f64,
    /// 打出后听牌
    pub tenpai_penalty: f64,
    /// 打出后每张剩余和牌张
    pub tenpai_out_penalty: f64,
}

impl Default for AdvisorWeights {
    fn default() -> Self {
        Self {
            triplet: 100.0,
            pair_first: 150.0,
            dragon_pair_first: 180.0,
            pair_after_triplet: 40.0,
            dragon_pair_after_triplet: 150.0,
            only_terminal: 100.0,
            extra_terminal: 20.0,
            suit_last_three: 150.0,
            suit_last_two: 300.0,
            suit_last_one: 400.0,
            run: 80.0,
            open_wait: 25.0,
            closed_wait: 12.0,
            visible_copy_penalty: 5.0,
            lone_honor_penalty: 20.0,
            tenpai_penalty: 500.0,
            tenpai_out_penalty: 50.0,
        }
    }
}

/// 搭子类型，决定可用性要看哪些牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitShape {
    Side,
    Gap,
}

const TIE_EPSILON: f64 = 1e-9;

/// 出牌建议
///
/// 对手中每种牌计算保留价值，建议打出价值最低的一张；
/// 评分是确定的，只有同分时的选择使用随机源
#[derive(Debug, Clone)]
pub struct DiscardAdvisor {
    weights: AdvisorWeights,
    max_open_melds: usize,
    analyzer: TenpaiAnalyzer,
}

impl Default for DiscardAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscardAdvisor {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            max_open_melds: config.rules.max_open_melds,
            analyzer: TenpaiAnalyzer::new(),
        }
    }

    pub fn weights(&self) -> &AdvisorWeights {
        &self.weights
    }

    /// 每种牌的保留价值（按牌排序）
    ///
    /// # 参数
    ///
    /// - `hand`: 暗牌（通常为摸牌后的 14 张）
    /// - `own_melds`: 自己的牌组
    /// - `discards`: 全场牌河
    /// - `all_meld_tiles`: 全场牌组中的牌（含自己的）
    pub fn keep_values(
        &self,
        hand: &Hand,
        own_melds: &[Meld],
        discards: &[Tile],
        all_meld_tiles: &[Tile],
    ) -> Vec<(Tile, f64)> {
        if hand.is_empty() {
            return Vec::new();
        }

        let mut visible = TileCounts::from_tiles(discards);
        visible.merge(&TileCounts::from_tiles(all_meld_tiles));
        visible.merge(&hand.counts());

        let w = &self.weights;
        hand.distinct_tiles()
            .into_iter()
            .map(|tile| {
                let mut value = self.keep_value(tile, hand, &visible, own_melds);
                let remaining = hand.without_tile(tile);
                let outs = self
                    .analyzer
                    .outs_given_visible(&remaining, own_melds, &visible)
                    .total_remaining();
                if outs > 0 {
                    value -= w.tenpai_penalty + outs as f64 * w.tenpai_out_penalty;
                }
                (tile, value)
            })
            .collect()
    }

    /// 建议打出的牌，手牌为空时返回 None
    pub fn recommend_discard<G: Rng + ?Sized>(
        &self,
        hand: &Hand,
        own_melds: &[Meld],
        discards: &[Tile],
        all_meld_tiles: &[Tile],
        rng: &mut G,
    ) -> Option<Tile> {
        let values = self.keep_values(hand, own_melds, discards, all_meld_tiles);
        for (tile, value) in &values {
            crate::debug!("keep value {} = {:.2}", tile, value);
        }

        let min = values.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let candidates: Vec<Tile> = values
            .iter()
            .filter(|(_, v)| (*v - min).abs() < TIE_EPSILON)
            .map(|(t, _)| *t)
            .collect();
        let choice = candidates.choose(rng).copied();
        if let Some(tile) = choice {
            crate::debug!("discard {} (value {:.2}, {} tied)", tile, min, candidates.len());
        }
        choice
    }

    /// 是否声明吃/碰/杠/胡
    ///
    /// 能胡一定要；否则牌组已达上限时不再吃碰，以保持手牌灵活
    pub fn should_claim(&self, state: &HandState, tile: Tile, action: Action) -> bool {
        let wins = self
            .analyzer
            .checker()
            .is_winning_hand(&state.hand.with_tile(tile), &state.melds);
        if wins || action == Action::Win {
            return wins;
        }
        state.melds.len() < self.max_open_melds
    }

    fn keep_value(&self, tile: Tile, hand: &Hand, visible: &TileCounts, melds: &[Meld]) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;

        let has_triplet_meld = melds.iter().any(|m| m.kind().is_triplet_like());
        let count = hand.tile_count(tile);
        if count >= 3 {
            score += w.triplet;
        } else if count == 2 {
            score += match (has_triplet_meld, tile.is_dragon()) {
                (false, true) => w.dragon_pair_first,
                (false, false) => w.pair_first,
                (true, true) => w.dragon_pair_after_triplet,
                (true, false) => w.pair_after_triplet,
            };
        }

        // 有幺九
        if tile.is_terminal_or_honor() {
            let in_hand = hand
                .tiles_map()
                .iter()
                .filter(|(t, _)| t.is_terminal_or_honor())
                .map(|(_, &c)| c as usize)
                .sum::<usize>();
            let in_melds = melds
                .iter()
                .any(|m| m.tiles().iter().any(|t| t.is_terminal_or_honor()));
            score += if in_hand > 1 || in_melds {
                w.extra_terminal
            } else {
                w.only_terminal
            };
        }

        // 三门齐
        if tile.is_number() && !suit_in_melds(tile.suit(), melds) {
            score += match suit_count(hand, tile.suit()) {
                1 => w.suit_last_one,
                2 => w.suit_last_two,
                3 => w.suit_last_three,
                _ => 0.0,
            };
        }

        if tile.is_number() {
            let has = |offset: i8| tile.offset(offset).map_or(false, |t| hand.has_tile(t));
            if (has(-1) && has(1)) || (has(-2) && has(-1)) || (has(1) && has(2)) {
                score += w.run;
            }
            if has(-1) || has(1) {
                score += w.open_wait * availability(tile, hand, visible, WaitShape::Side);
            }
            if has(-2) || has(2) {
                score += w.closed_wait * availability(tile, hand, visible, WaitShape::Gap);
            }
        }
        if tile.is_honor() && count == 1 {
            score -= w.lone_honor_penalty;
        }

        score - visible.get(tile) as f64 * w.visible_copy_penalty
    }
}

fn suit_count(hand: &Hand, suit: Suit) -> usize {
    hand.tiles_map()
        .iter()
        .filter(|(t, _)| t.suit() == suit)
        .map(|(_, &c)| c as usize)
        .sum()
}

/// 搭子所需牌中尚未可见的比例（0 到 1），越界的牌视为 4 张都已可见
fn availability(tile: Tile, hand: &Hand, visible: &TileCounts, shape: WaitShape) -> f64 {
    let has = |offset: i8| tile.offset(offset).map_or(false, |t| hand.has_tile(t));
    let needed: &[i8] = match shape {
        WaitShape::Side if has(-1) => &[-2, 1],
        WaitShape::Side => &[-1, 2],
        WaitShape::Gap if has(-2) => &[-1],
        WaitShape::Gap => &[1],
    };

    let max_possible = needed.len() * Tile::COPIES as usize;
    let seen: usize = needed
        .iter()
        .map(|&offset| match tile.offset(offset) {
            Some(t) => visible.get(t) as usize,
            None => Tile::COPIES as usize,
        })
        .sum();
    (max_possible.saturating_sub(seen)) as f64 / max_possible as f64
}
