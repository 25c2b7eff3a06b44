use super::hand_state::HandState;
use super::meld::{Meld, MeldKind};
use crate::error::ValidationError;
use crate::tile::{Hand, Tile};
use smallvec::SmallVec;

/// 杠的形成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadForm {
    /// 明杠（别人打出的牌，手中三张）
    Exposed,
    /// 补杠（已经碰了三张，摸到第四张）
    Added,
    /// 暗杠（手牌中有四张相同的牌）
    Concealed,
}

impl QuadForm {
    /// 形成后的牌组类型
    pub fn meld_kind(&self) -> MeldKind {
        match self {
            QuadForm::Exposed => MeldKind::ExposedQuad,
            QuadForm::Added => MeldKind::AddedQuad,
            QuadForm::Concealed => MeldKind::ConcealedQuad,
        }
    }
}

/// 杠操作器
pub struct KongHandler;

impl KongHandler {
    /// 检查是否可以明杠：手牌中有三张，别人打出第四张
    pub fn can_direct_kong(hand: &Hand, tile: &Tile) -> bool {
        hand.tile_count(*tile) >= 3
    }

    /// 检查是否可以暗杠
    ///
    /// 返回第一种恰好有 4 张的牌；没有则返回 `None`
    pub fn can_concealed_kong(hand: &Hand) -> Option<Tile> {
        Self::concealed_kong_tiles(hand).first().copied()
    }

    /// 所有可以暗杠的牌（按排序顺序）
    pub fn concealed_kong_tiles(hand: &Hand) -> SmallVec<[Tile; 3]> {
        hand.distinct_tiles()
            .into_iter()
            .filter(|t| hand.tile_count(*t) == Tile::COPIES)
            .collect()
    }

    /// 检查是否可以补杠：牌组中有该牌的碰，手中有第四张
    pub fn can_add_kong(hand: &Hand, melds: &[Meld], tile: &Tile) -> bool {
        hand.has_tile(*tile)
            && melds
                .iter()
                .any(|m| m.kind() == MeldKind::Triplet && m.anchor() == *tile)
    }

    /// 杠后的状态副本
    ///
    /// - 明杠：手中移除三张，`from` 为打出者
    /// - 暗杠：手中移除四张
    /// - 补杠：手中移除一张，对应的碰升级为补杠
    pub fn after_kong(
        state: &HandState,
        tile: Tile,
        form: QuadForm,
        from: Option<u8>,
    ) -> Result<HandState, ValidationError> {
        let mut next = state.clone();
        let held = state.hand.tile_count(tile);
        let take = |next: &mut HandState, needed: u8| {
            if next.hand.remove_n(tile, needed) {
                Ok(())
            } else {
                Err(ValidationError::MissingTiles { tile, needed, held })
            }
        };

        match form {
            QuadForm::Exposed => {
                take(&mut next, 3)?;
                next.melds.push(Meld::exposed_quad(tile, from)?);
            }
            QuadForm::Concealed => {
                take(&mut next, 4)?;
                next.melds.push(Meld::concealed_quad(tile)?);
            }
            QuadForm::Added => {
                let index = next
                    .melds
                    .iter()
                    .position(|m| m.kind() == MeldKind::Triplet && m.anchor() == tile)
                    .ok_or(ValidationError::InvalidMeldShape { kind: MeldKind::AddedQuad })?;
                take(&mut next, 1)?;
                next.melds[index] = next.melds[index].upgraded_to_quad()?;
            }
        }
        Ok(next)
    }
}
