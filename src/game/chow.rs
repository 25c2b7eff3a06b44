use super::hand_state::HandState;
use super::meld::Meld;
use crate::error::ValidationError;
use crate::tile::{Hand, Tile};
use smallvec::SmallVec;

/// 吃牌操作器
///
/// 只判断手牌能否组成顺子；"只能吃上家"由调用方按座位决定
pub struct ChowHandler;

impl ChowHandler {
    /// 检查是否可以吃牌
    ///
    /// 吃牌条件：打出的牌作为顺子的低/中/高任一张，另外两张都在手中（字牌不能吃）
    pub fn can_chow(hand: &Hand, tile: &Tile) -> bool {
        !Self::chow_options(hand, tile).is_empty()
    }

    /// 所有可吃的顺子，以顺子最小牌表示
    pub fn chow_options(hand: &Hand, tile: &Tile) -> SmallVec<[Tile; 3]> {
        let mut options = SmallVec::new();
        if !tile.is_number() {
            return options;
        }
        for start in [-2i8, -1, 0] {
            let low = match tile.offset(start) {
                Some(low) => low,
                None => continue,
            };
            let others_present = (0..3i8)
                .filter(|&i| i != -start)
                .all(|i| low.offset(i).map_or(false, |t| hand.has_tile(t)));
            if others_present {
                options.push(low);
            }
        }
        options
    }

    /// 吃牌后的状态副本（从手中移除另外两张，加入顺子）
    ///
    /// # 参数
    ///
    /// - `low`: 顺子最小牌（取自 `chow_options`）
    /// - `tile`: 上家打出的牌
    /// - `from`: 上家座位
    pub fn after_chow(state: &HandState, low: Tile, tile: Tile, from: u8) -> Result<HandState, ValidationError> {
        let meld = Meld::sequence(low, Some(from))?;
        if !meld.contains(tile) {
            return Err(ValidationError::InvalidMeldShape { kind: meld.kind() });
        }
        let mut next = state.clone();
        for &t in meld.tiles().iter().filter(|&&t| t != tile) {
            if !next.hand.remove_tile(t) {
                return Err(ValidationError::MissingTiles { tile: t, needed: 1, held: 0 });
            }
        }
        next.melds.push(meld);
        Ok(next)
    }
}
