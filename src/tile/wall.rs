use super::hand::Hand;
use super::tile::Tile;
use crate::game::constants::NUM_PLAYERS;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 牌墙（Wall）
///
/// 存储全部 136 张牌，支持洗牌、摸牌和开局发牌
#[repr(C)]
#[derive(Debug, Clone)]
pub struct Wall {
    /// 牌堆（从前往后抽取）
    tiles: Box<[Tile]>,
    /// 已抽取的牌数
    drawn_count: usize,
}

impl Wall {
    /// 创建一副完整的牌墙（136 张，未洗牌）
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);
        for tile in Tile::all_kinds() {
            for _ in 0..Tile::COPIES {
                tiles.push(tile);
            }
        }

        Self {
            tiles: tiles.into_boxed_slice(),
            drawn_count: 0,
        }
    }

    /// 用给定的随机源洗牌，并重置已抽取数
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
        self.drawn_count = 0;
    }

    /// 以固定种子洗好的牌墙（可复现）
    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut wall = Self::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        wall.shuffle(&mut rng);
        wall
    }

    /// 摸一张牌
    ///
    /// # Returns
    ///
    /// - `Some(Tile)`：成功抽取一张牌
    /// - `None`：牌墙已空（荒庄）
    pub fn draw(&mut self) -> Option<Tile> {
        let tile = self.tiles.get(self.drawn_count).copied()?;
        self.drawn_count += 1;
        Some(tile)
    }

    /// 剩余牌数
    pub fn remaining_count(&self) -> usize {
        self.tiles.len() - self.drawn_count
    }

    /// 牌墙总数
    pub fn total_count(&self) -> usize {
        self.tiles.len()
    }

    /// 是否已经摸完
    pub fn is_empty(&self) -> bool {
        self.remaining_count() == 0
    }

    /// 尚未摸走的牌
    pub fn tiles_remaining(&self) -> &[Tile] {
        &self.tiles[self.drawn_count..]
    }

    /// 开局发牌
    ///
    /// 从庄家开始按座位顺序：三轮每人 4 张，再每人 1 张，最后庄家多摸 1 张。
    /// 庄家 14 张，闲家 13 张。
    ///
    /// 庄家座位非法或牌不够时返回 None（不修改已发出的牌以外的状态）
    pub fn deal(&mut self, dealer: u8) -> Option<[Hand; 4]> {
        if dealer >= NUM_PLAYERS {
            return None;
        }
        let mut hands: [Hand; 4] = Default::default();
        let seat_at = |offset: u8| ((dealer + offset) % NUM_PLAYERS) as usize;

        for _ in 0..3 {
            for offset in 0..NUM_PLAYERS {
                for _ in 0..4 {
                    hands[seat_at(offset)].add_tile(self.draw()?);
                }
            }
        }
        for offset in 0..NUM_PLAYERS {
            hands[seat_at(offset)].add_tile(self.draw()?);
        }
        hands[seat_at(0)].add_tile(self.draw()?);

        Some(hands)
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}
