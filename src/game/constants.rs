/// 游戏常量定义
///
/// 集中管理座位数、牌数等魔法数字

/// 玩家数量
pub const NUM_PLAYERS: u8 = 4;

/// 总牌数（136 张：万、条、筒各 36 张，字牌 28 张）
pub const TOTAL_TILES: usize = 136;

/// 牌的种类数（34 种：3 种花色 × 9 + 7 种字牌）
pub const NUM_TILE_TYPES: usize = 34;

/// 每种牌的数量（4 张）
pub const COPIES_PER_TILE: u8 = 4;

/// 最多牌组数
pub const MAX_MELDS: usize = 4;

/// 完整手牌的逻辑张数（杠按 3 张计）
pub const COMPLETE_HAND_SIZE: usize = 14;

/// 等牌手牌的逻辑张数
pub const WAITING_HAND_SIZE: usize = 13;
