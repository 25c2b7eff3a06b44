/// 牌相关模块
///
/// 包含牌（Tile）、计数表（TileCounts）、牌墙（Wall）、手牌（Hand）和胡牌判定

pub mod tile;
pub mod counts;
pub mod wall;
pub mod hand;
pub mod win_check;

// 重新导出常用类型
pub use tile::{Tile, Suit, parse_tiles};
pub use counts::TileCounts;
pub use wall::Wall;
pub use hand::Hand;
pub use win_check::{WinChecker, WinResult, WinType, Group, Partition, is_win, check_win};
