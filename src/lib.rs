/// 长春麻将规则引擎
///
/// 胡牌判定、吃碰杠资格、听牌分析、结算和 AI 出牌建议。
/// 所有判定都是纯函数：只读取调用方传入的手牌，不持有跨调用的状态。

#[macro_use]
pub mod utils;
pub mod error;
pub mod config;
pub mod tile;
pub mod game;

// 重新导出常用类型
pub use error::ValidationError;
pub use config::{EngineConfig, RuleConfig};
pub use tile::{Tile, Suit, TileCounts, Wall, Hand, parse_tiles};
pub use tile::win_check::{WinChecker, WinResult, WinType, Partition, Group};
pub use game::meld::{Meld, MeldKind};
pub use game::hand_state::HandState;
pub use game::rules::{WinRules, ChangchunRules, StandardRules};
pub use game::chow::ChowHandler;
pub use game::pong::PongHandler;
pub use game::kong::{KongHandler, QuadForm};
pub use game::action::Action;
pub use game::claim::{ClaimOptions, ClaimResolver};
pub use game::ready::{TenpaiAnalyzer, Outs};
pub use game::payment::{PaymentLine, PaymentReason, Role};
pub use game::settlement::SettlementResult;
pub use game::scoring::{ScoreCalculator, WinEvent, Multiplier, ClosedWaitCheck};
pub use game::advisor::{DiscardAdvisor, AdvisorWeights};
