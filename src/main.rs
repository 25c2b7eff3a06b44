/// 可执行文件入口：洗牌、发牌，给庄家一个出牌建议

use changchun_engine::{error, info, warn};
use changchun_engine::{DiscardAdvisor, EngineConfig, TenpaiAnalyzer, Wall};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(2024);
    let config = match std::env::args().nth(2) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match EngineConfig::from_json_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    error!("invalid config {}: {}, using defaults", path, e);
                    EngineConfig::default()
                }
            },
            Err(e) => {
                warn!("cannot read {}: {}, using defaults", path, e);
                EngineConfig::default()
            }
        },
        None => EngineConfig::default(),
    };

    let mut wall = Wall::shuffled_with_seed(seed);
    info!("seed {}: wall of {} tiles", seed, wall.total_count());

    let dealer = 0;
    let hands = match wall.deal(dealer) {
        Some(hands) => hands,
        None => {
            warn!("wall ran out while dealing");
            return;
        }
    };
    info!("dealt, {} tiles left in the wall", wall.remaining_count());

    for (seat, hand) in hands.iter().enumerate() {
        let tiles: Vec<String> = hand.to_sorted_vec().iter().map(|t| t.to_string()).collect();
        println!("座位 {}: {}", seat, tiles.join(" "));
    }

    let advisor = DiscardAdvisor::from_config(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dealer_hand = &hands[dealer as usize];
    match advisor.recommend_discard(dealer_hand, &[], &[], &[], &mut rng) {
        Some(tile) => {
            let remaining = dealer_hand.without_tile(tile);
            let tenpai = TenpaiAnalyzer::new().is_tenpai(&remaining, &[]);
            println!("庄家建议打出: {}{}", tile, if tenpai { "（听牌）" } else { "" });
        }
        None => warn!("dealer hand is empty"),
    }
}
