use changchun_engine::game::hand_state::HandState;
use changchun_engine::game::meld::Meld;
use changchun_engine::game::payment::{PaymentReason, Role};
use changchun_engine::game::scoring::{ClosedWaitCheck, ScoreCalculator, WinEvent};
use changchun_engine::tile::{parse_tiles, Hand, Tile};
use changchun_engine::EngineConfig;

fn state(notation: &str, melds: Vec<Meld>) -> HandState {
    HandState::from_parts(Hand::from_tiles(&parse_tiles(notation).unwrap()), melds).unwrap()
}

fn with_winner(winner: u8, winner_state: HandState) -> [HandState; 4] {
    let mut hands: [HandState; 4] = Default::default();
    hands[winner as usize] = winner_state;
    hands
}

#[test]
fn test_dealer_self_draw_plain() {
    let pong = Meld::triplet(Tile::Zi(Tile::ZHONG), Some(2)).unwrap();
    let hands = with_winner(0, state("123m456s789p11z", vec![pong]));
    let event = WinEvent::self_drawn(0, Tile::Wan(1), 0);
    let result = ScoreCalculator::new().calculate(&event, &hands).unwrap();

    assert_eq!(result.multiplier.value(), 1);
    for seat in 1..4 {
        assert_eq!(result.delta(seat), -4);
    }
    assert_eq!(result.delta(0), 12);
    assert_eq!(result.breakdown.len(), 3);
    assert!(result.breakdown.iter().all(|l| l.reason == PaymentReason::SelfDrawn));
    assert!(result.description.contains("自摸"));
}

#[test]
fn test_dealer_deals_in_concealed() {
    // 门清，和 1m 不是夹：G = 2
    let hands = with_winner(1, state("23m456s789p55511z", vec![]));
    let event = WinEvent::discard(1, Tile::Wan(1), 0, 0);
    let result = ScoreCalculator::new().calculate(&event, &hands).unwrap();

    assert_eq!(result.multiplier.value(), 2);
    assert_eq!(result.delta(0), -12);
    assert_eq!(result.delta(1), 12);
    assert_eq!(result.delta(2), 0);
    assert_eq!(result.delta(3), 0);
    assert_eq!(result.breakdown[0].role, Role::Dealer);
    assert_eq!(result.breakdown[0].reason, PaymentReason::DealIn);
}

#[test]
fn test_concealed_and_closed_wait() {
    let hands = with_winner(2, state("13m456s789p55511z", vec![]));
    let event = WinEvent::self_drawn(2, Tile::Wan(2), 0);
    let result = ScoreCalculator::new().calculate(&event, &hands).unwrap();

    assert_eq!(result.multiplier.value(), 4);
    assert_eq!(result.delta(0), -16);
    assert_eq!(result.delta(1), -8);
    assert_eq!(result.delta(3), -8);
    assert_eq!(result.delta(2), 32);
    assert!(result.description.contains("门清 x2"));
    assert!(result.description.contains("夹 x2"));
}

#[test]
fn test_concealed_quad_keeps_bonus() {
    let kong = Meld::concealed_quad(Tile::Wan(9)).unwrap();
    let hands = with_winner(3, state("456s456789p2p", vec![kong]));
    let event = WinEvent::discard(3, Tile::Tong(2), 0, 1);
    let result = ScoreCalculator::new().calculate(&event, &hands).unwrap();
    assert!(result.multiplier.concealed);
    assert_eq!(result.delta(1), -10);
}

#[test]
fn test_added_quad_breaks_bonus() {
    let kong = Meld::triplet(Tile::Wan(9), Some(0)).unwrap().upgraded_to_quad().unwrap();
    let hands = with_winner(3, state("456s456789p2p", vec![kong]));
    let event = WinEvent::discard(3, Tile::Tong(2), 0, 1);
    let result = ScoreCalculator::new().calculate(&event, &hands).unwrap();
    assert!(!result.multiplier.concealed);
    assert_eq!(result.delta(1), -5);
}

#[test]
fn test_strict_closed_wait_from_config() {
    let config = EngineConfig::from_json_str(r#"{"rules": {"closed_wait": "Partition"}}"#).unwrap();
    let strict = ScoreCalculator::with_check(config.rules.closed_wait);
    assert_eq!(strict.closed_wait_check(), ClosedWaitCheck::Partition);

    // 123m + 44m：手中有 2m、4m，但 3m 只能作为边张
    let hands = with_winner(1, state("1244m456s789p555z", vec![]));
    let event = WinEvent::discard(1, Tile::Wan(3), 0, 2);

    let loose = ScoreCalculator::new().calculate(&event, &hands).unwrap();
    assert!(loose.multiplier.closed_wait);
    let strict_result = strict.calculate(&event, &hands).unwrap();
    assert!(!strict_result.multiplier.closed_wait);
}

#[test]
fn test_apply_to_totals() {
    let hands = with_winner(1, state("23m456s789p55511z", vec![]));
    let event = WinEvent::discard(1, Tile::Wan(4), 0, 0);
    let result = ScoreCalculator::new().calculate(&event, &hands).unwrap();

    let mut totals = [0; 4];
    result.apply(&mut totals);
    assert_eq!(totals, [-12, 12, 0, 0]);
    assert!(result.is_zero_sum());
}

#[test]
fn test_all_branches_zero_sum() {
    let hands = with_winner(1, state("23m456s789p55511z", vec![]));
    let calc = ScoreCalculator::new();
    for dealer in 0..4u8 {
        let event = WinEvent::self_drawn(1, Tile::Wan(1), dealer);
        assert!(calc.calculate(&event, &hands).unwrap().is_zero_sum());
        for discarder in [0u8, 2, 3] {
            let event = WinEvent::discard(1, Tile::Wan(1), dealer, discarder);
            assert!(calc.calculate(&event, &hands).unwrap().is_zero_sum());
        }
    }
}
