use changchun_engine::game::meld::Meld;
use changchun_engine::game::hand_state::HandState;
use changchun_engine::game::scoring::ScoreCalculator;
use changchun_engine::tile::win_check::{WinChecker, WinType};
use changchun_engine::tile::{parse_tiles, Hand, Tile};
use changchun_engine::{StandardRules, ValidationError};

fn hand(notation: &str) -> Hand {
    Hand::from_tiles(&parse_tiles(notation).unwrap())
}

#[test]
fn test_dragon_pair_with_sequence_meld() {
    // 暗刻 5 筒、7 条，吃 123 万，红中对子
    let chow = Meld::sequence(Tile::Wan(1), Some(3)).unwrap();
    let state = HandState::from_parts(hand("777s555789p5z"), vec![chow]).unwrap();
    let full = state.with_tile(Tile::Zi(Tile::ZHONG));

    assert_eq!(full.check_win(), Ok(true));

    // 吃了一组顺子，门清不成立
    let multiplier = ScoreCalculator::new().multiplier(&full, Tile::Zi(Tile::ZHONG));
    assert!(!multiplier.concealed);
}

#[test]
fn test_seven_pairs_any_suits() {
    let checker = WinChecker::new();
    let result = checker.check_win(&hand("1199m2288s3377p11z"), &[]);
    assert!(result.is_win);
    assert_eq!(result.win_type, WinType::SevenPairs);
    assert_eq!(result.pair, None);
}

#[test]
fn test_seven_pairs_still_needs_three_suits() {
    let checker = WinChecker::new();
    assert!(!checker.is_winning_hand(&hand("11223344m556677s"), &[]));
    assert!(WinChecker::with_rules(StandardRules).is_winning_hand(&hand("11223344m556677s"), &[]));
}

#[test]
fn test_four_melds_pair_wait() {
    let melds = vec![
        Meld::triplet(Tile::Wan(9), Some(1)).unwrap(),
        Meld::sequence(Tile::Tiao(2), Some(3)).unwrap(),
        Meld::exposed_quad(Tile::Tong(4), Some(2)).unwrap(),
        Meld::concealed_quad(Tile::Zi(Tile::WEST)).unwrap(),
    ];
    let state = HandState::from_parts(hand("6p"), melds).unwrap();
    assert_eq!(state.logical_count(), 13);
    assert_eq!(state.with_tile(Tile::Tong(6)).check_win(), Ok(true));
    assert_eq!(state.with_tile(Tile::Tong(7)).check_win(), Ok(false));
}

#[test]
fn test_honor_sequence_is_not_a_group() {
    // 东南西不能当顺子
    assert!(!WinChecker::new().is_winning_hand(&hand("123z123m456s789p55p"), &[]));
}

#[test]
fn test_pair_choice_matters_for_triplet_seed() {
    // 11122m：拆成 111m + 22m 有刻；拆成 11m + 122m 不成立
    let checker = WinChecker::new();
    let partitions = checker.winning_partitions(&hand("11122m456s456789p"), &[]);
    assert!(!partitions.is_empty());
    assert!(partitions.iter().all(|p| p.pair == Tile::Wan(2)));
}

#[test]
fn test_silent_false_vs_validation_error() {
    let short = hand("123m456s789p55z");
    assert!(!WinChecker::new().is_winning_hand(&short, &[]));

    let state = HandState::from_parts(short, vec![]).unwrap();
    assert_eq!(
        state.check_win(),
        Err(ValidationError::InvalidTileCount { logical: 11, expected: 14 })
    );
}

#[test]
fn test_check_is_idempotent() {
    let checker = WinChecker::new();
    let h = hand("12322m456s555789p");
    let first = checker.check_win(&h, &[]);
    let second = checker.check_win(&h, &[]);
    assert_eq!(first, second);
    assert!(first.is_win);
}
