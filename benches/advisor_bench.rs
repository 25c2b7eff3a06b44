use criterion::{black_box, criterion_group, criterion_main, Criterion};
use changchun_engine::game::advisor::DiscardAdvisor;
use changchun_engine::game::ready::TenpaiAnalyzer;
use changchun_engine::tile::{parse_tiles, Hand, Tile, TileCounts};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn hand(notation: &str) -> Hand {
    Hand::from_tiles(&parse_tiles(notation).unwrap())
}

fn bench_compute_outs(c: &mut Criterion) {
    let hand = hand("1112m456s789p555z");
    let table = TileCounts::from_tiles(&[Tile::Wan(2), Tile::Wan(3), Tile::Zi(1)]);
    let analyzer = TenpaiAnalyzer::new();

    c.bench_function("compute_outs", |b| {
        b.iter(|| {
            black_box(analyzer.compute_outs(black_box(&hand), &[], black_box(&table)));
        });
    });
}

fn bench_tenpai_discards(c: &mut Criterion) {
    let hand = hand("23m4569s789p55511z");
    let analyzer = TenpaiAnalyzer::new();

    c.bench_function("tenpai_discards", |b| {
        b.iter(|| {
            black_box(analyzer.tenpai_discards(black_box(&hand), &[]));
        });
    });
}

fn bench_recommend_discard(c: &mut Criterion) {
    let hand = hand("12356m23478s116p1z");
    let discards = [Tile::Zi(2), Tile::Tong(9), Tile::Wan(5)];
    let advisor = DiscardAdvisor::new();

    c.bench_function("recommend_discard", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| {
            black_box(advisor.recommend_discard(black_box(&hand), &[], black_box(&discards), &[], &mut rng));
        });
    });
}

criterion_group!(benches, bench_compute_outs, bench_tenpai_discards, bench_recommend_discard);
criterion_main!(benches);
