#[macro_use]
extern crate bencher;
extern crate chesskit;

use bencher::Bencher;
use chesskit::{Board, Color, MoveGen, STARTING_POSITION};
use std::str::FromStr;

const MIDDLEGAME_LAYOUT: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R";

// This is a helper function to remove boilerplate code from the movegen benchmarks
fn legal_movegen(bench: &mut Bencher, layout: &str, color: Color, count: usize) {
    let board = Board::from_str(layout).expect("valid layout");

    bench.iter(|| assert_eq!(MoveGen::new_legal(&board, color).len(), count));
}

fn movegen_starting_position(bench: &mut Bencher) {
    legal_movegen(bench, STARTING_POSITION, Color::White, 20);
}

fn movegen_middlegame(bench: &mut Bencher) {
    let board = Board::from_str(MIDDLEGAME_LAYOUT).expect("valid layout");
    bench.iter(|| assert!(MoveGen::new_legal(&board, Color::White).len() > 20));
}

fn status_starting_position(bench: &mut Bencher) {
    let board = Board::default();
    bench.iter(|| assert_eq!(board.status(), chesskit::BoardStatus::Ongoing));
}

fn import_starting_position(bench: &mut Bencher) {
    bench.iter(|| Board::from_str(STARTING_POSITION).expect("valid layout"));
}

benchmark_group!(
    benches,
    movegen_starting_position,
    movegen_middlegame,
    status_starting_position,
    import_starting_position
);
benchmark_main!(benches);
