use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridchess::{movegen, status, Board, Color};

const BOARDS: [(&str, &str); 6] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR",
    ),
    (
        "queen_endgame",
        "...q...k/......pp/......../......../.....Q../......../......PP/.......K",
    ),
    (
        "castling",
        "r...k..r/......../......../......../......../......../......../R...K..R",
    ),
    (
        "enpassant_ranks",
        "....k.../p.p.p.p./......../.P.P.P.P/.p.p.p.p/......../P.P.P.P./....K...",
    ),
    (
        "sparse_mate",
        "R......k/R......./......../......../......../......../......../....K...",
    ),
    (
        "open_middle",
        "r..q.rk./.pp.bppp/p.np.n../....p.b./..B.P.../..NP.N../PPP..PPP/R..Q.RK.",
    ),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, diagram)| (name, Board::from_diagram(diagram).unwrap()))
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(
                    movegen::legal::gen_all(&board, Color::White)
                        .unwrap()
                        .len(),
                )
            })
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(status::evaluate(&board, Color::White).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gen_moves, bench_evaluate);
criterion_main!(benches);
