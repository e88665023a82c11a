// Minimal command-line driver for the rules engine: it owns the side to
// move, renders the board, and feeds selected squares into the library the
// way a GUI would.

use gridchess::{
    movegen::legal,
    moves::{self, MoveOutcome, PromotePiece},
    status::{self, GameStatus},
    Board, Color, Coord, File, Rank,
};
use std::io::{self, BufRead, Write};

fn render(board: &Board) {
    for rank in Rank::iter() {
        print!("{}|", rank.as_char());
        for file in File::iter() {
            print!("{}", board.get2(file, rank).as_char());
        }
        println!();
    }
    println!("-+--------");
    println!(" |abcdefgh");
}

fn read_promotion(stdin: &mut impl BufRead) -> PromotePiece {
    loop {
        print!("promote to (q/r/b/n): ");
        io::stdout().flush().unwrap();
        let mut s = String::new();
        stdin.read_line(&mut s).unwrap();
        match s.trim() {
            "q" => return PromotePiece::Queen,
            "r" => return PromotePiece::Rook,
            "b" => return PromotePiece::Bishop,
            "n" => return PromotePiece::Knight,
            other => println!("unknown piece {:?}", other),
        }
    }
}

fn name(side: Color) -> &'static str {
    match side {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn main() {
    let mut stdin = io::stdin().lock();
    let mut board = Board::initial();
    let mut side = Color::White;

    loop {
        render(&board);
        let state = status::evaluate(&board, side).unwrap();
        match state {
            GameStatus::Checkmate => {
                println!("checkmate, {} wins", name(side.inv()));
                break;
            }
            GameStatus::Stalemate => {
                println!("draw by stalemate, {} has no legal moves left", name(side));
                break;
            }
            GameStatus::Check => println!("{} to move (in check)", name(side)),
            GameStatus::Normal => println!("{} to move", name(side)),
        }

        print!("move (e.g. e2 e4, or a square to list moves): ");
        io::stdout().flush().unwrap();
        let mut line = String::new();
        if stdin.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let tokens: Vec<Coord> = match line
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
        {
            Ok(t) => t,
            Err(e) => {
                println!("bad square: {}", e);
                continue;
            }
        };

        match tokens[..] {
            [from] => match legal::moves(&board, from) {
                Ok(dests) => {
                    let list: Vec<String> =
                        dests.into_iter().map(|c| c.to_string()).collect();
                    println!("{} can reach: {}", from, list.join(" "));
                }
                Err(e) => println!("{}", e),
            },
            [from, to] => {
                let dests = match legal::moves(&board, from) {
                    Ok(d) => d,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                if board.get(from).color() != Some(side) {
                    println!("it is {}'s turn", name(side));
                    continue;
                }
                if !dests.has(to) {
                    println!("{}{} is not legal here", from, to);
                    continue;
                }
                let outcome = moves::apply(&mut board, from, to).unwrap();
                if outcome == MoveOutcome::PromotionPending {
                    let piece = read_promotion(&mut stdin);
                    moves::complete_promotion(&mut board, to, piece).unwrap();
                }
                side = side.inv();
            }
            _ => println!("enter one or two squares"),
        }
    }
}
