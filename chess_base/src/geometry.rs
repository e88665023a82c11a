use crate::types::{CastlingSide, Color, File, Rank};

/// Rank on which castling takes place for the given color.
pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Home rank of the pawns of the given color.
///
/// The double advance is granted on this literal rank (together with a zero
/// move counter), so a pawn dropped back onto its home rank by a custom
/// position is granted the double step again.
pub const fn pawn_home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank a pawn of the given color promotes on.
pub const fn promotion_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Rank-index delta of a single forward pawn step.
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Whether a pawn standing on this rank may capture en passant.
///
/// Both middle ranks qualify regardless of the pawn's color; the victim
/// conditions (an adjacent just-moved enemy pawn with exactly one move) rule
/// out every false positive that could otherwise arise.
pub const fn is_enpassant_rank(r: Rank) -> bool {
    matches!(r, Rank::R5 | Rank::R4)
}

/// File the king lands on when castling to the given side.
pub const fn castling_king_dst_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::Queen => File::C,
        CastlingSide::King => File::G,
    }
}

/// File the castling rook starts on.
pub const fn castling_rook_src_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::Queen => File::A,
        CastlingSide::King => File::H,
    }
}

/// File the castling rook lands on.
pub const fn castling_rook_dst_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::Queen => File::D,
        CastlingSide::King => File::F,
    }
}
