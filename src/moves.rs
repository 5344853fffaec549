//! Quarter-turn moves and the index tables that implement them.
//!
//! A quarter turn touches two disjoint groups of stickers: the 9 stickers of
//! the turned face, which rotate in place, and four 3-sticker strips on the
//! neighbouring faces, which cycle around the turned face. Both are driven by
//! constant tables; the full 54-entry permutation for each of the 12 moves is
//! assembled from them at compile time.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cube::{CubeState, Face, FACE_SIZE, STICKER_COUNT};
use crate::error::{Error, Result};

/// Clockwise rotation of a face: new sticker `i` comes from old sticker `FACE_ROTATION_CW[i]`
pub const FACE_ROTATION_CW: [u8; FACE_SIZE] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// Counter-clockwise rotation, the inverse of [`FACE_ROTATION_CW`]
pub const FACE_ROTATION_CCW: [u8; FACE_SIZE] = [2, 5, 8, 1, 4, 7, 0, 3, 6];

/// Neighbouring strips of each face (indexed in [`Face::ALL`] order).
///
/// Strips are listed in the direction a clockwise turn carries them: strip
/// `i` moves onto strip `i + 1`, sticker `j` onto sticker `j`.
pub const EDGE_STRIPS: [[[u8; 3]; 4]; 6] = [
    // U: F top -> L top -> B top -> R top
    [[18, 19, 20], [36, 37, 38], [45, 46, 47], [9, 10, 11]],
    // R: U right col -> B left col -> D right col -> F right col
    [[8, 5, 2], [45, 48, 51], [35, 32, 29], [26, 23, 20]],
    // F: U bottom row -> R left col -> D top row -> L right col
    [[6, 7, 8], [9, 12, 15], [29, 28, 27], [44, 41, 38]],
    // D: F bottom -> R bottom -> B bottom -> L bottom
    [[24, 25, 26], [15, 16, 17], [51, 52, 53], [42, 43, 44]],
    // L: U left col -> F left col -> D left col -> B right col
    [[0, 3, 6], [18, 21, 24], [27, 30, 33], [53, 50, 47]],
    // B: U top row -> L left col -> D bottom row -> R right col
    [[2, 1, 0], [36, 39, 42], [33, 34, 35], [17, 14, 11]],
];

/// One of the 12 quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    U,
    #[serde(rename = "U'")]
    UPrime,
    D,
    #[serde(rename = "D'")]
    DPrime,
    L,
    #[serde(rename = "L'")]
    LPrime,
    R,
    #[serde(rename = "R'")]
    RPrime,
    F,
    #[serde(rename = "F'")]
    FPrime,
    B,
    #[serde(rename = "B'")]
    BPrime,
}

impl Move {
    /// The move alphabet, in successor expansion order
    pub const ALL: [Move; 12] = [
        Move::U,
        Move::UPrime,
        Move::D,
        Move::DPrime,
        Move::L,
        Move::LPrime,
        Move::R,
        Move::RPrime,
        Move::F,
        Move::FPrime,
        Move::B,
        Move::BPrime,
    ];

    pub fn new(face: Face, prime: bool) -> Move {
        match (face, prime) {
            (Face::U, false) => Move::U,
            (Face::U, true) => Move::UPrime,
            (Face::D, false) => Move::D,
            (Face::D, true) => Move::DPrime,
            (Face::L, false) => Move::L,
            (Face::L, true) => Move::LPrime,
            (Face::R, false) => Move::R,
            (Face::R, true) => Move::RPrime,
            (Face::F, false) => Move::F,
            (Face::F, true) => Move::FPrime,
            (Face::B, false) => Move::B,
            (Face::B, true) => Move::BPrime,
        }
    }

    /// Position in [`Move::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The face this move turns
    pub fn face(self) -> Face {
        match self {
            Move::U | Move::UPrime => Face::U,
            Move::D | Move::DPrime => Face::D,
            Move::L | Move::LPrime => Face::L,
            Move::R | Move::RPrime => Face::R,
            Move::F | Move::FPrime => Face::F,
            Move::B | Move::BPrime => Face::B,
        }
    }

    /// Check if this is a counter-clockwise turn
    pub fn is_prime(self) -> bool {
        matches!(
            self,
            Move::UPrime
                | Move::DPrime
                | Move::LPrime
                | Move::RPrime
                | Move::FPrime
                | Move::BPrime
        )
    }

    /// The turn that undoes this one
    pub fn inverse(self) -> Move {
        Move::new(self.face(), !self.is_prime())
    }

    /// Full sticker permutation for this move
    pub fn permutation(self) -> &'static [u8; STICKER_COUNT] {
        &MOVE_PERMUTATIONS[self.index()]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face().letter())?;
        if self.is_prime() {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(token: &str) -> Result<Move> {
        let mut chars = token.chars();
        let face = chars
            .next()
            .and_then(Face::from_letter)
            .ok_or_else(|| Error::InvalidMove(token.to_string()))?;
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Move::new(face, false)),
            (Some('\''), None) => Ok(Move::new(face, true)),
            _ => Err(Error::InvalidMove(token.to_string())),
        }
    }
}

const fn build_permutation(face: usize, prime: bool) -> [u8; STICKER_COUNT] {
    let mut perm = [0u8; STICKER_COUNT];
    let mut i = 0;
    while i < STICKER_COUNT {
        perm[i] = i as u8;
        i += 1;
    }

    let offset = face * FACE_SIZE;
    let rotation = if prime {
        FACE_ROTATION_CCW
    } else {
        FACE_ROTATION_CW
    };
    let mut k = 0;
    while k < FACE_SIZE {
        perm[offset + k] = offset as u8 + rotation[k];
        k += 1;
    }

    let strips = EDGE_STRIPS[face];
    let mut dst = 0;
    while dst < 4 {
        // Clockwise: strip i receives strip i-1. Counter-clockwise: strip i+1.
        let src = if prime { (dst + 1) % 4 } else { (dst + 3) % 4 };
        let mut j = 0;
        while j < 3 {
            perm[strips[dst][j] as usize] = strips[src][j];
            j += 1;
        }
        dst += 1;
    }
    perm
}

const fn face_table_index(mv: Move) -> usize {
    match mv {
        Move::U | Move::UPrime => 0,
        Move::R | Move::RPrime => 1,
        Move::F | Move::FPrime => 2,
        Move::D | Move::DPrime => 3,
        Move::L | Move::LPrime => 4,
        Move::B | Move::BPrime => 5,
    }
}

const fn build_all_permutations() -> [[u8; STICKER_COUNT]; 12] {
    let mut tables = [[0u8; STICKER_COUNT]; 12];
    let mut m = 0;
    while m < 12 {
        let mv = Move::ALL[m];
        // Odd entries of ALL are the prime turns
        tables[m] = build_permutation(face_table_index(mv), m % 2 == 1);
        m += 1;
    }
    tables
}

/// `MOVE_PERMUTATIONS[m][i]` is the sticker that lands on `i` under `Move::ALL[m]`
static MOVE_PERMUTATIONS: [[u8; STICKER_COUNT]; 12] = build_all_permutations();

/// Apply a move, producing a new state.
pub fn apply(state: &CubeState, mv: Move) -> CubeState {
    state.permuted(mv.permutation())
}

/// Parse a move token and apply it.
pub fn apply_token(state: &CubeState, token: &str) -> Result<CubeState> {
    let mv: Move = token.parse()?;
    Ok(apply(state, mv))
}

impl CubeState {
    /// Apply a move, producing a new state.
    pub fn apply(&self, mv: Move) -> CubeState {
        apply(self, mv)
    }

    /// Apply a sequence of moves in order.
    pub fn apply_all<'a, I>(&self, moves: I) -> CubeState
    where
        I: IntoIterator<Item = &'a Move>,
    {
        moves.into_iter().fold(*self, |state, &mv| apply(&state, mv))
    }
}

/// Moves taken along one search branch
pub type Path = SmallVec<[Move; 20]>;

/// An ordered list of moves, shown as space-joined tokens (`U R' F`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveSequence(Path);

impl MoveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    /// The sequence that undoes this one
    pub fn inverse(&self) -> MoveSequence {
        self.0.iter().rev().map(|mv| mv.inverse()).collect()
    }

    pub fn into_path(self) -> Path {
        self.0
    }
}

impl Deref for MoveSequence {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl From<Path> for MoveSequence {
    fn from(path: Path) -> Self {
        Self(path)
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(SmallVec::from_vec(moves))
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

impl FromStr for MoveSequence {
    type Err = Error;

    fn from_str(text: &str) -> Result<MoveSequence> {
        text.split_whitespace().map(str::parse::<Move>).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Sticker triples of the 8 corners, in clockwise order seen from outside
    const CORNERS: [[u8; 3]; 8] = [
        [8, 9, 20],   // URF
        [6, 18, 38],  // UFL
        [0, 36, 47],  // ULB
        [2, 45, 11],  // UBR
        [29, 26, 15], // DFR
        [27, 44, 24], // DLF
        [33, 53, 42], // DBL
        [35, 17, 51], // DRB
    ];

    /// Sticker pairs of the 12 edges
    const EDGES: [[u8; 2]; 12] = [
        [5, 10],
        [7, 19],
        [3, 37],
        [1, 46],
        [32, 16],
        [28, 25],
        [30, 43],
        [34, 52],
        [23, 12],
        [21, 41],
        [50, 39],
        [48, 14],
    ];

    /// Where each sticker goes under a move (inverse of the source table)
    fn destinations(mv: Move) -> [u8; STICKER_COUNT] {
        let mut dest = [0u8; STICKER_COUNT];
        for (dst, &src) in mv.permutation().iter().enumerate() {
            dest[src as usize] = dst as u8;
        }
        dest
    }

    /// Rotate a corner triple so its smallest sticker comes first
    fn normalize_corner(c: [u8; 3]) -> [u8; 3] {
        let min = (0..3).min_by_key(|&i| c[i]).unwrap();
        [c[min], c[(min + 1) % 3], c[(min + 2) % 3]]
    }

    fn scrambled() -> CubeState {
        let scramble: MoveSequence = "U R' F L D' B R U' F'".parse().unwrap();
        CubeState::solved().apply_all(&scramble)
    }

    #[test]
    fn test_rotation_tables_are_inverse() {
        for k in 0..FACE_SIZE {
            assert_eq!(FACE_ROTATION_CCW[FACE_ROTATION_CW[k] as usize] as usize, k);
        }
        // Three clockwise turns equal one counter-clockwise turn
        for k in 0..FACE_SIZE {
            let mut src = k;
            for _ in 0..3 {
                src = FACE_ROTATION_CW[src] as usize;
            }
            assert_eq!(src, FACE_ROTATION_CCW[k] as usize);
        }
    }

    #[test]
    fn test_edge_strips_are_disjoint_from_face() {
        for face in Face::ALL {
            let own = face.offset()..face.offset() + FACE_SIZE;
            let mut seen = HashSet::new();
            for strip in EDGE_STRIPS[face.index()] {
                for idx in strip {
                    assert!(!own.contains(&(idx as usize)), "{:?} strip holds own sticker", face);
                    assert!(seen.insert(idx), "{:?} strip repeats sticker {}", face, idx);
                }
            }
            assert_eq!(seen.len(), 12);
        }
    }

    #[test]
    fn test_permutations_are_bijections() {
        for mv in Move::ALL {
            let unique: HashSet<u8> = mv.permutation().iter().copied().collect();
            assert_eq!(unique.len(), STICKER_COUNT, "{} is not a permutation", mv);
        }
    }

    #[test]
    fn test_moves_keep_corners_and_edges_whole() {
        let corners: HashSet<[u8; 3]> = CORNERS.iter().map(|&c| normalize_corner(c)).collect();
        let edges: HashSet<[u8; 2]> = EDGES
            .iter()
            .map(|&[a, b]| if a < b { [a, b] } else { [b, a] })
            .collect();

        for mv in Move::ALL {
            let dest = destinations(mv);
            for corner in CORNERS {
                let moved = corner.map(|s| dest[s as usize]);
                assert!(
                    corners.contains(&normalize_corner(moved)),
                    "{} splits corner {:?} into {:?}",
                    mv,
                    corner,
                    moved
                );
            }
            for [a, b] in EDGES {
                let (x, y) = (dest[a as usize], dest[b as usize]);
                let moved = if x < y { [x, y] } else { [y, x] };
                assert!(edges.contains(&moved), "{} splits edge {:?}", mv, [a, b]);
            }
        }
    }

    #[test]
    fn test_centers_never_move() {
        for mv in Move::ALL {
            for face in Face::ALL {
                let center = face.offset() + 4;
                assert_eq!(mv.permutation()[center] as usize, center);
            }
        }
    }

    #[test]
    fn test_move_then_inverse_is_identity() {
        let start = scrambled();
        for mv in Move::ALL {
            assert_eq!(start.apply(mv).apply(mv.inverse()), start, "{}", mv);
        }
    }

    #[test]
    fn test_four_turns_is_identity() {
        let start = scrambled();
        for mv in Move::ALL {
            let mut cube = start;
            for _ in 0..4 {
                cube = cube.apply(mv);
            }
            assert_eq!(cube, start, "{}", mv);
        }
    }

    #[test]
    fn test_three_turns_equal_prime() {
        let start = scrambled();
        for mv in Move::ALL {
            let thrice = start.apply(mv).apply(mv).apply(mv);
            assert_eq!(thrice, start.apply(mv.inverse()));
        }
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let sexy: MoveSequence = "R U R' U'".parse().unwrap();
        let mut cube = CubeState::solved();
        for i in 1..=6 {
            cube = cube.apply_all(&sexy);
            assert_eq!(cube.is_solved(), i == 6, "after {} repetitions", i);
        }
    }

    #[test]
    fn test_single_move_unsolves() {
        for mv in Move::ALL {
            assert!(!CubeState::solved().apply(mv).is_solved(), "{}", mv);
        }
    }

    #[test]
    fn test_u_turn_carries_front_to_left() {
        let cube = CubeState::solved().apply(Move::U);
        // Front top row now shows the right face color, left top row the front color
        assert_eq!(&cube.face(Face::F)[..3], &[1, 1, 1]);
        assert_eq!(&cube.face(Face::L)[..3], &[2, 2, 2]);
        assert_eq!(&cube.face(Face::B)[..3], &[4, 4, 4]);
        assert_eq!(&cube.face(Face::R)[..3], &[5, 5, 5]);
        assert!(cube.face(Face::U).iter().all(|&l| l == 0));
    }

    #[test]
    fn test_parse_and_display() {
        let seq: MoveSequence = "U R' F".parse().unwrap();
        assert_eq!(&*seq, &[Move::U, Move::RPrime, Move::F]);
        assert_eq!(seq.to_string(), "U R' F");

        let empty: MoveSequence = "   ".parse().unwrap();
        assert!(empty.is_empty());

        for mv in Move::ALL {
            assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
        }
    }

    #[test]
    fn test_invalid_move_tokens() {
        for token in ["", "X", "U2", "u", "R''", "F'x"] {
            assert_eq!(
                token.parse::<Move>(),
                Err(Error::InvalidMove(token.to_string()))
            );
        }
        assert!("U R2 F".parse::<MoveSequence>().is_err());
        assert!(apply_token(&CubeState::solved(), "Q").is_err());
    }

    #[test]
    fn test_sequence_inverse_undoes() {
        let seq: MoveSequence = "U R' F L D' B".parse().unwrap();
        let cube = CubeState::solved().apply_all(&seq);
        assert!(cube.apply_all(&seq.inverse()).is_solved());
        assert_eq!(seq.inverse().to_string(), "B' D L' F' R U'");
    }

    #[test]
    fn test_serde_tokens() {
        let seq: MoveSequence = "U' B".parse().unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, r#"["U'","B"]"#);
        let back: MoveSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
    }
}
