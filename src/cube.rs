//! Cube state representation.
//!
//! A state is a flat array of 54 sticker labels, 9 per face, with faces in
//! the order U, R, F, D, L, B. Within a face the stickers are stored
//! row-major as seen when looking straight at that face in the unfolded net:
//!
//! ```text
//!              U0 U1 U2
//!              U3 U4 U5
//!              U6 U7 U8
//!  L0 L1 L2    F0 F1 F2    R0 R1 R2    B0 B1 B2
//!  L3 L4 L5    F3 F4 F5    R3 R4 R5    B3 B4 B5
//!  L6 L7 L8    F6 F7 F8    R6 R7 R8    B6 B7 B8
//!              D0 D1 D2
//!              D3 D4 D5
//!              D6 D7 D8
//! ```
//!
//! The model is a pure sticker permutation: it does not check that a state
//! is physically reachable.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Number of stickers on the cube
pub const STICKER_COUNT: usize = 54;

/// Number of stickers on one face
pub const FACE_SIZE: usize = 9;

/// Number of distinct sticker labels
pub const LABEL_COUNT: u8 = 6;

/// One of the six faces, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    /// All faces in storage order
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Position of this face in storage order (also its solved label)
    pub fn index(self) -> usize {
        self as usize
    }

    /// First sticker index of this face
    pub fn offset(self) -> usize {
        self.index() * FACE_SIZE
    }

    /// Face letter as used in move notation
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        match letter {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }
}

/// Display letter for each label (white, red, green, yellow, orange, blue)
const LABEL_LETTERS: [char; LABEL_COUNT as usize] = ['W', 'R', 'G', 'Y', 'O', 'B'];

/// A cube configuration as 54 sticker labels
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeState {
    stickers: [u8; STICKER_COUNT],
}

impl CubeState {
    /// The canonical solved state: sticker `i` carries label `i / 9`
    pub fn solved() -> Self {
        let mut stickers = [0u8; STICKER_COUNT];
        for (i, sticker) in stickers.iter_mut().enumerate() {
            *sticker = (i / FACE_SIZE) as u8;
        }
        Self { stickers }
    }

    /// Copy a label array verbatim
    pub fn from_array(stickers: [u8; STICKER_COUNT]) -> Self {
        Self { stickers }
    }

    /// Build a state from a slice, checking its length and labels
    pub fn from_stickers(stickers: &[u8]) -> Result<Self> {
        let stickers: [u8; STICKER_COUNT] = stickers.try_into().map_err(|_| {
            Error::InvalidState(format!(
                "expected {} stickers, got {}",
                STICKER_COUNT,
                stickers.len()
            ))
        })?;

        if let Some(pos) = stickers.iter().position(|&label| label >= LABEL_COUNT) {
            return Err(Error::InvalidState(format!(
                "label {} at position {} is outside 0..{}",
                stickers[pos], pos, LABEL_COUNT
            )));
        }

        Ok(Self { stickers })
    }

    /// True iff every face is a single label
    pub fn is_solved(&self) -> bool {
        self.stickers
            .chunks_exact(FACE_SIZE)
            .all(|face| face.iter().all(|&label| label == face[0]))
    }

    /// Read-only view of all 54 labels
    pub fn stickers(&self) -> &[u8; STICKER_COUNT] {
        &self.stickers
    }

    /// Labels of one face, row-major
    pub fn face(&self, face: Face) -> &[u8] {
        let offset = face.offset();
        &self.stickers[offset..offset + FACE_SIZE]
    }

    /// Label at a sticker index
    pub fn get(&self, index: usize) -> Option<u8> {
        self.stickers.get(index).copied()
    }

    /// Build the state whose sticker `i` is this state's sticker `source[i]`.
    ///
    /// Every sticker is read from `self`, so no entry observes a partially
    /// written result.
    pub(crate) fn permuted(&self, source: &[u8; STICKER_COUNT]) -> Self {
        let mut stickers = [0u8; STICKER_COUNT];
        for (dst, &src) in stickers.iter_mut().zip(source.iter()) {
            *dst = self.stickers[src as usize];
        }
        Self { stickers }
    }

    fn letter_at(&self, index: usize) -> char {
        LABEL_LETTERS[self.stickers[index] as usize]
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, face: Face, row: usize) -> fmt::Result {
        let start = face.offset() + row * 3;
        write!(
            f,
            "{} {} {}",
            self.letter_at(start),
            self.letter_at(start + 1),
            self.letter_at(start + 2)
        )
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CubeState(")?;
        for (i, face) in self.stickers.chunks_exact(FACE_SIZE).enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            for label in face {
                write!(f, "{}", label)?;
            }
        }
        write!(f, ")")
    }
}

/// Unfolded net: U on top, then L F R B side by side, then D.
impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            write!(f, "      ")?;
            self.write_row(f, Face::U, row)?;
            writeln!(f)?;
        }
        for row in 0..3 {
            for (i, face) in [Face::L, Face::F, Face::R, Face::B].into_iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                self.write_row(f, face, row)?;
            }
            writeln!(f)?;
        }
        for row in 0..3 {
            write!(f, "      ")?;
            self.write_row(f, Face::D, row)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Serialize for CubeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.stickers.iter())
    }
}

impl<'de> Deserialize<'de> for CubeState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let stickers = Vec::<u8>::deserialize(deserializer)?;
        CubeState::from_stickers(&stickers).map_err(serde::de::Error::custom)
    }
}
