use std::fmt;
use std::str::FromStr;

use super::color::Color;
use super::piece::PieceType;
use super::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveFrom {
  Square(Square),
  //drop from hand
  Hand(PieceType),
}

//A physical move. `piece_type` is the kind before the move,
//`captured_piece_type` the kind which stood on `to` (possibly promoted).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
  pub from: MoveFrom,
  pub to: Square,
  pub promote: bool,
  pub color: Color,
  pub piece_type: PieceType,
  pub captured_piece_type: Option<PieceType>,
}

impl Move {
  pub fn is_drop(&self) -> bool {
    matches!(self.from, MoveFrom::Hand(_))
  }
  pub fn is_pawn_drop(&self) -> bool {
    self.from == MoveFrom::Hand(PieceType::Pawn)
  }
  pub fn with_promote(&self) -> Self {
    Move {
      promote: true,
      ..*self
    }
  }
  pub fn usi(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for Move {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.from {
      MoveFrom::Square(from) => write!(f, "{}{}", from, self.to)?,
      MoveFrom::Hand(piece_type) => write!(f, "{}*{}", piece_type.to_sfen_char(), self.to)?,
    }
    if self.promote {
      write!(f, "+")?;
    }
    Ok(())
  }
}

#[derive(Debug)]
pub struct MoveFromStrError {
  pub s: String,
  pub msg: String,
}

impl MoveFromStrError {
  fn new(s: &str, msg: &str) -> Self {
    Self {
      s: String::from(s),
      msg: String::from(msg),
    }
  }
}

impl fmt::Display for MoveFromStrError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}, move: \"{}\"", self.msg, self.s)
  }
}

impl std::error::Error for MoveFromStrError {}

//A move in USI notation before it is bound to a position:
//"7g7f", "8h2b+", "P*5e".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsiMove {
  pub from: MoveFrom,
  pub to: Square,
  pub promote: bool,
}

impl FromStr for UsiMove {
  type Err = MoveFromStrError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if !s.is_ascii() || s.len() < 4 {
      return Err(MoveFromStrError::new(s, "incomplete move"));
    }
    let from = if &s[1..2] == "*" {
      let c = s.chars().next().unwrap_or(' ');
      match PieceType::from_sfen_char(c) {
        Some(t) if c.is_ascii_uppercase() && t.can_be_in_hand() => MoveFrom::Hand(t),
        _ => return Err(MoveFromStrError::new(s, "can't parse dropped piece")),
      }
    } else {
      match Square::parse_sfen(&s[0..2]) {
        Some(sq) => MoveFrom::Square(sq),
        None => return Err(MoveFromStrError::new(s, "expected from square")),
      }
    };
    let to = Square::parse_sfen(&s[2..4])
      .ok_or_else(|| MoveFromStrError::new(s, "expected to square"))?;
    let promote = match &s[4..] {
      "" => false,
      "+" => true,
      _ => return Err(MoveFromStrError::new(s, "eoln expected")),
    };
    if promote && matches!(from, MoveFrom::Hand(_)) {
      return Err(MoveFromStrError::new(s, "dropped piece can't be promoted"));
    }
    Ok(UsiMove { from, to, promote })
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialMoveType {
  Start,
  Resign,
  Interrupt,
  MaxMoves,
  Impass,
  Draw,
  RepetitionDraw,
  Mate,
  NoMate,
  Timeout,
  FoulWin,
  FoulLose,
  EnteringOfKing,
  WinByDefault,
  LoseByDefault,
  Try,
  //unrecognized notation, kept by name
  Any(String),
}

//Non-physical record entry: game start, resignation, and so on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpecialMove {
  pub move_type: SpecialMoveType,
}

impl SpecialMove {
  pub fn new(move_type: SpecialMoveType) -> Self {
    SpecialMove { move_type }
  }
  pub fn any(name: &str) -> Self {
    SpecialMove::new(SpecialMoveType::Any(name.to_owned()))
  }
}

impl From<SpecialMoveType> for SpecialMove {
  fn from(move_type: SpecialMoveType) -> Self {
    SpecialMove::new(move_type)
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordMove {
  Move(Move),
  Special(SpecialMove),
}

impl RecordMove {
  pub fn as_move(&self) -> Option<&Move> {
    match self {
      RecordMove::Move(m) => Some(m),
      RecordMove::Special(_) => None,
    }
  }
  pub fn is_physical(&self) -> bool {
    self.as_move().is_some()
  }
  pub fn is_special(&self, move_type: &SpecialMoveType) -> bool {
    match self {
      RecordMove::Special(s) => s.move_type == *move_type,
      RecordMove::Move(_) => false,
    }
  }
}

impl From<Move> for RecordMove {
  fn from(m: Move) -> Self {
    RecordMove::Move(m)
  }
}

impl From<SpecialMove> for RecordMove {
  fn from(m: SpecialMove) -> Self {
    RecordMove::Special(m)
  }
}

impl From<SpecialMoveType> for RecordMove {
  fn from(t: SpecialMoveType) -> Self {
    RecordMove::Special(SpecialMove::new(t))
  }
}
