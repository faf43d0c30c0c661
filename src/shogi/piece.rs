use std::fmt;

use super::color::Color;
use super::direction::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
  Pawn,
  Lance,
  Knight,
  Silver,
  Gold,
  Bishop,
  Rook,
  King,
  PromPawn,
  PromLance,
  PromKnight,
  PromSilver,
  Horse,
  Dragon,
}

pub const NUMBER_OF_PIECE_TYPES: usize = 14;

impl PieceType {
  pub const ALL: [PieceType; NUMBER_OF_PIECE_TYPES] = [
    PieceType::Pawn,
    PieceType::Lance,
    PieceType::Knight,
    PieceType::Silver,
    PieceType::Gold,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::King,
    PieceType::PromPawn,
    PieceType::PromLance,
    PieceType::PromKnight,
    PieceType::PromSilver,
    PieceType::Horse,
    PieceType::Dragon,
  ];
  //kinds which can be held in hand, in SFEN order
  pub const HAND: [PieceType; 7] = [
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
  ];
  pub const fn index(self) -> usize {
    self as usize
  }
  pub const fn promoted(self) -> Self {
    match self {
      PieceType::Pawn => PieceType::PromPawn,
      PieceType::Lance => PieceType::PromLance,
      PieceType::Knight => PieceType::PromKnight,
      PieceType::Silver => PieceType::PromSilver,
      PieceType::Bishop => PieceType::Horse,
      PieceType::Rook => PieceType::Dragon,
      _ => self,
    }
  }
  pub const fn unpromoted(self) -> Self {
    match self {
      PieceType::PromPawn => PieceType::Pawn,
      PieceType::PromLance => PieceType::Lance,
      PieceType::PromKnight => PieceType::Knight,
      PieceType::PromSilver => PieceType::Silver,
      PieceType::Horse => PieceType::Bishop,
      PieceType::Dragon => PieceType::Rook,
      _ => self,
    }
  }
  pub const fn is_promotable(self) -> bool {
    match self {
      PieceType::Pawn
      | PieceType::Lance
      | PieceType::Knight
      | PieceType::Silver
      | PieceType::Bishop
      | PieceType::Rook => true,
      _ => false,
    }
  }
  pub const fn is_promoted(self) -> bool {
    self.index() >= PieceType::PromPawn.index()
  }
  pub fn can_be_in_hand(self) -> bool {
    !self.is_promoted() && self != PieceType::King
  }
  //SFEN letter of the unpromoted kind, uppercase
  pub fn to_sfen_char(self) -> char {
    match self.unpromoted() {
      PieceType::Pawn => 'P',
      PieceType::Lance => 'L',
      PieceType::Knight => 'N',
      PieceType::Silver => 'S',
      PieceType::Gold => 'G',
      PieceType::Bishop => 'B',
      PieceType::Rook => 'R',
      _ => 'K',
    }
  }
  pub fn from_sfen_char(c: char) -> Option<Self> {
    match c.to_ascii_uppercase() {
      'P' => Some(PieceType::Pawn),
      'L' => Some(PieceType::Lance),
      'N' => Some(PieceType::Knight),
      'S' => Some(PieceType::Silver),
      'G' => Some(PieceType::Gold),
      'B' => Some(PieceType::Bishop),
      'R' => Some(PieceType::Rook),
      'K' => Some(PieceType::King),
      _ => None,
    }
  }
  pub fn to_jp_string(self) -> &'static str {
    match self {
      PieceType::Pawn => "歩",
      PieceType::Lance => "香",
      PieceType::Knight => "桂",
      PieceType::Silver => "銀",
      PieceType::Gold => "金",
      PieceType::Bishop => "角",
      PieceType::Rook => "飛",
      PieceType::King => "玉",
      PieceType::PromPawn => "と",
      PieceType::PromLance => "成香",
      PieceType::PromKnight => "成桂",
      PieceType::PromSilver => "成銀",
      PieceType::Horse => "馬",
      PieceType::Dragon => "竜",
    }
  }
}

pub const fn expected_number_of_pieces(piece_type: PieceType) -> u32 {
  match piece_type {
    PieceType::Pawn => 18,
    PieceType::Lance | PieceType::Knight | PieceType::Silver | PieceType::Gold => 4,
    PieceType::Bishop | PieceType::Rook | PieceType::King => 2,
    _ => 0,
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveType {
  //one step
  Short,
  //any number of steps along a free ray
  Long,
}

const fn black_move_type(piece_type: PieceType, d: Direction) -> Option<MoveType> {
  use Direction::*;
  use MoveType::*;
  match piece_type {
    PieceType::Pawn => match d {
      Up => Some(Short),
      _ => None,
    },
    PieceType::Lance => match d {
      Up => Some(Long),
      _ => None,
    },
    PieceType::Knight => match d {
      LeftUpKnight | RightUpKnight => Some(Short),
      _ => None,
    },
    PieceType::Silver => match d {
      LeftUp | Up | RightUp | LeftDown | RightDown => Some(Short),
      _ => None,
    },
    PieceType::Gold
    | PieceType::PromPawn
    | PieceType::PromLance
    | PieceType::PromKnight
    | PieceType::PromSilver => match d {
      LeftUp | Up | RightUp | Left | Right | Down => Some(Short),
      _ => None,
    },
    PieceType::Bishop => match d {
      LeftUp | RightUp | LeftDown | RightDown => Some(Long),
      _ => None,
    },
    PieceType::Rook => match d {
      Up | Down | Left | Right => Some(Long),
      _ => None,
    },
    PieceType::King => match d {
      LeftUpKnight | RightUpKnight | LeftDownKnight | RightDownKnight => None,
      _ => Some(Short),
    },
    PieceType::Horse => match d {
      LeftUp | RightUp | LeftDown | RightDown => Some(Long),
      Up | Down | Left | Right => Some(Short),
      _ => None,
    },
    PieceType::Dragon => match d {
      Up | Down | Left | Right => Some(Long),
      LeftUp | RightUp | LeftDown | RightDown => Some(Short),
      _ => None,
    },
  }
}

const fn flip_vertical(d: Direction) -> Direction {
  use Direction::*;
  match d {
    Up => Down,
    Down => Up,
    LeftUp => LeftDown,
    RightUp => RightDown,
    LeftDown => LeftUp,
    RightDown => RightUp,
    LeftUpKnight => LeftDownKnight,
    RightUpKnight => RightDownKnight,
    LeftDownKnight => LeftUpKnight,
    RightDownKnight => RightUpKnight,
    Left | Right => d,
  }
}

type MoveTable = [[[Option<MoveType>; 12]; NUMBER_OF_PIECE_TYPES]; 2];

const fn build_move_table() -> MoveTable {
  let mut t: MoveTable = [[[None; 12]; NUMBER_OF_PIECE_TYPES]; 2];
  let mut p = 0;
  while p < NUMBER_OF_PIECE_TYPES {
    let mut d = 0;
    while d < 12 {
      let dir = Direction::ALL[d];
      t[0][p][d] = black_move_type(PieceType::ALL[p], dir);
      //white moves are black moves seen in a mirror
      t[1][p][d] = black_move_type(PieceType::ALL[p], flip_vertical(dir));
      d += 1;
    }
    p += 1;
  }
  t
}

static MOVE_TABLE: MoveTable = build_move_table();

pub fn move_type(color: Color, piece_type: PieceType, d: Direction) -> Option<MoveType> {
  MOVE_TABLE[color.index()][piece_type.index()][d.index()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
  pub color: Color,
  pub piece_type: PieceType,
}

impl Piece {
  pub const fn new(color: Color, piece_type: PieceType) -> Self {
    Piece { color, piece_type }
  }
  pub fn promoted(self) -> Self {
    Piece::new(self.color, self.piece_type.promoted())
  }
  pub fn unpromoted(self) -> Self {
    Piece::new(self.color, self.piece_type.unpromoted())
  }
  pub fn is_promotable(self) -> bool {
    self.piece_type.is_promotable()
  }
  //Next state when the piece is turned on an editing board:
  //unpromoted -> promoted -> unpromoted of the other color.
  //Gold and king have no promoted face, so they flip color directly.
  pub fn rotate(self) -> Self {
    if self.piece_type.is_promotable() {
      self.promoted()
    } else {
      Piece::new(self.color.opposite(), self.piece_type.unpromoted())
    }
  }
  pub fn move_type(self, d: Direction) -> Option<MoveType> {
    move_type(self.color, self.piece_type, d)
  }
  pub fn directions(self) -> impl Iterator<Item = Direction> {
    (0..Direction::ALL.len())
      .map(|i| Direction::ALL[i])
      .filter(move |&d| self.move_type(d).is_some())
  }
  pub fn parse_sfen(s: &str) -> Option<Self> {
    let (promoted, t) = match s.strip_prefix('+') {
      Some(t) => (true, t),
      None => (false, s),
    };
    let mut it = t.chars();
    let c = it.next()?;
    if it.next().is_some() {
      return None;
    }
    let piece_type = PieceType::from_sfen_char(c)?;
    let color = if c.is_ascii_uppercase() {
      Color::Black
    } else {
      Color::White
    };
    if promoted {
      if !piece_type.is_promotable() {
        return None;
      }
      Some(Piece::new(color, piece_type.promoted()))
    } else {
      Some(Piece::new(color, piece_type))
    }
  }
}

impl fmt::Display for Piece {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.piece_type.is_promoted() {
      write!(f, "+")?;
    }
    let c = self.piece_type.to_sfen_char();
    write!(
      f,
      "{}",
      match self.color {
        Color::Black => c,
        Color::White => c.to_ascii_lowercase(),
      }
    )
  }
}
