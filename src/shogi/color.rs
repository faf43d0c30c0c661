use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
  Black,
  White,
}

impl Color {
  pub const ALL: [Color; 2] = [Color::Black, Color::White];
  pub const fn opposite(self) -> Self {
    match self {
      Color::Black => Color::White,
      Color::White => Color::Black,
    }
  }
  pub const fn index(self) -> usize {
    match self {
      Color::Black => 0,
      Color::White => 1,
    }
  }
  pub fn is_black(self) -> bool {
    self == Color::Black
  }
  pub fn to_sfen_char(self) -> char {
    match self {
      Color::Black => 'b',
      Color::White => 'w',
    }
  }
  pub fn from_sfen(s: &str) -> Option<Self> {
    match s {
      "b" => Some(Color::Black),
      "w" => Some(Color::White),
      _ => None,
    }
  }
  //☗ / ☖
  pub fn mark(self) -> char {
    match self {
      Color::Black => '☗',
      Color::White => '☖',
    }
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Color::Black => "black",
      Color::White => "white",
    };
    write!(f, "{}", s)
  }
}
