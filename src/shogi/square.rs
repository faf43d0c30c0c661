use std::fmt;

use super::color::Color;
use super::direction::{vector_to_direction_and_distance, Direction};
use super::kif::{JP_COLS, JP_ROWS};

/// A board coordinate in traditional numbering: file 9 is the leftmost
/// column seen from black, rank 1 is the top row.
/// Squares off the board can be constructed (they show up while walking
/// rays) but report `is_valid() == false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
  file: i8,
  rank: i8,
}

const fn build_all() -> [Square; 81] {
  let mut a = [Square { file: 0, rank: 0 }; 81];
  let mut i = 0;
  while i < 81 {
    a[i] = Square {
      file: 9 - (i % 9) as i8,
      rank: (i / 9) as i8 + 1,
    };
    i += 1;
  }
  a
}

static ALL_SQUARES: [Square; 81] = build_all();

impl Square {
  pub const fn new(file: i8, rank: i8) -> Self {
    Square { file, rank }
  }
  pub const fn from_xy(x: i8, y: i8) -> Self {
    Square {
      file: 9 - x,
      rank: y + 1,
    }
  }
  pub const fn from_index(index: usize) -> Self {
    Square::from_xy((index % 9) as i8, (index / 9) as i8)
  }
  //all 81 squares in index order: 9a, 8a, ..., 1i
  pub fn all() -> &'static [Square; 81] {
    &ALL_SQUARES
  }
  pub const fn file(self) -> i8 {
    self.file
  }
  pub const fn rank(self) -> i8 {
    self.rank
  }
  pub const fn x(self) -> i8 {
    9 - self.file
  }
  pub const fn y(self) -> i8 {
    self.rank - 1
  }
  pub fn index(self) -> usize {
    debug_assert!(self.is_valid(), "index of invalid square {:?}", self);
    (self.y() * 9 + self.x()) as usize
  }
  pub const fn is_valid(self) -> bool {
    1 <= self.file && self.file <= 9 && 1 <= self.rank && self.rank <= 9
  }
  pub const fn opposite(self) -> Self {
    Square::new(10 - self.file, 10 - self.rank)
  }
  pub fn neighbor(self, d: Direction) -> Self {
    let (dx, dy) = d.delta();
    self.neighbor_by_delta(dx, dy)
  }
  pub fn neighbor_by_delta(self, dx: i8, dy: i8) -> Self {
    Square::new(self.file - dx, self.rank + dy)
  }
  pub fn direction_to(self, to: Square) -> Option<(Direction, u8)> {
    vector_to_direction_and_distance(to.x() - self.x(), to.y() - self.y())
  }
  pub fn is_promotion_zone(self, color: Color) -> bool {
    is_promotable_rank(color, self.rank)
  }
  pub fn parse_sfen(s: &str) -> Option<Self> {
    let b = s.as_bytes();
    if b.len() != 2 {
      return None;
    }
    if !(b'1'..=b'9').contains(&b[0]) || !(b'a'..=b'i').contains(&b[1]) {
      return None;
    }
    Some(Square::new((b[0] - b'0') as i8, (b[1] - b'a') as i8 + 1))
  }
  pub fn to_jp_string(self) -> String {
    let mut s = String::with_capacity(6);
    s.push(JP_COLS[(self.file - 1) as usize]);
    s.push(JP_ROWS[(self.rank - 1) as usize]);
    s
  }
}

impl fmt::Display for Square {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.file, (b'a' + (self.rank - 1) as u8) as char)
  }
}

pub fn is_promotable_rank(color: Color, rank: i8) -> bool {
  match color {
    Color::Black => rank <= 3,
    Color::White => rank >= 7,
  }
}
