use std::fmt;

use super::color::Color;
use super::piece::PieceType;

/// Captured pieces of one side. Only the seven unpromoted non-king kinds are
/// tracked; counters for anything else are ignored.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Hand {
  pockets: [i32; 7],
}

fn pocket_index(piece_type: PieceType) -> Option<usize> {
  match piece_type {
    PieceType::Pawn => Some(0),
    PieceType::Lance => Some(1),
    PieceType::Knight => Some(2),
    PieceType::Silver => Some(3),
    PieceType::Gold => Some(4),
    PieceType::Bishop => Some(5),
    PieceType::Rook => Some(6),
    _ => None,
  }
}

impl Hand {
  pub fn count(&self, piece_type: PieceType) -> u32 {
    pocket_index(piece_type).map_or(0, |i| self.pockets[i].max(0) as u32)
  }
  pub fn set(&mut self, piece_type: PieceType, n: u32) {
    if let Some(i) = pocket_index(piece_type) {
      self.pockets[i] = n as i32;
    }
  }
  pub fn add(&mut self, piece_type: PieceType, n: u32) -> u32 {
    if let Some(i) = pocket_index(piece_type) {
      self.pockets[i] += n as i32;
    }
    self.count(piece_type)
  }
  pub fn reduce(&mut self, piece_type: PieceType, n: u32) -> u32 {
    if let Some(i) = pocket_index(piece_type) {
      self.pockets[i] -= n as i32;
    }
    self.count(piece_type)
  }
  pub fn is_empty(&self) -> bool {
    PieceType::HAND.iter().all(|&t| self.count(t) == 0)
  }
  //non-zero counters in SFEN order (rook first)
  pub fn counts(&self) -> impl Iterator<Item = (PieceType, u32)> + '_ {
    (0..PieceType::HAND.len())
      .map(move |i| (PieceType::HAND[i], self.count(PieceType::HAND[i])))
      .filter(|&(_, n)| n > 0)
  }
  fn write_sfen(&self, f: &mut fmt::Formatter<'_>, color: Color) -> fmt::Result {
    for (t, n) in self.counts() {
      if n > 1 {
        write!(f, "{}", n)?;
      }
      let c = t.to_sfen_char();
      write!(
        f,
        "{}",
        if color.is_black() {
          c
        } else {
          c.to_ascii_lowercase()
        }
      )?;
    }
    Ok(())
  }
  pub fn to_sfen(&self, color: Color) -> String {
    if self.is_empty() {
      String::from("-")
    } else {
      HandsSFEN(self, &Hand::default(), color).to_string()
    }
  }
  pub fn format_sfen(black: &Hand, white: &Hand) -> String {
    if black.is_empty() && white.is_empty() {
      String::from("-")
    } else {
      HandsSFEN(black, white, Color::Black).to_string()
    }
  }
  pub fn parse_sfen(s: &str) -> Option<(Hand, Hand)> {
    let mut black = Hand::default();
    let mut white = Hand::default();
    if s == "-" {
      return Some((black, white));
    }
    let mut n = 0u32;
    let mut digits = 0;
    for c in s.chars() {
      if let Some(d) = c.to_digit(10) {
        digits += 1;
        if digits > 2 {
          return None;
        }
        n = 10 * n + d;
        continue;
      }
      let t = PieceType::from_sfen_char(c)?;
      if !t.can_be_in_hand() {
        return None;
      }
      let k = if digits == 0 { 1 } else { n };
      if c.is_ascii_uppercase() {
        black.add(t, k);
      } else {
        white.add(t, k);
      }
      n = 0;
      digits = 0;
    }
    if digits > 0 {
      return None;
    }
    Some((black, white))
  }
}

//helper for writing two hands as one SFEN section, the second one lowercase
struct HandsSFEN<'a>(&'a Hand, &'a Hand, Color);

impl fmt::Display for HandsSFEN<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.write_sfen(f, self.2)?;
    self.1.write_sfen(f, self.2.opposite())
  }
}
