use std::fmt;

use super::color::Color;
use super::direction::Direction;
use super::piece::{MoveType, Piece, PieceType};
use super::square::Square;
use super::ParseSFENError;

/// Virtual edits for attack detection: `filled` is treated as an opaque
/// blocker, `ignore` as an empty square.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PowerDetectionOption {
  pub filled: Option<Square>,
  pub ignore: Option<Square>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
  squares: [Option<Piece>; 81],
}

impl Default for Board {
  fn default() -> Self {
    Board {
      squares: [None; 81],
    }
  }
}

impl Board {
  pub fn at(&self, sq: Square) -> Option<Piece> {
    if sq.is_valid() {
      self.squares[sq.index()]
    } else {
      None
    }
  }
  pub fn set(&mut self, sq: Square, piece: Piece) {
    self.squares[sq.index()] = Some(piece);
  }
  pub fn swap(&mut self, sq1: Square, sq2: Square) {
    self.squares.swap(sq1.index(), sq2.index());
  }
  pub fn remove(&mut self, sq: Square) -> Option<Piece> {
    self.squares[sq.index()].take()
  }
  pub fn clear(&mut self) {
    self.squares = [None; 81];
  }
  pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
    self
      .squares
      .iter()
      .enumerate()
      .filter_map(|(i, p)| p.map(|p| (Square::from_index(i), p)))
  }
  pub fn list_non_empty_squares(&self) -> Vec<Square> {
    self.iter().map(|(sq, _)| sq).collect()
  }
  pub fn list_squares_by_color(&self, color: Color) -> Vec<Square> {
    self
      .iter()
      .filter(|(_, p)| p.color == color)
      .map(|(sq, _)| sq)
      .collect()
  }
  pub fn list_squares_by_piece(&self, piece: Piece) -> Vec<Square> {
    self
      .iter()
      .filter(|(_, p)| *p == piece)
      .map(|(sq, _)| sq)
      .collect()
  }
  pub fn find_king(&self, color: Color) -> Option<Square> {
    let king = Piece::new(color, PieceType::King);
    self.iter().find(|(_, p)| *p == king).map(|(sq, _)| sq)
  }
  //Whether some piece of `color` attacks `target`.
  //Rays are walked outward from `target`; the first piece met decides.
  pub fn has_power(&self, target: Square, color: Color, opt: PowerDetectionOption) -> bool {
    Direction::ALL.iter().any(|&d| {
      let mut step = 0;
      let mut sq = target.neighbor(d);
      while sq.is_valid() {
        step += 1;
        if opt.filled == Some(sq) {
          return false;
        }
        if opt.ignore != Some(sq) {
          if let Some(p) = self.at(sq) {
            if p.color != color {
              return false;
            }
            return match p.move_type(d.reverse()) {
              Some(MoveType::Long) => true,
              Some(MoveType::Short) => step == 1,
              None => false,
            };
          }
        }
        sq = sq.neighbor(d);
      }
      false
    })
  }
  pub fn is_checked(&self, color: Color, opt: PowerDetectionOption) -> bool {
    match self.find_king(color) {
      Some(king) => self.has_power(king, color.opposite(), opt),
      None => false,
    }
  }
  pub fn parse_sfen(sfen: &str) -> Result<Self, ParseSFENError> {
    let rows: Vec<_> = sfen.split('/').collect();
    if rows.len() != 9 {
      return Err(ParseSFENError::new(
        sfen,
        format!("invalid number of rows ({})", rows.len()),
      ));
    }
    let mut board = Board::default();
    for (y, row) in rows.iter().enumerate() {
      let mut x = 0;
      let mut promoted = false;
      for c in row.chars() {
        if let Some(n) = c.to_digit(10) {
          if promoted || n == 0 {
            return Err(ParseSFENError::new(
              sfen,
              format!("unexpected '{}' in row {}", c, y + 1),
            ));
          }
          x += n as i8;
        } else if c == '+' {
          if promoted {
            return Err(ParseSFENError::new(
              sfen,
              format!("double promotion in row {}", y + 1),
            ));
          }
          promoted = true;
          continue;
        } else {
          if x >= 9 {
            return Err(ParseSFENError::new(
              sfen,
              format!("invalid number of columns in row {}", y + 1),
            ));
          }
          let sq = Square::from_xy(x, y as i8);
          let mut p = match Piece::parse_sfen(&c.to_string()) {
            Some(p) => p,
            None => {
              return Err(ParseSFENError::new(
                sfen,
                format!("invalid piece in cell {}", sq),
              ))
            }
          };
          if promoted {
            if !p.is_promotable() {
              return Err(ParseSFENError::new(
                sfen,
                format!("unpromotable piece in cell {}", sq),
              ));
            }
            p = p.promoted();
          }
          board.set(sq, p);
          x += 1;
        }
        promoted = false;
        if x > 9 {
          return Err(ParseSFENError::new(
            sfen,
            format!("invalid number of columns in row {}", y + 1),
          ));
        }
      }
      if x != 9 || promoted {
        return Err(ParseSFENError::new(
          sfen,
          format!("invalid number of columns in row {}", y + 1),
        ));
      }
    }
    Ok(board)
  }
  pub fn to_sfen(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (row, cells) in self.squares.chunks(9).enumerate() {
      if row > 0 {
        write!(f, "/")?;
      }
      let mut cnt = 0;
      for c in cells {
        match c {
          None => cnt += 1,
          Some(p) => {
            if cnt > 0 {
              write!(f, "{}", cnt)?;
              cnt = 0;
            }
            write!(f, "{}", p)?;
          }
        }
      }
      if cnt > 0 {
        write!(f, "{}", cnt)?;
      }
    }
    Ok(())
  }
}
