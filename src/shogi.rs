use std::fmt;

pub mod board;
pub mod color;
pub mod direction;
pub mod hand;
pub mod jishogi;
pub mod kif;
pub mod moves;
pub mod piece;
pub mod preset;
pub mod square;

pub use board::{Board, PowerDetectionOption};
pub use color::Color;
pub use direction::Direction;
pub use hand::Hand;
pub use moves::{Move, MoveFrom, MoveFromStrError, RecordMove, SpecialMove, SpecialMoveType, UsiMove};
pub use piece::{MoveType, Piece, PieceType};
pub use preset::InitialPositionType;
pub use square::Square;

use square::is_promotable_rank;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSFENError {
  pub sfen: String,
  pub message: String,
}

impl fmt::Display for ParseSFENError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}, SFEN: \"{}\"", self.message, self.sfen)
  }
}

impl std::error::Error for ParseSFENError {}

impl ParseSFENError {
  fn new(sfen: &str, message: String) -> Self {
    ParseSFENError {
      sfen: String::from(sfen),
      message,
    }
  }
}

fn check_squares(m: &Move) -> Result<(), MoveError> {
  let from_valid = match m.from {
    MoveFrom::Square(from) => from.is_valid(),
    MoveFrom::Hand(_) => true,
  };
  if from_valid && m.to.is_valid() {
    Ok(())
  } else {
    Err(MoveError::InvalidSquare)
  }
}

//why a move was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveError {
  NoPieceAtOrigin,
  NotOwnPiece,
  UnreachableDestination,
  FriendlyPieceAtDestination,
  NotPromotable,
  OutsidePromotionZone,
  //unpromoted pawn, lance or knight which could never move again
  DeadEndRank,
  KingLeftInCheck,
  PromotionOnDrop,
  WrongColor,
  NoPieceInHand,
  DestinationOccupied,
  DoublePawn,
  PawnDropMate,
  InvalidSquare,
}

impl fmt::Display for MoveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      MoveError::NoPieceAtOrigin => "no piece on the origin square",
      MoveError::NotOwnPiece => "piece of the opponent",
      MoveError::UnreachableDestination => "piece can't reach destination",
      MoveError::FriendlyPieceAtDestination => "own piece on the destination square",
      MoveError::NotPromotable => "piece can't promote",
      MoveError::OutsidePromotionZone => "promotion outside of the promotion zone",
      MoveError::DeadEndRank => "unpromoted piece has no further moves",
      MoveError::KingLeftInCheck => "king is left in check",
      MoveError::PromotionOnDrop => "dropped piece can't promote",
      MoveError::WrongColor => "not the side to move",
      MoveError::NoPieceInHand => "no such piece in hand",
      MoveError::DestinationOccupied => "drop on an occupied square",
      MoveError::DoublePawn => "two unpromoted pawns on one file",
      MoveError::PawnDropMate => "pawn drop mate",
      MoveError::InvalidSquare => "square outside of the board",
    };
    write!(f, "{}", s)
  }
}

impl std::error::Error for MoveError {}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct DoMoveOption {
  //trust the caller, e.g. when replaying a record
  pub ignore_validation: bool,
}

impl DoMoveOption {
  pub fn ignore_validation() -> Self {
    DoMoveOption {
      ignore_validation: true,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditFrom {
  Square(Square),
  Hand(Piece),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTo {
  Square(Square),
  Hand(Color),
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PositionChange {
  pub move_piece: Option<(EditFrom, EditTo)>,
  pub rotate: Option<Square>,
}

fn is_dead_end_rank(color: Color, piece_type: PieceType, rank: i8) -> bool {
  let rank = match color {
    Color::Black => rank,
    Color::White => 10 - rank,
  };
  match piece_type {
    PieceType::Pawn | PieceType::Lance => rank == 1,
    PieceType::Knight => rank <= 2,
    _ => false,
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
  board: Board,
  black_hand: Hand,
  white_hand: Hand,
  color: Color,
}

impl Position {
  pub fn board(&self) -> &Board {
    &self.board
  }
  pub fn color(&self) -> Color {
    self.color
  }
  pub fn set_color(&mut self, color: Color) {
    self.color = color;
  }
  pub fn black_hand(&self) -> &Hand {
    &self.black_hand
  }
  pub fn white_hand(&self) -> &Hand {
    &self.white_hand
  }
  pub fn hand(&self, color: Color) -> &Hand {
    match color {
      Color::Black => &self.black_hand,
      Color::White => &self.white_hand,
    }
  }
  fn hand_mut(&mut self, color: Color) -> &mut Hand {
    match color {
      Color::Black => &mut self.black_hand,
      Color::White => &mut self.white_hand,
    }
  }
  pub fn checked(&self) -> bool {
    self
      .board
      .is_checked(self.color, PowerDetectionOption::default())
  }
  pub fn create_move(&self, from: MoveFrom, to: Square) -> Option<Move> {
    let piece_type = match from {
      MoveFrom::Square(sq) => self.board.at(sq)?.piece_type,
      MoveFrom::Hand(t) => t,
    };
    Some(Move {
      from,
      to,
      promote: false,
      color: self.color,
      piece_type,
      captured_piece_type: self.board.at(to).map(|p| p.piece_type),
    })
  }
  pub fn create_move_by_usi(&self, usi: &str) -> Option<Move> {
    let m: UsiMove = usi.parse().ok()?;
    let r = self.create_move(m.from, m.to)?;
    Some(if m.promote { r.with_promote() } else { r })
  }
  fn is_movable(&self, from: Square, to: Square) -> bool {
    let (d, distance) = match from.direction_to(to) {
      Some(v) => v,
      None => return false,
    };
    let piece = match self.board.at(from) {
      Some(p) => p,
      None => return false,
    };
    match piece.move_type(d) {
      None => false,
      Some(MoveType::Short) => distance == 1,
      Some(MoveType::Long) => {
        let mut sq = from.neighbor(d);
        while sq.is_valid() {
          if sq == to {
            return true;
          }
          if self.board.at(sq).is_some() {
            return false;
          }
          sq = sq.neighbor(d);
        }
        false
      }
    }
  }
  //Squares whose pieces geometrically reach `to`. No legality check.
  pub fn list_attackers(&self, to: Square) -> Vec<Square> {
    self
      .board
      .list_non_empty_squares()
      .into_iter()
      .filter(|&from| self.is_movable(from, to))
      .collect()
  }
  pub fn list_attackers_by_piece(&self, to: Square, piece: Piece) -> Vec<Square> {
    self
      .board
      .list_squares_by_piece(piece)
      .into_iter()
      .filter(|&from| self.is_movable(from, to))
      .collect()
  }
  fn pawn_exists(&self, color: Color, file: i8) -> bool {
    let pawn = Piece::new(color, PieceType::Pawn);
    (1..=9).any(|rank| self.board.at(Square::new(file, rank)) == Some(pawn))
  }
  pub fn validate_move(&self, m: &Move) -> Result<(), MoveError> {
    check_squares(m)?;
    match m.from {
      MoveFrom::Square(from) => {
        let target = self.board.at(from).ok_or(MoveError::NoPieceAtOrigin)?;
        if target.color != self.color {
          return Err(MoveError::NotOwnPiece);
        }
        if !self.is_movable(from, m.to) {
          return Err(MoveError::UnreachableDestination);
        }
        if let Some(p) = self.board.at(m.to) {
          if p.color == self.color {
            return Err(MoveError::FriendlyPieceAtDestination);
          }
        }
        if m.promote {
          if !target.is_promotable() {
            return Err(MoveError::NotPromotable);
          }
          if !is_promotable_rank(self.color, from.rank())
            && !is_promotable_rank(self.color, m.to.rank())
          {
            return Err(MoveError::OutsidePromotionZone);
          }
        } else if is_dead_end_rank(self.color, target.piece_type, m.to.rank()) {
          return Err(MoveError::DeadEndRank);
        }
        let left_in_check = if target.piece_type == PieceType::King {
          let opt = PowerDetectionOption {
            filled: None,
            ignore: Some(from),
          };
          self.board.has_power(m.to, self.color.opposite(), opt)
        } else {
          let opt = PowerDetectionOption {
            filled: Some(m.to),
            ignore: Some(from),
          };
          self.board.is_checked(self.color, opt)
        };
        if left_in_check {
          return Err(MoveError::KingLeftInCheck);
        }
      }
      MoveFrom::Hand(piece_type) => {
        if m.promote {
          return Err(MoveError::PromotionOnDrop);
        }
        if m.color != self.color {
          return Err(MoveError::WrongColor);
        }
        if self.hand(self.color).count(piece_type) == 0 {
          return Err(MoveError::NoPieceInHand);
        }
        if self.board.at(m.to).is_some() {
          return Err(MoveError::DestinationOccupied);
        }
        if is_dead_end_rank(self.color, piece_type, m.to.rank()) {
          return Err(MoveError::DeadEndRank);
        }
        if piece_type == PieceType::Pawn && self.pawn_exists(self.color, m.to.file()) {
          return Err(MoveError::DoublePawn);
        }
        let opt = PowerDetectionOption {
          filled: Some(m.to),
          ignore: None,
        };
        if self.board.is_checked(self.color, opt) {
          return Err(MoveError::KingLeftInCheck);
        }
        if self.is_pawn_drop_mate(m) {
          return Err(MoveError::PawnDropMate);
        }
      }
    }
    Ok(())
  }
  pub fn is_valid_move(&self, m: &Move) -> bool {
    self.validate_move(m).is_ok()
  }
  /// Whether the pawn drop `m` checkmates: the king can't step away and
  /// no other defender can take the pawn without exposing its king.
  pub fn is_pawn_drop_mate(&self, m: &Move) -> bool {
    if !m.is_pawn_drop() {
      return false;
    }
    let king_square = m.to.neighbor(if m.color.is_black() {
      Direction::Up
    } else {
      Direction::Down
    });
    let king = match self.board.at(king_square) {
      Some(p) if p.piece_type == PieceType::King && p.color != m.color => p,
      _ => return false,
    };
    let filled = PowerDetectionOption {
      filled: Some(m.to),
      ignore: None,
    };
    let can_escape = king.directions().any(|d| {
      let to = king_square.neighbor(d);
      if !to.is_valid() {
        return false;
      }
      match self.board.at(to) {
        Some(p) if p.color == king.color => false,
        _ => !self.board.has_power(to, m.color, filled),
      }
    });
    if can_escape {
      return false;
    }
    !self
      .board
      .list_squares_by_color(king.color)
      .into_iter()
      .any(|from| {
        let opt = PowerDetectionOption {
          filled: Some(m.to),
          ignore: Some(from),
        };
        from != king_square
          && self.is_movable(from, m.to)
          && !self.board.is_checked(king.color, opt)
      })
  }
  pub fn do_move(&mut self, m: &Move, opt: DoMoveOption) -> Result<(), MoveError> {
    if opt.ignore_validation {
      check_squares(m)?;
    } else {
      self.validate_move(m)?;
    }
    let color = self.color;
    match m.from {
      MoveFrom::Square(from) => {
        let target = self.board.remove(from).ok_or(MoveError::NoPieceAtOrigin)?;
        let captured = self.board.at(m.to);
        self
          .board
          .set(m.to, if m.promote { target.promoted() } else { target });
        if let Some(p) = captured {
          if p.piece_type != PieceType::King {
            self.hand_mut(color).add(p.piece_type.unpromoted(), 1);
          }
        }
      }
      MoveFrom::Hand(piece_type) => {
        self.hand_mut(color).reduce(piece_type, 1);
        self.board.set(m.to, Piece::new(color, piece_type));
      }
    }
    self.color = color.opposite();
    Ok(())
  }
  pub fn undo_move(&mut self, m: &Move) {
    self.color = self.color.opposite();
    let color = self.color;
    match m.from {
      MoveFrom::Square(from) => {
        self.board.set(from, Piece::new(color, m.piece_type));
        match m.captured_piece_type {
          Some(t) => {
            self.board.set(m.to, Piece::new(color.opposite(), t));
            if t != PieceType::King {
              self.hand_mut(color).reduce(t.unpromoted(), 1);
            }
          }
          None => {
            self.board.remove(m.to);
          }
        }
      }
      MoveFrom::Hand(piece_type) => {
        self.hand_mut(color).add(piece_type, 1);
        self.board.remove(m.to);
      }
    }
  }
  pub fn is_valid_editing(&self, from: EditFrom, to: EditTo) -> bool {
    match from {
      EditFrom::Square(sq) => {
        let piece = match self.board.at(sq) {
          Some(p) => p,
          None => return false,
        };
        match to {
          EditTo::Square(t) => t.is_valid() && sq != t,
          EditTo::Hand(_) => piece.piece_type != PieceType::King,
        }
      }
      EditFrom::Hand(piece) => {
        if self.hand(piece.color).count(piece.piece_type) == 0 {
          return false;
        }
        match to {
          EditTo::Square(t) => t.is_valid() && self.board.at(t).is_none(),
          EditTo::Hand(c) => piece.color != c,
        }
      }
    }
  }
  //Free editing outside of the game rules; the side to move is untouched.
  pub fn edit(&mut self, change: PositionChange) -> bool {
    if let Some((from, to)) = change.move_piece {
      if !self.is_valid_editing(from, to) {
        return false;
      }
      match (from, to) {
        (EditFrom::Hand(piece), EditTo::Square(t)) => {
          self.hand_mut(piece.color).reduce(piece.piece_type, 1);
          self.board.set(t, piece);
        }
        (EditFrom::Hand(piece), EditTo::Hand(c)) => {
          self.hand_mut(piece.color).reduce(piece.piece_type, 1);
          self.hand_mut(c).add(piece.piece_type, 1);
        }
        (EditFrom::Square(sq), EditTo::Hand(c)) => {
          if let Some(piece) = self.board.remove(sq) {
            self.hand_mut(c).add(piece.piece_type.unpromoted(), 1);
          }
        }
        (EditFrom::Square(sq), EditTo::Square(t)) => self.board.swap(sq, t),
      }
    }
    if let Some(sq) = change.rotate {
      if let Some(piece) = self.board.at(sq) {
        self.board.set(sq, piece.rotate());
      }
    }
    true
  }
  pub fn get_sfen(&self, next_ply: u32) -> String {
    format!(
      "{} {} {} {}",
      self.board,
      self.color.to_sfen_char(),
      Hand::format_sfen(&self.black_hand, &self.white_hand),
      next_ply.max(1)
    )
  }
  pub fn sfen(&self) -> String {
    self.get_sfen(1)
  }
  /// Parses "<board> <color> <hands> <move number>", optionally prefixed by "sfen".
  /// The move number is checked but not stored.
  pub fn parse_sfen(sfen: &str) -> Result<Self, ParseSFENError> {
    let mut a: Vec<_> = sfen.split(' ').collect();
    if a.len() == 5 && a[0] == "sfen" {
      a.remove(0);
    }
    if a.len() != 4 {
      return Err(ParseSFENError::new(
        sfen,
        format!(
          "invalid number of tokens ({}), expected <position> <color> <pocket> <move>",
          a.len()
        ),
      ));
    }
    let board = Board::parse_sfen(a[0]).map_err(|e| ParseSFENError::new(sfen, e.message))?;
    let color = Color::from_sfen(a[1])
      .ok_or_else(|| ParseSFENError::new(sfen, format!("invalid color '{}'", a[1])))?;
    let (black_hand, white_hand) = Hand::parse_sfen(a[2])
      .ok_or_else(|| ParseSFENError::new(sfen, format!("invalid pockets '{}'", a[2])))?;
    if a[3].is_empty() || !a[3].chars().all(|c| c.is_ascii_digit()) {
      return Err(ParseSFENError::new(
        sfen,
        format!("invalid move number '{}'", a[3]),
      ));
    }
    Ok(Position {
      board,
      black_hand,
      white_hand,
      color,
    })
  }
  pub fn is_valid_sfen(sfen: &str) -> bool {
    Position::parse_sfen(sfen).is_ok()
  }
  pub fn reset_by_sfen(&mut self, sfen: &str) -> Result<(), ParseSFENError> {
    *self = Position::parse_sfen(sfen)?;
    Ok(())
  }
  pub fn reset(&mut self, t: InitialPositionType) {
    if let Ok(pos) = Position::parse_sfen(t.sfen()) {
      *self = pos;
    }
  }
  pub fn from_initial_position_type(t: InitialPositionType) -> Self {
    let mut pos = Position::empty();
    pos.reset(t);
    pos
  }
  pub fn empty() -> Self {
    Position {
      board: Board::default(),
      black_hand: Hand::default(),
      white_hand: Hand::default(),
      color: Color::Black,
    }
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.sfen())
  }
}

impl Default for Position {
  fn default() -> Self {
    Position::from_initial_position_type(InitialPositionType::Standard)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  #[test]
  fn test_dead_end_rank() {
    assert!(is_dead_end_rank(Color::Black, PieceType::Pawn, 1));
    assert!(!is_dead_end_rank(Color::Black, PieceType::Pawn, 2));
    assert!(is_dead_end_rank(Color::Black, PieceType::Knight, 2));
    assert!(is_dead_end_rank(Color::White, PieceType::Lance, 9));
    assert!(is_dead_end_rank(Color::White, PieceType::Knight, 8));
    assert!(!is_dead_end_rank(Color::White, PieceType::Knight, 7));
    assert!(!is_dead_end_rank(Color::White, PieceType::Silver, 9));
  }
  #[test]
  fn test_default_is_standard() {
    assert_eq!(Position::default().sfen(), preset::STANDARD);
  }
}
