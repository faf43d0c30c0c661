//! Entering-of-king declaration scoring.

use super::color::Color;
use super::piece::{expected_number_of_pieces, PieceType, NUMBER_OF_PIECE_TYPES};
use super::Position;

pub type PieceCounts = [i32; NUMBER_OF_PIECE_TYPES];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JishogiDeclarationRule {
  //24 points draw, 31 points win
  General24,
  //black needs 28 points, white 27
  General27,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JishogiDeclarationResult {
  Win,
  Draw,
  Lose,
}

fn point(piece_type: PieceType) -> i32 {
  match piece_type.unpromoted() {
    PieceType::Bishop | PieceType::Rook => 5,
    _ => 1,
  }
}

pub fn count_existing_pieces(pos: &Position) -> PieceCounts {
  let mut r = [0; NUMBER_OF_PIECE_TYPES];
  for (_, p) in pos.board().iter() {
    r[p.piece_type.index()] += 1;
  }
  for &color in Color::ALL.iter() {
    for (t, n) in pos.hand(color).counts() {
      r[t.index()] += n as i32;
    }
  }
  r
}

//Pieces missing from a full set, i.e. removed by a handicap.
//Promoted kinds are folded into their base kinds and always read 0.
pub fn count_not_existing_pieces(pos: &Position) -> PieceCounts {
  let existing = count_existing_pieces(pos);
  let mut r = [0; NUMBER_OF_PIECE_TYPES];
  for &t in PieceType::ALL.iter().filter(|t| !t.is_promoted()) {
    let mut n = expected_number_of_pieces(t) as i32 - existing[t.index()];
    if t.promoted() != t {
      n -= existing[t.promoted().index()];
    }
    r[t.index()] = n;
  }
  r
}

fn hand_and_handicap_point(pos: &Position, color: Color) -> i32 {
  let mut point_sum: i32 = pos
    .hand(color)
    .counts()
    .map(|(t, n)| point(t) * n as i32)
    .sum();
  if color == Color::White {
    //the handicap giver gets the removed pieces back
    let not_existing = count_not_existing_pieces(pos);
    point_sum += PieceType::HAND
      .iter()
      .map(|&t| point(t) * not_existing[t.index()])
      .sum::<i32>();
  }
  point_sum
}

fn invading_piece_types(pos: &Position, color: Color) -> Vec<PieceType> {
  pos
    .board()
    .iter()
    .filter(|(sq, p)| {
      sq.is_promotion_zone(color) && p.color == color && p.piece_type != PieceType::King
    })
    .map(|(_, p)| p.piece_type)
    .collect()
}

pub fn count_jishogi_point(pos: &Position, color: Color) -> i32 {
  let board_point: i32 = pos
    .board()
    .iter()
    .filter(|(_, p)| p.color == color && p.piece_type != PieceType::King)
    .map(|(_, p)| point(p.piece_type))
    .sum();
  board_point + hand_and_handicap_point(pos, color)
}

//Only invading pieces plus hand count toward a declaration.
pub fn count_jishogi_declaration_point(pos: &Position, color: Color) -> i32 {
  let board_point: i32 = invading_piece_types(pos, color)
    .into_iter()
    .map(point)
    .sum();
  board_point + hand_and_handicap_point(pos, color)
}

pub fn judge_jishogi_declaration(
  rule: JishogiDeclarationRule,
  pos: &Position,
  color: Color,
) -> JishogiDeclarationResult {
  if pos.color() != color {
    return JishogiDeclarationResult::Lose;
  }
  match pos.board().find_king(color) {
    Some(king) if king.is_promotion_zone(color) => (),
    _ => return JishogiDeclarationResult::Lose,
  }
  if pos.checked() {
    return JishogiDeclarationResult::Lose;
  }
  if invading_piece_types(pos, color).len() < 10 {
    return JishogiDeclarationResult::Lose;
  }
  let p = count_jishogi_declaration_point(pos, color);
  let r = match rule {
    JishogiDeclarationRule::General24 => {
      if p >= 31 {
        JishogiDeclarationResult::Win
      } else if p >= 24 {
        JishogiDeclarationResult::Draw
      } else {
        JishogiDeclarationResult::Lose
      }
    }
    JishogiDeclarationRule::General27 => {
      let threshold = if color == Color::Black { 28 } else { 27 };
      if p >= threshold {
        JishogiDeclarationResult::Win
      } else {
        JishogiDeclarationResult::Draw
      }
    }
  };
  log::debug!("{} declares with {} points: {:?}", color, p, r);
  r
}
