#![allow(dead_code)]
use shogi_record::shogi::{DoMoveOption, Move, MoveFrom, PieceType, Position, Square};

pub fn position(sfen: &str) -> Position {
  Position::parse_sfen(sfen).unwrap()
}

pub fn usi_move(pos: &Position, usi: &str) -> Move {
  pos
    .create_move_by_usi(usi)
    .unwrap_or_else(|| panic!("can't create move {} in {}", usi, pos))
}

pub fn play(pos: &mut Position, moves: &[&str]) {
  for usi in moves {
    let m = usi_move(pos, usi);
    pos
      .do_move(&m, DoMoveOption::default())
      .unwrap_or_else(|err| panic!("move {}: {}", usi, err));
  }
}

//every from/to pair of the side to move, with and without promotion
pub fn candidate_moves(pos: &Position) -> Vec<Move> {
  let mut r = Vec::new();
  for &from in pos.board().list_squares_by_color(pos.color()).iter() {
    for &to in Square::all().iter() {
      if let Some(m) = pos.create_move(MoveFrom::Square(from), to) {
        r.push(m);
        r.push(m.with_promote());
      }
    }
  }
  for &t in PieceType::HAND.iter() {
    if pos.hand(pos.color()).count(t) == 0 {
      continue;
    }
    for &to in Square::all().iter() {
      if let Some(m) = pos.create_move(MoveFrom::Hand(t), to) {
        r.push(m);
      }
    }
  }
  r
}

pub fn legal_moves(pos: &Position) -> Vec<Move> {
  candidate_moves(pos)
    .into_iter()
    .filter(|m| pos.is_valid_move(m))
    .collect()
}

pub fn perft(pos: &mut Position, depth: usize) -> u32 {
  if depth == 0 {
    return 1;
  }
  let mut r = 0;
  for m in legal_moves(pos) {
    pos.do_move(&m, DoMoveOption::default()).unwrap();
    r += perft(pos, depth - 1);
    pos.undo_move(&m);
  }
  r
}
