use std::fmt;

use super::Record;
use crate::shogi::preset::STANDARD;
use crate::shogi::{Color, DoMoveOption, Position, RecordMove, SpecialMoveType, UsiMove};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct USIFormatOptions {
  //"startpos" instead of the SFEN of the standard position
  pub startpos: bool,
  //trailing "resign" when the path ends with a resignation
  pub resign: bool,
  //the whole active path, not only the moves up to the cursor
  pub all_moves: bool,
}

impl Default for USIFormatOptions {
  fn default() -> Self {
    USIFormatOptions {
      startpos: true,
      resign: false,
      all_moves: false,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseUSIError {
  InvalidUSI(String),
  InvalidMove(String),
}

impl fmt::Display for ParseUSIError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseUSIError::InvalidUSI(s) => write!(f, "invalid USI: \"{}\"", s),
      ParseUSIError::InvalidMove(s) => write!(f, "invalid move: \"{}\"", s),
    }
  }
}

impl std::error::Error for ParseUSIError {}

const PREFIX_POSITION_STARTPOS: &str = "position startpos ";
const PREFIX_POSITION_SFEN: &str = "position sfen ";
const PREFIX_STARTPOS: &str = "startpos ";
const PREFIX_SFEN: &str = "sfen ";
const PREFIX_MOVES: &str = "moves ";

impl Record {
  pub fn usi(&self) -> String {
    self.get_usi(USIFormatOptions::default())
  }
  //"position startpos moves 7g7f 3c3d" along the active path.
  pub fn get_usi(&self, opts: USIFormatOptions) -> String {
    let mut s = self.usi_position(opts.startpos);
    let mut moves = Vec::new();
    let mut p = self.first;
    loop {
      p = self.active_sibling(p);
      let node = &self.nodes[p];
      match &node.record_move {
        RecordMove::Move(m) => moves.push(m.usi()),
        RecordMove::Special(sm) if opts.resign && sm.move_type == SpecialMoveType::Resign => {
          moves.push(String::from("resign"))
        }
        RecordMove::Special(_) => (),
      }
      match node.next {
        Some(next) if opts.all_moves || p != self.current => p = next,
        _ => break,
      }
    }
    if !moves.is_empty() {
      s.push_str(" moves ");
      s.push_str(&moves.join(" "));
    }
    s
  }
  fn usi_position(&self, startpos: bool) -> String {
    let sfen = self.initial_position.sfen();
    if startpos && sfen == STANDARD {
      String::from("position startpos")
    } else {
      format!("position sfen {}", sfen)
    }
  }
  pub fn get_usi_lines(&self) -> Vec<String> {
    let mut r = Vec::new();
    for id in self.descendants(self.first) {
      if self.nodes[id].next.is_some() {
        continue;
      }
      let mut moves = Vec::new();
      let mut p = Some(id);
      while let Some(q) = p {
        if let Some(m) = self.nodes[q].record_move.as_move() {
          moves.push(m.usi());
        }
        p = self.nodes[q].prev;
      }
      let mut s = self.usi_position(true);
      if !moves.is_empty() {
        moves.reverse();
        s.push_str(" moves ");
        s.push_str(&moves.join(" "));
      }
      r.push(s);
    }
    if r.is_empty() {
      r.push(self.usi_position(true));
    }
    r
  }
  pub fn new_by_usi(data: &str) -> Result<Record, ParseUSIError> {
    if data == "position startpos" || data == "startpos" {
      return Ok(Record::default());
    }
    if let Some(rest) = data.strip_prefix(PREFIX_POSITION_STARTPOS) {
      Record::new_by_usi_moves(Position::default(), rest)
    } else if let Some(rest) = data.strip_prefix(PREFIX_POSITION_SFEN) {
      Record::new_by_usi_sfen(rest)
    } else if let Some(rest) = data.strip_prefix(PREFIX_STARTPOS) {
      Record::new_by_usi_moves(Position::default(), rest)
    } else if let Some(rest) = data.strip_prefix(PREFIX_SFEN) {
      Record::new_by_usi_sfen(rest)
    } else if data.starts_with(PREFIX_MOVES) {
      Record::new_by_usi_moves(Position::default(), data)
    } else {
      Err(ParseUSIError::InvalidUSI(data.to_owned()))
    }
  }
  fn new_by_usi_sfen(data: &str) -> Result<Record, ParseUSIError> {
    let sections: Vec<_> = data.split(' ').collect();
    if sections.len() < 4 {
      return Err(ParseUSIError::InvalidUSI(data.to_owned()));
    }
    let pos = Position::parse_sfen(&sections[..4].join(" "))
      .map_err(|_| ParseUSIError::InvalidUSI(data.to_owned()))?;
    Record::new_by_usi_moves(pos, &sections[4..].join(" "))
  }
  fn new_by_usi_moves(pos: Position, data: &str) -> Result<Record, ParseUSIError> {
    let mut record = Record::new(pos);
    if data.is_empty() {
      return Ok(record);
    }
    let mut sections = data.split(' ');
    if sections.next() != Some("moves") {
      return Err(ParseUSIError::InvalidUSI(data.to_owned()));
    }
    for s in sections {
      //"resign" and other trailing words end the move list
      let u: UsiMove = match s.parse() {
        Ok(u) => u,
        Err(_) => break,
      };
      let m = match record.position().create_move(u.from, u.to) {
        Some(m) if u.promote => m.with_promote(),
        Some(m) => m,
        None => return Err(ParseUSIError::InvalidMove(s.to_owned())),
      };
      record
        .append(m, DoMoveOption::ignore_validation())
        .map_err(|_| ParseUSIError::InvalidMove(s.to_owned()))?;
    }
    Ok(record)
  }
}

//Side to move after the USI position command `usi`.
pub fn next_color_from_usi(usi: &str) -> Color {
  let sections: Vec<_> = usi.trim().split(' ').collect();
  let section = |i: usize| sections.get(i).copied();
  let startpos = section(1) == Some("startpos");
  let base = if startpos || section(3) == Some("b") {
    Color::Black
  } else {
    Color::White
  };
  let first_move_index = if startpos {
    if section(2) == Some("moves") {
      3
    } else {
      2
    }
  } else if section(6) == Some("moves") {
    7
  } else {
    6
  };
  if sections.len().saturating_sub(first_move_index) % 2 == 0 {
    base
  } else {
    base.opposite()
  }
}
