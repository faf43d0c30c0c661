use crate::shogi::{DoMoveOption, Move, MoveError, Position};

/// Moves applied to a borrowed position. Whatever is still applied
/// when the walk goes out of scope is undone in reverse order.
pub struct Walk<'a> {
  pos: &'a mut Position,
  moves: Vec<Move>,
}

impl<'a> Walk<'a> {
  pub fn new(pos: &'a mut Position) -> Self {
    Walk {
      pos,
      moves: Vec::new(),
    }
  }
  pub fn position(&self) -> &Position {
    self.pos
  }
  pub fn len(&self) -> usize {
    self.moves.len()
  }
  pub fn is_empty(&self) -> bool {
    self.moves.is_empty()
  }
  //moves come from a record, so only structural failures are reported
  pub fn push(&mut self, m: Move) -> Result<(), MoveError> {
    self.pos.do_move(&m, DoMoveOption::ignore_validation())?;
    self.moves.push(m);
    Ok(())
  }
  pub fn pop(&mut self) -> Option<Move> {
    let m = self.moves.pop()?;
    self.pos.undo_move(&m);
    Some(m)
  }
  pub fn undo(&mut self) {
    while self.pop().is_some() {}
  }
}

impl Drop for Walk<'_> {
  fn drop(&mut self) {
    self.undo();
  }
}
