use std::any::Any;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use crate::shogi::kif::{format_special_move, seconds_to_hhmmss, seconds_to_mss};
use crate::shogi::{Color, RecordMove, SpecialMove, SpecialMoveType};

/// Handle of a node inside one `Record`. Handles of removed nodes go stale:
/// their slot may be reused, but the generation no longer matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
  index: u32,
  generation: u32,
}

pub type CustomData = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Debug)]
pub struct Node {
  pub(super) ply: u32,
  pub(super) prev: Option<NodeId>,
  pub(super) next: Option<NodeId>,
  pub(super) branch: Option<NodeId>,
  pub(super) branch_index: u32,
  pub(super) active_branch: bool,
  pub(super) next_color: Color,
  pub(super) record_move: RecordMove,
  pub(super) is_check: bool,
  pub(super) display_text: String,
  //position after the move, with the number of the next move
  pub(super) sfen: String,
  pub(super) elapsed_ms: u64,
  pub(super) total_elapsed_ms: u64,
  comment: String,
  bookmark: String,
  custom_data: Option<CustomData>,
}

impl Node {
  pub(super) fn new(
    ply: u32,
    prev: Option<NodeId>,
    branch_index: u32,
    next_color: Color,
    record_move: RecordMove,
    is_check: bool,
    display_text: String,
  ) -> Self {
    Node {
      ply,
      prev,
      next: None,
      branch: None,
      branch_index,
      active_branch: true,
      next_color,
      record_move,
      is_check,
      display_text,
      sfen: String::new(),
      elapsed_ms: 0,
      total_elapsed_ms: 0,
      comment: String::new(),
      bookmark: String::new(),
      custom_data: None,
    }
  }
  pub(super) fn new_root(color: Color) -> Self {
    let m = SpecialMove::new(SpecialMoveType::Start);
    let display_text = format_special_move(&m);
    Node::new(0, None, 0, color, m.into(), false, display_text)
  }
  pub fn ply(&self) -> u32 {
    self.ply
  }
  pub fn prev(&self) -> Option<NodeId> {
    self.prev
  }
  pub fn next(&self) -> Option<NodeId> {
    self.next
  }
  pub fn branch(&self) -> Option<NodeId> {
    self.branch
  }
  pub fn branch_index(&self) -> u32 {
    self.branch_index
  }
  pub fn is_active_branch(&self) -> bool {
    self.active_branch
  }
  pub fn next_color(&self) -> Color {
    self.next_color
  }
  pub fn record_move(&self) -> &RecordMove {
    &self.record_move
  }
  pub fn is_check(&self) -> bool {
    self.is_check
  }
  pub fn display_text(&self) -> &str {
    &self.display_text
  }
  pub fn sfen(&self) -> &str {
    &self.sfen
  }
  pub fn elapsed_ms(&self) -> u64 {
    self.elapsed_ms
  }
  pub fn total_elapsed_ms(&self) -> u64 {
    self.total_elapsed_ms
  }
  //" 1:05 / 00:12:34"
  pub fn time_text(&self) -> String {
    format!(
      "{} / {}",
      seconds_to_mss(self.elapsed_ms / 1000),
      seconds_to_hhmmss(self.total_elapsed_ms / 1000)
    )
  }
  pub fn comment(&self) -> &str {
    &self.comment
  }
  pub fn set_comment(&mut self, comment: &str) {
    self.comment = comment.to_owned();
  }
  pub fn bookmark(&self) -> &str {
    &self.bookmark
  }
  pub fn set_bookmark(&mut self, bookmark: &str) {
    self.bookmark = bookmark.to_owned();
  }
  pub fn custom_data(&self) -> Option<&CustomData> {
    self.custom_data.as_ref()
  }
  pub fn set_custom_data(&mut self, data: Option<CustomData>) {
    self.custom_data = data;
  }
}

#[derive(Clone, Debug)]
struct Slot {
  generation: u32,
  node: Option<Node>,
}

#[derive(Clone, Debug, Default)]
pub(super) struct NodeArena {
  slots: Vec<Slot>,
  free: Vec<u32>,
  len: usize,
}

impl NodeArena {
  pub fn insert(&mut self, node: Node) -> NodeId {
    self.len += 1;
    match self.free.pop() {
      Some(index) => {
        let slot = &mut self.slots[index as usize];
        slot.node = Some(node);
        NodeId {
          index,
          generation: slot.generation,
        }
      }
      None => {
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
          generation: 0,
          node: Some(node),
        });
        NodeId {
          index,
          generation: 0,
        }
      }
    }
  }
  pub fn remove(&mut self, id: NodeId) -> Option<Node> {
    let slot = self.slots.get_mut(id.index as usize)?;
    if slot.generation != id.generation {
      return None;
    }
    let node = slot.node.take()?;
    slot.generation = slot.generation.wrapping_add(1);
    self.free.push(id.index);
    self.len -= 1;
    Some(node)
  }
  pub fn get(&self, id: NodeId) -> Option<&Node> {
    let slot = self.slots.get(id.index as usize)?;
    if slot.generation != id.generation {
      return None;
    }
    slot.node.as_ref()
  }
  pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
    let slot = self.slots.get_mut(id.index as usize)?;
    if slot.generation != id.generation {
      return None;
    }
    slot.node.as_mut()
  }
  pub fn len(&self) -> usize {
    self.len
  }
  pub fn clear(&mut self) {
    self.slots.clear();
    self.free.clear();
    self.len = 0;
  }
}

impl Index<NodeId> for NodeArena {
  type Output = Node;
  fn index(&self, id: NodeId) -> &Node {
    match self.get(id) {
      Some(node) => node,
      None => panic!("stale node id {:?}", id),
    }
  }
}

impl IndexMut<NodeId> for NodeArena {
  fn index_mut(&mut self, id: NodeId) -> &mut Node {
    match self.get_mut(id) {
      Some(node) => node,
      None => panic!("stale node id {:?}", id),
    }
  }
}
