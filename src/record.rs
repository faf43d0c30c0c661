//! Game record: a tree of moves with a cursor and a live position.
//!
//! `first` is a synthetic root (ply 0). A node's `next` is its first
//! continuation and `branch` its next sibling, so the alternatives at one ply
//! form a chain `prev.next -> branch -> branch ...`, exactly one of them active.
//! The live position always equals the initial position with the moves from
//! `first` to `current` applied.

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

mod metadata;
mod node;
mod usi;
mod walk;

pub use metadata::{RecordMetadata, RecordMetadataKey};
pub use node::{CustomData, Node, NodeId};
pub use usi::{next_color_from_usi, ParseUSIError, USIFormatOptions};
pub use walk::Walk;

use crate::shogi::kif::{format_move, format_special_move};
use crate::shogi::{Color, DoMoveOption, MoveError, Position, RecordMove};
use node::NodeArena;

#[derive(Clone, Debug)]
pub struct Record {
  pub metadata: RecordMetadata,
  initial_position: Position,
  position: Position,
  nodes: NodeArena,
  first: NodeId,
  current: NodeId,
  //keyed by SFEN without move number, counts only the live path
  repetition_counts: HashMap<String, u32>,
  repetition_start: HashMap<String, u32>,
}

impl Default for Record {
  fn default() -> Self {
    Record::new(Position::default())
  }
}

impl Record {
  pub fn new(position: Position) -> Self {
    let mut nodes = NodeArena::default();
    let mut root = Node::new_root(position.color());
    root.sfen = position.sfen();
    let first = nodes.insert(root);
    let mut r = Record {
      metadata: RecordMetadata::default(),
      initial_position: position.clone(),
      position,
      nodes,
      first,
      current: first,
      repetition_counts: HashMap::new(),
      repetition_start: HashMap::new(),
    };
    r.increment_repetition();
    r
  }
  pub fn initial_position(&self) -> &Position {
    &self.initial_position
  }
  pub fn position(&self) -> &Position {
    &self.position
  }
  pub fn first(&self) -> &Node {
    &self.nodes[self.first]
  }
  pub fn first_id(&self) -> NodeId {
    self.first
  }
  pub fn current(&self) -> &Node {
    &self.nodes[self.current]
  }
  pub fn current_id(&self) -> NodeId {
    self.current
  }
  //Comment, bookmark and custom data of the current node are editable.
  pub fn current_mut(&mut self) -> &mut Node {
    &mut self.nodes[self.current]
  }
  pub fn node(&self, id: NodeId) -> Option<&Node> {
    self.nodes.get(id)
  }
  pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
    self.nodes.get_mut(id)
  }
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }
  fn active_sibling(&self, id: NodeId) -> NodeId {
    let mut p = id;
    while !self.nodes[p].active_branch {
      match self.nodes[p].branch {
        Some(b) => p = b,
        None => return id,
      }
    }
    p
  }
  pub fn moves_before(&self) -> Vec<NodeId> {
    let mut r = vec![self.current];
    let mut p = self.nodes[self.current].prev;
    while let Some(id) = p {
      r.push(id);
      p = self.nodes[id].prev;
    }
    r.reverse();
    r
  }
  pub fn moves(&self) -> Vec<NodeId> {
    let mut r = self.moves_before();
    let mut p = self.nodes[self.current].next;
    while let Some(id) = p {
      let id = self.active_sibling(id);
      r.push(id);
      p = self.nodes[id].next;
    }
    r
  }
  pub fn length(&self) -> u32 {
    let mut len = self.nodes[self.current].ply;
    let mut p = self.nodes[self.current].next;
    while let Some(id) = p {
      let id = self.active_sibling(id);
      len = self.nodes[id].ply;
      p = self.nodes[id].next;
    }
    len
  }
  pub fn branch_begin(&self) -> NodeId {
    match self.nodes[self.current].prev {
      Some(prev) => self.nodes[prev].next.unwrap_or(self.current),
      None => self.current,
    }
  }
  pub fn has_branch(&self, id: NodeId) -> bool {
    self
      .nodes
      .get(id)
      .and_then(|node| node.prev)
      .and_then(|prev| self.nodes[prev].next)
      .map_or(false, |head| self.nodes[head].branch.is_some())
  }
  pub fn is_first_branch(&self, id: NodeId) -> bool {
    match self.nodes.get(id).and_then(|node| node.prev) {
      Some(prev) => self.nodes[prev].next == Some(id),
      None => true,
    }
  }
  pub fn is_last_move(&self, id: NodeId) -> bool {
    let mut p = self.nodes.get(id).and_then(|node| node.next);
    while let Some(q) = p {
      if self.nodes[q].record_move.is_physical() {
        return false;
      }
      p = self.nodes[q].branch;
    }
    true
  }
  /// Node ids below `id` in depth-first order, alternatives after the main line.
  pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
    let mut r = Vec::new();
    let mut stack: Vec<NodeId> = self.nodes.get(id).and_then(|node| node.next).into_iter().collect();
    while let Some(p) = stack.pop() {
      r.push(p);
      let node = &self.nodes[p];
      stack.extend(node.branch);
      stack.extend(node.next);
    }
    r
  }
  pub fn clear(&mut self, position: Option<Position>) {
    self.metadata = RecordMetadata::default();
    if let Some(pos) = position {
      self.initial_position = pos;
    }
    self.position = self.initial_position.clone();
    self.nodes.clear();
    let mut root = Node::new_root(self.initial_position.color());
    root.sfen = self.initial_position.sfen();
    self.first = self.nodes.insert(root);
    self.current = self.first;
    self.repetition_counts.clear();
    self.repetition_start.clear();
    self.increment_repetition();
  }
  pub fn go_back(&mut self) -> bool {
    let node = &self.nodes[self.current];
    let prev = match node.prev {
      Some(prev) => prev,
      None => return false,
    };
    if let Some(m) = node.record_move.as_move().copied() {
      self.decrement_repetition();
      self.position.undo_move(&m);
    }
    self.current = prev;
    true
  }
  pub fn go_forward(&mut self) -> bool {
    let next = match self.nodes[self.current].next {
      Some(next) => self.active_sibling(next),
      None => return false,
    };
    let m = self.nodes[next].record_move.as_move().copied();
    if let Some(m) = m.as_ref() {
      if let Err(err) = self
        .position
        .do_move(m, DoMoveOption::ignore_validation())
      {
        warn!("can't replay {} at ply {}: {}", m, self.nodes[next].ply, err);
        return false;
      }
    }
    self.current = next;
    if m.is_some() {
      self.increment_repetition();
    }
    true
  }
  pub fn goto(&mut self, ply: u32) {
    while ply < self.nodes[self.current].ply {
      if !self.go_back() {
        break;
      }
    }
    while ply > self.nodes[self.current].ply {
      if !self.go_forward() {
        break;
      }
    }
  }
  pub fn reset_all_branch_selection(&mut self) {
    for id in self.descendants(self.first) {
      let active = self.is_first_branch(id);
      self.nodes[id].active_branch = active;
    }
  }
  pub fn switch_branch_by_index(&mut self, index: u32) -> bool {
    let current = &self.nodes[self.current];
    if current.branch_index == index {
      return true;
    }
    let prev = match current.prev {
      Some(prev) => prev,
      None => return false,
    };
    let mut target = None;
    let mut p = self.nodes[prev].next;
    while let Some(q) = p {
      if self.nodes[q].branch_index == index {
        target = Some(q);
        break;
      }
      p = self.nodes[q].branch;
    }
    let target = match target {
      Some(target) => target,
      None => return false,
    };
    let old = self.nodes[self.current].record_move.as_move().copied();
    let new = self.nodes[target].record_move.as_move().copied();
    if let Some(m) = old.as_ref() {
      self.decrement_repetition();
      self.position.undo_move(m);
    }
    if let Some(m) = new.as_ref() {
      if let Err(err) = self
        .position
        .do_move(m, DoMoveOption::ignore_validation())
      {
        warn!("can't switch to branch #{}: {}", index, err);
        if let Some(m) = old.as_ref() {
          if self
            .position
            .do_move(m, DoMoveOption::ignore_validation())
            .is_ok()
          {
            self.increment_repetition();
          }
        }
        return false;
      }
    }
    let mut p = self.nodes[prev].next;
    while let Some(q) = p {
      self.nodes[q].active_branch = q == target;
      p = self.nodes[q].branch;
    }
    self.current = target;
    if new.is_some() {
      self.increment_repetition();
    }
    true
  }
  /// Plays `m` from the current node. An identical move already registered
  /// there is reused; otherwise a new node is added after the last sibling.
  /// A special move at the cursor is left first, so special moves stay leaves.
  pub fn append<M: Into<RecordMove>>(&mut self, m: M, opt: DoMoveOption) -> Result<(), MoveError> {
    let record_move = m.into();
    let last_move = self.nodes[self.current].record_move.as_move().copied();
    let display_text = match &record_move {
      RecordMove::Move(m) => format_move(&self.position, m, last_move.as_ref()),
      RecordMove::Special(s) => format_special_move(s),
    };
    let physical = record_move.is_physical();
    let mut is_check = false;
    if let RecordMove::Move(m) = &record_move {
      if let Err(err) = self.position.do_move(m, opt) {
        debug!("move {} rejected at ply {}: {}", m, self.nodes[self.current].ply, err);
        return Err(err);
      }
      is_check = self.position.checked();
    }
    if self.current != self.first && !self.nodes[self.current].record_move.is_physical() {
      self.go_back();
    }
    let parent = self.current;
    let ply = self.nodes[parent].ply + 1;
    let next_color = self.position.color();
    let sfen = self.position.get_sfen(ply + 1);
    match self.nodes[parent].next {
      None => {
        let mut node = Node::new(
          ply,
          Some(parent),
          0,
          next_color,
          record_move,
          is_check,
          display_text,
        );
        node.sfen = sfen;
        let id = self.nodes.insert(node);
        self.nodes[parent].next = Some(id);
        self.current = id;
        self.set_elapsed_ms(id, 0);
        trace!("ply {}: {}", ply, self.nodes[id].display_text);
      }
      Some(head) => {
        let mut existing = None;
        let mut last = head;
        let mut p = Some(head);
        while let Some(q) = p {
          let node = &mut self.nodes[q];
          node.active_branch = false;
          if existing.is_none() && node.record_move == record_move {
            existing = Some(q);
          }
          last = q;
          p = node.branch;
        }
        match existing {
          Some(q) => {
            self.nodes[q].active_branch = true;
            self.current = q;
          }
          None => {
            let branch_index = self.nodes[last].branch_index + 1;
            let mut node = Node::new(
              ply,
              Some(parent),
              branch_index,
              next_color,
              record_move,
              is_check,
              display_text,
            );
            node.sfen = sfen;
            let id = self.nodes.insert(node);
            self.nodes[last].branch = Some(id);
            self.current = id;
            self.set_elapsed_ms(id, 0);
            debug!(
              "ply {}: new branch #{} {}",
              ply, branch_index, self.nodes[id].display_text
            );
          }
        }
      }
    }
    if physical {
      self.increment_repetition();
    }
    Ok(())
  }
  pub fn swap_with_next_branch(&mut self) -> bool {
    match self.nodes[self.current].branch {
      Some(next) => self.swap_with_previous(next),
      None => false,
    }
  }
  pub fn swap_with_previous_branch(&mut self) -> bool {
    self.swap_with_previous(self.current)
  }
  fn swap_branch_indices(&mut self, a: NodeId, b: NodeId) {
    let i = self.nodes[a].branch_index;
    self.nodes[a].branch_index = self.nodes[b].branch_index;
    self.nodes[b].branch_index = i;
  }
  fn swap_with_previous(&mut self, target: NodeId) -> bool {
    let prev = match self.nodes[target].prev {
      Some(prev) => prev,
      None => return false,
    };
    let head = match self.nodes[prev].next {
      Some(head) if head != target => head,
      _ => return false,
    };
    if self.nodes[head].branch == Some(target) {
      self.nodes[head].branch = self.nodes[target].branch;
      self.nodes[target].branch = Some(head);
      self.nodes[prev].next = Some(target);
      self.swap_branch_indices(target, head);
      return true;
    }
    let mut p = head;
    while let Some(pair) = self.nodes[p].branch {
      if self.nodes[pair].branch == Some(target) {
        self.nodes[pair].branch = self.nodes[target].branch;
        self.nodes[target].branch = Some(pair);
        self.nodes[p].branch = Some(target);
        self.swap_branch_indices(target, pair);
        return true;
      }
      p = pair;
    }
    false
  }
  //frees `root` and everything below it, not its siblings
  fn free_subtree(&mut self, root: NodeId) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
      if let Some(node) = self.nodes.remove(id) {
        stack.extend(node.next);
        if id != root {
          stack.extend(node.branch);
        }
      }
    }
  }
  fn free_children(&mut self, id: NodeId) {
    let mut p = self.nodes[id].next.take();
    while let Some(q) = p {
      p = self.nodes[q].branch;
      self.free_subtree(q);
    }
  }
  /// Deletes the current node with its subtree and steps back.
  /// At the root every continuation is deleted instead.
  pub fn remove_current_move(&mut self) -> bool {
    let target = self.current;
    if !self.go_back() {
      if self.nodes[self.current].next.is_none() {
        return false;
      }
      self.free_children(self.current);
      debug!("all moves removed");
      return true;
    }
    let parent = self.current;
    let rest = self.nodes[target].branch;
    if self.nodes[parent].next == Some(target) {
      self.nodes[parent].next = rest;
    } else {
      let mut p = self.nodes[parent].next;
      while let Some(q) = p {
        if self.nodes[q].branch == Some(target) {
          self.nodes[q].branch = rest;
          break;
        }
        p = self.nodes[q].branch;
      }
    }
    let ply = self.nodes[target].ply;
    self.free_subtree(target);
    let mut branch_index = 0;
    let mut p = self.nodes[parent].next;
    while let Some(q) = p {
      self.nodes[q].branch_index = branch_index;
      branch_index += 1;
      p = self.nodes[q].branch;
    }
    if let Some(head) = self.nodes[parent].next {
      self.nodes[head].active_branch = true;
    }
    debug!("move at ply {} removed", ply);
    true
  }
  pub fn remove_next_move(&mut self) -> bool {
    if self.nodes[self.current].next.is_none() {
      return false;
    }
    self.free_children(self.current);
    true
  }
  pub fn set_elapsed_ms(&mut self, id: NodeId, elapsed_ms: u64) -> bool {
    match self.nodes.get_mut(id) {
      Some(node) => node.elapsed_ms = elapsed_ms,
      None => return false,
    }
    self.update_total_elapsed_ms(id);
    let mut stack = Vec::new();
    let mut p = self.nodes[id].next;
    while let Some(q) = p {
      self.update_total_elapsed_ms(q);
      let node = &self.nodes[q];
      stack.extend(node.branch);
      p = node.next.or_else(|| stack.pop());
    }
    true
  }
  //own time plus the total of the same side's previous move
  fn update_total_elapsed_ms(&mut self, id: NodeId) {
    let node = &self.nodes[id];
    let base = node
      .prev
      .and_then(|prev| self.nodes[prev].prev)
      .map_or(0, |pp| self.nodes[pp].total_elapsed_ms);
    let total = node.elapsed_ms + base;
    self.nodes[id].total_elapsed_ms = total;
  }
  fn path_moves(&self) -> Vec<RecordMove> {
    self
      .moves_before()
      .into_iter()
      .skip(1)
      .map(|id| self.nodes[id].record_move.clone())
      .collect()
  }
  fn restore_path(&mut self, path: &[RecordMove]) {
    self.goto(0);
    for m in path {
      if self
        .append(m.clone(), DoMoveOption::ignore_validation())
        .is_err()
      {
        break;
      }
    }
  }
  //copies the subtree below `src_root` of `src` below ply `dst_base` of the
  //active path; a move which can't be replayed is dropped with its subtree
  fn graft(&mut self, src: &Record, src_root: NodeId, dst_base: u32) {
    let src_base = src.nodes[src_root].ply;
    let mut skip_above: Option<u32> = None;
    for id in src.descendants(src_root) {
      let node = &src.nodes[id];
      let ply = node.ply - src_base;
      if let Some(p) = skip_above {
        if ply > p {
          continue;
        }
        skip_above = None;
      }
      self.goto(dst_base + ply - 1);
      if let Err(err) = self.append(
        node.record_move.clone(),
        DoMoveOption::ignore_validation(),
      ) {
        warn!("ply {} skipped: {}", dst_base + ply, err);
        skip_above = Some(ply);
        continue;
      }
      let current = self.current;
      if node.elapsed_ms != 0 && self.nodes[current].elapsed_ms == 0 {
        self.set_elapsed_ms(current, node.elapsed_ms);
      }
      let dst = &mut self.nodes[current];
      if !node.comment().is_empty() && dst.comment().is_empty() {
        dst.set_comment(node.comment());
      }
      if !node.bookmark().is_empty() && dst.bookmark().is_empty() {
        dst.set_bookmark(node.bookmark());
      }
      if node.custom_data().is_some() && dst.custom_data().is_none() {
        dst.set_custom_data(node.custom_data().cloned());
      }
    }
  }
  /// Adds every move of `other` to this tree, keeping this tree's comments,
  /// times and bookmarks where both have one. Both records must start from
  /// the same position. The cursor returns to the same path.
  pub fn merge(&mut self, other: &Record) -> bool {
    if self.initial_position.sfen() != other.initial_position.sfen() {
      return false;
    }
    let path = self.path_moves();
    self.graft(other, other.first, 0);
    self.restore_path(&path);
    debug!("merged {} nodes", other.node_count() - 1);
    true
  }
  /// Like `merge`, but `other` starts from the current position and its
  /// moves are added below the current node.
  pub fn merge_into_current_position(&mut self, other: &Record) -> bool {
    if self.position.sfen() != other.initial_position.sfen() {
      return false;
    }
    let path = self.path_moves();
    let base = self.nodes[self.current].ply;
    self.graft(other, other.first, base);
    self.restore_path(&path);
    debug!("merged {} nodes at ply {}", other.node_count() - 1, base);
    true
  }
  /// A new record starting from the current position with every move below
  /// the current node. The first alternative of each fork is selected.
  pub fn get_subtree(&self) -> Record {
    let mut record = Record::new(self.position.clone());
    record.metadata = self.metadata.clone();
    let comment = self.nodes[self.current].comment().to_owned();
    record.current_mut().set_comment(&comment);
    record.graft(self, self.current, 0);
    record.reset_all_branch_selection();
    record.goto(0);
    record
  }
  pub fn jump_to_bookmark(&mut self, bookmark: &str) -> bool {
    if bookmark.is_empty() {
      return false;
    }
    if self.nodes[self.current].bookmark() == bookmark {
      return true;
    }
    let target = match self.find(|node, _| node.bookmark() == bookmark) {
      Some(target) => target,
      None => return false,
    };
    //route[ply] is the ancestor of the target at that ply
    let mut route = Vec::new();
    let mut p = Some(target);
    while let Some(q) = p {
      route.push(q);
      p = self.nodes[q].prev;
    }
    route.reverse();
    while route.get(self.nodes[self.current].ply as usize) != Some(&self.current) {
      if !self.go_back() {
        break;
      }
    }
    while route.len() > self.nodes[self.current].ply as usize + 1 {
      let next = route[self.nodes[self.current].ply as usize + 1];
      let m = self.nodes[next].record_move.clone();
      if self.append(m, DoMoveOption::ignore_validation()).is_err() {
        return false;
      }
    }
    debug!("jumped to bookmark {} at ply {}", bookmark, self.nodes[self.current].ply);
    true
  }
  fn increment_repetition(&mut self) {
    let sfen = self.position.sfen();
    let count = self.repetition_counts.entry(sfen.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
      self.repetition_start.insert(sfen, self.nodes[self.current].ply);
    }
  }
  fn decrement_repetition(&mut self) {
    let sfen = self.position.sfen();
    if let Some(count) = self.repetition_counts.get_mut(&sfen) {
      *count -= 1;
      if *count == 0 {
        self.repetition_counts.remove(&sfen);
        self.repetition_start.remove(&sfen);
      }
    }
  }
  //How often the layout of `pos` occurred on the path to the current node.
  pub fn repetition_count(&self, pos: &Position) -> u32 {
    self
      .repetition_counts
      .get(&pos.sfen())
      .copied()
      .unwrap_or(0)
  }
  pub fn repetition(&self) -> bool {
    self.repetition_count(&self.position) >= 4
  }
  /// The side which gave check with every move since the repeated layout
  /// first occurred.
  pub fn perpetual_check(&self) -> Option<Color> {
    if !self.repetition() {
      return None;
    }
    let since = *self.repetition_start.get(&self.position.sfen())?;
    let mut black = true;
    let mut white = true;
    let mut color = self.position.color();
    let mut p = Some(self.current);
    while let Some(id) = p {
      let node = &self.nodes[id];
      if node.ply < since {
        break;
      }
      color = color.opposite();
      if !node.is_check {
        match color {
          Color::Black => black = false,
          Color::White => white = false,
        }
      }
      p = node.prev;
    }
    if black {
      Some(Color::Black)
    } else if white {
      Some(Color::White)
    } else {
      None
    }
  }
  pub fn sfen(&self) -> String {
    self.position.get_sfen(self.nodes[self.current].ply + 1)
  }
  pub fn bookmarks(&self) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut r = Vec::new();
    self.for_each(|node, _| {
      let bookmark = node.bookmark();
      if !bookmark.is_empty() && seen.insert(bookmark.to_owned()) {
        r.push(bookmark.to_owned());
      }
    });
    r
  }
  pub fn for_each<F: FnMut(&Node, &Position)>(&self, mut handler: F) {
    self.find(|node, pos| {
      handler(node, pos);
      false
    });
  }
  pub fn find<F: FnMut(&Node, &Position) -> bool>(&self, mut handler: F) -> Option<NodeId> {
    let mut pos = self.initial_position.clone();
    let mut walk = Walk::new(&mut pos);
    //nodes whose move is applied while their continuations are visited
    let mut stack: Vec<(NodeId, bool)> = Vec::new();
    let mut p = self.first;
    loop {
      let node = &self.nodes[p];
      if handler(node, walk.position()) {
        return Some(p);
      }
      if let Some(next) = node.next {
        let applied = match node.record_move.as_move() {
          Some(m) => walk.push(*m).is_ok(),
          None => false,
        };
        stack.push((p, applied));
        p = next;
        continue;
      }
      let mut q = p;
      p = loop {
        if let Some(branch) = self.nodes[q].branch {
          break branch;
        }
        let (last, applied) = stack.pop()?;
        if applied {
          walk.pop();
        }
        q = last;
      };
    }
  }
}
