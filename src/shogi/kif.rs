use super::moves::{Move, MoveFrom, SpecialMove, SpecialMoveType};
use super::piece::Piece;
use super::Position;

pub const JP_COLS: [char; 9] = [
  '１', '２', '３', '４', '５', '６', '７', '８', '９',
];

pub const JP_ROWS: [char; 9] = [
  '一', '二', '三', '四', '五', '六', '七', '八', '九',
];

//Japanese text of `m` played in `pos` (the position before the move),
//e.g. "☗７六歩(77)", "☖同　角成(88)", "☗５五角打".
pub fn format_move(pos: &Position, m: &Move, last_move: Option<&Move>) -> String {
  let mut s = String::with_capacity(16);
  s.push(m.color.mark());
  if last_move.map(|q| q.to) == Some(m.to) {
    s.push_str("同　");
  } else {
    s.push_str(&m.to.to_jp_string());
  }
  s.push_str(m.piece_type.to_jp_string());
  match m.from {
    MoveFrom::Square(from) => {
      if m.promote {
        s.push('成');
      } else if m.piece_type.is_promotable()
        && (from.is_promotion_zone(m.color) || m.to.is_promotion_zone(m.color))
      {
        s.push_str("不成");
      }
      s.push('(');
      s.push((b'0' + from.file() as u8) as char);
      s.push((b'0' + from.rank() as u8) as char);
      s.push(')');
    }
    MoveFrom::Hand(piece_type) => {
      //only when a board piece of the same kind could also reach the square
      let piece = Piece::new(m.color, piece_type);
      if !pos.list_attackers_by_piece(m.to, piece).is_empty() {
        s.push('打');
      }
    }
  }
  s
}

pub fn format_special_move(m: &SpecialMove) -> String {
  let s = match &m.move_type {
    SpecialMoveType::Start => "開始局面",
    SpecialMoveType::Resign => "投了",
    SpecialMoveType::Interrupt => "中断",
    SpecialMoveType::MaxMoves | SpecialMoveType::Impass | SpecialMoveType::Draw => "持将棋",
    SpecialMoveType::RepetitionDraw => "千日手",
    SpecialMoveType::Mate => "詰み",
    SpecialMoveType::NoMate => "不詰",
    SpecialMoveType::Timeout => "切れ負け",
    SpecialMoveType::FoulWin => "反則勝ち",
    SpecialMoveType::FoulLose => "反則負け",
    SpecialMoveType::EnteringOfKing => "入玉勝ち",
    SpecialMoveType::WinByDefault => "不戦勝",
    SpecialMoveType::LoseByDefault => "不戦敗",
    SpecialMoveType::Try => "トライ",
    SpecialMoveType::Any(name) => name.as_str(),
  };
  s.to_owned()
}

//M:SS with the tens digit of minutes padded by a space
pub fn seconds_to_mss(seconds: u64) -> String {
  format!("{:>2}:{:02}", seconds / 60, seconds % 60)
}

pub fn seconds_to_hhmmss(seconds: u64) -> String {
  let h = seconds / 3600;
  let m = (seconds % 3600) / 60;
  format!("{:02}:{:02}:{:02}", h, m, seconds % 60)
}
