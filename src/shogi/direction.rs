//(dx, dy): dx > 0 moves toward file 1, dy > 0 moves toward rank 9
pub type Delta = (i8, i8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
  LeftUp,
  RightUp,
  LeftDown,
  RightDown,
  LeftUpKnight,
  RightUpKnight,
  LeftDownKnight,
  RightDownKnight,
}

impl Direction {
  pub const ALL: [Direction; 12] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::LeftUp,
    Direction::RightUp,
    Direction::LeftDown,
    Direction::RightDown,
    Direction::LeftUpKnight,
    Direction::RightUpKnight,
    Direction::LeftDownKnight,
    Direction::RightDownKnight,
  ];
  pub const fn index(self) -> usize {
    self as usize
  }
  pub const fn reverse(self) -> Self {
    match self {
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
      Direction::LeftUp => Direction::RightDown,
      Direction::RightUp => Direction::LeftDown,
      Direction::LeftDown => Direction::RightUp,
      Direction::RightDown => Direction::LeftUp,
      Direction::LeftUpKnight => Direction::RightDownKnight,
      Direction::RightUpKnight => Direction::LeftDownKnight,
      Direction::LeftDownKnight => Direction::RightUpKnight,
      Direction::RightDownKnight => Direction::LeftUpKnight,
    }
  }
  pub const fn delta(self) -> Delta {
    match self {
      Direction::Up => (0, -1),
      Direction::Down => (0, 1),
      Direction::Left => (-1, 0),
      Direction::Right => (1, 0),
      Direction::LeftUp => (-1, -1),
      Direction::RightUp => (1, -1),
      Direction::LeftDown => (-1, 1),
      Direction::RightDown => (1, 1),
      Direction::LeftUpKnight => (-1, -2),
      Direction::RightUpKnight => (1, -2),
      Direction::LeftDownKnight => (-1, 2),
      Direction::RightDownKnight => (1, 2),
    }
  }
  pub fn is_knight(self) -> bool {
    self.index() >= Direction::LeftUpKnight.index()
  }
}

//Classifies the vector `(dx, dy)` as a direction and a number of steps.
//Only queen lines and exact knight jumps qualify; anything else (including
//the zero vector) yields `None`.
pub fn vector_to_direction_and_distance(dx: i8, dy: i8) -> Option<(Direction, u8)> {
  match (dx, dy) {
    (-1, -2) => return Some((Direction::LeftUpKnight, 1)),
    (1, -2) => return Some((Direction::RightUpKnight, 1)),
    (-1, 2) => return Some((Direction::LeftDownKnight, 1)),
    (1, 2) => return Some((Direction::RightDownKnight, 1)),
    _ => (),
  }
  if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
    return None;
  }
  let distance = dx.abs().max(dy.abs());
  let d = match (dx.signum(), dy.signum()) {
    (0, -1) => Direction::Up,
    (0, 1) => Direction::Down,
    (-1, 0) => Direction::Left,
    (1, 0) => Direction::Right,
    (-1, -1) => Direction::LeftUp,
    (1, -1) => Direction::RightUp,
    (-1, 1) => Direction::LeftDown,
    (1, 1) => Direction::RightDown,
    _ => return None,
  };
  Some((d, distance as u8))
}

#[test]
fn test_reverse_delta() {
  for d in Direction::ALL.iter() {
    let (x, y) = d.delta();
    assert_eq!(d.reverse().delta(), (-x, -y));
    assert_eq!(d.reverse().reverse(), *d);
  }
}

#[test]
fn test_vector_to_direction_and_distance() {
  assert_eq!(vector_to_direction_and_distance(0, -3), Some((Direction::Up, 3)));
  assert_eq!(vector_to_direction_and_distance(-4, 4), Some((Direction::LeftDown, 4)));
  assert_eq!(vector_to_direction_and_distance(1, -2), Some((Direction::RightUpKnight, 1)));
  assert_eq!(vector_to_direction_and_distance(2, -4), None);
  assert_eq!(vector_to_direction_and_distance(2, 1), None);
  assert_eq!(vector_to_direction_and_distance(0, 0), None);
}
