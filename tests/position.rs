mod common;

use shogi_record::shogi::kif::format_move;
use shogi_record::shogi::preset;
use shogi_record::shogi::{
  Color, DoMoveOption, EditFrom, EditTo, InitialPositionType, MoveError, MoveFrom, Piece,
  PieceType, Position, PositionChange, Square,
};

#[test]
fn sfen() {
  let pos = Position::default();
  assert_eq!(pos.sfen(), preset::STANDARD);
  assert_eq!(pos.to_string(), preset::STANDARD);
  assert_eq!(
    pos.get_sfen(37),
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 37"
  );
  assert_eq!(pos.get_sfen(0), preset::STANDARD);
  let sfen = "l2R2s1+P/4gg1k1/p1+P2lPp1/4p1p+b1/1p3G3/3pP1nS1/PP3KSP1/R8/L4G2+b b NL4Ps2np 1";
  let pos = common::position(sfen);
  assert_eq!(pos.sfen(), sfen);
  assert_eq!(
    pos.board().at(Square::new(4, 3)),
    Some(Piece::new(Color::White, PieceType::Lance))
  );
  assert_eq!(
    pos.board().at(Square::new(2, 4)),
    Some(Piece::new(Color::White, PieceType::Horse))
  );
  assert_eq!(pos.black_hand().count(PieceType::Pawn), 4);
  assert_eq!(pos.black_hand().count(PieceType::Lance), 1);
  assert_eq!(pos.white_hand().count(PieceType::Knight), 2);
  assert_eq!(pos.white_hand().count(PieceType::Silver), 1);
  //optional prefix
  assert_eq!(common::position(&format!("sfen {}", sfen)).sfen(), sfen);
}

#[test]
fn invalid_sfen() {
  for sfen in &[
    "",
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b -",
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1 x",
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1 b - 1",
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL x - 1",
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b K 1",
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - x",
  ] {
    assert!(!Position::is_valid_sfen(sfen), "{}", sfen);
  }
  let mut pos = Position::default();
  assert!(pos.reset_by_sfen("9/9/9 b - 1").is_err());
  assert_eq!(pos.sfen(), preset::STANDARD);
  assert!(pos.reset_by_sfen(preset::TSUME_SHOGI).is_ok());
  assert_eq!(pos.black_hand().count(PieceType::Pawn), 0);
  assert_eq!(pos.white_hand().count(PieceType::Pawn), 18);
}

#[test]
fn initial_position_types() {
  let pos = Position::from_initial_position_type(InitialPositionType::Handicap2Pieces);
  assert_eq!(pos.color(), Color::White);
  assert_eq!(pos.board().at(Square::new(8, 2)), None);
  assert_eq!(pos.board().at(Square::new(2, 2)), None);
  let mut pos = Position::empty();
  assert_eq!(pos.sfen(), preset::EMPTY);
  pos.reset(InitialPositionType::Standard);
  assert_eq!(pos, Position::default());
}

#[test]
fn scenario() {
  let mut pos = Position::default();
  let moves = ["7g7f", "3c3d", "8h2b+", "3a2b", "B*4e"];
  let texts = [
    "☗７六歩(77)",
    "☖３四歩(33)",
    "☗２二角成(88)",
    "☖同　銀(31)",
    "☗４五角",
  ];
  let mut played = Vec::new();
  for (usi, text) in moves.iter().zip(texts.iter()) {
    let m = common::usi_move(&pos, usi);
    assert_eq!(format_move(&pos, &m, played.last()), *text);
    pos.do_move(&m, DoMoveOption::default()).unwrap();
    played.push(m);
    if played.len() == 2 {
      assert_eq!(
        pos.sfen(),
        "lnsgkgsnl/1r5b1/pppppp1pp/6p2/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL b - 1"
      );
    }
  }
  assert_eq!(
    pos.board().at(Square::new(4, 5)),
    Some(Piece::new(Color::Black, PieceType::Bishop))
  );
  assert_eq!(pos.black_hand().count(PieceType::Bishop), 0);
  assert_eq!(pos.white_hand().count(PieceType::Bishop), 1);
  assert_eq!(pos.color(), Color::White);
  //3a2b captured a horse
  assert_eq!(played[3].captured_piece_type, Some(PieceType::Horse));
  pos.undo_move(&played[4]);
  pos.undo_move(&played[3]);
  assert_eq!(
    pos.board().at(Square::new(2, 2)),
    Some(Piece::new(Color::Black, PieceType::Horse))
  );
  assert_eq!(pos.white_hand().count(PieceType::Bishop), 0);
  for m in played[..3].iter().rev() {
    pos.undo_move(m);
  }
  assert_eq!(pos, Position::default());
}

#[test]
fn drop_text() {
  //a black bishop on the board can also reach 5e
  let pos = common::position("4k4/9/9/9/9/9/9/1B7/4K4 b B 1");
  let m = common::usi_move(&pos, "B*5e");
  assert_eq!(format_move(&pos, &m, None), "☗５五角打");
  let m = common::usi_move(&pos, "8h2b+");
  assert_eq!(format_move(&pos, &m, None), "☗２二角成(88)");
  let m = common::usi_move(&pos, "8h2b");
  assert_eq!(format_move(&pos, &m, None), "☗２二角不成(88)");
}

#[test]
fn do_and_undo_restore_position() {
  for sfen in &[
    preset::STANDARD,
    "ln1gkg1nl/1r1s3s1/pppppp1pp/6B2/9/2P4P1/PP1PPPP1P/1S5R1/LNSGKGSNL w Pb 10",
    "l2R2s1+P/4gg1k1/p1+P2lPp1/4p1p+b1/1p3G3/3pP1nS1/PP3KSP1/R8/L4G2+b b NL4Ps2np 1",
  ] {
    let mut pos = common::position(sfen);
    let start = pos.clone();
    let moves = common::legal_moves(&pos);
    assert!(!moves.is_empty());
    for m in moves {
      pos.do_move(&m, DoMoveOption::default()).unwrap();
      assert_eq!(pos.color(), start.color().opposite());
      //the mover's king is never left attacked
      pos.set_color(start.color());
      assert!(!pos.checked(), "{} after {}", sfen, m);
      pos.set_color(start.color().opposite());
      pos.undo_move(&m);
      assert_eq!(pos, start, "{}", m);
    }
  }
}

#[test]
fn perft() {
  let mut pos = Position::default();
  assert_eq!(common::perft(&mut pos, 1), 30);
  assert_eq!(common::perft(&mut pos, 2), 900);
  assert_eq!(pos, Position::default());
}

#[test]
fn invalid_moves() {
  let pos = Position::default();
  let check = |usi: &str, err: MoveError| {
    let m = common::usi_move(&pos, usi);
    assert_eq!(pos.validate_move(&m), Err(err), "{}", usi);
  };
  check("3c3d", MoveError::NotOwnPiece);
  check("2h2f", MoveError::UnreachableDestination);
  check("9i9g", MoveError::FriendlyPieceAtDestination);
  check("5i5h+", MoveError::NotPromotable);
  check("7g7f+", MoveError::OutsidePromotionZone);
  check("P*5e", MoveError::NoPieceInHand);
  assert_eq!(pos.create_move_by_usi("5e5d"), None);
  let m = pos.create_move(MoveFrom::Square(Square::new(5, 5)), Square::new(5, 4));
  assert!(m.is_none());
}

#[test]
fn off_board_squares() {
  let mut pos = common::position("4k4/9/9/9/9/9/9/9/8K b G 1");
  let sfen = pos.sfen();
  let moves = [
    pos.create_move(MoveFrom::Square(Square::new(1, 9)), Square::new(0, 9)),
    pos.create_move(MoveFrom::Hand(PieceType::Gold), Square::new(0, 5)),
    pos.create_move(MoveFrom::Hand(PieceType::Gold), Square::new(5, 10)),
  ];
  for m in moves.iter() {
    let m = m.expect("move");
    assert_eq!(pos.validate_move(&m), Err(MoveError::InvalidSquare), "{}", m);
    assert!(!pos.is_valid_move(&m));
    assert_eq!(pos.do_move(&m, DoMoveOption::default()), Err(MoveError::InvalidSquare));
    assert_eq!(
      pos.do_move(&m, DoMoveOption::ignore_validation()),
      Err(MoveError::InvalidSquare)
    );
    assert_eq!(pos.sfen(), sfen);
  }
}

#[test]
fn ignore_validation() {
  let mut pos = Position::default();
  let m = common::usi_move(&pos, "2h2f");
  assert_eq!(
    pos.do_move(&m, DoMoveOption::default()),
    Err(MoveError::UnreachableDestination)
  );
  assert_eq!(pos, Position::default());
  pos.do_move(&m, DoMoveOption::ignore_validation()).unwrap();
  assert_eq!(
    pos.board().at(Square::new(2, 6)),
    Some(Piece::new(Color::Black, PieceType::Rook))
  );
  assert_eq!(pos.color(), Color::White);
  let mut m = m;
  m.from = MoveFrom::Square(Square::new(5, 5));
  assert_eq!(
    pos.do_move(&m, DoMoveOption::ignore_validation()),
    Err(MoveError::NoPieceAtOrigin)
  );
}

#[test]
fn king_safety() {
  //white rook on 5a pins the gold on 5h
  let pos = common::position("4r4/9/9/9/9/9/9/4G4/4K4 b - 1");
  let m = common::usi_move(&pos, "5h4h");
  assert_eq!(pos.validate_move(&m), Err(MoveError::KingLeftInCheck));
  assert!(pos.is_valid_move(&common::usi_move(&pos, "5h5g")));
  let m = common::usi_move(&pos, "5i4i");
  assert!(pos.is_valid_move(&m));
  //the king can't step along the attacking ray
  let pos = common::position("4r4/9/9/9/9/9/9/9/4K4 b - 1");
  let m = common::usi_move(&pos, "5i5h");
  assert_eq!(pos.validate_move(&m), Err(MoveError::KingLeftInCheck));
  //a drop may block the check
  let pos = common::position("4r4/9/9/9/9/9/9/9/4K4 b G 1");
  assert!(pos.is_valid_move(&common::usi_move(&pos, "G*5e")));
  assert_eq!(
    pos.validate_move(&common::usi_move(&pos, "G*4e")),
    Err(MoveError::KingLeftInCheck)
  );
}

#[test]
fn double_pawn() {
  for file in 1..=9 {
    let mut board = vec![String::from("9"); 9];
    let col = |n: i8| 9 - n as usize;
    let mut row = String::new();
    if col(file) > 0 {
      row.push_str(&col(file).to_string());
    }
    row.push('P');
    if 8 - col(file) > 0 {
      row.push_str(&(8 - col(file)).to_string());
    }
    board[4] = row.clone();
    board[6] = row.to_lowercase();
    let sfen = format!("{} b Pp 1", board.join("/"));
    let mut pos = common::position(&sfen);
    for &color in Color::ALL.iter() {
      pos.set_color(color);
      let rank = 3;
      let m = pos
        .create_move(MoveFrom::Hand(PieceType::Pawn), Square::new(file, rank))
        .unwrap();
      assert_eq!(pos.validate_move(&m), Err(MoveError::DoublePawn), "{}", sfen);
      let other = if file == 1 { 2 } else { file - 1 };
      let m = pos
        .create_move(MoveFrom::Hand(PieceType::Pawn), Square::new(other, rank))
        .unwrap();
      assert!(pos.is_valid_move(&m), "{} {}", sfen, m);
    }
  }
  //a promoted pawn doesn't count
  let pos = common::position("9/9/9/9/4+P4/9/9/9/9 b P 1");
  assert!(pos.is_valid_move(&common::usi_move(&pos, "P*5g")));
}

#[test]
fn dead_end_ranks() {
  let pos = common::position("4k4/9/9/9/9/9/9/9/4K4 b PLN 1");
  for (usi, ok) in &[
    ("P*4a", false),
    ("P*4b", true),
    ("L*3a", false),
    ("L*3b", true),
    ("N*2a", false),
    ("N*2b", false),
    ("N*2c", true),
  ] {
    let m = common::usi_move(&pos, usi);
    assert_eq!(pos.is_valid_move(&m), *ok, "{}", usi);
  }
  let pos = common::position("4k4/9/9/9/9/9/9/9/4K4 w pln 1");
  for (usi, ok) in &[
    ("P*4i", false),
    ("P*4h", true),
    ("L*3i", false),
    ("N*2h", false),
    ("N*2g", true),
  ] {
    let m = common::usi_move(&pos, usi);
    assert_eq!(pos.is_valid_move(&m), *ok, "{}", usi);
  }
  //a pawn reaching the last rank must promote
  let pos = common::position("4k4/P8/9/9/9/9/9/9/4K4 b - 1");
  assert_eq!(
    pos.validate_move(&common::usi_move(&pos, "9b9a")),
    Err(MoveError::DeadEndRank)
  );
  assert!(pos.is_valid_move(&common::usi_move(&pos, "9b9a+")));
  //but may stay unpromoted one rank earlier
  let pos = common::position("4k4/9/P8/9/9/9/9/9/4K4 b - 1");
  assert!(pos.is_valid_move(&common::usi_move(&pos, "9c9b")));
}

#[test]
fn drops() {
  let pos = common::position("4k4/9/9/9/9/9/9/9/4K4 b G 1");
  let m = common::usi_move(&pos, "G*5a");
  assert_eq!(pos.validate_move(&m), Err(MoveError::DestinationOccupied));
  let mut m = common::usi_move(&pos, "G*5e");
  assert!(pos.is_valid_move(&m));
  m.color = Color::White;
  assert_eq!(pos.validate_move(&m), Err(MoveError::WrongColor));
  m.color = Color::Black;
  m.promote = true;
  assert_eq!(pos.validate_move(&m), Err(MoveError::PromotionOnDrop));
}

#[test]
fn pawn_drop_mate() {
  for (sfen, mate) in &[
    ("8k/6G2/9/9/9/9/9/9/4K3L b P 1", true),
    //the king takes the pawn
    ("8k/6G2/9/9/9/9/9/9/4K4 b P 1", false),
    //the gold takes the pawn
    ("7gk/6G2/9/9/9/9/9/9/4K3L b P 1", false),
    //the gold is pinned by the rook
    ("R6gk/6G2/9/9/9/9/9/9/4K3L b P 1", true),
  ] {
    let pos = common::position(sfen);
    let m = common::usi_move(&pos, "P*1b");
    assert_eq!(pos.is_pawn_drop_mate(&m), *mate, "{}", sfen);
    let expected = if *mate {
      Err(MoveError::PawnDropMate)
    } else {
      Ok(())
    };
    assert_eq!(pos.validate_move(&m), expected, "{}", sfen);
  }
  //mate by a pawn moved on the board is legal
  let pos = common::position("8k/6G2/8P/9/9/9/9/9/4K3L b - 1");
  assert!(pos.is_valid_move(&common::usi_move(&pos, "1c1b")));
}

#[test]
fn editing() {
  let mut pos = Position::default();
  let sq = |file, rank| Square::new(file, rank);
  //kings can't go to a hand
  assert!(!pos.is_valid_editing(EditFrom::Square(sq(5, 9)), EditTo::Hand(Color::Black)));
  assert!(!pos.is_valid_editing(EditFrom::Square(sq(5, 5)), EditTo::Hand(Color::Black)));
  assert!(!pos.is_valid_editing(EditFrom::Square(sq(7, 7)), EditTo::Square(sq(7, 7))));
  //nothing leaves the board
  assert!(!pos.is_valid_editing(EditFrom::Square(sq(5, 9)), EditTo::Square(sq(0, 5))));
  assert!(!pos.is_valid_editing(EditFrom::Square(sq(1, 9)), EditTo::Square(sq(1, 10))));
  let sfen = pos.sfen();
  assert!(!pos.edit(PositionChange {
    move_piece: Some((EditFrom::Square(sq(5, 9)), EditTo::Square(sq(10, 1)))),
    rotate: None,
  }));
  assert_eq!(pos.sfen(), sfen);
  //captured promoted pieces go to the hand unpromoted
  let change = PositionChange {
    move_piece: Some((EditFrom::Square(sq(2, 8)), EditTo::Hand(Color::White))),
    rotate: None,
  };
  assert!(pos.edit(PositionChange {
    move_piece: None,
    rotate: Some(sq(2, 8)),
  }));
  assert_eq!(
    pos.board().at(sq(2, 8)),
    Some(Piece::new(Color::Black, PieceType::Dragon))
  );
  assert!(pos.edit(change));
  assert_eq!(pos.board().at(sq(2, 8)), None);
  assert_eq!(pos.white_hand().count(PieceType::Rook), 1);
  let white_rook = Piece::new(Color::White, PieceType::Rook);
  assert!(!pos.is_valid_editing(EditFrom::Hand(white_rook), EditTo::Square(sq(5, 9))));
  assert!(!pos.is_valid_editing(EditFrom::Hand(white_rook), EditTo::Hand(Color::White)));
  assert!(!pos.is_valid_editing(EditFrom::Hand(white_rook), EditTo::Square(sq(0, 5))));
  assert!(pos.edit(PositionChange {
    move_piece: Some((EditFrom::Hand(white_rook), EditTo::Square(sq(5, 5)))),
    rotate: Some(sq(5, 5)),
  }));
  assert_eq!(
    pos.board().at(sq(5, 5)),
    Some(Piece::new(Color::White, PieceType::Dragon))
  );
  assert_eq!(pos.white_hand().count(PieceType::Rook), 0);
  //moving onto an occupied square swaps the pieces
  assert!(pos.edit(PositionChange {
    move_piece: Some((EditFrom::Square(sq(5, 5)), EditTo::Square(sq(5, 9)))),
    rotate: None,
  }));
  assert_eq!(
    pos.board().at(sq(5, 5)),
    Some(Piece::new(Color::Black, PieceType::King))
  );
  //rotating a dragon gives the other color's rook, a gold flips directly
  assert!(pos.edit(PositionChange {
    move_piece: None,
    rotate: Some(sq(5, 9)),
  }));
  assert_eq!(
    pos.board().at(sq(5, 9)),
    Some(Piece::new(Color::Black, PieceType::Rook))
  );
  assert!(pos.edit(PositionChange {
    move_piece: None,
    rotate: Some(sq(4, 9)),
  }));
  assert_eq!(
    pos.board().at(sq(4, 9)),
    Some(Piece::new(Color::White, PieceType::Gold))
  );
  assert!(!pos.edit(PositionChange {
    move_piece: Some((EditFrom::Hand(white_rook), EditTo::Square(sq(5, 4)))),
    rotate: None,
  }));
  assert_eq!(pos.color(), Color::Black);
}

#[test]
fn own_piece_at_destination() {
  for sfen in &[
    preset::STANDARD,
    "l2R2s1+P/4gg1k1/p1+P2lPp1/4p1p+b1/1p3G3/3pP1nS1/PP3KSP1/R8/L4G2+b b NL4Ps2np 1",
    "ln1gkg1nl/1r1s3s1/pppppp1pp/6B2/9/2P4P1/PP1PPPP1P/1S5R1/LNSGKGSNL w Pb 10",
  ] {
    let pos = common::position(sfen);
    let own = pos.board().list_squares_by_color(pos.color());
    for &from in own.iter() {
      for &to in own.iter() {
        let m = match pos.create_move(MoveFrom::Square(from), to) {
          Some(m) => m,
          None => continue,
        };
        assert!(!pos.is_valid_move(&m), "{} {}", sfen, m);
        assert!(!pos.is_valid_move(&m.with_promote()), "{} {}", sfen, m);
      }
    }
  }
}
