mod common;

use shogi_record::record::{ParseUSIError, Record, USIFormatOptions};
use shogi_record::shogi::{preset, DoMoveOption, Position, SpecialMove, SpecialMoveType};

#[test]
fn new_by_usi() {
  let record = Record::new_by_usi("position startpos moves 7g7f 3c3d 8h2b+ 3a2b B*4e").unwrap();
  assert_eq!(record.current().ply(), 5);
  assert_eq!(record.current().display_text(), "☗４五角");
  assert_eq!(
    record.usi(),
    "position startpos moves 7g7f 3c3d 8h2b+ 3a2b B*4e"
  );
  for usi in &["position startpos", "startpos", "position startpos moves"] {
    let record = Record::new_by_usi(usi).unwrap();
    assert_eq!(record.node_count(), 1, "{}", usi);
    assert_eq!(*record.position(), Position::default());
  }
  //short forms
  let record = Record::new_by_usi("startpos moves 7g7f").unwrap();
  assert_eq!(record.usi(), "position startpos moves 7g7f");
  let record = Record::new_by_usi("moves 7g7f 3c3d").unwrap();
  assert_eq!(record.usi(), "position startpos moves 7g7f 3c3d");
  let record = Record::new_by_usi(&format!("sfen {} moves 7g7f", preset::STANDARD)).unwrap();
  assert_eq!(record.usi(), "position startpos moves 7g7f");
  //anything after the moves is ignored
  let record = Record::new_by_usi("position startpos moves 7g7f resign").unwrap();
  assert_eq!(record.node_count(), 2);
}

#[test]
fn new_by_usi_sfen() {
  let sfen = "ln1gkg1nl/1r1s3s1/pppppp1pp/6B2/9/2P4P1/PP1PPPP1P/1S5R1/LNSGKGSNL w Pb 10";
  let record = Record::new_by_usi(&format!("position sfen {} moves 2b3c 3d2c+", sfen)).unwrap();
  assert_eq!(record.current().ply(), 2);
  //the move number of the initial position is not kept
  assert_eq!(
    record.usi(),
    "position sfen ln1gkg1nl/1r1s3s1/pppppp1pp/6B2/9/2P4P1/PP1PPPP1P/1S5R1/LNSGKGSNL w Pb 1 moves 2b3c 3d2c+"
  );
  assert_eq!(record.sfen(), record.position().get_sfen(3));
}

#[test]
fn invalid_usi() {
  for usi in &[
    "",
    "xxx",
    "sfen xxx",
    "position xxx",
    "position",
    "position sfen",
    "position sfen xxx",
    "position sfen xxx b - 1 moves",
    "position startpos xxx",
  ] {
    match Record::new_by_usi(usi) {
      Err(ParseUSIError::InvalidUSI(_)) => (),
      r => panic!("{}: {:?}", usi, r.map(|record| record.usi())),
    }
  }
  assert_eq!(
    Record::new_by_usi("position startpos moves 7g7f 2e2d").map(|record| record.usi()),
    Err(ParseUSIError::InvalidMove(String::from("2e2d")))
  );
  let err = Record::new_by_usi("position startpos moves 2e2d").unwrap_err();
  assert_eq!(err.to_string(), "invalid move: \"2e2d\"");
}

#[test]
fn usi_options() {
  let mut record = Record::new_by_usi("position startpos moves 7g7f 3c3d 2g2f").unwrap();
  record
    .append(SpecialMove::new(SpecialMoveType::Resign), DoMoveOption::default())
    .unwrap();
  record.goto(1);
  assert_eq!(record.usi(), "position startpos moves 7g7f");
  let opts = USIFormatOptions {
    startpos: false,
    resign: true,
    all_moves: true,
  };
  assert_eq!(
    record.get_usi(opts),
    format!(
      "position sfen {} moves 7g7f 3c3d 2g2f resign",
      preset::STANDARD
    )
  );
  //resign is written only when the path ends with it
  record.goto(3);
  assert_eq!(
    record.get_usi(USIFormatOptions {
      resign: true,
      ..USIFormatOptions::default()
    }),
    "position startpos moves 7g7f 3c3d 2g2f"
  );
  record.goto(0);
  assert_eq!(record.usi(), "position startpos");
}

#[test]
fn usi_lines() {
  let mut record = Record::new_by_usi("position startpos moves 7g7f 3c3d").unwrap();
  for line in &[
    "position startpos moves 7g7f 8c8d",
    "position startpos moves 2g2f",
    "position startpos moves 7g7f 3c3d 2g2f",
  ] {
    assert!(record.merge(&Record::new_by_usi(line).unwrap()));
  }
  assert_eq!(
    record.get_usi_lines(),
    vec![
      "position startpos moves 7g7f 3c3d 2g2f",
      "position startpos moves 7g7f 8c8d",
      "position startpos moves 2g2f",
    ]
  );
  assert_eq!(Record::default().get_usi_lines(), vec!["position startpos"]);
  //every line rebuilds its own path
  for line in record.get_usi_lines() {
    assert_eq!(Record::new_by_usi(&line).unwrap().usi(), line);
  }
}
