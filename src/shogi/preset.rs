//Well-known starting positions. Handicap games start with white (the handicap giver) to move.

pub const STANDARD: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";
pub const EMPTY: &str = "9/9/9/9/9/9/9/9/9 b - 1";
pub const HANDICAP_LANCE: &str = "lnsgkgsn1/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_RIGHT_LANCE: &str =
  "1nsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_BISHOP: &str = "lnsgkgsnl/1r7/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_ROOK: &str = "lnsgkgsnl/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_ROOK_LANCE: &str =
  "lnsgkgsn1/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_2PIECES: &str = "lnsgkgsnl/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_4PIECES: &str = "1nsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_6PIECES: &str = "2sgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_8PIECES: &str = "3gkg3/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const HANDICAP_10PIECES: &str = "4k4/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1";
pub const TSUME_SHOGI: &str = "4k4/9/9/9/9/9/9/9/9 b 2r2b4g4s4n4l18p 1";
pub const TSUME_SHOGI_2KINGS: &str = "4k4/9/9/9/9/9/9/9/4K4 b 2r2b4g4s4n4l18p 1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitialPositionType {
  Standard,
  Empty,
  HandicapLance,
  HandicapRightLance,
  HandicapBishop,
  HandicapRook,
  HandicapRookLance,
  Handicap2Pieces,
  Handicap4Pieces,
  Handicap6Pieces,
  Handicap8Pieces,
  Handicap10Pieces,
  TsumeShogi,
  TsumeShogi2Kings,
}

impl InitialPositionType {
  pub fn sfen(self) -> &'static str {
    match self {
      InitialPositionType::Standard => STANDARD,
      InitialPositionType::Empty => EMPTY,
      InitialPositionType::HandicapLance => HANDICAP_LANCE,
      InitialPositionType::HandicapRightLance => HANDICAP_RIGHT_LANCE,
      InitialPositionType::HandicapBishop => HANDICAP_BISHOP,
      InitialPositionType::HandicapRook => HANDICAP_ROOK,
      InitialPositionType::HandicapRookLance => HANDICAP_ROOK_LANCE,
      InitialPositionType::Handicap2Pieces => HANDICAP_2PIECES,
      InitialPositionType::Handicap4Pieces => HANDICAP_4PIECES,
      InitialPositionType::Handicap6Pieces => HANDICAP_6PIECES,
      InitialPositionType::Handicap8Pieces => HANDICAP_8PIECES,
      InitialPositionType::Handicap10Pieces => HANDICAP_10PIECES,
      InitialPositionType::TsumeShogi => TSUME_SHOGI,
      InitialPositionType::TsumeShogi2Kings => TSUME_SHOGI_2KINGS,
    }
  }
}
