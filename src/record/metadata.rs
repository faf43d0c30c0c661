use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordMetadataKey {
  Title,
  BlackName,
  WhiteName,
  //handicap games: the receiver plays black
  ShitateName,
  UwateName,
  BlackShortName,
  WhiteShortName,
  StartDatetime,
  EndDatetime,
  Date,
  Tournament,
  Strategy,
  TimeLimit,
  BlackTimeLimit,
  WhiteTimeLimit,
  Byoyomi,
  TimeSpent,
  MaxMoves,
  Jishogi,
  Place,
  PostedOn,
  Note,
  //tsume shogi
  OpusNo,
  OpusName,
  Author,
  PublishedBy,
  PublishedAt,
  Source,
  Length,
  Integrity,
  Category,
  Award,
}

impl RecordMetadataKey {
  pub fn name(self) -> &'static str {
    match self {
      RecordMetadataKey::Title => "title",
      RecordMetadataKey::BlackName => "blackName",
      RecordMetadataKey::WhiteName => "whiteName",
      RecordMetadataKey::ShitateName => "shitateName",
      RecordMetadataKey::UwateName => "uwateName",
      RecordMetadataKey::BlackShortName => "blackShortName",
      RecordMetadataKey::WhiteShortName => "whiteShortName",
      RecordMetadataKey::StartDatetime => "startDatetime",
      RecordMetadataKey::EndDatetime => "endDatetime",
      RecordMetadataKey::Date => "date",
      RecordMetadataKey::Tournament => "tournament",
      RecordMetadataKey::Strategy => "strategy",
      RecordMetadataKey::TimeLimit => "timeLimit",
      RecordMetadataKey::BlackTimeLimit => "blackTimeLimit",
      RecordMetadataKey::WhiteTimeLimit => "whiteTimeLimit",
      RecordMetadataKey::Byoyomi => "byoyomi",
      RecordMetadataKey::TimeSpent => "timeSpent",
      RecordMetadataKey::MaxMoves => "maxMoves",
      RecordMetadataKey::Jishogi => "jishogi",
      RecordMetadataKey::Place => "place",
      RecordMetadataKey::PostedOn => "postedOn",
      RecordMetadataKey::Note => "note",
      RecordMetadataKey::OpusNo => "opusNo",
      RecordMetadataKey::OpusName => "opusName",
      RecordMetadataKey::Author => "author",
      RecordMetadataKey::PublishedBy => "publishedBy",
      RecordMetadataKey::PublishedAt => "publishedAt",
      RecordMetadataKey::Source => "source",
      RecordMetadataKey::Length => "length",
      RecordMetadataKey::Integrity => "integrity",
      RecordMetadataKey::Category => "category",
      RecordMetadataKey::Award => "award",
    }
  }
}

//Game header. An empty value removes the key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordMetadata {
  standard: BTreeMap<RecordMetadataKey, String>,
  custom: BTreeMap<String, String>,
}

impl RecordMetadata {
  pub fn standard_metadata_keys(&self) -> impl Iterator<Item = RecordMetadataKey> + '_ {
    self.standard.keys().copied()
  }
  pub fn get_standard_metadata(&self, key: RecordMetadataKey) -> Option<&str> {
    self.standard.get(&key).map(String::as_str)
  }
  pub fn set_standard_metadata(&mut self, key: RecordMetadataKey, value: &str) {
    if value.is_empty() {
      self.standard.remove(&key);
    } else {
      self.standard.insert(key, value.to_owned());
    }
  }
  pub fn custom_metadata_keys(&self) -> impl Iterator<Item = &str> + '_ {
    self.custom.keys().map(String::as_str)
  }
  pub fn get_custom_metadata(&self, key: &str) -> Option<&str> {
    self.custom.get(key).map(String::as_str)
  }
  pub fn set_custom_metadata(&mut self, key: &str, value: &str) {
    if value.is_empty() {
      self.custom.remove(key);
    } else {
      self.custom.insert(key.to_owned(), value.to_owned());
    }
  }
  fn first_of(&self, keys: &[RecordMetadataKey]) -> Option<&str> {
    keys.iter().find_map(|&k| self.get_standard_metadata(k))
  }
  pub fn black_player_name(&self) -> Option<&str> {
    self.first_of(&[
      RecordMetadataKey::BlackName,
      RecordMetadataKey::BlackShortName,
      RecordMetadataKey::ShitateName,
    ])
  }
  pub fn white_player_name(&self) -> Option<&str> {
    self.first_of(&[
      RecordMetadataKey::WhiteName,
      RecordMetadataKey::WhiteShortName,
      RecordMetadataKey::UwateName,
    ])
  }
  pub fn black_player_name_prefer_short(&self) -> Option<&str> {
    self.first_of(&[
      RecordMetadataKey::BlackShortName,
      RecordMetadataKey::BlackName,
      RecordMetadataKey::ShitateName,
    ])
  }
  pub fn white_player_name_prefer_short(&self) -> Option<&str> {
    self.first_of(&[
      RecordMetadataKey::WhiteShortName,
      RecordMetadataKey::WhiteName,
      RecordMetadataKey::UwateName,
    ])
  }
}
