use std::fs::File;
use std::io::{BufRead, BufReader, Lines};

//Yields blocks of trimmed lines separated by `separator` lines.
pub struct FileIterator<R: BufRead = BufReader<File>> {
  it: Lines<R>,
  separator: String,
  lines: usize,
  done: bool,
}

impl<R: BufRead> Iterator for FileIterator<R> {
  type Item = std::io::Result<Vec<String>>;
  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    let mut r = Vec::new();
    loop {
      let t = match self.it.next() {
        Some(Ok(t)) => t,
        Some(Err(err)) => {
          self.done = true;
          return Some(Err(err));
        }
        None => {
          self.done = true;
          break;
        }
      };
      self.lines += 1;
      let t = t.trim();
      if t == self.separator {
        if r.is_empty() {
          continue;
        }
        break;
      }
      r.push(t.to_owned());
    }
    if r.is_empty() {
      None
    } else {
      Some(Ok(r))
    }
  }
}

impl FileIterator {
  pub fn new(filename: &str, separator: &str) -> std::io::Result<Self> {
    let file = File::open(filename)?;
    Ok(FileIterator::from_reader(BufReader::new(file), separator))
  }
}

impl<R: BufRead> FileIterator<R> {
  pub fn from_reader(reader: R, separator: &str) -> Self {
    FileIterator {
      it: reader.lines(),
      separator: separator.to_owned(),
      lines: 0,
      done: false,
    }
  }
  pub fn lines(&self) -> usize {
    self.lines
  }
}

#[cfg(test)]
mod test {
  use super::FileIterator;
  #[test]
  fn test_blocks() {
    let data = "\nposition startpos\nmoves 7g7f\n\n\n  sfen 9/9/9/9/9/9/9/9/9 b - 1  \n";
    let blocks: Vec<_> = FileIterator::from_reader(data.as_bytes(), "")
      .map(|b| b.unwrap())
      .collect();
    assert_eq!(
      blocks,
      vec![
        vec!["position startpos".to_owned(), "moves 7g7f".to_owned()],
        vec!["sfen 9/9/9/9/9/9/9/9/9 b - 1".to_owned()],
      ]
    );
  }
}
