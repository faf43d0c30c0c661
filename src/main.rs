use std::fs::File;
use std::io::{BufWriter, Write};

use shogi_record::cmd_options::CMDOptions;
use shogi_record::io::FileIterator;
use shogi_record::record::Record;
use shogi_record::shogi::jishogi::{count_jishogi_declaration_point, judge_jishogi_declaration};
use shogi_record::timer::Timer;

use log::{debug, error, info, warn};

//first line creates the record, the other lines are merged into it
fn build_record(lines: &[String]) -> Option<Record> {
  let (first, rest) = lines.split_first()?;
  let mut record = match Record::new_by_usi(first) {
    Ok(record) => record,
    Err(err) => {
      warn!("{}", err);
      return None;
    }
  };
  for line in rest {
    match Record::new_by_usi(line) {
      Ok(other) => {
        if !record.merge(&other) {
          warn!("different initial position, skipped: {}", line);
        }
      }
      Err(err) => warn!("{}", err),
    }
  }
  Some(record)
}

fn log_summary(record: &Record, opts: &CMDOptions, block: usize) {
  let pos = record.position();
  let branches = record
    .descendants(record.first_id())
    .into_iter()
    .filter(|&id| record.node(id).map_or(false, |node| node.branch_index() > 0))
    .count();
  info!(
    "Block #{}: {} nodes, {} branches, length {}, sfen: {}",
    block,
    record.node_count(),
    branches,
    record.length(),
    record.sfen()
  );
  if record.repetition() {
    match record.perpetual_check() {
      Some(color) => info!("Block #{}: perpetual check by {}", block, color),
      None => info!("Block #{}: repetition", block),
    }
  }
  let color = pos.color();
  debug!(
    "Block #{}: {} has {} declaration points, judgement {:?}",
    block,
    color,
    count_jishogi_declaration_point(pos, color),
    judge_jishogi_declaration(opts.rule, pos, color)
  );
}

fn process_file<W: Write>(filename: &str, opts: &CMDOptions, out: &mut W) -> std::io::Result<usize> {
  let mut blocks = 0;
  for lines in FileIterator::new(filename, "")? {
    let lines = lines?;
    blocks += 1;
    let record = match build_record(&lines) {
      Some(record) => record,
      None => {
        error!("{}: block #{} is skipped", filename, blocks);
        continue;
      }
    };
    log_summary(&record, opts, blocks);
    for line in record.get_usi_lines() {
      writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
  }
  Ok(blocks)
}

fn main() -> std::io::Result<()> {
  let opts = match CMDOptions::new(std::env::args().skip(1)) {
    Ok(opts) => opts,
    Err(err) => {
      eprintln!("{}", err);
      std::process::exit(2);
    }
  };
  env_logger::Builder::from_default_env()
    .filter_level(opts.level_filter)
    .init();
  let mut out: Box<dyn Write> = if opts.output.is_empty() {
    Box::new(BufWriter::new(std::io::stdout()))
  } else {
    Box::new(BufWriter::new(File::create(&opts.output)?))
  };
  let timer = Timer::new();
  for filename in &opts.args {
    let blocks = process_file(filename, &opts, &mut out)?;
    info!("{}: {} block(s) were processed.", filename, blocks);
  }
  out.flush()?;
  info!("Done in {:.3}s", timer.elapsed());
  Ok(())
}
