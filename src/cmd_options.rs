use std::iter::{Iterator, Peekable};
use std::str::FromStr;

use log::LevelFilter;

use crate::shogi::jishogi::JishogiDeclarationRule;

fn try_parse_option<I: Iterator<Item = String>>(
  it: &mut Peekable<I>,
  short: &str,
  long: &str,
) -> bool {
  if let Some(s) = it.peek() {
    if let Some(t) = s.strip_prefix("--") {
      if t == long {
        it.next();
        return true;
      }
    }
  }
  if short.is_empty() {
    return false;
  }
  if let Some(s) = it.peek() {
    if let Some(t) = s.strip_prefix('-') {
      if t == short {
        it.next();
        return true;
      }
    }
  }
  false
}

fn parse_value<R: FromStr<Err = impl std::fmt::Display>>(option: &str, value: &str) -> Result<R, String> {
  R::from_str(value.trim())
    .map_err(|err| format!("can't parse command line argument {} {}, {}", option, value, err))
}

//"--long=value", "--long value", "-svalue" or "-s value"
fn try_parse_arg_option<R: FromStr<Err = impl std::fmt::Display>, I: Iterator<Item = String>>(
  it: &mut Peekable<I>,
  short: &str,
  long: &str,
) -> Result<Option<R>, String> {
  let s = match it.peek() {
    Some(s) => s.clone(),
    None => return Ok(None),
  };
  let rest = if let Some(t) = s.strip_prefix("--") {
    match t.strip_prefix(long) {
      Some(u) if u.is_empty() || u.starts_with('=') => Some(u),
      _ => None,
    }
  } else if short.is_empty() {
    None
  } else {
    s.strip_prefix('-').and_then(|t| t.strip_prefix(short))
  };
  let rest = match rest {
    Some(rest) => rest,
    None => return Ok(None),
  };
  it.next();
  let rest = rest.strip_prefix('=').unwrap_or(rest);
  if !rest.is_empty() {
    return parse_value(&s, rest).map(Some);
  }
  match it.next() {
    Some(w) => parse_value(&s, &w).map(Some),
    None => Err(format!("empty argument for command line option {}", s)),
  }
}

#[derive(Debug)]
pub struct CMDOptions {
  pub rule: JishogiDeclarationRule,
  pub output: String,
  pub level_filter: LevelFilter,
  pub args: Vec<String>,
}

impl CMDOptions {
  pub fn new<I: Iterator<Item = String>>(it: I) -> Result<Self, String> {
    let mut p = it.peekable();
    let mut rule = JishogiDeclarationRule::General27;
    let mut level_filter = LevelFilter::Error;
    let mut output = String::new();
    loop {
      if let Some(r) = try_parse_arg_option::<u32, _>(&mut p, "r", "rule")? {
        rule = match r {
          24 => JishogiDeclarationRule::General24,
          27 => JishogiDeclarationRule::General27,
          _ => return Err(format!("unknown declaration rule {}, expected 24 or 27", r)),
        };
        continue;
      }
      if let Some(o) = try_parse_arg_option::<String, _>(&mut p, "o", "output")? {
        output = o;
        continue;
      }
      if try_parse_option(&mut p, "w", "warn") {
        level_filter = LevelFilter::Warn;
        continue;
      }
      if try_parse_option(&mut p, "i", "info") {
        level_filter = LevelFilter::Info;
        continue;
      }
      if try_parse_option(&mut p, "", "debug") {
        level_filter = LevelFilter::Debug;
        continue;
      }
      break;
    }
    Ok(CMDOptions {
      rule,
      output,
      level_filter,
      args: p.collect(),
    })
  }
}
