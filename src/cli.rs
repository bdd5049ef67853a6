// src/cli.rs
use std::{env, path::PathBuf};

use crate::config::consts::{DEFAULT_NEGATIVE_TOKENS, DEFAULT_POSITIVE_TOKENS};
use crate::config::options::{AppOptions, FieldFilter, Source};
use crate::csv::Delim;
use crate::engine::CanonMode;
use crate::error::{Error, Result};
use crate::progress::Progress;

pub const HELP: &str = include_str!("cli_help.txt");

pub enum Command {
    Run(CliArgs),
    Help,
}

pub struct CliArgs {
    pub options: AppOptions,
    pub quiet: bool,
    pub log: bool,
}

pub fn parse_env() -> Result<Command> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut opts = AppOptions::default();
    let mut quiet = false;
    let mut log = true;
    let mut positive: Option<Vec<String>> = None;
    let mut negative: Option<Vec<String>> = None;
    let mut keyed = false;

    let mut args = args.into_iter().map(Into::into);
    while let Some(a) = args.next() {
        let mut value = |flag: &str| {
            args.next().ok_or_else(|| Error::Config(format!("Missing value for {flag}")))
        };
        match a.as_str()
        {
            "-r" | "--roster" => opts.roster = PathBuf::from(value(&a)?),
            "-o" | "--out" => opts.export.set_path(&value(&a)?),
            "--format" => {
                let v = value(&a)?;
                opts.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => Delim::Csv,
                    "tsv" => Delim::Tsv,
                    other => return Err(Error::Config(format!("Unknown format: {}", other))),
                };}
            "-u" | "--url" => {
                if matches!(opts.source.source, Source::Captured { .. }) {
                    return Err(Error::Config(s!("--url and --payload are mutually exclusive")));
                }
                opts.source.source = Source::Api { url: value(&a)? };}
            "-p" | "--payload" => {
                if matches!(opts.source.source, Source::Api { .. }) {
                    return Err(Error::Config(s!("--url and --payload are mutually exclusive")));
                }
                opts.source.add_payload_path(PathBuf::from(value(&a)?));}
            "--referer" => opts.source.referer = Some(value(&a)?),
            "--attempts" => opts.source.attempts = parse_num(&a, &value(&a)?)?,
            "--timeout" => opts.source.timeout_secs = parse_num(&a, &value(&a)?)?,
            "--max-pages" => opts.source.max_pages = parse_num(&a, &value(&a)?)?,
            "--fields" => keyed = true,
            "--any-field" => keyed = false,
            "--positive" => { positive = Some(parse_list(&value(&a)?)); keyed = true; }
            "--negative" => { negative = Some(parse_list(&value(&a)?)); keyed = true; }
            "--canon" => {
                let v = value(&a)?;
                opts.matching.canon = match v.to_ascii_lowercase().as_str() {
                    "strict" => CanonMode::Strict,
                    "loose" => CanonMode::Loose,
                    other => return Err(Error::Config(format!("Unknown canon mode: {}", other))),
                };}
            "--separators" => opts.matching.separators = value(&a)?.chars().collect(),
            "--fold-case" => opts.matching.fold_case = true,
            "-q" | "--quiet" => quiet = true,
            "--no-log" => log = false,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(Error::Config(format!("Unknown arg: {}", a))),
        }
    }

    if keyed {
        let owned = |toks: &[&str]| -> Vec<String> { toks.iter().map(|t| t.to_string()).collect() };
        opts.matching.fields = FieldFilter::Keywords {
            positive: positive.unwrap_or_else(|| owned(DEFAULT_POSITIVE_TOKENS)),
            negative: negative.unwrap_or_else(|| owned(DEFAULT_NEGATIVE_TOKENS)),
        };
    }

    Ok(Command::Run(CliArgs { options: opts, quiet, log }))
}

fn parse_num<T: std::str::FromStr>(flag: &str, v: &str) -> Result<T> {
    v.trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid number for {flag}: {v}")))
}

fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Progress on stderr, one line per event.
pub struct CliProgress {
    pub quiet: bool,
    done: usize,
    total: Option<usize>,
}

impl CliProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, done: 0, total: None }
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: Option<usize>) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        if !self.quiet { eprintln!("{msg}"); }
    }

    fn item_done(&mut self, origin: &str, new_matches: usize) {
        self.done += 1;
        if self.quiet { return; }
        match self.total {
            Some(t) => eprintln!("[{}/{}] {origin}: +{new_matches}", self.done, t),
            None => eprintln!("[{}] {origin}: +{new_matches}", self.done),
        }
    }

    fn item_failed(&mut self, origin: &str, reason: &str) {
        self.done += 1;
        // failures are shown even when quiet
        eprintln!("Warning: {origin}: {reason}");
    }
}
