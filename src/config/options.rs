// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::csv::Delim;
use crate::engine::{AnyField, CanonMode, Canonicalizer, KeywordClassifier, Matcher};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub roster: PathBuf,
    pub source: SourceOptions,
    pub matching: MatchOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            roster: PathBuf::from(DEFAULT_ROSTER_FILE),
            source: SourceOptions::default(),
            matching: MatchOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/* ---------------- Source ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Nothing configured yet; a run refuses to start.
    Unset,
    /// Paginated JSON API, followed through `next`.
    Api { url: String },
    /// Saved responses: files, directories of `*.json`, or `-` for stdin.
    Captured { paths: Vec<PathBuf> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub source: Source,
    pub referer: Option<String>,
    pub timeout_secs: u64,
    pub attempts: u32,
    pub max_pages: usize,
    pub page_pause_ms: u64,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            source: Source::Unset,
            referer: None,
            timeout_secs: TIMEOUT_SECS,
            attempts: ATTEMPTS,
            max_pages: MAX_PAGES,
            page_pause_ms: PAGE_PAUSE_MS,
        }
    }
}

impl SourceOptions {
    pub fn add_payload_path(&mut self, path: PathBuf) {
        match &mut self.source {
            Source::Captured { paths } => paths.push(path),
            other => *other = Source::Captured { paths: vec![path] },
        }
    }
}

/* ---------------- Matching ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldFilter {
    /// Any string anywhere in the payload may be a name.
    Any,
    /// Only strings under keys that look like participant fields.
    Keywords { positive: Vec<String>, negative: Vec<String> },
}

impl FieldFilter {
    pub fn default_keywords() -> Self {
        FieldFilter::Keywords {
            positive: DEFAULT_POSITIVE_TOKENS.iter().map(|s| s.to_string()).collect(),
            negative: DEFAULT_NEGATIVE_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOptions {
    pub fields: FieldFilter,
    pub canon: CanonMode,
    pub separators: Vec<char>,
    pub fold_case: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            fields: FieldFilter::Any,
            canon: CanonMode::Strict,
            separators: DEFAULT_SEPARATORS.to_vec(),
            fold_case: false,
        }
    }
}

impl MatchOptions {
    pub fn canonicalizer(&self) -> Canonicalizer {
        Canonicalizer {
            mode: self.canon,
            separators: self.separators.clone(),
            fold_case: self.fold_case,
        }
    }

    pub fn matcher(&self) -> Matcher {
        let canon = self.canonicalizer();
        match &self.fields {
            FieldFilter::Any => Matcher::new(canon, AnyField),
            FieldFilter::Keywords { positive, negative } => {
                Matcher::new(canon, KeywordClassifier::new(positive, negative))
            }
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: Delim,
    out: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: Delim::Csv,
            out: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }
}

impl ExportOptions {
    pub fn set_path(&mut self, text: &str) {
        self.out = PathBuf::from(crate::file::normalize_separators(text.trim()));
    }

    /// Final report path. A directory (existing, or written with a trailing
    /// separator) gets the default file name with the format's extension.
    pub fn out_path(&self) -> PathBuf {
        if self.out.as_os_str().is_empty() {
            return self.default_file_name();
        }
        if self.out.is_dir() || crate::file::looks_like_dir_hint(&self.out) {
            return self.out.join(self.default_file_name());
        }
        self.out.clone()
    }

    fn default_file_name(&self) -> PathBuf {
        Path::new(DEFAULT_REPORT_FILE).with_extension(self.format.ext())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_plain_text_strict() {
        let o = AppOptions::default();
        assert_eq!(o.roster, PathBuf::from("names.txt"));
        assert_eq!(o.source.source, Source::Unset);
        assert_eq!(o.matching.fields, FieldFilter::Any);
        assert_eq!(o.matching.canon, CanonMode::Strict);
        assert_eq!(o.export.out_path(), PathBuf::from("results.csv"));
    }

    #[test]
    fn payload_paths_accumulate() {
        let mut s = SourceOptions::default();
        s.add_payload_path(PathBuf::from("a.json"));
        s.add_payload_path(PathBuf::from("dir"));
        assert_eq!(
            s.source,
            Source::Captured { paths: vec![PathBuf::from("a.json"), PathBuf::from("dir")] }
        );
    }

    #[test]
    fn matcher_follows_field_filter() {
        let mut m = MatchOptions::default();
        let lookup = ["김민수"].into_iter().collect();
        let v = json!({"coach_name": "김민수"});
        assert_eq!(m.matcher().extract_matches(&v, &lookup).len(), 1);

        m.fields = FieldFilter::default_keywords();
        assert!(m.matcher().extract_matches(&v, &lookup).is_empty());
    }

    #[test]
    fn dir_hint_gets_default_name_with_format_ext() {
        let mut e = ExportOptions::default();
        e.format = Delim::Tsv;
        e.set_path("reports/");
        assert_eq!(e.out_path(), PathBuf::from("reports").join("results.tsv"));

        e.set_path("out.txt");
        assert_eq!(e.out_path(), PathBuf::from("out.txt"));
    }
}
