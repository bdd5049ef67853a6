// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::options::{AppOptions, Source},
    engine::{LookupSet, MatchedSet, Matcher, ReportRow, Roster},
    error::{Error, Result},
    file::{read_roster, write_report_file},
    progress::Progress,
    scrape::{self, Payload},
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: PathBuf,
    pub rows: Vec<ReportRow>,
    pub payloads: usize,
    pub records: usize,
    pub matched: usize,
    /// Payloads that could not be used. Non-empty means the report is
    /// built from a partial set of payloads.
    pub failures: Vec<Error>,
}

impl RunSummary {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
    pub fn found(&self) -> usize {
        self.rows.iter().filter(|r| r.found).count()
    }
}

/// Owns the run's `MatchedSet` and is the only thing that writes to it.
/// Payloads may be offered in any order.
pub struct Collector<'a> {
    matcher: &'a Matcher,
    lookup: &'a LookupSet,
    matched: MatchedSet,
    payloads: usize,
    records: usize,
    failures: Vec<Error>,
}

impl<'a> Collector<'a> {
    pub fn new(matcher: &'a Matcher, lookup: &'a LookupSet) -> Self {
        Self {
            matcher,
            lookup,
            matched: MatchedSet::new(),
            payloads: 0,
            records: 0,
            failures: Vec::new(),
        }
    }

    /// Walk one payload into the set; returns how many keys were new.
    pub fn accept(&mut self, payload: &Payload) -> usize {
        self.payloads += 1;
        self.records += payload.record_count();
        let added = self.matcher.collect_into(&payload.value, self.lookup, &mut self.matched);
        logd!("{}: {} records, {} new matches", payload.origin, payload.record_count(), added);
        added
    }

    pub fn reject(&mut self, err: Error) {
        loge!("{err}");
        self.failures.push(err);
    }

    pub fn matched(&self) -> &MatchedSet {
        &self.matched
    }

    /// Apply the abort policy: without a single usable payload the run fails,
    /// surfacing the first malformed payload if there was one.
    pub fn finish(mut self) -> Result<Collected> {
        if self.payloads == 0 {
            if let Some(i) = self.failures.iter().position(Error::is_malformed) {
                return Err(self.failures.swap_remove(i));
            }
            let reason = match self.failures.into_iter().next() {
                Some(e) => e.to_string(),
                None => s!("the source produced no payloads"),
            };
            return Err(Error::Acquisition(reason));
        }
        Ok(Collected {
            matched: self.matched,
            payloads: self.payloads,
            records: self.records,
            failures: self.failures,
        })
    }
}

#[derive(Debug)]
pub struct Collected {
    pub matched: MatchedSet,
    pub payloads: usize,
    pub records: usize,
    pub failures: Vec<Error>,
}

/// Top-level run: roster → payloads → report file.
/// Nothing is written if no payload could be used.
pub fn run(opts: &AppOptions, mut progress: Option<&mut (dyn Progress + '_)>) -> Result<RunSummary> {
    let canon = opts.matching.canonicalizer();
    let roster = Roster::parse(&read_roster(&opts.roster)?, &canon);
    let out = opts.export.out_path();

    if roster.is_empty() {
        logf!("Roster {} has no names; writing header-only report", opts.roster.display());
        if let Some(p) = progress.as_deref_mut() {
            p.log("Roster is empty; nothing to look up.");
        }
        let report = write_report_file(&out, &[], opts.export.format)?;
        return Ok(RunSummary {
            report,
            rows: Vec::new(),
            payloads: 0,
            records: 0,
            matched: 0,
            failures: Vec::new(),
        });
    }

    let matcher = opts.matching.matcher();
    let lookup = roster.lookup();
    logf!("Roster: {} names, {} distinct keys", roster.len(), lookup.len());

    let collected = collect(opts, &matcher, &lookup, progress.as_deref_mut())?;

    let rows = roster.reconcile(&collected.matched);
    let report = write_report_file(&out, &rows, opts.export.format)?;
    logf!("Wrote {} ({} matched keys)", report.display(), collected.matched.len());

    Ok(RunSummary {
        report,
        rows,
        payloads: collected.payloads,
        records: collected.records,
        matched: collected.matched.len(),
        failures: collected.failures,
    })
}

/// Drive the configured source and feed every payload through one collector.
pub fn collect(
    opts: &AppOptions,
    matcher: &Matcher,
    lookup: &LookupSet,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Collected> {
    let mut collector = Collector::new(matcher, lookup);

    match &opts.source.source {
        Source::Unset => {
            return Err(Error::Config(s!("no payload source: pass --url or --payload")));
        }
        Source::Api { url } => {
            if let Some(p) = progress.as_deref_mut() {
                p.begin(None);
            }
            let mut on_page = |page: Payload| {
                collector.accept(&page);
            };
            let run = scrape::fetch_pages(&opts.source, url, &mut on_page, progress.as_deref_mut());
            logf!("Fetched {} pages from {url}", run.pages);
            if let Some(e) = run.error {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(url, &e.to_string());
                }
                collector.reject(e);
            }
        }
        Source::Captured { paths } => {
            let files = scrape::expand_paths(paths)?;
            if let Some(p) = progress.as_deref_mut() {
                p.begin(Some(files.len()));
            }
            for (origin, result) in scrape::load_all(files) {
                match result {
                    Ok(payload) => {
                        let added = collector.accept(&payload);
                        if let Some(p) = progress.as_deref_mut() {
                            p.item_done(&origin, added);
                        }
                    }
                    Err(e) => {
                        if let Some(p) = progress.as_deref_mut() {
                            p.item_failed(&origin, &e.to_string());
                        }
                        collector.reject(e);
                    }
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Canonicalizer;
    use crate::progress::NullProgress;

    fn lookup(names: &[&str]) -> LookupSet {
        names.iter().copied().collect()
    }

    #[test]
    fn collector_accumulates_across_payloads() {
        let matcher = Matcher::default();
        let keys = lookup(&["홍길동", "김민수", "박서준"]);
        let mut c = Collector::new(&matcher, &keys);

        let p1 = Payload::parse("p1", r#"[{"player":"홍 길동"}]"#).unwrap();
        let p2 = Payload::parse("p2", r#"{"results":[{"player":"홍길동"},{"player":"김민수"}]}"#).unwrap();
        assert_eq!(c.accept(&p1), 1);
        assert_eq!(c.accept(&p2), 1);
        assert_eq!(c.matched().sorted(), vec!["김민수", "홍길동"]);

        let done = c.finish().unwrap();
        assert_eq!(done.payloads, 2);
        assert_eq!(done.records, 3);
        assert!(done.failures.is_empty());
    }

    #[test]
    fn collector_without_payloads_prefers_malformed_error() {
        let matcher = Matcher::new(Canonicalizer::loose(), crate::engine::AnyField);
        let keys = lookup(&["a"]);
        let mut c = Collector::new(&matcher, &keys);
        c.reject(Error::Acquisition(s!("timed out")));
        c.reject(Error::malformed("p2", "expected value", "<html>"));
        assert!(c.matched().is_empty());
        assert!(c.finish().unwrap_err().is_malformed());
    }

    #[test]
    fn collector_without_anything_is_acquisition() {
        let matcher = Matcher::default();
        let keys = lookup(&["a"]);
        let c = Collector::new(&matcher, &keys);
        assert!(matches!(c.finish(), Err(Error::Acquisition(_))));
    }

    #[test]
    fn progress_stays_usable_after_a_run() {
        crate::log::set_enabled(false);
        let dir = std::env::temp_dir().join("roster_check_runner_progress");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("names.txt"), "a\nb\n").unwrap();
        std::fs::write(dir.join("p.json"), r#"["a"]"#).unwrap();

        let mut opts = AppOptions::default();
        opts.roster = dir.join("names.txt");
        opts.export.set_path(dir.join("out.csv").to_str().unwrap());
        opts.source.add_payload_path(dir.join("p.json"));

        let mut sink = NullProgress;
        let first = run(&opts, Some(&mut sink)).unwrap();
        let second = run(&opts, Some(&mut sink)).unwrap();
        assert_eq!(first.found(), 1);
        assert_eq!(second.rows, first.rows);
    }
}
