// src/core/net.rs
// Blocking HTTP GET for JSON endpoints.

use std::{thread, time::Duration};

use ureq::{Agent, AgentBuilder};

use crate::config::consts::{RETRY_PAUSE_MS, USER_AGENT};
use crate::config::options::SourceOptions;
use crate::error::{Error, Result};

pub struct HttpClient {
    agent: Agent,
    referer: Option<String>,
    attempts: u32,
}

impl HttpClient {
    pub fn new(opts: &SourceOptions) -> Self {
        let agent = AgentBuilder::new()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            referer: opts.referer.clone(),
            attempts: opts.attempts.max(1),
        }
    }

    /// GET `url` and return the body as text. Transport errors, 429 and 5xx
    /// are retried up to `attempts` times; other statuses fail at once.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let mut last = s!();
        for attempt in 1..=self.attempts {
            match self.get_once(url) {
                Ok(body) => return Ok(body),
                Err((retryable, reason)) => {
                    logd!("GET {url} attempt {attempt}/{}: {reason}", self.attempts);
                    last = reason;
                    if !retryable { break; }
                    if attempt < self.attempts {
                        thread::sleep(Duration::from_millis(RETRY_PAUSE_MS * attempt as u64));
                    }
                }
            }
        }
        Err(Error::Http { url: url.to_string(), reason: last })
    }

    fn get_once(&self, url: &str) -> std::result::Result<String, (bool, String)> {
        let mut req = self
            .agent
            .get(url)
            .set("Accept", "application/json, text/plain, */*")
            .set("X-Requested-With", "XMLHttpRequest");
        if let Some(r) = &self.referer {
            req = req.set("Referer", r);
        }

        match req.call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| (true, format!("reading body: {e}"))),
            Err(ureq::Error::Status(code, _)) => {
                let retryable = code == 429 || code >= 500;
                Err((retryable, format!("HTTP status {code}")))
            }
            Err(ureq::Error::Transport(t)) => Err((true, t.to_string())),
        }
    }
}

/// Resolve a pagination `next` link against the page it came from.
/// Absolute URLs pass through; `/path` keeps the current origin; anything
/// else replaces the last path segment.
pub fn resolve_next(current: &str, next: &str) -> String {
    if next.starts_with("http://") || next.starts_with("https://") {
        return next.to_string();
    }
    let scheme_end = current.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = current[scheme_end..]
        .find(['/', '?', '#'])
        .map(|i| scheme_end + i)
        .unwrap_or(current.len());
    let origin = &current[..path_start];

    if let Some(q) = next.strip_prefix('?') {
        let base = &current[..current.find(['?', '#']).unwrap_or(current.len())];
        return format!("{base}?{q}");
    }
    if next.starts_with('/') {
        return format!("{origin}{next}");
    }
    let base = &current[..current.find(['?', '#']).unwrap_or(current.len())];
    match base.rfind('/') {
        Some(i) if i >= path_start => format!("{}{}", &base[..=i], next),
        _ => format!("{origin}/{next}"),
    }
}
