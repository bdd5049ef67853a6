// src/scrape/api.rs
// Paginated JSON API: GET, hand the page over, follow `next`.

use std::collections::HashSet;
use std::{thread, time::Duration};

use crate::config::options::SourceOptions;
use crate::core::net::{resolve_next, HttpClient};
use crate::error::Error;
use crate::progress::Progress;

use super::payload::Payload;

/// Outcome of walking a page chain. Pages handed over before `error`
/// occurred are still valid.
pub struct PageRun {
    pub pages: usize,
    pub error: Option<Error>,
}

/// Fetch `url` and every page reachable through `next`, passing each parsed
/// page to `on_page` as it arrives. Stops at the first failure.
pub fn fetch_pages(
    opts: &SourceOptions,
    url: &str,
    on_page: &mut dyn FnMut(Payload),
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> PageRun {
    let client = HttpClient::new(opts);
    let mut pages = 0usize;
    let mut seen: HashSet<String> = HashSet::new();
    let mut next = Some(url.to_string());

    while let Some(cur) = next.take() {
        if pages >= opts.max_pages {
            let reason = format!("more than {} pages", opts.max_pages);
            return PageRun { pages, error: Some(Error::Pagination { url: cur, reason }) };
        }
        if !seen.insert(cur.clone()) {
            let reason = s!("next link points to a page already fetched");
            return PageRun { pages, error: Some(Error::Pagination { url: cur, reason }) };
        }
        if pages > 0 && opts.page_pause_ms > 0 {
            thread::sleep(Duration::from_millis(opts.page_pause_ms));
        }

        logd!("GET {cur}");
        let body = match client.get_text(&cur) {
            Ok(b) => b,
            Err(e) => return PageRun { pages, error: Some(e) },
        };
        let page = match Payload::parse(cur.clone(), &body) {
            Ok(p) => p,
            Err(e) => return PageRun { pages, error: Some(e) },
        };

        next = page.next_link().map(|n| resolve_next(&cur, n));
        pages += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Page {pages}: {} records", page.record_count()));
        }
        on_page(page);
    }

    PageRun { pages, error: None }
}
