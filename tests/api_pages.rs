// tests/api_pages.rs
//
// Pagination against a throwaway HTTP server on 127.0.0.1.
//
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use roster_check::config::options::{AppOptions, SourceOptions, Source};
use roster_check::error::Error;
use roster_check::runner;
use roster_check::scrape::{fetch_pages, Payload};

type Routes = HashMap<String, (u16, String)>;

struct Server {
    base: String,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Server {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes: Arc<Mutex<Routes>> = Arc::default();
        let requests: Arc<Mutex<Vec<String>>> = Arc::default();

        let (r, q) = (Arc::clone(&routes), Arc::clone(&requests));
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &r, &q);
            }
        });
        Self { base, routes, requests }
    }

    fn route(&self, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(path.to_string(), (status, body.to_string()));
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, routes: &Mutex<Routes>, requests: &Mutex<Vec<String>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let head = String::from_utf8_lossy(&buf).into_owned();
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    requests.lock().unwrap().push(head);

    let (status, body) = routes
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or((404, "{}".to_string()));
    let resp = format!(
        "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(resp.as_bytes());
    let _ = stream.flush();
}

fn source_opts() -> SourceOptions {
    roster_check::log::set_enabled(false);
    SourceOptions { attempts: 1, page_pause_ms: 0, timeout_secs: 5, ..SourceOptions::default() }
}

fn collect(opts: &SourceOptions, url: &str) -> (Vec<Payload>, Option<Error>) {
    let mut pages = Vec::new();
    let run = fetch_pages(opts, url, &mut |p| pages.push(p), None);
    assert_eq!(run.pages, pages.len());
    (pages, run.error)
}

#[test]
fn follows_absolute_and_rooted_next_links() {
    let srv = Server::start();
    srv.route("/api/?page=1", 200, &format!(
        r#"{{"next":"{}","results":[{{"player":"홍길동"}}]}}"#, srv.url("/api/?page=2")
    ));
    srv.route("/api/?page=2", 200, r#"{"next":"/api/?page=3","results":[{"player":"김민수"}]}"#);
    srv.route("/api/?page=3", 200, r#"{"next":null,"results":[]}"#);

    let mut opts = source_opts();
    opts.referer = Some(s("https://example.com/participations/"));
    let (pages, err) = collect(&opts, &srv.url("/api/?page=1"));

    assert!(err.is_none(), "{err:?}");
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2].origin, srv.url("/api/?page=3"));

    let first = &srv.requests()[0].to_ascii_lowercase();
    assert!(first.contains("x-requested-with: xmlhttprequest"));
    assert!(first.contains("referer: https://example.com/participations/"));
    assert!(first.contains("accept: application/json"));
}

#[test]
fn bare_array_is_a_single_page() {
    let srv = Server::start();
    srv.route("/list", 200, r#"[{"player":"a"},{"player":"b"}]"#);
    let (pages, err) = collect(&source_opts(), &srv.url("/list"));
    assert!(err.is_none());
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].record_count(), 2);
}

#[test]
fn non_json_page_stops_the_chain() {
    let srv = Server::start();
    srv.route("/p1", 200, r#"{"next":"/p2","results":[]}"#);
    srv.route("/p2", 200, "<html>Access denied</html>");

    let (pages, err) = collect(&source_opts(), &srv.url("/p1"));
    assert_eq!(pages.len(), 1);
    assert!(err.unwrap().is_malformed());
}

#[test]
fn server_errors_are_retried_then_reported() {
    let srv = Server::start();
    srv.route("/down", 503, "{}");
    let mut opts = source_opts();
    opts.attempts = 2;

    let (pages, err) = collect(&opts, &srv.url("/down"));
    assert!(pages.is_empty());
    assert!(matches!(err, Some(Error::Http { .. })));
    assert_eq!(srv.requests().len(), 2);
}

#[test]
fn client_errors_are_not_retried() {
    let srv = Server::start();
    let mut opts = source_opts();
    opts.attempts = 3;

    let (_, err) = collect(&opts, &srv.url("/missing"));
    assert!(matches!(err, Some(Error::Http { .. })));
    assert_eq!(srv.requests().len(), 1);
}

#[test]
fn self_referencing_next_is_caught() {
    let srv = Server::start();
    srv.route("/loop", 200, r#"{"next":"/loop","results":[]}"#);
    let (pages, err) = collect(&source_opts(), &srv.url("/loop"));
    assert_eq!(pages.len(), 1);
    assert!(matches!(err, Some(Error::Pagination { .. })));
}

#[test]
fn page_limit_is_enforced() {
    let srv = Server::start();
    srv.route("/a", 200, r#"{"next":"/b","results":[]}"#);
    srv.route("/b", 200, r#"{"next":"/c","results":[]}"#);
    srv.route("/c", 200, r#"{"next":null,"results":[]}"#);
    let mut opts = source_opts();
    opts.max_pages = 2;

    let (pages, err) = collect(&opts, &srv.url("/a"));
    assert_eq!(pages.len(), 2);
    assert!(matches!(err, Some(Error::Pagination { .. })));
}

/* ---------------- Through the runner ---------------- */

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("roster_check_api_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn app_options(dir: &PathBuf, url: String) -> AppOptions {
    fs::write(dir.join("names.txt"), "홍길동\n김민수\n").unwrap();
    let mut opts = AppOptions::default();
    opts.roster = dir.join("names.txt");
    opts.export.set_path(dir.join("results.csv").to_str().unwrap());
    opts.source = SourceOptions { source: Source::Api { url }, ..source_opts() };
    opts
}

#[test]
fn runner_reports_across_pages() {
    let srv = Server::start();
    srv.route("/p1", 200, r#"{"next":"/p2","results":[{"player_name":"홍 길동"}]}"#);
    srv.route("/p2", 200, r#"{"next":null,"results":[{"player_name":"이영희"}]}"#);
    let dir = tmp_dir("runner_pages");

    let summary = runner::run(&app_options(&dir, srv.url("/p1")), None).unwrap();
    assert_eq!(summary.payloads, 2);
    assert_eq!(summary.records, 2);
    assert_eq!(
        fs::read_to_string(&summary.report).unwrap(),
        "name,found\n홍길동,YES\n김민수,NO\n"
    );
}

#[test]
fn runner_aborts_when_first_page_fails() {
    let srv = Server::start();
    let dir = tmp_dir("runner_down");

    let err = runner::run(&app_options(&dir, srv.url("/nothing-here")), None).unwrap_err();
    assert!(matches!(err, Error::Acquisition(_)));
    assert!(!dir.join("results.csv").exists());
}

fn s(v: &str) -> String {
    v.to_string()
}
