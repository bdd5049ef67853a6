// src/scrape/captured.rs
// Saved responses (e.g. intercepted from a browser session) read from disk.

use std::{
    fs,
    io::Read,
    path::PathBuf,
    sync::{atomic::{AtomicUsize, Ordering}, mpsc, Arc},
    thread,
};

use crate::config::consts::{PAYLOAD_EXT, STDIN_MARKER, WORKERS};
use crate::error::{Error, Result};
use crate::file::list_files_with_ext;

use super::payload::Payload;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadFile {
    Path(PathBuf),
    Stdin,
}

impl PayloadFile {
    pub fn origin(&self) -> String {
        match self {
            PayloadFile::Path(p) => p.display().to_string(),
            PayloadFile::Stdin => s!("<stdin>"),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            PayloadFile::Path(p) => fs::read_to_string(p).map_err(|e| Error::io(p, e)),
            PayloadFile::Stdin => {
                let mut buf = s!();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| Error::io(STDIN_MARKER, e))?;
                Ok(buf)
            }
        }
    }

    pub fn load(&self) -> Result<Payload> {
        let text = self.read()?;
        Payload::parse(self.origin(), &text)
    }
}

/// Expand user paths: directories become their `*.json` files (sorted),
/// `-` becomes stdin (once), anything else is taken as a file.
pub fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PayloadFile>> {
    let mut out = Vec::new();
    let mut stdin_seen = false;
    for p in paths {
        if p.as_os_str() == STDIN_MARKER {
            if !stdin_seen {
                out.push(PayloadFile::Stdin);
                stdin_seen = true;
            }
        } else if p.is_dir() {
            let files = list_files_with_ext(p, PAYLOAD_EXT)?;
            if files.is_empty() {
                logf!("No .{PAYLOAD_EXT} files in {}", p.display());
            }
            out.extend(files.into_iter().map(PayloadFile::Path));
        } else {
            out.push(PayloadFile::Path(p.to_path_buf()));
        }
    }
    Ok(out)
}

/// Load and parse `files` on a small worker pool. Results arrive on the
/// returned channel in completion order; the caller is the only consumer.
pub fn load_all(files: Vec<PayloadFile>) -> mpsc::Receiver<(String, Result<Payload>)> {
    let (res_tx, res_rx) = mpsc::channel();
    if files.is_empty() {
        return res_rx;
    }

    let files = Arc::new(files);
    let counter = Arc::new(AtomicUsize::new(0));
    let workers = WORKERS.min(files.len()).max(1);

    for _ in 0..workers {
        let files = Arc::clone(&files);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= files.len() {
                    break;
                }
                let file = &files[i];
                if tx.send((file.origin(), file.load())).is_err() {
                    break; // receiver gone
                }
            }
        });
    }
    drop(res_tx); // workers hold the only senders now

    res_rx
}
