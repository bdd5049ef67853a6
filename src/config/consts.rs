// src/config/consts.rs

// Files
pub const DEFAULT_ROSTER_FILE: &str = "names.txt";
pub const DEFAULT_REPORT_FILE: &str = "results.csv";
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Net
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const TIMEOUT_SECS: u64 = 15;
pub const ATTEMPTS: u32 = 3;
pub const RETRY_PAUSE_MS: u64 = 500;
pub const PAGE_PAUSE_MS: u64 = 75; // be polite
pub const MAX_PAGES: usize = 500;

// Captured payloads
pub const WORKERS: usize = 4;
pub const PAYLOAD_EXT: &str = "json";
pub const STDIN_MARKER: &str = "-";

// Diagnostics
pub const EXCERPT_CHARS: usize = 300;

// Matching
pub const DEFAULT_SEPARATORS: &[char] = &['·', '-'];
pub const DEFAULT_POSITIVE_TOKENS: &[&str] = &[
    "participant", "player", "athlete", "competitor",
    "참가자", "선수",
];
pub const DEFAULT_NEGATIVE_TOKENS: &[&str] = &[
    "coach", "instructor",
    "코치", "관장", "사범", "지도자",
];
