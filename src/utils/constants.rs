//! Default values shared by the config builder and both strategies

/// Default timeout for the static HTTP attempt: 30 seconds
///
/// Static fetches are a single GET, so they get the shorter bound.
pub const DEFAULT_STATIC_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for the dynamic rendering attempt: 60 seconds
///
/// Covers navigation plus the network-idle wait. Rendering is strictly
/// slower than a plain GET.
pub const DEFAULT_DYNAMIC_TIMEOUT_MS: u64 = 60_000;

/// Fixed delay after network idle so lazily inserted content can attach
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 2_000;

/// Quiet period with zero in-flight requests that counts as "network idle"
pub const DEFAULT_NETWORK_IDLE_WINDOW_MS: u64 = 500;

/// Element waited for (best-effort) before capturing rendered markup
pub const DEFAULT_READY_SELECTOR: &str = "body";

/// Upper bound for the best-effort ready-selector wait
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 5_000;

/// Desktop viewport used by the rendering session
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 1080;

/// Reserved selector-map key naming the repeating record element
pub const CONTAINER_KEY: &str = "container";

/// Chrome user agent string sent by both strategies
///
/// Chrome releases new stable versions ~every 4 weeks.
/// Update quarterly to stay within reasonable version window.
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// `Accept` header matching what Chrome sends for top-level navigations
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// `Accept-Language` header for both strategies
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
