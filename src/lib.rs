//! # Fiew Bot
//!
//! Posts queued markdown content or generated daily messages to the Fiew
//! Facebook page. Designed to run under an external scheduler (GitHub
//! Actions cron): one invocation, one post attempt, exit status reports the
//! outcome.
//!
//! # Architecture: One Linear Run
//!
//! ```text
//! 1. Config    defaults → config.toml → FB_* env    (layered merge)
//! 2. Content   posts/ queue  →  archive/            (or generated message)
//! 3. Render    markdown      →  plain text + tags
//! 4. Publish   POST /{page_id}/feed                 (Graph API)
//! ```
//!
//! There is deliberately no state beyond the filesystem: the posts directory
//! is the queue, archiving a file is the act of consuming it, and each run
//! writes its own log file. Failures are logged once and the process exits
//! non-zero; the next scheduler tick is the retry policy.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Layered `config.toml` + environment loading, validation, merging |
//! | [`posts`] | Posts queue: next markdown file by name, archive on consume |
//! | [`daily`] | Generated messages: special calendar dates, day-of-week themes |
//! | [`render`] | Markdown → plain-text post body, hashtags, length cap |
//! | [`graph`] | Graph API client: token check, feed publish |
//! | [`logging`] | tracing setup: stdout plus a per-run log file |

pub mod config;
pub mod daily;
pub mod graph;
pub mod logging;
pub mod posts;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
