//! blogkit CLI Library
//!
//! Command implementations for the `blogkit` binary, exposed as a library so
//! they can be driven from tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, new, posts, theme)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use blogkit::cmd;
//!
//! // Validate configuration and every post
//! cmd::check::run(
//!     Path::new("site.toml"),
//!     Path::new("theme.toml"),
//!     Path::new("src/content/blog"),
//!     false,
//! )
//! .unwrap();
//! ```

pub mod cmd;

pub use blogkit_content::{Collection, ContentCollector};
pub use blogkit_core::{BlogPost, SiteConfig, ThemeConfig};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
