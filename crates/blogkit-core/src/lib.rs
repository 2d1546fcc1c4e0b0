//! blogkit Core Library
//!
//! Content schema, site configuration, site metadata and theme tokens for a
//! statically built blog.

pub mod category;
pub mod config;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod schema;
pub mod site;
pub mod theme;

pub use category::Category;
pub use config::SiteConfig;
pub use error::{CoreError, Issue, Result};
pub use frontmatter::RawFrontmatter;
pub use schema::BlogPost;
pub use site::SiteMeta;
pub use theme::{ColorMode, ThemeConfig};
