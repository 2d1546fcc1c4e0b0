//! blogkit CLI
//!
//! Build-time validation for blog content, site configuration and theme tokens.
//!
//! This is the binary entry point. The command implementations are in `lib.rs`.

use std::path::PathBuf;

use blogkit_core::Category;
use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for blogkit.
#[derive(Parser)]
#[command(
    name = "blogkit",
    version,
    about = "Validate blog content and configuration"
)]
struct Cli {
    /// Path to the site configuration file
    #[arg(short, long, default_value = "site.toml")]
    site: PathBuf,

    /// Path to the theme configuration file
    #[arg(short, long, default_value = "theme.toml")]
    theme: PathBuf,

    /// Blog content collection directory
    #[arg(short, long, default_value = "src/content/blog")]
    content: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate configuration and every post
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Create a new unpublished post
    New {
        /// Slug of the post (e.g., my-article)
        slug: String,
        /// Post title (derived from the slug when omitted)
        #[arg(long)]
        title: Option<String>,
        /// Post category, repeatable
        #[arg(short = 'k', long = "category", required = true)]
        categories: Vec<Category>,
    },
    /// List validated posts, newest first
    Posts {
        /// Include unpublished posts
        #[arg(long)]
        all: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print theme tokens as CSS custom properties
    Theme {
        /// List files selected by the content globs instead
        #[arg(long)]
        files: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    blogkit::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { strict } => {
            blogkit::cmd::check::run(&cli.site, &cli.theme, &cli.content, strict)?;
        }
        Commands::New {
            slug,
            title,
            categories,
        } => {
            blogkit::cmd::new::run(&cli.content, &slug, title.as_deref(), &categories)?;
        }
        Commands::Posts { all, json } => {
            blogkit::cmd::posts::run(&cli.content, all, json)?;
        }
        Commands::Theme { files } => {
            blogkit::cmd::theme::run(&cli.theme, files)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["blogkit", "check", "--strict"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.site, PathBuf::from("site.toml"));
        assert_eq!(cli.theme, PathBuf::from("theme.toml"));
        assert_eq!(cli.content, PathBuf::from("src/content/blog"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_new_command_parsing() {
        let args = [
            "blogkit",
            "new",
            "typed-sql",
            "--category",
            "sql",
            "-k",
            "typescript",
            "--title",
            "Typed SQL",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::New {
                slug,
                title,
                categories,
            } => {
                assert_eq!(slug, "typed-sql");
                assert_eq!(title.as_deref(), Some("Typed SQL"));
                assert_eq!(categories, vec![Category::Sql, Category::Typescript]);
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_cli_new_rejects_unknown_category() {
        let args = ["blogkit", "new", "post", "--category", "cobol"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_new_requires_category() {
        let args = ["blogkit", "new", "post"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_posts_command_parsing() {
        let args = ["blogkit", "posts", "--all", "--json"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Posts { all, json } => {
                assert!(all);
                assert!(json);
            }
            _ => panic!("Expected Posts command"),
        }
    }

    #[test]
    fn test_cli_theme_command_parsing() {
        let cli = Cli::parse_from(["blogkit", "theme", "--files"]);
        assert!(matches!(cli.command, Commands::Theme { files: true }));
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["blogkit", "-vvv", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_paths() {
        let args = [
            "blogkit",
            "--site",
            "demos/blog/site.toml",
            "--content",
            "demos/blog/src/content/blog",
            "posts",
        ];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.site, PathBuf::from("demos/blog/site.toml"));
        assert_eq!(cli.content, PathBuf::from("demos/blog/src/content/blog"));
    }
}
