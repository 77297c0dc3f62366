use clap::{Parser, Subcommand, ValueEnum};
use folio::config;
use folio::source::ContentSource;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Content resolver for static photo/article portfolios")]
#[command(long_about = "\
Content resolver for static photo/article portfolios

Your filesystem is the data source. Image files become photo cards, sidecar
markdown curates their metadata, posts are markdown with frontmatter, and a
flat JSON catalog lists videos. A remote CMS can answer the same queries
instead (data_source = \"remote\" in config.toml).

Content structure:

  content-root/
  ├── config.toml                  # Site config (optional)
  ├── public/photos/               # Scanned images (.jpg/.jpeg)
  │   ├── tokyo.jpg                # One photo card per file
  │   └── osaka.jpg
  ├── content/photos/              # Photo sidecars, matched by slug
  │   └── tokyo.md                 # ---\\n caption: ... tags: [...] ---
  ├── content/posts/               # Articles
  │   └── first-post.md            # frontmatter + markdown body
  └── content/videos.json          # [{\"type\": \"youtube\", ...}, ...]

Metadata resolution (field-level, override wins when present):
  Photo:  sidecar frontmatter → EXIF/derived (title from filename)
  EXIF:   extraction only — never sidecar-supplied

Run 'folio gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the photo collection as JSON
    Photos,
    /// List the article collection as JSON
    Articles,
    /// List the video collection as JSON
    Videos,
    /// Look up one record by slug
    Get {
        collection: Collection,
        slug: String,
    },
    /// Resolve every collection and report counts without printing records
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Photos,
    Articles,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.root)?;
    let source = ContentSource::new(&config, &cli.root);

    match cli.command {
        Command::Photos => print_json(&source.list_photos()?)?,
        Command::Articles => print_json(&source.list_articles()?)?,
        Command::Videos => print_json(&source.list_videos()?)?,
        Command::Get { collection, slug } => match collection {
            Collection::Photos => print_lookup(source.get_photo(&slug)?, &slug)?,
            Collection::Articles => print_lookup(source.get_article(&slug)?, &slug)?,
        },
        Command::Check => {
            let photos = source.list_photos()?;
            let articles = source.list_articles()?;
            let videos = source.list_videos()?;
            println!(
                "==> {} photos, {} articles, {} videos",
                photos.len(),
                articles.len(),
                videos.len()
            );
            println!("==> Content is valid");
        }
        Command::GenConfig => unreachable!("handled before config load"),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lookup<T: Serialize>(
    record: Option<T>,
    slug: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match record {
        Some(record) => print_json(&record),
        None => {
            eprintln!("not found: {slug}");
            std::process::exit(1);
        }
    }
}
