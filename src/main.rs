mod api;
mod config;
mod error;
mod posts;
mod store;

#[cfg(test)]
mod testutil;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use api::HttpPostApi;
use posts::{CachedThenRefresh, Post, PostRepository};
use store::{MemoryStore, PostStore, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "postbox")]
#[command(about = "An offline-first client for JSONPlaceholder-style post APIs")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/postbox/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List posts, serving the cache when it is warm
  List,
  /// Show a single post
  Show { id: i64 },
  /// Publish a new post
  Create { title: String, body: String },
  /// Fetch the full collection into the cache
  Refresh,
  /// Drop every cached post
  Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let config = config::Config::load(args.config.as_deref())?;

  let store: Arc<dyn PostStore> = if config.cache.enabled {
    match &config.cache.path {
      Some(path) => Arc::new(SqliteStore::open_at(path)?),
      None => Arc::new(SqliteStore::open()?),
    }
  } else {
    Arc::new(MemoryStore::new())
  };

  let api = Arc::new(HttpPostApi::new(&config.api.url)?);
  let repo = Arc::new(PostRepository::new(api, store));

  match args.command {
    Command::List => {
      let posts = CachedThenRefresh::new(Arc::clone(&repo)).execute().await?;
      print_posts(&posts);
    }
    Command::Show { id } => {
      let post = repo.get_post(id).await?;
      print_post(&post);
    }
    Command::Create { title, body } => {
      let id = repo.create_post(&title, &body).await?;
      if id > 0 {
        println!("Created post {}", id);
      } else {
        println!("Post accepted but no id was assigned");
      }
    }
    Command::Refresh => {
      let posts = repo.refresh_posts().await?;
      println!("Fetched {} posts", posts.len());
    }
    Command::Clear => {
      repo.clear_cache().await?;
      println!("Cache cleared");
    }
  }

  Ok(())
}

fn print_posts(posts: &[Post]) {
  if posts.is_empty() {
    println!("No posts");
    return;
  }

  for post in posts {
    println!("{:>5}  {}", post.id, post.title);
  }
}

fn print_post(post: &Post) {
  println!("id:    {}", post.id);
  if let Some(user_id) = post.user_id {
    println!("owner: {}", user_id);
  }
  println!("title: {}", post.title);
  println!();
  println!("{}", post.body);
}
