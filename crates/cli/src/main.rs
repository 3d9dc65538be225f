use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, JsonCatalog, MovieRecord};
use pipeline::{Category, MovieView, Order, QueryError};
use server::{MovieService, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// reel-query - Movie catalog query tool
#[derive(Parser)]
#[command(name = "reel-query")]
#[command(about = "Rank, filter and page through a JSON movie catalog", long_about = None)]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(short, long, env = "REEL_CATALOG", default_value = server::config::DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Log filter (e.g. "debug", "pipeline=trace"); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a categorized query and print one page of results
    List {
        /// Strategy: actor, popularity, similarity, duration, year (anything else lists)
        #[arg(long)]
        categorize_by: Option<String>,

        /// Actor name, required by the actor strategy
        #[arg(long)]
        actor: Option<String>,

        /// Reference title, required by the similarity strategy
        #[arg(long)]
        title: Option<String>,

        /// Minimum similarity score
        #[arg(long)]
        threshold: Option<f64>,

        /// 0-based page number
        #[arg(long, default_value = "0")]
        page: usize,

        /// Page size
        #[arg(long)]
        take: Option<usize>,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "asc")]
        order: Order,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Look up a movie by its exact title
    Find {
        #[arg(long)]
        title: String,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Run concurrent queries to measure latency
    Bench {
        /// Number of queries to run
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Maximum number of queries in flight
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so --json output stays clean
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).context("Invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    let service = MovieService::from_config(&ServiceConfig::new(&cli.catalog))?;
    info!(
        "Loaded {} movies from {} in {:?}",
        service.catalog().len(),
        cli.catalog.display(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List {
            categorize_by,
            actor,
            title,
            threshold,
            page,
            take,
            order,
            json,
        } => {
            let mut query = service
                .query()
                .with_category(Category::from_selector(categorize_by.as_deref()))
                .with_page(page)
                .with_order(order);
            query.actor = actor;
            query.title = title;
            query.threshold = threshold;
            if let Some(take) = take {
                query = query.with_take(take);
            }
            handle_list(&service, query, json).await?
        }
        Commands::Find { title, json } => handle_find(&service, &title, json).await?,
        Commands::Bench {
            requests,
            concurrent,
        } => handle_bench(service, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'list' command
async fn handle_list(
    service: &MovieService<JsonCatalog>,
    query: pipeline::QuerySpec,
    json: bool,
) -> Result<()> {
    let category = query.categorize_by;
    let page = match service.find_page(query).await {
        Ok(page) => page,
        Err(err) => {
            if let Some(QueryError::NotFound { title }) = err.downcast_ref::<QueryError>() {
                println!("{} No movie titled '{}' in the catalog", "✗".red(), title);
                return Ok(());
            }
            return Err(err);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{} results (page {} of {}, {} total):",
            category,
            page.page,
            page.pages(),
            page.total
        )
        .bold()
        .blue()
    );
    let offset = page.page.saturating_mul(page.take);
    for (i, view) in page.items.iter().enumerate() {
        print_view(offset + i + 1, view);
    }
    if page.items.is_empty() {
        println!("  (no movies on this page)");
    }
    Ok(())
}

/// Handle the 'find' command
async fn handle_find(service: &MovieService<JsonCatalog>, title: &str, json: bool) -> Result<()> {
    let Some(movie) = service.find_one(title).await? else {
        println!("{} not found: '{}'", "✗".red(), title);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&movie)?);
    } else {
        print_movie(&movie);
    }
    Ok(())
}

/// Handle the 'bench' command
///
/// Alternates popularity and similarity queries against random reference
/// titles and reports latency percentiles.
async fn handle_bench(
    service: MovieService<JsonCatalog>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let titles: Vec<String> = service
        .catalog()
        .snapshot()?
        .iter()
        .map(|movie| movie.title.clone())
        .collect();
    if titles.is_empty() {
        bail!("Catalog is empty, nothing to benchmark");
    }

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let bench_start = Instant::now();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for i in 0..requests {
        let service = service.clone();
        let permits = Arc::clone(&permits);
        let query = if i % 2 == 0 {
            service
                .query()
                .with_category(Category::Popularity)
                .with_order(Order::Desc)
        } else {
            let title = &titles[rand::random::<u32>() as usize % titles.len()];
            service
                .query()
                .with_category(Category::Similarity)
                .with_title(title.as_str())
                .with_order(Order::Desc)
        };

        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            service.find_all(query).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await.context("Benchmark task panicked")??;
        timings.push(elapsed);
    }
    let wall_time = bench_start.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Value at `q` in an ascending, non-empty slice
fn percentile(sorted: &[Duration], q: f64) -> Duration {
    let idx = ((sorted.len() as f64 * q) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Print one ranked result with the field its strategy derived
fn print_view(rank: usize, view: &MovieView) {
    let detail = match view {
        MovieView::Full(movie) => format!("{} {}", movie.release_date, movie.duration),
        MovieView::Actor(v) => v.actors.join(", "),
        MovieView::Popularity(v) => format!("popularity {:.2}", v.popularity),
        MovieView::Similarity(v) => format!("similarity {:.3}", v.similarity),
        MovieView::Duration(v) => v.duration.clone(),
        MovieView::Year(v) => v.year.to_string(),
    };
    println!(
        "{}. {} [{}] - {}",
        rank.to_string().green(),
        view.title().bold(),
        view.genres().join(", "),
        detail
    );
}

/// Print the full record returned by 'find'
fn print_movie(movie: &MovieRecord) {
    println!("{}", format!("{} ({})", movie.title, movie.year).bold().blue());
    println!("{}Id: {}", "• ".green(), movie.id);
    println!("{}Released: {}", "• ".green(), movie.release_date);
    println!("{}Duration: {}", "• ".green(), movie.duration);
    println!("{}Rated: {}", "• ".green(), movie.content_rating);
    println!("{}Genres: {}", "• ".cyan(), movie.genres.join(", "));
    println!("{}Cast: {}", "• ".cyan(), movie.actors.join(", "));
    println!(
        "{}Ratings: {} ({} viewers)",
        "• ".cyan(),
        movie.ratings.len(),
        movie.viewer_count
    );
    if !movie.storyline.is_empty() {
        println!();
        println!("{}", movie.storyline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_list_flags() {
        let cli = Cli::try_parse_from([
            "reel-query",
            "--catalog",
            "movies.json",
            "list",
            "--categorize-by",
            "similarity",
            "--title",
            "Heat",
            "--threshold",
            "0.5",
            "--order",
            "DESC",
            "--take",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.catalog, PathBuf::from("movies.json"));
        match cli.command {
            Commands::List {
                categorize_by,
                title,
                threshold,
                order,
                take,
                page,
                ..
            } => {
                assert_eq!(categorize_by.as_deref(), Some("similarity"));
                assert_eq!(title.as_deref(), Some("Heat"));
                assert_eq!(threshold, Some(0.5));
                assert_eq!(order, Order::Desc);
                assert_eq!(take, Some(5));
                assert_eq!(page, 0);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_order() {
        assert!(Cli::try_parse_from(["reel-query", "list", "--order", "sideways"]).is_err());
    }

    #[test]
    fn test_percentile() {
        let timings: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();
        assert_eq!(percentile(&timings, 0.50), Duration::from_millis(51));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(100));
        assert_eq!(percentile(&timings[..1], 0.95), Duration::from_millis(1));
    }
}
