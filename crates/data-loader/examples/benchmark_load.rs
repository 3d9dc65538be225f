use data_loader::{Catalog, JsonCatalog};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/movies.json"));

    println!("Loading movie catalog from {}...\n", path.display());

    let start = Instant::now();
    let catalog = JsonCatalog::open(&path).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let snapshot = catalog.snapshot().expect("Failed to take snapshot");
    let ratings: usize = snapshot.iter().map(|m| m.ratings.len()).sum();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", snapshot.len());
    println!("Ratings: {}", ratings);

    let start = Instant::now();
    let refreshed = catalog.refresh().expect("Failed to refresh catalog");
    println!("\nRefresh of {} movies took {:?}", refreshed, start.elapsed());
    println!(
        "Performance: {:.0} movies/second",
        snapshot.len() as f64 / elapsed.as_secs_f64()
    );
}
