use data_loader::{DuplicatePolicy, RatingMatrix};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("ratings.csv"));

    println!("Loading ratings from {}...\n", path.display());

    let start = Instant::now();
    let matrix = RatingMatrix::load_from_file(&path, DuplicatePolicy::LastWriteWins)
        .expect("Failed to load ratings");
    let elapsed = start.elapsed();

    let (users, movies, ratings) = matrix.counts();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Movies: {}", movies);
    println!("Ratings: {}", ratings);
    println!("Density: {:.1}%",
             100.0 * ratings as f64 / (users * movies).max(1) as f64);
}
