use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{sample, DuplicatePolicy, RatingMatrix, UserId};
use recommender::{Neighbor, RecommendError, Recommender, ScoredMovie};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Movie recommendations from user-based collaborative filtering
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(
    about = "A simple movie recommendation engine using user-based collaborative filtering",
    long_about = None
)]
struct Cli {
    /// Path to the ratings CSV file (user,movie,rating)
    #[arg(short, long, default_value = "ratings.csv", global = true)]
    file: PathBuf,

    /// Fail on duplicate (user, movie) ratings instead of keeping the last one
    #[arg(long, global = true)]
    reject_duplicates: bool,

    /// Do not create a sample ratings file when the file is missing
    #[arg(long, global = true)]
    no_sample: bool,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// The user ID to get recommendations for
        #[arg(long)]
        user: UserId,

        /// Number of recommendations to generate
        #[arg(long, default_value = "2")]
        num_recs: usize,

        /// Show the score behind each recommendation
        #[arg(long)]
        explain: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the users in the dataset
    Users,

    /// Show the users whose ratings correlate positively with a user
    Similar {
        #[arg(long)]
        user: UserId,
    },

    /// Recommend for every user in the dataset
    Batch {
        #[arg(long, default_value = "2")]
        num_recs: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON shape of one user's recommendations
#[derive(Serialize)]
struct RecommendationReport<'a> {
    user: &'a str,
    recommendations: &'a [ScoredMovie],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing on stderr so stdout stays machine-readable
    let default_level = default_log_level(cli.verbose);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    ensure_dataset(&cli.file, cli.no_sample)?;

    let policy = if cli.reject_duplicates {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::LastWriteWins
    };

    let start = Instant::now();
    let matrix = RatingMatrix::load_from_file(&cli.file, policy)
        .with_context(|| format!("Failed to load ratings from {}", cli.file.display()))?;
    info!("Loaded dataset in {:?}", start.elapsed());

    let recommender = Recommender::new(Arc::new(matrix));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user,
            num_recs,
            explain,
            format,
        } => handle_recommend(&recommender, &user, num_recs, explain, format)?,
        Commands::Users => handle_users(&recommender),
        Commands::Similar { user } => handle_similar(&recommender, &user)?,
        Commands::Batch { num_recs, format } => handle_batch(&recommender, num_recs, format)?,
    }

    Ok(())
}

/// Log filter used when RUST_LOG is unset: warn, -v info, -vv debug
fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Create the sample dataset if `path` does not exist
fn ensure_dataset(path: &Path, no_sample: bool) -> Result<()> {
    if path.exists() || no_sample {
        return Ok(());
    }

    println!(
        "'{}' not found. Creating a sample file for demonstration.",
        path.display()
    );
    sample::write_sample(path)
        .with_context(|| format!("Failed to write sample file {}", path.display()))?;
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &Recommender,
    user: &str,
    num_recs: usize,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let recommendations = recommender
        .recommend_scored(user, num_recs)
        .map_err(|err| unknown_user(err, recommender))?;

    match format {
        OutputFormat::Text => {
            print!(
                "{}",
                render_recommendations(user, num_recs, &recommendations, explain)
            );
        }
        OutputFormat::Json => {
            let report = RecommendationReport {
                user,
                recommendations: &recommendations,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

/// Handle the 'users' command
fn handle_users(recommender: &Recommender) {
    let matrix = recommender.matrix();
    let (users, movies, ratings) = matrix.counts();

    println!(
        "{}",
        format!("{users} users, {movies} movies, {ratings} ratings").bold().blue()
    );
    for user in matrix.users() {
        println!(
            "{}{} ({} ratings)",
            "• ".green(),
            user,
            matrix.ratings_by_user(user).len()
        );
    }
}

/// Handle the 'similar' command
fn handle_similar(recommender: &Recommender, user: &str) -> Result<()> {
    let neighbors = recommender
        .neighbors(user)
        .map_err(|err| unknown_user(err, recommender))?;

    print!("{}", render_neighbors(user, &neighbors));
    Ok(())
}

/// Handle the 'batch' command
fn handle_batch(recommender: &Recommender, num_recs: usize, format: OutputFormat) -> Result<()> {
    let start = Instant::now();
    let all = recommender.recommend_all(num_recs);
    info!("Computed recommendations for {} users in {:?}", all.len(), start.elapsed());

    match format {
        OutputFormat::Text => {
            for (user, recommendations) in &all {
                let titles = recommendations
                    .iter()
                    .map(|r| r.movie_id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                if titles.is_empty() {
                    println!("{}: {}", user.bold(), "(none)".dimmed());
                } else {
                    println!("{}: {}", user.bold(), titles);
                }
            }
        }
        OutputFormat::Json => {
            let reports: Vec<RecommendationReport> = all
                .iter()
                .map(|(user, recommendations)| RecommendationReport {
                    user,
                    recommendations,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

/// Turn an unknown-user error into a message listing who is available
fn unknown_user(err: RecommendError, recommender: &Recommender) -> anyhow::Error {
    let available = recommender
        .matrix()
        .users()
        .into_iter()
        .map(|u| u.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    anyhow!("{err}\nAvailable users are: {available}")
}

/// Format recommendations the way the 'recommend' command prints them
fn render_recommendations(
    user: &str,
    num_recs: usize,
    recommendations: &[ScoredMovie],
    explain: bool,
) -> String {
    let mut out = format!("\n--- Generating recommendations for {user} ---\n\n");

    if recommendations.is_empty() {
        out.push_str(&format!(
            "Could not generate new recommendations for {user}.\n"
        ));
        out.push_str(
            "This could be because they have already seen all movies liked by similar users.\n",
        );
        return out;
    }

    out.push_str(&format!(
        "{}\n",
        format!("Top {num_recs} recommendations for {user}:").bold().blue()
    ));
    for (i, rec) in recommendations.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", (i + 1).to_string().green(), rec.movie_id));
        if explain {
            let plural = if rec.supporters == 1 { "" } else { "s" };
            out.push_str(&format!(
                "   Score: {:.3} from {} similar user{}\n",
                rec.score, rec.supporters, plural
            ));
        }
    }
    out
}

/// Format a neighbor list for the 'similar' command
fn render_neighbors(user: &str, neighbors: &[Neighbor]) -> String {
    if neighbors.is_empty() {
        return format!("No users with positive similarity to {user}.\n");
    }

    let mut out = format!("{}\n", format!("Users similar to {user}:").bold().blue());
    for neighbor in neighbors {
        out.push_str(&format!(
            "{}{}: {:.3} ({} shared movies)\n",
            "• ".green(),
            neighbor.user_id,
            neighbor.similarity,
            neighbor.co_rated
        ));
    }
    out
}
