use clap::{Parser, Subcommand};
use marquee::error::Result;

mod cli;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(version = "0.1.0")]
#[command(about = "Browse, search and find showtimes for movies via Firebase Data Connect", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(long, global = true, default_value = "marquee.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an example configuration
    Init {
        /// Output config file path (if not specified, outputs to stdout)
        #[arg(long)]
        output: Option<String>,
    },

    /// Show the home page listings
    Home,

    /// Browse the catalogue with filters
    Browse {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        min_year: Option<String>,

        #[arg(long)]
        max_year: Option<String>,

        /// Minimum rating in stars (1-5)
        #[arg(long)]
        min_rating: Option<u8>,

        /// Genre to include (repeatable)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Browse location to open instead, e.g. "/browse?genres=Drama"
        #[arg(long, conflicts_with_all = ["title", "min_year", "max_year", "min_rating", "genres"])]
        url: Option<String>,
    },

    /// Full-text search (plain, phrase and query syntax)
    Search {
        query: String,
    },

    /// Quick title search
    Lookup {
        query: String,
    },

    /// Show one movie with its reviews
    Movie {
        id: String,
    },

    /// Show the signed-in user's watch history
    History {
        /// Include movie details
        #[arg(long)]
        detailed: bool,

        #[arg(long, conflicts_with = "detailed")]
        limit: Option<i32>,

        #[arg(long, conflicts_with = "detailed")]
        offset: Option<i32>,
    },

    /// Record or remove watches
    Watch {
        #[command(subcommand)]
        action: WatchAction,
    },

    /// Rate and review a movie
    Review {
        movie_id: String,

        /// Rating on the 10-point scale
        #[arg(long)]
        rating: i32,

        #[arg(long)]
        content: Option<String>,
    },

    /// Sync the signed-in user's profile (runs once per state file)
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Find theatres and showtimes for a movie near a location
    Theatres {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        genre: String,

        #[arg(long, default_value = "")]
        description: String,

        /// City, zip or address
        #[arg(long, required_unless_present = "lat")]
        location: Option<String>,

        #[arg(long, requires = "lon", conflicts_with = "location", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Execute any connector operation with JSON variables
    Exec {
        /// Operation name, e.g. MoviePage
        operation: String,

        /// Variables as a JSON object
        #[arg(long)]
        vars: Option<String>,
    },
}

#[derive(Subcommand)]
enum WatchAction {
    /// Record a watch
    Add {
        movie_id: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a watch by id
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    let args = Cli::parse();
    let config = args.config;

    match args.command {
        Commands::Init { output } => {
            cli::init::run(output)?;
        }
        Commands::Home => {
            cli::library::home(&config).await?;
        }
        Commands::Browse { title, min_year, max_year, min_rating, genres, url } => {
            let args = cli::browse::BrowseArgs { title, min_year, max_year, min_rating, genres, url };
            cli::browse::run(&config, args).await?;
        }
        Commands::Search { query } => {
            cli::search::run(&config, &query).await?;
        }
        Commands::Lookup { query } => {
            cli::search::lookup(&config, &query).await?;
        }
        Commands::Movie { id } => {
            cli::library::movie(&config, &id).await?;
        }
        Commands::History { detailed, limit, offset } => {
            cli::library::history(&config, detailed, limit, offset).await?;
        }
        Commands::Watch { action: WatchAction::Add { movie_id, date } } => {
            cli::library::add_watch(&config, movie_id, date).await?;
        }
        Commands::Watch { action: WatchAction::Delete { id } } => {
            cli::library::delete_watch(&config, id).await?;
        }
        Commands::Review { movie_id, rating, content } => {
            cli::library::review(&config, movie_id, rating, content).await?;
        }
        Commands::Login { email, display_name, photo_url } => {
            cli::account::run(&config, email, display_name, photo_url).await?;
        }
        Commands::Theatres { title, genre, description, location, lat, lon, date } => {
            let args = cli::theatres::TheatresArgs { title, genre, description, location, lat, lon, date };
            cli::theatres::run(&config, args).await?;
        }
        Commands::Exec { operation, vars } => {
            cli::exec::run(&config, &operation, vars.as_deref()).await?;
        }
    }

    Ok(())
}
