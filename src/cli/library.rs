use marquee::connect::operations;
use marquee::connect::types::{
    AddReviewVariables, AddWatchVariables, DeleteWatchVariables, Movie, MoviePageVariables, Watch,
    WatchHistoryPageVariables,
};
use marquee::error::{MarqueeError, Result};
use marquee::pages::MovieCard;

pub async fn home(config_path: &str) -> Result<()> {
    let (_, dc) = super::connect(config_path)?;
    let data = operations::home_page(&dc).await?.data;

    print_section("Top rated", &data.top_rated);
    print_section("Recently released", &data.recently_released);
    Ok(())
}

pub async fn movie(config_path: &str, id: &str) -> Result<()> {
    let (_, dc) = super::connect(config_path)?;
    let vars = MoviePageVariables { id: id.to_string() };

    let Some(detail) = operations::movie_page(&dc, &vars).await?.data.movie else {
        println!("Movie {} not found", id);
        return Ok(());
    };

    let movie = &detail.movie;
    println!("{}", movie.title);
    if let Some(year) = movie.release_year() {
        println!("  Released: {}", year);
    }
    if let Some(ref genre) = movie.genre {
        println!("  Genre:    {}", genre);
    }
    if let Some(rating) = movie.rating {
        println!("  Rating:   {:.1}/10", rating);
    }
    if let Some(ref description) = movie.description {
        println!("\n{}", description);
    }

    println!("\nReviews ({})", detail.reviews.len());
    for review in &detail.reviews {
        let author = review
            .user
            .as_ref()
            .map(|u| u.display_name.clone().unwrap_or_else(|| u.username.clone()))
            .unwrap_or_else(|| "anonymous".to_string());
        println!("  {}/10 by {}", review.rating, author);
        if let Some(ref content) = review.content {
            println!("    {}", content);
        }
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("title", &movie.title)
        .append_pair("genre", movie.genre.as_deref().unwrap_or(""))
        .append_pair("description", movie.description.as_deref().unwrap_or(""))
        .finish();
    println!("\nFind showtimes: /find-theatres?{}", query);

    Ok(())
}

pub async fn history(config_path: &str, detailed: bool, limit: Option<i32>, offset: Option<i32>) -> Result<()> {
    let (_, dc) = super::connect(config_path)?;

    let watches = if detailed {
        operations::detailed_watch_history(&dc).await?.data.watches
    } else {
        let vars = WatchHistoryPageVariables { limit, offset };
        operations::watch_history_page(&dc, &vars).await?.data.watches
    };

    if watches.is_empty() {
        println!("No watches recorded yet.");
    }
    for watch in &watches {
        print_watch(watch);
    }
    Ok(())
}

pub async fn add_watch(config_path: &str, movie_id: String, date: Option<String>) -> Result<()> {
    if let Some(ref date) = date {
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| MarqueeError::InvalidArgument(format!("date '{}' must be YYYY-MM-DD", date)))?;
    }

    let (_, dc) = super::connect(config_path)?;
    let vars = AddWatchVariables {
        movie_id,
        watched_at: date,
    };

    let key = operations::add_watch(&dc, &vars).await?.data.watch_insert;
    tracing::info!("✅ Recorded watch {}", key.id.unwrap_or_default());
    Ok(())
}

pub async fn delete_watch(config_path: &str, id: String) -> Result<()> {
    let (_, dc) = super::connect(config_path)?;

    match operations::delete_watch(&dc, &DeleteWatchVariables { id: id.clone() }).await?.data.watch_delete {
        Some(_) => tracing::info!("🗑️  Deleted watch {}", id),
        None => tracing::warn!("Watch {} did not exist", id),
    }
    Ok(())
}

pub async fn review(config_path: &str, movie_id: String, rating: i32, content: Option<String>) -> Result<()> {
    if !(1..=10).contains(&rating) {
        return Err(MarqueeError::InvalidArgument(format!(
            "rating must be between 1 and 10, got {}",
            rating
        )));
    }

    let (_, dc) = super::connect(config_path)?;
    let vars = AddReviewVariables {
        movie_id,
        rating,
        content,
    };

    operations::add_review(&dc, &vars).await?;
    tracing::info!("✅ Review saved");
    Ok(())
}

fn print_section(title: &str, movies: &[Movie]) {
    println!("{}", title);
    if movies.is_empty() {
        println!("  (none)");
        return;
    }
    let cards: Vec<MovieCard> = movies.iter().map(MovieCard::from).collect();
    super::print_cards(&cards);
}

fn print_watch(watch: &Watch) {
    let date = watch.watched_at.as_deref().unwrap_or("----------");
    match watch.movie {
        Some(ref movie) => println!("  {}  {:<40} ({})", date, movie.title, watch.id),
        None => println!("  {}  {}", date, watch.id),
    }
}
