use marquee::connect::operations::search_movies;
use marquee::connect::types::SearchMoviesVariables;
use marquee::error::Result;
use marquee::pages::{AdvancedSearchPage, MovieCard, RowContent};

/// Run the advanced (full-text) search page
pub async fn run(config_path: &str, query: &str) -> Result<()> {
    let (_, dc) = super::connect(config_path)?;

    let mut page = AdvancedSearchPage::new();
    page.set_query(query);

    if !page.submit(&dc).await {
        tracing::warn!("Nothing to search for");
        return Ok(());
    }

    if let Some(message) = page.state().error() {
        println!("{}", message);
    }

    for row in page.rows() {
        println!("\n{}", row.title);
        println!("  {}", row.description);
        match row.content {
            RowContent::Loading { .. } => println!("  Loading..."),
            RowContent::Movies(cards) => super::print_cards(&cards),
            RowContent::Empty(message) => println!("  {}", message),
        }
    }

    Ok(())
}

/// Quick title search through SearchMovies
pub async fn lookup(config_path: &str, query: &str) -> Result<()> {
    let (_, dc) = super::connect(config_path)?;

    let vars = SearchMoviesVariables {
        query: query.to_string(),
    };
    let result = search_movies(&dc, &vars).await?;

    if result.data.movies.is_empty() {
        println!("No movies found.");
    } else {
        let cards: Vec<MovieCard> = result.data.movies.iter().map(MovieCard::from).collect();
        super::print_cards(&cards);
    }

    Ok(())
}
