use marquee::error::Result;
use marquee::pages::{BrowsePage, BrowseView};

pub struct BrowseArgs {
    pub title: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub min_rating: Option<u8>,
    pub genres: Vec<String>,
    pub url: Option<String>,
}

/// Apply filters through the browse page model and print the grid
pub async fn run(config_path: &str, args: BrowseArgs) -> Result<()> {
    let (_, dc) = super::connect(config_path)?;
    let mut page = BrowsePage::new();

    let location = match args.url {
        Some(url) => url,
        None => {
            let filters = page.pending_mut();
            if let Some(title) = args.title {
                filters.set_title(&title);
            }
            if let Some(year) = args.min_year {
                filters.set_min_year(&year)?;
            }
            if let Some(year) = args.max_year {
                filters.set_max_year(&year)?;
            }
            if let Some(stars) = args.min_rating {
                filters.toggle_rating(stars)?;
            }
            for genre in &args.genres {
                filters.set_genre(genre, true)?;
            }
            page.apply_filters()
        }
    };

    page.load(&dc, &location).await;

    println!("{}", page.location());
    match page.view() {
        BrowseView::Loading { .. } => println!("Loading..."),
        BrowseView::Grid(cards) => {
            println!("{} movie(s)", cards.len());
            super::print_cards(&cards);
        }
        BrowseView::Empty { message, reset_location } => {
            println!("{}", message);
            println!("Clear filters: {}", reset_location);
        }
        BrowseView::Error(message) => println!("{}", message),
    }

    Ok(())
}
