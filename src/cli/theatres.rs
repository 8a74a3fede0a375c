use marquee::ai::GenerativeModel;
use marquee::config;
use marquee::error::Result;
use marquee::pages::{FindTheatresPage, Showings, TheatresView};

pub struct TheatresArgs {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub date: Option<String>,
}

/// Drive the find-theatres page once and print the results
pub async fn run(config_path: &str, args: TheatresArgs) -> Result<()> {
    let config = config::load_config(config_path)?;
    let model = GenerativeModel::from_config(&config);

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("title", &args.title)
        .append_pair("genre", &args.genre)
        .append_pair("description", &args.description)
        .finish();
    let mut page = FindTheatresPage::from_query_string(&query);

    if let Some(date) = args.date {
        page.set_date(&date);
    }
    match (args.location, args.lat, args.lon) {
        (Some(location), _, _) => page.set_location(&location),
        (None, Some(lat), Some(lon)) => {
            page.begin_locate();
            page.on_geolocation(Ok((lat, lon)));
        }
        _ => {}
    }

    tracing::info!("🎬 Scanning theatres in {} for {}...", page.query().location, page.query().date);

    if !page.submit(&model).await {
        tracing::warn!("A location and a date are required");
        return Ok(());
    }

    match page.view() {
        TheatresView::Idle { hint } => println!("{}", hint),
        TheatresView::Loading { location } => println!("Scanning theatres in {}...", location),
        TheatresView::Error(message) => println!("{}", message),
        TheatresView::Results(cards) => {
            for card in cards {
                println!("\n{} [{}]", card.title, card.badge.label());
                if let Some(description) = card.description {
                    println!("  {}", description);
                }
                match card.showings {
                    Showings::Theatres(theatres) => {
                        for theatre in theatres {
                            println!("  📍 {}: {}", theatre.name, theatre.showtimes.join(", "));
                        }
                    }
                    Showings::NoShowtimes(message) => println!("  {}", message),
                }
            }
        }
    }

    let sources = page.sources();
    if !sources.is_empty() {
        println!("\nSources:");
        for source in sources {
            println!("  {} <{}>", source.title, source.uri);
        }
    }

    Ok(())
}
