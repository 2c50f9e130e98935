use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_movies(config: Config, query: &str) -> anyhow::Result<()> {
    println!("Searching movies for: {query}");

    let state = SharedState::new(config).await?;
    let movies = state.resolver.resolve_movies(query).await?;

    if movies.is_empty() {
        println!("No movies found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Results:");
    println!("{:-<60}", "");

    for movie in movies.iter().take(10) {
        let released = movie.released_on.as_deref().unwrap_or("unknown");
        println!("• {} ({released})", movie.title);

        if let (Some(average), Some(total)) = (movie.average_votes, movie.total_votes) {
            println!("  Rating: {average:.1} from {total} votes");
        }
        if let Some(image_url) = &movie.image_url {
            println!("  Poster: {image_url}");
        }
        println!();
    }

    Ok(())
}
