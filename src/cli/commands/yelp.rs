use super::location::print_location;
use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_yelp(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let location = state.resolver.resolve_location(query).await?;
    print_location(&location);

    let businesses = state
        .resolver
        .resolve_businesses(location.coordinates())
        .await?;

    if businesses.is_empty() {
        println!("No businesses found near {}", location.formatted_query);
        return Ok(());
    }

    for business in &businesses {
        let rating = business
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        let price = business.price.as_deref().unwrap_or("-");

        println!("• {} ({rating} stars, {price})", business.name);
        if let Some(url) = &business.url {
            println!("  {url}");
        }
    }

    Ok(())
}
