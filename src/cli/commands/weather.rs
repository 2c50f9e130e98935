use super::location::print_location;
use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_weather(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let location = state.resolver.resolve_location(query).await?;
    print_location(&location);

    let Some(location_id) = location.id else {
        anyhow::bail!(
            "'{}' could not be stored, so its forecast cannot be cached",
            location.search_query
        );
    };

    let days = state
        .resolver
        .resolve_forecast(location_id, location.coordinates())
        .await?;

    if days.is_empty() {
        println!("No forecast available.");
        return Ok(());
    }

    println!("Forecast:");
    for day in &days {
        println!("  {:<16} {}", day.time, day.forecast);
    }

    Ok(())
}
