use crate::config::Config;
use crate::models::Location;
use crate::state::SharedState;

pub async fn cmd_location(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let location = state.resolver.resolve_location(query).await?;
    print_location(&location);

    Ok(())
}

pub(super) fn print_location(location: &Location) {
    println!("{}", location.formatted_query);
    println!("{:-<60}", "");
    println!("  Query:       {}", location.search_query);
    println!(
        "  Coordinates: {:.6}, {:.6}",
        location.latitude, location.longitude
    );
    match location.id {
        Some(id) => println!("  Stored as:   #{id}"),
        None => println!("  Stored as:   (not stored)"),
    }
    println!();
}
