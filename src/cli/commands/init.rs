use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!("Set API keys in config.toml or in a .env file, then run: cityscope serve");
    } else {
        println!("config.toml already exists; leaving it untouched.");
    }
    Ok(())
}
