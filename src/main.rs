use anyhow::Result;
use clap::Parser;
use greeting_card::config::CliConfig;
use greeting_card::content::{write_template, DEFAULT_PACK_ID};
use greeting_card::{CardInterface, Config, ContentLoader, Screen, VERSION};
use std::path::PathBuf;
use tracing::{info, warn, error};

#[derive(Parser)]
#[command(name = "greeting-card")]
#[command(about = "An interactive birthday greeting card for the terminal")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content pack to show
    #[arg(long)]
    content: Option<String>,

    /// Color theme (default, dark, pastel)
    #[arg(short, long)]
    theme: Option<String>,

    /// Screen to open directly; locked screens fall back to the gate
    #[arg(short, long)]
    screen: Option<String>,

    /// Write a content pack template to this path and exit
    #[arg(long)]
    write_template: Option<PathBuf>,

    /// List the available content packs and exit
    #[arg(long)]
    list_packs: bool,

    /// Write the session's event log as JSON to this path on exit
    #[arg(long)]
    event_log: Option<PathBuf>,
}

/// Unknown screen names land on the gate, like any other locked screen.
fn start_screen(requested: Option<&str>) -> Screen {
    match requested.map(str::parse::<Screen>) {
        Some(Ok(screen)) => screen,
        Some(Err(e)) => {
            warn!("{}, starting at the gate", e);
            Screen::Gate
        }
        None => Screen::Gate,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(CliConfig {
        debug: cli.debug,
        theme: cli.theme.clone(),
        ..Default::default()
    });

    tracing_subscriber::fmt()
        .with_env_filter(format!("greeting_card={},warn", config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Greeting Card v{}", VERSION);

    if let Some(path) = cli.write_template {
        write_template(&path).await?;
        println!("Template written to {}", path.display());
        return Ok(());
    }

    let loader = ContentLoader::new(config.get_content_dir());

    if cli.list_packs {
        for pack in loader.list_available_packs().await? {
            println!("{:<16} {}", pack.id, pack.display_name());
        }
        return Ok(());
    }

    let start = start_screen(cli.screen.as_deref());

    let pack_id = cli.content.as_deref().unwrap_or(DEFAULT_PACK_ID);
    info!("Loading content pack: {}", pack_id);
    let pack = loader.load_pack(pack_id).await?;

    let mut interface = CardInterface::new(config, pack).await?;

    let outcome = interface.run(start).await;

    if let Some(path) = cli.event_log {
        let json = interface.engine().event_log().export_events()?;
        tokio::fs::write(&path, json).await?;
        info!("Event log written to {:?}", path);
    }

    if let Err(e) = outcome {
        error!("Card error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Card session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(&["greeting-card", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(cli.screen.is_none());
    }

    #[test]
    fn test_cli_deep_link() {
        let cli = Cli::try_parse_from(&["greeting-card", "--screen", "/puzzle", "--theme", "pastel"]).unwrap();
        assert_eq!(start_screen(cli.screen.as_deref()), Screen::Puzzle);
        assert_eq!(cli.theme.as_deref(), Some("pastel"));
    }

    #[test]
    fn test_unknown_screen_starts_at_gate() {
        assert_eq!(start_screen(Some("thankyou")), Screen::Gate);
        assert_eq!(start_screen(None), Screen::Gate);
        assert_eq!(start_screen(Some("Farewell")), Screen::Farewell);
    }

    #[test]
    fn test_cli_list_packs_and_event_log() {
        let cli = Cli::try_parse_from(&["greeting-card", "--list-packs", "--event-log", "events.json"]).unwrap();
        assert!(cli.list_packs);
        assert_eq!(cli.event_log, Some(PathBuf::from("events.json")));
    }
}
