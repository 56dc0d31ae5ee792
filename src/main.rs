use resto_client::config::AppConfig;
use resto_client::{client_from_config, dangling_invalidations, Registry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress HTTP client debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .parse_default_env()
        .init();

    println!("Resto client");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: api={} keep_unused_for={}s",
        config.api.base_url, config.cache.keep_unused_for_secs
    );

    let registry = Registry::standard();
    let dangling = dangling_invalidations(registry);
    if dangling.is_empty() {
        println!(
            "{} endpoints registered ({} reads, {} writes)",
            registry.len(),
            registry.queries().count(),
            registry.mutations().count()
        );
    } else {
        for entry in &dangling {
            log::warn!("{}", entry);
        }
    }

    let client = client_from_config(&config)?;
    let layout = client.layout();
    println!("Role: {}", client.session().role_name());
    println!("Layout: {} (home {})", layout, layout.home_path());
    for section in layout.sections() {
        println!("  {:?}: {}", section, section.endpoints().join(", "));
    }

    if client.is_authenticated() {
        match client.query("get_profile", serde_json::Value::Null).await {
            Ok(profile) => println!("Profile: {}", serde_json::to_string_pretty(&profile)?),
            Err(err) => {
                log::warn!("Could not load profile: {}", err);
                println!("{}", err.display_message());
            }
        }
    } else {
        println!("Not logged in");
    }

    Ok(())
}
