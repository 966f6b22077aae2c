//! Lookup demo: search a live environment from the command line.
//!
//! ```text
//! LOOKUP_ENVIRONMENT_URL=https://contoso.crm.dynamics.com \
//! LOOKUP_TOKEN=... \
//! RUST_LOG=account_lookup=debug \
//! cargo run -p account-lookup --example lookup_demo -- "contoso ltd" [lookup.toml]
//! ```
//!
//! Without a config file the demo searches the `name` column of `accounts`.

use std::sync::Arc;

use account_lookup::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("account_lookup=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "contoso".to_string());
    let mut config = match args.next() {
        Some(path) => LookupConfig::load(path)?,
        None => LookupConfig {
            filter_column: "name".into(),
            identifier_column: "accountid".into(),
            entity_set: "accounts".into(),
            ..Default::default()
        },
    };
    if let Ok(url) = std::env::var("LOOKUP_ENVIRONMENT_URL") {
        config.environment_url = url;
    }

    let mut builder = WebApiClient::builder(&config.environment_url);
    if let Ok(token) = std::env::var("LOOKUP_TOKEN") {
        builder = builder.bearer_auth(token);
    }
    let client = builder.build()?;

    let mut field = LookupField::new(config, Arc::new(client));
    field.resolved.connect(|resolution| {
        tracing::info!(is_duplicate = resolution.is_duplicate, text = %resolution.text, "resolved");
    });

    field.focus_in();
    field.edit_text(text).await;
    for candidate in field.candidates() {
        println!("{:<40} {}", candidate.name, candidate.id);
    }
    println!("{}", field.status_message());

    field.focus_out();
    println!("{}", field.status_message());
    Ok(())
}
