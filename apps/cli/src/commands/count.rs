//! `sonde count`

use anyhow::Context;
use sonde_search::{ProxyCountRequest, SearchClient};

use crate::cli::CountArgs;
use crate::config::AppConfig;

/// Run one blocking count and print the result to stdout.
pub fn run(args: CountArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(url) = args.url.clone() {
        config.search.url = url;
    }
    if let Some(level) = args.profiling {
        config.profiling.level = level;
    }

    let client = SearchClient::http(&config.search, config.profiling.into_profiling())
        .context("failed to create search client")?;
    let request = build_request(&client, &args)?;

    tracing::debug!(request = %request, "counting");
    let response = request.get()?;

    if response.is_partial() {
        tracing::warn!(
            failed = response.shards.failed,
            total = response.shards.total,
            "count is partial, some shards failed"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.count);
    }
    Ok(())
}

fn build_request(client: &SearchClient, args: &CountArgs) -> anyhow::Result<ProxyCountRequest> {
    let mut request = client
        .prepare_count()
        .collections(args.collections.iter().cloned())
        .types(args.types.iter().cloned());

    if let Some(query) = &args.query {
        let query = serde_json::from_str(query).context("--query is not valid JSON")?;
        request = request.query(query);
    }
    if let Some(min_score) = args.min_score {
        request = request.min_score(min_score);
    }
    if let Some(routing) = &args.routing {
        request = request.routing(routing.clone());
    }
    if let Some(preference) = &args.preference {
        request = request.preference(preference.clone());
    }
    Ok(request)
}
