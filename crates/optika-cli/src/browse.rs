//! `browse` and `listings` command handlers.

use anyhow::Context;
use clap::Args;
use optika_catalog::{CatalogClient, ListingSnapshot, ListingStatus, ListingView, LoadMoreResult};
use optika_core::{AppConfig, FilterSpec, ListingPreset, SortKey};

#[derive(Debug, Args)]
pub(crate) struct BrowseArgs {
    /// Listing preset name from the listings file
    #[arg(long)]
    pub listing: String,
    /// Only show clearance stock
    #[arg(long)]
    pub stock: bool,
    /// Exact brand, compared without case or accents
    #[arg(long)]
    pub brand: Option<String>,
    /// Free-text search over title, brand, and color
    #[arg(long)]
    pub search: Option<String>,
    /// Ordering, e.g. `newest`, `price-asc`, `brand-desc`
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Press "load more" this many times before printing
    #[arg(long, default_value_t = 0)]
    pub more: u32,
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Applies command-line refinements on top of a preset's starting filter.
pub(crate) fn build_spec(preset: &ListingPreset, args: &BrowseArgs) -> FilterSpec {
    let mut spec = preset.initial_spec();
    spec.stock_only |= args.stock;
    spec.brand_exact.clone_from(&args.brand);
    if let Some(search) = &args.search {
        spec.search_query.clone_from(search);
    }
    if let Some(sort) = args.sort {
        spec.sort_key = sort;
    }
    spec
}

/// Aggregates the requested listing and prints the visible window.
///
/// # Errors
///
/// Returns an error if the listings file cannot be loaded, the preset does
/// not exist, the client cannot be built, or the first page fails to load.
pub(crate) async fn run_browse(config: &AppConfig, args: &BrowseArgs) -> anyhow::Result<()> {
    let listings = optika_core::load_listings(&config.listings_path)
        .with_context(|| format!("loading {}", config.listings_path.display()))?;
    let preset = listings
        .find(&args.listing)
        .ok_or_else(|| anyhow::anyhow!("listing '{}' not found", args.listing))?;
    let spec = build_spec(preset, args);

    let client = CatalogClient::new(
        &config.api_base,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("building catalog client")?;
    let mut view = ListingView::from_config(client, config);

    tracing::info!(listing = %preset.name, sort = %spec.sort_key, "browsing listing");
    view.on_filter_change(spec).await;

    for _ in 0..args.more {
        if view.on_load_more().await == LoadMoreResult::Exhausted {
            break;
        }
    }

    let snapshot = view.snapshot();
    if let ListingStatus::Error(message) = snapshot.status {
        anyhow::bail!("{message}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }
    Ok(())
}

fn print_snapshot(snapshot: &ListingSnapshot<'_>) {
    for (n, item) in snapshot.visible_items.iter().enumerate() {
        let title = item.title.as_deref().unwrap_or("(untitled)");
        let brand = item.brand.as_deref().unwrap_or("-");
        let price = item.effective_price();
        if price.is_finite() {
            println!("{:>3}. {title} | {brand} | {price:.2}", n + 1);
        } else {
            println!("{:>3}. {title} | {brand} | -", n + 1);
        }
    }
    println!(
        "showing {} item(s){}",
        snapshot.visible_items.len(),
        if snapshot.has_more { ", more available" } else { "" }
    );
}

/// Prints every configured listing preset.
///
/// # Errors
///
/// Returns an error if the listings file cannot be read or fails validation.
pub(crate) fn run_listings(config: &AppConfig) -> anyhow::Result<()> {
    let listings = optika_core::load_listings(&config.listings_path)
        .with_context(|| format!("loading {}", config.listings_path.display()))?;
    for preset in &listings.listings {
        let aliases = if preset.category_aliases.is_empty() {
            "all categories".to_string()
        } else {
            preset.category_aliases.join(", ")
        };
        println!(
            "{:<18} sort={:<11} stock={:<5} {aliases}",
            preset.name,
            preset.default_sort.to_string(),
            preset.stock_only
        );
        if let Some(notes) = &preset.notes {
            println!("{:<18} {notes}", "");
        }
    }
    Ok(())
}
