//! Command pipelines: resolver → fetcher/discovery → report.

use std::path::{Path, PathBuf};

use anyhow::Context;

use asinscan_core::{
    marketplace::discovery_domain, parse_list, union, AppConfig, Asin, CompetitorRecord,
    MarketplaceTable, OfferRecord, ProductRecord, SearchSeedMap,
};
use asinscan_discovery::{DiscoveryLoop, DiscoverySession, LoopTimings};
use asinscan_report::{
    write_competitors_workbook, write_products_workbook, Table,
};
use asinscan_scraper::{FetchOutcome, ProductFetcher, RequestClient};

pub(crate) struct DiscoveryOutcome {
    pub path: PathBuf,
    pub records: Vec<CompetitorRecord>,
    pub seeds: Vec<Asin>,
}

/// Fetches products (and their offers) for every ASIN in `raw_asins` and
/// writes the products workbook. `seed_map`, when present, adds the
/// `Search_ASIN` annotation column to both sheets.
pub(crate) async fn run_product_scrape(
    config: &AppConfig,
    raw_asins: &str,
    marketplace_alias: Option<&str>,
    seed_map: Option<&SearchSeedMap>,
    out_dir: &Path,
    name: &str,
) -> anyhow::Result<PathBuf> {
    let asins = parse_list(raw_asins);
    anyhow::ensure!(!asins.is_empty(), "no valid ASINs in input");

    scrape_products_to_workbook(config, &asins, marketplace_alias, seed_map, out_dir, name).await
}

async fn scrape_products_to_workbook(
    config: &AppConfig,
    asins: &[Asin],
    marketplace_alias: Option<&str>,
    seed_map: Option<&SearchSeedMap>,
    out_dir: &Path,
    name: &str,
) -> anyhow::Result<PathBuf> {
    let targets = resolve_targets(marketplace_alias);
    let client = RequestClient::new(
        config.request_timeout_secs,
        config.request_delay_ms.clone(),
    )?;
    let fetcher = ProductFetcher::new(
        client,
        targets,
        config.max_retries,
        config.retry_delay_secs,
    );

    let (products, offers) = fetch_all(&fetcher, asins).await;

    let mut products_table = Table::products(&products);
    let mut sellers_table = Table::other_sellers(&offers);
    if let Some(map) = seed_map {
        products_table.annotate_search_seed(map);
        sellers_table.annotate_search_seed(map);
    }

    let path = workbook_path(out_dir, name)?;
    write_products_workbook(&path, &products_table, &sellers_table)?;
    Ok(path)
}

/// Sequential per-ASIN fetch loop. Every ASIN produces a product row — found
/// or synthetic — so the run always terminates with a complete workbook.
async fn fetch_all(
    fetcher: &ProductFetcher,
    asins: &[Asin],
) -> (Vec<ProductRecord>, Vec<OfferRecord>) {
    let mut products = Vec::new();
    let mut all_offers = Vec::new();
    let mut not_found = 0usize;

    for (index, asin) in asins.iter().enumerate() {
        tracing::info!(asin = %asin, position = index + 1, total = asins.len(), "fetching product");
        match fetcher.fetch(asin).await {
            FetchOutcome::Found { product, offers } => {
                products.push(product);
                all_offers.extend(offers);
            }
            FetchOutcome::NotFound(record) => {
                not_found += 1;
                products.push(record);
            }
        }
    }

    if not_found > 0 {
        tracing::warn!(not_found, total = asins.len(), "some ASINs were not found anywhere");
    }
    (products, all_offers)
}

/// Runs the browser discovery session over the seeds and writes the
/// competitors workbook (header-only when nothing was harvested).
pub(crate) async fn run_competitor_discovery(
    config: &AppConfig,
    raw_asins: &str,
    marketplace_alias: &str,
    out_dir: &Path,
    name: &str,
) -> anyhow::Result<DiscoveryOutcome> {
    let seeds = parse_list(raw_asins);
    anyhow::ensure!(!seeds.is_empty(), "no valid seed ASINs in input");

    let domain = discovery_domain(marketplace_alias);
    anyhow::ensure!(!domain.is_empty(), "a marketplace is required for discovery");

    let session = DiscoverySession::connect(config, &domain)
        .await
        .context("discovery session could not be established")?;

    let timings = LoopTimings::with_result_timeout(config.discovery_result_timeout_secs);
    let mut driver = DiscoveryLoop::new(session, domain, timings);
    let records = driver.run(&seeds).await;

    if let Err(err) = driver.into_page().close().await {
        tracing::warn!(error = %err, "browser session close failed");
    }

    let path = workbook_path(out_dir, name)?;
    write_competitors_workbook(&path, &Table::competitors(&records))?;

    Ok(DiscoveryOutcome {
        path,
        records,
        seeds,
    })
}

/// Discovery first, then the product pass over seeds ∪ discovered ASINs.
/// The seed map is fully built before any product fetch begins, so both
/// product sheets can be annotated with the originating seed.
pub(crate) async fn run_full(
    config: &AppConfig,
    raw_asins: &str,
    marketplace_alias: &str,
    out_dir: &Path,
    products_name: &str,
    competitors_name: &str,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let discovery =
        run_competitor_discovery(config, raw_asins, marketplace_alias, out_dir, competitors_name)
            .await?;

    let discovered: Vec<Asin> = discovery
        .records
        .iter()
        .filter_map(|r| Asin::parse(&r.competitor_asin))
        .collect();
    let merged = union(&discovery.seeds, &discovered);
    anyhow::ensure!(!merged.is_empty(), "nothing to fetch after discovery");

    let seed_map = SearchSeedMap::build(&discovery.seeds, &discovery.records);
    tracing::info!(
        seeds = discovery.seeds.len(),
        discovered = discovered.len(),
        union = merged.len(),
        "product pass over seed∪competitor union"
    );

    let products_path = scrape_products_to_workbook(
        config,
        &merged,
        Some(marketplace_alias),
        Some(&seed_map),
        out_dir,
        products_name,
    )
    .await?;

    Ok((discovery.path, products_path))
}

/// Ad-report flow: extract identifiers from the report, then reuse the
/// products pipeline.
pub(crate) async fn run_ad_report(
    config: &AppConfig,
    report: &Path,
    marketplace_alias: Option<&str>,
    out_dir: &Path,
    name: &str,
) -> anyhow::Result<PathBuf> {
    let asins = asinscan_report::extract_ad_report_asins(report)
        .with_context(|| format!("could not read ad report {}", report.display()))?;
    anyhow::ensure!(
        !asins.is_empty(),
        "no valid ASINs found in the ad report sheets"
    );
    tracing::info!(count = asins.len(), "ASINs extracted from ad report");

    scrape_products_to_workbook(config, &asins, marketplace_alias, None, out_dir, name).await
}

/// One marketplace when the alias resolves, otherwise the whole table in
/// configured order (with a warning for a non-empty unrecognized alias).
fn resolve_targets(alias: Option<&str>) -> MarketplaceTable {
    let table = MarketplaceTable::builtin();
    match alias {
        Some(alias) if !alias.trim().is_empty() => match table.resolve(alias) {
            Some(marketplace) => {
                tracing::info!(marketplace = %marketplace.name, "using selected marketplace");
                MarketplaceTable::from_targets(vec![marketplace.clone()])
            }
            None => {
                tracing::warn!(alias, "unrecognized marketplace — trying all in default order");
                table
            }
        },
        _ => table,
    }
}

fn workbook_path(out_dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create output directory {}", out_dir.display()))?;
    Ok(out_dir.join(format!("{name}.xlsx")))
}
