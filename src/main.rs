use dotenv::dotenv;
use futures_util::future::join_all;
use gradwork_lists::api::{HttpListApi, ListApi, ListKind, PageRequest};
use gradwork_lists::cache::CachedListApi;
use gradwork_lists::config::ClientConfig;
use gradwork_lists::controller::{FetchOutcome, PagedFilteredListController};
use gradwork_lists::models::agencies::Agency;
use gradwork_lists::models::filters::FilterSet;
use gradwork_lists::models::freelancers::Freelancer;
use gradwork_lists::models::teams::Team;
use gradwork_lists::query;
use gradwork_lists::search::Searchable;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Usage: gradwork-lists [freelancers|agencies|teams] ["search=ann&country=FR&skills=rust"]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = ClientConfig::from_env()?;
    let mut args = std::env::args().skip(1);
    let kind: ListKind = args.next().as_deref().unwrap_or("freelancers").parse()?;
    let filters = args
        .next()
        .map(|q| FilterSet::from_query_string(&q))
        .unwrap_or_default();

    let http = HttpListApi::new(&config)?;
    tracing::info!("Listing from {} (locale {})", config.base_url, config.locale);

    // Totals for every tab, fetched side by side.
    let totals = join_all(ListKind::ALL.iter().map(|k| {
        let request = PageRequest::new(*k, 1, query::build_params(*k, &filters, &config.locale));
        let http = http.clone();
        async move {
            let page = ListApi::<serde_json::Value>::fetch_page(&http, &request).await;
            (*k, page.map(|p| p.meta.total_items))
        }
    }))
    .await;
    for (k, total) in totals {
        match total {
            Ok(total) => tracing::info!("{k}: {total} matching"),
            Err(e) => tracing::warn!("{k}: {e}"),
        }
    }

    match kind {
        ListKind::Freelancer => browse::<Freelancer>(kind, http, &config, filters).await,
        ListKind::Agency => browse::<Agency>(kind, http, &config, filters).await,
        ListKind::Team => browse::<Team>(kind, http, &config, filters).await,
    }

    Ok(())
}

/// Load page 1, then keep "scrolling" until the list is exhausted or fails.
async fn browse<T>(kind: ListKind, http: HttpListApi, config: &ClientConfig, filters: FilterSet)
where
    T: DeserializeOwned + Searchable + Clone + Send + Sync + 'static,
{
    let api: Arc<dyn ListApi<T>> = if config.cache_enabled() {
        Arc::new(CachedListApi::<T>::new(
            Arc::new(http),
            config.cache_ttl,
            config.cache_max_capacity,
        ))
    } else {
        Arc::new(http)
    };

    let controller = PagedFilteredListController::new(kind, api, config.locale.clone());
    let search = filters.search.clone().unwrap_or_default();

    let mut outcome = controller.on_filter_set_changed(filters).await;
    while matches!(outcome, FetchOutcome::Applied { .. }) {
        outcome = controller.on_sentinel_intersecting().await;
    }

    let state = controller.state();
    if let Some(error) = &state.error {
        tracing::error!("Stopped after page {}: {error}", state.current_page);
    }

    for item in state.visible_items(&search) {
        println!("{}", item.search_text());
    }
    tracing::info!(
        "{} {kind} loaded over {} page(s), server total {}",
        state.items.len(),
        state.current_page,
        state.total_items.unwrap_or_default()
    );
}
