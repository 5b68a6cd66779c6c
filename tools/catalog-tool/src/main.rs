use std::error::Error;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use catalog_common::filtering::filter_by_category;
use catalog_common::highlight::render_marked;
use catalog_common::taxonomy::{default_taxonomy, Level, TaxonomyStore};
use catalog_common::types::{CategoryFilter, OsFilter, ScriptRecord, SearchResult, SortMode};
use clap::{Args, Parser, Subcommand};
use script_browser::api::provider::{CatalogProvider, StaticCatalog};
use script_browser::api::store::{JsonFileStore, KeyValueStore};
use script_browser::api::types::SurfaceConfig;
use script_browser::history::RecentSearchLog;
use script_browser::search::controller::SearchController;
use script_browser::state::{SurfacePhase, SurfaceStatus};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Catalog file: a list of `[[scripts]]` tables.
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    scripts: Vec<ScriptRecord>,
}

/// Optional tool configuration.
#[derive(Default, Deserialize)]
#[serde(default)]
struct ToolConfig {
    catalog: Option<PathBuf>,
    surface: Option<SurfaceConfig>,
}

#[derive(Parser)]
#[command(name = "catalog-tool")]
#[command(about = "Search and browse a script catalog from the terminal")]
struct Cli {
    /// Catalog TOML file (default: <config dir>/script-catalog/catalog.toml)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Tool config TOML file (default: <config dir>/script-catalog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Persisted state file (default: <config dir>/script-catalog/state.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank and highlight scripts matching a query
    Search(SearchArgs),
    /// Print the breadcrumb trail for a taxonomy path
    Breadcrumbs {
        path: String,
    },
    /// List a taxonomy node, its children and the scripts filed under it
    Browse {
        path: String,
    },
    /// Print the whole taxonomy tree
    Tree,
    /// Show recent searches
    Recent,
    /// Forget recent searches
    ClearRecent,
}

#[derive(Args)]
struct SearchArgs {
    query: String,
    /// all, linux, windows, macos or cross-platform
    #[arg(long, default_value = "all")]
    os: OsFilter,
    /// all or a category slug
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
    /// relevance, downloads, rating, newest or alphabetical
    #[arg(long, default_value = "relevance")]
    sort: SortMode,
    #[arg(long)]
    limit: Option<NonZeroUsize>,
    /// Narrow to a taxonomy path before matching, e.g. /categories/security
    #[arg(long)]
    scope: Option<String>,
    /// Do not record the query in recent searches
    #[arg(long)]
    no_history: bool,
}

fn default_path(file: &str) -> Result<PathBuf, Box<dyn Error>> {
    let mut p = dirs::config_dir().ok_or("could not find config directory")?;
    p.push("script-catalog");
    p.push(file);
    Ok(p)
}

fn read_config(path: Option<PathBuf>) -> Result<ToolConfig, Box<dyn Error>> {
    let explicit = path.is_some();
    let path = match path {
        Some(p) => p,
        None => default_path("config.toml")?,
    };
    match fs::read_to_string(&path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(_) if !explicit => Ok(ToolConfig::default()),
        Err(e) => Err(format!("cannot read config {}: {}", path.display(), e).into()),
    }
}

fn read_catalog(path: &Path) -> Result<Vec<ScriptRecord>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read catalog {}: {}", path.display(), e))?;
    let file: CatalogFile = toml::from_str(&text)?;
    tracing::info!("Loaded {} scripts from {}", file.scripts.len(), path.display());
    Ok(file.scripts)
}

fn print_result(result: &SearchResult) {
    let r = &result.record;
    println!(
        "{:>2}. {}  [{}]",
        result.rank,
        render_marked(&result.title, "[", "]"),
        r.id
    );
    println!(
        "    {} | {} | {:.1} stars | {} downloads",
        r.os.label(),
        r.category.label(),
        r.rating,
        r.downloads
    );
    if !r.description.is_empty() {
        println!("    {}", render_marked(&result.description, "[", "]"));
    }
    if !result.tags.is_empty() {
        let tags: Vec<String> = result
            .tags
            .iter()
            .map(|spans| render_marked(spans, "[", "]"))
            .collect();
        println!("    tags: {}", tags.join(", "));
    }
}

/// Poll once per debounce window until the surface has something to show.
async fn wait_until_presented<P, S>(controller: &SearchController<P, S>)
where
    P: CatalogProvider + 'static,
    S: KeyValueStore + 'static,
{
    let step = controller.surface().config().debounce();
    loop {
        tokio::time::sleep(step).await;
        if controller.surface().phase() == SurfacePhase::Presenting {
            break;
        }
    }
}

/// Apply command-line overrides and reject settings the surface would
/// refuse, so bad config files end in an error instead of a panic.
fn surface_config(mut config: SurfaceConfig, args: &SearchArgs) -> Result<SurfaceConfig, Box<dyn Error>> {
    if let Some(limit) = args.limit {
        config.result_cap = limit.get();
    }
    if config.result_cap == 0 {
        return Err("result_cap in the surface config must be at least 1".into());
    }
    if !config.allows_sort(args.sort) {
        return Err(format!("sort mode {} is not enabled in the surface config", args.sort.slug()).into());
    }
    Ok(config)
}

async fn search(
    args: SearchArgs,
    records: Vec<ScriptRecord>,
    config: SurfaceConfig,
    store: JsonFileStore,
) -> Result<(), Box<dyn Error>> {
    let config = surface_config(config, &args)?;

    let (mut controller, _selections) =
        SearchController::new(config, StaticCatalog::new(records), store);
    controller.set_os_filter(args.os);
    controller.set_category_filter(args.category);
    controller.set_sort(args.sort);
    controller.set_scope(args.scope.as_deref());
    controller.input(&args.query);
    wait_until_presented(&controller).await;

    {
        let surface = controller.surface();
        if let SurfaceStatus::Failed(e) = surface.status() {
            return Err(e.to_string().into());
        }
        if surface.results().is_empty() {
            println!("No scripts found.");
        }
        for result in surface.results() {
            print_result(result);
        }
    }

    if !args.no_history {
        controller.submit();
    }
    Ok(())
}

fn print_breadcrumbs(store: &TaxonomyStore, path: &str) {
    let trail: Vec<String> = store
        .breadcrumbs(path)
        .into_iter()
        .map(|b| format!("{} ({})", b.name, b.path))
        .collect();
    println!("{}", trail.join(" > "));
}

fn browse(store: &TaxonomyStore, path: &str, records: &[ScriptRecord]) {
    print_breadcrumbs(store, path);
    match store.resolve(path) {
        Some(node) => {
            if !node.children.is_empty() {
                let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
                println!("Subcategories: {}", names.join(", "));
            }
        }
        None => println!("(not in the taxonomy)"),
    }

    let filed = filter_by_category(records, path);
    println!("{} script(s):", filed.len());
    for r in filed {
        println!("  - {} [{}]", r.title, r.id);
    }
}

fn print_tree(store: &TaxonomyStore) {
    for node in store.walk() {
        let depth = match node.level {
            Level::Root => 0,
            Level::First => 1,
            Level::Second => 2,
            Level::Third => 3,
        };
        let icon = node.icon.as_deref().map(|i| format!(" :{i}:")).unwrap_or_default();
        println!("{}{}{}  {}", "  ".repeat(depth), node.name, icon, node.path);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = read_config(cli.config)?;
    let state_path = match cli.state {
        Some(p) => p,
        None => default_path("state.json")?,
    };
    let catalog_path = match cli.catalog.or(config.catalog) {
        Some(p) => p,
        None => default_path("catalog.toml")?,
    };
    let taxonomy = default_taxonomy();

    match cli.command {
        Commands::Search(args) => {
            let records = read_catalog(&catalog_path)?;
            let surface = config.surface.unwrap_or_else(SurfaceConfig::full_page);
            let store = JsonFileStore::open(state_path);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            tokio::task::LocalSet::new().block_on(&runtime, search(args, records, surface, store))
        }
        Commands::Breadcrumbs { path } => {
            print_breadcrumbs(&taxonomy, &path);
            Ok(())
        }
        Commands::Browse { path } => {
            let records = read_catalog(&catalog_path)?;
            browse(&taxonomy, &path, &records);
            Ok(())
        }
        Commands::Tree => {
            print_tree(&taxonomy);
            Ok(())
        }
        Commands::Recent => {
            let log = RecentSearchLog::load(&JsonFileStore::open(state_path));
            if log.is_empty() {
                println!("No recent searches.");
            }
            for term in log.terms() {
                println!("{term}");
            }
            Ok(())
        }
        Commands::ClearRecent => {
            let mut store = JsonFileStore::open(state_path);
            RecentSearchLog::new().persist(&mut store)?;
            println!("Recent searches cleared.");
            Ok(())
        }
    }
}
