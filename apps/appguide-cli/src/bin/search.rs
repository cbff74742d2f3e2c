use std::env;
use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use appguide_core::config::{Config, Settings};
use appguide_core::traits::{ModuleSource, SelectionHandler};
use appguide_core::tree::{build_category_tree, CategoryNode};
use appguide_core::types::{Category, ContentId, Module};
use appguide_hybrid::{AggregatorOptions, DismissSignal, SearchAggregator, SearchSnapshot};
use appguide_remote::{ApiClient, ModuleStore};
use appguide_text::snippet;

const HIGHLIGHT_ON: &str = "\x1b[1;33m";
const HIGHLIGHT_OFF: &str = "\x1b[0m";

/// Prints what the host page would navigate to.
struct PrintSelection;

impl SelectionHandler for PrintSelection {
    fn on_select_category(&self, category: &Category, module: &Arc<Module>) {
        println!("📂 Open category \"{}\" (id={}) in module \"{}\"", category.display_title(), category.id, module.name);
    }

    fn on_select_content(&self, category: Option<&Category>, module: Option<&Arc<Module>>, content_id: ContentId) {
        let category = category.map(|c| c.display_title()).unwrap_or("-");
        let module = module.map(|m| m.name.as_str()).unwrap_or("-");
        println!("📄 Open content id={}  category={}  module={}", content_id, category, module);
    }
}

fn apply_args(settings: &mut Settings) {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--base-url" | "-u" => {
                if let Some(url) = args.get(i + 1) {
                    settings.api.base_url = url.clone();
                    i += 1;
                } else {
                    eprintln!("Warning: --base-url requires a value.");
                }
            }
            "--debounce-ms" => {
                match args.get(i + 1).and_then(|v| v.parse::<u64>().ok()) {
                    Some(ms) if ms > 0 => {
                        settings.search.debounce_ms = ms;
                        i += 1;
                    }
                    _ => eprintln!("Warning: --debounce-ms requires a positive number."),
                }
            }
            other => eprintln!("Warning: ignoring argument {}", other),
        }
        i += 1;
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let mut settings = config.settings()?;
    apply_args(&mut settings);
    settings.validate()?;
    init_tracing(&settings);

    let client = ApiClient::new(&settings.api)?;
    let store = Arc::new(ModuleStore::new(client.clone()));
    let aggregator = SearchAggregator::new(
        Arc::clone(&store),
        client,
        Arc::new(PrintSelection),
        AggregatorOptions::from(&settings.search),
    );

    println!("🔍 App Guide Search");
    println!("===================");
    println!("API: {}", settings.api.base_url);
    aggregator.on_focus().await;
    let module_count = store.snapshot().len();
    tracing::info!(module_count, base_url = %settings.api.base_url, "search ready");
    println!("📚 {} modules loaded", module_count);
    println!("Type /help for commands.\n");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    let mut last = SearchSnapshot::default();
    loop {
        stdout.write_all(b"search> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else { break };
        let input = line.trim_end_matches(['\r', '\n']);

        match input.trim() {
            "/help" | "/h" => show_help(),
            "/quit" | "/q" | "quit" | "exit" => {
                println!("👋 Goodbye!");
                break;
            }
            "/modules" | "/m" => {
                if let Err(e) = store.reload().await {
                    println!("❌ Could not reload modules: {}", e);
                }
                show_modules(&store.snapshot());
            }
            "/close" => {
                aggregator.dismiss(DismissSignal::Escape);
                println!("(dropdown closed; query kept: \"{}\")", aggregator.snapshot().query);
            }
            "/clear" => {
                aggregator.on_query_change("");
                last = aggregator.snapshot();
            }
            cmd if cmd.starts_with("/open") => {
                let results = last.results();
                match cmd.trim_start_matches("/open").trim().parse::<usize>() {
                    Ok(n) if n >= 1 && n <= results.len() => {
                        aggregator.select(&results[n - 1]);
                        last = aggregator.snapshot();
                    }
                    _ => println!("❌ Usage: /open <1..{}>", results.len()),
                }
            }
            _ => {
                aggregator.on_focus().await;
                aggregator.on_query_change(input);
                last = aggregator.settled().await;
                show_results(&last);
            }
        }
        println!();
    }
    Ok(())
}

fn show_results(snap: &SearchSnapshot) {
    if snap.is_empty() {
        println!("🔍 No results for: \"{}\"", snap.query.trim());
        return;
    }
    let mut n = 0;
    if !snap.categories.is_empty() {
        println!("Categories ({})", snap.categories.len());
        for hit in &snap.categories {
            n += 1;
            println!("  {}. {}  [{}]", n, hit.category.display_title(), hit.module.name);
            println!("     {}", hit.path);
        }
    }
    if !snap.contents.is_empty() {
        println!("Contents ({})", snap.contents.len());
        for hit in &snap.contents {
            n += 1;
            println!("  {}. {}", n, hit.content.title);
            if !hit.path.is_empty() {
                println!("     {}", hit.path);
            }
            let excerpt = snippet(&hit.content.plain_content, &snap.query);
            if !excerpt.is_empty() {
                println!("     {}", excerpt.to_plain(HIGHLIGHT_ON, HIGHLIGHT_OFF));
            }
        }
    }
    println!("Use /open <n> to open a result.");
}

fn show_modules(modules: &[Arc<Module>]) {
    println!("📚 All Modules");
    println!("==============");
    for m in modules {
        println!("■ {}", m.name);
        if let Some(desc) = m.description.as_deref().filter(|d| !d.is_empty()) {
            println!("  {}", desc);
        }
        let roots = build_category_tree(&m.categories);
        if roots.is_empty() {
            println!("  No top-level categories");
        }
        for node in &roots {
            print_node(node, 1);
        }
    }
}

fn print_node(node: &CategoryNode, depth: usize) {
    let marker = if node.is_leaf() { "-" } else { "▸" };
    println!("{}{} {}", "  ".repeat(depth), marker, node.category.display_title());
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn show_help() {
    println!("🔍 Search Help");
    println!("==============");
    println!("  <text>         Search category titles and document contents");
    println!("  /open <n>      Open the n-th result of the last search");
    println!("  /modules, /m   Reload and list all modules");
    println!("  /close         Close the dropdown, keep the query");
    println!("  /clear         Clear the query and results");
    println!("  /help, /h      Show this help");
    println!("  /quit, /q      Exit");
    println!();
    println!("Options: --base-url <url>, --debounce-ms <ms>");
    println!("Config:  config.toml, config.<env>.toml, APP_API__BASE_URL, APP_API__TOKEN");
}
