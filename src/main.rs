use log::debug;
use recipe_explorer::{
    summarize, DetailLoader, DetailPhase, ExplorerConfig, MealDbGateway, RecipeGateway, Route,
    SearchCoordinator,
};
use std::env;
use std::sync::Arc;

const USAGE: &str = "Usage:\n  recipe-explorer search <query>\n  recipe-explorer open <path>   (e.g. /recipe/52772)";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, rest) = args.split_first().ok_or(USAGE)?;

    let config = ExplorerConfig::load()?;
    debug!("{:#?}", config);
    let gateway: Arc<dyn RecipeGateway> = Arc::new(MealDbGateway::from_config(&config)?);

    match command.as_str() {
        "search" => search(gateway, &config, &rest.join(" ")).await,
        "open" => open(gateway, rest.first().map(String::as_str).unwrap_or("")).await,
        _ => Err(USAGE.into()),
    }
}

async fn search(
    gateway: Arc<dyn RecipeGateway>,
    config: &ExplorerConfig,
    query: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if query.trim().is_empty() {
        return Err("Please provide a search query".into());
    }

    let coordinator = SearchCoordinator::with_debounce(gateway, config.search.debounce());
    let mut updates = coordinator.subscribe();
    coordinator.on_query_changed(query);

    let state = updates
        .wait_for(|s| s.has_searched && !s.is_loading)
        .await?
        .clone();

    if state.meals.is_empty() {
        println!("No recipes found for '{}'", query.trim());
        return Ok(());
    }

    for meal in &state.meals {
        println!("{}  {} ({}, {})", meal.id, meal.name, meal.category, meal.area);
        let summary = summarize(meal);
        if !summary.is_empty() {
            println!("        {}", summary);
        }
    }
    Ok(())
}

async fn open(
    gateway: Arc<dyn RecipeGateway>,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let route = Route::resolve(path);
    let id = match &route {
        Route::RecipeDetail { id } => id.clone(),
        Route::Home => {
            println!("{}\n\n{}", route.title(), USAGE);
            return Ok(());
        }
    };

    let mut loader = DetailLoader::new(gateway);
    let mut updates = loader.subscribe();
    loader.load(&id);
    let state = updates.wait_for(|s| !s.is_loading()).await?.clone();

    let detail = match state.phase {
        DetailPhase::Loaded(detail) => detail,
        _ => {
            println!("Recipe not found");
            return Ok(());
        }
    };

    let record = &detail.record;
    println!("# {}", record.name);
    println!("{} | {}", record.category, record.area);
    let tags = record.tag_list();
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }
    println!("Image: {}", record.thumbnail_or_placeholder());
    if let Some(youtube) = &record.youtube {
        println!("Video: {}", youtube);
    }

    println!("\n## Ingredients");
    for ingredient in &detail.ingredients {
        if ingredient.measure.is_empty() {
            println!("- {}", ingredient.name);
        } else {
            println!("- {} {}", ingredient.measure, ingredient.name);
        }
    }

    println!("\n## Instructions");
    for (n, step) in detail.steps.iter().enumerate() {
        println!("{}. {}", n + 1, step);
    }

    if let Some(source) = &record.source {
        println!("\nSource: {}", source);
    }
    Ok(())
}
