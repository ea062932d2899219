use mockito::Matcher;
use recipe_explorer::{
    summarize, DetailLoader, MealDbGateway, RecipeGateway, Route, SearchCoordinator,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const SEARCH_RESPONSE: &str = r#"
{
    "meals": [
        {
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strInstructions": "Cook chicken.",
            "strIngredient1": "Chicken",
            "strMeasure1": "2 pieces",
            "strIngredient2": "",
            "strMeasure2": "1/4 cup",
            "strIngredient3": "Soy Sauce",
            "strMeasure3": null
        },
        {
            "idMeal": "52795",
            "strMeal": "Chicken Handi",
            "strCategory": "Chicken",
            "strArea": "Indian",
            "strInstructions": "Take a large pot.\r\nAdd the chicken.",
            "strIngredient1": "Chicken",
            "strIngredient2": "Onion",
            "strIngredient3": "Tomatoes",
            "strIngredient4": "Garlic"
        }
    ]
}
"#;

const DEBOUNCE: Duration = Duration::from_millis(20);
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

fn gateway_for(server: &mockito::ServerGuard) -> Arc<dyn RecipeGateway> {
    Arc::new(
        MealDbGateway::builder()
            .base_url(server.url())
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn test_search_through_http_gateway() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "chicken".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SEARCH_RESPONSE)
        .expect(1)
        .create_async()
        .await;

    let coordinator = SearchCoordinator::with_debounce(gateway_for(&server), DEBOUNCE);
    let mut updates = coordinator.subscribe();

    coordinator.on_query_changed("c");
    coordinator.on_query_changed("chi");
    coordinator.on_query_changed(" chicken ");

    let state = timeout(
        SETTLE_TIMEOUT,
        updates.wait_for(|s| s.has_searched && !s.is_loading),
    )
    .await
    .expect("search did not settle")
    .unwrap()
    .clone();

    assert_eq!(state.meals.len(), 2);
    assert_eq!(summarize(&state.meals[0]), "Chicken, Soy Sauce");
    assert_eq!(summarize(&state.meals[1]), "Chicken, Onion, Tomatoes");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_shows_empty_results() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let coordinator = SearchCoordinator::with_debounce(gateway_for(&server), DEBOUNCE);
    let mut updates = coordinator.subscribe();
    coordinator.on_query_changed("chicken");

    let state = timeout(
        SETTLE_TIMEOUT,
        updates.wait_for(|s| s.has_searched && !s.is_loading),
    )
    .await
    .expect("search did not settle")
    .unwrap()
    .clone();

    assert!(state.meals.is_empty());
    assert!(!state.is_loading);
    assert!(state.has_searched);
}

#[tokio::test]
async fn test_open_detail_route() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52795".into()))
        .with_status(200)
        .with_body(r#"{"meals": [{"idMeal": "52795", "strMeal": "Chicken Handi", "strInstructions": "Take a large pot.\r\nAdd the chicken.", "strIngredient1": "Chicken", "strMeasure1": "1.2 kg"}]}"#)
        .create_async()
        .await;

    let id = match Route::resolve("/recipe/52795") {
        Route::RecipeDetail { id } => id,
        Route::Home => panic!("Expected detail route"),
    };

    let mut loader = DetailLoader::new(gateway_for(&server));
    let mut updates = loader.subscribe();
    loader.load(&id);

    let state = timeout(SETTLE_TIMEOUT, updates.wait_for(|s| !s.is_loading()))
        .await
        .expect("detail did not settle")
        .unwrap()
        .clone();

    assert!(!state.has_error());
    let detail = state.detail().unwrap();
    assert_eq!(detail.record.name, "Chicken Handi");
    assert_eq!(detail.ingredients[0].measure, "1.2 kg");
    assert_eq!(detail.steps, vec!["Take a large pot.", "Add the chicken."]);
}

#[tokio::test]
async fn test_open_unknown_recipe_fails() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let mut loader = DetailLoader::new(gateway_for(&server));
    let mut updates = loader.subscribe();
    loader.load("1");

    let state = timeout(SETTLE_TIMEOUT, updates.wait_for(|s| !s.is_loading()))
        .await
        .expect("detail did not settle")
        .unwrap()
        .clone();

    assert!(state.has_error());
    assert!(state.detail().is_none());
}
