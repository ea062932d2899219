use mockito::Matcher;
use recipe_explorer::{fetch_recipe, search_recipes, ExplorerConfig, ExplorerError};

fn config_for(server: &mockito::ServerGuard) -> ExplorerConfig {
    let mut config = ExplorerConfig::default();
    config.api.base_url = server.url();
    config
}

#[tokio::test]
async fn test_search_recipes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "pie".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals": [{"idMeal": "52893", "strMeal": "Apple & Blackberry Crumble"}]}"#)
        .create_async()
        .await;

    let meals = search_recipes(&config_for(&server), " pie ").await.unwrap();

    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].name, "Apple & Blackberry Crumble");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_recipes_surfaces_failures() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let result = search_recipes(&config_for(&server), "pie").await;
    assert!(matches!(result, Err(ExplorerError::StatusError(502))));
}

#[tokio::test]
async fn test_fetch_recipe_prepares_detail() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52893".into()))
        .with_status(200)
        .with_body(
            r#"{"meals": [{
                "idMeal": "52893",
                "strMeal": "Apple & Blackberry Crumble",
                "strInstructions": "Heat oven.\r\n\r\nBake for 40 minutes.",
                "strIngredient1": "Plain Flour",
                "strMeasure1": "120g",
                "strIngredient2": " ",
                "strIngredient3": "Butter",
                "strMeasure3": null
            }]}"#,
        )
        .create_async()
        .await;

    let detail = fetch_recipe(&config_for(&server), "52893")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.record.id, "52893");
    let names: Vec<_> = detail.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Plain Flour", "Butter"]);
    assert_eq!(detail.steps, vec!["Heat oven.", "Bake for 40 minutes."]);
}

#[tokio::test]
async fn test_fetch_recipe_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let result = fetch_recipe(&config_for(&server), "1").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_fetch_recipe_blank_config_url_is_builder_error() {
    let mut config = ExplorerConfig::default();
    config.api.base_url = String::new();

    let result = fetch_recipe(&config, "52772").await;
    assert!(matches!(result, Err(ExplorerError::BuilderError(_))));
}
