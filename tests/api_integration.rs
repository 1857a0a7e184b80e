use tui_news_portal::api::{ApiService, Section};

#[tokio::test]
async fn test_integration_fetch_section_articles() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/articles?category=national")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 301, "title": "Senate passes water bill", "author": "R. Díaz",
                 "url": "https://www.portal.example/national/301", "published_at": "2026-10-17T09:00:00Z"},
                {"id": 302, "summary": "No headline yet", "publishedAt": "2026-10-16T18:45:00-03:00"}
            ]"#,
        )
        .create_async()
        .await;

    let service = ApiService::with_base_url(format!("{}/", server.url()));
    let articles = service
        .fetch_articles(Section::National)
        .await
        .expect("Failed to fetch articles");

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].author.as_deref(), Some("R. Díaz"));
    assert_eq!(articles[1].display_title(), "(untitled)");
}

#[tokio::test]
async fn test_integration_fetch_article_details() {
    let mut server = mockito::Server::new_async().await;
    let article_json = r#"{
        "id": 2001,
        "title": "Integration Test Story",
        "author": "tester",
        "category": "business",
        "content": "<p>Body</p>",
        "published_at": "2026-10-18T08:00:00Z"
    }"#;

    let _m = server
        .mock("GET", "/articles/2001")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(article_json)
        .create_async()
        .await;

    let service = ApiService::with_base_url(format!("{}/", server.url()));
    let article = service
        .fetch_article(2001)
        .await
        .expect("Failed to fetch article");

    assert_eq!(article.id, 2001);
    assert_eq!(article.title.unwrap(), "Integration Test Story");
    assert_eq!(article.category.as_deref(), Some("business"));
}

#[tokio::test]
async fn test_integration_invalidate_refetches() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/articles?category=opinion")
        .with_status(200)
        .with_body("[]")
        .expect(2)
        .create_async()
        .await;

    let service = ApiService::with_base_url(server.url());
    assert!(service.fetch_articles(Section::Opinion).await.unwrap().is_empty());
    assert!(service.fetch_articles(Section::Opinion).await.unwrap().is_empty());
    service.invalidate(Section::Opinion);
    assert!(service.fetch_articles(Section::Opinion).await.unwrap().is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_integration_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/articles?category=province")
        .with_status(200)
        .with_body("{not json")
        .create_async()
        .await;

    let service = ApiService::with_base_url(server.url());
    let err = service.fetch_articles(Section::Province).await.unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse JSON"));
}
