//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing pages and drive the full
//! traversal over HTTP end-to-end.

use std::io::Write;
use view_tally::aggregate::AggregationStrategy;
use view_tally::config::{load_config, Config};
use view_tally::crawler::crawl;
use view_tally::{RenderError, TallyError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, strategy: AggregationStrategy) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.user = "someone".to_string();
    config.crawler.layout_probe_timeout = 200;
    config.crawler.next_page_probe_timeout = 200;
    config.crawler.ready_timeout = 1_000;
    config.crawler.request_timeout = 5_000;
    config.crawler.min_page_delay = 0;
    config.crawler.max_page_delay = 10; // Very short for testing
    config.crawler.poll_interval = 20;
    config.crawler.aggregation = strategy;
    config
}

fn day_grouped_page(next_href: Option<&str>) -> String {
    let next = next_href
        .map(|href| format!(r#"<div id="nav_next_page"><a href="{}">下一页</a></div>"#, href))
        .unwrap_or_default();
    format!(
        r#"<html><head><title>someone - 博客园</title></head><body>
        <div class="forFlow">
            <div class="day">
                <div class="dayTitle"><a href="/someone/archive/2024/03/05.html">2024年3月5日</a></div>
                <div class="postTitle">
                    <a class="postTitle2 vertical-middle" href="/someone/p/1.html"><span> Pinning in Rust </span></a>
                </div>
                <div class="postCon"><div class="c_b_p_desc">摘要: ...</div></div>
                <div class="clear"></div>
                <div class="postDesc">posted @ 2024-03-05 10:30 someone
                    <span data-post-id="1" class="post-view-count">阅读(1234)</span>
                    <span data-post-id="1" class="post-comment-count">评论(2)</span>
                </div>
            </div>
            <div class="day">
                <div class="dayTitle"><a href="/someone/archive/2024/02/01.html">2024年2月1日</a></div>
                <div class="postTitle">
                    <a class="postTitle2 vertical-middle" href="/someone/p/2.html"><span>Async traits</span></a>
                </div>
                <div class="postDesc">posted @ 2024-02-01 08:00 someone
                    <span data-post-id="2" class="post-view-count">阅读(66)</span>
                </div>
            </div>
            {}
        </div>
        </body></html>"#,
        next
    )
}

fn post_grouped_page(pager: &str) -> String {
    format!(
        r#"<html><body>
        <div id="homepage_top_pager" class="topicListFooter"><div class="pager">{}</div></div>
        <div class="post">
            <h2><a class="postTitle2" href="/someone/p/3.html"><span>Old post</span></a></h2>
            <div class="postbody">...</div>
            <p class="postfoot">posted @ 2020-06-01 12:00 someone
                <span class="post-view-count">阅读(100)</span>
            </p>
        </div>
        </body></html>"#,
        pager
    )
}

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_pages() {
    for strategy in [AggregationStrategy::Channel, AggregationStrategy::Atomic] {
        let mock_server = MockServer::start().await;

        mount_page(
            &mock_server,
            "/someone/",
            200,
            day_grouped_page(Some("/someone/default.html?page=2")),
        )
        .await;
        mount_page(
            &mock_server,
            "/someone/default.html",
            200,
            post_grouped_page(
                r#"<a href="/someone/">上一页</a><a href="/someone/">1</a><span class="current">2</span>"#,
            ),
        )
        .await;

        let config = create_test_config(&mock_server.uri(), strategy);
        let report = crawl(config, true).await.expect("Crawl failed");

        assert_eq!(report.user, "someone");
        assert_eq!(report.pages_visited, 2);
        assert_eq!(report.posts, 3);
        assert_eq!(report.total_views, 1234 + 66 + 100);
        assert_eq!(report.records[0].title, "Pinning in Rust");
        assert_eq!(report.records[2].title, "Old post");

        let requests = mock_server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 2, "strategy {}", strategy);
    }
}

#[tokio::test]
async fn test_single_page_listing_without_next_anchor() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/someone/", 200, day_grouped_page(None)).await;

    let config = create_test_config(&mock_server.uri(), AggregationStrategy::Channel);
    let report = crawl(config, false).await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.total_views, 1300);
    assert!(report.records.is_empty());
}

#[tokio::test]
async fn test_three_pages_following_pager() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/someone/",
        200,
        day_grouped_page(Some("/someone/default.html?page=2")),
    )
    .await;
    mount_page(
        &mock_server,
        "/someone/default.html",
        200,
        post_grouped_page(r#"<a href="/someone/">上一页</a><a href="/someone/last.html">下一页</a>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/someone/last.html",
        200,
        post_grouped_page(r#"<a href="/someone/default.html?page=2">上一页</a>"#),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), AggregationStrategy::Atomic);
    let report = crawl(config, false).await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.total_views, 1300 + 100 + 100);
}

#[tokio::test]
async fn test_server_error_fails_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/someone/",
        200,
        day_grouped_page(Some("/someone/default.html?page=2")),
    )
    .await;
    mount_page(&mock_server, "/someone/default.html", 500, String::new()).await;

    let config = create_test_config(&mock_server.uri(), AggregationStrategy::Channel);
    let err = crawl(config, false).await.unwrap_err();

    assert!(
        matches!(err, TallyError::Render(RenderError::HttpStatus { status: 500, .. })),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_unknown_layout_fails_crawl() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/someone/",
        200,
        r#"<html><body><div class="entry"><p>not a listing</p></div></body></html>"#.to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), AggregationStrategy::Channel);
    let err = crawl(config, false).await.unwrap_err();

    assert!(matches!(err, TallyError::NoPostsFound { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_crawl_from_config_file() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/from-file/", 200, day_grouped_page(None)).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[site]
base-url = "{}"
user = "from-file"

[crawler]
layout-probe-timeout = 200
next-page-probe-timeout = 200
min-page-delay = 0
max-page-delay = 0
poll-interval = 20
aggregation = "atomic"
"#,
        mock_server.uri()
    )
    .unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).expect("Failed to load config");
    let report = crawl(config, false).await.expect("Crawl failed");

    assert_eq!(report.user, "from-file");
    assert_eq!(report.total_views, 1300);
}
