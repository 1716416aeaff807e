//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from the start page to the index file.

use catalog_crawler::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use catalog_crawler::crawler::{run_crawl, Coordinator};
use catalog_crawler::index::CodeIdMap;
use catalog_crawler::output::{render_index, write_index};
use catalog_crawler::state::{CrawlState, PageState};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the mock server from `start_path`
fn create_test_config(base_url: &str, start_path: &str, max_pages: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_url: format!("{}{}", base_url, start_path),
            limiting_domain: "127.0.0.1".to_string(),
            max_pages,
            max_concurrent_pages_open: 1,
            request_timeout_secs: 5,
            // Test catalogs use short course numbers such as "CMSC 101"
            code_pattern: r"\w{4} [0-9]{3,6}".to_string(),
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
        output: OutputConfig::default(),
    }
}

fn course_block(code: &str, title: &str, desc: &str) -> String {
    format!(
        r#"<div class="courseblock main"><p class="courseblocktitle">{} {}</p><p class="courseblockdesc">{}</p></div>"#,
        code, title, desc
    )
}

fn page(body: &str) -> String {
    format!(
        "<html><head><title>Catalog</title></head><body>{}</body></html>",
        body
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_course_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/index.html",
        page(&course_block("CMSC 101", "Intro", "learn to program")),
    )
    .await;

    let map: CodeIdMap = [("CMSC 101", 7)].into_iter().collect();
    let config = create_test_config(&base_url, "/index.html", 10);

    let report = run_crawl(config, map).await.expect("Crawl failed");

    assert!(report.index.contains("intro", 7));
    assert!(report.index.contains("learn", 7));
    assert!(report.index.contains("program", 7));
    assert!(report.index.get("to").is_none(), "stopwords must not be indexed");

    let rendered = render_index(&report.index);
    assert!(rendered.starts_with("ID|word\n"));
    assert!(rendered.contains("7|intro\n"));
    assert!(rendered.contains("7|learn\n"));
    assert!(rendered.contains("7|program\n"));
    assert!(!rendered.contains("|to\n"));
}

#[tokio::test]
async fn test_page_budget_limits_visits() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // A chain of pages: p0 -> p1 -> p2 -> p3
    for i in 0..3 {
        let body = page(&format!(r#"<a href="p{}.html">next</a>"#, i + 1));
        mount_page(&mock_server, &format!("/p{}.html", i), body).await;
    }

    Mock::given(method("GET"))
        .and(path("/p3.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page(""), "text/html"))
        .expect(0) // Past the budget of three pages
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, "/p0.html", 3);
    let report = run_crawl(config, CodeIdMap::default())
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.stats.pages_visited, 3);
    assert_eq!(
        report.visited,
        vec![
            format!("{}/p0.html", base_url),
            format!("{}/p1.html", base_url),
            format!("{}/p2.html", base_url),
        ]
    );
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Pages link to each other and to themselves
    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            page(r#"<a href="b.html">B</a><a href="a.html">A</a><a href="b.html#top">B</a>"#),
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            page(&format!(r#"<a href="{}/a.html">A</a>"#, base_url)),
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, "/a.html", 100);
    let report = run_crawl(config, CodeIdMap::default())
        .await
        .expect("Crawl failed");

    // Frontier emptied well before the budget
    assert_eq!(report.visited.len(), 2);
    assert_eq!(report.stats.count(PageState::Processed), 2);
}

#[tokio::test]
async fn test_failed_pages_do_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/index.html",
        page(
            r#"<a href="missing.html">gone</a>
               <a href="broken.html">broken</a>
               <a href="doc.html">not html</a>
               <a href="good.html">good</a>"#,
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doc.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/good.html",
        page(&course_block("MATH 151", "Calculus", "limits and derivatives")),
    )
    .await;

    let map: CodeIdMap = [("MATH 151", 3)].into_iter().collect();
    let config = create_test_config(&base_url, "/index.html", 10);
    let report = run_crawl(config, map).await.expect("Crawl failed");

    assert_eq!(report.stats.pages_visited, 5);
    assert_eq!(report.stats.count(PageState::Processed), 2);
    assert_eq!(report.stats.count(PageState::DeadLink), 1);
    assert_eq!(report.stats.count(PageState::Failed), 1);
    assert_eq!(report.stats.count(PageState::ContentMismatch), 1);
    assert!(report.index.contains("derivatives", 3));
}

#[tokio::test]
async fn test_courses_accumulate_across_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/index.html",
        page(&format!(
            r#"{}<a href="physics.html">Physics</a>"#,
            course_block("CMSC 101", "Intro", "learn to program")
        )),
    )
    .await;

    mount_page(
        &mock_server,
        "/physics.html",
        page(&format!(
            "{}{}",
            course_block("PHYS 141", "Mechanics", "program your own simulations"),
            course_block("CMSC 101", "Intro", "taught again with pictures")
        )),
    )
    .await;

    let map: CodeIdMap = [("CMSC 101", 7), ("PHYS 141", 12)].into_iter().collect();
    let config = create_test_config(&base_url, "/index.html", 10);
    let report = run_crawl(config, map).await.expect("Crawl failed");

    assert_eq!(report.index.get("program"), Some(&[7, 12][..]));
    assert!(report.index.contains("pictures", 7));
    assert!(report.index.contains("mechanics", 12));
    assert!(!report.index.contains("mechanics", 7));
}

#[tokio::test]
async fn test_sequence_text_reaches_subsequence_courses() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/index.html",
        page(
            r#"<div class="courseblock main">
                 <p class="courseblocktitle">HUMA 110-111 Readings</p>
                 <p class="courseblockdesc">Great books</p>
               </div>
               <div class="courseblock subsequence">
                 <p class="courseblocktitle">HUMA 111 Part B</p>
                 <p class="courseblockdesc">Epic poetry</p>
               </div>"#,
        ),
    )
    .await;

    let map: CodeIdMap = [("HUMA 110", 1), ("HUMA 111", 2)].into_iter().collect();
    let config = create_test_config(&base_url, "/index.html", 10);
    let report = run_crawl(config, map).await.expect("Crawl failed");

    assert!(report.index.contains("books", 1));
    assert!(report.index.contains("books", 2));
    assert!(report.index.contains("poetry", 2));
    assert!(!report.index.contains("poetry", 1));
}

#[tokio::test]
async fn test_unmapped_codes_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/index.html",
        page(&format!(
            "{}{}",
            course_block("CMSC 101", "Intro", "learn to program"),
            course_block("ARTH 999", "Unlisted", "sculpture studio")
        )),
    )
    .await;

    let map: CodeIdMap = [("CMSC 101", 7)].into_iter().collect();
    let config = create_test_config(&base_url, "/index.html", 10);
    let report = run_crawl(config, map).await.expect("Crawl failed");

    assert!(report.index.get("sculpture").is_none());
    assert!(report.index.contains("program", 7));
    assert_eq!(report.stats.unmapped_codes, 1);
}

#[tokio::test]
async fn test_crawl_is_deterministic() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/index.html",
        page(&format!(
            r#"{}<a href="a.html">A</a><a href="b.html">B</a>"#,
            course_block("CMSC 101", "Intro", "learn to program")
        )),
    )
    .await;
    mount_page(
        &mock_server,
        "/a.html",
        page(&course_block("CMSC 102", "Data", "arrays lists graphs")),
    )
    .await;
    mount_page(
        &mock_server,
        "/b.html",
        page(&course_block("CMSC 103", "Systems", "graphs of processes")),
    )
    .await;

    let map: CodeIdMap = [("CMSC 101", 1), ("CMSC 102", 2), ("CMSC 103", 3)]
        .into_iter()
        .collect();

    let first = run_crawl(create_test_config(&base_url, "/index.html", 10), map.clone())
        .await
        .expect("Crawl failed");
    let second = run_crawl(create_test_config(&base_url, "/index.html", 10), map)
        .await
        .expect("Crawl failed");

    assert_eq!(first.visited, second.visited);
    assert_eq!(render_index(&first.index), render_index(&second.index));
}

#[tokio::test]
async fn test_concurrent_crawl_matches_sequential_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..6)
        .map(|i| format!(r#"<a href="c{}.html">c{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/index.html", page(&links)).await;
    for i in 0..6 {
        let code = format!("CMSC 20{}", i);
        mount_page(
            &mock_server,
            &format!("/c{}.html", i),
            page(&course_block(&code, "Topic", &format!("subject{}", i))),
        )
        .await;
    }

    let map: CodeIdMap = (0..6).map(|i| (format!("CMSC 20{}", i), i as u32)).collect();

    let sequential = run_crawl(create_test_config(&base_url, "/index.html", 20), map.clone())
        .await
        .expect("Crawl failed");

    let mut config = create_test_config(&base_url, "/index.html", 20);
    config.crawler.max_concurrent_pages_open = 4;
    let concurrent = run_crawl(config, map).await.expect("Crawl failed");

    assert_eq!(concurrent.visited.len(), 7);
    assert_eq!(concurrent.index.len(), sequential.index.len());
    assert_eq!(
        concurrent.index.association_count(),
        sequential.index.association_count()
    );
    for (word, ids) in sequential.index.iter() {
        for id in ids {
            assert!(concurrent.index.contains(word, *id), "missing {}|{}", id, word);
        }
    }
}

#[tokio::test]
async fn test_budget_holds_with_more_workers_than_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="l{}.html">l{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/index.html", page(&links)).await;
    for i in 0..10 {
        mount_page(&mock_server, &format!("/l{}.html", i), page("")).await;
    }

    let mut config = create_test_config(&base_url, "/index.html", 3);
    config.crawler.max_concurrent_pages_open = 8;
    let report = run_crawl(config, CodeIdMap::default())
        .await
        .expect("Crawl failed");

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");

    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.stats.pages_visited, 3);
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_unreachable_start_writes_header_only_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("catalog_index.csv");

    let config = create_test_config(&base_url, "/index.html", 10);
    let mut coordinator =
        Coordinator::new(config, CodeIdMap::default()).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(coordinator.state(), CrawlState::Done);
    assert!(report.index.is_empty());

    write_index(&report.index, &index_path).expect("Failed to write index");
    assert_eq!(std::fs::read_to_string(&index_path).unwrap(), "ID|word\n");
}
