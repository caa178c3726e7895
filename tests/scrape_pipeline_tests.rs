//! End-to-end scrape tests against a local mock job board

use job_scout::domain::{ParameterError, RESULT_COLUMNS, SearchParameters};
use job_scout::infrastructure::export::write_csv;
use job_scout::{ScrapeOrchestrator, ScraperConfig};
use mockito::{Mock, Server, ServerGuard};

const FIRST_PAGE: &str = "/jobs?q=Graduate+Python&l=London&radius=15";

fn params(pages: u32) -> SearchParameters {
    SearchParameters::builder("Graduate Python", "London")
        .radius_miles(15)
        .description_keywords(["Python", "SQL"])
        .title_keywords(["Graduate"])
        .exclude_keywords(["Recruitment"])
        .page_count(pages)
        .build()
        .unwrap()
}

fn results_page(listings: &[(&str, &str)]) -> String {
    let cards: String = listings
        .iter()
        .map(|(href, title)| {
            format!(
                r#"<div class="jobsearch-SerpJobCard"><h2 class="title"><a href="{href}" title="{title}">{title}</a></h2></div>"#
            )
        })
        .collect();
    format!("<html><body>{cards}</body></html>")
}

fn detail_page(company: &str, description: &str) -> String {
    format!(
        r#"<html><body>
            <div class="icl-u-lg-mr--sm">{company}</div>
            <div id="jobDescriptionText"><p>{description}</p></div>
        </body></html>"#
    )
}

fn html_mock(server: &mut ServerGuard, path: &str, html: String) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create()
}

fn orchestrator(server: &ServerGuard) -> ScrapeOrchestrator {
    ScrapeOrchestrator::new(ScraperConfig::with_origin(server.url())).unwrap()
}

#[tokio::test]
async fn test_scrape_ranks_single_listing() {
    let mut server = Server::new_async().await;
    let _results = html_mock(
        &mut server,
        FIRST_PAGE,
        results_page(&[("/job/1", "Graduate Python Analyst")]),
    );
    let _detail = html_mock(&mut server, "/job/1", detail_page("Acme", "We use Python daily"));

    let report = orchestrator(&server).scrape(&params(1)).await.unwrap();
    let records = report.result_set.records();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].rating, 0.833);
    assert_eq!(records[0].company, "Acme");
    assert_eq!(records[0].matched_keywords, ["Python"]);
    assert_eq!(records[0].matched_title_keywords, ["Graduate"]);
    assert_eq!(records[0].page_number, 1);
}

#[tokio::test]
async fn test_record_url_is_post_redirect_url() {
    let mut server = Server::new_async().await;
    let _results = html_mock(
        &mut server,
        FIRST_PAGE,
        results_page(&[("/rc/clk?jk=7", "Graduate Developer")]),
    );
    let _redirect = server
        .mock("GET", "/rc/clk?jk=7")
        .with_status(302)
        .with_header("location", "/viewjob?jk=7")
        .create();
    let _detail = html_mock(&mut server, "/viewjob?jk=7", detail_page("Acme", "SQL"));

    let report = orchestrator(&server).scrape(&params(1)).await.unwrap();

    assert_eq!(report.result_set.len(), 1);
    assert_eq!(
        report.result_set.records()[0].url,
        format!("{}/viewjob?jk=7", server.url())
    );
}

#[tokio::test]
async fn test_excluded_listing_is_kept_with_zero_rating() {
    let mut server = Server::new_async().await;
    let _results = html_mock(
        &mut server,
        FIRST_PAGE,
        results_page(&[
            ("/job/1", "Recruitment Consultant - Python"),
            ("/job/2", "Graduate Analyst"),
        ]),
    );
    let _first = html_mock(&mut server, "/job/1", detail_page("Hays", "Python SQL"));
    let _second = html_mock(&mut server, "/job/2", detail_page("Acme", "Excel"));

    let report = orchestrator(&server).scrape(&params(1)).await.unwrap();
    let records = report.result_set.records();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].company, "Acme");
    assert_eq!(records[0].rating, 0.5);
    assert_eq!(records[1].company, "Hays");
    assert_eq!(records[1].rating, 0.0);
    assert_eq!(records[1].matched_keywords, ["Python", "SQL"]);
}

#[tokio::test]
async fn test_duplicate_listing_on_later_page_is_dropped() {
    let mut server = Server::new_async().await;
    let _first = html_mock(
        &mut server,
        FIRST_PAGE,
        results_page(&[("/job/a", "Graduate Analyst")]),
    );
    let _second = html_mock(
        &mut server,
        &format!("{FIRST_PAGE}&start=10"),
        results_page(&[("/job/b", "Graduate Analyst")]),
    );
    let _a = html_mock(&mut server, "/job/a", detail_page("Acme", "Python"));
    let _b = html_mock(&mut server, "/job/b", detail_page("Acme", "Python"));

    let report = orchestrator(&server).scrape(&params(2)).await.unwrap();
    let records = report.result_set.records();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].page_number, 1);
    assert!(records[0].url.ends_with("/job/a"));
}

#[tokio::test]
async fn test_unreachable_pages_are_contained() {
    let mut server = Server::new_async().await;
    let _first = html_mock(
        &mut server,
        FIRST_PAGE,
        results_page(&[("/job/1", "Graduate Analyst"), ("/job/gone", "Junior Analyst")]),
    );
    let _detail = html_mock(&mut server, "/job/1", detail_page("Acme", "SQL"));
    let _gone = server.mock("GET", "/job/gone").with_status(404).create();

    let report = orchestrator(&server).scrape(&params(3)).await.unwrap();

    assert_eq!(report.result_set.len(), 1);
    assert_eq!(report.pages_requested, 3);
    assert_eq!(report.pages_failed, 2);
    assert_eq!(report.listings_failed, 1);
}

#[tokio::test]
async fn test_every_page_failing_yields_empty_result() {
    let server = Server::new_async().await;

    let report = orchestrator(&server).scrape(&params(2)).await.unwrap();

    assert!(report.result_set.is_empty());
    assert!(report.is_total_failure());
}

#[test]
fn test_builder_rejects_invalid_parameters() {
    let rejected = SearchParameters::builder("Graduate Python", "London")
        .page_count(0)
        .build();
    assert!(matches!(rejected, Err(ParameterError::PageCountOutOfRange { .. })));

    let rejected = SearchParameters::builder("   ", "London").build();
    assert_eq!(rejected, Err(ParameterError::EmptyQuery));
}

#[tokio::test]
async fn test_result_table_exports_as_csv() {
    let mut server = Server::new_async().await;
    let _results = html_mock(
        &mut server,
        FIRST_PAGE,
        results_page(&[("/job/1", "Graduate Python Analyst")]),
    );
    let _detail = html_mock(&mut server, "/job/1", detail_page("Acme", "Python and SQL"));

    let report = orchestrator(&server).scrape(&params(1)).await.unwrap();
    let mut buffer = Vec::new();
    write_csv(&report.result_set.to_table(), &mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    let mut lines = csv.lines();

    assert_eq!(lines.next().unwrap(), RESULT_COLUMNS.join(","));
    let row = lines.next().unwrap();
    assert!(row.starts_with("1.0,Graduate Python Analyst,Acme,Python and SQL,"));
    assert!(row.contains("\"['Python', 'SQL']\""));
    assert!(row.ends_with(",['Graduate'],1"));
    assert!(lines.next().is_none());
}
