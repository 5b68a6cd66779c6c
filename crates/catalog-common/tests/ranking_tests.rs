mod fixtures;

use catalog_common::ranking::*;
use catalog_common::types::*;
use fixtures::*;

fn ids(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.record.id.as_str()).collect()
}

#[test]
fn relevance_title_hit_beats_tag_hit() {
    let corpus = cron_corpus();
    let results = search(&corpus, &SearchQuery::new("cron"));
    assert_eq!(ids(&results), vec!["r1", "r2"]);
    assert_eq!(results[0].rank, 1);
    assert_eq!(results[1].rank, 2);
}

#[test]
fn relevance_falls_back_to_downloads() {
    let corpus = vec![
        with_downloads(with_tags(record("a", "First"), &["disk"]), 5),
        with_downloads(with_tags(record("b", "Second"), &["disk"]), 50),
    ];
    let results = search(&corpus, &SearchQuery::new("disk"));
    assert_eq!(ids(&results), vec!["b", "a"]);
}

#[test]
fn relevance_ties_keep_corpus_order() {
    let mut a = record("a", "Alpha");
    a.description = "rotates nginx logs".into();
    let mut b = record("b", "Beta");
    b.description = "nginx reload".into();
    let mut c = record("c", "Gamma");
    c.description = "nginx status".into();

    let forward = vec![a.clone(), b.clone(), c.clone()];
    assert_eq!(ids(&search(&forward, &SearchQuery::new("nginx"))), vec!["a", "b", "c"]);

    let reversed = vec![c, b, a];
    assert_eq!(ids(&search(&reversed, &SearchQuery::new("nginx"))), vec!["c", "b", "a"]);
}

#[test]
fn short_query_yields_nothing() {
    let corpus = cron_corpus();
    assert!(search(&corpus, &SearchQuery::new("c")).is_empty());
    assert!(search(&corpus, &SearchQuery::new("  c  ")).is_empty());
    assert!(search(&corpus, &SearchQuery::new("")).is_empty());
}

#[test]
fn query_is_trimmed_and_case_insensitive() {
    let corpus = cron_corpus();
    let results = search(&corpus, &SearchQuery::new("  CRON "));
    assert_eq!(ids(&results), vec!["r1", "r2"]);
}

#[test]
fn matches_category_and_os_labels() {
    let corpus = vec![
        with_category(record("sec", "Rules"), Category::Security),
        with_os(record("mac", "Dock reset"), OsTag::Macos),
    ];
    assert_eq!(ids(&search(&corpus, &SearchQuery::new("secur"))), vec!["sec"]);
    assert_eq!(ids(&search(&corpus, &SearchQuery::new("macos"))), vec!["mac"]);
}

#[test]
fn linux_filter_admits_cross_platform() {
    let corpus = vec![
        with_os(record("x", "Sync files"), OsTag::CrossPlatform),
        with_os(record("w", "Sync registry"), OsTag::Windows),
        with_os(record("l", "Sync mounts"), OsTag::Linux),
    ];
    let query = SearchQuery::new("sync").with_os(OsFilter::Only(OsTag::Linux));
    assert_eq!(ids(&search(&corpus, &query)), vec!["x", "l"]);
}

#[test]
fn cross_platform_filter_excludes_linux() {
    let corpus = vec![
        with_os(record("x", "Sync files"), OsTag::CrossPlatform),
        with_os(record("l", "Sync mounts"), OsTag::Linux),
    ];
    let query = SearchQuery::new("sync").with_os(OsFilter::Only(OsTag::CrossPlatform));
    assert_eq!(ids(&search(&corpus, &query)), vec!["x"]);
}

#[test]
fn admits_os_rules() {
    assert!(admits_os(OsFilter::All, OsTag::Windows));
    assert!(admits_os(OsFilter::Only(OsTag::Macos), OsTag::CrossPlatform));
    assert!(!admits_os(OsFilter::Only(OsTag::Macos), OsTag::Linux));
    assert!(!admits_os(OsFilter::Only(OsTag::CrossPlatform), OsTag::Linux));
}

#[test]
fn category_filter_is_exact() {
    let corpus = vec![
        with_category(record("n", "Ping sweep"), Category::Networking),
        with_category(record("m", "Ping monitor"), Category::Monitoring),
    ];
    let query = SearchQuery::new("ping").with_category(CategoryFilter::Only(Category::Monitoring));
    assert_eq!(ids(&search(&corpus, &query)), vec!["m"]);
}

#[test]
fn sort_modes() {
    let mut old = with_downloads(record("old", "Beta deploy"), 300);
    old.rating = 4.5;
    old.updated_at = 100;
    let mut new = with_downloads(record("new", "alpha deploy"), 20);
    new.rating = 3.0;
    new.updated_at = 900;
    let mut mid = with_downloads(record("mid", "Alpha deploy"), 150);
    mid.rating = 4.9;
    mid.updated_at = 500;
    let corpus = vec![old, new, mid];

    let by = |mode| ids(&search(&corpus, &SearchQuery::new("deploy").with_sort(mode)))
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    assert_eq!(by(SortMode::Downloads), vec!["old", "mid", "new"]);
    assert_eq!(by(SortMode::Rating), vec!["mid", "old", "new"]);
    assert_eq!(by(SortMode::Newest), vec!["new", "mid", "old"]);
    // Ordinal: uppercase sorts before lowercase.
    assert_eq!(by(SortMode::Alphabetical), vec!["mid", "old", "new"]);
}

#[test]
fn cap_is_applied_after_sorting() {
    let corpus: Vec<_> = (0..20)
        .map(|i| with_downloads(record(&format!("s{i}"), "Log shipper"), i))
        .collect();
    let results = search(&corpus, &SearchQuery::new("shipper").with_limit(3));
    assert_eq!(ids(&results), vec!["s19", "s18", "s17"]);
}

#[test]
#[should_panic(expected = "result cap must be positive")]
fn zero_cap_fails_fast() {
    let _ = SearchQuery::new("cron").with_limit(0);
}

#[test]
fn results_carry_highlights() {
    let corpus = cron_corpus();
    let results = search(&corpus, &SearchQuery::new("cron"));
    let title: String = results[0].title.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(title, "Cron Jobs");
    assert!(results[0].title[0].is_match);
    assert_eq!(results[1].tags.len(), 1);
    assert!(results[1].tags[0][0].is_match);
}

#[test]
fn search_does_not_touch_input() {
    let corpus = cron_corpus();
    let before = corpus.clone();
    let _ = search(&corpus, &SearchQuery::new("cron").with_sort(SortMode::Alphabetical));
    assert_eq!(corpus, before);
}

#[test]
fn accepts_borrowed_subsets() {
    let corpus = cron_corpus();
    let subset: Vec<&ScriptRecord> = corpus.iter().filter(|r| r.id != "r1").collect();
    assert_eq!(ids(&search(subset, &SearchQuery::new("cron"))), vec!["r2"]);
}

#[test]
fn every_title_hit_is_highlighted() {
    // Dotted capital I lowercases to two code points; matching and marking
    // must agree on whether it hits.
    let corpus = vec![
        record("tr", "İzmir log rotation"),
        record("plain", "Izmir mirror sync"),
    ];
    for text in ["i\u{307}zmir", "İzmir", "izmir", "IZMIR"] {
        for result in search(&corpus, &SearchQuery::new(text)) {
            assert!(
                result.title.iter().any(|s| s.is_match),
                "{text:?} matched {} without marking its title",
                result.record.id
            );
        }
    }
}
