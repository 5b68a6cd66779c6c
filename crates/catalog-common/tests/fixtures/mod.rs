#![allow(dead_code)]

use catalog_common::types::{Category, OsTag, Priority, ScriptRecord};

/// Build a minimal record; tweak fields on the returned value as needed.
pub fn record(id: &str, title: &str) -> ScriptRecord {
    ScriptRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        os: OsTag::Linux,
        category: Category::SystemAdministration,
        tags: Default::default(),
        rating: 0.0,
        downloads: 0,
        author: "ops".to_string(),
        created_at: 1_700_000_000,
        updated_at: 1_700_000_000,
        content: "#!/bin/sh\n".to_string(),
        priority: None,
    }
}

pub fn with_tags(mut r: ScriptRecord, tags: &[&str]) -> ScriptRecord {
    r.tags = tags.iter().map(|t| t.to_string()).collect();
    r
}

pub fn with_downloads(mut r: ScriptRecord, downloads: u64) -> ScriptRecord {
    r.downloads = downloads;
    r
}

pub fn with_os(mut r: ScriptRecord, os: OsTag) -> ScriptRecord {
    r.os = os;
    r
}

pub fn with_category(mut r: ScriptRecord, category: Category) -> ScriptRecord {
    r.category = category;
    r
}

pub fn with_priority(mut r: ScriptRecord, priority: Priority) -> ScriptRecord {
    r.priority = Some(priority);
    r
}

/// The three-record corpus used by the relevance scenario.
pub fn cron_corpus() -> Vec<ScriptRecord> {
    vec![
        with_downloads(record("r1", "Cron Jobs"), 10),
        with_downloads(with_tags(record("r2", "Backup Tool"), &["cron"]), 500),
        with_downloads(record("r3", "Other"), 1000),
    ]
}
