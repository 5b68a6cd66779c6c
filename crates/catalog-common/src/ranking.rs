use std::cmp::Ordering;

use crate::highlight::Matcher;
use crate::types::{
    CategoryFilter, OsFilter, OsTag, ScriptRecord, SearchQuery, SearchResult, SortMode,
};

/// OS filter rule: a concrete OS also admits cross-platform scripts, while
/// the cross-platform filter admits only cross-platform scripts.
pub fn admits_os(filter: OsFilter, os: OsTag) -> bool {
    match filter {
        OsFilter::All => true,
        OsFilter::Only(OsTag::CrossPlatform) => os == OsTag::CrossPlatform,
        OsFilter::Only(wanted) => os == wanted || os == OsTag::CrossPlatform,
    }
}

pub fn admits_category(filter: CategoryFilter, record: &ScriptRecord) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => record.category == category,
    }
}

/// Title, description, tags, category label or OS label contain the query.
pub fn matches_text(record: &ScriptRecord, matcher: &Matcher) -> bool {
    matcher.is_match(&record.title)
        || matcher.is_match(&record.description)
        || any_tag_matches(record, matcher)
        || matcher.is_match(record.category.label())
        || matcher.is_match(record.os.label())
}

fn any_tag_matches(record: &ScriptRecord, matcher: &Matcher) -> bool {
    record.tags.iter().any(|t| matcher.is_match(t))
}

/// Sort in place. Every mode is stable: ties keep corpus order.
pub fn sort_records(records: &mut Vec<&ScriptRecord>, matcher: &Matcher, mode: SortMode) {
    match mode {
        SortMode::Relevance => {
            // Keys computed once per record, not per comparison.
            let mut keyed: Vec<((bool, bool, u64), &ScriptRecord)> = records
                .iter()
                .map(|r| {
                    let key = (
                        matcher.is_match(&r.title),
                        any_tag_matches(r, matcher),
                        r.downloads,
                    );
                    (key, *r)
                })
                .collect();
            keyed.sort_by(|(a, _), (b, _)| relevance_order(a, b));
            *records = keyed.into_iter().map(|(_, r)| r).collect();
        }
        SortMode::Downloads => records.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
        SortMode::Rating => records.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortMode::Newest => records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortMode::Alphabetical => records.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

/// Title hit first, then tag hit, then most downloaded.
fn relevance_order(a: &(bool, bool, u64), b: &(bool, bool, u64)) -> Ordering {
    b.0.cmp(&a.0)
        .then_with(|| b.1.cmp(&a.1))
        .then_with(|| b.2.cmp(&a.2))
}

/// Match, filter, sort, truncate and highlight.
///
/// Queries under two trimmed characters produce no results. The cap is
/// applied after sorting.
pub fn search<'a, I>(records: I, query: &SearchQuery) -> Vec<SearchResult>
where
    I: IntoIterator<Item = &'a ScriptRecord>,
{
    if query.needle().is_none() {
        return Vec::new();
    }
    let matcher = Matcher::new(query.text.trim());

    let mut matched: Vec<&ScriptRecord> = records
        .into_iter()
        .filter(|r| admits_os(query.os, r.os))
        .filter(|r| admits_category(query.category, r))
        .filter(|r| matches_text(r, &matcher))
        .collect();

    sort_records(&mut matched, &matcher, query.sort);
    matched.truncate(query.limit);

    matched
        .into_iter()
        .enumerate()
        .map(|(i, record)| SearchResult {
            rank: i + 1,
            title: matcher.spans(&record.title),
            description: matcher.spans(&record.description),
            tags: record.tags.iter().map(|t| matcher.spans(t)).collect(),
            record: record.clone(),
        })
        .collect()
}
