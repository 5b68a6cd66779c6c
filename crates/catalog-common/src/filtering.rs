use crate::normalization::{loose_token, normalize_path, path_segments};
use crate::taxonomy::{CATEGORY_NAMESPACE, PRIORITY_NAMESPACE};
use crate::types::ScriptRecord;

/// How a browse path restricts the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowseScope {
    /// Home or any path outside a browse namespace: nothing is filtered out.
    Everything,
    /// `/categories/<slug>`: exact category equality.
    Category(String),
    /// `/categories/<slug>/.../<leaf>`: subcategory heuristic on the leaf.
    Subcategory(String),
    /// `/emergency`: any record carrying a priority.
    AnyPriority,
    /// `/emergency/.../<leaf>`: prioritized records matching the leaf.
    PrioritySubcategory(String),
    /// `/categories` with nothing beneath it.
    Nothing,
}

impl BrowseScope {
    pub fn from_path(path: &str) -> Self {
        let normalized = normalize_path(path);
        let segments = path_segments(&normalized);
        match segments.as_slice() {
            [] => BrowseScope::Everything,
            [ns] if *ns == CATEGORY_NAMESPACE => BrowseScope::Nothing,
            [ns, slug] if *ns == CATEGORY_NAMESPACE => BrowseScope::Category(slug.to_string()),
            [ns, .., leaf] if *ns == CATEGORY_NAMESPACE => {
                BrowseScope::Subcategory(leaf.to_string())
            }
            [ns] if *ns == PRIORITY_NAMESPACE => BrowseScope::AnyPriority,
            [ns, .., leaf] if *ns == PRIORITY_NAMESPACE => {
                BrowseScope::PrioritySubcategory(leaf.to_string())
            }
            _ => BrowseScope::Everything,
        }
    }

    pub fn admits(&self, record: &ScriptRecord) -> bool {
        match self {
            BrowseScope::Everything => true,
            BrowseScope::Nothing => false,
            BrowseScope::Category(slug) => record.category.slug() == slug.as_str(),
            BrowseScope::Subcategory(leaf) => matches_subcategory(record, leaf),
            BrowseScope::AnyPriority => record.priority.is_some(),
            BrowseScope::PrioritySubcategory(leaf) => {
                record.priority.is_some() && matches_subcategory(record, leaf)
            }
        }
    }
}

/// Records visible under a browse path, in corpus order.
pub fn filter_by_category<'a>(records: &'a [ScriptRecord], path: &str) -> Vec<&'a ScriptRecord> {
    let scope = BrowseScope::from_path(path);
    records.iter().filter(|r| scope.admits(r)).collect()
}

/// Records carry no subcategory field, so a subcategory segment is matched
/// loosely against tags and title. This over-matches short segments (e.g.
/// `git` hits `digital`); swap it for a real field once records have one.
pub fn matches_subcategory(record: &ScriptRecord, segment: &str) -> bool {
    let token = loose_token(segment);
    if token.is_empty() {
        return false;
    }
    record.tags.iter().any(|t| loose_token(t).contains(&token))
        || loose_token(&record.title).contains(&token)
}
