//! Filtering and pagination over dataset collections.
//!
//! Every filter field is optional. Present fields combine with AND; an empty
//! filter matches everything. Results keep source order unless noted.

use chrono::{DateTime, Utc};
use dx_api_types::{Page, PageMeta};
use serde::{Deserialize, Serialize};

use crate::types::{
    Actor, ActorType, Alert, AlertType, Narrative, NarrativeCategory, Report, Severity,
    TimelineEvent, MULTIPLE_PLATFORMS,
};

/// A predicate over one entity type.
pub trait Criteria<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Return the items accepted by `criteria`, in source order.
pub fn filter<'a, T, C>(items: impl IntoIterator<Item = &'a T>, criteria: &C) -> Vec<T>
where
    T: Clone + 'a,
    C: Criteria<T> + ?Sized,
{
    items
        .into_iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn any_eq_ci(values: &[String], wanted: &str) -> bool {
    values.iter().any(|v| v.eq_ignore_ascii_case(wanted))
}

/// Treats empty strings the same as an absent field.
fn given(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Narratives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NarrativeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Case-insensitive substring of title or description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Criteria<Narrative> for NarrativeFilter {
    fn matches(&self, n: &Narrative) -> bool {
        if self.category.is_some_and(|c| c != n.category) {
            return false;
        }
        if given(&self.language).is_some_and(|l| !any_eq_ci(&n.languages, l)) {
            return false;
        }
        if given(&self.platform).is_some_and(|p| !any_eq_ci(&n.platforms, p)) {
            return false;
        }
        if let Some(q) = given(&self.search) {
            return contains_ci(&n.title, q) || contains_ci(&n.description, q);
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub actor_type: Option<ActorType>,
    /// Also matches actors active on multiple platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinated: Option<bool>,
    /// Case-insensitive substring of name or location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Criteria<Actor> for ActorFilter {
    fn matches(&self, a: &Actor) -> bool {
        if self.actor_type.is_some_and(|t| t != a.actor_type) {
            return false;
        }
        if let Some(p) = given(&self.platform) {
            if !a.platform.eq_ignore_ascii_case(p) && a.platform != MULTIPLE_PLATFORMS {
                return false;
            }
        }
        if self.coordinated.is_some_and(|c| c != a.coordinated) {
            return false;
        }
        if let Some(q) = given(&self.search) {
            return contains_ci(&a.name, q) || contains_ci(&a.location, q);
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<AlertType>,
    /// Accepted for API compatibility; the seed alerts all share one day so
    /// it never narrows the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
}

impl Criteria<Alert> for AlertFilter {
    fn matches(&self, a: &Alert) -> bool {
        if self.severity.is_some_and(|s| s != a.severity) {
            return false;
        }
        if self.alert_type.is_some_and(|t| t != a.alert_type) {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFilter {
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl Criteria<TimelineEvent> for TimelineFilter {
    fn matches(&self, e: &TimelineEvent) -> bool {
        if self.start.is_some_and(|s| e.date < s) {
            return false;
        }
        if self.end.is_some_and(|end| e.date > end) {
            return false;
        }
        if given(&self.narrative_id).is_some_and(|id| id != e.narrative_id) {
            return false;
        }
        if given(&self.platform).is_some_and(|p| !any_eq_ci(&e.platforms, p)) {
            return false;
        }
        true
    }
}

/// Filter timeline events and sort them by timestamp, oldest first.
pub fn timeline_events<'a>(
    events: impl IntoIterator<Item = &'a TimelineEvent>,
    criteria: &TimelineFilter,
) -> Vec<TimelineEvent> {
    let mut out = filter(events, criteria);
    out.sort_by_key(|e| e.date);
    out
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Case-insensitive substring of title or summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Criteria<Report> for ReportFilter {
    fn matches(&self, r: &Report) -> bool {
        match given(&self.search) {
            Some(q) => contains_ci(&r.title, q) || contains_ci(&r.summary, q),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page request. Without `per_page` the whole result is one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
}

impl Pagination {
    pub fn new(page: u32, per_page: usize) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

/// Slice `items` according to `pagination`. `meta.total` is always the
/// unsliced count.
pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Page<T> {
    let total = items.len();
    let page = pagination.page.unwrap_or(1).max(1);
    let Some(per_page) = pagination.per_page.map(|p| p.max(1)) else {
        return Page {
            items,
            meta: PageMeta {
                total,
                page,
                per_page: total,
            },
        };
    };

    let start = (page as usize - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(start).take(per_page).collect();
    Page {
        items,
        meta: PageMeta {
            total,
            page,
            per_page,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn ids<T: crate::types::Identified>(items: &[T]) -> Vec<&str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let ds = Dataset::seed().unwrap();
        let all = filter(ds.narratives.iter(), &NarrativeFilter::default());
        assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn narrative_category_exact_match() {
        let ds = Dataset::seed().unwrap();
        let f = NarrativeFilter {
            category: Some(NarrativeCategory::VoteRigging),
            ..Default::default()
        };
        let hits = filter(ds.narratives.iter(), &f);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Ballot stuffing in Lagos polling stations");
    }

    #[test]
    fn narrative_language_and_platform_inclusion() {
        let ds = Dataset::seed().unwrap();
        let f = NarrativeFilter {
            language: Some("pcm".into()),
            platform: Some("Facebook".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(ds.narratives.iter(), &f)), vec!["1", "5"]);
    }

    #[test]
    fn narrative_search_is_case_insensitive() {
        let ds = Dataset::seed().unwrap();
        let f = NarrativeFilter {
            search: Some("BALLOT".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(ds.narratives.iter(), &f)), vec!["1"]);
    }

    #[test]
    fn blank_search_is_ignored() {
        let ds = Dataset::seed().unwrap();
        let f = NarrativeFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filter(ds.narratives.iter(), &f).len(), 5);
    }

    #[test]
    fn actor_platform_includes_multiple() {
        let ds = Dataset::seed().unwrap();
        let f = ActorFilter {
            platform: Some("FACEBOOK".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(ds.actors.iter(), &f)), vec!["2", "4"]);
    }

    #[test]
    fn actor_filters_combine_with_and() {
        let ds = Dataset::seed().unwrap();
        let f = ActorFilter {
            actor_type: Some(ActorType::Individual),
            coordinated: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&filter(ds.actors.iter(), &f)), vec!["1", "3"]);
    }

    #[test]
    fn alert_severity_filter() {
        let ds = Dataset::seed().unwrap();
        let f = AlertFilter {
            severity: Some(Severity::High),
            timeframe: Some("day".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(ds.alerts.iter(), &f)), vec!["2", "4"]);
    }

    #[test]
    fn filters_never_expand_results() {
        let ds = Dataset::seed().unwrap();
        let base = ds.narratives.len();
        for category in NarrativeCategory::ALL {
            let f = NarrativeFilter {
                category: Some(*category),
                ..Default::default()
            };
            assert!(filter(ds.narratives.iter(), &f).len() <= base);
        }
    }

    #[test]
    fn timeline_bounds_are_inclusive_and_sorted() {
        let ds = Dataset::seed().unwrap();
        let f = TimelineFilter {
            start: Some("2025-05-12T10:30:00Z".parse().unwrap()),
            end: Some("2025-05-12T16:00:00Z".parse().unwrap()),
            ..Default::default()
        };
        let events = timeline_events(ds.timeline.iter().rev(), &f);
        assert_eq!(ids(&events), vec!["2", "3", "4", "5"]);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn timeline_platform_filter() {
        let ds = Dataset::seed().unwrap();
        let f = TimelineFilter {
            platform: Some("tiktok".into()),
            ..Default::default()
        };
        assert_eq!(ids(&timeline_events(ds.timeline.iter(), &f)), vec!["3"]);
    }

    #[test]
    fn report_search() {
        let ds = Dataset::seed().unwrap();
        let f = ReportFilter {
            search: Some("coordinated".into()),
        };
        assert_eq!(ids(&filter(ds.reports.iter(), &f)), vec!["3"]);
    }

    #[test]
    fn pagination_is_noop_without_per_page() {
        let page = paginate(vec![1, 2, 3], Pagination::default());
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(
            page.meta,
            PageMeta {
                total: 3,
                page: 1,
                per_page: 3
            }
        );
    }

    #[test]
    fn pagination_slices_when_requested() {
        let page = paginate(vec![1, 2, 3, 4, 5], Pagination::new(2, 2));
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.meta.total, 5);

        let past_end = paginate(vec![1, 2, 3], Pagination::new(5, 2));
        assert!(past_end.is_empty());
        assert_eq!(past_end.meta.total, 3);
    }
}
