use std::cmp::Ordering;

use clap::ValueEnum;

use crate::models::Person;

/// Display order for the people list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortMode {
    /// Canonical stored order.
    #[default]
    Stored,
    /// Alphabetical by name (view only; `lendlord sort` persists it).
    Name,
    /// Most recent activity first.
    Recent,
}

/// Primary collation key: accents folded to their base letters, then
/// lower-cased, so `Émile` files under `e`.
fn collation_key(name: &str) -> String {
    deunicode::deunicode(name).to_lowercase()
}

/// Locale-aware name order. Names that fold to the same key fall back to a
/// case-insensitive comparison of the raw text, then to the raw text itself,
/// so the order is total and deterministic.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

pub fn matches_query(person: &Person, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty()
        || person.name.to_lowercase().contains(&q)
        || person.notes.to_lowercase().contains(&q)
}

/// People whose name or notes contain `query`, in input order.
pub fn filter<'a>(people: &'a [Person], query: &str) -> Vec<&'a Person> {
    people.iter().filter(|p| matches_query(p, query)).collect()
}

/// Reorder `people` in place by name.
pub fn sort_by_name(people: &mut [Person]) {
    people.sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// Most recently active first; people without activity sort last. Stable,
/// and never touches the stored order.
pub fn sort_by_recency<'a>(people: impl IntoIterator<Item = &'a Person>) -> Vec<&'a Person> {
    let mut view: Vec<&Person> = people.into_iter().collect();
    view.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
    view
}

/// Filter then order, pairing each person with their stored position for
/// display and for addressing them in later commands.
pub fn arrange<'a>(people: &'a [Person], query: &str, mode: SortMode) -> Vec<(usize, &'a Person)> {
    let mut view = filter(people, query);
    match mode {
        SortMode::Stored => {}
        SortMode::Name => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortMode::Recent => view = sort_by_recency(view),
    }
    view.into_iter()
        .filter_map(|p| {
            people
                .iter()
                .position(|q| q.id == p.id)
                .map(|pos| (pos, p))
        })
        .collect()
}
