use mk_core::makefile::Target;

/// Returns the targets whose name or description contains `query`,
/// ignoring case. Source order is kept and an empty query keeps everything.
pub fn filter_targets<'a, I>(targets: I, query: &str) -> Vec<&'a Target>
where
    I: IntoIterator<Item = &'a Target>,
{
    if query.is_empty() {
        return targets.into_iter().collect();
    }

    let query = query.to_lowercase();
    targets
        .into_iter()
        .filter(|target| matches_query(target, &query))
        .collect()
}

/// `lowered_query` must already be lowercase.
fn matches_query(target: &Target, lowered_query: &str) -> bool {
    target.name.to_lowercase().contains(lowered_query)
        || target.description.to_lowercase().contains(lowered_query)
}
