//! Grouping of Accept clauses by priority.

use super::clause::AcceptClause;

/// Clauses sharing one priority, in the order they appeared in the header.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityGroup {
    pub priority: f32,
    pub clauses: Vec<AcceptClause>,
}

/// Parses a full Accept header into priority groups, most preferred first.
///
/// Blank segments (empty header, trailing commas) are skipped.
///
/// # Example
///
/// ```
/// # use webcodec::accept::group_by_priority;
/// let groups = group_by_priority("text/csv;q=0.5, application/json, text/html");
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].clauses[0].media_type, "application/json");
/// assert_eq!(groups[0].clauses[1].media_type, "text/html");
/// assert_eq!(groups[1].priority, 0.5);
/// ```
pub fn group_by_priority(header: &str) -> Vec<PriorityGroup> {
    let mut clauses: Vec<AcceptClause> = header
        .split(',')
        .map(AcceptClause::parse)
        .filter(|clause| !clause.media_type.is_empty())
        .collect();
    // Stable, so equal priorities stay in header order.
    clauses.sort_by(|a, b| b.priority.total_cmp(&a.priority));

    let mut groups: Vec<PriorityGroup> = Vec::new();
    for clause in clauses {
        match groups.last_mut() {
            Some(group) if group.priority == clause.priority => group.clauses.push(clause),
            _ => groups.push(PriorityGroup {
                priority: clause.priority,
                clauses: vec![clause],
            }),
        }
    }
    groups
}

/// Iterates every clause of the groups in preference order.
pub fn clauses_in_order(groups: &[PriorityGroup]) -> impl Iterator<Item = &AcceptClause> {
    groups.iter().flat_map(|group| group.clauses.iter())
}
