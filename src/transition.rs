use rayon::prelude::*;

use crate::error::Result;
use crate::issue::{Issue, Resolved, Transition};
use crate::jira::IssueTracker;

/// Find the transition whose name is exactly `target_status`
pub fn find<'a>(transitions: &'a [Transition], target_status: &str) -> Option<&'a Transition> {
    transitions.iter().find(|t| t.name == target_status)
}

/// Resolve the target transition for every issue
///
/// Transitions are fetched per issue in parallel. Issues without a matching
/// transition are logged and left out; a failed fetch aborts the batch.
pub fn resolve_all<T: IssueTracker + ?Sized>(
    tracker: &T,
    issues: Vec<Issue>,
    target_status: &str,
) -> Result<Vec<Resolved>> {
    let fetched: Vec<(Issue, Vec<Transition>)> = issues
        .into_par_iter()
        .map(|issue| {
            let transitions = tracker.get_transitions(&issue.key)?;
            Ok((issue, transitions))
        })
        .collect::<Result<_>>()?;

    let resolved = fetched
        .into_iter()
        .filter_map(|(issue, transitions)| match find(&transitions, target_status) {
            Some(transition) => Some(Resolved {
                transition: transition.clone(),
                issue,
            }),
            None => {
                let available: Vec<&str> = transitions.iter().map(|t| t.name.as_str()).collect();
                tracing::warn!(
                    issue = %issue.key,
                    ?available,
                    "cannot find transition to status {:?}, skipping",
                    target_status
                );
                None
            }
        })
        .collect();

    Ok(resolved)
}
