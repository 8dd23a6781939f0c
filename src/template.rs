//! Pull request comment rendering

use crate::issue::Issue;
use crate::jira;

/// Render the summary comment listing the issues that were moved
///
/// # Arguments
/// * `base_url` - Jira base URL used to build the issue links
/// * `target_status` - The status the issues were moved to
/// * `moved` - Issues that were transitioned, in processing order
///
/// # Returns
/// Markdown with one line per issue: a link to the issue and its summary
pub fn make_comment(base_url: &str, target_status: &str, moved: &[Issue]) -> String {
    let mut lines = vec![format!(
        "Moved {} to **{}**:",
        plural(moved.len(), "issue"),
        target_status
    )];
    lines.push(String::new());

    for issue in moved {
        lines.push(format!(
            "- [{}]({}) {}",
            issue.key,
            jira::browse_url(base_url, &issue.key),
            escape_line(&issue.summary)
        ));
    }

    lines.join("\n")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Keep a summary on a single list item line
fn escape_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
