//! Fix version selection
//!
//! Each run attaches issues to the newest project version. An unreleased
//! version is reused as is; once it has been released the next one is named
//! by incrementing the numeric name of the released one.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::issue::Version;

/// Outcome of the version policy for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Keep using an existing unreleased version
    Reuse(Version),
    /// Create a new version with this name, starting on `start_date`
    Create { name: String, start_date: NaiveDate },
}

/// Decide which version the run should use
///
/// # Arguments
/// * `latest` - The most recent project version by sequence, if any
/// * `initial_name` - Name to use when the project has no versions at all
/// * `today` - Current UTC date, used as the start date of a new version
pub fn decide(
    latest: Option<&Version>,
    initial_name: Option<&str>,
    today: NaiveDate,
) -> Result<Decision> {
    match latest {
        Some(version) if !version.released => Ok(Decision::Reuse(version.clone())),
        Some(version) => Ok(Decision::Create {
            name: next_name(&version.name)?,
            start_date: today,
        }),
        None => match initial_name {
            Some(name) => Ok(Decision::Create {
                name: name.to_string(),
                start_date: today,
            }),
            None => Err(Error::NoInitialVersion),
        },
    }
}

/// Propose the name that follows a released version ("5" -> "6")
pub fn next_name(released: &str) -> Result<String> {
    let current: u64 = released
        .trim()
        .parse()
        .map_err(|_| Error::NonNumericVersion(released.to_string()))?;

    current
        .checked_add(1)
        .map(|next| next.to_string())
        .ok_or_else(|| Error::VersionOverflow(released.to_string()))
}

/// Format a date the way Jira expects version dates (2021-09-28)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn version(name: &str, released: bool) -> Version {
        Version {
            id: "100".into(),
            name: name.into(),
            released,
        }
    }

    #[test]
    fn test_released_version_is_incremented() {
        let decision = decide(Some(&version("5", true)), None, today()).unwrap();
        assert_eq!(
            decision,
            Decision::Create {
                name: "6".into(),
                start_date: today()
            }
        );
    }

    #[test]
    fn test_unreleased_version_is_reused() {
        let latest = version("7", false);
        let decision = decide(Some(&latest), Some("1"), today()).unwrap();
        assert_eq!(decision, Decision::Reuse(latest));
    }

    #[test]
    fn test_no_version_uses_initial_name() {
        let decision = decide(None, Some("1"), today()).unwrap();
        assert_eq!(
            decision,
            Decision::Create {
                name: "1".into(),
                start_date: today()
            }
        );
    }

    #[test]
    fn test_no_version_without_initial_name_fails() {
        assert!(matches!(
            decide(None, None, today()),
            Err(Error::NoInitialVersion)
        ));
    }

    #[test]
    fn test_non_numeric_released_version_fails() {
        let result = decide(Some(&version("2024.1", true)), None, today());
        assert!(matches!(result, Err(Error::NonNumericVersion(name)) if name == "2024.1"));
    }

    #[test]
    fn test_non_numeric_unreleased_version_is_still_reused() {
        let latest = version("spring", false);
        assert_eq!(
            decide(Some(&latest), None, today()).unwrap(),
            Decision::Reuse(latest)
        );
    }

    #[test]
    fn test_next_name() {
        assert_eq!(next_name("9").unwrap(), "10");
        assert_eq!(next_name(" 41 ").unwrap(), "42");
        assert!(next_name("").is_err());
        assert!(next_name("-1").is_err());
    }

    #[test]
    fn test_next_name_overflow() {
        let max = u64::MAX.to_string();
        assert!(matches!(next_name(&max), Err(Error::VersionOverflow(name)) if name == max));
        assert!(matches!(next_name("v5"), Err(Error::NonNumericVersion(_))));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(today()), "2024-03-09");
    }
}
