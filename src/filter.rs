use crate::types::Repository;
use chrono::{DateTime, Utc};
use feruca::{Collator, Locale, Tailoring};
use std::cmp::Ordering;
use std::str::FromStr;

/// Ordering applied to the display list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    Stars,
    Name,
    #[default]
    Updated,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Stars => "stars",
            SortMode::Name => "name",
            SortMode::Updated => "updated",
        }
    }

    /// Maps a sort selector value; anything unknown sorts by update time.
    pub fn from_selector(value: &str) -> Self {
        match value {
            "stars" => SortMode::Stars,
            "name" => SortMode::Name,
            _ => SortMode::Updated,
        }
    }
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortMode::from_selector(s))
    }
}

/// Derives the display list from the full repository list.
///
/// Forks and archived repositories are dropped first. The remaining records
/// are kept when the trimmed, lowercased query is a substring of
/// `"{name} {description} {language}"`, then stably sorted by `mode`.
/// The input slice is left as is.
pub fn filter_and_sort(repos: &[Repository], query: &str, mode: SortMode) -> Vec<Repository> {
    let needle = query.trim().to_lowercase();

    let mut visible: Vec<Repository> = repos
        .iter()
        .filter(|r| !r.is_hidden())
        .filter(|r| needle.is_empty() || haystack(r).contains(&needle))
        .cloned()
        .collect();

    let mut collator = name_collator();
    visible.sort_by(|a, b| compare(a, b, mode, &mut collator));
    visible
}

fn haystack(repo: &Repository) -> String {
    format!(
        "{} {} {}",
        repo.name,
        repo.description.as_deref().unwrap_or(""),
        repo.language.as_deref().unwrap_or("")
    )
    .to_lowercase()
}

fn compare(a: &Repository, b: &Repository, mode: SortMode, collator: &mut Collator) -> Ordering {
    match mode {
        SortMode::Stars => b.stargazers_count.cmp(&a.stargazers_count),
        SortMode::Name => collator.collate(a.name.as_str(), b.name.as_str()),
        SortMode::Updated => updated_or_epoch(b).cmp(&updated_or_epoch(a)),
    }
}

fn updated_or_epoch(repo: &Repository) -> DateTime<Utc> {
    repo.updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Unicode Collation Algorithm with the CLDR root order. Punctuation is
/// non-ignorable, so `my_repo` and `my-repo` stay distinct and ordered.
fn name_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Compares two names the way the name sort orders them.
pub fn collate(a: &str, b: &str) -> Ordering {
    name_collator().collate(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_from_selector() {
        assert_eq!(SortMode::from_selector("stars"), SortMode::Stars);
        assert_eq!(SortMode::from_selector("name"), SortMode::Name);
        assert_eq!(SortMode::from_selector("updated"), SortMode::Updated);
        assert_eq!(SortMode::from_selector("bogus"), SortMode::Updated);
        assert_eq!(SortMode::from_selector(""), SortMode::Updated);
        assert_eq!("name".parse::<SortMode>().unwrap(), SortMode::Name);
    }

    #[test]
    fn test_collate_root_order() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Zebra", "alpha"), Ordering::Greater);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
        assert_eq!(collate("a_b", "a1"), Ordering::Less);
        assert_eq!(collate("Éclair", "my-repo"), Ordering::Less);
    }

    #[test]
    fn test_haystack_skips_missing_parts() {
        let repo = Repository {
            name: "Tool".to_string(),
            language: Some("Rust".to_string()),
            ..Default::default()
        };
        assert_eq!(haystack(&repo), "tool  rust");
    }
}
