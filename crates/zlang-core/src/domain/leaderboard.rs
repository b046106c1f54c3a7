use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

/// Label used when an author id no longer resolves to a user.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Number of slangs authored by one user, as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorCount {
    pub author_id: Uuid,
    pub slang_count: u64,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub author_id: Uuid,
    pub author_name: String,
    pub slang_count: u64,
}

/// Resolve author names and rank by slang count, highest first.
///
/// Equal counts are ordered by author name, then author id, so the ranking
/// does not depend on the order the store grouped the rows in.
pub fn rank_authors(
    counts: Vec<AuthorCount>,
    names: &HashMap<Uuid, String>,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = counts
        .into_iter()
        .map(|count| LeaderboardEntry {
            author_id: count.author_id,
            author_name: names
                .get(&count.author_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            slang_count: count.slang_count,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.slang_count
            .cmp(&a.slang_count)
            .then_with(|| a.author_name.cmp(&b.author_name))
            .then_with(|| a.author_id.cmp(&b.author_id))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_sorts_by_count_descending() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let names = HashMap::from([(a, "Ann".to_string()), (b, "Bo".to_string())]);

        let ranked = rank_authors(
            vec![
                AuthorCount { author_id: a, slang_count: 1 },
                AuthorCount { author_id: b, slang_count: 3 },
            ],
            &names,
        );

        assert_eq!(ranked[0].author_name, "Bo");
        assert_eq!(ranked[0].slang_count, 3);
        assert_eq!(ranked[1].author_name, "Ann");
    }

    #[test]
    fn test_rank_labels_missing_author_unknown() {
        let ranked = rank_authors(
            vec![AuthorCount { author_id: Uuid::new_v4(), slang_count: 2 }],
            &HashMap::new(),
        );

        assert_eq!(ranked[0].author_name, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_rank_ties_break_by_name_then_id() {
        let (low, high) = {
            let x = Uuid::new_v4();
            let y = Uuid::new_v4();
            if x < y { (x, y) } else { (y, x) }
        };
        let zed = Uuid::new_v4();
        let names = HashMap::from([
            (low, "Same".to_string()),
            (high, "Same".to_string()),
            (zed, "Alpha".to_string()),
        ]);

        let ranked = rank_authors(
            vec![
                AuthorCount { author_id: high, slang_count: 2 },
                AuthorCount { author_id: low, slang_count: 2 },
                AuthorCount { author_id: zed, slang_count: 2 },
            ],
            &names,
        );

        let order: Vec<Uuid> = ranked.iter().map(|e| e.author_id).collect();
        assert_eq!(order, vec![zed, low, high]);
    }
}
