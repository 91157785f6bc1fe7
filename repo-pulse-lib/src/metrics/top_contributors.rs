use crate::facts::entities::Contributor;
use serde::Serialize;
use url::Url;

/// Number of contributors kept in the ranking.
pub const TOP_CONTRIBUTOR_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopContributor {
    pub name: String,
    pub contributions: u64,
    pub avatar: Url,
}

/// The most active contributors, most contributions first.
///
/// Contributors with equal counts keep the order in which they were fetched.
#[must_use]
pub fn top_contributors(contributors: &[Contributor]) -> Vec<TopContributor> {
    let mut ranked: Vec<&Contributor> = contributors.iter().collect();
    ranked.sort_by(|a, b| b.contributions.cmp(&a.contributions));

    ranked
        .into_iter()
        .take(TOP_CONTRIBUTOR_LIMIT)
        .map(|c| TopContributor {
            name: c.login.clone(),
            contributions: c.contributions,
            avatar: c.avatar_url.clone(),
        })
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn contributor(login: &str, contributions: u64) -> Contributor {
        let avatar = Url::parse(&format!("https://avatars.example.com/{login}")).unwrap();
        Contributor::new(login, contributions, avatar)
    }

    fn names(top: &[TopContributor]) -> Vec<&str> {
        top.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(top_contributors(&[]).is_empty());
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let input: Vec<_> = [("a", 3), ("b", 10), ("c", 1), ("d", 7), ("e", 5), ("f", 8), ("g", 2)]
            .into_iter()
            .map(|(login, n)| contributor(login, n))
            .collect();

        let top = top_contributors(&input);
        assert_eq!(names(&top), vec!["b", "f", "d", "e", "a"]);
        assert!(top.windows(2).all(|w| w[0].contributions >= w[1].contributions));
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let input = vec![contributor("x", 4), contributor("y", 9), contributor("z", 4), contributor("w", 4)];
        assert_eq!(names(&top_contributors(&input)), vec!["y", "x", "z", "w"]);
    }

    #[test]
    fn test_length_is_min_of_limit_and_input() {
        for n in 0..8_u64 {
            let input: Vec<_> = (0..n).map(|i| contributor(&format!("c{i}"), i)).collect();
            let expected = usize::try_from(n).unwrap().min(TOP_CONTRIBUTOR_LIMIT);
            assert_eq!(top_contributors(&input).len(), expected);
        }
    }

    #[test]
    fn test_projection_keeps_avatar() {
        let top = top_contributors(&[contributor("alice", 1)]);
        assert_eq!(top[0].avatar.as_str(), "https://avatars.example.com/alice");
        assert_eq!(top[0].contributions, 1);
    }

    #[test]
    fn test_input_is_not_mutated_and_result_is_stable() {
        let input = vec![contributor("a", 1), contributor("b", 2)];
        let before = input.clone();
        let first = top_contributors(&input);
        let second = top_contributors(&input);
        assert_eq!(input, before);
        assert_eq!(first, second);
    }
}
