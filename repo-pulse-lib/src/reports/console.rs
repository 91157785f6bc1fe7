use crate::Result;
use crate::analysis::AnalysisResult;
use crate::facts::{EmptyDataWarning, RepositoryListing};
use chrono::{DateTime, Local, Utc};
use core::fmt::Display;
use owo_colors::{OwoColorize, Style};
use std::io::Write;

const DEFAULT_WIDTH: usize = 80;
const MAX_BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 16;

/// Console output styling.
#[derive(Debug, Clone, Copy)]
struct Painter {
    colors: bool,
}

impl Painter {
    fn paint<T: Display>(self, value: T, style: Style) -> String {
        if self.colors {
            value.style(style).to_string()
        } else {
            value.to_string()
        }
    }

    fn heading<T: Display>(self, value: T) -> String {
        self.paint(value, Style::new().bold().cyan())
    }

    fn label<T: Display>(self, value: T) -> String {
        self.paint(value, Style::new().dimmed())
    }
}

/// Write a repository analysis as a human-readable report.
pub fn generate<W: Write>(result: &AnalysisResult, use_colors: bool, generated_at: DateTime<Local>, writer: &mut W) -> Result<()> {
    render_analysis(result, Painter { colors: use_colors }, terminal_width(), generated_at, writer)
}

/// Write a user's repository listing as a human-readable report.
pub fn generate_listing<W: Write>(
    listing: &RepositoryListing,
    use_colors: bool,
    generated_at: DateTime<Local>,
    writer: &mut W,
) -> Result<()> {
    render_listing(listing, Painter { colors: use_colors }, generated_at, writer)
}

fn terminal_width() -> usize {
    terminal_size::terminal_size().map_or(DEFAULT_WIDTH, |(terminal_size::Width(w), _)| usize::from(w))
}

fn render_analysis<W: Write>(
    result: &AnalysisResult,
    painter: Painter,
    width: usize,
    generated_at: DateTime<Local>,
    w: &mut W,
) -> Result<()> {
    let repo = &result.repository;
    let metrics = &result.metrics;

    writeln!(w, "{}", painter.paint(format!("{}/{}", repo.owner_login, repo.name), Style::new().bold()))?;
    if let Some(description) = &repo.description {
        writeln!(w, "{description}")?;
    }
    writeln!(w)?;

    writeln!(w, "{}", painter.heading("Repository"))?;
    row(w, painter, "Stars", group_thousands(repo.stars))?;
    row(w, painter, "Watchers", group_thousands(repo.watchers))?;
    row(w, painter, "Forks", group_thousands(repo.forks))?;
    row(w, painter, "Created", format_date(repo.created_at))?;
    row(w, painter, "Updated", format_date(repo.updated_at))?;
    row(w, painter, "License", repo.license.as_deref().unwrap_or("None"))?;
    row(w, painter, "Language", repo.primary_language.as_deref().unwrap_or("Unknown"))?;
    row(w, painter, "URL", &repo.html_url)?;
    writeln!(w)?;

    writeln!(w, "{}", painter.heading("Issues"))?;
    row(w, painter, "Open", metrics.issue_stats.open)?;
    row(w, painter, "Closed", metrics.issue_stats.closed)?;
    row(w, painter, "Avg. resolution", format!("{} days", metrics.issue_stats.avg_resolution_days))?;
    writeln!(w)?;

    writeln!(w, "{}", painter.heading("Pull requests"))?;
    row(w, painter, "Open", metrics.pull_request_stats.open)?;
    row(w, painter, "Closed", metrics.pull_request_stats.closed)?;
    row(w, painter, "Merged", metrics.pull_request_stats.merged)?;
    writeln!(w)?;

    writeln!(w, "{}", painter.heading("Top contributors"))?;
    if metrics.top_contributors.is_empty() {
        writeln!(w, "  {}", painter.label("No contributors"))?;
    }
    for (rank, contributor) in metrics.top_contributors.iter().enumerate() {
        writeln!(
            w,
            "  {}. {:<24} {} contributions",
            rank + 1,
            contributor.name,
            group_thousands(contributor.contributions)
        )?;
    }
    writeln!(w)?;

    writeln!(w, "{}", painter.heading("Commit activity"))?;
    if metrics.commit_frequency.is_empty() {
        writeln!(w, "  {}", painter.label("No commits"))?;
    }
    let busiest = metrics.commit_frequency.iter().map(|d| d.commits).max().unwrap_or(0);
    let bar_budget = width.saturating_sub(LABEL_WIDTH + 8).clamp(1, MAX_BAR_WIDTH);
    for day in &metrics.commit_frequency {
        let bar = "█".repeat(bar_length(day.commits, busiest, bar_budget));
        writeln!(
            w,
            "  {:<12} {} {}",
            day.date.format("%Y-%m-%d"),
            painter.paint(bar, Style::new().green()),
            day.commits
        )?;
    }
    writeln!(w)?;

    write_notes(w, painter, result.warnings())?;
    write_footer(w, painter, generated_at)
}

fn render_listing<W: Write>(listing: &RepositoryListing, painter: Painter, generated_at: DateTime<Local>, w: &mut W) -> Result<()> {
    let user = &listing.user;

    if user.name.is_some() {
        writeln!(w, "{} (@{})", painter.paint(user.display_name(), Style::new().bold()), user.login)?;
    } else {
        writeln!(w, "{}", painter.paint(&user.login, Style::new().bold()))?;
    }
    row(w, painter, "Public repos", group_thousands(user.public_repos))?;
    row(w, painter, "Followers", group_thousands(user.followers))?;
    writeln!(w)?;

    writeln!(w, "{}", painter.heading("Repositories"))?;
    if listing.repositories.is_empty() {
        writeln!(w, "  {}", painter.label("No repositories"))?;
    }
    for repo in &listing.repositories {
        writeln!(
            w,
            "  {:<32} ★ {:<8} forks {:<6} {:<12} updated {}",
            repo.name,
            group_thousands(repo.stars),
            group_thousands(repo.forks),
            repo.primary_language.as_deref().unwrap_or("-"),
            format_date(repo.updated_at)
        )?;
        if let Some(description) = &repo.description {
            writeln!(w, "    {}", painter.label(description))?;
        }
    }
    writeln!(w)?;

    write_footer(w, painter, generated_at)
}

fn row<W: Write>(w: &mut W, painter: Painter, label: &str, value: impl Display) -> Result<()> {
    writeln!(w, "  {} {value}", painter.label(format!("{label:<width$}", width = LABEL_WIDTH)))?;
    Ok(())
}

fn write_notes<'a, W: Write>(w: &mut W, painter: Painter, warnings: impl Iterator<Item = &'a EmptyDataWarning>) -> Result<()> {
    let mut warnings = warnings.peekable();
    if warnings.peek().is_none() {
        return Ok(());
    }

    writeln!(w, "{}", painter.paint("Notes", Style::new().bold().yellow()))?;
    for warning in warnings {
        writeln!(w, "  {}", painter.paint(warning, Style::new().yellow()))?;
    }
    writeln!(w)?;
    Ok(())
}

fn write_footer<W: Write>(w: &mut W, painter: Painter, generated_at: DateTime<Local>) -> Result<()> {
    writeln!(
        w,
        "{}",
        painter.label(format!("Generated on {}", generated_at.format("%Y-%m-%d %H:%M:%S")))
    )?;
    Ok(())
}

fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Length of a bar for `value`, scaled so `max` fills `budget`. Non-zero values get at least one cell.
fn bar_length(value: u64, max: u64, budget: usize) -> usize {
    if value == 0 || max == 0 {
        return 0;
    }
    let budget = u64::try_from(budget).unwrap_or(u64::MAX);
    let scaled = (value.saturating_mul(budget) / max).max(1);
    usize::try_from(scaled).unwrap_or(usize::MAX)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::facts::entities::{Contributor, ItemState, PullRequest, RepositoryInfo, RepositorySummary, UserInfo};
    use crate::facts::{EntityKind, EntitySlot, FailureReason, FetchedEntities, Quota};
    use crate::metrics::DerivedMetrics;
    use chrono::TimeZone;
    use url::Url;

    const PLAIN: Painter = Painter { colors: false };

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn analysis(contributors: EntitySlot<Contributor>) -> AnalysisResult {
        let at = Utc.with_ymd_and_hms(2020, 1, 15, 12, 0, 0).unwrap();
        let entities = FetchedEntities {
            repository: RepositoryInfo {
                name: "widgets".into(),
                description: Some("Widgets for everyone".into()),
                stars: 12_345,
                watchers: 40,
                forks: 7,
                created_at: at,
                updated_at: at,
                open_issues_count: 2,
                default_branch: "main".into(),
                license: Some("MIT".into()),
                primary_language: None,
                owner_login: "acme".into(),
                html_url: Url::parse("https://github.com/acme/widgets").unwrap(),
            },
            contributors,
            commits: EntitySlot::filled(Vec::new()),
            issues: EntitySlot::filled(Vec::new()),
            pull_requests: EntitySlot::filled(vec![PullRequest::new(ItemState::Closed, Some(at))]),
        };
        let metrics = DerivedMetrics::compute(&entities, &Utc);
        AnalysisResult::assemble(entities, metrics)
    }

    fn render(result: &AnalysisResult) -> String {
        let mut out = Vec::new();
        render_analysis(result, PLAIN, 80, generated_at(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(0, 10, 40), 0);
        assert_eq!(bar_length(10, 10, 40), 40);
        assert_eq!(bar_length(5, 10, 40), 20);
        assert_eq!(bar_length(1, 1000, 40), 1);
    }

    #[test]
    fn test_analysis_report_sections() {
        let avatar = Url::parse("https://avatars.example.com/alice").unwrap();
        let text = render(&analysis(EntitySlot::filled(vec![Contributor::new("alice", 1500, avatar)])));

        assert!(text.starts_with("acme/widgets\nWidgets for everyone\n"));
        assert!(text.contains("12,345"));
        assert!(text.contains("MIT"));
        assert!(text.contains("Unknown"));
        assert!(text.contains("1. alice"));
        assert!(text.contains("1,500 contributions"));
        assert!(text.contains("No commits"));
        assert!(!text.contains("Notes"));
        assert!(text.trim_end().ends_with("Generated on 2024-06-01 09:30:00"));
    }

    #[test]
    fn test_degraded_slots_are_noted() {
        let warning = EmptyDataWarning::new(EntityKind::Contributors, FailureReason::RateLimited(Quota(Some(0))));
        let text = render(&analysis(EntitySlot::degraded(warning)));

        assert!(text.contains("No contributors"));
        assert!(text.contains("Notes"));
        assert!(text.contains("contributors unavailable: rate limited (remaining requests: 0)"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let text = render(&analysis(EntitySlot::filled(Vec::new())));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_output_has_escape_codes() {
        let mut out = Vec::new();
        render_analysis(&analysis(EntitySlot::filled(Vec::new())), Painter { colors: true }, 80, generated_at(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains('\u{1b}'));
    }

    #[test]
    fn test_listing_report() {
        let listing = RepositoryListing {
            user: UserInfo {
                login: "octocat".into(),
                name: Some("The Octocat".into()),
                public_repos: 8,
                followers: 4200,
            },
            repositories: vec![RepositorySummary {
                name: "hello-world".into(),
                description: Some("My first repository".into()),
                stars: 2000,
                forks: 10,
                primary_language: Some("Rust".into()),
                updated_at: Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap(),
            }],
        };

        let mut out = Vec::new();
        render_listing(&listing, PLAIN, generated_at(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("The Octocat (@octocat)\n"));
        assert!(text.contains("4,200"));
        assert!(text.contains("hello-world"));
        assert!(text.contains("My first repository"));
        assert!(text.contains("Generated on"));
    }
}
