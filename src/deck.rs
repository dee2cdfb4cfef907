use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{
    CandidateProfile, Card, CardId, CardPayload, JobPosting, MenuItem, MenuKey, UserType,
};

const SAMPLE_JOBS: &str = include_str!("../data/jobs.json");
const SAMPLE_CANDIDATES: &str = include_str!("../data/candidates.json");

/// Hands out card ids. One allocator per process keeps ids unique across
/// mode switches, so identity never depends on display text.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> CardId {
        let id = CardId(self.next.max(1));
        self.next = id.0 + 1;
        id
    }

    pub fn ingest<I>(&mut self, payloads: I) -> Vec<Card>
    where
        I: IntoIterator<Item = CardPayload>,
    {
        payloads
            .into_iter()
            .map(|payload| Card {
                id: self.next_id(),
                payload,
            })
            .collect()
    }
}

pub fn sample_jobs() -> Result<Vec<JobPosting>> {
    serde_json::from_str(SAMPLE_JOBS).context("Failed to parse bundled job listings")
}

pub fn sample_candidates() -> Result<Vec<CandidateProfile>> {
    serde_json::from_str(SAMPLE_CANDIDATES).context("Failed to parse bundled candidate profiles")
}

/// The swipe deck a user sees: candidates swipe jobs, employers swipe candidates.
pub fn sample_deck(user_type: UserType) -> Result<Vec<CardPayload>> {
    Ok(match user_type {
        UserType::Candidate => sample_jobs()?.into_iter().map(CardPayload::Job).collect(),
        UserType::Employer => sample_candidates()?
            .into_iter()
            .map(CardPayload::Candidate)
            .collect(),
    })
}

/// Reads a JSON array of job postings (candidate users) or candidate
/// profiles (employer users). An empty or whitespace-only file is an empty deck.
pub fn load_deck(path: &Path, user_type: UserType) -> Result<Vec<CardPayload>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read deck file: {}", path.display()))?;
    parse_deck(&content, user_type)
        .with_context(|| format!("Invalid deck file: {}", path.display()))
}

fn parse_deck(content: &str, user_type: UserType) -> Result<Vec<CardPayload>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(match user_type {
        UserType::Candidate => serde_json::from_str::<Vec<JobPosting>>(content)?
            .into_iter()
            .map(CardPayload::Job)
            .collect(),
        UserType::Employer => serde_json::from_str::<Vec<CandidateProfile>>(content)?
            .into_iter()
            .map(CardPayload::Candidate)
            .collect(),
    })
}

/// Deck from `path` if given and non-empty, otherwise the bundled samples.
pub fn swipe_deck(
    ids: &mut IdAllocator,
    user_type: UserType,
    path: Option<&Path>,
) -> Result<Vec<Card>> {
    let payloads = match path {
        Some(path) => {
            let loaded = load_deck(path, user_type)?;
            if loaded.is_empty() {
                tracing::info!(path = %path.display(), "deck file empty, using samples");
                sample_deck(user_type)?
            } else {
                loaded
            }
        }
        None => sample_deck(user_type)?,
    };
    Ok(ids.ingest(payloads))
}

fn menu(key: MenuKey, label: &str, description: &str, flippable: bool, icon: &str) -> MenuItem {
    MenuItem {
        key,
        label: label.to_string(),
        description: description.to_string(),
        flippable,
        icon: icon.to_string(),
    }
}

pub fn menu_items(user_type: UserType) -> Vec<MenuItem> {
    match user_type {
        UserType::Employer => vec![
            menu(
                MenuKey::Candidates,
                "Candidates",
                "Browse candidate profiles and find talent",
                false,
                "🧑‍💼",
            ),
            menu(MenuKey::Messages, "Messages", "Chat with candidates and team", false, "💬"),
            menu(MenuKey::Dashboard, "Dashboard", "View analytics and hiring metrics", false, "📊"),
            menu(MenuKey::UploadJobs, "Upload Jobs", "Add new job postings", false, "➕"),
            menu(MenuKey::Verify, "Verify", "Blockchain verification with Algorand", false, "✓"),
            menu(MenuKey::Company, "Company", "View and edit company profile", true, "🏢"),
            menu(MenuKey::Settings, "Settings", "Adjust your preferences", true, "⚙️"),
        ],
        UserType::Candidate => vec![
            menu(MenuKey::Jobs, "Jobs", "Browse job opportunities", false, "💼"),
            menu(MenuKey::Messages, "Messages", "Chat with recruiters", false, "💬"),
            menu(MenuKey::Verify, "Verify", "Blockchain verification with Algorand", false, "✓"),
            menu(MenuKey::Profile, "Profile", "View and edit your profile", true, "👤"),
            menu(MenuKey::Settings, "Settings", "Adjust your preferences", true, "⚙️"),
            menu(MenuKey::Coach, "Coach", "AI-powered career coaching", false, "🤖"),
        ],
    }
}

pub fn menu_deck(ids: &mut IdAllocator, user_type: UserType) -> Vec<Card> {
    ids.ingest(menu_items(user_type).into_iter().map(CardPayload::Menu))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_samples_parse() {
        let jobs = sample_jobs().unwrap();
        assert_eq!(jobs.len(), 6);
        assert_eq!(jobs[0].company, "Google");
        assert_eq!(jobs[0].employment_type, "Full-time");

        let candidates = sample_candidates().unwrap();
        assert_eq!(candidates.len(), 6);
        assert_eq!(candidates[5].name, "Elena Rodriguez");
        let resume = candidates[0].resume.as_ref().unwrap();
        assert_eq!(resume.experience.len(), 2);
    }

    #[test]
    fn test_ids_are_unique_across_decks() {
        let mut ids = IdAllocator::new();
        let jobs = swipe_deck(&mut ids, UserType::Candidate, None).unwrap();
        let candidates = swipe_deck(&mut ids, UserType::Employer, None).unwrap();
        let menu = menu_deck(&mut ids, UserType::Employer);

        let all: HashSet<CardId> = jobs
            .iter()
            .chain(&candidates)
            .chain(&menu)
            .map(|c| c.id)
            .collect();
        assert_eq!(all.len(), jobs.len() + candidates.len() + menu.len());
    }

    #[test]
    fn test_duplicate_display_text_gets_distinct_ids() {
        let mut ids = IdAllocator::new();
        let job = sample_jobs().unwrap().remove(0);
        let cards = ids.ingest(vec![CardPayload::Job(job.clone()), CardPayload::Job(job)]);
        assert_eq!(cards[0].heading(), cards[1].heading());
        assert_ne!(cards[0].id, cards[1].id);
    }

    #[test]
    fn test_default_allocator_starts_at_one() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.next_id(), CardId(1));
        assert_eq!(ids.next_id(), CardId(2));
    }

    #[test]
    fn test_parse_deck_empty_and_minimal() {
        assert!(parse_deck("  \n", UserType::Candidate).unwrap().is_empty());

        let json = r#"[{"company": "Acme", "title": "Welder", "location": "Remote"}]"#;
        let deck = parse_deck(json, UserType::Candidate).unwrap();
        assert_eq!(deck.len(), 1);
        match &deck[0] {
            CardPayload::Job(job) => {
                assert_eq!(job.company, "Acme");
                assert!(job.requirements.is_empty());
                assert!(job.salary.is_none());
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_parse_deck_rejects_wrong_shape() {
        let json = r#"[{"company": "Acme", "title": "Welder", "location": "Remote"}]"#;
        assert!(parse_deck(json, UserType::Employer).is_err());
    }

    #[test]
    fn test_menu_items_per_user_type() {
        let employer: Vec<MenuKey> = menu_items(UserType::Employer).iter().map(|m| m.key).collect();
        assert!(employer.contains(&MenuKey::Dashboard));
        assert!(!employer.contains(&MenuKey::Jobs));

        let candidate: Vec<MenuKey> =
            menu_items(UserType::Candidate).iter().map(|m| m.key).collect();
        assert_eq!(candidate.first(), Some(&MenuKey::Jobs));
        assert!(!candidate.contains(&MenuKey::Dashboard));
    }
}
