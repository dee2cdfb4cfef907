use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Positive horizontal displacement is a like.
    pub fn from_dx(dx: i32) -> Option<Self> {
        match dx.signum() {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Candidate,
    Employer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Candidate => "candidate",
            UserType::Employer => "employer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "candidate" => Some(UserType::Candidate),
            "employer" => Some(UserType::Employer),
            _ => None,
        }
    }

    /// Label for a left swipe on this user's swipe screen.
    pub fn pass_label(&self) -> &'static str {
        match self {
            UserType::Candidate => "Not Interested",
            UserType::Employer => "Pass",
        }
    }

    pub fn rejected_label(&self) -> &'static str {
        match self {
            UserType::Candidate => "Rejected",
            UserType::Employer => "Passed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub company: String,
    pub title: String,
    pub location: String,
    #[serde(rename = "type", default)]
    pub employment_type: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub posted: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub duration: String,
    #[serde(default)]
    pub honors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub experience: Vec<WorkEntry>,
    pub education: Option<Education>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    pub location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resume: Option<Resume>,
}

/// Hub menu entries. The key drives navigation, see `view::view_for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuKey {
    Jobs,
    Candidates,
    Messages,
    Dashboard,
    UploadJobs,
    Verify,
    Profile,
    Company,
    Settings,
    Coach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: MenuKey,
    pub label: String,
    pub description: String,
    pub flippable: bool,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardPayload {
    Job(JobPosting),
    Candidate(CandidateProfile),
    Menu(MenuItem),
}

/// One swipeable unit. `id` is assigned at ingestion; the payload is only
/// ever read by renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub payload: CardPayload,
}

impl Card {
    /// Heading text: company for jobs, name for candidates, label for menu items.
    pub fn heading(&self) -> &str {
        match &self.payload {
            CardPayload::Job(job) => &job.company,
            CardPayload::Candidate(c) => &c.name,
            CardPayload::Menu(item) => &item.label,
        }
    }

    pub fn subtitle(&self) -> &str {
        match &self.payload {
            CardPayload::Job(job) => &job.title,
            CardPayload::Candidate(c) => &c.title,
            CardPayload::Menu(item) => &item.description,
        }
    }

    /// Text fed to `layout::match_score`. Menu items have no score.
    pub fn match_seed(&self) -> Option<&str> {
        match &self.payload {
            CardPayload::Job(job) => Some(&job.title),
            CardPayload::Candidate(c) => Some(&c.name),
            CardPayload::Menu(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub card: Card,
    pub direction: Direction,
}
