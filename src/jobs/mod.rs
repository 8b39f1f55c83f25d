pub mod age;
pub mod store;

use chrono::{DateTime, Utc};

/// Opaque identifier of a job record. Assigned once by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application status. Doubles as the column a card lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobStatus {
    #[default]
    Wishlist,
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl JobStatus {
    /// Column display order.
    pub const ALL: [JobStatus; 5] = [
        Self::Wishlist,
        Self::Applied,
        Self::Interview,
        Self::Offer,
        Self::Rejected,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Wishlist => 0,
            Self::Applied => 1,
            Self::Interview => 2,
            Self::Offer => 3,
            Self::Rejected => 4,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Wishlist => "Wishlist",
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single job application (rendered as a card).
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub status: JobStatus,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub link: Option<String>,
    pub date_added: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Fields supplied when creating a job. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewJob {
    pub company: String,
    pub position: String,
    pub location: String,
    pub status: JobStatus,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub link: Option<String>,
}

impl NewJob {
    pub fn new(company: impl Into<String>, position: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            location: location.into(),
            ..Default::default()
        }
    }
}

/// Partial update. `None` leaves a field alone; for the optional text fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobPatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
    pub salary: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub link: Option<Option<String>>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Job {
    /// Merge the provided fields of `patch` into this job. Timestamps are left
    /// to the caller.
    pub fn apply(&mut self, patch: JobPatch) {
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(salary) = patch.salary {
            self.salary = salary;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_order_is_fixed() {
        let names: Vec<_> = JobStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["wishlist", "applied", "interview", "offer", "rejected"]);
    }

    #[test]
    fn status_index_roundtrips() {
        for (i, status) in JobStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
            assert_eq!(JobStatus::from_index(i), Some(*status));
        }
        assert_eq!(JobStatus::from_index(5), None);
    }

    #[test]
    fn status_next_and_prev_wrap() {
        assert_eq!(JobStatus::Rejected.next(), JobStatus::Wishlist);
        assert_eq!(JobStatus::Wishlist.prev(), JobStatus::Rejected);
        assert_eq!(JobStatus::Applied.next(), JobStatus::Interview);
    }

    #[test]
    fn status_defaults_to_wishlist() {
        assert_eq!(JobStatus::default(), JobStatus::Wishlist);
        assert_eq!(NewJob::new("Acme", "Engineer", "Remote").status, JobStatus::Wishlist);
    }

    #[test]
    fn apply_touches_only_provided_fields() {
        let now = Utc::now();
        let mut job = Job {
            id: JobId::from("a"),
            company: "Acme".into(),
            position: "Engineer".into(),
            location: "Remote".into(),
            status: JobStatus::Applied,
            salary: Some("100k".into()),
            notes: None,
            link: None,
            date_added: now,
            last_updated: now,
        };
        job.apply(JobPatch {
            position: Some("Staff Engineer".into()),
            salary: Some(None),
            ..Default::default()
        });
        assert_eq!(job.position, "Staff Engineer");
        assert_eq!(job.salary, None);
        assert_eq!(job.company, "Acme");
        assert_eq!(job.status, JobStatus::Applied);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(JobPatch::default().is_empty());
        assert!(!JobPatch { notes: Some(None), ..Default::default() }.is_empty());
    }
}
