use chrono::{DateTime, Duration, Utc};

use super::{Job, JobId, JobPatch, JobStatus, NewJob};

/// Source of "now" for timestamping mutations.
pub type Clock = fn() -> DateTime<Utc>;

/// A successful mutation, delivered to subscribers after it has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobChange {
    Added(JobId),
    Updated(JobId),
    Moved {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
    },
    Deleted(JobId),
}

type Observer = Box<dyn FnMut(&JobChange)>;

/// Owner of the canonical job collection.
///
/// All mutation goes through `add_job`, `update_job`, `delete_job` and
/// `move_job`. Unknown ids are silent no-ops and notify nobody.
pub struct JobStore {
    jobs: Vec<Job>,
    clock: Clock,
    observers: Vec<Observer>,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobStore")
            .field("jobs", &self.jobs)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl JobStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            jobs: Vec::new(),
            clock,
            observers: Vec::new(),
        }
    }

    /// Register a callback run after every successful mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&JobChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: JobChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    /// Timestamp for a mutation of a record last stamped at `previous`.
    /// Always strictly later than `previous`, even if the clock stalled.
    fn stamp_after(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = (self.clock)();
        if now > previous {
            now
        } else {
            previous + Duration::nanoseconds(1)
        }
    }

    fn position(&self, id: &JobId) -> Option<usize> {
        self.jobs.iter().position(|job| &job.id == id)
    }

    pub fn add_job(&mut self, fields: NewJob) -> JobId {
        let now = (self.clock)();
        let status = fields.status;
        let id = loop {
            let candidate = JobId::generate();
            if self.position(&candidate).is_none() {
                break candidate;
            }
        };
        self.jobs.push(Job {
            id: id.clone(),
            company: fields.company,
            position: fields.position,
            location: fields.location,
            status,
            salary: fields.salary,
            notes: fields.notes,
            link: fields.link,
            date_added: now,
            last_updated: now,
        });
        tracing::info!(id = %id, %status, "job added");
        self.notify(JobChange::Added(id.clone()));
        id
    }

    /// Merge `patch` into the job with `id`. Returns `false` if no such job.
    pub fn update_job(&mut self, id: &JobId, patch: JobPatch) -> bool {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id = %id, "update ignored: unknown job");
            return false;
        };
        let stamp = self.stamp_after(self.jobs[idx].last_updated);
        let job = &mut self.jobs[idx];
        job.apply(patch);
        job.last_updated = stamp;
        tracing::info!(id = %id, "job updated");
        self.notify(JobChange::Updated(id.clone()));
        true
    }

    /// Remove the job with `id`. Returns `false` if no such job.
    pub fn delete_job(&mut self, id: &JobId) -> bool {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id = %id, "delete ignored: unknown job");
            return false;
        };
        self.jobs.remove(idx);
        tracing::info!(id = %id, "job deleted");
        self.notify(JobChange::Deleted(id.clone()));
        true
    }

    /// Set the status of the job with `id`. Returns `false` if no such job.
    pub fn move_job(&mut self, id: &JobId, status: JobStatus) -> bool {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id = %id, "move ignored: unknown job");
            return false;
        };
        let stamp = self.stamp_after(self.jobs[idx].last_updated);
        let job = &mut self.jobs[idx];
        let from = job.status;
        job.status = status;
        job.last_updated = stamp;
        tracing::info!(id = %id, %from, to = %status, "job moved");
        self.notify(JobChange::Moved {
            id: id.clone(),
            from,
            to: status,
        });
        true
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs in `status`, in collection order.
    pub fn jobs_with_status(&self, status: JobStatus) -> Vec<&Job> {
        self.jobs.iter().filter(|job| job.status == status).collect()
    }

    pub fn count_by_status(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|job| job.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn acme() -> NewJob {
        NewJob::new("Acme", "Engineer", "Remote")
    }

    #[test]
    fn add_job_appends_with_equal_timestamps() {
        let mut store = JobStore::new();
        let id = store.add_job(acme());
        assert_eq!(store.len(), 1);
        let job = store.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Wishlist);
        assert_eq!(job.date_added, job.last_updated);
        assert_eq!(job.company, "Acme");
    }

    #[test]
    fn add_job_assigns_unique_ids() {
        let mut store = JobStore::new();
        let a = store.add_job(acme());
        let b = store.add_job(acme());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_job_keeps_insertion_order() {
        let mut store = JobStore::new();
        let a = store.add_job(NewJob::new("A", "p", "l"));
        let b = store.add_job(NewJob::new("B", "p", "l"));
        let ids: Vec<_> = store.jobs().iter().map(|j| j.id.clone()).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn update_job_changes_only_targeted_fields() {
        let mut store = JobStore::with_clock(fixed_now);
        let id = store.add_job(NewJob {
            salary: Some("90k".into()),
            ..acme()
        });
        let before = store.get(&id).unwrap().clone();

        assert!(store.update_job(
            &id,
            JobPatch {
                company: Some("Globex".into()),
                ..Default::default()
            },
        ));

        let after = store.get(&id).unwrap();
        assert_eq!(after.company, "Globex");
        assert_eq!(after.position, before.position);
        assert_eq!(after.location, before.location);
        assert_eq!(after.salary, before.salary);
        assert_eq!(after.status, before.status);
        assert_eq!(after.date_added, before.date_added);
        assert!(after.last_updated > before.last_updated);
    }

    #[test]
    fn update_job_advances_timestamp_even_with_stalled_clock() {
        let mut store = JobStore::with_clock(fixed_now);
        let id = store.add_job(acme());
        store.update_job(&id, JobPatch::default());
        let first = store.get(&id).unwrap().last_updated;
        store.update_job(&id, JobPatch::default());
        let second = store.get(&id).unwrap().last_updated;
        assert!(first > fixed_now());
        assert!(second > first);
    }

    #[test]
    fn update_unknown_id_leaves_collection_unchanged() {
        let mut store = JobStore::new();
        store.add_job(acme());
        let snapshot = store.jobs().to_vec();

        let changed = store.update_job(
            &JobId::from("nonexistent-id"),
            JobPatch {
                company: Some("X".into()),
                ..Default::default()
            },
        );

        assert!(!changed);
        assert_eq!(store.jobs(), snapshot.as_slice());
    }

    #[test]
    fn move_job_changes_only_that_record() {
        let mut store = JobStore::new();
        let a = store.add_job(acme());
        let b = store.add_job(NewJob::new("Globex", "Analyst", "Berlin"));
        let b_before = store.get(&b).unwrap().clone();

        assert!(store.move_job(&a, JobStatus::Interview));

        assert_eq!(store.get(&a).unwrap().status, JobStatus::Interview);
        assert_eq!(store.get(&b).unwrap(), &b_before);
    }

    #[test]
    fn move_job_updates_column_membership() {
        let mut store = JobStore::new();
        let id = store.add_job(acme());
        store.move_job(&id, JobStatus::Interview);

        assert!(store.jobs_with_status(JobStatus::Wishlist).is_empty());
        let interview = store.jobs_with_status(JobStatus::Interview);
        assert_eq!(interview.len(), 1);
        assert_eq!(interview[0].id, id);
    }

    #[test]
    fn move_job_refreshes_last_updated() {
        let mut store = JobStore::with_clock(fixed_now);
        let id = store.add_job(acme());
        store.move_job(&id, JobStatus::Applied);
        let job = store.get(&id).unwrap();
        assert!(job.last_updated > job.date_added);
    }

    #[test]
    fn move_unknown_id_is_noop() {
        let mut store = JobStore::new();
        store.add_job(acme());
        let snapshot = store.jobs().to_vec();
        assert!(!store.move_job(&JobId::from("missing"), JobStatus::Offer));
        assert_eq!(store.jobs(), snapshot.as_slice());
    }

    #[test]
    fn delete_first_of_two_keeps_second_unchanged() {
        let mut store = JobStore::new();
        let first = store.add_job(acme());
        let second = store.add_job(NewJob::new("Globex", "Analyst", "Berlin"));
        let second_before = store.get(&second).unwrap().clone();

        assert!(store.delete_job(&first));

        assert_eq!(store.jobs(), &[second_before]);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = JobStore::new();
        let id = store.add_job(acme());
        assert!(store.delete_job(&id));
        assert!(!store.delete_job(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn count_by_status_matches_filter() {
        let mut store = JobStore::new();
        let a = store.add_job(acme());
        store.add_job(acme());
        store.move_job(&a, JobStatus::Offer);
        assert_eq!(store.count_by_status(JobStatus::Wishlist), 1);
        assert_eq!(store.count_by_status(JobStatus::Offer), 1);
        assert_eq!(store.count_by_status(JobStatus::Rejected), 0);
    }

    #[test]
    fn observers_see_successful_mutations_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = JobStore::new();
        let sink = Rc::clone(&seen);
        store.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        let id = store.add_job(acme());
        store.move_job(&id, JobStatus::Applied);
        store.update_job(&id, JobPatch::default());
        store.update_job(&JobId::from("missing"), JobPatch::default());
        store.delete_job(&id);
        store.delete_job(&id);

        assert_eq!(
            *seen.borrow(),
            vec![
                JobChange::Added(id.clone()),
                JobChange::Moved {
                    id: id.clone(),
                    from: JobStatus::Wishlist,
                    to: JobStatus::Applied,
                },
                JobChange::Updated(id.clone()),
                JobChange::Deleted(id),
            ]
        );
    }
}
