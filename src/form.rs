use crate::app::TextBuffer;
use crate::jobs::store::JobStore;
use crate::jobs::{Job, JobId, JobPatch, JobStatus, NewJob};

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Company,
    Position,
    Location,
    Salary,
    Status,
    Link,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        Self::Company,
        Self::Position,
        Self::Location,
        Self::Salary,
        Self::Status,
        Self::Link,
        Self::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Position => "Position",
            Self::Location => "Location",
            Self::Salary => "Salary",
            Self::Status => "Status",
            Self::Link => "Job Link",
            Self::Notes => "Notes",
        }
    }

    pub fn required(self) -> bool {
        matches!(self, Self::Company | Self::Position | Self::Location)
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Salary => "e.g. $80,000 - $100,000",
            Self::Link => "https://...",
            Self::Notes => "Add any additional notes or reminders...",
            _ => "",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Why a submission was blocked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Required(FormField),
    #[error("not a valid URL: {0}")]
    InvalidLink(String),
}

impl FormError {
    /// The field the error should be shown next to.
    pub fn field(&self) -> FormField {
        match self {
            Self::Required(field) => *field,
            Self::InvalidLink(_) => FormField::Link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit(JobId),
}

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Created(JobId),
    Updated(JobId),
    /// Edit submitted with no changes, or the job no longer exists.
    Unchanged,
}

/// Controlled state of the add/edit job dialog.
#[derive(Debug, Clone)]
pub struct JobForm {
    pub kind: FormKind,
    pub company: TextBuffer,
    pub position: TextBuffer,
    pub location: TextBuffer,
    pub salary: TextBuffer,
    pub status: JobStatus,
    pub link: TextBuffer,
    pub notes: TextBuffer,
    pub focus: FormField,
    pub error: Option<FormError>,
}

fn optional(buf: &TextBuffer) -> Option<String> {
    let trimmed = buf.input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn buffer_from(value: Option<&str>) -> TextBuffer {
    TextBuffer::new(value.unwrap_or_default().to_string())
}

impl JobForm {
    /// Blank creation form; status defaults to wishlist.
    pub fn create() -> Self {
        Self {
            kind: FormKind::Create,
            company: TextBuffer::empty(),
            position: TextBuffer::empty(),
            location: TextBuffer::empty(),
            salary: TextBuffer::empty(),
            status: JobStatus::default(),
            link: TextBuffer::empty(),
            notes: TextBuffer::empty(),
            focus: FormField::Company,
            error: None,
        }
    }

    /// Edit form pre-filled from `job`.
    pub fn edit(job: &Job) -> Self {
        Self {
            kind: FormKind::Edit(job.id.clone()),
            company: TextBuffer::new(job.company.clone()),
            position: TextBuffer::new(job.position.clone()),
            location: TextBuffer::new(job.location.clone()),
            salary: buffer_from(job.salary.as_deref()),
            status: job.status,
            link: buffer_from(job.link.as_deref()),
            notes: buffer_from(job.notes.as_deref()),
            focus: FormField::Company,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Create => "Add New Job",
            FormKind::Edit(_) => "Edit Job",
        }
    }

    /// Text buffer behind `field`; `None` for the status selector.
    pub fn buffer(&self, field: FormField) -> Option<&TextBuffer> {
        match field {
            FormField::Company => Some(&self.company),
            FormField::Position => Some(&self.position),
            FormField::Location => Some(&self.location),
            FormField::Salary => Some(&self.salary),
            FormField::Status => None,
            FormField::Link => Some(&self.link),
            FormField::Notes => Some(&self.notes),
        }
    }

    pub fn buffer_mut(&mut self, field: FormField) -> Option<&mut TextBuffer> {
        match field {
            FormField::Company => Some(&mut self.company),
            FormField::Position => Some(&mut self.position),
            FormField::Location => Some(&mut self.location),
            FormField::Salary => Some(&mut self.salary),
            FormField::Status => None,
            FormField::Link => Some(&mut self.link),
            FormField::Notes => Some(&mut self.notes),
        }
    }

    /// Buffer of the focused field, if it is a text field.
    pub fn focused_buffer_mut(&mut self) -> Option<&mut TextBuffer> {
        self.buffer_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn cycle_status(&mut self, forward: bool) {
        self.status = if forward { self.status.next() } else { self.status.prev() };
    }

    /// Check required fields and the link, producing trimmed creation fields.
    pub fn validate(&self) -> Result<NewJob, FormError> {
        let required = |field: FormField, buf: &TextBuffer| {
            let value = buf.input.trim();
            if value.is_empty() {
                Err(FormError::Required(field))
            } else {
                Ok(value.to_string())
            }
        };
        let company = required(FormField::Company, &self.company)?;
        let position = required(FormField::Position, &self.position)?;
        let location = required(FormField::Location, &self.location)?;

        let link = optional(&self.link);
        if let Some(ref link) = link {
            if url::Url::parse(link).is_err() {
                return Err(FormError::InvalidLink(link.clone()));
            }
        }

        Ok(NewJob {
            company,
            position,
            location,
            status: self.status,
            salary: optional(&self.salary),
            notes: optional(&self.notes),
            link,
        })
    }

    /// Validate and hand the fields to the store. On failure the error is
    /// recorded, focus jumps to the offending field, and the store is untouched.
    pub fn submit(&mut self, store: &mut JobStore) -> Result<Submitted, FormError> {
        let fields = match self.validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.focus = e.field();
                self.error = Some(e.clone());
                return Err(e);
            }
        };
        self.error = None;

        match &self.kind {
            FormKind::Create => Ok(Submitted::Created(store.add_job(fields))),
            FormKind::Edit(id) => {
                let Some(job) = store.get(id) else {
                    return Ok(Submitted::Unchanged);
                };
                let patch = diff(job, fields);
                if patch.is_empty() {
                    return Ok(Submitted::Unchanged);
                }
                store.update_job(id, patch);
                Ok(Submitted::Updated(id.clone()))
            }
        }
    }
}

/// Patch carrying only the fields of `fields` that differ from `job`.
fn diff(job: &Job, fields: NewJob) -> JobPatch {
    fn changed<T: PartialEq>(old: &T, new: T) -> Option<T> {
        (*old != new).then_some(new)
    }
    JobPatch {
        company: changed(&job.company, fields.company),
        position: changed(&job.position, fields.position),
        location: changed(&job.location, fields.location),
        status: changed(&job.status, fields.status),
        salary: changed(&job.salary, fields.salary),
        notes: changed(&job.notes, fields.notes),
        link: changed(&job.link, fields.link),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> JobForm {
        let mut form = JobForm::create();
        form.company = TextBuffer::new("Acme".into());
        form.position = TextBuffer::new("Engineer".into());
        form.location = TextBuffer::new("Remote".into());
        form
    }

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut form = JobForm::create();
        for expected in FormField::ALL.iter().skip(1) {
            form.focus_next();
            assert_eq!(form.focus, *expected);
        }
        form.focus_next();
        assert_eq!(form.focus, FormField::Company);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Notes);
    }

    #[test]
    fn test_status_field_has_no_buffer() {
        let mut form = JobForm::create();
        form.focus = FormField::Status;
        assert!(form.focused_buffer_mut().is_none());
        assert!(form.buffer(FormField::Notes).is_some());
    }

    #[test]
    fn test_required_fields_block_submission() {
        let mut store = JobStore::new();
        let mut form = filled();
        form.position = TextBuffer::new("   ".into());
        form.focus = FormField::Notes;

        let err = form.submit(&mut store).unwrap_err();

        assert_eq!(err, FormError::Required(FormField::Position));
        assert_eq!(form.focus, FormField::Position);
        assert_eq!(form.error, Some(err));
        assert!(store.is_empty());
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let form = JobForm::create();
        assert_eq!(form.validate(), Err(FormError::Required(FormField::Company)));
    }

    #[test]
    fn test_invalid_link_blocks_submission() {
        let mut store = JobStore::new();
        let mut form = filled();
        form.link = TextBuffer::new("example.com/jobs".into());

        let err = form.submit(&mut store).unwrap_err();

        assert!(matches!(err, FormError::InvalidLink(_)));
        assert_eq!(form.focus, FormField::Link);
        assert!(store.is_empty());
    }

    #[test]
    fn test_valid_link_accepted() {
        let mut form = filled();
        form.link = TextBuffer::new(" https://acme.example/jobs/42 ".into());
        let fields = form.validate().unwrap();
        assert_eq!(fields.link.as_deref(), Some("https://acme.example/jobs/42"));
    }

    #[test]
    fn test_submit_creates_wishlist_job_by_default() {
        let mut store = JobStore::new();
        let mut form = filled();
        form.salary = TextBuffer::new("".into());

        let Submitted::Created(id) = form.submit(&mut store).unwrap() else {
            panic!("expected a created job");
        };

        let job = store.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Wishlist);
        assert_eq!(job.company, "Acme");
        assert_eq!(job.salary, None);
        assert_eq!(job.date_added, job.last_updated);
    }

    #[test]
    fn test_submit_trims_values() {
        let mut form = filled();
        form.company = TextBuffer::new("  Acme  ".into());
        form.notes = TextBuffer::new(" call back friday ".into());
        let fields = form.validate().unwrap();
        assert_eq!(fields.company, "Acme");
        assert_eq!(fields.notes.as_deref(), Some("call back friday"));
    }

    #[test]
    fn test_status_selection_is_used() {
        let mut form = filled();
        form.cycle_status(true);
        form.cycle_status(true);
        assert_eq!(form.validate().unwrap().status, JobStatus::Interview);
        form.cycle_status(false);
        assert_eq!(form.status, JobStatus::Applied);
    }

    #[test]
    fn test_edit_prefills_and_updates_changed_fields_only() {
        let mut store = JobStore::new();
        let id = store.add_job(NewJob {
            salary: Some("90k".into()),
            ..NewJob::new("Acme", "Engineer", "Remote")
        });
        let before = store.get(&id).unwrap().clone();

        let mut form = JobForm::edit(&before);
        assert_eq!(form.salary.input, "90k");
        assert_eq!(form.title(), "Edit Job");
        form.location = TextBuffer::new("Berlin".into());

        assert_eq!(form.submit(&mut store), Ok(Submitted::Updated(id.clone())));
        let after = store.get(&id).unwrap();
        assert_eq!(after.location, "Berlin");
        assert_eq!(after.salary, before.salary);
        assert!(after.last_updated > before.last_updated);
    }

    #[test]
    fn test_edit_without_changes_does_not_touch_store() {
        let mut store = JobStore::new();
        let id = store.add_job(NewJob::new("Acme", "Engineer", "Remote"));
        let before = store.jobs().to_vec();

        let mut form = JobForm::edit(store.get(&id).unwrap());
        assert_eq!(form.submit(&mut store), Ok(Submitted::Unchanged));
        assert_eq!(store.jobs(), before.as_slice());
    }

    #[test]
    fn test_edit_can_clear_optional_field() {
        let mut store = JobStore::new();
        let id = store.add_job(NewJob {
            notes: Some("ping recruiter".into()),
            ..NewJob::new("Acme", "Engineer", "Remote")
        });
        let mut form = JobForm::edit(store.get(&id).unwrap());
        form.notes = TextBuffer::empty();
        form.submit(&mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().notes, None);
    }

    #[test]
    fn test_error_message_names_field() {
        assert_eq!(FormError::Required(FormField::Location).to_string(), "Location is required");
    }
}
