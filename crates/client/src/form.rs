//! Form controller: the client-side state machine behind the record
//! entry form.
//!
//! Pure state, no I/O. Edits and completions go in as method calls;
//! anything that needs the network comes back out as an [`Effect`] for
//! the driver to execute. The driver owns the debounce timer: a
//! [`Effect::ScheduleNameSearch`] arms (or re-arms) it, and the search
//! request is only issued when the timer fires without a newer edit.

use std::collections::BTreeSet;

use codetrack_core::record::RecordStatus;

use crate::api::RecordView;

/// Minimum person-name length before a search is scheduled; shorter
/// input clears the result list instead.
pub const MIN_SEARCH_LEN: usize = 2;

/// The editable form fields, exactly as typed. No client-side
/// normalization: the API re-normalizes on every write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub code: String,
    pub person_name: String,
    pub link: String,
    pub description: String,
    pub status: RecordStatus,
}

/// Whether submission will create a new record or update a fetched one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Coarse view state, driving what the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Loading,
    ResultsVisible,
}

/// Side effects the driver must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up a record by code now (code-field blur).
    FetchRecord { code: String },
    /// Arm the debounce timer; search by name when it fires.
    ScheduleNameSearch { query: String },
    /// Cancel any pending search and hide the result list.
    ClearResults,
}

/// What a successful submit should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(FormFields),
    Update { code: String, fields: FormFields },
}

/// Submit-time validation failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
}

/// Client form state machine. See the module docs for the event flow.
#[derive(Debug, Default)]
pub struct FormController {
    fields: FormFields,
    original: Option<RecordView>,
    modified: BTreeSet<&'static str>,
    loading: bool,
    search_results: Vec<RecordView>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn mode(&self) -> Mode {
        if self.original.is_some() {
            Mode::Update
        } else {
            Mode::Create
        }
    }

    pub fn state(&self) -> FormState {
        if self.loading {
            FormState::Loading
        } else if !self.search_results.is_empty() {
            FormState::ResultsVisible
        } else {
            FormState::Editing
        }
    }

    pub fn search_results(&self) -> &[RecordView] {
        &self.search_results
    }

    /// Fields edited away from the fetched original (update mode only).
    pub fn modified_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modified.iter().copied()
    }

    // -----------------------------------------------------------------------
    // Field edits
    // -----------------------------------------------------------------------

    /// Edit the code field. Ignored in update mode: the code is the
    /// record's identity and cannot be changed.
    pub fn edit_code(&mut self, value: &str) {
        if self.mode() == Mode::Update {
            return;
        }
        self.fields.code = value.to_string();
    }

    /// Code-field blur: request a lookup when the code is non-blank.
    pub fn blur_code(&mut self) -> Option<Effect> {
        let code = self.fields.code.trim();
        if code.is_empty() {
            return None;
        }
        Some(Effect::FetchRecord {
            code: code.to_string(),
        })
    }

    /// Edit the person-name field. Schedules a debounced search, or
    /// clears results when the input is too short to search on.
    pub fn edit_person_name(&mut self, value: &str) -> Effect {
        self.fields.person_name = value.to_string();
        self.track_modification("personName", |orig| orig.person_name.clone());

        if value.len() < MIN_SEARCH_LEN {
            self.search_results.clear();
            Effect::ClearResults
        } else {
            Effect::ScheduleNameSearch {
                query: value.to_string(),
            }
        }
    }

    pub fn edit_link(&mut self, value: &str) {
        self.fields.link = value.to_string();
        self.track_modification("link", |orig| orig.link.clone().unwrap_or_default());
    }

    pub fn edit_description(&mut self, value: &str) {
        self.fields.description = value.to_string();
        self.track_modification("description", |orig| {
            orig.description.clone().unwrap_or_default()
        });
    }

    pub fn set_status(&mut self, status: RecordStatus) {
        self.fields.status = status;
        self.track_modification("status", |orig| orig.status.as_str().to_string());
    }

    // -----------------------------------------------------------------------
    // Completions from the driver
    // -----------------------------------------------------------------------

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// A code lookup came back with a record: fill the form and switch
    /// to update mode.
    pub fn on_record_fetched(&mut self, record: RecordView) {
        self.fill_from(record);
    }

    /// A code lookup 404'd: keep the entered code (uppercased, as the
    /// form displays the canonical form) and stay in create mode.
    pub fn on_fetch_not_found(&mut self, code: &str) {
        self.fields = FormFields {
            code: code.trim().to_uppercase(),
            ..FormFields::default()
        };
        self.original = None;
        self.modified.clear();
    }

    /// Debounced name search results arrived.
    pub fn on_search_results(&mut self, results: Vec<RecordView>) {
        self.search_results = results;
    }

    /// Pick one of the displayed search results; fills the form and
    /// switches to update mode. Out-of-range indices are ignored.
    pub fn select_result(&mut self, index: usize) -> bool {
        if index >= self.search_results.len() {
            return false;
        }
        let record = self.search_results[index].clone();
        self.fill_from(record);
        self.search_results.clear();
        true
    }

    // -----------------------------------------------------------------------
    // Submit / reset
    // -----------------------------------------------------------------------

    /// Validate the form and produce the request to send. The caller
    /// invokes [`Self::reset`] once the request succeeds.
    pub fn submit(&self) -> Result<Submission, FormError> {
        if self.fields.code.trim().is_empty() {
            return Err(FormError::Missing("code"));
        }
        if self.fields.person_name.trim().is_empty() {
            return Err(FormError::Missing("personName"));
        }

        Ok(match self.mode() {
            Mode::Create => Submission::Create(self.fields.clone()),
            Mode::Update => Submission::Update {
                code: self.fields.code.clone(),
                fields: self.fields.clone(),
            },
        })
    }

    /// Clear every piece of state back to a blank create form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn fill_from(&mut self, record: RecordView) {
        self.fields = FormFields {
            code: record.code.clone(),
            person_name: record.person_name.clone(),
            link: record.link.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            status: record.status,
        };
        self.original = Some(record);
        self.modified.clear();
    }

    /// Flag `field` as modified when its current value differs from the
    /// fetched original; unflag it when the edit reverts the change.
    fn track_modification(
        &mut self,
        field: &'static str,
        original_value: impl Fn(&RecordView) -> String,
    ) {
        let Some(original) = &self.original else {
            return;
        };
        let current = match field {
            "personName" => self.fields.person_name.clone(),
            "link" => self.fields.link.clone(),
            "description" => self.fields.description.clone(),
            "status" => self.fields.status.as_str().to_string(),
            _ => return,
        };
        if current == original_value(original) {
            self.modified.remove(field);
        } else {
            self.modified.insert(field);
        }
    }
}
