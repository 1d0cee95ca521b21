//! Registration workflow: validate the submission, check for a duplicate
//! register number, assign the next serial number, append the row.
//!
//! Duplicate checking and serial assignment are two independent reads before
//! an unconditional append. The external store offers no conditional-append,
//! so two concurrent submissions can both pass the duplicate check or compute
//! the same serial. A process-local lock would not close that window (the
//! sheet has other clients), so the race is documented rather than hidden.

use std::sync::Arc;

use clubreg_adapters::{Registrant, SheetStore, REGISTER_NO_COLUMN};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One registration form submission.
#[derive(Deserialize, Debug, Clone)]
pub struct RegistrationInput {
    pub name: String,
    pub register_no: String,
    pub email: String,
    pub mobile: String,
    pub gender: Gender,
    pub stay_type: StayType,
    pub department: Department,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayType {
    Hostel,
    #[serde(rename = "Day-Scholar")]
    DayScholar,
}

impl StayType {
    pub fn as_str(self) -> &'static str {
        match self {
            StayType::Hostel => "Hostel",
            StayType::DayScholar => "Day-Scholar",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "AI")]
    Ai,
}

impl Department {
    pub fn as_str(self) -> &'static str {
        match self {
            Department::Cse => "CSE",
            Department::Ai => "AI",
        }
    }
}

/// Runs submission attempts against an injected store handle.
pub struct RegistrationService {
    store: Arc<dyn SheetStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Run one submission attempt end to end.
    ///
    /// On success the returned record echoes every submitted field plus the
    /// assigned serial, exactly as stored.
    pub async fn submit(&self, input: RegistrationInput) -> Result<Registrant, AppError> {
        validate(&input)?;

        if self.is_duplicate(&input.register_no).await? {
            tracing::info!(register_no = %input.register_no, "rejected duplicate registration");
            return Err(AppError::DuplicateRegistration(input.register_no));
        }

        let serial_no = self.next_serial().await?;

        // Free text is stored verbatim and untrimmed; multi-selects are
        // joined with ", " (empty selection stores "").
        let record = Registrant {
            serial_no,
            name: input.name,
            register_no: input.register_no,
            email: input.email,
            mobile: input.mobile,
            gender: input.gender.as_str().to_string(),
            stay_type: input.stay_type.as_str().to_string(),
            department: input.department.as_str().to_string(),
            interests: input.interests.join(", "),
            languages: input.languages.join(", "),
        };

        self.store.append_row(&record.to_row()).await?;
        tracing::info!(serial_no, register_no = %record.register_no, "registration stored");

        Ok(record)
    }

    /// Register numbers are matched with exact, case-sensitive equality.
    async fn is_duplicate(&self, register_no: &str) -> Result<bool, AppError> {
        let column = self.store.fetch_column(REGISTER_NO_COLUMN).await?;
        Ok(column.iter().skip(1).any(|existing| existing == register_no))
    }

    /// Serial No = number of existing data rows + 1 (header excluded).
    async fn next_serial(&self) -> Result<u32, AppError> {
        let rows = self.store.fetch_all_rows().await?;
        Ok(rows.len() as u32 + 1)
    }
}

fn validate(input: &RegistrationInput) -> Result<(), AppError> {
    let mut missing = Vec::new();
    for (field, value) in [
        ("name", &input.name),
        ("register_no", &input.register_no),
        ("email", &input.email),
        ("mobile", &input.mobile),
    ] {
        if value.trim().is_empty() {
            missing.push(field.to_string());
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(missing))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use clubreg_adapters::{InMemorySheetStore, StoreError};

    use super::*;

    /// Store wrapper counting adapter calls, so the tests can assert how
    /// often the workflow touches the store.
    struct RecordingStore {
        inner: InMemorySheetStore,
        appends: AtomicUsize,
        reads: AtomicUsize,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                inner: InMemorySheetStore::new(),
                appends: AtomicUsize::new(0),
                reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SheetStore for RecordingStore {
        async fn fetch_all_rows(&self) -> Result<Vec<Registrant>, StoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_all_rows().await
        }

        async fn fetch_column(&self, index: usize) -> Result<Vec<String>, StoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_column(index).await
        }

        async fn append_row(&self, values: &[String]) -> Result<(), StoreError> {
            self.appends.fetch_add(1, Ordering::SeqCst);
            self.inner.append_row(values).await
        }
    }

    fn input(name: &str, register_no: &str) -> RegistrationInput {
        RegistrationInput {
            name: name.to_string(),
            register_no: register_no.to_string(),
            email: format!("{}@example.com", register_no),
            mobile: "9876543210".to_string(),
            gender: Gender::Male,
            stay_type: StayType::Hostel,
            department: Department::Cse,
            interests: Vec::new(),
            languages: Vec::new(),
        }
    }

    #[tokio::test]
    async fn valid_submission_appends_exactly_once() {
        let store = Arc::new(RecordingStore::new());
        let service = RegistrationService::new(store.clone());

        let before = store.inner.fetch_all_rows().await.unwrap().len();
        service.submit(input("Asha", "21CS001")).await.unwrap();
        let after = store.inner.fetch_all_rows().await.unwrap().len();

        assert_eq!(store.appends.load(Ordering::SeqCst), 1);
        assert_eq!(after, before + 1);
    }

    #[tokio::test]
    async fn serials_count_up_from_one() {
        let service = RegistrationService::new(Arc::new(InMemorySheetStore::new()));
        for (i, reg) in ["21CS001", "21CS002", "21CS003"].iter().enumerate() {
            let record = service.submit(input("Member", reg)).await.unwrap();
            assert_eq!(record.serial_no, i as u32 + 1);
        }
    }

    #[tokio::test]
    async fn duplicate_register_no_is_rejected_without_append() {
        let store = Arc::new(RecordingStore::new());
        let service = RegistrationService::new(store.clone());

        service.submit(input("Asha", "21CS001")).await.unwrap();
        let err = service.submit(input("Ravi", "21CS001")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateRegistration(reg) if reg == "21CS001"));
        assert_eq!(store.appends.load(Ordering::SeqCst), 1);

        // A fresh register number still goes through, with the next serial.
        let record = service.submit(input("Ravi", "21CS002")).await.unwrap();
        assert_eq!(record.serial_no, 2);
    }

    #[tokio::test]
    async fn duplicate_match_is_case_sensitive() {
        let service = RegistrationService::new(Arc::new(InMemorySheetStore::new()));
        service.submit(input("Asha", "21cs001")).await.unwrap();
        let record = service.submit(input("Ravi", "21CS001")).await.unwrap();
        assert_eq!(record.serial_no, 2);
    }

    #[tokio::test]
    async fn blank_required_fields_fail_before_any_store_access() {
        let store = Arc::new(RecordingStore::new());
        let service = RegistrationService::new(store.clone());

        let mut submission = input("  ", "21CS001");
        submission.email = String::new();
        let err = service.submit(submission).await.unwrap_err();

        assert!(matches!(
            &err,
            AppError::Validation(fields) if fields == &["name".to_string(), "email".to_string()]
        ));
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
        assert_eq!(store.appends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn multi_selects_join_with_comma_space() {
        let service = RegistrationService::new(Arc::new(InMemorySheetStore::new()));

        let mut submission = input("Asha", "21CS001");
        submission.interests = vec!["AI".to_string(), "Full Stack".to_string()];
        let record = service.submit(submission).await.unwrap();
        assert_eq!(record.interests, "AI, Full Stack");
        assert_eq!(record.languages, "");
    }

    #[tokio::test]
    async fn free_text_is_stored_verbatim() {
        let service = RegistrationService::new(Arc::new(InMemorySheetStore::new()));
        let record = service.submit(input("  Asha K ", "21CS001")).await.unwrap();
        assert_eq!(record.name, "  Asha K ");
    }
}
