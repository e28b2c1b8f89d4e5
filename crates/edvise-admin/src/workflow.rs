//! The admin workflow controller.
//!
//! [`AdminWorkflow`] is a cheap-clone handle (Arc internals) so flows can be
//! spawned from a UI loop. State is locked only between awaits; every flow
//! captures the controller generation before its remote call and applies the
//! result only if the view has not been torn down in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use edvise_assets::AssetStore;
use edvise_auth::{SessionGate, SessionState};
use edvise_core::{
    AssetCategory, AssetSource, College, CollegeDraft, Error, Logo, LogoDraft, Result,
};
use edvise_store::RecordStore;

use crate::filter::{filter_colleges, filter_logos};
use crate::notify::NotificationSlot;

/// Which asset field of the college draft an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollegeAssetField {
    /// Campus image.
    Image,
    /// College crest/logo.
    Logo,
    /// Brochure document.
    Brochure,
}

impl CollegeAssetField {
    fn category(self) -> AssetCategory {
        match self {
            CollegeAssetField::Image => AssetCategory::CollegeImage,
            CollegeAssetField::Logo => AssetCategory::CollegeLogo,
            CollegeAssetField::Brochure => AssetCategory::CollegeBrochure,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CollegeAssetField::Image => "Image",
            CollegeAssetField::Logo => "Logo",
            CollegeAssetField::Brochure => "Brochure",
        }
    }
}

#[derive(Default)]
struct AdminState {
    colleges: Vec<College>,
    logos: Vec<Logo>,
    college_draft: CollegeDraft,
    logo_draft: LogoDraft,
    editing_college: Option<College>,
    editing_logo: Option<Logo>,
    pending_delete_college: Option<String>,
    pending_delete_logo: Option<i64>,
}

/// Orchestrates the College and Logo CRUD workflows.
#[derive(Clone)]
pub struct AdminWorkflow {
    store: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
    gate: SessionGate,
    notifications: Arc<NotificationSlot>,
    state: Arc<Mutex<AdminState>>,
    generation: Arc<AtomicU64>,
}

impl AdminWorkflow {
    /// Create a controller over the given collaborators.
    pub fn new(store: Arc<dyn RecordStore>, assets: Arc<dyn AssetStore>, gate: SessionGate) -> Self {
        Self {
            store,
            assets,
            gate,
            notifications: Arc::new(NotificationSlot::new()),
            state: Arc::new(Mutex::new(AdminState::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The shared notification slot.
    pub fn notifications(&self) -> &NotificationSlot {
        &self.notifications
    }

    /// The session gate protecting this view.
    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Mount the admin view: one session check, then the initial load.
    ///
    /// When no session is present this returns without a single store call;
    /// the caller's move is a redirect to login.
    pub async fn mount(&self) -> SessionState {
        let session = self.gate.check().await;
        if session.is_authenticated() {
            let _ = self.refresh().await;
        }
        session
    }

    /// Tear the view down: late flow results and the notification timer must
    /// not touch state after this.
    pub fn teardown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.notifications.dismiss();
    }

    /// Sign out and tear down.
    pub async fn logout(&self) -> Result<()> {
        let result = self.gate.logout().await;
        self.teardown();
        result
    }

    /// Reload both lists from the store.
    ///
    /// This is the only way state ever changes after a mutation: mutation
    /// responses are never spliced in locally.
    pub async fn refresh(&self) -> Result<()> {
        let generation = self.current_generation();
        let fetched = async {
            let colleges = self.store.list_colleges().await?;
            let logos = self.store.list_logos().await?;
            Ok::<_, Error>((colleges, logos))
        }
        .await;

        if self.is_stale(generation) {
            tracing::debug!("Discarding refresh result for a torn-down view");
            return Ok(());
        }
        match fetched {
            Ok((colleges, logos)) => {
                self.with_state(|s| {
                    s.colleges = colleges;
                    s.logos = logos;
                });
                Ok(())
            }
            Err(err) => {
                self.notifications
                    .error("There was a problem loading the records. Please try again.");
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Snapshot of the college list, store order.
    pub fn colleges(&self) -> Vec<College> {
        self.with_state(|s| s.colleges.clone())
    }

    /// Snapshot of the logo list, store order.
    pub fn logos(&self) -> Vec<Logo> {
        self.with_state(|s| s.logos.clone())
    }

    /// Colleges matching `query` by name or location.
    pub fn filtered_colleges(&self, query: &str) -> Vec<College> {
        self.with_state(|s| filter_colleges(&s.colleges, query).into_iter().cloned().collect())
    }

    /// Logos matching `query` by name.
    pub fn filtered_logos(&self, query: &str) -> Vec<Logo> {
        self.with_state(|s| filter_logos(&s.logos, query).into_iter().cloned().collect())
    }

    // ------------------------------------------------------------------
    // College flow
    // ------------------------------------------------------------------

    /// Current college draft.
    pub fn college_draft(&self) -> CollegeDraft {
        self.with_state(|s| s.college_draft.clone())
    }

    /// Replace the college draft with edited form fields.
    pub fn set_college_draft(&self, draft: CollegeDraft) {
        self.with_state(|s| s.college_draft = draft);
    }

    /// Seed the draft from an existing record and mark it as being edited.
    pub fn begin_edit_college(&self, id: &str) -> bool {
        self.with_state(|s| {
            let Some(college) = s.colleges.iter().find(|c| c.id == id).cloned() else {
                return false;
            };
            s.college_draft = CollegeDraft::from_record(&college);
            s.editing_college = Some(college);
            true
        })
    }

    /// Abandon the edit, clearing draft and pointer.
    pub fn cancel_edit_college(&self) {
        self.with_state(|s| {
            s.editing_college = None;
            s.college_draft = CollegeDraft::default();
        });
    }

    /// The record currently being edited, if any.
    pub fn editing_college(&self) -> Option<College> {
        self.with_state(|s| s.editing_college.clone())
    }

    /// Submit the college draft: create, or full-overwrite update when an
    /// edit is in progress.
    pub async fn submit_college(&self) -> Result<()> {
        self.require_session()?;
        let generation = self.current_generation();
        let (draft, editing) =
            self.with_state(|s| (s.college_draft.clone(), s.editing_college.clone()));

        if let Err(err) = draft.normalize() {
            tracing::warn!(error = %err, "College draft rejected locally");
            self.notifications
                .error("Please provide both name and location for the college.");
            return Err(err);
        }

        let result = match &editing {
            Some(college) => self.store.update_college(&college.id, &draft).await,
            None => self.store.create_college(&draft).await,
        };

        if self.is_stale(generation) {
            tracing::debug!("Discarding college submit result for a torn-down view");
            return Ok(());
        }
        match result {
            Ok(saved) => {
                self.with_state(|s| {
                    s.college_draft = CollegeDraft::default();
                    s.editing_college = None;
                });
                let verb = if editing.is_some() { "updated" } else { "added" };
                self.notifications
                    .success(format!("{} has been successfully {verb}.", saved.name));
                self.refresh().await
            }
            Err(err) => {
                let verb = if editing.is_some() { "updating" } else { "adding" };
                self.notifications.error(format!(
                    "There was a problem {verb} the college. Please try again."
                ));
                Err(err)
            }
        }
    }

    /// Arm the two-step delete for a college. Returns `false` for an unknown
    /// id.
    pub fn request_delete_college(&self, id: &str) -> bool {
        self.with_state(|s| {
            if s.colleges.iter().any(|c| c.id == id) {
                s.pending_delete_college = Some(id.to_string());
                true
            } else {
                false
            }
        })
    }

    /// The college id awaiting delete confirmation.
    pub fn pending_delete_college(&self) -> Option<String> {
        self.with_state(|s| s.pending_delete_college.clone())
    }

    /// Disarm the pending college delete.
    pub fn cancel_delete_college(&self) {
        self.with_state(|s| s.pending_delete_college = None);
    }

    /// Fire the armed college delete.
    pub async fn confirm_delete_college(&self) -> Result<()> {
        self.require_session()?;
        let generation = self.current_generation();
        let Some(id) = self.with_state(|s| s.pending_delete_college.take()) else {
            return Err(Error::validation("no delete is pending confirmation"));
        };

        let result = self.store.delete_college(&id).await;
        if self.is_stale(generation) {
            tracing::debug!("Discarding college delete result for a torn-down view");
            return Ok(());
        }
        match result {
            Ok(()) => {
                self.notifications
                    .success("The college has been successfully removed.");
                self.refresh().await
            }
            Err(err) => {
                self.notifications
                    .error("There was a problem deleting the college. Please try again.");
                Err(err)
            }
        }
    }

    /// Upload a file for one of the college draft's asset fields.
    ///
    /// The returned public URL is written into the draft as an uploaded
    /// source; typing a URL instead goes through
    /// [`attach_college_asset_url`](Self::attach_college_asset_url).
    pub async fn attach_college_asset(
        &self,
        field: CollegeAssetField,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<String> {
        let generation = self.current_generation();
        let result = self.assets.upload(bytes, filename, field.category()).await;
        if self.is_stale(generation) {
            tracing::debug!("Discarding upload result for a torn-down view");
            return result;
        }
        match result {
            Ok(url) => {
                self.set_college_asset(field, AssetSource::Uploaded(url.clone()));
                self.notifications
                    .success(format!("{} uploaded successfully!", field.label()));
                Ok(url)
            }
            Err(err) => {
                self.notifications.error(format!("Upload failed: {err}"));
                Err(err)
            }
        }
    }

    /// Use a directly entered URL for one of the college draft's asset
    /// fields.
    pub fn attach_college_asset_url(&self, field: CollegeAssetField, url: &str) {
        let source = if url.trim().is_empty() {
            AssetSource::Absent
        } else {
            AssetSource::Direct(url.trim().to_string())
        };
        self.set_college_asset(field, source);
    }

    fn set_college_asset(&self, field: CollegeAssetField, source: AssetSource) {
        self.with_state(|s| {
            let slot = match field {
                CollegeAssetField::Image => &mut s.college_draft.image,
                CollegeAssetField::Logo => &mut s.college_draft.logo,
                CollegeAssetField::Brochure => &mut s.college_draft.brochure,
            };
            *slot = source;
        });
    }

    // ------------------------------------------------------------------
    // Logo flow
    // ------------------------------------------------------------------

    /// Current logo draft.
    pub fn logo_draft(&self) -> LogoDraft {
        self.with_state(|s| s.logo_draft.clone())
    }

    /// Replace the logo draft with edited form fields.
    pub fn set_logo_draft(&self, draft: LogoDraft) {
        self.with_state(|s| s.logo_draft = draft);
    }

    /// Seed the logo draft from an existing record.
    pub fn begin_edit_logo(&self, id: i64) -> bool {
        self.with_state(|s| {
            let Some(logo) = s.logos.iter().find(|l| l.id == id).cloned() else {
                return false;
            };
            s.logo_draft = LogoDraft::from_record(&logo);
            s.editing_logo = Some(logo);
            true
        })
    }

    /// Abandon the logo edit.
    pub fn cancel_edit_logo(&self) {
        self.with_state(|s| {
            s.editing_logo = None;
            s.logo_draft = LogoDraft::default();
        });
    }

    /// Upload a standalone partner logo file into the logo draft.
    pub async fn attach_logo_upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        let generation = self.current_generation();
        let result = self
            .assets
            .upload(bytes, filename, AssetCategory::PartnerLogo)
            .await;
        if self.is_stale(generation) {
            tracing::debug!("Discarding logo upload result for a torn-down view");
            return result;
        }
        match result {
            Ok(url) => {
                self.with_state(|s| s.logo_draft.logo = AssetSource::Uploaded(url.clone()));
                self.notifications.success("Logo uploaded successfully!");
                Ok(url)
            }
            Err(err) => {
                self.notifications.error(format!("Upload failed: {err}"));
                Err(err)
            }
        }
    }

    /// Use a directly entered URL for the logo draft.
    pub fn attach_logo_url(&self, url: &str) {
        let source = if url.trim().is_empty() {
            AssetSource::Absent
        } else {
            AssetSource::Direct(url.trim().to_string())
        };
        self.with_state(|s| s.logo_draft.logo = source);
    }

    /// Submit the logo draft: create, or update when an edit is in progress.
    pub async fn submit_logo(&self) -> Result<()> {
        self.require_session()?;
        let generation = self.current_generation();
        let (draft, editing) = self.with_state(|s| (s.logo_draft.clone(), s.editing_logo.clone()));

        if let Err(err) = draft.normalize() {
            tracing::warn!(error = %err, "Logo draft rejected locally");
            self.notifications
                .error("Please provide both a name and a logo for the partner.");
            return Err(err);
        }

        let result = match &editing {
            Some(logo) => self.store.update_logo(logo.id, &draft).await,
            None => self.store.create_logo(&draft).await,
        };

        if self.is_stale(generation) {
            tracing::debug!("Discarding logo submit result for a torn-down view");
            return Ok(());
        }
        match result {
            Ok(saved) => {
                self.with_state(|s| {
                    s.logo_draft = LogoDraft::default();
                    s.editing_logo = None;
                });
                let verb = if editing.is_some() { "updated" } else { "added" };
                self.notifications
                    .success(format!("{} has been successfully {verb}.", saved.name));
                self.refresh().await
            }
            Err(err) => {
                let verb = if editing.is_some() { "updating" } else { "adding" };
                self.notifications.error(format!(
                    "There was a problem {verb} the logo. Please try again."
                ));
                Err(err)
            }
        }
    }

    /// Arm the two-step delete for a logo.
    pub fn request_delete_logo(&self, id: i64) -> bool {
        self.with_state(|s| {
            if s.logos.iter().any(|l| l.id == id) {
                s.pending_delete_logo = Some(id);
                true
            } else {
                false
            }
        })
    }

    /// Disarm the pending logo delete.
    pub fn cancel_delete_logo(&self) {
        self.with_state(|s| s.pending_delete_logo = None);
    }

    /// Fire the armed logo delete.
    pub async fn confirm_delete_logo(&self) -> Result<()> {
        self.require_session()?;
        let generation = self.current_generation();
        let Some(id) = self.with_state(|s| s.pending_delete_logo.take()) else {
            return Err(Error::validation("no delete is pending confirmation"));
        };

        let result = self.store.delete_logo(id).await;
        if self.is_stale(generation) {
            tracing::debug!("Discarding logo delete result for a torn-down view");
            return Ok(());
        }
        match result {
            Ok(()) => {
                self.notifications
                    .success("The logo has been successfully removed.");
                self.refresh().await
            }
            Err(err) => {
                self.notifications
                    .error("There was a problem deleting the logo. Please try again.");
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require_session(&self) -> Result<()> {
        if self.gate.state().is_authenticated() {
            Ok(())
        } else {
            self.notifications
                .error("Your session has expired. Please sign in again.");
            Err(Error::remote("auth provider", "no active session"))
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut AdminState) -> R) -> R {
        f(&mut self.lock_state())
    }

    fn lock_state(&self) -> MutexGuard<'_, AdminState> {
        // A poisoned lock only means a panicked test thread; the state is
        // still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }
}

impl std::fmt::Debug for AdminWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (colleges, logos) = self.with_state(|s| (s.colleges.len(), s.logos.len()));
        f.debug_struct("AdminWorkflow")
            .field("colleges", &colleges)
            .field("logos", &logos)
            .field("session", &self.gate.state().is_authenticated())
            .finish()
    }
}
