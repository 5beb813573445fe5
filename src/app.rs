//! Application state management for VA Ops.
//!
//! This module contains the core `App` struct that manages all application
//! state: the cached backend lists, the modal form workflows, and the
//! background task coordination for API calls.
//!
//! The cached lists are read-mostly and replaced wholesale from a reload,
//! never patched in place; every mutation goes to the backend first and the
//! UI only changes after a successful refresh.

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::forms::{OffboardForm, OnboardingForm};
use crate::models::{Creator, NewPhone, OffboardingPayload, OnboardingPayload, Phone, Va};
use crate::utils::{cmp_ignore_case, contains_ignore_case};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A submit produces at most a handful of results; 32 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Number of items to scroll on page up/down
pub const PAGE_SCROLL_SIZE: usize = 10;

/// How long a toast stays in the status bar
const TOAST_TTL: Duration = Duration::from_secs(4);

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Vas,
    Phones,
    Creators,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Vas => "VAs",
            Tab::Phones => "Phones",
            Tab::Creators => "Creators",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Vas => Tab::Phones,
            Tab::Phones => Tab::Creators,
            Tab::Creators => Tab::Vas,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Vas => Tab::Creators,
            Tab::Phones => Tab::Vas,
            Tab::Creators => Tab::Phones,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    Onboarding,
    Offboarding,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Which modal a fetched transfer-candidate list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferTarget {
    Onboarding,
    Offboard,
}

/// Status bar toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    raised_at: Instant,
}

impl Toast {
    fn new(text: String, kind: ToastKind) -> Self {
        Self {
            text,
            kind,
            raised_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.raised_at.elapsed() > TOAST_TTL
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned API tasks through the MPSC channel.
pub(crate) enum TaskResult {
    /// Fresh active VA roster (wholesale replacement)
    Vas(Vec<Va>),
    /// Fresh phone inventory
    Phones(Vec<Phone>),
    /// Fresh creator list
    Creators(Vec<Creator>),
    /// Archived VAs fetched for a transfer select; empty on fetch failure
    TransferCandidates(TransferTarget, Vec<Va>),
    /// Onboarding mutation succeeded, including the dependent phone create
    OnboardingCompleted { phone_created: bool },
    /// Offboard mutation succeeded
    OffboardCompleted,
    /// A mutation flow failed; the modal stays open for retry
    MutationFailed { action: &'static str, message: String },
    /// A list reload failed
    RefreshFailed(String),
}

/// Cached backend lists, replaced wholesale on reload
#[derive(Debug, Default)]
pub struct AppData {
    pub vas: Vec<Va>,
    pub phones: Vec<Phone>,
    pub creators: Vec<Creator>,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub data: AppData,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub search_query: String,
    pub va_selection: usize,
    pub phone_selection: usize,
    pub creator_selection: usize,

    // Modal workflows
    pub onboarding_form: Option<OnboardingForm>,
    pub offboard_form: Option<OffboardForm>,
    /// Submit control disabled while a mutation is in flight
    pub submit_in_flight: bool,

    pub toast: Option<Toast>,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url.clone())?;
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            api,
            data: AppData::default(),
            state: AppState::Normal,
            current_tab: Tab::Vas,
            search_query: String::new(),
            va_selection: 0,
            phone_selection: 0,
            creator_selection: 0,
            onboarding_form: None,
            offboard_form: None,
            submit_in_flight: false,
            toast: None,
            task_rx: rx,
            task_tx: tx,
        })
    }

    // =========================================================================
    // Toasts
    // =========================================================================

    pub fn toast(&mut self, text: impl Into<String>, kind: ToastKind) {
        let text = text.into();
        match kind {
            ToastKind::Error => warn!(toast = %text, "Error toast"),
            _ => debug!(toast = %text, "Toast"),
        }
        self.toast = Some(Toast::new(text, kind));
    }

    fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    // =========================================================================
    // List access
    // =========================================================================

    /// Active VAs matching the roster search, in cache order
    pub fn filtered_vas(&self) -> Vec<&Va> {
        self.data
            .vas
            .iter()
            .filter(|va| {
                self.search_query.is_empty()
                    || contains_ignore_case(&va.full_name, &self.search_query)
                    || contains_ignore_case(&va.telegram_handle, &self.search_query)
            })
            .collect()
    }

    pub fn selected_va(&self) -> Option<&Va> {
        self.filtered_vas().get(self.va_selection).copied()
    }

    /// Name for a VA id, falling back to the id itself once the record has
    /// left the cache
    pub fn va_name(&self, va_id: i64) -> String {
        self.data
            .vas
            .iter()
            .find(|va| va.id == va_id)
            .map(|va| va.full_name.clone())
            .unwrap_or_else(|| format!("VA #{}", va_id))
    }

    fn clamp_selections(&mut self) {
        self.va_selection = self
            .va_selection
            .min(self.filtered_vas().len().saturating_sub(1));
        self.phone_selection = self.phone_selection.min(self.data.phones.len().saturating_sub(1));
        self.creator_selection = self
            .creator_selection
            .min(self.data.creators.len().saturating_sub(1));
    }

    // =========================================================================
    // List refresh
    // =========================================================================

    /// Reload all three lists in the background
    pub fn refresh_all(&mut self) {
        info!("Refreshing all lists");
        let api = self.api.clone();
        let tx = self.task_tx.clone();

        tokio::spawn(async move {
            let (vas, phones, creators) =
                tokio::join!(api.fetch_vas(), api.fetch_phones(), api.fetch_creators());
            Self::send_list_result(&tx, "VAs", vas, TaskResult::Vas).await;
            Self::send_list_result(&tx, "phones", phones, TaskResult::Phones).await;
            Self::send_list_result(&tx, "creators", creators, TaskResult::Creators).await;
        });

        self.toast("Refreshing...", ToastKind::Info);
    }

    async fn send_list_result<T, F>(
        tx: &mpsc::Sender<TaskResult>,
        name: &str,
        result: Result<T>,
        wrapper: F,
    ) where
        F: FnOnce(T) -> TaskResult,
    {
        match result {
            Ok(data) => Self::send(tx, wrapper(data)).await,
            Err(e) => {
                error!(error = %e, "Failed to reload {}", name);
                Self::send(tx, TaskResult::RefreshFailed(format!("{}: {}", name, e))).await;
            }
        }
    }

    async fn send(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send task result - channel closed");
        }
    }

    // =========================================================================
    // Modal openers
    // =========================================================================

    /// Open the complete-onboarding modal for a VA id from the cache.
    /// A fresh form is constructed every time, so the conditional phone
    /// sections always start hidden.
    pub fn open_onboarding(&mut self, va_id: i64) {
        if !self.data.vas.iter().any(|va| va.id == va_id) {
            self.toast("VA not found", ToastKind::Error);
            return;
        }
        self.onboarding_form = Some(OnboardingForm::new(va_id));
        self.state = AppState::Onboarding;
    }

    /// Open the offboard modal for a VA id from the cache
    pub fn open_offboard(&mut self, va_id: i64) {
        if !self.data.vas.iter().any(|va| va.id == va_id) {
            self.toast("VA not found", ToastKind::Error);
            return;
        }
        self.offboard_form = Some(OffboardForm::new(va_id));
        self.state = AppState::Offboarding;
    }

    /// Close whichever modal is open; refused while a submit is in flight
    pub fn close_modal(&mut self) {
        if self.submit_in_flight {
            return;
        }
        self.onboarding_form = None;
        self.offboard_form = None;
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Transfer candidate population
    // =========================================================================

    /// Cycle the onboarding phone type, populating the transfer select when
    /// it becomes visible
    pub fn cycle_onboarding_phone_type(&mut self) {
        let needs_candidates = {
            let Some(form) = self.onboarding_form.as_mut() else {
                return;
            };
            form.cycle_phone_type();
            form.shows_transfer_section()
        };
        if needs_candidates {
            self.load_transfer_candidates(TransferTarget::Onboarding);
        }
    }

    /// Cycle the offboard phone handling, populating the transfer select
    /// when it becomes visible
    pub fn cycle_offboard_phone_handling(&mut self) {
        let needs_candidates = {
            let Some(form) = self.offboard_form.as_mut() else {
                return;
            };
            form.cycle_phone_handling();
            form.shows_transfer_section()
        };
        if needs_candidates {
            self.load_transfer_candidates(TransferTarget::Offboard);
        }
    }

    /// Seed the transfer select with the cached active VAs, then fetch
    /// archived VAs in the background to widen it. A phone may be
    /// transferred to or from a VA who has since been offboarded, so both
    /// populations belong in the list; if the archived fetch fails the
    /// select keeps the active entries.
    fn load_transfer_candidates(&mut self, target: TransferTarget) {
        let active: Vec<(i64, String)> = self
            .data
            .vas
            .iter()
            .map(|va| (va.id, va.select_label()))
            .collect();
        if let Some(select) = self.transfer_select_mut(target) {
            select.set_options(active);
        }

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let archived = match api.fetch_archived_vas().await {
                Ok(vas) => vas,
                Err(e) => {
                    warn!(error = %e, "Failed to fetch archived VAs, proceeding with active only");
                    Vec::new()
                }
            };
            Self::send(&tx, TaskResult::TransferCandidates(target, archived)).await;
        });
    }

    fn transfer_select_mut(
        &mut self,
        target: TransferTarget,
    ) -> Option<&mut crate::forms::SearchSelect> {
        match target {
            TransferTarget::Onboarding => self
                .onboarding_form
                .as_mut()
                .map(|f| &mut f.transfer_select),
            TransferTarget::Offboard => self.offboard_form.as_mut().map(|f| &mut f.transfer_select),
        }
    }

    // =========================================================================
    // Submit workflows
    // =========================================================================

    /// Submit the complete-onboarding form. Issues the onboarding call
    /// first; the phone create only runs after it succeeds, so a phone is
    /// never provisioned for a VA the backend refused to mark onboarded.
    pub fn submit_onboarding(&mut self) {
        if self.submit_in_flight {
            return;
        }
        let Some(form) = self.onboarding_form.as_ref() else {
            return;
        };
        if let Err(msg) = form.validate() {
            self.toast(msg, ToastKind::Error);
            return;
        }

        let va_id = form.va_id;
        let payload = form.to_payload();
        let phone = form.phone_payload();
        self.submit_in_flight = true;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            Self::run_onboarding(&api, &tx, va_id, payload, phone).await;
        });
    }

    async fn run_onboarding(
        api: &ApiClient,
        tx: &mpsc::Sender<TaskResult>,
        va_id: i64,
        payload: OnboardingPayload,
        phone: Option<NewPhone>,
    ) {
        let result = Self::sequence_onboarding(
            || api.complete_onboarding(va_id, &payload),
            |new_phone| async move { api.create_phone(&new_phone).await },
            phone,
        )
        .await;

        match &result {
            TaskResult::OnboardingCompleted { phone_created } => {
                info!(va_id, phone_created = *phone_created, "Onboarding completed");
            }
            TaskResult::MutationFailed { action, message } => {
                error!(va_id, action = *action, error = %message, "Onboarding flow failed");
            }
            _ => {}
        }
        Self::send(tx, result).await;
    }

    /// Sequencing for the onboarding flow: the phone create only runs
    /// after the onboarding call has succeeded, and is never issued when
    /// that call fails.
    async fn sequence_onboarding<O, OFut, C, CFut>(
        onboard: O,
        create_phone: C,
        phone: Option<NewPhone>,
    ) -> TaskResult
    where
        O: FnOnce() -> OFut,
        OFut: Future<Output = Result<Va>>,
        C: FnOnce(NewPhone) -> CFut,
        CFut: Future<Output = Result<Phone>>,
    {
        if let Err(e) = onboard().await {
            return TaskResult::MutationFailed {
                action: "complete onboarding",
                message: e.to_string(),
            };
        }

        let phone_created = match phone {
            Some(new_phone) => {
                if let Err(e) = create_phone(new_phone).await {
                    return TaskResult::MutationFailed {
                        action: "create phone",
                        message: e.to_string(),
                    };
                }
                true
            }
            None => false,
        };

        TaskResult::OnboardingCompleted { phone_created }
    }

    /// Submit the offboard form
    pub fn submit_offboard(&mut self) {
        if self.submit_in_flight {
            return;
        }
        let Some(form) = self.offboard_form.as_ref() else {
            return;
        };
        if let Err(msg) = form.validate() {
            self.toast(msg, ToastKind::Error);
            return;
        }

        let va_id = form.va_id;
        let payload = form.to_payload();
        self.submit_in_flight = true;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            Self::run_offboard(&api, &tx, va_id, payload).await;
        });
    }

    async fn run_offboard(
        api: &ApiClient,
        tx: &mpsc::Sender<TaskResult>,
        va_id: i64,
        payload: OffboardingPayload,
    ) {
        match api.offboard(va_id, &payload).await {
            Ok(_) => {
                info!(va_id, "VA offboarded");
                Self::send(tx, TaskResult::OffboardCompleted).await;
            }
            Err(e) => {
                error!(va_id, error = %e, "Offboard failed");
                Self::send(
                    tx,
                    TaskResult::MutationFailed {
                        action: "offboard VA",
                        message: e.to_string(),
                    },
                )
                .await;
            }
        }
    }

    // =========================================================================
    // Background task processing
    // =========================================================================

    /// Drain completed background tasks and apply their results
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.task_rx.try_recv() {
            self.process_task_result(result);
        }
        self.expire_toast();
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Vas(data) => {
                self.data.vas = data;
                self.clamp_selections();
            }
            TaskResult::Phones(data) => {
                self.data.phones = data;
                self.clamp_selections();
            }
            TaskResult::Creators(mut data) => {
                data.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
                self.data.creators = data;
                self.clamp_selections();
            }
            TaskResult::TransferCandidates(target, archived) => {
                // Union of cached active VAs and the archived fetch,
                // archived entries labeled distinctly
                let mut options: Vec<(i64, String)> = self
                    .data
                    .vas
                    .iter()
                    .map(|va| (va.id, va.select_label()))
                    .collect();
                options.extend(
                    archived
                        .iter()
                        .filter(|a| !self.data.vas.iter().any(|va| va.id == a.id))
                        .map(|va| (va.id, va.select_label())),
                );
                if let Some(select) = self.transfer_select_mut(target) {
                    select.set_options(options);
                }
            }
            TaskResult::OnboardingCompleted { phone_created } => {
                self.submit_in_flight = false;
                self.onboarding_form = None;
                self.state = AppState::Normal;
                self.toast("Onboarding completed successfully", ToastKind::Success);

                // The VA list always changed; the phone list only if a
                // phone was created. Independent reads, reloaded together.
                let api = self.api.clone();
                let tx = self.task_tx.clone();
                tokio::spawn(async move {
                    if phone_created {
                        let (vas, phones) = tokio::join!(api.fetch_vas(), api.fetch_phones());
                        Self::send_list_result(&tx, "VAs", vas, TaskResult::Vas).await;
                        Self::send_list_result(&tx, "phones", phones, TaskResult::Phones).await;
                    } else {
                        Self::send_list_result(&tx, "VAs", api.fetch_vas().await, TaskResult::Vas)
                            .await;
                    }
                });
            }
            TaskResult::OffboardCompleted => {
                self.submit_in_flight = false;
                self.offboard_form = None;
                self.state = AppState::Normal;
                self.toast("VA offboarded successfully", ToastKind::Success);

                // Creator assignments reference the offboarded VA, so that
                // list is refreshed alongside the roster.
                let api = self.api.clone();
                let tx = self.task_tx.clone();
                tokio::spawn(async move {
                    let (vas, creators) = tokio::join!(api.fetch_vas(), api.fetch_creators());
                    Self::send_list_result(&tx, "VAs", vas, TaskResult::Vas).await;
                    Self::send_list_result(&tx, "creators", creators, TaskResult::Creators).await;
                });
            }
            TaskResult::MutationFailed { action, message } => {
                // Modal stays open with the form intact for retry; the
                // cache is untouched.
                self.submit_in_flight = false;
                self.toast(format!("Failed to {}: {}", action, message), ToastKind::Error);
            }
            TaskResult::RefreshFailed(message) => {
                self.toast(format!("Refresh failed: {}", message), ToastKind::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PhoneHandling, PhoneType, VaStatus};

    fn va(id: i64, name: &str, status: VaStatus) -> Va {
        Va {
            id,
            full_name: name.to_string(),
            telegram_handle: name.to_lowercase().replace(' ', "_"),
            va_type: "content".to_string(),
            status,
            onboarding_date: None,
        }
    }

    fn new_phone(va_id: i64) -> NewPhone {
        NewPhone {
            phone_number: "5551234567".to_string(),
            handout_date: None,
            apple_id_email: None,
            apple_id_password: None,
            proxy_ip: None,
            proxy_port: None,
            proxy_username: None,
            proxy_password: None,
            notes: None,
            assigned_to_va_id: va_id,
        }
    }

    fn phone_record(id: i64, va_id: i64) -> Phone {
        Phone {
            id,
            phone_number: "5551234567".to_string(),
            handout_date: None,
            apple_id_email: None,
            proxy_ip: None,
            proxy_port: None,
            notes: None,
            assigned_to_va_id: Some(va_id),
        }
    }

    fn app_with_vas(vas: Vec<Va>) -> App {
        let mut app = App::new(Config::default()).unwrap();
        app.data.vas = vas;
        app
    }

    #[test]
    fn test_open_onboarding_unknown_id_shows_error_without_modal() {
        let mut app = app_with_vas(vec![va(1, "Maria Santos", VaStatus::Active)]);
        app.open_onboarding(99);
        assert_eq!(app.state, AppState::Normal);
        assert!(app.onboarding_form.is_none());
        let toast = app.toast.as_ref().expect("error toast expected");
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn test_open_offboard_unknown_id_shows_error_without_modal() {
        let mut app = app_with_vas(vec![va(1, "Maria Santos", VaStatus::Active)]);
        app.open_offboard(99);
        assert_eq!(app.state, AppState::Normal);
        assert!(app.offboard_form.is_none());
    }

    #[test]
    fn test_open_onboarding_resets_conditional_sections() {
        let mut app = app_with_vas(vec![va(1, "Maria Santos", VaStatus::Active)]);
        app.open_onboarding(1);
        // Leave the form in a dirty state, then reopen
        app.onboarding_form.as_mut().unwrap().phone_type = PhoneType::New;
        app.close_modal();
        app.open_onboarding(1);
        let form = app.onboarding_form.as_ref().unwrap();
        assert!(!form.shows_phone_details());
        assert!(!form.shows_transfer_section());
    }

    #[test]
    fn test_transfer_candidates_union_labels_archived() {
        let mut app = app_with_vas(vec![
            va(1, "Maria Santos", VaStatus::Active),
            va(2, "Ana Reyes", VaStatus::Active),
        ]);
        app.open_offboard(1);
        app.offboard_form.as_mut().unwrap().phone_handling = PhoneHandling::Transfer;

        app.process_task_result(TaskResult::TransferCandidates(
            TransferTarget::Offboard,
            vec![
                va(3, "Jose Cruz", VaStatus::Archived),
                va(2, "Ana Reyes", VaStatus::Active), // duplicate of cached entry
            ],
        ));

        let form = app.offboard_form.as_ref().unwrap();
        let options: Vec<&crate::forms::SelectOption> = form.transfer_select.visible_options();
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Select VA...", "Maria Santos", "Ana Reyes", "Jose Cruz (Archived)"]
        );
    }

    #[test]
    fn test_archived_fetch_failure_leaves_active_candidates() {
        let mut app = app_with_vas(vec![va(1, "Maria Santos", VaStatus::Active)]);
        app.open_onboarding(1);
        app.onboarding_form.as_mut().unwrap().phone_type = PhoneType::Transfer;

        // Failure path delivers an empty archived list
        app.process_task_result(TaskResult::TransferCandidates(
            TransferTarget::Onboarding,
            vec![],
        ));

        let form = app.onboarding_form.as_ref().unwrap();
        assert_eq!(form.transfer_select.visible_options().len(), 2);
    }

    #[test]
    fn test_mutation_failure_keeps_modal_open() {
        let mut app = app_with_vas(vec![va(1, "Maria Santos", VaStatus::Active)]);
        app.open_offboard(1);
        app.submit_in_flight = true;

        app.process_task_result(TaskResult::MutationFailed {
            action: "offboard VA",
            message: "Server error: boom".to_string(),
        });

        assert_eq!(app.state, AppState::Offboarding);
        assert!(app.offboard_form.is_some());
        assert!(!app.submit_in_flight);
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.text.contains("Server error: boom"));
    }

    #[test]
    fn test_close_modal_refused_while_in_flight() {
        let mut app = app_with_vas(vec![va(1, "Maria Santos", VaStatus::Active)]);
        app.open_offboard(1);
        app.submit_in_flight = true;
        app.close_modal();
        assert_eq!(app.state, AppState::Offboarding);

        app.submit_in_flight = false;
        app.close_modal();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.offboard_form.is_none());
    }

    #[tokio::test]
    async fn test_phone_create_never_issued_when_onboarding_fails() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let phone_called = AtomicBool::new(false);
        let result = App::sequence_onboarding(
            || async { Err::<Va, _>(anyhow::anyhow!("backend rejected the record")) },
            |new_phone| {
                phone_called.store(true, Ordering::SeqCst);
                async move { Ok::<_, anyhow::Error>(phone_record(3, new_phone.assigned_to_va_id)) }
            },
            Some(new_phone(5)),
        )
        .await;

        assert!(!phone_called.load(Ordering::SeqCst));
        match result {
            TaskResult::MutationFailed { action, message } => {
                assert_eq!(action, "complete onboarding");
                assert!(message.contains("backend rejected the record"));
            }
            _ => panic!("expected a mutation failure"),
        }
    }

    #[tokio::test]
    async fn test_phone_create_runs_after_onboarding_succeeds() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let onboarded = AtomicBool::new(false);
        let result = App::sequence_onboarding(
            || {
                onboarded.store(true, Ordering::SeqCst);
                async { Ok::<_, anyhow::Error>(va(5, "Maria Santos", VaStatus::Active)) }
            },
            |new_phone| {
                // Onboarding must already have completed by now
                assert!(onboarded.load(Ordering::SeqCst));
                async move { Ok::<_, anyhow::Error>(phone_record(3, new_phone.assigned_to_va_id)) }
            },
            Some(new_phone(5)),
        )
        .await;

        assert!(matches!(
            result,
            TaskResult::OnboardingCompleted { phone_created: true }
        ));
    }

    #[tokio::test]
    async fn test_no_phone_payload_means_single_call() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let phone_called = AtomicBool::new(false);
        let result = App::sequence_onboarding(
            || async { Ok::<_, anyhow::Error>(va(5, "Maria Santos", VaStatus::Active)) },
            |new_phone| {
                phone_called.store(true, Ordering::SeqCst);
                async move { Ok::<_, anyhow::Error>(phone_record(3, new_phone.assigned_to_va_id)) }
            },
            None,
        )
        .await;

        assert!(!phone_called.load(Ordering::SeqCst));
        assert!(matches!(
            result,
            TaskResult::OnboardingCompleted { phone_created: false }
        ));
    }

    #[tokio::test]
    async fn test_onboarding_success_closes_modal_and_reloads() {
        let mut app = app_with_vas(vec![va(1, "Maria Santos", VaStatus::Active)]);
        app.open_onboarding(1);
        app.submit_in_flight = true;

        app.process_task_result(TaskResult::OnboardingCompleted { phone_created: false });

        assert_eq!(app.state, AppState::Normal);
        assert!(app.onboarding_form.is_none());
        assert!(!app.submit_in_flight);
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_lists_replaced_wholesale() {
        let mut app = app_with_vas(vec![
            va(1, "Maria Santos", VaStatus::Active),
            va(2, "Ana Reyes", VaStatus::Active),
        ]);
        app.va_selection = 1;

        app.process_task_result(TaskResult::Vas(vec![va(3, "Jose Cruz", VaStatus::Active)]));
        assert_eq!(app.data.vas.len(), 1);
        assert_eq!(app.data.vas[0].id, 3);
        // Selection clamped to the new list
        assert_eq!(app.va_selection, 0);
    }

    #[test]
    fn test_filtered_vas_matches_name_and_handle() {
        let mut app = app_with_vas(vec![
            va(1, "Maria Santos", VaStatus::Active),
            va(2, "Ana Reyes", VaStatus::Active),
        ]);
        app.search_query = "SANTOS".to_string();
        let filtered = app.filtered_vas();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);

        app.search_query = "ana_reyes".to_string();
        assert_eq!(app.filtered_vas().len(), 1);
    }
}
