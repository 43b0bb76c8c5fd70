use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use super::wizard::{Step, StepStatus, WizardState};
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::media::{MISSING_MEDIA_MESSAGE, MediaAttachment, MediaFile, MediaRejection, PreviewRegistry, classify};
use crate::models::categories::{CategoryNode, CategoryOption, render_options};
use crate::models::gigs::{FormValues, GigDraft};
use crate::ui::{Navigator, Notification, Notifier};
use crate::validation::{self, Field};

/// Where the seller lands after publishing.
pub const AFTER_SUBMIT_ROUTE: &str = "/seller-gigs";

#[derive(Debug, Default)]
pub struct AttachOutcome {
    pub accepted: usize,
    pub rejected: Vec<(String, MediaRejection)>,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing was sent; these steps need attention, lowest first.
    Invalid(Vec<Step>),
    Submitted,
    Failed(ClientError),
}

/// The six-step "create gig" wizard.
pub struct StepFormController {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    previews: Arc<dyn PreviewRegistry>,
    redirect_delay: Duration,
    draft: GigDraft,
    wizard: WizardState,
    field_errors: BTreeMap<Field, String>,
    attachments: Vec<MediaAttachment>,
    media_error: Option<String>,
    categories: Vec<CategoryNode>,
    submitting: bool,
}

impl StepFormController {
    pub fn new(
        api: ApiClient,
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        previews: Arc<dyn PreviewRegistry>,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
            previews,
            redirect_delay: config.redirect_delay,
            draft: GigDraft::default(),
            wizard: WizardState::default(),
            field_errors: BTreeMap::new(),
            attachments: Vec::new(),
            media_error: None,
            categories: Vec::new(),
            submitting: false,
        }
    }

    pub fn draft(&self) -> &GigDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut GigDraft {
        &mut self.draft
    }

    pub fn current_step(&self) -> Step {
        self.wizard.current()
    }

    pub fn visited_steps(&self) -> &BTreeSet<Step> {
        self.wizard.visited()
    }

    pub fn error_steps(&self) -> &BTreeSet<Step> {
        self.wizard.errors()
    }

    pub fn step_status(&self, step: Step) -> StepStatus {
        self.wizard.status(step)
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn media_error(&self) -> Option<&str> {
        self.media_error.as_deref()
    }

    pub fn attachments(&self) -> &[MediaAttachment] {
        &self.attachments
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Fetch the category tree for step 3. A failure leaves the picker empty.
    pub async fn load_categories(&mut self) {
        match self.api.categories().await {
            Ok(tree) => self.categories = tree,
            Err(e) => error!("Error fetching categories: {e}"),
        }
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        render_options(&self.categories)
    }

    /// Check one step. Only touches the inline messages.
    pub fn validate_step(&mut self, step: Step) -> bool {
        match step.field() {
            Some(field) => match validation::validate_field(&self.draft, field) {
                Ok(()) => {
                    self.field_errors.remove(&field);
                    true
                }
                Err(e) => {
                    self.field_errors.insert(field, e.message);
                    false
                }
            },
            None => {
                let valid = !self.attachments.is_empty();
                if !valid {
                    self.media_error = Some(MISSING_MEDIA_MESSAGE.to_string());
                }
                valid
            }
        }
    }

    /// Advance one step if the current one is valid. Returns whether it moved.
    pub fn go_to_next_step(&mut self) -> bool {
        let current = self.wizard.current();
        let valid = self.validate_step(current);
        self.wizard.record(current, valid);
        if !valid {
            return false;
        }
        let next = current.next();
        self.wizard.move_to(next);
        next != current
    }

    /// Go wherever the progress bar was clicked, flagging the step being left
    /// if it is invalid.
    pub fn jump_to_step(&mut self, target: Step) {
        let current = self.wizard.current();
        let valid = self.validate_step(current);
        self.wizard.record(current, valid);
        self.wizard.move_to(target);
    }

    /// The "Back" button. No validation.
    pub fn go_back(&mut self) {
        let previous = self.wizard.current().previous();
        self.wizard.move_to(previous);
    }

    pub fn attach_media(&mut self, files: impl IntoIterator<Item = MediaFile>) -> AttachOutcome {
        let mut outcome = AttachOutcome::default();
        for file in files {
            match classify(&file) {
                Ok(kind) => {
                    self.attachments
                        .push(MediaAttachment::new(file, kind, Arc::clone(&self.previews)));
                    outcome.accepted += 1;
                }
                Err(rejection) => {
                    warn!(file = %file.file_name, "Rejected media: {rejection}");
                    self.media_error = Some(rejection.to_string());
                    outcome.rejected.push((file.file_name, rejection));
                }
            }
        }
        if outcome.accepted > 0 {
            self.media_error = None;
            self.wizard.clear_error(Step::Media);
        }
        outcome
    }

    /// Drop the attachment at `index`, releasing its preview.
    pub fn remove_media(&mut self, index: usize) -> Option<MediaFile> {
        if index >= self.attachments.len() {
            return None;
        }
        let MediaAttachment { file, .. } = self.attachments.remove(index);
        if self.attachments.is_empty() {
            self.media_error = Some(MISSING_MEDIA_MESSAGE.to_string());
            self.wizard.mark_error(Step::Media);
        }
        Some(file)
    }

    /// Validate every step, then publish the gig with all attachments.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let failing: Vec<Step> = Step::ALL
            .into_iter()
            .filter(|&step| !self.validate_step(step))
            .collect();
        if let Some(values) = self.checked_values(&failing) {
            self.publish(values).await
        } else {
            let failing = if failing.is_empty() {
                self.field_errors.keys().map(|&f| Step::for_field(f)).collect()
            } else {
                failing
            };
            self.wizard.replace_errors(failing.iter().copied());
            if let Some(&first) = failing.first() {
                self.wizard.move_to(first);
            }
            self.notifier
                .notify(Notification::error("Please complete all required fields"));
            SubmitOutcome::Invalid(failing)
        }
    }

    fn checked_values(&mut self, failing: &[Step]) -> Option<FormValues> {
        if !failing.is_empty() {
            return None;
        }
        match validation::validate_all(&self.draft) {
            Ok(values) => Some(values),
            Err(errors) => {
                for e in errors {
                    self.field_errors.insert(e.field, e.message);
                }
                None
            }
        }
    }

    async fn publish(&mut self, values: FormValues) -> SubmitOutcome {
        self.submitting = true;
        let result = self.api.create_gig(&values, &self.attachments).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(title = %values.title, files = self.attachments.len(), "Gig published");
                self.notifier
                    .notify(Notification::success("Gig published successfully!"));
                tokio::time::sleep(self.redirect_delay).await;
                self.navigator.navigate(AFTER_SUBMIT_ROUTE, false);
                SubmitOutcome::Submitted
            }
            Err(e) => {
                error!("Error creating gig: {e}");
                self.notifier
                    .notify(Notification::error(format!("Failed to create gig: {}", e.user_message())));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
