//! Modal edit form: draft state, validation and single-flight submission.
//!
//! ```text
//! Idle -> Editing -> Validating -> Submitting -> Idle      (saved)
//!                        |             |
//!                        +-> Editing   +-> Editing         (invalid / failed)
//! ```

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;
use crate::console::api::error::ApiError;
use crate::console::model::draft::{Draft, ValidationErrors};

/// Backend operations a form submits through.
pub(crate) trait Gateway<D: Draft> {
    async fn create(&self, draft: &D) -> Result<D::Entity, ApiError>;
    async fn update(&self, id: &str, draft: &D) -> Result<D::Entity, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormState {
    Idle,
    Editing,
    Validating,
    Submitting,
}

/// Why a submit never reached the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejected {
    Closed,
    Busy,
    Invalid,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    Saved,
    Failed(String),
    Rejected(Rejected),
    /// the response belonged to a session that was closed or reopened meanwhile
    Discarded,
}

/// Snapshot of a validated draft, ready to be sent.
pub(crate) struct SubmitRequest<D: Draft> {
    generation: u64,
    id: Option<String>,
    draft: D,
    cancel: CancellationToken,
}

pub(crate) struct SubmitResponse<E> {
    generation: u64,
    pub result: Result<E, ApiError>,
}

impl<D: Draft> SubmitRequest<D> {
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Create when no id is attached, update otherwise. Resolves early once cancelled.
    pub async fn send<G: Gateway<D>>(self, gateway: &G) -> SubmitResponse<D::Entity> {
        let call = async {
            match &self.id {
                Some(id) => gateway.update(id, &self.draft).await,
                None => gateway.create(&self.draft).await,
            }
        };
        let result = tokio::select! {
            _ = self.cancel.cancelled() => Err(ApiError::Cancelled),
            result = call => result,
        };
        SubmitResponse {
            generation: self.generation,
            result,
        }
    }
}

pub(crate) struct EditForm<D: Draft> {
    state: FormState,
    editing_id: Option<String>,
    draft: D,
    errors: ValidationErrors<D::Field>,
    error: Option<String>,
    new_tag: String,
    /// bumped on every open and close
    generation: u64,
    in_flight: Option<CancellationToken>,
    failure_message: fn(&ApiError) -> String,
}

impl<D: Draft> Default for EditForm<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Draft> EditForm<D> {
    pub fn new() -> Self {
        Self {
            state: FormState::Idle,
            editing_id: None,
            draft: D::defaults(),
            errors: ValidationErrors::default(),
            error: None,
            new_tag: String::new(),
            generation: 0,
            in_flight: None,
            failure_message: |e: &ApiError| e.to_string(),
        }
    }

    /// Override how a failed request is turned into the message shown to the user.
    pub fn with_failure_message(mut self, f: fn(&ApiError) -> String) -> Self {
        self.failure_message = f;
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != FormState::Idle
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn errors(&self) -> &ValidationErrors<D::Field> {
        &self.errors
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn new_tag(&self) -> &str {
        &self.new_tag
    }

    /// Start a session, copying `entity` into the draft or resetting to defaults.
    pub fn open(&mut self, entity: Option<&D::Entity>) {
        self.cancel_in_flight();
        self.generation += 1;
        self.editing_id = entity.map(|e| D::entity_id(e).to_string());
        self.draft = entity.map_or_else(D::defaults, D::from_entity);
        self.errors = ValidationErrors::default();
        self.error = None;
        self.new_tag.clear();
        self.state = FormState::Editing;
        debug!("form opened, editing={:?}", self.editing_id);
    }

    /// Drop the draft. A pending submit is cancelled and its response ignored.
    pub fn close(&mut self) {
        if self.cancel_in_flight() {
            info!("form closed with a submit in flight, cancelling it");
        }
        self.generation += 1;
        self.editing_id = None;
        self.draft = D::defaults();
        self.errors = ValidationErrors::default();
        self.error = None;
        self.new_tag.clear();
        self.state = FormState::Idle;
    }

    /// Apply raw input to one field and clear that field's error.
    pub fn edit(&mut self, field: D::Field, raw: &str) -> bool {
        if self.state != FormState::Editing {
            return false;
        }
        self.draft.apply(field, raw);
        self.errors.clear(field);
        true
    }

    pub fn set_new_tag(&mut self, raw: &str) {
        self.new_tag = raw.to_string();
    }

    /// Move the pending tag input into the draft's tags.
    pub fn add_tag(&mut self) -> bool {
        if self.state != FormState::Editing {
            return false;
        }
        let added = self.draft.tags_mut().add(&self.new_tag);
        if added {
            self.new_tag.clear();
        }
        added
    }

    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        if self.state != FormState::Editing {
            return None;
        }
        self.draft.tags_mut().remove(index)
    }

    /// Recompute field errors from the draft. Only an editing form validates.
    pub fn validate(&mut self) -> bool {
        if self.state != FormState::Editing {
            return false;
        }
        self.state = FormState::Validating;
        self.errors = self.draft.validate();
        let valid = self.errors.is_valid();
        if !valid {
            debug!("validation failed: {:?}", self.errors);
        }
        self.state = FormState::Editing;
        valid
    }

    pub fn begin_submit(&mut self) -> Result<SubmitRequest<D>, Rejected> {
        match self.state {
            FormState::Idle => return Err(Rejected::Closed),
            FormState::Submitting => return Err(Rejected::Busy),
            FormState::Editing | FormState::Validating => {}
        }
        if !self.validate() {
            return Err(Rejected::Invalid);
        }

        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        self.error = None;
        self.state = FormState::Submitting;
        Ok(SubmitRequest {
            generation: self.generation,
            id: self.editing_id.clone(),
            draft: self.draft.clone(),
            cancel,
        })
    }

    /// Settle a response. `on_success` runs at most once, only for the current session.
    pub fn complete(
        &mut self,
        response: SubmitResponse<D::Entity>,
        on_success: impl FnOnce(D::Entity),
    ) -> SubmitOutcome {
        if response.generation != self.generation || self.state != FormState::Submitting {
            debug!("dropping response for stale form session {}", response.generation);
            return SubmitOutcome::Discarded;
        }
        self.in_flight = None;

        match response.result {
            Ok(entity) => {
                on_success(entity);
                self.close();
                SubmitOutcome::Saved
            }
            Err(e) => {
                let message = (self.failure_message)(&e);
                warn!("submit failed, {}", e);
                self.error = Some(message.clone());
                self.state = FormState::Editing;
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validate, send and settle in one go.
    pub async fn submit<G: Gateway<D>>(
        &mut self,
        gateway: &G,
        on_success: impl FnOnce(D::Entity),
    ) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(rejected) => return SubmitOutcome::Rejected(rejected),
        };
        let response = request.send(gateway).await;
        self.complete(response, on_success)
    }

    fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}
