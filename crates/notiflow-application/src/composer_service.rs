//! Message composer use case.
//!
//! Owns the full state of one composition session: the user/group catalog
//! snapshots, the recipient selection, the draft (content, channels,
//! schedule, attachments), and the local template catalog. State is only
//! ever mutated from the single UI event loop.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use notiflow_core::catalog::{GroupQuery, GroupRepository, UserRepository};
use notiflow_core::error::{NotiflowError, Result};
use notiflow_core::message::MessageGateway;
use notiflow_core::recipient::{RecipientSelection, filter_users};
use notiflow_core::template::TemplateCatalog;
use notiflow_types::{
    Attachment, Channel, DeliveryReceipt, Group, OutgoingMessage, Template, User,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Maximum draft length, matching the composer form limit.
pub const MAX_CONTENT_LEN: usize = 1000;

/// When the message leaves the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendMode {
    /// Deliver immediately.
    #[default]
    Now,
    /// Deliver at the configured `schedule_at` timestamp.
    Schedule,
}

/// Outcome of a catalog load.
///
/// Each catalog degrades independently: a failed fetch leaves that catalog
/// empty and records the user-visible message here, while the other catalog
/// still lands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogLoadReport {
    pub users_error: Option<String>,
    pub groups_error: Option<String>,
}

impl CatalogLoadReport {
    /// Returns `true` when both catalogs loaded.
    pub fn is_ok(&self) -> bool {
        self.users_error.is_none() && self.groups_error.is_none()
    }
}

/// Use case for composing and dispatching a message.
pub struct ComposerService {
    user_repository: Arc<dyn UserRepository>,
    group_repository: Arc<dyn GroupRepository>,
    message_gateway: Arc<dyn MessageGateway>,

    users: Vec<User>,
    groups: Vec<Group>,
    selection: RecipientSelection,
    templates: TemplateCatalog,

    content: String,
    channels: Vec<Channel>,
    send_mode: SendMode,
    schedule_at: Option<String>,
    attachments: Vec<Attachment>,
    year: Option<String>,
}

impl ComposerService {
    /// Creates a fresh composition session with empty catalogs.
    ///
    /// `year` scopes the group catalog query and is stamped on outgoing
    /// messages.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        group_repository: Arc<dyn GroupRepository>,
        message_gateway: Arc<dyn MessageGateway>,
        year: Option<String>,
    ) -> Self {
        Self {
            user_repository,
            group_repository,
            message_gateway,
            users: Vec::new(),
            groups: Vec::new(),
            selection: RecipientSelection::new(),
            templates: TemplateCatalog::new(),
            content: String::new(),
            // Both channels start enabled, matching the form default.
            channels: vec![Channel::Email, Channel::App],
            send_mode: SendMode::Now,
            schedule_at: None,
            attachments: Vec::new(),
            year,
        }
    }

    // ========================================================================
    // Catalogs
    // ========================================================================

    /// Fetches the user and group catalogs concurrently.
    ///
    /// Failures do not abort the session: the affected catalog stays empty
    /// (all toggles against it become no-ops) and the error message is
    /// reported for display. A reload overwrites whatever was there before —
    /// catalogs are idempotent snapshots, so last write wins.
    pub async fn load_catalogs(&mut self) -> CatalogLoadReport {
        let group_query = GroupQuery {
            school_id: None,
            year: self.year.clone(),
        };
        let (users, groups) = tokio::join!(
            self.user_repository.list(None),
            self.group_repository.list(group_query),
        );

        let mut report = CatalogLoadReport::default();
        match users {
            Ok(users) => self.users = users,
            Err(err) => {
                warn!(error = %err, "failed to load user catalog");
                self.users = Vec::new();
                report.users_error = Some(err.to_string());
            }
        }
        match groups {
            Ok(groups) => self.groups = groups,
            Err(err) => {
                warn!(error = %err, "failed to load group catalog");
                self.groups = Vec::new();
                report.groups_error = Some(err.to_string());
            }
        }
        report
    }

    /// The current user catalog snapshot.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The current group catalog snapshot.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Users matching the search query; selection state is untouched.
    pub fn filtered_users(&self, query: &str) -> Vec<&User> {
        filter_users(&self.users, query)
    }

    // ========================================================================
    // Recipient selection
    // ========================================================================

    /// Flips a single user checkbox.
    pub fn toggle_user(&mut self, id: &str) {
        self.selection.toggle_user(id);
    }

    /// Bulk-toggles a group against the current catalog.
    pub fn toggle_group(&mut self, id: &str) {
        self.selection.toggle_group(id, &self.groups);
    }

    /// Bulk-toggles the users currently visible under `query`.
    pub fn toggle_visible(&mut self, query: &str) {
        let visible = filter_users(&self.users, query);
        self.selection.toggle_visible(&visible);
    }

    /// Read access for rendering checkboxes.
    pub fn selection(&self) -> &RecipientSelection {
        &self.selection
    }

    /// The deliverable recipients for the current selection.
    pub fn recipients(&self) -> Vec<&User> {
        self.selection.resolve_recipients(&self.users)
    }

    // ========================================================================
    // Draft state
    // ========================================================================

    /// Replaces the draft content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// The current draft content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Flips a delivery channel on or off.
    pub fn toggle_channel(&mut self, channel: Channel) {
        if let Some(pos) = self.channels.iter().position(|c| *c == channel) {
            self.channels.remove(pos);
        } else {
            self.channels.push(channel);
        }
    }

    /// The enabled delivery channels.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Switches between immediate and scheduled delivery.
    pub fn set_send_mode(&mut self, mode: SendMode) {
        self.send_mode = mode;
    }

    /// Sets the schedule timestamp (`datetime-local` string from the form).
    pub fn set_schedule_at(&mut self, schedule_at: impl Into<String>) {
        let schedule_at = schedule_at.into();
        self.schedule_at = if schedule_at.trim().is_empty() {
            None
        } else {
            Some(schedule_at)
        };
    }

    /// Attaches a file to the draft.
    ///
    /// The MIME type is guessed from the file name and the payload is
    /// base64-encoded for the request body.
    pub fn attach_file(&mut self, file_name: &str, bytes: &[u8]) {
        let mime_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();
        self.attachments.push(Attachment {
            file_name: file_name.to_string(),
            mime_type,
            base64: BASE64_STANDARD.encode(bytes),
            inline: None,
            cid: None,
        });
    }

    /// The attachments on the current draft.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Mutable access to the local template catalog.
    pub fn templates_mut(&mut self) -> &mut TemplateCatalog {
        &mut self.templates
    }

    /// The local template catalog.
    pub fn templates(&self) -> &[Template] {
        self.templates.templates()
    }

    /// Copies a template's content into the draft.
    ///
    /// Returns `false` for an unknown template id.
    pub fn apply_template(&mut self, id: &str) -> bool {
        match self.templates.get(id) {
            Some(template) => {
                self.content = template.content.clone();
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Validates the draft and hands it to the message gateway.
    ///
    /// A receipt whose status is `failed` is surfaced as
    /// [`NotiflowError::Delivery`] even though the HTTP call succeeded. On
    /// success the selection, draft, schedule, and attachments are reset for
    /// the next message; on any failure they are left as-is so the user can
    /// resubmit.
    pub async fn submit(&mut self) -> Result<DeliveryReceipt> {
        let outgoing = self.build_outgoing()?;

        let receipt = self.message_gateway.send(&outgoing).await?;
        if receipt.is_failed() {
            return Err(NotiflowError::Delivery(
                "El backend no pudo entregar el mensaje (estado FAILED). \
                 Revisa logs o configuración de correo."
                    .to_string(),
            ));
        }

        info!(
            recipients = outgoing.recipients.len(),
            scheduled = outgoing.schedule_at.is_some(),
            "message accepted by backend"
        );
        self.selection.clear();
        self.content.clear();
        self.schedule_at = None;
        self.attachments.clear();
        Ok(receipt)
    }

    fn build_outgoing(&self) -> Result<OutgoingMessage> {
        if self.content.trim().is_empty() {
            return Err(NotiflowError::validation("Escribe un mensaje."));
        }
        if self.content.chars().count() > MAX_CONTENT_LEN {
            return Err(NotiflowError::validation(
                "El mensaje supera el máximo de 1000 caracteres.",
            ));
        }

        let recipients = self.selection.recipient_emails(&self.users);
        if recipients.is_empty() {
            return Err(NotiflowError::validation(
                "Selecciona al menos un usuario con correo.",
            ));
        }
        if self.channels.is_empty() {
            return Err(NotiflowError::validation(
                "Selecciona al menos un canal de envío.",
            ));
        }
        let schedule_at = match self.send_mode {
            SendMode::Now => None,
            SendMode::Schedule => match &self.schedule_at {
                Some(at) => Some(at.clone()),
                None => {
                    return Err(NotiflowError::validation(
                        "Selecciona fecha y hora para programar.",
                    ));
                }
            },
        };

        Ok(OutgoingMessage {
            content: self.content.clone(),
            recipients,
            channels: self.channels.clone(),
            schedule_at,
            year: self.year.clone(),
            attachments: self.attachments.clone(),
        })
    }
}
