//! PresenceAssembler - builds one payload per refresh.
//!
//! Steps, in order:
//!
//! 1. Default images: small = debug / insiders / stable app key with the
//!    rendered small-image text; large = idle key with the idling text.
//! 2. Detail lines from the classification (each may be suppressed).
//! 3. Start timestamp carried from the previous payload.
//! 4. Optional swap of the two image slots (key and text move together).
//! 5. Repository button from the selected repository's remote.
//! 6. With a document open, the large slot (small slot when swapped) shows
//!    the file-type icon and the rendered large-image template.
//!
//! Synthesis never fails. Missing data degrades to sentinels or fallbacks.

use crate::anchor::{carry_start_timestamp, Clock, SystemClock};
use crate::classify::{resolve_detail, ActivityClass, DetailSlot};
use crate::config::PresenceConfig;
use crate::context::TemplateContext;
use crate::icons::{ExtensionIconResolver, FileIconResolver};
use crate::probe::{FileSizeProbe, FsFileSizeProbe};
use crate::template::render_template;
use crate::types::PresenceSnapshot;
use presence_protocol::{pad_to_min_width, PresenceButton, PresencePayload, MIN_TEXT_CHARS};
use tracing::{debug, trace};

pub const IDLE_IMAGE_KEY: &str = "vscode-big";
pub const DEBUG_IMAGE_KEY: &str = "debug";
pub const VSCODE_IMAGE_KEY: &str = "vscode";
pub const VSCODE_INSIDERS_IMAGE_KEY: &str = "vscode-insiders";

const INSIDERS_MARKER: &str = "Insiders";

/// An image key and its hover text. Swapping moves both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub key: String,
    pub text: String,
}

impl ImageSlot {
    fn new(key: &str, text: String) -> Self {
        Self {
            key: key.to_string(),
            text: pad_to_min_width(&text, MIN_TEXT_CHARS),
        }
    }
}

/// Small-image key before any document override: debugging wins, then the
/// Insiders build, then the stable app.
pub fn default_small_image_key(snapshot: &PresenceSnapshot) -> &'static str {
    if snapshot.debugging {
        DEBUG_IMAGE_KEY
    } else if snapshot.app_name.contains(INSIDERS_MARKER) {
        VSCODE_INSIDERS_IMAGE_KEY
    } else {
        VSCODE_IMAGE_KEY
    }
}

/// Builds presence payloads from snapshots.
///
/// Collaborators are injected so tests run without a filesystem or a real clock.
pub struct PresenceAssembler {
    icons: Box<dyn FileIconResolver>,
    probe: Box<dyn FileSizeProbe>,
    clock: Box<dyn Clock>,
}

impl Default for PresenceAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceAssembler {
    pub fn new() -> Self {
        Self {
            icons: Box::new(ExtensionIconResolver),
            probe: Box::new(FsFileSizeProbe),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_icon_resolver(mut self, icons: impl FileIconResolver + 'static) -> Self {
        self.icons = Box::new(icons);
        self
    }

    pub fn with_file_size_probe(mut self, probe: impl FileSizeProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Builds the payload for one refresh.
    ///
    /// `previous_start` is the previous payload's `start_timestamp`; the
    /// returned payload carries the value to pass next time.
    pub fn assemble(
        &self,
        config: &PresenceConfig,
        snapshot: &PresenceSnapshot,
        previous_start: Option<i64>,
    ) -> PresencePayload {
        let class = ActivityClass::of(snapshot);
        let document = snapshot.editor.document.as_ref();
        let icon_key = document.map(|doc| self.icons.resolve(doc));

        let mut ctx = TemplateContext::new(snapshot, config, self.probe.as_ref());
        if let Some(icon) = icon_key.as_deref() {
            ctx = ctx.with_language(icon);
        }

        let mut small = ImageSlot::new(
            default_small_image_key(snapshot),
            render_template(&config.small_image, &mut ctx),
        );
        let mut large = ImageSlot::new(
            IDLE_IMAGE_KEY,
            render_template(&config.large_image_idling, &mut ctx),
        );

        let details = resolve_detail(config, DetailSlot::Details, class, &mut ctx);
        let state = resolve_detail(config, DetailSlot::State, class, &mut ctx);

        let start_timestamp = carry_start_timestamp(
            previous_start,
            !config.remove_timestamp,
            self.clock.as_ref(),
        );

        if config.swap_big_and_small_image {
            std::mem::swap(&mut large, &mut small);
        }

        let buttons = if config.remove_remote_repository {
            Vec::new()
        } else {
            ctx.repository()
                .url
                .clone()
                .map(|url| {
                    vec![PresenceButton {
                        label: config.repository_button_label.clone(),
                        url,
                    }]
                })
                .unwrap_or_default()
        };

        if let (Some(document), Some(icon)) = (document, icon_key.as_deref()) {
            let document_slot =
                ImageSlot::new(icon, render_template(&config.large_image, &mut ctx));
            if config.swap_big_and_small_image {
                small = document_slot;
            } else {
                large = document_slot;
            }
            trace!(
                language_id = %document.language_id,
                icon = %icon,
                "Resolved document language"
            );
        }

        debug!(
            class = %class,
            has_button = !buttons.is_empty(),
            has_timestamp = start_timestamp.is_some(),
            "Assembled presence payload"
        );

        PresencePayload {
            activity_type: config.activity_type,
            details,
            state,
            start_timestamp,
            large_image_key: large.key,
            large_image_text: large.text,
            small_image_key: small.key,
            small_image_text: small.text,
            buttons,
        }
        .sanitized()
    }
}
