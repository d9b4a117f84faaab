//! Upload widget state machine.
//!
//! [`UploadWidget`] owns every piece of UI state for a single-file
//! upload: the selected file, its image preview, the drag highlight, and
//! the upload status.  The browser layer feeds it user gestures and the
//! completions of asynchronous work; the widget decides what the UI
//! shows.
//!
//! # Stale results
//!
//! Reading a file and uploading it both complete asynchronously, and the
//! user may pick another file, remove it, or reset in the meantime.  Each
//! asynchronous operation therefore carries a token captured when it was
//! started ([`SelectionToken`] for reads, [`UploadTicket`] for uploads).
//! Completions whose token no longer matches the current state are
//! discarded.
//!
//! # Status
//!
//! Upload progress is a single [`UploadStatus`], so an error message and
//! a success flag can never be shown together.

use crate::preview;
use crate::types::{FileInfo, SelectedFile, UploadError, UploadResponse};

/// Identifies one file selection.  Returned by [`UploadWidget::select`]
/// and passed back when the file contents have been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionToken(u64);

/// Identifies one upload attempt.  Returned inside [`UploadRequest`] and
/// passed back to [`UploadWidget::finish_upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTicket(u64);

/// Upload progress for the current widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadStatus {
    /// Nothing in flight, no outcome to report.
    #[default]
    Idle,
    /// An upload is in flight.
    Uploading(UploadTicket),
    /// The last upload succeeded.
    Succeeded(UploadResponse),
    /// The last operation failed; holds the user-visible message.
    Failed(String),
}

/// Everything the upload client needs for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Ticket to hand back with the result.
    pub ticket: UploadTicket,
    /// The file to send.
    pub file: SelectedFile,
}

/// The currently selected file.
#[derive(Debug, Clone)]
struct Selection {
    token: SelectionToken,
    info: FileInfo,
    /// `None` until the asynchronous read completes.
    contents: Option<Vec<u8>>,
    /// Only ever set for image files.
    preview: Option<String>,
}

/// State machine behind the drag-and-drop upload zone.
#[derive(Debug, Clone, Default)]
pub struct UploadWidget {
    selection: Option<Selection>,
    dragging: bool,
    status: UploadStatus,
    /// Rejection shown while an upload is in flight, since `status` must
    /// stay `Uploading` until the result arrives.
    rejection: Option<String>,
    /// Monotonic source for tokens and tickets.  Never reset, so a token
    /// from before a [`reset`](Self::reset) can never match afterwards.
    generation: u64,
}

impl UploadWidget {
    /// Create a widget in its initial (empty) state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    /// Metadata of the selected file, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&FileInfo> {
        self.selection.as_ref().map(|s| &s.info)
    }

    /// Image preview `data:` URL for the selected file, if available.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.selection.as_ref().and_then(|s| s.preview.as_deref())
    }

    /// Returns `true` while a file is being dragged over the drop zone.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` if a file is selected but its contents are still
    /// being read.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| s.contents.is_none())
    }

    /// Returns `true` if the selected file can be uploaded right now.
    #[must_use]
    pub fn can_upload(&self) -> bool {
        !self.is_uploading() && self.selection.as_ref().is_some_and(|s| s.contents.is_some())
    }

    /// Returns `true` while an upload is in flight.
    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        matches!(self.status, UploadStatus::Uploading(_))
    }

    /// Returns `true` if the last upload succeeded.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self.status, UploadStatus::Succeeded(_))
    }

    /// Server response of the last successful upload.
    #[must_use]
    pub const fn upload_response(&self) -> Option<&UploadResponse> {
        match &self.status {
            UploadStatus::Succeeded(resp) => Some(resp),
            _ => None,
        }
    }

    /// The user-visible error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            UploadStatus::Failed(msg) => Some(msg),
            _ => self.rejection.as_deref(),
        }
    }

    /// Current upload status.
    #[must_use]
    pub const fn status(&self) -> &UploadStatus {
        &self.status
    }

    // --- Drag state ---

    /// A file is being dragged over the drop zone.
    pub const fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// The drag left the drop zone.
    pub const fn end_drag(&mut self) {
        self.dragging = false;
    }

    // --- Selection ---

    /// Handle files dropped onto the zone.
    ///
    /// Ends the drag, then behaves like [`pick_files`](Self::pick_files).
    pub fn drop_files<I>(&mut self, files: I) -> Option<Result<SelectionToken, UploadError>>
    where
        I: IntoIterator<Item = FileInfo>,
    {
        self.end_drag();
        self.pick_files(files)
    }

    /// Handle files chosen with the file picker.
    ///
    /// Only the first file is considered; the rest are ignored.  Returns
    /// `None` for an empty list, otherwise the outcome of
    /// [`select`](Self::select).
    pub fn pick_files<I>(&mut self, files: I) -> Option<Result<SelectionToken, UploadError>>
    where
        I: IntoIterator<Item = FileInfo>,
    {
        files.into_iter().next().map(|info| self.select(info))
    }

    /// Select a file, replacing any previous selection.
    ///
    /// On success the error and success state are cleared and the
    /// returned token must be passed to
    /// [`load_contents`](Self::load_contents) or
    /// [`read_failed`](Self::read_failed) once the read finishes.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::FileTooLarge`] if the file exceeds
    /// [`MAX_FILE_SIZE`](crate::MAX_FILE_SIZE).  The error message is
    /// shown and the previous selection is kept, along with any upload of
    /// it that is still in flight.
    pub fn select(&mut self, info: FileInfo) -> Result<SelectionToken, UploadError> {
        if let Err(e) = info.check_size() {
            self.fail(&e);
            return Err(e);
        }
        self.rejection = None;

        let token = SelectionToken(self.next_generation());
        self.selection = Some(Selection {
            token,
            info,
            contents: None,
            preview: None,
        });
        self.status = UploadStatus::Idle;
        Ok(token)
    }

    /// Store the contents read for the selection identified by `token`.
    ///
    /// Image files also get their preview computed here.  Returns `false`
    /// (and changes nothing) if the selection has since been replaced or
    /// removed.
    pub fn load_contents(&mut self, token: SelectionToken, contents: Vec<u8>) -> bool {
        let Some(selection) = self.current_selection_mut(token) else {
            return false;
        };
        selection.preview = preview::preview_for(&selection.info, &contents);
        selection.contents = Some(contents);
        true
    }

    /// Report that reading the selection identified by `token` failed.
    ///
    /// The unreadable file is dropped and the error shown.  Returns
    /// `false` (and changes nothing) for a stale token.
    pub fn read_failed(&mut self, token: SelectionToken, reason: impl Into<String>) -> bool {
        if self.current_selection_mut(token).is_none() {
            return false;
        }
        self.selection = None;
        self.fail(&UploadError::ReadFailed(reason.into()));
        true
    }

    /// Clear the selected file, its preview and any error.
    ///
    /// A previous success is kept.  An in-flight upload becomes stale.
    pub fn remove(&mut self) {
        self.selection = None;
        self.rejection = None;
        if matches!(
            self.status,
            UploadStatus::Failed(_) | UploadStatus::Uploading(_)
        ) {
            self.status = UploadStatus::Idle;
        }
    }

    /// Return to the initial state.
    ///
    /// In-flight reads and uploads become stale.
    pub fn reset(&mut self) {
        self.selection = None;
        self.dragging = false;
        self.status = UploadStatus::Idle;
        self.rejection = None;
    }

    // --- Upload ---

    /// Start uploading the selected file.
    ///
    /// Returns `None` without changing anything when no file is selected,
    /// its contents are still loading, or an upload is already in flight.
    /// Otherwise clears any error, enters [`UploadStatus::Uploading`], and
    /// returns the request to hand to the upload client.
    pub fn begin_upload(&mut self) -> Option<UploadRequest> {
        if self.is_uploading() {
            return None;
        }
        let selection = self.selection.as_ref()?;
        let contents = selection.contents.clone()?;
        let file = SelectedFile::new(selection.info.clone(), contents);

        let ticket = UploadTicket(self.next_generation());
        self.status = UploadStatus::Uploading(ticket);
        self.rejection = None;
        Some(UploadRequest { ticket, file })
    }

    /// Record the outcome of the upload identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) if the upload is no longer
    /// the one in flight.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadResponse, UploadError>,
    ) -> bool {
        if self.status != UploadStatus::Uploading(ticket) {
            return false;
        }
        self.rejection = None;
        self.status = match result {
            Ok(resp) => UploadStatus::Succeeded(resp),
            Err(e) => UploadStatus::Failed(e.user_message()),
        };
        true
    }

    // --- Internals ---

    /// Show `error` to the user.
    ///
    /// An in-flight upload keeps its status so its result still applies.
    fn fail(&mut self, error: &UploadError) {
        if self.is_uploading() {
            self.rejection = Some(error.user_message());
        } else {
            self.status = UploadStatus::Failed(error.user_message());
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn current_selection_mut(&mut self, token: SelectionToken) -> Option<&mut Selection> {
        self.selection.as_mut().filter(|s| s.token == token)
    }
}
