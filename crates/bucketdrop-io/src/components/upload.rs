//! File upload component with drag-and-drop, file picker and upload button.

use bucketdrop_core::{FileInfo, MAX_FILE_SIZE, UploadWidget, format_size};
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCheck, LdUpload};

use crate::client::UploadClient;
use crate::components::FileCard;

/// Metadata the widget needs from a browser file.
fn file_info(file: &FileData) -> FileInfo {
    FileInfo::new(
        file.name(),
        file.size(),
        file.content_type().unwrap_or_default(),
    )
}

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Client used to send the selected file.
    client: UploadClient,
}

/// A drag-and-drop zone with a file picker, a preview card for the
/// selected file, and an upload button.
///
/// Accepts one file of any type up to 10 MB.  All state lives in a single
/// [`UploadWidget`] signal and is only changed through its methods.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut widget = use_signal(UploadWidget::new);

    // Select the first file and read it in the background.
    //
    // Shared by the file-picker (`handle_files`) and drag-and-drop
    // (`handle_drop`) paths; `dropped` only decides whether the drag
    // highlight is cleared as part of the selection.
    let process_files = move |files: Vec<FileData>, dropped: bool| async move {
        let infos: Vec<FileInfo> = files.iter().map(file_info).collect();
        let outcome = if dropped {
            widget.write().drop_files(infos)
        } else {
            widget.write().pick_files(infos)
        };

        let token = match outcome {
            None => return,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "file rejected");
                return;
            }
            Some(Ok(token)) => token,
        };
        if files.len() > 1 {
            tracing::debug!(count = files.len(), "ignoring all but the first file");
        }
        let Some(file) = files.first() else {
            return;
        };

        match file.read_bytes().await {
            Ok(bytes) => {
                // Yield to the browser event loop so the "Reading…" state
                // paints before the preview is encoded.
                gloo_timers::future::TimeoutFuture::new(0).await;
                if !widget.write().load_contents(token, bytes.to_vec()) {
                    tracing::debug!("discarding stale file read");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read file");
                widget.write().read_failed(token, e.to_string());
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files(), false).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        process_files(evt.files(), true).await;
    };

    let start_upload = move |_| {
        let Some(request) = widget.write().begin_upload() else {
            return;
        };
        let client = props.client.clone();
        spawn(async move {
            let result = client.upload(&request.file).await;
            if !widget.write().finish_upload(request.ticket, result) {
                tracing::debug!("discarding stale upload result");
            }
        });
    };

    let state = widget.read();
    let dragging = state.is_dragging();
    let uploading = state.is_uploading();
    let loading = state.is_loading();
    let can_upload = state.can_upload();
    let selected = state.selected().cloned();
    let preview = state.preview().map(str::to_owned);
    let error = state.error_message().map(str::to_owned);
    let stored_name = state.upload_response().map(|r| r.file_name.clone());
    drop(state);

    let zone_class = if dragging {
        "drop-zone drop-zone-active"
    } else {
        "drop-zone"
    };
    let limit = format_size(MAX_FILE_SIZE);

    rsx! {
        div { class: "upload",
            if let Some(ref name) = stored_name {
                div { class: "banner banner-success", role: "status",
                    Icon { width: 20, height: 20, icon: LdCheck }
                    p { "Uploaded {name}" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| widget.write().reset(),
                        "Upload another file"
                    }
                }
            }

            div {
                class: "{zone_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    widget.write().begin_drag();
                },
                // Children of an active zone have `pointer-events: none`
                // (see `.drop-zone-active *`), so this only fires when the
                // pointer leaves the zone itself.
                ondragleave: move |_| {
                    widget.write().end_drag();
                },
                ondrop: handle_drop,

                if let Some(info) = selected {
                    FileCard {
                        info: info,
                        preview: preview,
                        loading: loading,
                        uploading: uploading,
                        on_remove: move |_| widget.write().remove(),
                    }
                } else {
                    div { class: "drop-zone-icon",
                        Icon { width: 40, height: 40, icon: LdUpload }
                    }
                    p { class: "drop-zone-hint", "Drop a file here or " }
                    label { class: "btn btn-primary",
                        input {
                            r#type: "file",
                            class: "hidden",
                            onchange: handle_files,
                        }
                        "Choose File"
                    }
                    p { class: "drop-zone-limit", "Any file type, up to {limit}" }
                }
            }

            if let Some(ref err) = error {
                div { class: "banner banner-error", role: "alert",
                    p { "{err}" }
                }
            }

            if can_upload || uploading {
                button {
                    class: "btn btn-primary btn-upload",
                    disabled: !can_upload,
                    onclick: start_upload,
                    if uploading {
                        span { class: "spinner" }
                        "Uploading…"
                    } else {
                        "Upload"
                    }
                }
            }
        }
    }
}
