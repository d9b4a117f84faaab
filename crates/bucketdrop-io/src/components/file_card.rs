//! Card describing the selected file.

use bucketdrop_core::{FileInfo, format_size};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdFile, LdX};

/// Props for the [`FileCard`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileCardProps {
    /// The selected file.
    info: FileInfo,
    /// Image preview `data:` URL, if the file is an image and has been read.
    #[props(!optional)]
    preview: Option<String>,
    /// `true` while the file contents are still being read.
    loading: bool,
    /// `true` while the file is being uploaded; hides the remove button.
    uploading: bool,
    /// Called when the user removes the file.
    on_remove: EventHandler<()>,
}

/// Shows the selected file's name, size and (for images) a preview,
/// with a button to remove it.
#[component]
pub fn FileCard(props: FileCardProps) -> Element {
    let size = format_size(props.info.size);
    let on_remove = props.on_remove;

    rsx! {
        div { class: "file-card",
            if let Some(ref src) = props.preview {
                img {
                    class: "file-card-preview",
                    src: "{src}",
                    alt: "Preview of {props.info.name}",
                }
            } else {
                div { class: "file-card-icon",
                    Icon { width: 40, height: 40, icon: LdFile }
                }
            }

            div { class: "file-card-details",
                p { class: "file-card-name", title: "{props.info.name}", "{props.info.name}" }
                p { class: "file-card-size",
                    if props.loading {
                        "{size} · Reading…"
                    } else {
                        "{size}"
                    }
                }
            }

            if !props.uploading {
                button {
                    class: "file-card-remove",
                    aria_label: "Remove {props.info.name}",
                    title: "Remove",
                    onclick: move |evt: MouseEvent| {
                        // The card sits inside the drop zone; keep the click local.
                        evt.stop_propagation();
                        on_remove.call(());
                    },
                    Icon { width: 18, height: 18, icon: LdX }
                }
            }
        }
    }
}
