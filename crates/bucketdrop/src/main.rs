use bucketdrop_io::{ClientConfig, FileUpload, UploadClient};
use dioxus::prelude::*;
use tracing::Level;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        web_sys::console::warn_1(&format!("logger not installed: {e}").into());
    }
    dioxus::launch(app);
}

/// Root application component.
///
/// Resolves the storage API configuration once and renders the upload
/// zone, or a configuration error if the base URL is unusable.
fn app() -> Element {
    let client = use_hook(|| match ClientConfig::from_environment() {
        Ok(config) => {
            tracing::info!(upload_url = %config.upload_url(), "storage API configured");
            Ok(UploadClient::new(config))
        }
        Err(e) => {
            tracing::error!(error = %e, "storage API misconfigured");
            Err(e)
        }
    });

    let content = match client {
        Ok(client) => rsx! {
            FileUpload { client: client }
        },
        Err(e) => rsx! {
            div { class: "banner banner-error", role: "alert",
                p { "Uploads are unavailable: {e}" }
            }
        },
    };

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "app",
            header { class: "app-header",
                h1 { class: "app-title", "bucketdrop" }
                p { class: "app-subtitle", "Upload a file to object storage" }
            }

            main { class: "app-main", {content} }
        }
    }
}
