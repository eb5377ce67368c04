/// File ingestion and result download
///
/// Upload-from-disk and drag-and-drop converge here: read bytes, sniff the
/// format, and build an [`ImageAsset`]. Downloads write the generated PNG
/// under a mode-and-timestamp name, defaulting to the user's Pictures
/// directory.

use std::path::PathBuf;

use chrono::Utc;
use rfd::AsyncFileDialog;

use crate::error::Result;
use crate::state::modes::EditMode;
use crate::state::session::{GeneratedImage, ImageAsset, ImageSource};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// Show the native picker and load the chosen image.
/// Returns `None` when the dialog is cancelled.
pub async fn pick_image() -> Option<Result<ImageAsset>> {
    let file = AsyncFileDialog::new()
        .set_title("Choose a Photo")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await?;

    Some(load(file.path().to_path_buf(), ImageSource::Picker).await)
}

/// Load a dropped file. Non-image files are rejected by the sniffer and the
/// caller leaves the current asset untouched.
pub async fn load_dropped(path: PathBuf) -> Result<ImageAsset> {
    load(path, ImageSource::DragDrop).await
}

async fn load(path: PathBuf, source: ImageSource) -> Result<ImageAsset> {
    log::info!("loading image from {}", path.display());
    let bytes = tokio::fs::read(&path).await?;
    ImageAsset::from_bytes(bytes, source)
}

/// Save the generated image via the native save dialog.
/// Returns the chosen path, or `None` when the dialog is cancelled.
pub async fn save_result(image: GeneratedImage, mode: EditMode) -> Option<Result<PathBuf>> {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Save Result")
        .set_file_name(download_file_name(mode))
        .add_filter("PNG image", &["png"]);

    if let Some(pictures) = dirs::picture_dir() {
        dialog = dialog.set_directory(pictures);
    }

    let file = dialog.save_file().await?;
    let path = file.path().to_path_buf();

    Some(match tokio::fs::write(&path, &image.bytes).await {
        Ok(()) => {
            log::info!("saved result to {}", path.display());
            Ok(path)
        }
        Err(e) => Err(e.into()),
    })
}

/// Download name: app, mode slug, millisecond timestamp, always `.png`.
fn download_file_name(mode: EditMode) -> String {
    format!(
        "photo-revive-{}-{}.png",
        mode.slug(),
        Utc::now().timestamp_millis()
    )
}
