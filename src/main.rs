use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use iced::widget::image::Handle;
use iced::{event, window, Element, Event, Subscription, Task, Theme};

mod api;
mod capture;
mod data_uri;
mod error;
mod files;
mod prompt;
mod state;
mod ui;

use api::GeminiClient;
use capture::CameraSession;
use error::AppError;
use state::modes::{AgeDirection, EditMode};
use state::session::{GeneratedImage, ImageAsset, ImageSource, Session};

/// Main application state
struct App {
    /// Current edit session (input image, mode, generation lifecycle)
    session: Session,
    /// Endpoint client; `None` when no API key is configured
    client: Option<GeminiClient>,
    /// Open camera stream while the capture overlay is shown
    camera: Option<Arc<CameraSession>>,
    /// Latest preview frame converted for display
    camera_preview: Option<Handle>,
    /// Status line shown under the tools
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Choose from Device"
    PickFile,
    /// Picker finished (None = dialog cancelled)
    FileLoaded(Option<error::Result<ImageAsset>>),
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// Dropped file finished loading
    DroppedLoaded(error::Result<ImageAsset>),
    /// User clicked "Open Camera"
    OpenCamera,
    /// Camera negotiation finished
    CameraOpened(error::Result<Arc<CameraSession>>),
    /// Preview refresh while the overlay is open
    CameraTick,
    /// Shutter pressed
    CapturePressed,
    /// Capture overlay dismissed
    CloseCamera,
    /// A tool was selected from the grid
    ModeSelected(EditMode),
    /// Target age bucket selected
    AgeSelected(AgeDirection),
    /// Custom instruction text edited
    CustomTextChanged(String),
    /// Generate trigger pressed
    Generate,
    /// The endpoint call resolved
    GenerationFinished(error::Result<GeneratedImage>),
    /// User clicked "Download HD"
    Download,
    /// Save dialog finished (None = cancelled)
    DownloadFinished(Option<error::Result<PathBuf>>),
    /// Trash button: drop image, result and error
    Reset,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let client = match GeminiClient::from_env() {
            Ok(client) => Some(client),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };

        let status = if client.is_some() {
            "Ready. Load a photo to begin.".to_string()
        } else {
            "Set GEMINI_API_KEY to enable generation.".to_string()
        };

        (
            App {
                session: Session::default(),
                client,
                camera: None,
                camera_preview: None,
                status,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => Task::perform(files::pick_image(), Message::FileLoaded),
            Message::FileLoaded(None) => Task::none(),
            Message::FileLoaded(Some(Ok(asset))) => {
                self.install_asset(asset);
                Task::none()
            }
            Message::FileLoaded(Some(Err(e))) => {
                self.session.fail(&e);
                Task::none()
            }

            Message::FileDropped(path) => {
                Task::perform(files::load_dropped(path), Message::DroppedLoaded)
            }
            Message::DroppedLoaded(Ok(asset)) => {
                self.install_asset(asset);
                Task::none()
            }
            Message::DroppedLoaded(Err(e)) => {
                // Rejected drop: error banner only, current image untouched.
                self.session.fail(&e);
                Task::none()
            }

            Message::OpenCamera => {
                if self.camera.is_some() {
                    return Task::none();
                }
                self.status = "Opening camera...".to_string();
                Task::perform(CameraSession::open(), Message::CameraOpened)
            }
            Message::CameraOpened(Ok(session)) => {
                self.camera = Some(session);
                self.camera_preview = None;
                self.status = "Camera ready.".to_string();
                Task::none()
            }
            Message::CameraOpened(Err(e)) => {
                // The overlay never opens; the banner explains why.
                self.session.fail(&e);
                self.status = "Camera unavailable.".to_string();
                Task::none()
            }
            Message::CameraTick => {
                if let Some(frame) = self.camera.as_ref().and_then(|c| c.latest_frame()) {
                    self.camera_preview =
                        Some(Handle::from_rgba(frame.width, frame.height, frame.rgba));
                }
                Task::none()
            }
            Message::CapturePressed => {
                if let Some(camera) = &self.camera {
                    match camera.capture_jpeg() {
                        Ok(jpeg) => {
                            let asset = ImageAsset::from_parts(
                                jpeg,
                                "image/jpeg".to_string(),
                                ImageSource::Camera,
                            );
                            self.close_camera();
                            self.install_asset(asset);
                        }
                        Err(e) => {
                            // Shutter before the first frame; keep the overlay up.
                            log::warn!("capture failed: {}", e);
                        }
                    }
                }
                Task::none()
            }
            Message::CloseCamera => {
                self.close_camera();
                Task::none()
            }

            Message::ModeSelected(mode) => {
                self.session.select_mode(mode);
                Task::none()
            }
            Message::AgeSelected(age) => {
                self.session.age = age;
                Task::none()
            }
            Message::CustomTextChanged(value) => {
                self.session.custom_text = value;
                Task::none()
            }

            Message::Generate => self.start_generation(),
            Message::GenerationFinished(outcome) => {
                self.status = match &outcome {
                    Ok(_) => "Done.".to_string(),
                    Err(_) => "Generation failed.".to_string(),
                };
                self.session.finish_generation(outcome);
                Task::none()
            }

            Message::Download => {
                if let Some(result) = self.session.generation().result() {
                    return Task::perform(
                        files::save_result(result.clone(), self.session.mode),
                        Message::DownloadFinished,
                    );
                }
                Task::none()
            }
            Message::DownloadFinished(None) => Task::none(),
            Message::DownloadFinished(Some(Ok(path))) => {
                self.status = format!("Saved to {}", path.display());
                Task::none()
            }
            Message::DownloadFinished(Some(Err(e))) => {
                self.session.fail(&e);
                Task::none()
            }

            Message::Reset => {
                self.session.reset();
                self.status = "Ready. Load a photo to begin.".to_string();
                Task::none()
            }
        }
    }

    /// Kick off one generation cycle if the trigger is live.
    fn start_generation(&mut self) -> Task<Message> {
        let Some(payload) = self.session.asset().map(|a| a.data_uri.clone()) else {
            return Task::none();
        };
        let Some(client) = self.client.clone() else {
            self.session.fail(&AppError::Auth(
                "GEMINI_API_KEY not set and no API key provided".to_string(),
            ));
            return Task::none();
        };
        if !self.session.begin_generation() {
            return Task::none();
        }

        let instruction = prompt::build_instruction(
            self.session.mode,
            self.session.age,
            &self.session.custom_text,
        );
        self.status = "Processing image...".to_string();

        Task::perform(
            async move { client.edit_image(&instruction, &payload).await },
            Message::GenerationFinished,
        )
    }

    /// Install a new input image; any previous result/error disappears.
    fn install_asset(&mut self, asset: ImageAsset) {
        self.session.set_asset(asset);
        self.status = "Photo loaded. Pick a tool and generate.".to_string();
    }

    /// Release the camera stream on any exit from the overlay.
    fn close_camera(&mut self) {
        if let Some(camera) = self.camera.take() {
            camera.shutdown();
        }
        self.camera_preview = None;
    }

    fn view(&self) -> Element<'_, Message> {
        if self.camera.is_some() {
            ui::camera::view(self.camera_preview.as_ref())
        } else {
            ui::panels::view(&self.session, &self.status)
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let drops = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        if self.camera.is_some() {
            let preview =
                iced::time::every(Duration::from_millis(33)).map(|_| Message::CameraTick);
            Subscription::batch([drops, preview])
        } else {
            drops
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("Photo Revive", App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .centered()
        .run_with(App::new)
}
