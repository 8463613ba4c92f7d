mod app;
mod message;
mod state;
mod widgets;

pub use app::GeomPropsApp;
pub use message::Message;
pub use state::AppState;

use crate::config::PipelineConfig;

/// Open the viewer window and block until it is closed
pub fn run(config: PipelineConfig) -> iced::Result {
    iced::application(
        move || GeomPropsApp::new(config.clone()),
        GeomPropsApp::update,
        GeomPropsApp::view,
    )
    .title(GeomPropsApp::title)
    .theme(GeomPropsApp::theme)
    .run()
}
