use iced::{
    Alignment::Center,
    Element, Length, Task, Theme,
    widget::{button, column, container, image as iced_image, row, text},
};
use image::DynamicImage;
use rfd::AsyncFileDialog;

use super::widgets::{PanelView, figure_grid};
use super::{AppState, Message};
use crate::config::PipelineConfig;
use crate::detection::loader::SUPPORTED_EXTENSIONS;
use crate::render::Figure;

pub struct GeomPropsApp {
    state: AppState,
    panels: Vec<PanelView>,
}

impl GeomPropsApp {
    pub fn new(config: PipelineConfig) -> (Self, Task<Message>) {
        (
            Self {
                state: AppState::new(config),
                panels: Vec::new(),
            },
            Task::none(),
        )
    }

    pub fn title(&self) -> String {
        match &self.state.image_path {
            Some(path) => format!("Geometry Properties - {}", path.display()),
            None => "Geometry Properties".to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadImage => Task::perform(
                AsyncFileDialog::new()
                    .set_title("Load Image")
                    .add_filter("Image files", &SUPPORTED_EXTENSIONS)
                    .pick_file(),
                |handle| Message::ImageChosen(handle.map(|h| h.path().to_path_buf())),
            ),
            Message::ImageChosen(None) => Task::none(),
            Message::ImageChosen(Some(path)) => {
                // Runs to completion before the window handles further events
                match self.state.load_and_render(path) {
                    Ok(()) => {
                        if let Some(figure) = &self.state.figure {
                            self.panels = panel_views(figure);
                        }
                    }
                    Err(e) => {
                        log::warn!("Failed to load image: {:#}", e);
                        self.state.status = format!("Error: {:#}", e);
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let controls = row![
            button("Load Image").on_press(Message::LoadImage),
            text(&self.state.status),
        ]
        .spacing(20)
        .align_y(Center);

        let body: Element<'_, Message> = if self.panels.is_empty() {
            container(text("Load an image to see its contours and centroids"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into()
        } else {
            figure_grid(&self.panels)
        };

        column![controls, body].spacing(10).padding(10).into()
    }
}

fn panel_views(figure: &Figure) -> Vec<PanelView> {
    figure
        .panels
        .iter()
        .map(|panel| {
            let rgba = DynamicImage::ImageRgb8(panel.image.clone()).to_rgba8();
            PanelView {
                title: panel.title,
                handle: iced_image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw()),
            }
        })
        .collect()
}
