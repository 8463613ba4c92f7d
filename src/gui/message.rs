use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    /// "Load Image" was pressed
    LoadImage,
    /// The file dialog closed; `None` when it was cancelled
    ImageChosen(Option<PathBuf>),
}
