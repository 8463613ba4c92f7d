use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::detection::ContourAnalyzer;
use crate::render::Figure;

#[derive(Debug)]
pub struct AppState {
    pub config: PipelineConfig,
    pub image_path: Option<PathBuf>,
    pub figure: Option<Figure>,
    pub status: String,
}

impl AppState {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            image_path: None,
            figure: None,
            status: "No image loaded".to_string(),
        }
    }

    /// Analyze the chosen file and replace the current figure.
    /// On failure the previous figure stays.
    pub fn load_and_render(&mut self, path: PathBuf) -> anyhow::Result<()> {
        let analysis = ContourAnalyzer::new(self.config.clone()).analyze_path(&path)?;

        self.status = format!(
            "{} - {} objects ({})",
            path.display(),
            analysis.objects.len(),
            analysis.binarization.name()
        );
        self.figure = Some(Figure::render(&analysis));
        self.image_path = Some(path);
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
