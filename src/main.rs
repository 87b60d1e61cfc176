use classification_pipeline::pipeline::ClassificationPipeline;
use config::Config;
use display::impl_console::DisplayConsole;
use image_classifier::factory::build_image_classifier;
use image_normalizer::decoded_image::DecodedImage;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use presenter::Presenter;
use std::sync::{Arc, Mutex};

mod classification_pipeline;
mod config;
mod decision_rule;
mod display;
mod image_classifier;
mod image_normalizer;
mod label_list;
mod library;
mod presenter;

const CONFIG_PATH_ENV: &str = "RICE_DETECTION_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path)?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone()));

    let image_classifier = build_image_classifier(&config, logger.clone())?;

    let pipeline = ClassificationPipeline::new(
        config.pipeline_settings(),
        config.label_list()?,
        image_classifier,
        logger.clone(),
    );

    let display = Arc::new(Mutex::new(DisplayConsole::new("Rice Disease Detection")));

    let presenter = Presenter::new(pipeline, display, logger.clone());

    // The first argument stands in for a gallery pick.
    let outcome = match std::env::args().nth(1).map(DecodedImage::open).transpose() {
        Ok(image) => presenter.on_predict(image.as_ref())?,
        Err(e) => presenter.on_unreadable_image(e)?,
    };
    logger.info(&format!("Outcome: {:?}", outcome))?;

    Ok(())
}
