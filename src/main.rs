use classifier::impl_tract_onnx::ClassifierLoaderTractOnnx;
use config::Config;
use identifier::main::Identifier;
use image_source::impl_http::ImageFetcherHttp;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;

mod classifier;
mod config;
mod identifier;
mod image_source;
mod library;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let primary_loader = Arc::new(ClassifierLoaderTractOnnx::new(
        config.primary_model.clone(),
        config.http_timeout,
    ));
    let secondary_loader = Arc::new(ClassifierLoaderTractOnnx::new(
        config.secondary_model.clone(),
        config.http_timeout,
    ));
    let image_fetcher = Arc::new(
        ImageFetcherHttp::new(config.http_timeout)
            .map_err(|error| -> Box<dyn std::error::Error> { error })?,
    );

    let identifier = Identifier::new(
        config,
        logger.clone(),
        primary_loader,
        secondary_loader,
        image_fetcher,
    );

    let runtime = identifier.clone();
    let runtime_logger = logger.clone();
    std::thread::spawn(move || {
        if let Err(error) = runtime.run() {
            let _ = runtime_logger.error(&format!("identifier loop stopped: {}", error));
        }
    });

    ui::egui_app::run_ui(identifier.model.clone(), identifier.msg_sender.clone())?;

    Ok(())
}
