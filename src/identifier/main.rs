use crate::classifier::interface::{ClassifierLoader, ImageClassifier};
use crate::config::Config;
use crate::identifier::core::{init, transition, Effect, Model, Msg};
use crate::image_source::interface::ImageFetcher;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Runtime around the pure core: owns the msg channel, the shared model
/// snapshot the UI reads, and the loaded classifier handles.
#[derive(Clone)]
pub struct Identifier {
    pub model: Arc<Mutex<Model>>,
    pub msg_sender: Sender<Msg>,
    pub msg_receiver: Arc<Mutex<Receiver<Msg>>>,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub primary_loader: Arc<dyn ClassifierLoader>,
    pub secondary_loader: Arc<dyn ClassifierLoader>,
    pub image_fetcher: Arc<dyn ImageFetcher>,
    pub primary: Arc<Mutex<Option<Arc<dyn ImageClassifier>>>>,
    pub secondary: Arc<Mutex<Option<Arc<dyn ImageClassifier>>>>,
}

impl Identifier {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        primary_loader: Arc<dyn ClassifierLoader>,
        secondary_loader: Arc<dyn ClassifierLoader>,
        image_fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();
        let initial = init();

        Self {
            model: Arc::new(Mutex::new(initial.0)),
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
            config,
            logger,
            primary_loader,
            secondary_loader,
            image_fetcher,
            primary: Arc::new(Mutex::new(None)),
            secondary: Arc::new(Mutex::new(None)),
        }
    }

    pub fn send(&self, msg: Msg) {
        let _ = self.msg_sender.send(msg);
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info(&format!(
            "starting, primary model at {}, secondary model at {}",
            self.config.primary_model.topology_location,
            self.config.secondary_model.topology_location
        ));

        let (initial_model, initial_effects) = init();
        *self.model.lock().unwrap() = initial_model.clone();
        self.spawn_effects(initial_effects);

        let mut current_model = initial_model;

        loop {
            let msg = self.msg_receiver.lock().unwrap().recv()?;

            let _ = self
                .logger
                .info(&format!("msg:\n\t{}", msg.to_display_string()));

            let (new_model, effects) = transition(current_model, msg);

            let _ = self.logger.info(&format!(
                "model:\n\t{:?}\neffects:\n\t{:?}",
                new_model, effects
            ));

            current_model = new_model.clone();
            *self.model.lock().unwrap() = new_model;

            self.spawn_effects(effects);
        }
    }
}
