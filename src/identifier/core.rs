use image::DynamicImage;
use std::sync::Arc;

/// Any primary candidate at or above this probability makes the primary
/// result final; otherwise the secondary classifier's output is used instead.
pub const CONFIDENCE_THRESHOLD: f32 = 0.9;

/// Display-tier cutoff for the "Best Guess" badge, in percent. Unrelated to
/// the fallback gate above.
pub const BEST_GUESS_PERCENT: f32 = 44.0;

/// Opaque handle to the image the user supplied. Equality is reference
/// identity: URL text for typed images, allocation identity for uploads.
#[derive(Clone)]
pub enum ImageReference {
    Url(String),
    Upload { name: String, bytes: Arc<Vec<u8>> },
}

impl PartialEq for ImageReference {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ImageReference::Url(a), ImageReference::Url(b)) => a == b,
            (ImageReference::Upload { bytes: a, .. }, ImageReference::Upload { bytes: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageReference::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ImageReference::Upload { name, bytes } => f
                .debug_struct("Upload")
                .field("name", name)
                .field("bytes", &bytes.len())
                .finish(),
        }
    }
}

/// Canonical label/probability pair. Classifier-native shapes are adapted to
/// this at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub probability: f32,
}

impl Candidate {
    /// Probability scaled to a percentage and rounded to two decimals, the
    /// form shown in a result row.
    pub fn percent(&self) -> f32 {
        (self.probability * 100.0 * 100.0).round() / 100.0
    }

    pub fn is_best_guess(&self) -> bool {
        self.percent() > BEST_GUESS_PERCENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LoadFailed,
    InferenceFailed,
    InvalidImage,
}

/// Model-loading lifecycle. `Failed` is terminal: there is no automatic
/// retry, classification can never start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Per-classification lifecycle. Anything other than `Idle` counts as
/// running and blocks further Identify requests.
#[derive(Clone, Default)]
pub enum RunState {
    #[default]
    Idle,
    Fetching {
        reference: ImageReference,
    },
    Primary {
        image: DynamicImage,
    },
    Secondary,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        !matches!(self, RunState::Idle)
    }
}

impl std::fmt::Debug for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Fetching { reference } => {
                f.debug_struct("Fetching").field("reference", reference).finish()
            }
            RunState::Primary { image } => f
                .debug_struct("Primary")
                .field("width", &image.width())
                .field("height", &image.height())
                .finish(),
            RunState::Secondary => write!(f, "Secondary"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub load_state: LoadState,
    pub run_state: RunState,
    pub current_image: Option<ImageReference>,
    pub results: Vec<Candidate>,
    pub history: Vec<ImageReference>,
    pub error: Option<ErrorKind>,
}

#[derive(Debug)]
pub enum Msg {
    ModelsLoadDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    FilePicked {
        name: String,
        bytes: Arc<Vec<u8>>,
    },
    FileSelectionCleared,
    UrlChanged(String),
    HistorySelected(usize),
    IdentifyRequested,
    ImageFetchDone(Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>),
    PrimaryPredictDone(Result<Vec<Candidate>, Box<dyn std::error::Error + Send + Sync>>),
    SecondaryClassifyDone(Result<Vec<Candidate>, Box<dyn std::error::Error + Send + Sync>>),
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::ImageFetchDone(Ok(_)) => "ImageFetchDone(Ok(..))".to_string(),
            Msg::FilePicked { name, .. } => format!("FilePicked {{ name: {:?} }}", name),
            msg => format!("{:?}", msg),
        }
    }
}

#[derive(Clone)]
pub enum Effect {
    LoadModels,
    FetchImage { reference: ImageReference },
    PredictPrimary { image: DynamicImage },
    ClassifySecondary { image: DynamicImage },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::LoadModels => "LoadModels".to_string(),
            Effect::FetchImage { reference } => format!("FetchImage {{ reference: {:?} }}", reference),
            Effect::PredictPrimary { .. } => "PredictPrimary { .. }".to_string(),
            Effect::ClassifySecondary { .. } => "ClassifySecondary { .. }".to_string(),
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![Effect::LoadModels])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::ModelsLoadDone(Ok(())) => (
            Model {
                load_state: LoadState::Ready,
                ..model
            },
            vec![],
        ),
        Msg::ModelsLoadDone(Err(_)) => (
            Model {
                load_state: LoadState::Failed,
                error: Some(ErrorKind::LoadFailed),
                ..model
            },
            vec![],
        ),

        // Image source resolution. Every path fully replaces the current
        // reference and invalidates the previous classification.
        Msg::UrlChanged(text) => {
            let reference = if text.trim().is_empty() {
                None
            } else {
                Some(ImageReference::Url(text))
            };
            (resolve_image(model, reference), vec![])
        }
        Msg::FilePicked { name, bytes } => (
            resolve_image(model, Some(ImageReference::Upload { name, bytes })),
            vec![],
        ),
        Msg::FileSelectionCleared => (resolve_image(model, None), vec![]),

        // Re-selecting promotes the entry to current image without
        // re-prepending it to history.
        Msg::HistorySelected(index) => match model.history.get(index).cloned() {
            Some(reference) => (
                Model {
                    current_image: Some(reference),
                    results: vec![],
                    error: None,
                    ..model
                },
                vec![],
            ),
            None => (model, vec![]),
        },

        Msg::IdentifyRequested => {
            if model.load_state != LoadState::Ready || model.run_state.is_running() {
                return (model, vec![]);
            }
            match model.current_image.clone() {
                Some(reference) => (
                    Model {
                        run_state: RunState::Fetching {
                            reference: reference.clone(),
                        },
                        error: None,
                        ..model
                    },
                    vec![Effect::FetchImage { reference }],
                ),
                None => (model, vec![]),
            }
        }

        Msg::ImageFetchDone(result) => match (model.run_state.clone(), result) {
            (RunState::Fetching { .. }, Ok(image)) => (
                Model {
                    run_state: RunState::Primary {
                        image: image.clone(),
                    },
                    ..model
                },
                vec![Effect::PredictPrimary { image }],
            ),
            (RunState::Fetching { .. }, Err(_)) => (failed(model, ErrorKind::InvalidImage), vec![]),
            _ => (model, vec![]),
        },

        Msg::PrimaryPredictDone(result) => match (model.run_state.clone(), result) {
            (RunState::Primary { image }, Ok(candidates)) => {
                let confident = candidates
                    .iter()
                    .any(|c| c.probability >= CONFIDENCE_THRESHOLD);

                if confident {
                    (
                        Model {
                            run_state: RunState::Idle,
                            results: candidates,
                            ..model
                        },
                        vec![],
                    )
                } else {
                    // Not confident enough: discard the primary output and
                    // let the secondary classifier produce the whole result.
                    (
                        Model {
                            run_state: RunState::Secondary,
                            ..model
                        },
                        vec![Effect::ClassifySecondary { image }],
                    )
                }
            }
            (RunState::Primary { .. }, Err(_)) => (failed(model, ErrorKind::InferenceFailed), vec![]),
            _ => (model, vec![]),
        },

        Msg::SecondaryClassifyDone(result) => match (model.run_state.clone(), result) {
            (RunState::Secondary, Ok(candidates)) => (
                Model {
                    run_state: RunState::Idle,
                    results: candidates,
                    ..model
                },
                vec![],
            ),
            (RunState::Secondary, Err(_)) => (failed(model, ErrorKind::InferenceFailed), vec![]),
            _ => (model, vec![]),
        },
    }
}

fn resolve_image(mut model: Model, reference: Option<ImageReference>) -> Model {
    if let Some(reference) = &reference {
        model.history.insert(0, reference.clone());
    }
    model.current_image = reference;
    model.results = vec![];
    model.error = None;
    model
}

/// Every failure path releases the running flag and leaves a well-defined
/// "no result" state instead of stale data.
fn failed(model: Model, kind: ErrorKind) -> Model {
    Model {
        run_state: RunState::Idle,
        results: vec![],
        error: Some(kind),
        ..model
    }
}
