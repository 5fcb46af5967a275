use crate::identifier::core::{Candidate, ErrorKind, ImageReference, LoadState, Model};

/// What the frontend should show. Derived from the model on every frame,
/// never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    LoadingModels,
    LoadFailed,
    Main(MainView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainView {
    pub image: Option<ImageReference>,
    pub can_identify: bool,
    pub results: ResultsView,
    pub history: Vec<ImageReference>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Empty,
    LoadingResults,
    Candidates(Vec<CandidateRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub label: String,
    pub percent: f32,
    pub best_guess: bool,
}

pub fn view(model: &Model) -> ViewModel {
    match model.load_state {
        LoadState::Loading => ViewModel::LoadingModels,
        LoadState::Failed => ViewModel::LoadFailed,
        LoadState::Ready => ViewModel::Main(MainView {
            image: model.current_image.clone(),
            can_identify: model.current_image.is_some() && !model.run_state.is_running(),
            results: results_view(model),
            history: model.history.clone(),
            error: model.error.map(error_message),
        }),
    }
}

fn results_view(model: &Model) -> ResultsView {
    if model.run_state.is_running() {
        ResultsView::LoadingResults
    } else if model.results.is_empty() {
        ResultsView::Empty
    } else {
        ResultsView::Candidates(model.results.iter().map(candidate_row).collect())
    }
}

fn candidate_row(candidate: &Candidate) -> CandidateRow {
    CandidateRow {
        label: candidate.label.clone(),
        percent: candidate.percent(),
        best_guess: candidate.is_best_guess(),
    }
}

fn error_message(kind: ErrorKind) -> String {
    match kind {
        ErrorKind::LoadFailed => "Failed to load the classification models".to_string(),
        ErrorKind::InferenceFailed => "Classification failed, try again".to_string(),
        ErrorKind::InvalidImage => "Could not load that image".to_string(),
    }
}
