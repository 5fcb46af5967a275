#[cfg(test)]
mod render_test {
    use crate::identifier::core::{
        Candidate, ErrorKind, ImageReference, LoadState, Model, RunState,
    };
    use crate::identifier::render::{view, CandidateRow, ResultsView, ViewModel};

    fn candidate(label: &str, probability: f32) -> Candidate {
        Candidate {
            label: label.to_string(),
            probability,
        }
    }

    fn ready_model() -> Model {
        Model {
            load_state: LoadState::Ready,
            ..Model::default()
        }
    }

    fn row_for(probability: f32) -> CandidateRow {
        let model = Model {
            results: vec![candidate("cat", probability)],
            ..ready_model()
        };
        match view(&model) {
            ViewModel::Main(main) => match main.results {
                ResultsView::Candidates(rows) => rows[0].clone(),
                other => panic!("Unexpected results view: {:?}", other),
            },
            other => panic!("Unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_loading_models_suppresses_everything() {
        let model = Model::default();
        assert_eq!(view(&model), ViewModel::LoadingModels);
    }

    #[test]
    fn test_load_failure_is_distinct_from_loading() {
        let model = Model {
            load_state: LoadState::Failed,
            error: Some(ErrorKind::LoadFailed),
            ..Model::default()
        };
        assert_eq!(view(&model), ViewModel::LoadFailed);
    }

    #[test]
    fn test_results_spinner_while_running() {
        let model = Model {
            run_state: RunState::Fetching {
                reference: ImageReference::Url("https://example.com/cat.jpg".to_string()),
            },
            current_image: Some(ImageReference::Url(
                "https://example.com/cat.jpg".to_string(),
            )),
            ..ready_model()
        };

        match view(&model) {
            ViewModel::Main(main) => {
                assert_eq!(main.results, ResultsView::LoadingResults);
                // Running also disables the Identify trigger.
                assert!(!main.can_identify);
            }
            other => panic!("Unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_identify_offered_only_with_image() {
        match view(&ready_model()) {
            ViewModel::Main(main) => assert!(!main.can_identify),
            other => panic!("Unexpected view: {:?}", other),
        }

        let model = Model {
            current_image: Some(ImageReference::Url(
                "https://example.com/cat.jpg".to_string(),
            )),
            ..ready_model()
        };
        match view(&model) {
            ViewModel::Main(main) => assert!(main.can_identify),
            other => panic!("Unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_best_guess_boundary() {
        // 44.00 exactly is not strictly above the cutoff.
        assert!(!row_for(0.44).best_guess);
        assert!(row_for(0.4401).best_guess);
        assert!(row_for(0.45).best_guess);
        assert!(!row_for(0.1).best_guess);
    }

    #[test]
    fn test_best_guess_independent_of_fallback_gate() {
        // Well below the 0.9 fallback threshold but above the 44% badge cutoff.
        assert!(row_for(0.5).best_guess);
        // Above the fallback threshold always qualifies.
        assert!(row_for(0.95).best_guess);
    }

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(row_for(0.123456).percent, 12.35);
        assert_eq!(row_for(0.95).percent, 95.0);
    }

    #[test]
    fn test_rows_preserve_result_order() {
        let model = Model {
            results: vec![candidate("dog", 0.2), candidate("cat", 0.7)],
            ..ready_model()
        };

        match view(&model) {
            ViewModel::Main(main) => match main.results {
                ResultsView::Candidates(rows) => {
                    assert_eq!(rows[0].label, "dog");
                    assert_eq!(rows[1].label, "cat");
                }
                other => panic!("Unexpected results view: {:?}", other),
            },
            other => panic!("Unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_history_shown_only_when_non_empty() {
        match view(&ready_model()) {
            ViewModel::Main(main) => assert!(main.history.is_empty()),
            other => panic!("Unexpected view: {:?}", other),
        }

        let model = Model {
            history: vec![ImageReference::Url("https://example.com/1.jpg".to_string())],
            ..ready_model()
        };
        match view(&model) {
            ViewModel::Main(main) => assert_eq!(main.history.len(), 1),
            other => panic!("Unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_transient_error_is_surfaced() {
        let model = Model {
            error: Some(ErrorKind::InferenceFailed),
            ..ready_model()
        };

        match view(&model) {
            ViewModel::Main(main) => assert!(main.error.is_some()),
            other => panic!("Unexpected view: {:?}", other),
        }
    }
}
