#[cfg(test)]
mod effect_test {
    use crate::identifier::core::{Effect, ImageReference, Msg};
    use crate::identifier::tests::fixture::Fixture;
    use image::DynamicImage;
    use std::time::Duration;

    fn recv_msg(fixture: &Fixture) -> Msg {
        fixture
            .identifier
            .msg_receiver
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(1))
            .expect("expected a msg from the effect interpreter")
    }

    fn test_image() -> DynamicImage {
        DynamicImage::new_rgb8(8, 8)
    }

    #[test]
    fn test_load_models_reports_done() {
        let fixture = Fixture::new();

        fixture.identifier.run_effect(Effect::LoadModels);

        assert!(matches!(recv_msg(&fixture), Msg::ModelsLoadDone(Ok(()))));
        assert!(fixture.identifier.primary.lock().unwrap().is_some());
        assert!(fixture.identifier.secondary.lock().unwrap().is_some());
    }

    #[test]
    fn test_load_models_failure_reports_error() {
        let fixture = Fixture::with_failing_loader();

        fixture.identifier.run_effect(Effect::LoadModels);

        assert!(matches!(recv_msg(&fixture), Msg::ModelsLoadDone(Err(_))));
        // The primary never loaded, so the secondary load never started.
        assert!(fixture.identifier.secondary.lock().unwrap().is_none());
    }

    #[test]
    fn test_fetch_image_reports_decoded_image() {
        let fixture = Fixture::new();

        fixture.identifier.run_effect(Effect::FetchImage {
            reference: ImageReference::Url("https://example.com/cat.jpg".to_string()),
        });

        assert!(matches!(recv_msg(&fixture), Msg::ImageFetchDone(Ok(_))));
    }

    #[test]
    fn test_fetch_image_failure_propagates() {
        let fixture = Fixture::with_failing_fetcher();

        fixture.identifier.run_effect(Effect::FetchImage {
            reference: ImageReference::Url("https://example.com/cat.jpg".to_string()),
        });

        assert!(matches!(recv_msg(&fixture), Msg::ImageFetchDone(Err(_))));
    }

    #[test]
    fn test_predict_before_load_fails() {
        let fixture = Fixture::new();

        fixture.identifier.run_effect(Effect::PredictPrimary {
            image: test_image(),
        });

        assert!(matches!(recv_msg(&fixture), Msg::PrimaryPredictDone(Err(_))));
    }

    #[test]
    fn test_predict_after_load_yields_candidates() {
        let fixture = Fixture::new();

        fixture.identifier.run_effect(Effect::LoadModels);
        let _ = recv_msg(&fixture);

        fixture.identifier.run_effect(Effect::PredictPrimary {
            image: test_image(),
        });

        match recv_msg(&fixture) {
            Msg::PrimaryPredictDone(Ok(candidates)) => assert!(!candidates.is_empty()),
            other => panic!("Unexpected msg: {:?}", other),
        }
    }

    #[test]
    fn test_classify_secondary_after_load() {
        let fixture = Fixture::new();

        fixture.identifier.run_effect(Effect::LoadModels);
        let _ = recv_msg(&fixture);

        fixture.identifier.run_effect(Effect::ClassifySecondary {
            image: test_image(),
        });

        match recv_msg(&fixture) {
            Msg::SecondaryClassifyDone(Ok(candidates)) => assert!(!candidates.is_empty()),
            other => panic!("Unexpected msg: {:?}", other),
        }
    }
}
