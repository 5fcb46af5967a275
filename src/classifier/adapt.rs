use crate::classifier::interface::Prediction;
use crate::identifier::core::Candidate;

/// Normalizes the primary classifier's output. Order is preserved as
/// returned; the result is never re-sorted downstream.
pub fn from_primary(predictions: Vec<Prediction>) -> Vec<Candidate> {
    predictions.into_iter().map(to_candidate).collect()
}

/// Normalizes the secondary classifier's output.
pub fn from_secondary(predictions: Vec<Prediction>) -> Vec<Candidate> {
    predictions.into_iter().map(to_candidate).collect()
}

fn to_candidate(prediction: Prediction) -> Candidate {
    Candidate {
        label: prediction.class_name,
        probability: prediction.probability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapt_preserves_order() {
        let predictions = vec![
            Prediction {
                class_name: "golden retriever".to_string(),
                probability: 0.2,
            },
            Prediction {
                class_name: "tabby".to_string(),
                probability: 0.7,
            },
        ];

        let candidates = from_primary(predictions);

        assert_eq!(candidates[0].label, "golden retriever");
        assert_eq!(candidates[1].label, "tabby");
        assert_eq!(candidates[1].probability, 0.7);
    }
}
