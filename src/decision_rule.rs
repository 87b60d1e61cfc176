use crate::image_classifier::interface::ScoreVector;
use crate::label_list::{ConfigurationError, LabelList};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictedLabel {
    pub index: usize,
    pub label: String,
}

impl fmt::Display for PredictedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Arg-max over `scores`. The running maximum is only replaced by a strictly
/// greater score, so ties resolve to the lowest index.
pub fn decide(scores: &ScoreVector, labels: &LabelList) -> Result<PredictedLabel, ConfigurationError> {
    if scores.len() != labels.len() || scores.is_empty() {
        return Err(ConfigurationError::LengthMismatch {
            scores: scores.len(),
            labels: labels.len(),
        });
    }

    let scores = scores.as_slice();
    let mut max_index = 0;
    let mut max_value = scores[0];

    for (index, &value) in scores.iter().enumerate().skip(1) {
        if value > max_value {
            max_value = value;
            max_index = index;
        }
    }

    let label = labels
        .get(max_index)
        .ok_or(ConfigurationError::LengthMismatch {
            scores: scores.len(),
            labels: labels.len(),
        })?;

    Ok(PredictedLabel {
        index: max_index,
        label: label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice_labels() -> LabelList {
        LabelList::new(["Brown Spot", "Healthy", "Hispa", "Leaf Blast"]).unwrap()
    }

    fn decide_label(scores: Vec<f32>) -> String {
        decide(&ScoreVector::new(scores), &rice_labels()).unwrap().label
    }

    #[test]
    fn test_picks_highest_score() {
        assert_eq!(decide_label(vec![0.1, 0.9, 0.05, 0.05]), "Healthy");
        assert_eq!(decide_label(vec![0.0, 0.1, 0.2, 0.7]), "Leaf Blast");
    }

    #[test]
    fn test_tie_goes_to_earliest_label() {
        assert_eq!(decide_label(vec![0.5, 0.5, 0.0, 0.0]), "Brown Spot");
        assert_eq!(decide_label(vec![0.0, 0.3, 0.3, 0.3]), "Healthy");
        assert_eq!(decide_label(vec![1.0, 1.0, 1.0, 1.0]), "Brown Spot");
    }

    #[test]
    fn test_tie_law_over_many_vectors() {
        let vectors = vec![
            vec![-1.0, -1.0, -2.0, -1.0],
            vec![3.0, 2.0, 3.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![-5.0, 7.5, 7.5, -7.5],
            vec![f32::MIN, f32::MIN, f32::MIN, f32::MIN],
        ];

        for scores in vectors {
            let max = scores.iter().cloned().fold(f32::MIN, f32::max);
            let expected = scores.iter().position(|&s| s == max).unwrap();

            let predicted = decide(&ScoreVector::new(scores.clone()), &rice_labels()).unwrap();

            assert_eq!(predicted.index, expected, "scores: {:?}", scores);
        }
    }

    #[test]
    fn test_raw_scores_need_not_sum_to_one() {
        assert_eq!(decide_label(vec![12.0, -3.0, 40.5, 40.0]), "Hispa");
    }

    #[test]
    fn test_single_class() {
        let labels = LabelList::new(["only"]).unwrap();

        let predicted = decide(&ScoreVector::new(vec![-100.0]), &labels).unwrap();

        assert_eq!(predicted.index, 0);
        assert_eq!(predicted.label, "only");
    }

    #[test]
    fn test_nan_is_never_selected_after_index_zero() {
        assert_eq!(decide_label(vec![0.2, f32::NAN, 0.1, 0.0]), "Brown Spot");
    }

    #[test]
    fn test_too_few_scores_is_configuration_error() {
        let result = decide(&ScoreVector::new(vec![0.1, 0.9]), &rice_labels());

        assert!(matches!(
            result,
            Err(ConfigurationError::LengthMismatch {
                scores: 2,
                labels: 4
            })
        ));
    }

    #[test]
    fn test_too_many_scores_is_configuration_error() {
        let result = decide(&ScoreVector::new(vec![0.0; 5]), &rice_labels());

        assert!(matches!(
            result,
            Err(ConfigurationError::LengthMismatch {
                scores: 5,
                labels: 4
            })
        ));
    }

    #[test]
    fn test_empty_scores_is_configuration_error() {
        let result = decide(&ScoreVector::new(vec![]), &rice_labels());

        assert!(matches!(result, Err(ConfigurationError::LengthMismatch { .. })));
    }
}
