use tracing::debug;

use crate::{ClassifierError, Result, RobotCommand, TextEncoder};

/// A non-rejected classification with the similarity that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub command: RobotCommand,
    pub score: f32,
}

/// Ranks free text against the canonical phrase of every vocabulary entry.
///
/// Reference embeddings are computed once at construction and never mutated,
/// which keeps the embedding-index-to-command mapping stable for the lifetime
/// of the process. Construction fails if the encoder misbehaves; there is no
/// half-initialized classifier.
pub struct IntentClassifier<E> {
    encoder: E,
    table: Vec<Vec<f32>>,
}

impl<E: TextEncoder> IntentClassifier<E> {
    pub fn new(encoder: E) -> Result<Self> {
        let mut table = Vec::with_capacity(RobotCommand::ALL.len());
        for command in RobotCommand::ALL {
            let vector = encoder.encode(command.phrase());
            if vector.len() != encoder.dim() {
                return Err(ClassifierError::DimensionMismatch {
                    want: encoder.dim(),
                    got: vector.len(),
                });
            }
            table.push(vector);
        }
        Ok(Self { encoder, table })
    }

    /// Classify one utterance against the closed vocabulary.
    ///
    /// Returns `None` for an empty sentence (no encode call is made) and for
    /// the open-set reject outcome: no command reached `threshold`.
    pub fn classify(&self, sentence: &str, threshold: f32) -> Option<Classification> {
        if sentence.is_empty() {
            return None;
        }
        let probe = self.encoder.encode(sentence);
        let mut best_index = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (index, reference) in self.table.iter().enumerate() {
            let score = cosine_similarity(&probe, reference);
            // First-occurrence maximum: ties go to the lowest command id.
            if score > best_score {
                best_score = score;
                best_index = index;
            }
        }
        let command = RobotCommand::from_index(best_index)?;
        if best_score < threshold {
            debug!(
                "rejecting {command:?} at similarity {best_score:.3}, threshold {threshold:.3}"
            );
            return None;
        }
        Some(Classification {
            command,
            score: best_score,
        })
    }
}

/// Cosine similarity, defined as 0 when either vector has zero norm.
pub fn cosine_similarity(u: &[f32], v: &[f32]) -> f32 {
    let dot: f32 = u.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
    let norm_u = u.iter().map(|a| a * a).sum::<f32>().sqrt();
    let norm_v = v.iter().map(|b| b * b).sum::<f32>().sqrt();
    if norm_u == 0.0 || norm_v == 0.0 {
        return 0.0;
    }
    dot / (norm_u * norm_v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "mock")]
    use crate::HashedBowEncoder;

    /// Encoder with hand-picked vectors for tie-break and rejection cases.
    struct FixtureEncoder;

    impl TextEncoder for FixtureEncoder {
        fn dim(&self) -> usize {
            2
        }

        fn encode(&self, text: &str) -> Vec<f32> {
            match text {
                // Two vocabulary entries share a direction on purpose.
                "start robot" | "stop robot" => vec![1.0, 0.0],
                "probe" => vec![2.0, 0.0],
                "" => vec![0.0, 0.0],
                _ => vec![0.0, 1.0],
            }
        }
    }

    #[test]
    fn ties_break_to_the_lowest_command_id() {
        let classifier = IntentClassifier::new(FixtureEncoder).unwrap();
        let hit = classifier.classify("probe", 0.5).unwrap();
        assert_eq!(hit.command, RobotCommand::StartRobot);
        assert!((hit.score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_sentence_is_rejected_at_any_threshold() {
        let classifier = IntentClassifier::new(FixtureEncoder).unwrap();
        assert_eq!(classifier.classify("", 0.0), None);
        assert_eq!(classifier.classify("", 1.0), None);
    }

    #[test]
    fn zero_norm_vectors_have_zero_similarity() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
    }

    #[cfg(feature = "mock")]
    #[test]
    fn every_vocabulary_phrase_matches_itself() {
        let classifier = IntentClassifier::new(HashedBowEncoder::default()).unwrap();
        for command in RobotCommand::ALL {
            let hit = classifier.classify(command.phrase(), 0.999).unwrap();
            assert_eq!(hit.command, command, "phrase {:?}", command.phrase());
            assert!(hit.score >= 0.999);
        }
    }

    #[cfg(feature = "mock")]
    #[test]
    fn raising_the_threshold_only_ever_rejects() {
        let classifier = IntentClassifier::new(HashedBowEncoder::default()).unwrap();
        // Partial overlap with "move up": accepted when lenient, rejected when strict.
        let relaxed = classifier.classify("move up now", 0.5).unwrap();
        assert_eq!(relaxed.command, RobotCommand::MoveUp);
        assert_eq!(classifier.classify("move up now", 0.9), None);
        // Scores are threshold-independent.
        let again = classifier.classify("move up now", 0.5).unwrap();
        assert_eq!(again.score, relaxed.score);
    }

    #[cfg(feature = "mock")]
    #[test]
    fn unrelated_text_is_rejected_at_the_default_threshold() {
        let classifier = IntentClassifier::new(HashedBowEncoder::default()).unwrap();
        assert_eq!(classifier.classify("quarterly revenue forecast", 0.7), None);
    }
}
