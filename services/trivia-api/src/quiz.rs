//! Quiz question selection

use rand::{seq::IndexedRandom, Rng};
use serde::Serialize;
use std::collections::HashSet;

use crate::models::Question;

/// Which questions a quiz round may draw from
#[derive(Debug, Clone, Default)]
pub struct QuizFilter {
    /// Restrict to one category; `None` means every category
    pub category: Option<i64>,
    /// Question ids already shown this round
    pub previous: HashSet<i64>,
}

impl QuizFilter {
    pub fn new(category: Option<i64>, previous: impl IntoIterator<Item = i64>) -> Self {
        Self {
            category,
            previous: previous.into_iter().collect(),
        }
    }

    fn admits(&self, question: &Question) -> bool {
        self.category.is_none_or(|category| question.category == category)
            && !self.previous.contains(&question.id)
    }
}

/// Result of drawing a quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QuizOutcome {
    /// An unseen question from the requested category
    Question(Question),
    /// Nothing left to ask
    Exhausted,
}

/// Draw one eligible question uniformly at random
pub fn select_question<R>(questions: &[Question], filter: &QuizFilter, rng: &mut R) -> QuizOutcome
where
    R: Rng + ?Sized,
{
    let eligible: Vec<&Question> = questions.iter().filter(|q| filter.admits(q)).collect();

    match eligible.choose(rng) {
        Some(question) => QuizOutcome::Question((*question).clone()),
        None => QuizOutcome::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn bank() -> Vec<Question> {
        (1..=12)
            .map(|id| Question {
                id,
                question: format!("Question {id}"),
                answer: format!("Answer {id}"),
                category: if id % 2 == 0 { 2 } else { 1 },
                difficulty: 1,
            })
            .collect()
    }

    #[test]
    fn test_never_returns_excluded_or_foreign_category() {
        let questions = bank();
        let filter = QuizFilter::new(Some(2), [4, 10]);

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            match select_question(&questions, &filter, &mut rng) {
                QuizOutcome::Question(q) => {
                    assert_eq!(q.category, 2);
                    assert!(q.id != 4 && q.id != 10, "excluded id {} returned", q.id);
                }
                QuizOutcome::Exhausted => panic!("category 2 still has questions"),
            }
        }
    }

    #[test]
    fn test_no_category_draws_from_everything() {
        let questions = bank();
        let filter = QuizFilter::default();
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<i64> = (0..500)
            .filter_map(|_| match select_question(&questions, &filter, &mut rng) {
                QuizOutcome::Question(q) => Some(q.id),
                QuizOutcome::Exhausted => None,
            })
            .collect();
        assert_eq!(seen.len(), questions.len());
    }

    #[test]
    fn test_exhausted_when_everything_seen() {
        let questions = bank();
        let all_odd = questions.iter().filter(|q| q.category == 1).map(|q| q.id);
        let filter = QuizFilter::new(Some(1), all_odd);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            select_question(&questions, &filter, &mut rng),
            QuizOutcome::Exhausted
        );
    }

    #[test]
    fn test_exhausted_on_empty_bank_or_unknown_category() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_question(&[], &QuizFilter::default(), &mut rng),
            QuizOutcome::Exhausted
        );
        assert_eq!(
            select_question(&bank(), &QuizFilter::new(Some(99), []), &mut rng),
            QuizOutcome::Exhausted
        );
    }

    #[test]
    fn test_last_remaining_question_is_picked() {
        let questions = bank();
        let filter = QuizFilter::new(None, (1..=12).filter(|id| *id != 7));
        let mut rng = StdRng::seed_from_u64(3);

        match select_question(&questions, &filter, &mut rng) {
            QuizOutcome::Question(q) => assert_eq!(q.id, 7),
            QuizOutcome::Exhausted => panic!("question 7 was still unseen"),
        }
    }
}
