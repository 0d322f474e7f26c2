use super::super::domain::{Classification, SubScores};

/// Sum the seven sub-scores and classify the total.
pub fn aggregate(scores: &SubScores) -> (u8, Classification) {
    let total = scores.total();
    (total, classify(total))
}

pub fn classify(total: u8) -> Classification {
    match total {
        0..=5 => Classification::Fit,
        6..=9 => Classification::MildFatigue,
        10..=14 => Classification::ModerateFatigue,
        _ => Classification::SevereFatigue,
    }
}
