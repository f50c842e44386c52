const REPETITION_WEIGHT: i64 = 6;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Trending score for a topic: repetition weight plus a recency bonus that
/// decays in steps from the topic's first sighting, plus a flat category
/// bonus.
///
/// Pure function of its arguments; callers pass `now_ms` so results are
/// reproducible. The score is recomputed on every write rather than
/// accumulated, because the recency bonus depends on "now".
pub fn trending_score(repetition_count: i64, category: &str, created_at_ms: i64, now_ms: i64) -> i64 {
    let mut score = repetition_count * REPETITION_WEIGHT;

    let age_hours = (now_ms - created_at_ms) as f64 / MS_PER_HOUR;
    if age_hours < 1.0 {
        score += 10;
    } else if age_hours < 3.0 {
        score += 5;
    }

    match category {
        "Cricket" => score += 3,
        "Politics" => score += 2,
        _ => {}
    }

    score
}
