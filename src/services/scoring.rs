//! Response scoring engine
//!
//! Pure functions over an RFQ and its response set. Each response gets
//! three sub-scores (technical fit, price, delivery timeframe) blended
//! into a weighted total, plus narrative strengths/weaknesses and a
//! recommendation tier derived from rule tables.
//!
//! Price and timeframe scores are relative to the best response in the
//! set, so a scoring pass is a snapshot against the current competitive
//! field: the same set always produces the same scores, a changed set
//! rescales everyone.

use anyhow::anyhow;

use crate::domain::{Evaluation, Requirement, Rfq, RfqResponse};
use crate::error::{ApiError, ApiResult};

/// Fixed blend weights for the total score.
pub const TECHNICAL_WEIGHT: f64 = 0.5;
pub const PRICE_WEIGHT: f64 = 0.3;
pub const TIMEFRAME_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Technical,
    Price,
    Timeframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    /// Score strictly above the threshold earns a strength tag.
    StrengthAbove,
    /// Score strictly below the threshold earns a weakness tag.
    WeaknessBelow,
}

struct NarrativeRule {
    metric: Metric,
    kind: RuleKind,
    threshold: f64,
    tag: &'static str,
}

/// Thresholds are independent; a response can accrue several tags or none.
const NARRATIVE_RULES: &[NarrativeRule] = &[
    NarrativeRule {
        metric: Metric::Technical,
        kind: RuleKind::StrengthAbove,
        threshold: 80.0,
        tag: "Strong technical solution",
    },
    NarrativeRule {
        metric: Metric::Technical,
        kind: RuleKind::WeaknessBelow,
        threshold: 60.0,
        tag: "Technical solution needs improvement",
    },
    NarrativeRule {
        metric: Metric::Price,
        kind: RuleKind::StrengthAbove,
        threshold: 90.0,
        tag: "Competitive pricing",
    },
    NarrativeRule {
        metric: Metric::Price,
        kind: RuleKind::WeaknessBelow,
        threshold: 70.0,
        tag: "Price is higher than competitors",
    },
    NarrativeRule {
        metric: Metric::Timeframe,
        kind: RuleKind::StrengthAbove,
        threshold: 90.0,
        tag: "Quick delivery timeframe",
    },
    NarrativeRule {
        metric: Metric::Timeframe,
        kind: RuleKind::WeaknessBelow,
        threshold: 70.0,
        tag: "Longer implementation time",
    },
];

/// Strict three-tier thresholding on the total score, checked top down.
const RECOMMENDATION_TIERS: &[(f64, &str)] = &[
    (
        85.0,
        "Highly Recommended - Excellent balance of technical solution, price, and timeframe",
    ),
    (
        70.0,
        "Recommended - Good overall proposal with some areas for negotiation",
    ),
];

const RECOMMENDATION_FALLBACK: &str =
    "Consider Alternatives - Proposal has significant areas for improvement";

/// Parse a free-text duration ("6 weeks", "2 months", "10") into days.
///
/// Takes the first integer in the string; "month" multiplies by 30,
/// "week" by 7, otherwise the number is taken as days. Returns `None`
/// when the string contains no digits or the day count does not fit in
/// a `u32`, so absurd durations fail submission validation instead of
/// wrapping into a bogus day count.
pub fn parse_timeframe(timeframe: &str) -> Option<u32> {
    let digits: String = timeframe
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let number: u32 = digits.parse().ok()?;

    let lower = timeframe.to_lowercase();
    if lower.contains("month") {
        number.checked_mul(30)
    } else if lower.contains("week") {
        number.checked_mul(7)
    } else {
        Some(number)
    }
}

/// Fraction of requirement tokens found in the solution, per requirement,
/// averaged across requirements and scaled to 0..=100.
///
/// Matching is case-folded substring containment: a solution mentioning
/// "500TB storage included" fully satisfies the requirement value "500TB".
/// With no requirements there is nothing to match and the score is 0.
pub fn technical_score(solution: &str, requirements: &[Requirement]) -> f64 {
    if requirements.is_empty() {
        return 0.0;
    }

    let solution_lower = solution.to_lowercase();
    let sum: f64 = requirements
        .iter()
        .map(|req| {
            let value_lower = req.value.to_lowercase();
            let tokens: Vec<&str> = value_lower.split_whitespace().collect();
            if tokens.is_empty() {
                return 0.0;
            }
            let matched = tokens
                .iter()
                .filter(|token| solution_lower.contains(**token))
                .count();
            (matched as f64 / tokens.len() as f64) * 100.0
        })
        .sum();

    sum / requirements.len() as f64
}

fn recommendation_for(total: f64) -> &'static str {
    RECOMMENDATION_TIERS
        .iter()
        .find(|(threshold, _)| total > *threshold)
        .map(|(_, text)| *text)
        .unwrap_or(RECOMMENDATION_FALLBACK)
}

fn narrative_tags(technical: f64, price: f64, timeframe: f64) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    for rule in NARRATIVE_RULES {
        let score = match rule.metric {
            Metric::Technical => technical,
            Metric::Price => price,
            Metric::Timeframe => timeframe,
        };
        match rule.kind {
            RuleKind::StrengthAbove if score > rule.threshold => {
                strengths.push(rule.tag.to_string());
            }
            RuleKind::WeaknessBelow if score < rule.threshold => {
                weaknesses.push(rule.tag.to_string());
            }
            _ => {}
        }
    }

    (strengths, weaknesses)
}

fn timeframe_days(response: &RfqResponse) -> ApiResult<u32> {
    match parse_timeframe(&response.timeframe) {
        Some(days) if days > 0 => Ok(days),
        // Submission validation rejects these; reaching here means a
        // stored response violated the invariant.
        _ => Err(ApiError::Internal(anyhow!(
            "stored response {} has unparseable timeframe {:?}",
            response.id,
            response.timeframe
        ))),
    }
}

/// Score every response on an RFQ and return them sorted best-first.
///
/// The sort is stable descending by total score, so equal totals keep
/// submission order. The input RFQ is not mutated; persisting the scored
/// order is the lifecycle controller's job.
pub fn evaluate(rfq: &Rfq) -> ApiResult<Vec<RfqResponse>> {
    if rfq.responses.is_empty() {
        return Err(ApiError::NoResponses(
            "RFQ has no responses to evaluate".to_string(),
        ));
    }

    let lowest_price = rfq
        .responses
        .iter()
        .map(|r| r.price)
        .fold(f64::INFINITY, f64::min);

    let mut shortest_days = u32::MAX;
    for response in &rfq.responses {
        shortest_days = shortest_days.min(timeframe_days(response)?);
    }

    let mut scored: Vec<RfqResponse> = Vec::with_capacity(rfq.responses.len());
    for response in &rfq.responses {
        let technical = technical_score(&response.solution, &rfq.requirements);
        let price = (lowest_price / response.price) * 100.0;
        let timeframe = (shortest_days as f64 / timeframe_days(response)? as f64) * 100.0;
        let total =
            technical * TECHNICAL_WEIGHT + price * PRICE_WEIGHT + timeframe * TIMEFRAME_WEIGHT;

        let (strengths, weaknesses) = narrative_tags(technical, price, timeframe);

        let mut evaluated = response.clone();
        evaluated.evaluation = Some(Evaluation {
            technical_score: technical,
            price_score: price,
            timeframe_score: timeframe,
            total_score: total,
            strengths,
            weaknesses,
            recommendation: recommendation_for(total).to_string(),
        });
        scored.push(evaluated);
    }

    scored.sort_by(|a, b| {
        let a_total = a.evaluation.as_ref().map(|e| e.total_score).unwrap_or(0.0);
        let b_total = b.evaluation.as_ref().map(|e| e.total_score).unwrap_or(0.0);
        b_total.total_cmp(&a_total)
    });

    Ok(scored)
}
