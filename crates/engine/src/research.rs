//! Company research hints
//!
//! A hint is a template filled with descriptors read off the company's
//! hidden fundamentals. Hints are right 85% of the time; a wrong hint swaps
//! each descriptor for its opposite where one exists.

use bourse_core::{Company, LiquidityTier, Price};
use rand::Rng;

pub const HINT_ACCURACY: f64 = 0.85;

/// What a template can read about the company
struct Signals<'a> {
    company: &'a Company,
    /// Percent move from the live price to next week's buffered price
    future_change: Option<f64>,
}

impl Signals<'_> {
    fn vol(&self) -> f64 {
        self.company.base_volatility
    }

    fn strength(&self) -> f64 {
        self.company.true_strength
    }

    fn mood(&self) -> i8 {
        self.company.hidden_sentiment
    }

    fn liquidity(&self) -> LiquidityTier {
        self.company.liquidity_tier
    }

    /// +1 rising, -1 falling, 0 flat or unknown
    fn momentum(&self) -> i8 {
        match self.company.previous_price() {
            Some(prev) if self.company.price() > prev => 1,
            Some(prev) if self.company.price() < prev => -1,
            _ => 0,
        }
    }
}

type Fill = fn(&Signals<'_>) -> Vec<(&'static str, &'static str)>;

/// Pick by threshold: `high` above `hi`, `low` below `lo`, `mid` otherwise
fn band(value: f64, hi: f64, lo: f64, high: &'static str, mid: &'static str, low: &'static str) -> &'static str {
    if value > hi {
        high
    } else if value < lo {
        low
    } else {
        mid
    }
}

fn by_mood(mood: i8, up: &'static str, flat: &'static str, down: &'static str) -> &'static str {
    match mood.signum() {
        1 => up,
        -1 => down,
        _ => flat,
    }
}

fn by_liquidity(tier: LiquidityTier, high: &'static str, medium: &'static str, low: &'static str) -> &'static str {
    match tier {
        LiquidityTier::High => high,
        LiquidityTier::Medium => medium,
        LiquidityTier::Low => low,
    }
}

const TEMPLATES: &[(&str, Fill)] = &[
    (
        "Technical analysis reveals {company} exhibits {level} beta, suggesting price swings could be {magnitude} against the broader market.",
        |s| {
            vec![
                ("level", band(s.vol(), 7.5, 6.0, "an elevated", "a moderate", "a relatively low")),
                ("magnitude", band(s.vol(), 7.5, 6.0, "significant", "noticeable", "mild")),
            ]
        },
    ),
    (
        "Quantitative risk models show {company} with {pattern} variance and {description} within the {industry} sector.",
        |s| {
            vec![
                ("pattern", band(s.vol(), 8.0, 6.0, "high-frequency", "medium-frequency", "low-frequency")),
                ("description", band(s.vol(), 8.0, 6.0, "outlier characteristics", "typical behavior", "defensive qualities")),
            ]
        },
    ),
    (
        "Industry analysts covering {industry} are {sentiment} about sector tailwinds for {company}.",
        |s| vec![("sentiment", by_mood(s.mood(), "optimistic", "cautiously neutral", "pessimistic"))],
    ),
    (
        "Sector rotation analysis suggests institutions are {position} {industry} names like {company} this quarter.",
        |s| vec![("position", by_mood(s.mood(), "entering", "holding", "exiting"))],
    ),
    (
        "A deep dive into {company} reveals a {strength} balance sheet with cash generation {cash}.",
        |s| {
            vec![
                ("strength", band(s.strength(), 0.65, 0.5, "solid", "adequate", "questionable")),
                ("cash", band(s.strength(), 0.65, 0.5, "exceeding expectations", "meeting baseline needs", "underperforming forecasts")),
            ]
        },
    ),
    (
        "Proprietary valuation models suggest {company} trades at {valuation} to intrinsic value.",
        |s| vec![("valuation", band(s.strength(), 0.65, 0.5, "a discount", "fair value", "a premium"))],
    ),
    (
        "Management review of {company} finds {quality} governance and a {execution} execution record.",
        |s| {
            vec![
                ("quality", band(s.strength(), 0.65, 0.5, "excellent", "acceptable", "limited")),
                ("execution", band(s.strength(), 0.65, 0.5, "strong", "mixed", "weak")),
            ]
        },
    ),
    (
        "Order book analysis of {company} shows {depth} depth with daily volumes {volume}.",
        |s| {
            vec![
                ("depth", by_liquidity(s.liquidity(), "excellent", "moderate", "limited")),
                ("volume", by_liquidity(s.liquidity(), "consistently robust", "adequate for most positions", "disappointingly thin")),
            ]
        },
    ),
    (
        "Trading desks rate {company} {classification} for block trades, with impact costs {impact}.",
        |s| {
            vec![
                ("classification", by_liquidity(s.liquidity(), "favorable", "manageable", "concerning")),
                ("impact", by_liquidity(s.liquidity(), "minimal", "reasonable", "significant")),
            ]
        },
    ),
    (
        "{company}'s recent price action shows {trend} momentum with {direction} pressure.",
        |s| {
            vec![
                ("trend", by_mood(s.momentum(), "bullish", "sideways", "bearish")),
                ("direction", by_mood(s.momentum(), "continued upward", "range-bound", "downward")),
            ]
        },
    ),
    (
        "Research synthesis on {company} yields a {outlook} outlook with price targets {targets}.",
        |s| {
            let (outlook, targets) = if s.mood() >= 0 && s.strength() > 0.6 {
                ("constructive", "skewed to the upside")
            } else if s.mood() < 0 || s.strength() < 0.45 {
                ("cautious", "pointing to downside risk")
            } else {
                ("neutral", "clustered near current levels")
            };
            vec![("outlook", outlook), ("targets", targets)]
        },
    ),
    (
        "Multi-factor scoring places {company} in the {percentile} tier of {industry} coverage.",
        |s| vec![("percentile", band(s.strength(), 0.65, 0.5, "upper", "middle", "lower"))],
    ),
    (
        "Stress tests for {company} indicate {resilience} to market shocks.",
        |s| {
            let resilience = if s.vol() < 6.5 && s.strength() > 0.6 {
                "strong resilience"
            } else if s.vol() > 8.0 || s.strength() < 0.45 {
                "vulnerability"
            } else {
                "moderate stability"
            };
            vec![("resilience", resilience)]
        },
    ),
    (
        "Forward projections for {company} show {growth} earnings and {position} market share.",
        |s| {
            vec![
                ("growth", by_mood(s.mood(), "accelerating", "stable", "decelerating")),
                ("position", band(s.strength(), 0.65, 0.5, "expanding", "steady", "eroding")),
            ]
        },
    ),
    (
        "Arcane analysts rate {company}'s rift stability as {stability} with mana flow consistency {consistency}.",
        |s| {
            vec![
                ("stability", band(s.vol(), 9.0, 7.0, "volatile", "moderate", "stable")),
                ("consistency", band(s.strength(), 0.65, 0.5, "strong", "adequate", "weak")),
            ]
        },
    ),
    (
        "Golem safety auditors report {safety} incident rates at {company}, with sentience drift {drift}.",
        |s| {
            vec![
                ("safety", band(s.strength(), 0.65, 0.5, "favorable", "acceptable", "concerning")),
                ("drift", band(s.vol(), 9.0, 7.0, "significant", "monitored", "mild")),
            ]
        },
    ),
    (
        "The Wizard's Guild scores {company}'s magical ethics as {ethics}, with cross-realm permits facing a {regulatory} review.",
        |s| {
            vec![
                ("ethics", band(s.strength(), 0.65, 0.5, "excellent", "standard", "questionable")),
                ("regulatory", by_mood(s.mood(), "favorable", "neutral", "concerning")),
            ]
        },
    ),
];

const FUTURE_TEMPLATES: &[&str] = &[
    "Our momentum indicators show {company} {trend} with {strength} directional signals in the near term.",
    "Algorithmic models detect {direction} flows for {company}, with positioning pointing to {trend} price action.",
    "Short-term analytics for {company} flag {trend} momentum and a {strength} chance of continuation.",
];

fn future_descriptors(change: f64) -> Vec<(&'static str, &'static str)> {
    vec![
        ("trend", band(change, 3.0, -3.0, "accelerating upward", "consolidating", "declining")),
        ("direction", band(change, 1.0, -1.0, "positive", "neutral", "negative")),
        ("strength", band(change.abs(), 5.0, 2.0, "strong", "moderate", "weak")),
    ]
}

const FLIPS: &[(&str, &str)] = &[
    ("optimistic", "pessimistic"),
    ("solid", "questionable"),
    ("excellent", "limited"),
    ("bullish", "bearish"),
    ("favorable", "concerning"),
    ("strong", "weak"),
    ("significant", "mild"),
    ("entering", "exiting"),
    ("a discount", "a premium"),
    ("upper", "lower"),
    ("accelerating", "decelerating"),
    ("expanding", "eroding"),
    ("positive", "negative"),
    ("accelerating upward", "declining"),
    ("volatile", "stable"),
    ("constructive", "cautious"),
];

/// Opposite descriptor, or the same one when it has no opposite
fn flip(value: &'static str) -> &'static str {
    for &(a, b) in FLIPS {
        if value == a {
            return b;
        }
        if value == b {
            return a;
        }
    }
    value
}

/// Write a research hint about `company`
///
/// `future_price` is next week's buffered price; it enables the momentum
/// templates and is only passed for human players.
pub fn research_hint<R: Rng>(company: &Company, future_price: Option<Price>, rng: &mut R) -> String {
    let accurate = rng.gen_bool(HINT_ACCURACY);
    let signals = Signals {
        company,
        future_change: future_price
            .filter(|_| company.price() > 0.0)
            .map(|future| (future - company.price()) / company.price() * 100.0),
    };

    let extra = if signals.future_change.is_some() {
        FUTURE_TEMPLATES.len()
    } else {
        0
    };
    let pick = rng.gen_range(0..TEMPLATES.len() + extra);
    let (template, descriptors) = match signals.future_change {
        Some(change) if pick >= TEMPLATES.len() => {
            (FUTURE_TEMPLATES[pick - TEMPLATES.len()], future_descriptors(change))
        }
        _ => {
            let (template, fill) = TEMPLATES[pick];
            (template, fill(&signals))
        }
    };

    let mut hint = template
        .replace("{company}", &company.name)
        .replace("{industry}", &company.industry);
    for (key, value) in descriptors {
        let value = if accurate { value } else { flip(value) };
        hint = hint.replace(&format!("{{{key}}}"), value);
    }
    hint
}
