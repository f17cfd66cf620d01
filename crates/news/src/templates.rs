//! Headline templates
//!
//! `{company}` and `{industry}` are substituted at render time.

use rand::Rng;
use rand::seq::SliceRandom;

pub const POSITIVE: &[&str] = &[
    "{company} reports record-breaking quarterly earnings, beating expectations by 15%",
    "{company} announces groundbreaking innovation in {industry} that analysts say could reshape the market",
    "{company} secures a $2B government contract, revenue projected to double",
    "{company} stock upgraded to 'Strong Buy' by three major analysts citing strong fundamentals",
    "{company} reports a 40% surge in customer demand and expands production",
    "{company} announces a strategic partnership with a Fortune 500 giant valued at $1.5B",
    "{company} unveils a product receiving rave reviews, pre-orders exceeding capacity",
    "{company} announces a $500M share buyback program",
    "{company} secures exclusive rights to a key {industry} patent for the next 20 years",
    "{company} raises its dividend by 25%, a record payout",
    "{company} discovers untapped mana reserves in an interdimensional rift, capacity quadrupling",
    "Major corporations rush to adopt {company}'s golem workforce as automation demand surges",
    "{company} golems finish a megaproject 6 months early, new contracts flooding in",
    "Wizards' Guild endorses {company}'s sustainable mana harvesting, clearing regulatory barriers",
];

pub const NEGATIVE: &[&str] = &[
    "{company} faces a federal investigation over alleged accounting irregularities",
    "{company} CEO abruptly resigns amid internal controversy",
    "{company} issues a profit warning citing weak demand, revenue down 30% from projections",
    "{company} recalls 3 million units over safety defects, costs estimated at $600M",
    "{company} loses a major lawsuit and is ordered to pay $800M in damages",
    "Cyber attack on {company} exposes 50 million customer records",
    "{company} downgraded to 'Sell' by three major firms citing declining market share",
    "{company} misses forecasts by 40% in its worst quarter in 5 years",
    "Supply chain disruptions leave {company} unable to fulfil orders",
    "{company} market share eroding as a startup disrupts the {industry} sector",
    "Rogue golem from a {company} facility injures 3 workers, safety probe launched",
    "{company} mana extraction site suffers a rift collapse, repair costs exceed $500M",
    "Interdimensional Council moves to ban {company}'s harvesting methods",
    "Mass golem recall at {company} after a critical judgment flaw is discovered",
];

pub const SENSATIONAL_POSITIVE: &[&str] = &[
    "{company} ABOUT TO EXPLODE - ANALYSTS PREDICT 500% GAINS!",
    "BREAKING: {company} IS THE NEXT TRILLION DOLLAR STOCK!",
    "YOU WON'T BELIEVE what {company} just did - SHARES GOING PARABOLIC!",
    "EVERYONE is buying {company} right now - DON'T MISS OUT!",
    "{company} to the MOON: {industry} insiders are SHOCKED!",
];

pub const SENSATIONAL_NEGATIVE: &[&str] = &[
    "{company} COLLAPSE IMMINENT - GET OUT NOW!",
    "DISASTER at {company}: shareholders could LOSE EVERYTHING!",
    "Is {company} the NEXT ENRON? Experts TERRIFIED!",
    "{company} in FREE FALL - {industry} bubble BURSTING!",
    "SHOCKING secret {company} doesn't want you to know!",
];

pub const INSIDER_POSITIVE: &[&str] = &[
    "Sources close to {company} say a major deal is being finalised behind closed doors",
    "Word on the desk: {company} executives quietly buying their own shares",
    "Insiders hint {company} will beat guidance when numbers land",
];

pub const INSIDER_NEGATIVE: &[&str] = &[
    "Sources say {company} board held an emergency session late last night",
    "Word on the desk: {company} executives quietly unloading stock",
    "Insiders warn {company} guidance is about to be cut",
];

pub const RUMOR_POSITIVE: &[&str] = &[
    "Overheard at the bar: {company} might be a takeover target",
    "Forum posters swear {company} has something big coming",
];

pub const RUMOR_NEGATIVE: &[&str] = &[
    "Rumor has it {company} is cooking the books",
    "Anonymous post claims {company} is about to lay off half its staff",
    "Whispers that {company}'s {industry} licence is in jeopardy",
    "Unverified: {company} auditors have walked out",
];

pub const GAZETTE: &[&str] = &[
    "{company} unveils a next-generation product line at a {industry} trade show to positive early feedback.",
    "{company} announces a minor software update addressing customer-requested features.",
    "{company} opens a new regional office to support a growing customer base.",
    "{company} signs a distribution agreement with a mid-sized retailer.",
    "{company} joins an industry consortium developing {industry} technical standards.",
    "{company} promotes several senior managers to vice president roles.",
    "{company} board approves a modest share repurchase authorization.",
    "Market research firm lists {company} among notable {industry} players to watch.",
    "{company} reports in-line quarterly metrics without major surprises.",
    "{company} golem units join an infrastructure project alongside traditional equipment.",
    "Routine audit confirms {company} follows ethical soul-magic guidelines.",
];

pub const CHRONICLE: &[&str] = &[
    "{company} showcases an updated lineup at a recent {industry} event to mixed analyst reactions.",
    "{company} rolls out a patch for issues reported by its user community.",
    "Observers note {company} testing a new service model in limited areas.",
    "Patent analysis shows {company} filing applications in the {industry} sector.",
    "{company} expands its operational footprint with a new facility.",
    "Cost optimization at {company} aims to improve margins.",
    "{company} partners with an engineering guild on technical training.",
    "Environmental report from {company} highlights dimensional impact reduction.",
    "Diversification plan at {company} advances with new extraction site approvals.",
];

/// Pick a template and fill in the placeholders
pub fn render<R: Rng + ?Sized>(templates: &[&str], company: &str, industry: &str, rng: &mut R) -> String {
    let template = templates.choose(rng).copied().unwrap_or("{company}");
    template
        .replace("{company}", company)
        .replace("{industry}", industry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_render_substitutes() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let text = render(POSITIVE, "TechCorp", "Technology", &mut rng);
            assert!(!text.contains('{'));
        }
        assert_eq!(render(&[], "X", "Y", &mut rng), "X");
    }
}
