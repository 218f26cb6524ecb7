//! Label resolver — turns a composition token into English.
//!
//! Blood tokens need only the target's gender. In-law tokens without a
//! fixed English term fall back to a possessive chain ("wife's first
//! cousin", "father's wife"), which also needs the genders of the two
//! members joined by the marriage.

use crate::model::Gender;
use super::compose::{InLawSide, Lineage, Token};

/// Label returned when source and target are the same member.
pub const SELF_LABEL: &str = "self";

/// Genders that shape a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Perspective {
    pub target: Gender,
    /// Member on the source side of the marriage edge.
    pub near: Gender,
    /// Member on the target side of the marriage edge.
    pub far: Gender,
}

impl Perspective {
    /// Only the target's gender is known.
    pub fn of(target: Gender) -> Self {
        Self { target, ..Self::default() }
    }
}

/// Resolve `token` for a target of the given gender.
pub fn resolve(token: &Token, target: Gender) -> String {
    resolve_in(token, &Perspective::of(target))
}

/// Resolve `token`, using marriage-side genders for template phrasing.
pub fn resolve_in(token: &Token, p: &Perspective) -> String {
    let Token::InLaw { base, side } = token else {
        return blood(token, p.target);
    };
    if let Some(fixed) = fixed_in_law(base, side, p.target) {
        return fixed;
    }
    match side {
        InLawSide::SpouseFirst => format!("{}'s {}", spouse(p.far), blood(base, p.target)),
        InLawSide::SpouseLast => format!("{}'s {}", blood(base, p.near), spouse(p.target)),
        InLawSide::Between(near) => format!(
            "{}'s {}'s {}",
            blood(near, p.near),
            spouse(p.far),
            blood(base, p.target),
        ),
    }
}

fn spouse(g: Gender) -> &'static str {
    g.pick("husband", "wife", "spouse")
}

/// Labels for every token except `InLaw`.
fn blood(token: &Token, g: Gender) -> String {
    match token {
        Token::Identity => SELF_LABEL.to_string(),
        Token::Ancestor { degree } => lineal(*degree, g.pick("father", "mother", "parent")),
        Token::Descendant { degree } => lineal(*degree, g.pick("son", "daughter", "child")),
        Token::Sibling => g.pick("brother", "sister", "sibling").to_string(),
        Token::Cousin { degree: 0, removed, lineage } => match lineage {
            Lineage::Senior => greats(*removed, g.pick("uncle", "aunt", "pibling")),
            Lineage::Junior => greats(*removed, g.pick("nephew", "niece", "nibling")),
            Lineage::Level => g.pick("brother", "sister", "sibling").to_string(),
        },
        Token::Cousin { degree, removed, .. } => {
            let mut label = format!("{} cousin", ordinal(*degree));
            match removed {
                0 => {}
                1 => label.push_str(" once removed"),
                2 => label.push_str(" twice removed"),
                n => label.push_str(&format!(" {n} times removed")),
            }
            label
        }
        Token::Spouse => spouse(g).to_string(),
        // Nested marriages never come out of the composer; keep it printable.
        Token::InLaw { .. } => resolve_in(token, &Perspective::of(g)),
    }
}

/// father, grandfather, great-grandfather, great-great-grandfather, ...
fn lineal(degree: u32, word: &str) -> String {
    match degree {
        0 => SELF_LABEL.to_string(),
        1 => word.to_string(),
        n => format!("{}grand{word}", "great-".repeat(n as usize - 2)),
    }
}

/// aunt, great-aunt, great-great-aunt, ...
fn greats(removed: u32, word: &str) -> String {
    format!("{}{word}", "great-".repeat(removed.saturating_sub(1) as usize))
}

fn ordinal(n: u32) -> String {
    const WORDS: [&str; 10] = [
        "first", "second", "third", "fourth", "fifth",
        "sixth", "seventh", "eighth", "ninth", "tenth",
    ];
    if (1..=10).contains(&n) {
        return WORDS[n as usize - 1].to_string();
    }
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// English in-law terms that exist as single words.
fn fixed_in_law(base: &Token, side: &InLawSide, g: Gender) -> Option<String> {
    let in_law = |label: String| Some(format!("{label}-in-law"));
    match (side, base) {
        (InLawSide::SpouseFirst, Token::Ancestor { .. }) => in_law(blood(base, g)),
        (InLawSide::SpouseLast, Token::Descendant { .. }) => in_law(blood(base, g)),
        (InLawSide::SpouseFirst | InLawSide::SpouseLast, Token::Sibling) => in_law(blood(base, g)),
        // An aunt's husband is an uncle; a husband's nephew is a nephew.
        (InLawSide::SpouseLast, Token::Cousin { degree: 0, lineage: Lineage::Senior, .. })
        | (InLawSide::SpouseFirst, Token::Cousin { degree: 0, lineage: Lineage::Junior, .. }) => {
            Some(blood(base, g))
        }
        (InLawSide::SpouseFirst, Token::Cousin { degree: 0, lineage: Lineage::Senior, .. })
        | (InLawSide::SpouseLast, Token::Cousin { degree: 0, lineage: Lineage::Junior, .. }) => {
            in_law(blood(base, g))
        }
        _ => None,
    }
}
