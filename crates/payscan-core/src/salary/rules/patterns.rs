//! Patterns for numbers that look like pay but are not.
//!
//! Each pattern covers the number itself, so a candidate is a nuisance when
//! its span overlaps any match.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Retirement plans (401k, 401(k), 403b)
    pub static ref RETIREMENT_PLAN: Regex = Regex::new(
        r"(?i)\b40[13]\s*\(?[kb]\)?"
    ).unwrap();

    // Company size and revenue figures
    pub static ref MAGNITUDE: Regex = Regex::new(
        r"(?i)\d[\d,.]*(?:\s\d{3})*\s?(?:billions?|millions?|bn|mln|mn|mrd|milliards?|miliardi|milioni|miljarder|miljoner)\b"
    ).unwrap();

    pub static ref PER_CAPITA: Regex = Regex::new(
        r"(?i)\d[\d,.]*(?:\s\d{3})*\s*(?:[a-z]+\s+)?per[\s-]capita"
    ).unwrap();

    pub static ref PERCENTAGE: Regex = Regex::new(
        r"(?i)\d[\d,.]*\s?(?:%|percent\b|pour\s?cent\b|per\s?cento\b|procent\b)"
    ).unwrap();

    // Headcounts, customer counts, office counts
    pub static ref HEADCOUNT: Regex = Regex::new(
        r"(?i)\d[\d,.]*(?:\s\d{3})*\+?\s*(?:employees|people|staff|members|colleagues|clients|customers|countries|offices|locations|users|salariés|collaborateurs|employés|dipendenti|persone|clienti|paesi|anställda|medarbetare|kunder|länder)\b"
    ).unwrap();

    // Requisition and reference numbers
    pub static ref IDENTIFIER: Regex = Regex::new(
        r"(?i)(?:\bjob\s+id|\bid|\bref|\breq|\brequisition|#|n°|\bnr|\bno\.)\s*[:#]?\s*\d[\w-]*"
    ).unwrap();

    // Amounts immediately labeled as a benefit ("$5,000 signing bonus").
    // The label must name the benefit; a bare "bonus" or "ticket" after a
    // salary ("$120,000 bonus eligible") does not count.
    pub static ref BENEFIT_AFTER: Regex = Regex::new(
        r"(?i)\d[\d,.]*(?:\s\d{3})*k?\s*(?:\$|€|kr\b|sek\b|usd\b|eur\b|euros?\b|dollars?\b)?\s*(?:(?:referral|sign[\s-]?on|signing|joining|relocation|retention)\s+(?:bonus|package|allowance|assistance)|stipend|allowance|reimbursement|(?:learning|education|training|wellness|home[\s-]office|equipment)\s+(?:budget|stipend|allowance|credit)|prime\s+(?:de\s+|d'\s*)(?:cooptation|parrainage|installation|déménagement|demenagement|bienvenue|mobilité|mobilite)|indemnit[éeà]|premio\s+(?:di\s+)?(?:benvenuto|assunzione|presenza)|buon[oi]\s+pasto|bonus\s+(?:di\s+)?(?:benvenuto|trasferimento))"
    ).unwrap();

    // Fixed-term contract length shown in the salary field
    pub static ref CONTRACT_DURATION: Regex = Regex::new(
        r"(?i)durée jusqu'à \d+\s*mois"
    ).unwrap();

    // Amounts introduced by a benefit ("stipend of up to $1,500")
    pub static ref BENEFIT_BEFORE: Regex = Regex::new(
        r"(?i)(?:bonus|stipend|allowance|budget|reimbursement|referral|prime|premio)\s+(?:of\s+|de\s+|di\s+|på\s+)?(?:up\s+to\s+|jusqu'à\s+|fino\s+a\s+)?(?:\$|€)?\s*\d[\d,.]*(?:\s\d{3})*k?"
    ).unwrap();
}

/// All nuisance patterns, in the order they are checked.
pub fn nuisance_patterns() -> [&'static Regex; 8] {
    [
        &RETIREMENT_PLAN,
        &MAGNITUDE,
        &PER_CAPITA,
        &PERCENTAGE,
        &HEADCOUNT,
        &IDENTIFIER,
        &BENEFIT_AFTER,
        &BENEFIT_BEFORE,
    ]
}
