use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use tahsilat_core::CollectionMethod;

use crate::types::ExtractedFields;

// Confidence contribution of each matched field.
const WEIGHT_DOCUMENT_NUMBER: u8 = 30;
const WEIGHT_AMOUNT: u8 = 25;
const WEIGHT_DATE: u8 = 20;
const WEIGHT_PAYMENT_METHOD: u8 = 15;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Document-number label words (No / Evrak / Fiş / Belge) are spelled out
// with explicit case alternants: `(?i)` uses simple Unicode folding, which
// does not map İ/ı onto i, so dotted-capital Turkish spellings like FİŞ
// would silently miss.
re!(re_doc_labeled,
    r"(?:[Nn][Oo]|[Ee][Vv][Rr][Aa][Kk]|[Ff][İIiı][ŞşSs]|[Bb][Ee][Ll][Gg][Ee])\s*[:.]?\s*(\d{4,8})\b");
re!(re_doc_suffixed,
    r"\b(\d{5,8})\s*(?:[Nn][Oo]|[Ee][Vv][Rr][Aa][Kk]|[Ff][İIiı][ŞşSs]|[Bb][Ee][Ll][Gg][Ee])");
re!(re_doc_standalone,
    r"(?:^|\s)(\d{5,8})(?:\s|$)");
re!(re_doc_series,
    r"[Ss][Ee][Rr][İIiı][Ee]?\s*[A-Za-zÇĞİÖŞÜçğıöşü]*\s*(?:[Nn][Oo]|[Ee][Vv][Rr][Aa][Kk]|[Ff][İIiı][ŞşSs]|[Bb][Ee][Ll][Gg][Ee])\s*[:.]?\s*(\d{4,8})\b");

// The numeric token accepts both `.` and `,` in any mix; the normalizer
// decides which one is the decimal separator.
re!(re_amount_currency,
    r"(\d+(?:[.,]\d+)+)\s*(?:TL\b|₺|[Kk][Rr]\b)");
re!(re_amount_labeled,
    r"(?i)(?:toplam|total|tutar|miktar)\s*:?\s*(\d+(?:[.,]\d+)+)");
re!(re_amount_two_decimal,
    r"(\d+[.,]\d{2})\s*(?:TL\b|₺|[Kk][Rr]\b)");

re!(re_date,
    r"\b(\d{1,2})[./-](\d{1,2})[./-](\d{4}|\d{2})\b");

// ── Rule chains ──────────────────────────────────────────────────────────────
//
// Each field is an ordered list of rules tried in sequence; the first rule
// that matches wins, and within a rule the first match in text order is
// taken. Chains are data so individual rules stay testable on their own.

type PatternRule = fn() -> &'static Regex;

const DOCUMENT_NUMBER_RULES: &[PatternRule] = &[
    re_doc_labeled,
    re_doc_suffixed,
    re_doc_standalone,
    re_doc_series,
];

type AmountRule = (PatternRule, fn(&str) -> Option<Decimal>);

const AMOUNT_RULES: &[AmountRule] = &[
    (re_amount_currency, parse_amount_token),
    (re_amount_labeled, parse_amount_token),
    (re_amount_two_decimal, parse_amount_token),
];

/// Payment keywords in priority order. The search is case-sensitive
/// substring matching over the raw text; receipts print these in caps.
const PAYMENT_KEYWORDS: &[(&str, CollectionMethod)] = &[
    ("NAKİT", CollectionMethod::Nakit),
    ("NAKIT", CollectionMethod::Nakit),
    ("KART", CollectionMethod::KrediKarti),
    ("KREDİ", CollectionMethod::KrediKarti),
    ("ÇEK", CollectionMethod::Cek),
    ("HAVALE", CollectionMethod::BankaHavalesi),
];

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Parse raw recognized text into structured fields.
    ///
    /// Total and deterministic: the same text always yields the same fields
    /// and confidence, rules that find nothing leave their field `None`,
    /// and nothing in here can fail — partial extraction always beats a
    /// pipeline error.
    pub fn extract(text: &str) -> ExtractedFields {
        let document_number = extract_document_number(text);
        let amount = extract_amount(text);
        let date = extract_date(text);
        let payment_method = extract_payment_method(text);

        let mut confidence = 0u8;
        if document_number.is_some() {
            confidence += WEIGHT_DOCUMENT_NUMBER;
        }
        if amount.is_some() {
            confidence += WEIGHT_AMOUNT;
        }
        if date.is_some() {
            confidence += WEIGHT_DATE;
        }
        if payment_method.is_some() {
            confidence += WEIGHT_PAYMENT_METHOD;
        }

        ExtractedFields { document_number, amount, date, payment_method, confidence }
    }
}

fn extract_document_number(text: &str) -> Option<String> {
    DOCUMENT_NUMBER_RULES.iter().find_map(|rule| {
        rule().captures(text).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
    })
}

fn extract_amount(text: &str) -> Option<Decimal> {
    AMOUNT_RULES.iter().find_map(|(rule, normalize)| {
        rule().captures(text).and_then(|c| c.get(1)).and_then(|m| normalize(m.as_str()))
    })
}

/// Normalize `D[./-]M[./-]Y` to zero-padded `DD.MM.YYYY`. Two-digit years
/// get a `20` prefix. No calendar validation — 31.02 passes through.
fn extract_date(text: &str) -> Option<String> {
    let c = re_date().captures(text)?;
    let day: u32 = c[1].parse().ok()?;
    let month: u32 = c[2].parse().ok()?;
    let year = match c[3].len() {
        2 => format!("20{}", &c[3]),
        _ => c[3].to_string(),
    };
    Some(format!("{day:02}.{month:02}.{year}"))
}

fn extract_payment_method(text: &str) -> Option<CollectionMethod> {
    PAYMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, method)| *method)
}

// ── Amount parsing ────────────────────────────────────────────────────────────

/// Parse a numeric token that may use `.` or `,` as either a thousands or a
/// decimal separator. When both appear the later one is the decimal
/// separator; a lone separator is always the decimal separator.
fn parse_amount_token(s: &str) -> Option<Decimal> {
    let normalized = match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        (None, Some(_)) => s.replace(',', "."),
        _ => s.to_string(),
    };
    Decimal::from_str(&normalized).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
