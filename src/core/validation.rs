//! Finalization-boundary checks.
//!
//! These run when the user asks to generate the final document, never
//! during recalculation: the engine always returns a best-effort total,
//! even for an all-zero draft. All errors are collected, not just the
//! first.

use super::error::ValidationError;
use super::types::InvoiceDraft;

/// Validate a draft before document generation.
/// Returns every problem found; an empty vec means the draft is ready.
pub fn validate_draft(draft: &InvoiceDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.number.trim().is_empty() {
        errors.push(ValidationError::new(
            "number",
            "invoice number must not be empty",
        ));
    }

    if draft.seller.name.trim().is_empty() {
        errors.push(ValidationError::new(
            "seller.name",
            "seller name must not be empty",
        ));
    }

    if draft.client.name.trim().is_empty() {
        errors.push(ValidationError::new(
            "client.name",
            "client name must not be empty",
        ));
    }

    if draft.lines.is_empty() {
        errors.push(ValidationError::new(
            "lines",
            "invoice must have at least one line",
        ));
    }

    if let Some(siret) = &draft.seller.siret {
        if !is_valid_siret(siret) {
            errors.push(ValidationError::new(
                "seller.siret",
                format!("'{siret}' is not a valid SIRET (14 digits, Luhn check)"),
            ));
        }
    }

    if let Some(iban) = &draft.payment.iban {
        if !is_valid_iban(iban) {
            errors.push(ValidationError::new(
                "payment.iban",
                format!("'{iban}' is not a plausible IBAN"),
            ));
        }
    }

    if let Some(email) = &draft.seller.email {
        if !is_valid_email(email) {
            errors.push(ValidationError::new(
                "seller.email",
                format!("'{email}' is not a valid email address"),
            ));
        }
    }
    if let Some(email) = &draft.client.email {
        if !is_valid_email(email) {
            errors.push(ValidationError::new(
                "client.email",
                format!("'{email}' is not a valid email address"),
            ));
        }
    }

    errors
}

/// SIRET check: 14 digits passing the Luhn algorithm (digits at even
/// positions doubled, digit-sum divisible by 10). Spaces are ignored.
pub fn is_valid_siret(siret: &str) -> bool {
    let digits: Vec<u32> = siret
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if digits.len() != 14 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Shallow IBAN plausibility check: overall length 15..=34, and French
/// IBANs must start with "FR" followed by two check digits. Non-French
/// prefixes are only length-checked.
pub fn is_valid_iban(iban: &str) -> bool {
    let iban: String = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if iban.len() < 15 || iban.len() > 34 {
        return false;
    }

    if let Some(rest) = iban.strip_prefix("FR") {
        let mut chars = rest.chars();
        return chars.next().is_some_and(|c| c.is_ascii_digit())
            && chars.next().is_some_and(|c| c.is_ascii_digit());
    }

    true
}

/// Basic email shape: one "@", non-empty local part, domain containing a
/// dot, no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
