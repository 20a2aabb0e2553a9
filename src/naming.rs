//! # Version Namer
//!
//! Derives the next execution name from the previously stored name and the
//! caller-supplied one. The scheme keeps a family of executions discoverable
//! by shared prefix while satisfying the engine's per-name-uniqueness rule
//! without a separate counter store.
//!
//! The derivation is a small state machine over
//! {has-suffix, no-suffix} x {requested-matches-base, requested-differs}:
//!
//! | existing      | requested  | result        |
//! |---------------|------------|---------------|
//! | `checkout-3`  | `checkout` | `checkout-4`  |
//! | `checkout-3`  | `billing`  | `billing-3`   |
//! | `checkout`    | `checkout` | `checkout-1`  |
//! | `checkout`    | `billing`  | `billing`     |
//!
//! `base` is the text before the first `-`; `suffix` is the second
//! `-`-delimited token only, so renaming over `checkout-phase-3` yields
//! `<requested>-phase`. When the requested name matches the base, the
//! trailing decimal digit run of the whole existing name is incremented;
//! an existing name with no trailing digits starts a family at `-1`.

/// Derive the next execution name.
pub fn next_execution_name(existing: &str, requested: &str) -> String {
    let (base, suffix) = split_existing(existing);

    if requested == base {
        increment_trailing_digits(existing)
    } else {
        match suffix {
            Some(suffix) => format!("{requested}-{suffix}"),
            // No suffix to carry over: the requested name stands alone
            // rather than gaining a dangling separator.
            None => requested.to_string(),
        }
    }
}

/// Split an existing name into its base and (optional) second token.
fn split_existing(existing: &str) -> (&str, Option<&str>) {
    match existing.split_once('-') {
        Some((base, rest)) => {
            let suffix = rest.split('-').next().filter(|token| !token.is_empty());
            (base, suffix)
        }
        None => (existing, None),
    }
}

/// Increment the trailing decimal digit run by one, e.g. `checkout-3` to
/// `checkout-4`. Leading zeros collapse (`checkout-03` becomes
/// `checkout-4`), matching plain decimal arithmetic. Names with no
/// trailing digits (or a run too large to represent) fall back to
/// appending `-1`, starting a numeric family deterministically.
fn increment_trailing_digits(existing: &str) -> String {
    let digit_count = existing
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    // Trailing ASCII digits are single-byte, so this is a char boundary.
    let start = existing.len() - digit_count;

    if digit_count == 0 {
        return format!("{existing}-1");
    }

    match existing[start..]
        .parse::<u128>()
        .ok()
        .and_then(|n| n.checked_add(1))
    {
        Some(next) => format!("{}{next}", &existing[..start]),
        None => format!("{existing}-1"),
    }
}
