//! Shared display helpers.

/// Mask an account or card number for display and diagnostics, keeping the
/// trailing digits visible.
///
/// ```
/// use shared::utils::mask_number;
///
/// assert_eq!(mask_number("4532015112830366", 4), "****0366");
/// ```
pub fn mask_number(number: &str, visible: usize) -> String {
    if number.len() <= visible {
        return "*".repeat(number.len());
    }
    format!("****{}", &number[number.len() - visible..])
}
