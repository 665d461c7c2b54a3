/// CPF (Brazilian national id) check-digit validation.
///
/// A CPF is 11 digits; the last two are mod-11 check digits over the first
/// nine and ten respectively. The all-same-digit numbers pass the arithmetic
/// but are reserved as invalid.
pub fn is_valid(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }
    digits[9] == check_digit(&digits[..9]) && digits[10] == check_digit(&digits[..10])
}

/// Check digit over a 9- or 10-digit prefix: weighted sum with weights
/// descending from len+1, then 11 - (sum mod 11), clamped to 0 for small
/// remainders.
fn check_digit(prefix: &[u32]) -> u32 {
    let start = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (start - i as u32))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}
