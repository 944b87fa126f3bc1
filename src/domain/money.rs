//! Indian-rupee display formatting.

/// Formats a rupee amount the way the dashboard shows it: no decimals, Indian
/// digit grouping (last three digits, then groups of two), so 1000000 renders
/// as `₹10,00,000`. Non-finite input renders as `₹0`.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return "₹0".to_string();
    }

    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let grouped = group_indian(&rounded.to_string());

    if negative && rounded > 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
