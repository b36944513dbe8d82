/// Format a float as a rupee amount with Indian digit grouping: the last
/// three digits form one group, every two digits after that: ₹5,00,00,000.00
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-₹{with_commas}.{dec_part}")
    } else {
        format!("₹{with_commas}.{dec_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "₹1,234.56");
        assert_eq!(money(-500.00), "-₹500.00");
        assert_eq!(money(0.0), "₹0.00");
        assert_eq!(money(100000.0), "₹1,00,000.00");
        assert_eq!(money(50000000.0), "₹5,00,00,000.00");
        assert_eq!(money(42.10), "₹42.10");
    }
}
