//! Display helpers shared by the recommendation text and the binaries

/// Whole-dollar currency with thousands separators, e.g. `$1,234` or `-$56`
pub fn fmt_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// `"67 years and 0 months"`
pub fn fmt_age(years: u32, months: u32) -> String {
    format!("{} years and {} months", years, months)
}
