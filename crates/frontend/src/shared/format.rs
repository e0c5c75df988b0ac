//! Number formatting for KPI cards and breakdown tables.

/// How a value is rendered
#[derive(Debug, Clone, PartialEq)]
pub enum ValueFormat {
    Money { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

impl ValueFormat {
    pub fn dollars() -> Self {
        Self::Money {
            currency: "$".to_string(),
        }
    }
}

pub fn format_value(val: f64, fmt: &ValueFormat) -> String {
    match fmt {
        ValueFormat::Money { currency } => {
            let sign = if val < 0.0 { "-" } else { "" };
            format!("{}{}{}", sign, currency, format_decimal(val.abs(), 2))
        }
        ValueFormat::Number { decimals } => format_decimal(val, *decimals),
        ValueFormat::Percent { decimals } => format!("{}%", format_decimal(val, *decimals)),
        ValueFormat::Integer => format_thousands(val.round() as i64),
    }
}

/// Fixed decimals with thousands grouped by `,`
pub fn format_decimal(val: f64, decimals: u8) -> String {
    let fixed = format!("{:.prec$}", val.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let grouped = group_digits(int_part);
    let sign = if val < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn format_thousands(n: i64) -> String {
    let grouped = group_digits(&n.unsigned_abs().to_string());
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
