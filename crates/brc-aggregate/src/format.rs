//! Display formatting for values and rates.
//!
//! Money renders as Brazilian real (`R$ 1.234,50`): `.` groups thousands,
//! `,` separates cents. Rates render compactly with one decimal and a
//! `K`/`M`/`B`/`T` suffix from one thousand up.

use crate::{Micros, MICROS_SCALE};

const CENT_MICROS: i64 = MICROS_SCALE / 100;

/// `R$ 25,00`, `R$ 1.234.567,89`. Rounds half away from zero to the cent.
pub fn format_currency(value: Micros) -> String {
    let raw = value.raw();
    let negative = raw < 0;
    let abs = raw.unsigned_abs();
    let half = (CENT_MICROS / 2) as u64;
    let cents = (abs + half) / CENT_MICROS as u64;

    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    if negative && cents > 0 {
        format!("-R$ {whole},{frac:02}")
    } else {
        format!("R$ {whole},{frac:02}")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `950.0`, `1.5K`, `2.3M`, `4.0B`, `1.2T`.
pub fn format_compact(n: f64) -> String {
    const STEPS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in STEPS {
        if n >= scale {
            return format!("{:.1}{suffix}", n / scale);
        }
    }
    format!("{n:.1}")
}

/// Compact rate with the per-second unit, e.g. `1.5K/s`.
pub fn format_rate(per_second: f64) -> String {
    format!("{}/s", format_compact(per_second))
}
