// Format a nanosecond latency with the largest unit that keeps it >= 1
pub fn format_ns(ns: f64) -> String {
    const US: f64 = 1000.0;
    const MS: f64 = 1000.0 * US;
    const S: f64 = 1000.0 * MS;

    let abs = ns.abs();
    if abs >= S {
        format!("{:.2} s", ns / S)
    } else if abs >= MS {
        format!("{:.2} ms", ns / MS)
    } else if abs >= US {
        format!("{:.2} µs", ns / US)
    } else {
        format!("{:.0} ns", ns)
    }
}

// Short axis label for a count or latency bound: 950, 1.5k, 60k, 2.3M
pub fn format_count(n: u64) -> String {
    const K: u64 = 1000;
    const M: u64 = 1000 * K;
    if n >= M {
        trim_zero(format!("{:.1}", n as f64 / M as f64)) + "M"
    } else if n >= K {
        trim_zero(format!("{:.1}", n as f64 / K as f64)) + "k"
    } else {
        n.to_string()
    }
}

fn trim_zero(s: String) -> String {
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ns_units() {
        assert_eq!(format_ns(850.0), "850 ns");
        assert_eq!(format_ns(12_346.0), "12.35 µs");
        assert_eq!(format_ns(1_200_000.0), "1.20 ms");
        assert_eq!(format_ns(3_000_000_000.0), "3.00 s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(1500), "1.5k");
        assert_eq!(format_count(60_000), "60k");
        assert_eq!(format_count(2_300_000), "2.3M");
    }
}
