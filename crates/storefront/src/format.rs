//! Number, currency and date formatting for the ko-KR storefront.

use chrono::{Datelike, Local, NaiveDate, Utc, Weekday};

/// Group digits in threes: `1234567` → `"1,234,567"`.
pub fn format_number(n: impl Into<i128>) -> String {
    let n: i128 = n.into();
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Product-card price text: `25000` → `"25,000원"`.
pub fn format_won(amount: u64) -> String {
    format!("{}원", format_number(amount))
}

/// Currency display in whole units of `code`.
///
/// Currencies without minor units (KRW, JPY) print no decimals; others print two.
pub fn format_currency(amount: i64, code: &str) -> String {
    let grouped = format_number(amount);
    match code.to_ascii_uppercase().as_str() {
        "KRW" => format!("₩{grouped}"),
        "JPY" => format!("JP¥{grouped}"),
        "USD" => format!("US${grouped}.00"),
        "EUR" => format!("€{grouped}.00"),
        other => format!("{other} {grouped}.00"),
    }
}

/// `0.125` with one decimal → `"12.5%"`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Abbreviate large counts: `1500` → `"1.5K"`, `2300000` → `"2.3M"`.
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn current_date() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Local wall-clock time as `HH:MM:SS`.
pub fn current_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn weekday_ko(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

/// Long Korean date: `"2024년 3월 5일 화요일"`.
pub fn format_korean(date: NaiveDate) -> String {
    format!(
        "{}년 {}월 {}일 {}",
        date.year(),
        date.month(),
        date.day(),
        weekday_ko(date.weekday())
    )
}

/// Coarse "time ago" label for `then` as seen from `now`. Future dates read as today.
pub fn relative_time(then: NaiveDate, now: NaiveDate) -> String {
    let days = (now - then).num_days();
    match days {
        i64::MIN..=0 => "오늘".to_string(),
        1 => "어제".to_string(),
        2..=6 => format!("{days}일 전"),
        7..=29 => format!("{}주 전", days / 7),
        30..=364 => format!("{}개월 전", days / 30),
        _ => format!("{}년 전", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn numbers_group_by_thousands() {
        assert_eq!(format_number(0u32), "0");
        assert_eq!(format_number(999u32), "999");
        assert_eq!(format_number(62_000u64), "62,000");
        assert_eq!(format_number(1_234_567i64), "1,234,567");
        assert_eq!(format_number(-45_000i64), "-45,000");
    }

    #[test]
    fn won_and_currency_displays() {
        assert_eq!(format_won(25_000), "25,000원");
        assert_eq!(format_currency(25_000, "KRW"), "₩25,000");
        assert_eq!(format_currency(19, "usd"), "US$19.00");
    }

    #[test]
    fn percent_and_compact() {
        assert_eq!(format_percent(0.125, 1), "12.5%");
        assert_eq!(format_percent(0.5, 0), "50%");
        assert_eq!(format_compact(950), "950");
        assert_eq!(format_compact(1_500), "1.5K");
        assert_eq!(format_compact(2_300_000), "2.3M");
    }

    #[test]
    fn korean_long_date_includes_weekday() {
        assert_eq!(format_korean(date(2024, 3, 5)), "2024년 3월 5일 화요일");
    }

    #[test]
    fn relative_time_buckets() {
        let now = date(2024, 6, 30);
        assert_eq!(relative_time(date(2024, 6, 30), now), "오늘");
        assert_eq!(relative_time(date(2024, 7, 2), now), "오늘");
        assert_eq!(relative_time(date(2024, 6, 29), now), "어제");
        assert_eq!(relative_time(date(2024, 6, 25), now), "5일 전");
        assert_eq!(relative_time(date(2024, 6, 16), now), "2주 전");
        assert_eq!(relative_time(date(2024, 3, 30), now), "3개월 전");
        assert_eq!(relative_time(date(2022, 6, 1), now), "2년 전");
    }

    #[test]
    fn current_date_is_iso_formatted() {
        let today = current_date();
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
        assert_eq!(current_time().len(), 8);
    }
}
