//! CLI/GUI가 공통으로 쓰는 결과 표 구성 및 숫자 서식.

use crate::lifecycle::{Comparison, Technology};

/// 비교 표 한 줄.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub technology: Technology,
    pub value: f64,
    /// 표 안 최댓값 대비 비율(0~1). 막대 길이에 쓴다.
    pub share: f64,
}

fn rows_from(ranked: Vec<(Technology, f64)>) -> Vec<ReportRow> {
    let max = ranked
        .iter()
        .map(|(_, v)| *v)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    ranked
        .into_iter()
        .map(|(technology, value)| ReportRow {
            technology,
            value,
            share: if max > 0.0 {
                (value / max).clamp(0.0, 1.0)
            } else {
                0.0
            },
        })
        .collect()
}

/// 총비용 오름차순 표.
pub fn cost_rows(comparison: &Comparison) -> Vec<ReportRow> {
    rows_from(comparison.ranked_by_cost())
}

/// 배출량 오름차순 표.
pub fn emission_rows(comparison: &Comparison) -> Vec<ReportRow> {
    rows_from(comparison.ranked_by_emissions())
}

/// 텍스트 막대. `share`(0~1)를 `width` 칸으로 그린다.
pub fn text_bar(share: f64, width: usize) -> String {
    let filled = (share.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}

/// 천 단위 구분 쉼표를 넣어 서식화한다. (예: 3072.31 → "3,072.31")
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && formatted_nonzero(&grouped, frac_part.as_deref()) {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn formatted_nonzero(int_part: &str, frac_part: Option<&str>) -> bool {
    int_part.chars().chain(frac_part.unwrap_or("").chars()).any(|c| c.is_ascii_digit() && c != '0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(3072.314, 2), "3,072.31");
        assert_eq!(format_thousands(1_234_567.0, 0), "1,234,567");
        assert_eq!(format_thousands(999.0, 1), "999.0");
        assert_eq!(format_thousands(-4800.5, 2), "-4,800.50");
        assert_eq!(format_thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn bar_width_matches_share() {
        assert_eq!(text_bar(0.5, 10).chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(text_bar(2.0, 4), "████");
        assert_eq!(text_bar(0.0, 3), "···");
    }
}
