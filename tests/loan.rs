use approx::assert_relative_eq;
use hot_water_lifecycle::lifecycle::{loan_summary, monthly_loan_payment, LoanInputs};
use rstest::rstest;

#[test]
fn zero_rate_is_straight_division() {
    let p = monthly_loan_payment(10_000.0, 0.0, 10.0).expect("loan");
    assert_relative_eq!(p, 10_000.0 / 120.0, max_relative = 1e-12);
    assert_eq!(format!("{p:.2}"), "83.33");
}

#[test]
fn annuity_at_five_percent() {
    let p = monthly_loan_payment(10_000.0, 0.05, 10.0).expect("loan");
    assert_eq!(format!("{p:.2}"), "106.07");
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
fn non_positive_term_is_rejected(#[case] term: f64) {
    assert!(monthly_loan_payment(10_000.0, 0.05, term).is_err());
}

#[test]
fn summary_totals_are_consistent() {
    let s = loan_summary(&LoanInputs::default()).unwrap();
    assert_relative_eq!(s.total_repaid, s.monthly_payment * 120.0, max_relative = 1e-12);
    assert_relative_eq!(s.total_interest, s.total_repaid - 10_000.0, max_relative = 1e-12);
    assert!(s.total_interest > 0.0);
}

#[test]
fn zero_rate_has_no_interest() {
    let s = loan_summary(&LoanInputs {
        principal: 6000.0,
        annual_rate: 0.0,
        term_years: 5.0,
    })
    .unwrap();
    assert_relative_eq!(s.monthly_payment, 100.0, max_relative = 1e-12);
    assert!(s.total_interest.abs() < 1e-9);
}
