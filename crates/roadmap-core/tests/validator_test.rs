//! Integration tests for chronological plan validation.
//!
//! Covers ordering across quarters and years, quarter-scoped corequisites,
//! and the worked scenarios students hit most often.

use roadmap_core::{CourseLocation, Plan, QuarterName, validate};
use roadmap_test_utils::{
    and, course, course_with, leaf, or, quarter, single_year_plan, transfers, year,
};

fn at(year_index: usize, quarter_index: usize, course_index: usize) -> CourseLocation {
    CourseLocation {
        year_index,
        quarter_index,
        course_index,
    }
}

fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

// -----------------------------------------------------------------------
// End-to-end scenario
// -----------------------------------------------------------------------

#[test]
fn prerequisites_in_a_later_quarter_do_not_count() {
    let plan = single_year_plan(vec![
        quarter(
            QuarterName::Fall,
            vec![course_with(
                "COMPSCI",
                "161",
                and(vec![leaf("COMPSCI 141"), leaf("MATH 2A")]),
            )],
        ),
        quarter(
            QuarterName::Winter,
            vec![course("COMPSCI", "141"), course("MATH", "2A")],
        ),
    ]);

    let report = validate(&[], &plan);

    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].location, at(0, 0, 0));
    assert_eq!(report.invalid[0].required, strings(&["COMPSCI 141", "MATH 2A"]));
    assert_eq!(
        report.missing.iter().cloned().collect::<Vec<_>>(),
        strings(&["COMPSCI 141", "MATH 2A"])
    );
}

#[test]
fn peers_in_the_same_quarter_are_not_taken_before() {
    let plan = single_year_plan(vec![quarter(
        QuarterName::Fall,
        vec![
            course_with(
                "COMPSCI",
                "161",
                and(vec![leaf("COMPSCI 141"), leaf("MATH 2A")]),
            ),
            course("COMPSCI", "141"),
            course("MATH", "2A"),
        ],
    )]);

    let report = validate(&[], &plan);

    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].location, at(0, 0, 0));
    assert_eq!(report.invalid[0].required, strings(&["COMPSCI 141", "MATH 2A"]));
}

#[test]
fn prerequisites_in_an_earlier_quarter_count() {
    let plan = single_year_plan(vec![
        quarter(
            QuarterName::Fall,
            vec![course("COMPSCI", "141"), course("MATH", "2A")],
        ),
        quarter(
            QuarterName::Winter,
            vec![course_with(
                "COMPSCI",
                "161",
                and(vec![leaf("COMPSCI 141"), leaf("MATH 2A")]),
            )],
        ),
    ]);

    let report = validate(&[], &plan);
    assert!(report.is_valid(), "unexpected report: {report:?}");
    assert!(report.missing.is_empty());
}

// -----------------------------------------------------------------------
// Chronology
// -----------------------------------------------------------------------

#[test]
fn prerequisite_two_quarters_later_never_satisfies() {
    let plan = single_year_plan(vec![
        quarter(QuarterName::Fall, vec![course("MATH", "2A")]),
        quarter(
            QuarterName::Winter,
            vec![course_with("MATH", "3A", leaf("MATH 2B"))],
        ),
        quarter(QuarterName::Spring, vec![course("MATH", "2B")]),
    ]);

    let report = validate(&[], &plan);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].location, at(0, 1, 0));
    assert_eq!(report.invalid[0].required, strings(&["MATH 2B"]));
}

#[test]
fn earlier_years_count_for_later_years() {
    let plan = Plan::new(vec![
        year(
            2023,
            "Year 1",
            vec![quarter(QuarterName::Summer10wk, vec![course("I&C SCI", "31")])],
        ),
        year(
            2024,
            "Year 2",
            vec![quarter(
                QuarterName::Fall,
                vec![course_with("I&C SCI", "32", leaf("I&C SCI 31"))],
            )],
        ),
    ]);

    assert!(validate(&[], &plan).is_valid());
}

#[test]
fn later_years_never_count_for_earlier_years() {
    let plan = Plan::new(vec![
        year(
            2023,
            "Year 1",
            vec![quarter(
                QuarterName::Spring,
                vec![course_with("I&C SCI", "32", leaf("I&C SCI 31"))],
            )],
        ),
        year(
            2024,
            "Year 2",
            vec![quarter(QuarterName::Fall, vec![course("I&C SCI", "31")])],
        ),
    ]);

    let report = validate(&[], &plan);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].location, at(0, 0, 0));
}

#[test]
fn transfer_credit_counts_before_the_plan() {
    let plan = single_year_plan(vec![quarter(
        QuarterName::Fall,
        vec![course_with(
            "COMPSCI",
            "161",
            and(vec![leaf("COMPSCI 141"), leaf("MATH 2A")]),
        )],
    )]);

    let report = validate(&transfers(&["MATH 2A"]), &plan);
    assert_eq!(report.invalid[0].required, strings(&["COMPSCI 141"]));

    let report = validate(&transfers(&["MATH 2A", "COMPSCI 141"]), &plan);
    assert!(report.is_valid());
}

// -----------------------------------------------------------------------
// Quarter-scoped corequisites
// -----------------------------------------------------------------------

fn lab_with_coreq() -> roadmap_core::PlannedCourse {
    let mut lab = course_with("PHYSICS", "7LC", leaf("PHYSICS 7C"));
    lab.corequisites = "PHYSICS 7C".to_string();
    lab
}

#[test]
fn corequisite_in_the_same_quarter_satisfies() {
    let plan = single_year_plan(vec![quarter(
        QuarterName::Fall,
        vec![lab_with_coreq(), course("PHYSICS", "7C")],
    )]);

    assert!(validate(&[], &plan).is_valid());
}

#[test]
fn corequisite_in_a_different_quarter_does_not_satisfy() {
    let plan = single_year_plan(vec![
        quarter(QuarterName::Fall, vec![lab_with_coreq()]),
        quarter(QuarterName::Winter, vec![course("PHYSICS", "7C")]),
    ]);

    let report = validate(&[], &plan);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].required, strings(&["PHYSICS 7C"]));
}

#[test]
fn corequisite_taken_earlier_still_satisfies() {
    let plan = single_year_plan(vec![
        quarter(QuarterName::Fall, vec![course("PHYSICS", "7C")]),
        quarter(QuarterName::Winter, vec![lab_with_coreq()]),
    ]);

    assert!(validate(&[], &plan).is_valid());
}

#[test]
fn concurrency_only_applies_to_the_corequisite_leaf() {
    let mut lab = course_with(
        "PHYSICS",
        "7LC",
        and(vec![leaf("PHYSICS 7C"), leaf("MATH 2B")]),
    );
    lab.corequisites = "PHYSICS 7C".to_string();

    let plan = single_year_plan(vec![quarter(
        QuarterName::Fall,
        vec![lab, course("PHYSICS", "7C"), course("MATH", "2B")],
    )]);

    let report = validate(&[], &plan);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].required, strings(&["MATH 2B"]));
}

// -----------------------------------------------------------------------
// Aggregation
// -----------------------------------------------------------------------

#[test]
fn or_requirements_report_every_alternative_when_unmet() {
    let plan = single_year_plan(vec![quarter(
        QuarterName::Fall,
        vec![course_with(
            "STATS",
            "67",
            or(vec![leaf("MATH 2A"), leaf("AP Calculus AB")]),
        )],
    )]);

    let report = validate(&[], &plan);
    assert_eq!(
        report.invalid[0].required,
        strings(&["MATH 2A", "AP Calculus AB"])
    );

    let report = validate(&transfers(&["AP Calculus AB"]), &plan);
    assert!(report.is_valid());
}

#[test]
fn invalid_reports_are_in_plan_order_and_missing_is_merged() {
    let plan = Plan::new(vec![
        year(
            2024,
            "Year 1",
            vec![
                quarter(
                    QuarterName::Fall,
                    vec![
                        course_with("A", "2", leaf("A 1")),
                        course_with("B", "2", and(vec![leaf("B 1"), leaf("A 1")])),
                    ],
                ),
                quarter(QuarterName::Winter, vec![course_with("C", "2", leaf("C 1"))]),
            ],
        ),
        year(
            2025,
            "Year 2",
            vec![quarter(QuarterName::Fall, vec![course_with("D", "2", leaf("D 1"))])],
        ),
    ]);

    let report = validate(&[], &plan);
    let locations: Vec<CourseLocation> = report.invalid.iter().map(|r| r.location).collect();
    assert_eq!(
        locations,
        vec![at(0, 0, 0), at(0, 0, 1), at(0, 1, 0), at(1, 0, 0)]
    );
    assert_eq!(
        report.missing.iter().cloned().collect::<Vec<_>>(),
        strings(&["A 1", "B 1", "C 1", "D 1"])
    );
}
