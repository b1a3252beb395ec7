//! Binary-side test suite covering report-level behavior across modules.

mod report_tests;
