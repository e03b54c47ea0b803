//! The trip summary as plain data, independent of the document format it is rendered to.

use crate::database::expense::{ExpenseWithAuthor, total_amount};
use crate::database::membership::MemberSummary;
use crate::database::trip::Trip;
use rust_decimal::Decimal;

pub const REPORT_SUBTITLE: &str = "Trip Summary Report";
pub const REPORT_FOOTER: &str = "Generated by Trip Planner";
pub const NO_EXPENSES: &str = "No expenses recorded yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripReport {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<ReportSection>,
    pub footer: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Label/value pairs.
    Fields(Vec<(String, String)>),
    Table(ReportTable),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    /// Relative column widths, one per header.
    pub widths: Vec<u16>,
    pub rows: Vec<Vec<String>>,
    /// Emphasised closing row, e.g. a total.
    pub summary: Option<Vec<String>>,
}

/// Assembles the summary a member downloads from the trip page.
#[must_use]
pub fn build_trip_report(
    trip: &Trip,
    members: &[MemberSummary],
    expenses: &[ExpenseWithAuthor],
    exported_by: &str,
) -> TripReport {
    let information = ReportSection {
        heading: "Trip Information".to_owned(),
        body: SectionBody::Fields(vec![
            ("Destination:".to_owned(), trip.destination.clone()),
            ("Start Date:".to_owned(), trip.start_date.format("%Y-%m-%d").to_string()),
            ("End Date:".to_owned(), trip.end_date.format("%Y-%m-%d").to_string()),
            ("Duration:".to_owned(), format!("{} days", trip.duration_days())),
            ("Join Code:".to_owned(), trip.join_code.clone()),
        ]),
    };

    let members_section = ReportSection {
        heading: "Trip Members".to_owned(),
        body: SectionBody::Table(ReportTable {
            headers: vec!["Name".to_owned(), "Email".to_owned()],
            widths: vec![5, 7],
            rows: members
                .iter()
                .map(|m| {
                    let name = m
                        .name
                        .as_deref()
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .unwrap_or("N/A");
                    vec![name.to_owned(), m.email.clone()]
                })
                .collect(),
            summary: None,
        }),
    };

    let budget_body = if expenses.is_empty() {
        SectionBody::Text(NO_EXPENSES.to_owned())
    } else {
        let total = total_amount(expenses.iter().map(|e| &e.amount));
        SectionBody::Table(ReportTable {
            headers: ["Purpose", "Amount (INR)", "Added By", "Date"]
                .map(String::from)
                .to_vec(),
            widths: vec![4, 3, 3, 3],
            rows: expenses
                .iter()
                .map(|e| {
                    vec![
                        e.purpose.clone(),
                        format_amount(e.amount),
                        e.author_display_name().to_owned(),
                        e.created_at.format("%b %d, %Y").to_string(),
                    ]
                })
                .collect(),
            summary: Some(vec![
                String::new(),
                "Total:".to_owned(),
                format_amount(total),
                String::new(),
            ]),
        })
    };

    TripReport {
        title: trip.name.clone(),
        subtitle: REPORT_SUBTITLE.to_owned(),
        sections: vec![
            information,
            members_section,
            ReportSection {
                heading: "Budget Summary".to_owned(),
                body: budget_body,
            },
        ],
        footer: vec![
            REPORT_FOOTER.to_owned(),
            format!("Exported by: {exported_by}"),
        ],
    }
}

/// Download name of the report: the trip name with spaces replaced by underscores.
#[must_use]
pub fn export_filename(trip_name: &str) -> String {
    format!("{}_Summary.pdf", trip_name.replace(' ', "_"))
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::membership::TripRole;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn goa_trip() -> Trip {
        Trip {
            id: 1,
            name: "Goa Trip".to_owned(),
            destination: "Goa".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 5).expect("valid date"),
            start_location: None,
            estimated_budget: Some(Decimal::from(20_000)),
            join_code: "AB12CD".to_owned(),
            created_at: Utc::now(),
        }
    }

    fn member(user_id: i32, email: &str, name: Option<&str>) -> MemberSummary {
        MemberSummary {
            user_id,
            email: email.to_owned(),
            name: name.map(String::from),
            role: TripRole::Member,
        }
    }

    fn expense(id: i32, amount: Decimal, purpose: &str) -> ExpenseWithAuthor {
        ExpenseWithAuthor {
            id,
            trip_id: 1,
            user_id: 1,
            amount,
            purpose: purpose.to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 1, 2, 10, 0, 0)
                .single()
                .expect("valid timestamp"),
            author_email: "a@x.com".to_owned(),
            author_name: Some("Alice".to_owned()),
        }
    }

    #[test]
    fn report_lists_trip_information() {
        let report = build_trip_report(&goa_trip(), &[], &[], "Alice");

        assert_eq!(report.title, "Goa Trip");
        assert_eq!(report.subtitle, REPORT_SUBTITLE);
        let SectionBody::Fields(fields) = &report.sections[0].body else {
            panic!("trip information should be fields");
        };
        assert!(fields.contains(&("Duration:".to_owned(), "5 days".to_owned())));
        assert!(fields.contains(&("Join Code:".to_owned(), "AB12CD".to_owned())));
        assert_eq!(
            report.footer,
            vec![REPORT_FOOTER.to_owned(), "Exported by: Alice".to_owned()]
        );
    }

    #[test]
    fn members_without_a_name_show_na() {
        let members = [
            member(1, "a@x.com", Some("Alice")),
            member(2, "b@x.com", None),
            member(3, "c@x.com", Some("  ")),
        ];
        let report = build_trip_report(&goa_trip(), &members, &[], "Alice");

        let SectionBody::Table(table) = &report.sections[1].body else {
            panic!("members should be a table");
        };
        assert_eq!(table.rows[0], vec!["Alice", "a@x.com"]);
        assert_eq!(table.rows[1], vec!["N/A", "b@x.com"]);
        assert_eq!(table.rows[2], vec!["N/A", "c@x.com"]);
    }

    #[test]
    fn empty_budget_says_so() {
        let report = build_trip_report(&goa_trip(), &[], &[], "Alice");

        assert_eq!(
            report.sections[2].body,
            SectionBody::Text(NO_EXPENSES.to_owned())
        );
    }

    #[test]
    fn budget_rows_end_with_the_total() {
        let expenses = [
            expense(1, Decimal::new(150_050, 2), "Hotel"),
            expense(2, Decimal::new(25, 0), "Taxi"),
        ];
        let report = build_trip_report(&goa_trip(), &[], &expenses, "Alice");

        let SectionBody::Table(table) = &report.sections[2].body else {
            panic!("budget should be a table");
        };
        assert_eq!(table.rows[0], vec!["Hotel", "1500.50", "Alice", "Jan 02, 2025"]);
        assert_eq!(table.rows[1][1], "25.00");
        assert_eq!(
            table.summary.as_deref(),
            Some(&["".to_owned(), "Total:".to_owned(), "1525.50".to_owned(), "".to_owned()][..])
        );
    }

    #[test]
    fn filename_replaces_spaces() {
        assert_eq!(export_filename("Goa Trip 2025"), "Goa_Trip_2025_Summary.pdf");
        assert_eq!(export_filename("Solo"), "Solo_Summary.pdf");
    }
}
