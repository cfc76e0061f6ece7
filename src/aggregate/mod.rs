//! Client-side derivations over fetched entity collections.
//!
//! Every function here is pure: it borrows normalized entities and returns
//! counts, ratios, groupings, joins, or rankings. Nothing returns an error;
//! missing optional fields fall back to zero, empty, or an "unknown" label.

pub mod dashboard;
pub mod filter;
pub mod finance;
pub mod join;
pub mod ranking;
pub mod report;
pub mod revenue;
pub mod tally;
pub mod upcoming;
pub mod window;

pub use dashboard::{dashboard_stats, DashboardStats, ReservationRow, StatusShare};
pub use filter::{search_customers, sort_by_date, ReservationFilter};
pub use finance::{finance_by_month, finance_summary, FinanceSummary, MonthlyFinance};
pub use join::{
    customer_label, customer_summary, join_customers, reservations_by_customer,
    CustomerReservationSummary, JoinedReservation, UNKNOWN_CUSTOMER,
};
pub use ranking::{top_n_by_distinct_customers, top_payment_methods, top_services, RankedGroup};
pub use report::{reservation_report, ReservationReport, ReservationReportDto};
pub use revenue::{revenue_by_method, revenue_summary, MethodRevenue, RevenueSummary};
pub use tally::{percentage, tally_payments, tally_reservations, PaymentStatusCounts, ReservationStatusCounts};
pub use upcoming::{next_upcoming, split_upcoming, UpcomingSplit};
pub use window::{filter_by_period, Dated, Period, TimeWindow};
