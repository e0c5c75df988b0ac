pub mod backend_status;
pub mod breakdown_panel;
pub mod dashboard;
pub mod summary_cards;

pub use backend_status::BackendStatus;
pub use breakdown_panel::BreakdownPanel;
pub use dashboard::SalesOverviewDashboard;
pub use summary_cards::SummaryCards;
