pub mod d410_sales_kpi;

pub use d410_sales_kpi::ui::SalesOverviewDashboard;
