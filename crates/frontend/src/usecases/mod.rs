pub mod u510_sales_upload;
