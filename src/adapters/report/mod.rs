pub mod html_report;
