use clap::Args;

use crate::input::csv_in::TEMPLATE_COLUMNS;

/// Arguments for the CSV template command
#[derive(Args)]
pub struct TemplateArgs {}

/// Print the blank CSV header that `rank --input <file.csv>` accepts.
pub fn print_template(_args: TemplateArgs) {
    println!("{}", TEMPLATE_COLUMNS.join(","));
}
