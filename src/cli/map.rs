use super::{OutputFormat, ui};
use crate::core::accounts::is_unmapped;
use crate::core::context::ReportingContext;
use crate::core::mapper::MappingReport;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color};

impl MappingReport {
    pub fn display_as_table(&self) -> String {
        let target_currency = &self.target_currency;

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("ID"),
            ui::header_cell("Entity"),
            ui::header_cell("Account"),
            ui::header_cell("Currency"),
            ui::header_cell("Rate"),
            ui::header_cell(&format!("Converted ({target_currency})")),
            ui::header_cell("Status"),
            ui::header_cell("Notes"),
        ]);

        for tx in &self.transactions {
            let account = if is_unmapped(&tx.target_account) {
                Cell::new(&tx.target_account).fg(Color::Yellow)
            } else {
                Cell::new(&tx.target_account)
            };
            let notes = if tx.validation.errors.is_empty() {
                tx.validation.checks.join("\n")
            } else {
                tx.validation.errors.join("\n")
            };

            table.add_row(vec![
                Cell::new(&tx.id),
                Cell::new(tx.source_entity.to_string()),
                account,
                Cell::new(&tx.currency.original),
                Cell::new(tx.currency.rate.normalize().to_string())
                    .set_alignment(CellAlignment::Right),
                ui::amount_cell(tx.currency.converted),
                ui::status_cell(tx.validation.status),
                Cell::new(notes),
            ]);
        }

        let mut output = format!(
            "Transactions: {}\n\n",
            ui::style_text(&describe_context(&self.context), ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        let flagged_style = if self.flagged > 0 {
            ui::StyleType::Error
        } else {
            ui::StyleType::TotalValue
        };
        output.push_str(&format!(
            "\n\n{} {}  {} {}  {} {}  {}",
            ui::style_text("Mapped:", ui::StyleType::TotalLabel),
            self.transactions.len(),
            ui::style_text("Flagged:", ui::StyleType::TotalLabel),
            ui::style_text(&self.flagged.to_string(), flagged_style),
            ui::style_text("Unmapped:", ui::StyleType::TotalLabel),
            self.unmapped,
            ui::style_text(
                &format!("({} outside selection)", self.skipped),
                ui::StyleType::Subtle
            ),
        ));

        output
    }
}

fn describe_context(context: &ReportingContext) -> String {
    match (&context.company, &context.period) {
        (None, None) => "all companies, all periods".to_string(),
        (Some(company), None) => format!("{company}, all periods"),
        (None, Some(period)) => format!("all companies, {period}"),
        (Some(company), Some(period)) => format!("{company}, {period}"),
    }
}

pub fn print(report: &MappingReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", report.display_as_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
