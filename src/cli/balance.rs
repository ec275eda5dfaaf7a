use super::{OutputFormat, ui};
use crate::core::balance::BalanceCheck;
use anyhow::Result;
use comfy_table::Cell;

impl BalanceCheck {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Side"), ui::header_cell("Total")]);
        table.add_row(vec![Cell::new("Assets"), ui::amount_cell(self.assets_total)]);
        table.add_row(vec![
            Cell::new("Liabilities"),
            ui::amount_cell(self.liabilities_total),
        ]);
        table.add_row(vec![Cell::new("Equity"), ui::amount_cell(self.equity_total)]);
        table.add_row(vec![
            Cell::new("Liabilities + Equity"),
            ui::amount_cell(self.liabilities_total.saturating_add(self.equity_total)),
        ]);

        let (verdict, verdict_style) = if self.is_valid {
            ("Balanced", ui::StyleType::TotalValue)
        } else {
            ("Out of balance", ui::StyleType::Error)
        };

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Balance sheet", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} {}  {}",
            ui::style_text("Difference:", ui::StyleType::TotalLabel),
            ui::format_amount(self.diff),
            ui::style_text(verdict, verdict_style)
        ));
        output
    }
}

pub fn print(check: &BalanceCheck, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", check.display_as_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(check)?),
    }
    Ok(())
}
