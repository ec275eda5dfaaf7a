use super::{OutputFormat, ui};
use crate::core::hierarchy::{FinancialHierarchy, FinancialNode};
use anyhow::Result;
use comfy_table::{Attribute, Cell};

impl FinancialNode {
    /// Renders the tree as a table, one row per node with labels indented by depth.
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Line"),
            ui::header_cell("Budget"),
            ui::header_cell("Actual"),
            ui::header_cell("Variance"),
            ui::header_cell("Variance (%)"),
        ]);

        for (depth, node) in self.walk() {
            let label = format!("{}{}", "  ".repeat(depth), node.label);
            let label = if node.is_leaf() {
                Cell::new(label)
            } else {
                Cell::new(label).add_attribute(Attribute::Bold)
            };

            table.add_row(vec![
                label,
                ui::amount_cell(node.value.budget),
                ui::amount_cell(node.value.actual),
                ui::variance_cell(node.value.variance),
                ui::format_optional_cell(node.value.variance_pct(), |p| {
                    format!("{}%", ui::format_amount(p))
                }),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text(&self.label, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output
    }
}

impl FinancialHierarchy {
    pub fn display_as_tables(&self) -> Vec<String> {
        vec![
            self.assets.display_as_table(),
            self.liabilities.display_as_table(),
            self.equity.display_as_table(),
        ]
    }
}

pub fn print(aggregated: &FinancialHierarchy, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let tables = aggregated.display_as_tables();
            let num_tables = tables.len();
            for (i, table) in tables.into_iter().enumerate() {
                println!("{table}");
                if i < num_tables - 1 {
                    ui::print_separator();
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(aggregated)?),
    }
    Ok(())
}
