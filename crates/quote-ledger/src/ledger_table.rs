use std::io::{self, Write};

use comfy_table::{Cell, CellAlignment, Color, Table};

use crate::{QuoteRecord, QuoteStatus, Statistics};

fn status_cell(status: QuoteStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        QuoteStatus::Sent => cell,
        QuoteStatus::Approved => cell.fg(Color::Blue),
        QuoteStatus::Won => cell.fg(Color::Green),
        QuoteStatus::Lost => cell.fg(Color::DarkGrey),
    }
}

fn money(value: rust_decimal::Decimal) -> String {
    format!("${value:.2}")
}

impl QuoteRecord {
    /// Write `(position, record)` rows as a table. Positions are shown as given
    /// so a filtered listing still shows the handles `update_status` expects.
    pub fn write_table<'a, W: Write>(
        rows: impl IntoIterator<Item = (usize, &'a QuoteRecord)>,
        mut writer: W,
    ) -> io::Result<()> {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(comfy_table::ContentArrangement::DynamicFullWidth);
        table.set_header(vec![
            "#", "Date", "Time", "Customer", "Email", "Address", "Service", "Price", "Status",
        ]);

        for (position, record) in rows {
            table.add_row(vec![
                Cell::new(position).set_alignment(CellAlignment::Right),
                Cell::new(record.date.format("%d/%m/%Y")),
                Cell::new(record.time.format("%H:%M:%S")),
                Cell::new(&record.customer_name),
                Cell::new(&record.customer_email),
                Cell::new(&record.customer_address),
                Cell::new(&record.service_name),
                Cell::new(money(record.price)).set_alignment(CellAlignment::Right),
                status_cell(record.status),
            ]);
        }

        writeln!(writer, "{table}")
    }
}

impl Statistics {
    /// Write the aggregates as a two-column table. The win rate row is omitted
    /// while no quote has been closed.
    pub fn write_table<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(comfy_table::ContentArrangement::Disabled);

        let count = |label: &str, n: usize| {
            vec![
                Cell::new(label),
                Cell::new(n).set_alignment(CellAlignment::Right),
            ]
        };

        table.add_row(count("Total quotes", self.total_count));
        table.add_row(vec![
            Cell::new("Total value"),
            Cell::new(money(self.total_value)).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(count("Active", self.active_count));
        table.add_row(count("Sent", self.sent_count));
        table.add_row(count("Approved", self.approved_count));
        table.add_row(count("Won", self.won_count));
        table.add_row(count("Lost", self.lost_count));
        table.add_row(vec![
            Cell::new("Won value"),
            Cell::new(money(self.won_value))
                .fg(Color::Green)
                .set_alignment(CellAlignment::Right),
        ]);
        if let Some(rate) = self.win_rate {
            table.add_row(vec![
                Cell::new("Win rate"),
                Cell::new(format!("{rate:.1}%")).set_alignment(CellAlignment::Right),
            ]);
        }

        writeln!(writer, "{table}")
    }
}
