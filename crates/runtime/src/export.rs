use std::io::{self, Write};

use pricing::VolumeTableRow;

use crate::logging::{RecomputeLogEvent, RecomputeLogKind, RecomputeLogWriter};

pub const PRICE_TABLE_CSV_HEADER: &str =
    "costeo,quantity,total_price,price_per_unit,savings_per_unit,total_profit\n";

pub struct PriceTableCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> PriceTableCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_all(PRICE_TABLE_CSV_HEADER.as_bytes())
    }

    pub fn append_rows(&mut self, costeo: &str, rows: &[VolumeTableRow]) -> io::Result<()> {
        let costeo = escape_csv_field(costeo);
        for row in rows {
            writeln!(
                self.writer,
                "{costeo},{},{},{},{},{}",
                row.quantity,
                row.total_price,
                row.price_per_unit,
                row.savings_per_unit,
                row.total_profit
            )?;
        }
        Ok(())
    }

    /// Writes a complete table, flushes, and only then records the export.
    pub fn export_and_log(
        &mut self,
        sequence: u64,
        costeo: &str,
        rows: &[VolumeTableRow],
        log_writer: &mut dyn RecomputeLogWriter,
    ) -> io::Result<()> {
        self.write_header()?;
        self.append_rows(costeo, rows)?;
        self.writer.flush()?;
        log_writer.write(
            RecomputeLogEvent::new(sequence, RecomputeLogKind::TableExported, None)
                .with_detail(costeo),
        );
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn escape_csv_field(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|ch| matches!(ch, ',' | '"' | '\n' | '\r'));
    if !needs_quotes {
        return value.to_string();
    }

    let escaped = value.replace('"', "\"\"");
    format!("\"{escaped}\"")
}
