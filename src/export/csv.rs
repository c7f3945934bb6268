use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::infrastructure::error::ExportError;
use crate::models::ExportRow;

const SEPARATOR: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// 写入一行 CSV，仅在需要时加引号
pub fn write_row<W, S>(w: &mut W, row: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEPARATOR)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// 写出表头和所有行
pub fn write_rows<W: Write>(w: &mut W, rows: &[ExportRow]) -> io::Result<()> {
    write_row(w, &ExportRow::HEADER)?;
    for row in rows {
        write_row(w, &row.fields())?;
    }
    Ok(())
}

/// 覆盖写入 CSV 文件
pub fn write_csv_file(path: &Path, rows: &[ExportRow]) -> Result<(), ExportError> {
    let io_err = |e: io::Error| ExportError::file_system(path.display().to_string(), e.to_string());

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, rows).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    Ok(())
}
