//src/output.rs

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{ConsensusError, Result};
use crate::types::ClassificationRecord;

/// Writes one list row:
/// ```text
/// readName  label  refName  coord  logNumerator  logDenominator  -  discriminator  -
/// ```
/// The `-` columns keep the layout of the read list format the downstream
/// read classifier expects.
pub fn write_record<W: Write>(writer: &mut W, rec: &ClassificationRecord) -> io::Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{:?}\t{:?}\t-\t{}\t-",
        rec.read_name, rec.label, rec.position, rec.numerator, rec.denominator, rec.discriminator
    )
}

/// Writes all rows and flushes. A closed downstream pipe stops the output
/// quietly instead of failing the run.
pub fn write_records<W: Write>(writer: &mut W, records: &[ClassificationRecord]) -> io::Result<()> {
    let result = records
        .iter()
        .try_for_each(|rec| write_record(writer, rec))
        .and_then(|_| writer.flush());

    match result {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            log::debug!("output closed early, dropping remaining rows");
            Ok(())
        }
        other => other,
    }
}

/// Creates (or truncates) `path` and writes the list to it.
pub fn write_list<P: AsRef<Path>>(path: P, records: &[ClassificationRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ConsensusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records).map_err(|source| ConsensusError::Io {
        path: path.to_path_buf(),
        source,
    })
}
