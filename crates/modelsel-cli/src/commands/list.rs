use crate::cli::ListArgs;
use crate::error::Result;
use modelsel::workflows::catalog;
use std::io::{self, BufWriter, Write};

pub fn run(args: ListArgs) -> Result<()> {
    let entries = catalog::list_models(&args.models)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for entry in entries {
        writeln!(writer, "{}", entry)?;
    }
    writer.flush()?;
    Ok(())
}
