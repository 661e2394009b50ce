use crate::cli::VariantsArgs;
use crate::error::Result;
use modelsel::workflows::variants;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

pub fn run(args: VariantsArgs) -> Result<()> {
    info!("Generating substitutions for {:?}", &args.pdb);
    let substitutions = variants::run(&args.pdb, args.sections.as_deref())?;

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            variants::write_substitutions(&mut writer, &substitutions)?;
            writer.flush()?;
            info!("Wrote {} substitutions to {:?}", substitutions.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            variants::write_substitutions(&mut writer, &substitutions)?;
            writer.flush()?;
        }
    }
    Ok(())
}
