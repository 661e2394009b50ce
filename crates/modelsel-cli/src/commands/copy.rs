use crate::cli::CopyArgs;
use crate::error::{CliError, Result};
use modelsel::workflows::catalog;
use tracing::info;

pub fn run(args: CopyArgs) -> Result<()> {
    if !args.input.is_dir() {
        return Err(CliError::Argument(format!(
            "Input '{}' is not a directory",
            args.input.display()
        )));
    }
    std::fs::create_dir_all(&args.output)?;

    info!("Copying selected models from {:?}", &args.input);
    let copied = catalog::copy_models(&args.input, &args.output)?;
    println!(
        "Copied {} model structure(s) to {}",
        copied.len(),
        args.output.display()
    );
    Ok(())
}
