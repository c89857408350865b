use anyhow::{Context, Result};
use clap::Parser;
use mowfleet::{CLIArgs, Field};

fn main() -> Result<()> {
    env_logger::init();

    let args = CLIArgs::parse();
    let program = mowfleet::read_program(&args.input_path).with_context(|| {
        format!(
            "Failed to read mower program from given file({}).",
            args.input_path.display()
        )
    })?;

    let mut field = Field::new(program.width, program.length);
    field.run(&program.records);
    // A report failure leaves the simulation intact, the run just ends with
    // no output file.
    if let Err(e) = field.report(&args.output_path) {
        log::error!("{:#}", e);
    }

    Ok(())
}
