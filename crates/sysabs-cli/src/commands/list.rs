use crate::cli::ListArgs;
use crate::commands::load_observations;
use crate::error::Result;
use sysabs::core::models::observations::ObservationSet;
use sysabs::engine::diagnostics::residue_listing;

const HEADER: &str = "hkl              mod 2   mod 3   kl    lh    hk";

pub fn run(args: ListArgs) -> Result<()> {
    let observations = load_observations(&args.input)?;
    println!("{}", render(&observations));
    Ok(())
}

pub fn render(observations: &ObservationSet) -> String {
    std::iter::once(HEADER.to_string())
        .chain(residue_listing(observations).into_iter().map(|row| row.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}
