use crate::cli::ConditionsArgs;
use crate::commands::condition_table;
use crate::config::build_config;
use crate::error::Result;
use sysabs::engine::conditions::ConditionTable;
use tracing::info;

pub fn run(args: ConditionsArgs) -> Result<()> {
    let config = build_config(&args.tuning, None)?;
    let table = condition_table(&config.table)?;
    info!(
        "Listing {} presence conditions for moduli {:?}.",
        table.len(),
        config.table.modularities
    );
    println!("{}", render(&table));
    Ok(())
}

/// One line per condition with its reindex transform, followed by the total.
pub fn render(table: &ConditionTable) -> String {
    table
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>4}  {:<16} {}",
                i + 1,
                entry.condition.to_string(),
                entry.transform
            )
        })
        .chain(std::iter::once(format!("{} presence conditions", table.len())))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysabs::engine::conditions::default_table;

    #[test]
    fn render_lists_every_condition_and_the_total() {
        let text = render(default_table().unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 112);
        assert!(lines[0].contains("1H 0K 0L = 2n"));
        assert!(lines[0].ends_with("[0, 1, 0; 0, 0, 1; 2, 0, 0]"));
        assert_eq!(lines[111], "111 presence conditions");
    }
}
