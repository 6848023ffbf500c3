use crate::cli::args::{CheckArgs, OutputFormat, RunArgs};
use crate::cli::output::CommandOutput;
use crate::logging;
use crate::scenario::{Scenario, ScenarioReport};
use crate::ui::formatter::Formatter;
use crate::{CallMapError, Result};

fn print_info(message: impl AsRef<str>) {
    println!("{}", Formatter::info(message));
}

fn print_success(message: impl AsRef<str>) {
    println!("{}", Formatter::success(message));
}

fn print_warning(message: impl AsRef<str>) {
    println!("{}", Formatter::warning(message));
}

fn print_error(message: impl AsRef<str>) {
    println!("{}", Formatter::error(message));
}

/// Execute the run command
pub fn run(args: RunArgs) -> Result<()> {
    let format = args.format.unwrap_or_default();
    let scenario = Scenario::load(&args.scenario)?;
    let report = scenario.run(args.prevent_parent_calls)?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_report(&report, args.show_ledger),
    }

    if report.passed {
        Ok(())
    } else {
        Err(CallMapError::Scenario("Scenario execution failed".into()))
    }
}

/// Execute the check command
pub fn check(args: CheckArgs) -> Result<()> {
    print_info(format!("Checking scenario: {:?}", args.scenario));
    let scenario = Scenario::load(&args.scenario)?;
    let proxy = scenario.build_proxy(false)?;
    let mapped = proxy.call_map().map_or(0, |map| map.len());
    print_success(format!(
        "Scenario is valid: {} members declared, {} mapped, {} steps",
        scenario.target.members.len(),
        mapped,
        scenario.steps.len()
    ));
    Ok(())
}

fn print_json(report: &ScenarioReport) -> Result<()> {
    let output = if report.passed {
        CommandOutput::passed(report)
    } else {
        let errors = report
            .steps
            .iter()
            .filter_map(|s| s.detail.clone())
            .chain(report.call_counts.iter().filter_map(|c| c.detail.clone()))
            .collect();
        CommandOutput::failed(report, errors)
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CallMapError::Scenario(format!("Failed to serialize report: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn print_report(report: &ScenarioReport, show_ledger: bool) {
    print_info(format!(
        "Running {} scenario steps against {}\n",
        report.steps.len(),
        report.target
    ));

    for step in &report.steps {
        print_info(format!("Step {}: {}", step.index, step.label));
        println!("  Call: {}", Formatter::format_call(&step.member, &step.args));
        println!("  Result: {}", step.observed);
        match &step.detail {
            None => print_success(format!("Step {} passed.\n", step.index)),
            Some(reason) => {
                print_error(format!("  ✗ {}", reason));
                print_warning(format!("Step {} failed.\n", step.index));
            }
        }
    }

    for count in &report.call_counts {
        match &count.detail {
            None => print_success(format!(
                "✓ {} received {} calls",
                count.member, count.expected
            )),
            Some(reason) => print_error(format!("✗ {}", reason)),
        }
    }

    if show_ledger {
        println!();
        println!("{}", Formatter::format_ledger(&report.ledger));
    }
    logging::log_ledger(&Formatter::format_ledger(&report.ledger));

    if report.passed {
        print_success("All scenario steps passed successfully!");
    }
}
