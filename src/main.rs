use std::fs;
use std::path::Path;

use clap::Parser;

use audit_guard::cli::{
    Cli, ColorChoice, Commands, ConfigAction, InitArgs, PoliciesArgs, ScanArgs, TestArgs,
};
use audit_guard::config::{Config, ConfigLoader, FileConfigLoader, validate_config};
use audit_guard::output::{
    ColorMode, JsonFormatter, OutputFormat, PolicyFormatter, RunProgress, ScanFormatter,
    TestFormatter, TextFormatter,
};
use audit_guard::scan::{
    ComplianceSummary, PolicyScanner, apply_disabled, default_policies, recount_violations,
};
use audit_guard::testing::{
    LatencySimulator, TestDiscovery, TestItem, TestRunner, total_leaves,
};
use audit_guard::tree::{DirectoryLoader, FileNode, GlobFilter};
use audit_guard::{AuditGuardError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Scan(args) => run_scan(args, &cli),
        Commands::Test(args) => run_test(args, &cli),
        Commands::Policies(args) => run_policies(args, &cli),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args),
    };

    std::process::exit(exit_code);
}

fn run_scan(args: &ScanArgs, cli: &Cli) -> i32 {
    match run_scan_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_scan_impl(args: &ScanArgs, cli: &Cli) -> audit_guard::Result<i32> {
    // 1. Load configuration
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_scan_overrides(&mut config, args);

    // 2. Materialize the tree
    let tree = load_tree(args.snapshot.as_deref(), &args.path, &config)?;

    // 3. Scan
    let report = PolicyScanner::default().scan(&tree);

    // 4. Format output
    let color_mode = color_choice_to_mode(cli.color);
    let mut output = String::new();
    if args.log && args.format == OutputFormat::Text {
        for line in &report.log {
            output.push_str(line);
            output.push('\n');
        }
        output.push('\n');
    }
    output.push_str(&match args.format {
        OutputFormat::Text => {
            TextFormatter::with_verbose(color_mode, cli.verbose).format_scan(&report)?
        }
        OutputFormat::Json => JsonFormatter.format_scan(&report)?,
    });

    // 5. Write output
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    // 6. Determine exit code
    if report.count_at_least(config.scan.fail_on) > 0 {
        Ok(EXIT_VIOLATIONS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn run_test(args: &TestArgs, cli: &Cli) -> i32 {
    match run_test_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_test_impl(args: &TestArgs, cli: &Cli) -> audit_guard::Result<i32> {
    // 1. Load configuration
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_test_overrides(&mut config, args);

    // 2. Materialize the tree and discover tests
    let tree = load_tree(args.snapshot.as_deref(), &args.path, &config)?;
    let mut items = TestDiscovery::discover(&tree);
    if let Some(needle) = &args.filter {
        items = filter_items(items, needle);
    }

    let color_mode = color_choice_to_mode(cli.color);
    let formatter = TextFormatter::with_verbose(color_mode, cli.verbose);

    // 3. Listing mode stops before any execution
    if args.list {
        let output = match args.format {
            OutputFormat::Text => formatter.format_tests(&items, None)?,
            OutputFormat::Json => JsonFormatter.format_tests(&items, None)?,
        };
        write_output(args.output.as_deref(), &output, cli.quiet)?;
        return Ok(EXIT_SUCCESS);
    }

    // 4. Scan first: the runner consults findings and policy state
    let report = PolicyScanner::default().scan(&tree);
    let mut policies = default_policies();
    apply_disabled(&mut policies, &config.policies.disabled);

    // 5. Run sequentially with live progress
    let simulator = LatencySimulator::new(
        config.runner.min_duration_ms,
        config.runner.max_duration_ms,
    );
    let mut runner = TestRunner::new(&tree, &report.issues, &policies, simulator);
    let progress = RunProgress::new(total_leaves(&items) as u64, cli.quiet);
    let summary = runner.run_all(&mut items, &mut |item| {
        if item.status.is_terminal() {
            progress.finish_test();
        } else {
            progress.start_test(&item.name);
        }
    });
    progress.finish();

    // 6. Format and write the report
    let output = match args.format {
        OutputFormat::Text => formatter.format_tests(&items, Some(&summary))?,
        OutputFormat::Json => JsonFormatter.format_tests(&items, Some(&summary))?,
    };
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if summary.has_failures() {
        Ok(EXIT_VIOLATIONS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn run_policies(args: &PoliciesArgs, cli: &Cli) -> i32 {
    match run_policies_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_policies_impl(args: &PoliciesArgs, cli: &Cli) -> audit_guard::Result<i32> {
    // 1. Load configuration
    let config = load_config(args.config.as_deref(), cli.no_config)?;

    // 2. Scan, then derive counts and compliance from the fresh issue set
    let tree = load_tree(args.snapshot.as_deref(), &args.path, &config)?;
    let report = PolicyScanner::default().scan(&tree);
    let mut policies = default_policies();
    apply_disabled(&mut policies, &config.policies.disabled);
    recount_violations(&mut policies, &report.issues);
    let compliance = ComplianceSummary::derive(&policies, &report.issues);

    // 3. Format and write
    let color_mode = color_choice_to_mode(cli.color);
    let output = match args.format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, cli.verbose)
            .format_policies(&policies, &compliance)?,
        OutputFormat::Json => JsonFormatter.format_policies(&policies, &compliance)?,
    };
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(EXIT_SUCCESS)
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> audit_guard::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn load_tree(
    snapshot: Option<&Path>,
    path: &Path,
    config: &Config,
) -> audit_guard::Result<FileNode> {
    if let Some(snapshot_path) = snapshot {
        let content =
            fs::read_to_string(snapshot_path).map_err(|e| AuditGuardError::FileRead {
                path: snapshot_path.to_path_buf(),
                source: e,
            })?;
        return serde_json::from_str(&content).map_err(|e| AuditGuardError::Snapshot {
            path: snapshot_path.to_path_buf(),
            source: e,
        });
    }

    let filter = GlobFilter::new(config.scan.extensions.clone(), &config.scan.exclude)?;
    DirectoryLoader::with_gitignore(filter, config.scan.gitignore).load(path)
}

fn apply_scan_overrides(config: &mut Config, args: &ScanArgs) {
    if let Some(fail_on) = args.fail_on {
        config.scan.fail_on = fail_on;
    }
    if let Some(ext) = &args.ext {
        config.scan.extensions = ext.clone();
    }
    config.scan.exclude.extend(args.exclude.iter().cloned());
    if args.no_gitignore {
        config.scan.gitignore = false;
    }
}

fn apply_test_overrides(config: &mut Config, args: &TestArgs) {
    config.scan.exclude.extend(args.exclude.iter().cloned());
    if args.no_gitignore {
        config.scan.gitignore = false;
    }
}

/// Keep only suites/tests whose name matches the filter (case-insensitive).
/// A matching suite keeps all of its tests; otherwise a suite survives only
/// through its matching children.
fn filter_items(items: Vec<TestItem>, needle: &str) -> Vec<TestItem> {
    let needle = needle.to_lowercase();
    items
        .into_iter()
        .filter_map(|mut item| {
            if item.name.to_lowercase().contains(&needle) {
                return Some(item);
            }
            if item.is_leaf() {
                return None;
            }
            item.children = filter_items(std::mem::take(&mut item.children), &needle);
            (!item.children.is_empty()).then_some(item)
        })
        .collect()
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> audit_guard::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> audit_guard::Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(AuditGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

fn config_template() -> String {
    r#"# audit-guard configuration file

[scan]
# Respect .gitignore rules while walking the project (default: true)
gitignore = true

# Glob patterns to exclude from the tree
exclude = [
    "**/target/**",
    "**/node_modules/**",
    "**/.git/**",
]

# File extensions to load (empty = all files).
# Bare names like "Dockerfile" match extensionless files in full.
extensions = []

# Minimum severity that turns scan findings into a failing exit code
# (one of: critical, high, medium, low)
fail_on = "high"

[policies]
# Policy ids to disable
# disabled = ["iam-root"]

[runner]
# Simulated test duration range in milliseconds
min_duration_ms = 40
max_duration_ms = 120
"#
    .to_string()
}

fn run_config(args: &audit_guard::cli::ConfigArgs) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), format),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Configuration error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_validate_impl(config_path: &Path) -> audit_guard::Result<()> {
    if !config_path.exists() {
        return Err(AuditGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;
    validate_config(&config)?;

    Ok(())
}

fn run_config_show(config_path: Option<&Path>, format: &str) -> i32 {
    match run_config_show_impl(config_path, format) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_show_impl(
    config_path: Option<&Path>,
    format: &str,
) -> audit_guard::Result<String> {
    let config = load_config(config_path, false)?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&config)?;
            Ok(format!("{json}\n"))
        }
        _ => Ok(format_config_text(&config)),
    }
}

fn format_config_text(config: &Config) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    output.push_str("=== Effective Configuration ===\n\n");

    output.push_str("[scan]\n");
    let _ = writeln!(output, "  gitignore = {}", config.scan.gitignore);
    let _ = writeln!(output, "  exclude = {:?}", config.scan.exclude);
    let _ = writeln!(output, "  extensions = {:?}", config.scan.extensions);
    let _ = writeln!(
        output,
        "  fail_on = \"{}\"",
        config.scan.fail_on.label().to_lowercase()
    );

    output.push_str("\n[policies]\n");
    let _ = writeln!(output, "  disabled = {:?}", config.policies.disabled);

    output.push_str("\n[runner]\n");
    let _ = writeln!(output, "  min_duration_ms = {}", config.runner.min_duration_ms);
    let _ = writeln!(output, "  max_duration_ms = {}", config.runner.max_duration_ms);

    output
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
