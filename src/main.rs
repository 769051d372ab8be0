use clap::Parser;
use clap::error::ErrorKind;
use pipegate::audit::AuditLogger;
use pipegate::cli::Cli;
use pipegate::config::{resolve_project_dir, GateConfig, GateConfigError};
use pipegate::{logging, AppResult, Gate, ShellExecutor};

fn main() {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            if !e.is_reported_by_child() {
                eprintln!("{}", e);
            }
            e.exit_code()
        }
    };

    std::process::exit(code);
}

fn run(cli: &Cli) -> AppResult<()> {
    // Usage errors come before any configuration or settings are read
    let pipeline = if cli.list {
        None
    } else {
        Some(cli.request().parse()?)
    };

    let config = GateConfig::load()?;
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;

    let mut gate = Gate::new(&project_dir, ShellExecutor::new(&config.shell.program));
    match config.audit_log_path() {
        Ok(Some(path)) => gate = gate.with_audit(AuditLogger::with_path(path)),
        Ok(None) => {}
        Err(GateConfigError::DirectoryNotFound) => {
            tracing::debug!("no home directory, audit log disabled")
        }
        Err(e) => tracing::warn!(error = %e, "audit log disabled"),
    }

    let Some(pipeline) = pipeline else {
        for pattern in gate.load_policy()?.iter() {
            println!("{}", pattern);
        }
        return Ok(());
    };

    if cli.dry_run {
        let report = gate.report(&pipeline)?;
        println!("{}", report);
        return match report.first_denial() {
            Some(denial) => Err(denial.into()),
            None => Ok(()),
        };
    }

    gate.run_pipeline(&pipeline)
}
